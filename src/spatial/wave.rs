//! Per-cell wave state: remaining candidates and per-edge socket counts
//!
//! Each cell caches, for every edge, how many surviving candidates carry each
//! signature. The key set of that map is what a neighbor filters against.

use crate::algorithm::bitset::CandidateSet;
use crate::io::error::{Result, invalid_parameter};
use crate::tiles::catalog::Catalog;
use crate::tiles::sockets::{Edge, Signature, SocketLabels};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Outcome of collapsing a cell into a variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollapseResult {
    /// Catalog index the cell now holds, `None` if the request was rejected
    pub reality: Option<usize>,
    /// Whether the candidate set changed and neighbors need propagation
    pub changed: bool,
}

/// One grid position and the variants still possible there
#[derive(Clone, Debug)]
pub struct WaveCell {
    x: usize,
    y: usize,
    candidates: CandidateSet,
    edge_socket_counts: [BTreeMap<Signature, usize>; 4],
    last_touched: u32,
}

impl WaveCell {
    /// Create a cell holding the given candidates
    ///
    /// # Errors
    ///
    /// Returns an error if `candidates` is empty.
    pub fn new(x: usize, y: usize, candidates: CandidateSet, catalog: &Catalog) -> Result<Self> {
        if candidates.is_empty() {
            return Err(invalid_parameter(
                "candidates",
                &format!("({x}, {y})"),
                &"a cell must start with at least one candidate",
            ));
        }

        let mut cell = Self {
            x,
            y,
            candidates,
            edge_socket_counts: Default::default(),
            last_touched: 0,
        };
        cell.recount(catalog);
        Ok(cell)
    }

    /// Grid coordinates as `(x, y)`
    pub const fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Remaining candidates
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Number of remaining candidates, used as the entropy proxy
    pub fn entropy(&self) -> usize {
        self.candidates.count()
    }

    /// Exactly one candidate remains
    pub fn is_collapsed(&self) -> bool {
        self.entropy() == 1
    }

    /// No candidate remains
    pub fn is_contradicted(&self) -> bool {
        self.candidates.is_empty()
    }

    /// More than one candidate remains
    pub fn is_open(&self) -> bool {
        self.entropy() > 1
    }

    /// Catalog index of the single remaining candidate
    pub fn collapsed_reality(&self) -> Option<usize> {
        if self.is_collapsed() {
            self.candidates.nth(0)
        } else {
            None
        }
    }

    /// Propagation epoch that last reached this cell while it was collapsed
    pub const fn last_touched(&self) -> u32 {
        self.last_touched
    }

    /// Record that a propagation pass reached this cell
    pub const fn touch(&mut self, epoch: u32) {
        self.last_touched = epoch;
    }

    /// Signature counts on one edge
    pub fn edge_socket_counts(&self, edge: Edge) -> &BTreeMap<Signature, usize> {
        edge.select(&self.edge_socket_counts)
    }

    /// Signatures still reachable on one edge
    pub fn allowed_signatures(&self, edge: Edge) -> BTreeSet<Signature> {
        self.edge_socket_counts(edge).keys().copied().collect()
    }

    /// Replace the candidates with a single variant
    ///
    /// An already collapsed cell keeps its variant and reports no change. The
    /// variant does not need to be a current candidate, which lets callers
    /// override a cell manually.
    pub fn collapse_into(&mut self, reality: usize, catalog: &Catalog) -> CollapseResult {
        if let Some(existing) = self.collapsed_reality() {
            return CollapseResult {
                reality: Some(existing),
                changed: false,
            };
        }
        if catalog.get(reality).is_none() {
            return CollapseResult {
                reality: None,
                changed: false,
            };
        }

        self.candidates = CandidateSet::singleton(catalog.len(), reality);
        self.recount(catalog);
        CollapseResult {
            reality: Some(reality),
            changed: true,
        }
    }

    /// Remove candidates whose signature on `edge` is not in `allowed`
    ///
    /// Collapsed cells are left untouched. Returns whether anything was
    /// removed; the cell may end up contradicted.
    pub fn drop_non_matching(
        &mut self,
        allowed: &BTreeSet<Signature>,
        edge: Edge,
        catalog: &Catalog,
    ) -> bool {
        if self.is_collapsed() {
            return false;
        }

        let removed = self.candidates.retain(|index| {
            catalog
                .get(index)
                .is_some_and(|reality| allowed.contains(&reality.socket(edge)))
        });
        if removed == 0 {
            return false;
        }

        self.recount(catalog);
        true
    }

    fn recount(&mut self, catalog: &Catalog) {
        for counts in &mut self.edge_socket_counts {
            counts.clear();
        }
        for reality in self.candidates.iter().filter_map(|index| catalog.get(index)) {
            for (counts, signature) in self.edge_socket_counts.iter_mut().zip(reality.sockets) {
                *counts.entry(signature).or_insert(0) += 1;
            }
        }
    }

    /// Labelled allowed signatures per edge, one line per edge
    pub fn describe_sockets(&self, labels: &mut SocketLabels) -> String {
        Edge::ALL
            .iter()
            .map(|&edge| {
                format!(
                    "{edge:?} {}",
                    labels.format(self.edge_socket_counts(edge).keys().copied())
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for WaveCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wave{{realities={}, x={}, y={}}}",
            self.entropy(),
            self.x,
            self.y
        )
    }
}
