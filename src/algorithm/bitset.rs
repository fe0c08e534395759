use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of catalog indices still possible in a cell
///
/// Iteration follows catalog order, so the candidate list of a cell is always
/// ordered and free of duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
}

impl CandidateSet {
    /// Create a set with no candidates over a catalog of `catalog_len` variants
    pub fn new(catalog_len: usize) -> Self {
        Self {
            bits: bitvec![0; catalog_len],
        }
    }

    /// Create a set containing every catalog variant
    pub fn all(catalog_len: usize) -> Self {
        Self {
            bits: bitvec![1; catalog_len],
        }
    }

    /// Create a set holding only `index`
    ///
    /// Indices beyond the catalog produce an empty set.
    pub fn singleton(catalog_len: usize, index: usize) -> Self {
        let mut set = Self::new(catalog_len);
        set.insert(index);
        set
    }

    /// Insert a catalog index, ignoring indices beyond the catalog
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Keep only the indices for which `keep` holds
    ///
    /// Returns the number of indices removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize) -> bool,
    {
        let doomed: Vec<usize> = self.bits.iter_ones().filter(|&i| !keep(i)).collect();
        for &index in &doomed {
            self.bits.set(index, false);
        }
        doomed.len()
    }

    /// Test if no candidates remain
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count remaining candidates
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Size of the catalog this set ranges over
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Remaining candidates in catalog order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// The `n`-th remaining candidate in catalog order
    pub fn nth(&self, n: usize) -> Option<usize> {
        self.bits.iter_ones().nth(n)
    }

    /// Extract all candidates as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CandidateSet({} candidates: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}
