use crate::{
    algorithm::propagation::{PropagationReport, propagate, settle},
    algorithm::selection::{RandomSelector, SelectionMode, choose_candidate, pick_next_cell},
    io::error::{Result, WaveError},
    spatial::{Grid, WaveCell},
    tiles::Catalog,
};
use std::fmt;

/// Why a cell ended up collapsed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollapseCause {
    /// Candidate drawn by the solver
    Chosen,
    /// Variant requested by name
    Forced,
    /// Variant requested by atlas coordinates
    Variant,
    /// Reduced to one candidate by propagation
    Propagated,
}

/// One cell reaching a single candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollapseEvent {
    /// Cell coordinates
    pub position: (usize, usize),
    /// Catalog index the cell holds
    pub reality: usize,
    /// What caused the collapse
    pub cause: CollapseCause,
    /// Solver step that produced the event, 0 for a settle before any collapse
    pub step: usize,
}

/// Result of a collapse request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollapseOutcome {
    /// The cell was collapsed and its constraints propagated
    Collapsed {
        /// Cell coordinates
        position: (usize, usize),
        /// Catalog index the cell now holds
        reality: usize,
        /// Propagation summary
        report: PropagationReport,
    },
    /// Nothing changed: the cell was already collapsed or is contradicted
    Unchanged {
        /// Cell coordinates
        position: (usize, usize),
        /// Existing variant, `None` for a contradicted cell
        reality: Option<usize>,
    },
    /// No variant carries the requested name
    LookupMiss {
        /// Cell coordinates
        position: (usize, usize),
        /// Requested name
        name: String,
    },
    /// No candidate of the cell comes from the requested atlas coordinates
    NoMatch {
        /// Cell coordinates
        position: (usize, usize),
        /// Requested atlas coordinates
        source: [u32; 2],
    },
}

impl CollapseOutcome {
    /// Whether the grid changed
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Collapsed { .. })
    }
}

/// Final state of a solver run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every cell holds exactly one variant
    Complete {
        /// Steps taken by the run
        steps: usize,
    },
    /// No open cell remains but some cells are contradicted
    Stuck {
        /// Steps taken by the run
        steps: usize,
        /// Positions of contradicted cells in row-major order
        contradictions: Vec<(usize, usize)>,
    },
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete { steps } => write!(f, "complete after {steps} steps"),
            Self::Stuck {
                steps,
                contradictions,
            } => write!(
                f,
                "stuck after {steps} steps with {} contradicted cells",
                contradictions.len()
            ),
        }
    }
}

/// Wave function collapse solver over a fixed grid
///
/// Owns the catalog, the grid, the seeded random source and the collapse
/// history. Every collapse is followed by a complete propagation pass before
/// the call returns.
#[derive(Clone, Debug)]
pub struct WaveSolver {
    catalog: Catalog,
    grid: Grid,
    random: RandomSelector,
    mode: SelectionMode,
    history: Vec<CollapseEvent>,
    epoch: u32,
    steps: usize,
}

impl WaveSolver {
    /// Create a solver with every cell holding the full catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the grid dimensions are invalid.
    pub fn new(catalog: Catalog, width: usize, height: usize, seed: u64) -> Result<Self> {
        let grid = Grid::new(width, height, &catalog)?;
        Ok(Self {
            catalog,
            grid,
            random: RandomSelector::new(seed),
            mode: SelectionMode::Uniform,
            history: Vec::new(),
            epoch: 0,
            steps: 0,
        })
    }

    /// Use the given candidate selection mode
    #[must_use]
    pub const fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Access the catalog
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Access the grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Collapse events in the order they happened
    pub fn history(&self) -> &[CollapseEvent] {
        &self.history
    }

    /// Number of collapse requests that changed the grid
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Current candidate selection mode
    pub const fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Current propagation epoch
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Cell at signed coordinates
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid.
    pub fn cell(&self, x: i64, y: i64) -> Result<&WaveCell> {
        let (col, row) = self.grid.checked_position(x, y)?;
        self.grid.get(col, row).ok_or(WaveError::OutOfBounds {
            position: (x, y),
            dimensions: self.grid.dimensions(),
        })
    }

    /// Collapse a cell to a candidate drawn by the selection mode
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid.
    pub fn collapse_at(&mut self, x: i64, y: i64) -> Result<CollapseOutcome> {
        let position = self.grid.checked_position(x, y)?;
        Ok(self.collapse_chosen(position))
    }

    /// Collapse a cell to the variant with the given name
    ///
    /// The variant does not need to be a current candidate. An unknown name
    /// leaves the grid unchanged.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid.
    pub fn collapse_into_name(&mut self, x: i64, y: i64, name: &str) -> Result<CollapseOutcome> {
        let position = self.grid.checked_position(x, y)?;

        let Some(reality) = self.catalog.index_of(name) else {
            log::warn!("No reality named {name:?}, cell ({x}, {y}) left unchanged");
            return Ok(CollapseOutcome::LookupMiss {
                position,
                name: name.to_string(),
            });
        };

        Ok(self.apply(position, reality, CollapseCause::Forced))
    }

    /// Collapse a cell to its first candidate cut from atlas cell `(column, row)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid.
    pub fn collapse_to_variant(
        &mut self,
        x: i64,
        y: i64,
        column: u32,
        row: u32,
    ) -> Result<CollapseOutcome> {
        let position = self.grid.checked_position(x, y)?;
        let source = [column, row];

        let matching = self.grid.get(position.0, position.1).and_then(|cell| {
            cell.candidates().iter().find(|&index| {
                self.catalog
                    .get(index)
                    .is_some_and(|reality| reality.source == source)
            })
        });

        Ok(match matching {
            Some(reality) => self.apply(position, reality, CollapseCause::Variant),
            None => CollapseOutcome::NoMatch { position, source },
        })
    }

    /// Propagate from every cell at once
    ///
    /// Removes variants whose sockets no neighbor can match. Cells collapsed
    /// this way are recorded under the current step.
    pub fn settle(&mut self) -> PropagationReport {
        self.epoch += 1;
        let report = settle(&mut self.grid, &self.catalog, self.epoch);
        self.record_propagated(&report);
        report
    }

    /// Pick the next cell to collapse without changing the grid
    pub fn pick_next_cell(&mut self) -> Option<(usize, usize)> {
        pick_next_cell(&self.grid, &mut self.random)
    }

    /// Pick the lowest-entropy cell and collapse it
    ///
    /// Returns `None` once no open cell remains.
    pub fn step(&mut self) -> Option<CollapseOutcome> {
        let position = self.pick_next_cell()?;
        Some(self.collapse_chosen(position))
    }

    /// Step until no open cell remains
    pub fn run(&mut self) -> SolveOutcome {
        self.run_with(|_, _| {})
    }

    /// Step until no open cell remains, reporting every step
    pub fn run_with<F>(&mut self, mut observer: F) -> SolveOutcome
    where
        F: FnMut(&Self, &CollapseOutcome),
    {
        let start = self.steps;
        while let Some(outcome) = self.step() {
            observer(self, &outcome);
        }
        self.outcome_since(start)
    }

    /// Current state summarized as an outcome, counting steps from `start`
    fn outcome_since(&self, start: usize) -> SolveOutcome {
        let steps = self.steps - start;
        let contradictions = self.grid.contradictions();
        if contradictions.is_empty() && self.grid.is_complete() {
            SolveOutcome::Complete { steps }
        } else {
            SolveOutcome::Stuck {
                steps,
                contradictions,
            }
        }
    }

    /// Whether every cell holds exactly one variant
    pub fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    /// Positions of every contradicted cell
    pub fn contradictions(&self) -> Vec<(usize, usize)> {
        self.grid.contradictions()
    }

    /// Textual dump of one cell: its summary and labelled sockets per edge
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid.
    pub fn describe_cell(&self, x: i64, y: i64) -> Result<String> {
        let (col, row) = self.grid.checked_position(x, y)?;
        let Some(cell) = self.grid.get(col, row) else {
            return Err(WaveError::OutOfBounds {
                position: (x, y),
                dimensions: self.grid.dimensions(),
            });
        };
        let mut labels = self.catalog.labels().clone();
        let sockets = cell.describe_sockets(&mut labels);
        Ok(format!("{cell}\n{sockets}"))
    }

    fn collapse_chosen(&mut self, position: (usize, usize)) -> CollapseOutcome {
        let (x, y) = position;
        let Some(cell) = self.grid.get(x, y) else {
            return CollapseOutcome::Unchanged {
                position,
                reality: None,
            };
        };
        if !cell.is_open() {
            return CollapseOutcome::Unchanged {
                position,
                reality: cell.collapsed_reality(),
            };
        }

        match choose_candidate(cell, &self.catalog, &mut self.random, self.mode) {
            Some(reality) => {
                log::debug!("Chose {cell} -> {reality}");
                self.apply(position, reality, CollapseCause::Chosen)
            }
            None => CollapseOutcome::Unchanged {
                position,
                reality: None,
            },
        }
    }

    fn apply(
        &mut self,
        position: (usize, usize),
        reality: usize,
        cause: CollapseCause,
    ) -> CollapseOutcome {
        let (x, y) = position;
        let Some(cell) = self.grid.get_mut(x, y) else {
            return CollapseOutcome::Unchanged {
                position,
                reality: None,
            };
        };

        let result = cell.collapse_into(reality, &self.catalog);
        let Some(held) = result.reality.filter(|_| result.changed) else {
            return CollapseOutcome::Unchanged {
                position,
                reality: result.reality,
            };
        };

        self.steps += 1;
        self.epoch += 1;
        self.history.push(CollapseEvent {
            position,
            reality: held,
            cause,
            step: self.steps,
        });

        let report = propagate(&mut self.grid, &self.catalog, position, self.epoch);
        self.record_propagated(&report);

        CollapseOutcome::Collapsed {
            position,
            reality: held,
            report,
        }
    }

    fn record_propagated(&mut self, report: &PropagationReport) {
        for &(x, y) in &report.newly_collapsed {
            let Some(reality) = self.grid.get(x, y).and_then(WaveCell::collapsed_reality) else {
                continue;
            };
            self.history.push(CollapseEvent {
                position: (x, y),
                reality,
                cause: CollapseCause::Propagated,
                step: self.steps,
            });
        }
    }
}
