use crate::{
    spatial::{Grid, WaveCell},
    tiles::{Catalog, Edge},
};

/// Summary of one propagation pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Epoch stamped on collapsed cells reached by this pass
    pub epoch: u32,
    /// Number of cells popped from the work stack
    pub visited: usize,
    /// Total candidates removed across all cells
    pub removals: usize,
    /// Cells reduced to a single candidate by this pass, in removal order
    pub newly_collapsed: Vec<(usize, usize)>,
    /// Cells reduced to zero candidates by this pass, in removal order
    pub contradictions: Vec<(usize, usize)>,
}

impl PropagationReport {
    /// Whether this pass emptied any cell
    pub fn has_contradictions(&self) -> bool {
        !self.contradictions.is_empty()
    }

    /// Fold another pass into this one
    pub fn absorb(&mut self, other: Self) {
        self.epoch = self.epoch.max(other.epoch);
        self.visited += other.visited;
        self.removals += other.removals;
        self.newly_collapsed.extend(other.newly_collapsed);
        self.contradictions.extend(other.contradictions);
    }
}

/// Propagate the constraints of one changed cell until nothing changes
pub fn propagate(
    grid: &mut Grid,
    catalog: &Catalog,
    seed: (usize, usize),
    epoch: u32,
) -> PropagationReport {
    propagate_many(grid, catalog, &[seed], epoch)
}

/// Propagate from several changed cells at once
///
/// Cells are processed from a LIFO work stack. Each popped cell filters its
/// open neighbors against the signatures it still allows on the shared edge;
/// a neighbor that loses candidates is pushed in turn. Collapsed neighbors are
/// never filtered, only stamped with `epoch`. Candidate sets only shrink, so
/// the loop always terminates.
pub fn propagate_many(
    grid: &mut Grid,
    catalog: &Catalog,
    seeds: &[(usize, usize)],
    epoch: u32,
) -> PropagationReport {
    let mut report = PropagationReport {
        epoch,
        ..PropagationReport::default()
    };
    let mut stack: Vec<(usize, usize)> = seeds.to_vec();

    while let Some((x, y)) = stack.pop() {
        report.visited += 1;

        for edge in Edge::ALL {
            let Some((nx, ny)) = grid.neighbor_position(x, y, edge) else {
                continue;
            };
            let Some(allowed) = grid.get(x, y).map(|cell| cell.allowed_signatures(edge)) else {
                continue;
            };
            let Some(neighbor) = grid.get_mut(nx, ny) else {
                continue;
            };

            if neighbor.is_collapsed() {
                neighbor.touch(epoch);
                continue;
            }

            let before = neighbor.entropy();
            if neighbor.drop_non_matching(&allowed, edge.opposite(), catalog) {
                report.removals += before - neighbor.entropy();

                if neighbor.is_collapsed() {
                    report.newly_collapsed.push((nx, ny));
                } else if neighbor.is_contradicted() {
                    log::warn!("Contradiction at ({nx}, {ny}): no candidate left after propagation");
                    report.contradictions.push((nx, ny));
                }
                stack.push((nx, ny));
            }
        }
    }

    report
}

/// Establish local consistency over the whole grid
///
/// Seeds propagation with every cell, which removes variants whose sockets
/// can never be matched by any neighbor.
pub fn settle(grid: &mut Grid, catalog: &Catalog, epoch: u32) -> PropagationReport {
    let seeds: Vec<(usize, usize)> = grid.cells().map(WaveCell::position).collect();
    propagate_many(grid, catalog, &seeds, epoch)
}

/// Open cells that still allow a signature their neighbor cannot match
///
/// Returns `(position, edge)` pairs. An empty result means every open cell is
/// locally consistent with all its neighbors.
pub fn find_inconsistencies(grid: &Grid) -> Vec<((usize, usize), Edge)> {
    let mut found = Vec::new();

    for cell in grid.cells().filter(|cell| cell.is_open()) {
        let (x, y) = cell.position();
        for edge in Edge::ALL {
            let Some(neighbor) = grid.neighbor(x, y, edge) else {
                continue;
            };
            let theirs = neighbor.edge_socket_counts(edge.opposite());
            if cell
                .edge_socket_counts(edge)
                .keys()
                .any(|signature| !theirs.contains_key(signature))
            {
                found.push(((x, y), edge));
            }
        }
    }

    found
}
