use crate::{spatial::Grid, spatial::WaveCell, tiles::Catalog};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// How a candidate is drawn from a cell when it collapses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Every remaining candidate is equally likely
    #[default]
    Uniform,
    /// Candidates are drawn in proportion to their variant weight
    Weighted,
}

/// Seeded random selector for reproducible stochastic choices
///
/// The solver draws from it in exactly two places: breaking ties between
/// lowest-entropy cells and choosing a candidate inside a cell.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniformly chosen index below `len`, `None` when `len` is zero
    pub fn uniform_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Generic weighted random selection
    ///
    /// Returns index into weights array using cumulative distribution
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        weights.len() - 1
    }
}

/// Smallest candidate count among open cells and every open cell reaching it
///
/// Collapsed and contradicted cells are ignored. Ties are returned in
/// row-major order.
pub fn lowest_entropy_cells(grid: &Grid) -> Option<(usize, Vec<(usize, usize)>)> {
    let lowest = grid
        .cells()
        .filter(|cell| cell.is_open())
        .map(WaveCell::entropy)
        .min()?;

    let ties = grid
        .cells()
        .filter(|cell| cell.is_open() && cell.entropy() == lowest)
        .map(WaveCell::position)
        .collect();

    Some((lowest, ties))
}

/// Pick the next cell to collapse
///
/// Chooses uniformly among the open cells with the fewest candidates.
/// Returns `None` once no open cell remains.
pub fn pick_next_cell(grid: &Grid, random: &mut RandomSelector) -> Option<(usize, usize)> {
    let (lowest, ties) = lowest_entropy_cells(grid)?;
    log::debug!("Lowest entropy: {lowest} ({} cells)", ties.len());

    let choice = random.uniform_index(ties.len())?;
    ties.get(choice).copied()
}

/// Draw one of the cell's candidates
///
/// Returns `None` for a contradicted cell.
pub fn choose_candidate(
    cell: &WaveCell,
    catalog: &Catalog,
    random: &mut RandomSelector,
    mode: SelectionMode,
) -> Option<usize> {
    let candidates = cell.candidates();
    match mode {
        SelectionMode::Uniform => {
            let choice = random.uniform_index(candidates.count())?;
            candidates.nth(choice)
        }
        SelectionMode::Weighted => {
            if candidates.is_empty() {
                return None;
            }
            let indices = candidates.to_vec();
            let weights: Vec<f64> = indices
                .iter()
                .map(|&index| catalog.get(index).map_or(0.0, |r| f64::from(r.weight)))
                .collect();
            let choice = random.weighted_choice(&weights);
            indices.get(choice).copied()
        }
    }
}
