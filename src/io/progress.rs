//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Tile sets: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Display state of one tile set
#[derive(Clone, Debug, Default)]
struct SolveState {
    name: String,
    collapsed: usize,
    cells: usize,
    elapsed: Option<Duration>,
}

/// Coordinates progress display while solving several tile sets
///
/// Shows one bar per tile set counting collapsed cells. Large batches get an
/// extra bar counting finished tile sets, and only the most recent
/// `MAX_INDIVIDUAL_PROGRESS_BARS` tile sets keep a visible bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    solve_bars: Vec<ProgressBar>,
    states: Vec<SolveState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            solve_bars: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Create bars for `set_count` tile sets
    pub fn initialize(&mut self, set_count: usize) {
        if set_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(set_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..set_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(PROGRESS_STYLE.clone());
            self.solve_bars.push(self.multi_progress.add(bar));
        }
        self.states = vec![SolveState::default(); set_count];
    }

    /// Start tracking a tile set with `cells` grid cells
    pub fn start_set(&mut self, index: usize, path: &Path, cells: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.states.len() {
            self.states.resize(index + 1, SolveState::default());
        }
        if let Some(state) = self.states.get_mut(index) {
            *state = SolveState {
                name,
                collapsed: 0,
                cells,
                elapsed: None,
            };
        }
        self.update_bars();
    }

    /// Report the number of collapsed cells
    pub fn update_collapsed(&mut self, index: usize, collapsed: usize) {
        if let Some(state) = self.states.get_mut(index) {
            state.collapsed = collapsed.min(state.cells);
        }
        self.update_bars();
    }

    /// Mark a tile set as finished
    pub fn complete_set(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.states.get_mut(index) {
            state.elapsed = Some(elapsed);
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All tile sets solved");
        }
        let _ = self.multi_progress.clear();
    }

    fn update_bars(&self) {
        let started: Vec<&SolveState> = self
            .states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let first = started.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = started.get(first..).unwrap_or(&[]);

        for (bar, state) in self.solve_bars.iter().zip(visible) {
            bar.set_length(state.cells as u64);
            bar.set_position(state.collapsed as u64);
            let width = state.cells.to_string().len();
            bar.set_message(format!("{:>width$}/{}", state.collapsed, state.cells));
            bar.set_prefix(bar_prefix(&state.name, state.elapsed));
        }

        for bar in self.solve_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}

/// Bar prefix for a tile set, marked with its solve time once finished
pub fn bar_prefix(name: &str, elapsed: Option<Duration>) -> String {
    match elapsed {
        Some(duration) => format!("✓ {name} ({:.2}s)", duration.as_secs_f64()),
        None => name.to_string(),
    }
}
