//! Command-line interface for solving tile sets in batch

use crate::algorithm::executor::{SolveOutcome, WaveSolver};
use crate::algorithm::selection::SelectionMode;
use crate::io::atlas::TileSet;
use crate::io::commands::{Command, execute_all, summarize};
use crate::io::configuration::{
    CONFIGURATION_EXTENSION, DEFAULT_GRID_SIZE, DEFAULT_SEED, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, io_error};
use crate::io::image::{Renderer, export_grid_as_png};
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Fill a grid with matching tiles using wave function collapse"
)]
/// Command-line arguments for the tile solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tile set `.configuration` file or directory of them
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_GRID_SIZE)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_SIZE)]
    pub height: usize,

    /// Draw candidates in proportion to their weight instead of uniformly
    #[arg(long)]
    pub weighted: bool,

    /// Command script applied before the final run
    #[arg(short = 'c', long, value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process tile sets even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Print the catalog and command results
    #[arg(short, long)]
    pub debug: bool,

    /// Let later variants replace earlier ones with the same name
    #[arg(long)]
    pub allow_duplicate_names: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Candidate selection mode requested on the command line
    pub const fn selection_mode(&self) -> SelectionMode {
        if self.weighted {
            SelectionMode::Weighted
        } else {
            SelectionMode::Uniform
        }
    }
}

/// Orchestrates batch solving of tile sets with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process tile sets according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, loading, solving or export fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        let commands = match &self.cli.script {
            Some(path) => Command::from_file(path)?,
            None => Vec::new(),
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, &commands)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if Self::is_configuration(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(io_error("Target file must be a .configuration file"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if Self::is_configuration(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be a .configuration file or directory"))
        }
    }

    fn is_configuration(path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(CONFIGURATION_EXTENSION)
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for the catalog dump, command results and the final outcome
    #[allow(clippy::print_stderr)]
    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        commands: &[Command],
    ) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        let tile_set = TileSet::load(input_path, self.cli.allow_duplicate_names)?;
        if self.cli.debug {
            eprintln!("{}", tile_set.catalog.describe());
        }

        let renderer = Renderer::new(&tile_set.catalog, &tile_set.atlas);
        let mut solver = WaveSolver::new(
            tile_set.catalog,
            self.cli.width,
            self.cli.height,
            self.cli.seed,
        )?
        .with_selection_mode(self.cli.selection_mode());

        let cells = self.cli.width * self.cli.height;
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_set(index, input_path, cells);
        }

        let results = execute_all(&mut solver, commands)?;
        if self.cli.debug {
            for result in &results {
                eprintln!("{result}");
            }
        }
        if !results.is_empty() {
            let script = summarize(&results);
            log::debug!(
                "{}: script removed {} candidates, collapsed {} cells, {} contradictions",
                input_path.display(),
                script.removals,
                script.newly_collapsed.len(),
                script.contradictions.len()
            );
        }

        let outcome = match self.progress_manager.as_mut() {
            Some(pm) => solver.run_with(|current, _| {
                pm.update_collapsed(index, current.grid().collapsed_count());
            }),
            None => solver.run(),
        };

        if let SolveOutcome::Stuck { contradictions, .. } = &outcome {
            if !self.cli.quiet {
                eprintln!(
                    "{}: {outcome}, first at {:?}",
                    input_path.display(),
                    contradictions.first()
                );
            }
        } else if self.cli.debug {
            eprintln!("{}: {outcome}", input_path.display());
        }

        export_grid_as_png(&renderer, solver.grid(), &output_path)?;

        if self.cli.visualize {
            let viz_path = Self::get_visualization_path(input_path);
            let capture = VisualizationCapture::from_solver(&solver);
            log::debug!("{}: {} frames", viz_path.display(), capture.frame_count());
            capture.export_gif(&renderer, &viz_path, GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_set(index, start_time.elapsed());
        }

        Ok(())
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.png", stem.to_string_lossy(), OUTPUT_SUFFIX);

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    fn get_visualization_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}_visualization.gif", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}
