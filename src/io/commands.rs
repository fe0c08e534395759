//! Line-oriented command scripts driving a solver
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! collapse <x> <y>
//! force <x> <y> <name, may contain spaces>
//! variant <x> <y> <column> <row>
//! step
//! run
//! settle
//! describe <x> <y>
//! compatible <name, may contain spaces> <edge>
//! ```

use crate::algorithm::executor::{CollapseOutcome, SolveOutcome, WaveSolver};
use crate::algorithm::propagation::PropagationReport;
use crate::io::error::{Result, WaveError, file_system_error, invalid_parameter};
use crate::tiles::sockets::Edge;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One solver request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Collapse a cell to a candidate drawn by the solver
    Collapse {
        /// Column
        x: i64,
        /// Row
        y: i64,
    },
    /// Collapse a cell to the named variant
    Force {
        /// Column
        x: i64,
        /// Row
        y: i64,
        /// Variant name
        name: String,
    },
    /// Collapse a cell to a candidate cut from the given sheet cell
    Variant {
        /// Column
        x: i64,
        /// Row
        y: i64,
        /// Sheet column
        column: u32,
        /// Sheet row
        row: u32,
    },
    /// Collapse the lowest-entropy cell
    Step,
    /// Step until no open cell remains
    Run,
    /// Propagate from every cell
    Settle,
    /// Print a cell and its allowed sockets
    Describe {
        /// Column
        x: i64,
        /// Row
        y: i64,
    },
    /// Print the variants that may sit across an edge of a named variant
    Compatible {
        /// Variant name
        name: String,
        /// Edge of the named variant
        edge: Edge,
    },
}

/// What a command did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Result of a collapse request
    Collapse(CollapseOutcome),
    /// Result of a step, `None` when no open cell remained
    Step(Option<CollapseOutcome>),
    /// Result of a run
    Run(SolveOutcome),
    /// Result of a settle pass
    Settle(PropagationReport),
    /// Diagnostic text
    Text(String),
}

impl CommandResult {
    /// Propagation summary carried by this result, if any
    pub const fn propagation(&self) -> Option<&PropagationReport> {
        match self {
            Self::Collapse(CollapseOutcome::Collapsed { report, .. })
            | Self::Step(Some(CollapseOutcome::Collapsed { report, .. }))
            | Self::Settle(report) => Some(report),
            _ => None,
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collapse(outcome) | Self::Step(Some(outcome)) => match outcome {
                CollapseOutcome::Collapsed {
                    position,
                    reality,
                    report,
                } => write!(
                    f,
                    "collapsed ({}, {}) to {reality}, {} removals, {} contradictions",
                    position.0,
                    position.1,
                    report.removals,
                    report.contradictions.len()
                ),
                CollapseOutcome::Unchanged { position, .. } => {
                    write!(f, "({}, {}) unchanged", position.0, position.1)
                }
                CollapseOutcome::LookupMiss { name, .. } => write!(f, "no variant named {name}"),
                CollapseOutcome::NoMatch { position, source } => write!(
                    f,
                    "no candidate of ({}, {}) comes from sheet cell {source:?}",
                    position.0, position.1
                ),
            },
            Self::Step(None) => write!(f, "no open cell left"),
            Self::Run(outcome) => write!(f, "{outcome}"),
            Self::Settle(report) => write!(
                f,
                "settled with {} removals, {} collapsed, {} contradictions",
                report.removals,
                report.newly_collapsed.len(),
                report.contradictions.len()
            ),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

impl Command {
    /// Parse one script line, `None` for blank and comment lines
    ///
    /// # Errors
    ///
    /// Returns an error if the keyword is unknown or an argument is missing or
    /// malformed.
    pub fn parse_line(line_number: usize, line: &str) -> Result<Option<Self>> {
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            return Ok(None);
        }

        let mut args = Arguments {
            line_number,
            rest: content,
        };
        let keyword = args.text("command")?.to_ascii_lowercase();

        let command = match keyword.as_str() {
            "collapse" => Self::Collapse {
                x: args.parsed("x")?,
                y: args.parsed("y")?,
            },
            "force" => Self::Force {
                x: args.parsed("x")?,
                y: args.parsed("y")?,
                name: args.remainder("name")?.to_string(),
            },
            "variant" => Self::Variant {
                x: args.parsed("x")?,
                y: args.parsed("y")?,
                column: args.parsed("column")?,
                row: args.parsed("row")?,
            },
            "step" => Self::Step,
            "run" => Self::Run,
            "settle" => Self::Settle,
            "describe" => Self::Describe {
                x: args.parsed("x")?,
                y: args.parsed("y")?,
            },
            "compatible" => {
                let edge = args.last("edge")?;
                Self::Compatible {
                    edge: args.parse("edge", edge)?,
                    name: args.remainder("name")?.to_string(),
                }
            }
            other => {
                return Err(invalid_parameter(
                    "command",
                    &other,
                    &format!("line {line_number}: unknown command"),
                ));
            }
        };

        Ok(Some(command))
    }

    /// Parse a whole script
    ///
    /// # Errors
    ///
    /// Returns the first line that fails to parse.
    pub fn parse_script(script: &str) -> Result<Vec<Self>> {
        let mut commands = Vec::new();
        for (index, line) in script.lines().enumerate() {
            if let Some(command) = Self::parse_line(index + 1, line)? {
                commands.push(command);
            }
        }
        Ok(commands)
    }

    /// Read and parse a script file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line fails to parse.
    pub fn from_file(path: &Path) -> Result<Vec<Self>> {
        let script = std::fs::read_to_string(path)
            .map_err(|e| file_system_error(path, "read script", e))?;
        Self::parse_script(&script)
    }

    /// Apply the command to a solver
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the command addresses a cell outside the grid.
    pub fn execute(&self, solver: &mut WaveSolver) -> Result<CommandResult> {
        Ok(match self {
            Self::Collapse { x, y } => CommandResult::Collapse(solver.collapse_at(*x, *y)?),
            Self::Force { x, y, name } => {
                CommandResult::Collapse(solver.collapse_into_name(*x, *y, name)?)
            }
            Self::Variant { x, y, column, row } => {
                CommandResult::Collapse(solver.collapse_to_variant(*x, *y, *column, *row)?)
            }
            Self::Step => CommandResult::Step(solver.step()),
            Self::Run => CommandResult::Run(solver.run()),
            Self::Settle => CommandResult::Settle(solver.settle()),
            Self::Describe { x, y } => CommandResult::Text(solver.describe_cell(*x, *y)?),
            Self::Compatible { name, edge } => {
                let catalog = solver.catalog();
                let mut labels = catalog.labels().clone();
                let mut text = format!("Compatible with {name} on edge {edge:?}:");
                for reality in catalog.compatible_with(name, *edge) {
                    text.push('\n');
                    text.push_str(&reality.describe(&mut labels));
                }
                CommandResult::Text(text)
            }
        })
    }
}

/// Run every command in order, stopping at the first error
///
/// # Errors
///
/// Returns the first command error.
pub fn execute_all(solver: &mut WaveSolver, commands: &[Command]) -> Result<Vec<CommandResult>> {
    commands
        .iter()
        .map(|command| command.execute(solver))
        .collect()
}

struct Arguments<'a> {
    line_number: usize,
    rest: &'a str,
}

impl<'a> Arguments<'a> {
    fn missing(&self, what: &'static str) -> WaveError {
        invalid_parameter(
            what,
            &"",
            &format!("line {}: missing argument", self.line_number),
        )
    }

    fn text(&mut self, what: &'static str) -> Result<&'a str> {
        let trimmed = self.rest.trim_start();
        if trimmed.is_empty() {
            return Err(self.missing(what));
        }
        let (token, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        self.rest = rest;
        Ok(token)
    }

    /// Everything left on the line, inner spaces kept
    fn remainder(&mut self, what: &'static str) -> Result<&'a str> {
        let trimmed = self.rest.trim();
        if trimmed.is_empty() {
            return Err(self.missing(what));
        }
        self.rest = "";
        Ok(trimmed)
    }

    /// Split the last token off, leaving the rest for `remainder`
    fn last(&mut self, what: &'static str) -> Result<&'a str> {
        let trimmed = self.rest.trim_end();
        let (rest, token) = trimmed
            .rsplit_once(char::is_whitespace)
            .unwrap_or(("", trimmed));
        if token.is_empty() {
            return Err(self.missing(what));
        }
        self.rest = rest;
        Ok(token)
    }

    fn parse<T>(&self, what: &'static str, field: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        field.parse().map_err(|e| {
            invalid_parameter(what, &field, &format!("line {}: {e}", self.line_number))
        })
    }

    fn parsed<T>(&mut self, what: &'static str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let field = self.text(what)?;
        self.parse(what, field)
    }
}

/// Fold the propagation of every result into one report
pub fn summarize(results: &[CommandResult]) -> PropagationReport {
    let mut total = PropagationReport::default();
    for report in results.iter().filter_map(CommandResult::propagation) {
        total.absorb(report.clone());
    }
    total
}
