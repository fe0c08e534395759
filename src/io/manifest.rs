//! Parser for `.configuration` tile set descriptions
//!
//! ```text
//! #texturemap
//! <texture_width> <texture_count>
//! <sample point> <sample point> ...
//! #tiles
//! <rotation_mask> <weight> <name>
//! #labels
//! <signature> <label>
//! #end
//! ```
//!
//! One `#tiles` line is expected per texture. The `#labels` section is
//! optional. Blank lines are ignored everywhere.

use crate::io::error::{Result, configuration_error, file_system_error};
use crate::tiles::sockets::{Signature, normalize_sample_points};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One line of the `#tiles` section
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileEntry {
    /// Bit `i` enables rotation `i`
    pub rotation_mask: u8,
    /// Relative frequency used by weighted selection
    pub weight: u32,
    /// Name of the unrotated variant
    pub name: String,
}

/// Parsed tile set configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    /// Side length of one square texture in pixels
    pub texture_width: u32,
    /// Number of textures taken from the sheet
    pub texture_count: usize,
    /// Normalized and sorted offsets sampled along every edge
    pub sample_points: Vec<u32>,
    /// One entry per texture, in sheet order
    pub tiles: Vec<TileEntry>,
    /// Display names for signatures
    pub labels: Vec<(Signature, String)>,
}

/// Non-blank trimmed lines with their one-based numbers
struct Lines<'a> {
    remaining: std::vec::IntoIter<(usize, &'a str)>,
    last_line: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        let numbered: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();
        Self {
            remaining: numbered.into_iter(),
            last_line: text.lines().count(),
        }
    }

    fn next_line(&mut self, expected: &str) -> Result<(usize, &'a str)> {
        self.remaining.next().ok_or_else(|| {
            configuration_error(
                self.last_line,
                &format!("unexpected end of file, expected {expected}"),
            )
        })
    }

    fn expect_header(&mut self, header: &str) -> Result<()> {
        let (line, text) = self.next_line(header)?;
        if text == header {
            Ok(())
        } else {
            Err(configuration_error(
                line,
                &format!("expected '{header}', found '{text}'"),
            ))
        }
    }
}

impl Manifest {
    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The content is malformed
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| file_system_error(path, "read configuration", e))?;
        Self::parse(&text)
    }

    /// Parse configuration text
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error naming the offending line if:
    /// - A section header is missing or out of order
    /// - A numeric field does not parse
    /// - The texture width is zero or no sample point is given
    /// - The texture count exceeds the lines left in the file
    /// - Fewer tile lines than textures are present
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = Lines::new(text);

        lines.expect_header("#texturemap")?;

        let (line, header) = lines.next_line("texture width and count")?;
        let mut fields = header.split_whitespace();
        let texture_width: u32 = parse_field(fields.next(), line, "texture width")?;
        let texture_count: usize = parse_field(fields.next(), line, "texture count")?;
        let count_line = line;
        if texture_width == 0 {
            return Err(configuration_error(line, &"texture width must be positive"));
        }

        let (line, points) = lines.next_line("sample points")?;
        let raw_points = points
            .split_whitespace()
            .map(|point| parse_field::<i64>(Some(point), line, "sample point"))
            .collect::<Result<Vec<_>>>()?;
        if raw_points.is_empty() {
            return Err(configuration_error(line, &"at least one sample point is required"));
        }
        let sample_points = normalize_sample_points(&raw_points, texture_width);

        lines.expect_header("#tiles")?;

        if texture_count > lines.remaining.len() {
            return Err(configuration_error(
                count_line,
                &format!(
                    "texture count {texture_count} exceeds the {} remaining lines",
                    lines.remaining.len()
                ),
            ));
        }

        let mut tiles = Vec::with_capacity(texture_count);
        for _ in 0..texture_count {
            let (line, entry) = lines.next_line("tile entry")?;
            tiles.push(parse_tile_entry(line, entry)?);
        }

        let labels = parse_trailer(&mut lines)?;

        Ok(Self {
            texture_width,
            texture_count,
            sample_points,
            tiles,
            labels,
        })
    }
}

fn parse_field<T>(field: Option<&str>, line: usize, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let field = field.ok_or_else(|| configuration_error(line, &format!("missing {what}")))?;
    field
        .parse()
        .map_err(|e| configuration_error(line, &format!("invalid {what} '{field}': {e}")))
}

/// Split off the first whitespace-separated token
fn split_token(text: &str) -> (Option<&str>, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((token, rest)) => (Some(token), rest),
        None => ((!text.is_empty()).then_some(text), ""),
    }
}

fn parse_tile_entry(line: usize, text: &str) -> Result<TileEntry> {
    let (mask, rest) = split_token(text);
    let (weight, rest) = split_token(rest);
    let rotation_mask = parse_field(mask, line, "rotation mask")?;
    let weight = parse_field(weight, line, "weight")?;
    let name = rest.trim();
    if name.is_empty() {
        return Err(configuration_error(line, &"missing tile name"));
    }

    Ok(TileEntry {
        rotation_mask,
        weight,
        name: name.to_string(),
    })
}

fn parse_trailer(lines: &mut Lines<'_>) -> Result<Vec<(Signature, String)>> {
    let mut labels = Vec::new();
    let Some((line, text)) = lines.remaining.next() else {
        return Ok(labels);
    };

    if text != "#labels" {
        log::warn!("Ignoring unknown section at line {line}: {text}");
        return Ok(labels);
    }

    for (line, text) in lines.remaining.by_ref() {
        if text == "#end" {
            break;
        }
        let (signature, rest) = split_token(text);
        let signature = parse_field::<i32>(signature, line, "signature")?;
        let label = rest.trim();
        if label.is_empty() {
            return Err(configuration_error(line, &"missing label"));
        }
        labels.push((Signature(signature), label.to_string()));
    }

    Ok(labels)
}
