//! Immutable tile catalog built from base tiles and their enabled rotations
//!
//! Every base tile contributes one variant ("reality") per rotation enabled in
//! its 4-bit mask. Rotated variants reuse the base sockets shifted cyclically,
//! so four rotations always reproduce the base signatures exactly.

use crate::io::configuration::{ALL_ROTATIONS_MASK, ROTATION_COUNT};
use crate::io::error::{Result, catalog_error};
use crate::tiles::sockets::{Edge, Signature, SocketLabels, Sockets, rotate_sockets_by};
use std::collections::HashMap;
use std::fmt;

/// Base tile as supplied by a catalog source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseTile {
    /// Name of the unrotated variant
    pub name: String,
    /// Relative weight, only consulted by weighted selection
    pub weight: u32,
    /// Bit `i` enables rotation `i` (clockwise quarter turns)
    pub rotation_mask: u8,
    /// Signatures of the unrotated tile
    pub sockets: Sockets,
    /// Column and row of the tile in its sheet
    pub source: [u32; 2],
}

/// One concrete tile variant: a base tile under a specific rotation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reality {
    /// Unique variant name
    pub name: String,
    /// Relative weight inherited from the base tile
    pub weight: u32,
    /// Signatures indexed by `Edge::index`
    pub sockets: Sockets,
    /// Column and row of the base tile in its sheet
    pub source: [u32; 2],
    /// Clockwise quarter turns applied to the base tile
    pub rotation: u8,
}

impl Reality {
    /// Signature on the given edge
    pub const fn socket(&self, edge: Edge) -> Signature {
        *edge.select(&self.sockets)
    }

    /// Diagnostic form `Reality{name, [labels]}`
    pub fn describe(&self, labels: &mut SocketLabels) -> String {
        format!("Reality{{{}, {}}}", self.name, labels.format(self.sockets))
    }
}

impl fmt::Display for Reality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sockets: Vec<String> = self.sockets.iter().map(ToString::to_string).collect();
        write!(f, "Reality{{{}, [{}]}}", self.name, sockets.join(","))
    }
}

/// Name of a rotated variant: the base name, suffixed with the turn count when rotated
pub fn rotated_name(base: &str, rotation: u8) -> String {
    if rotation == 0 {
        base.to_string()
    } else {
        format!("{base}{rotation}")
    }
}

/// Ordered set of tile variants with a name index
#[derive(Clone, Debug)]
pub struct Catalog {
    realities: Vec<Reality>,
    by_name: HashMap<String, usize>,
    labels: SocketLabels,
}

impl Catalog {
    /// Build the catalog from base tiles
    ///
    /// Rotations are generated in mask order for each base tile, and base
    /// tiles keep their input order. With `allow_duplicate_names` a later
    /// variant with an existing name replaces the earlier one in the name
    /// index while both stay in the sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No base tiles are supplied
    /// - A rotation mask is zero or uses bits above the fourth
    /// - A weight is zero
    /// - Two variants share a name and duplicates are not allowed
    pub fn build(base_tiles: &[BaseTile], allow_duplicate_names: bool) -> Result<Self> {
        if base_tiles.is_empty() {
            return Err(catalog_error(&"tile set contains no tiles"));
        }

        let mut realities = Vec::new();
        let mut by_name = HashMap::new();

        for tile in base_tiles {
            if tile.rotation_mask == 0 || tile.rotation_mask > ALL_ROTATIONS_MASK {
                return Err(catalog_error(&format!(
                    "tile '{}' has rotation mask {:#06b}, expected a non-zero 4-bit mask",
                    tile.name, tile.rotation_mask
                )));
            }
            if tile.weight == 0 {
                return Err(catalog_error(&format!(
                    "tile '{}' has zero weight",
                    tile.name
                )));
            }

            for rotation in 0..ROTATION_COUNT {
                if tile.rotation_mask & (1 << rotation) == 0 {
                    continue;
                }
                let reality = Reality {
                    name: rotated_name(&tile.name, rotation as u8),
                    weight: tile.weight,
                    sockets: rotate_sockets_by(&tile.sockets, rotation),
                    source: tile.source,
                    rotation: rotation as u8,
                };

                let index = realities.len();
                if by_name.insert(reality.name.clone(), index).is_some()
                    && !allow_duplicate_names
                {
                    return Err(catalog_error(&format!(
                        "variant name '{}' is declared more than once",
                        reality.name
                    )));
                }
                realities.push(reality);
            }
        }

        Ok(Self {
            realities,
            by_name,
            labels: SocketLabels::new(),
        })
    }

    /// Attach diagnostic labels
    #[must_use]
    pub fn with_labels(mut self, labels: SocketLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Number of variants
    pub fn len(&self) -> usize {
        self.realities.len()
    }

    /// Whether the catalog holds no variant
    pub fn is_empty(&self) -> bool {
        self.realities.is_empty()
    }

    /// Variant at a catalog index
    pub fn get(&self, index: usize) -> Option<&Reality> {
        self.realities.get(index)
    }

    /// Catalog index of a variant name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Variant by name
    pub fn by_name(&self, name: &str) -> Option<&Reality> {
        self.index_of(name).and_then(|index| self.get(index))
    }

    /// All variants in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Reality> {
        self.realities.iter()
    }

    /// All variants as a slice
    pub fn realities(&self) -> &[Reality] {
        &self.realities
    }

    /// Diagnostic labels of the tile set
    pub const fn labels(&self) -> &SocketLabels {
        &self.labels
    }

    /// Variants that may sit across `edge` of the named variant
    ///
    /// Returns an empty list when the name is unknown.
    pub fn compatible_with(&self, name: &str, edge: Edge) -> Vec<&Reality> {
        let Some(reality) = self.by_name(name) else {
            return Vec::new();
        };
        let wanted = reality.socket(edge);
        self.realities
            .iter()
            .filter(|other| other.socket(edge.opposite()) == wanted)
            .collect()
    }

    /// Multi-line listing of every variant with labelled sockets
    pub fn describe(&self) -> String {
        let mut labels = self.labels.clone();
        let mut out = format!("Generated realities {}", self.realities.len());
        for reality in &self.realities {
            out.push('\n');
            out.push_str(&reality.describe(&mut labels));
        }
        out
    }
}
