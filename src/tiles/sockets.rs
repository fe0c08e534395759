//! Socket signatures, edge enumeration and diagnostic labels
//!
//! A socket signature is a hash of the pixels sampled along one tile edge.
//! Two tiles may touch only when the signatures on the touching edges are equal.

use crate::io::configuration::SOCKET_HASH_MULTIPLIER;
use image::RgbaImage;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Opaque comparable summary of one tile edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature(pub i32);

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tile edge in clockwise order starting at the top
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Upper edge, neighbor at `y - 1`
    Top,
    /// Right edge, neighbor at `x + 1`
    Right,
    /// Lower edge, neighbor at `y + 1`
    Bottom,
    /// Left edge, neighbor at `x - 1`
    Left,
}

impl Edge {
    /// All edges in index order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position of this edge in a socket array
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// The edge a neighbor presents back across this edge
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Element of a per-edge array belonging to this edge
    pub const fn select<T>(self, values: &[T; 4]) -> &T {
        let [top, right, bottom, left] = values;
        match self {
            Self::Top => top,
            Self::Right => right,
            Self::Bottom => bottom,
            Self::Left => left,
        }
    }

    /// Grid offset `(dx, dy)` of the neighbor across this edge
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::Top => (0, -1),
            Self::Right => (1, 0),
            Self::Bottom => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

impl FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0" | "top" => Ok(Self::Top),
            "1" | "right" => Ok(Self::Right),
            "2" | "bottom" => Ok(Self::Bottom),
            "3" | "left" => Ok(Self::Left),
            _ => Err(format!("unknown edge '{s}'")),
        }
    }
}

/// Socket signatures of a tile indexed by `Edge::index`
pub type Sockets = [Signature; 4];

/// Rotate a socket array 90° clockwise
///
/// What was on the left edge ends up on top: `rotated[i] = sockets[(i - 1) mod 4]`.
pub const fn rotate_sockets(sockets: &Sockets) -> Sockets {
    [sockets[3], sockets[0], sockets[1], sockets[2]]
}

/// Rotate a socket array clockwise `turns` times
pub const fn rotate_sockets_by(sockets: &Sockets, turns: usize) -> Sockets {
    let mut rotated = *sockets;
    let mut turn = 0;
    while turn < turns % 4 {
        rotated = rotate_sockets(&rotated);
        turn += 1;
    }
    rotated
}

/// Pack a pixel as an ARGB integer, the value folded into signatures
pub const fn pixel_value(rgba: [u8; 4]) -> i32 {
    let [r, g, b, a] = rgba;
    ((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32) as i32
}

/// Normalize configured sample offsets for a tile of the given width
///
/// Negative offsets count from the far end of the edge. The result is sorted so
/// that every edge is sampled left-to-right or top-to-bottom.
pub fn normalize_sample_points(raw: &[i64], tile_width: u32) -> Vec<u32> {
    let width = i64::from(tile_width.max(1));
    let mut points: Vec<u32> = raw
        .iter()
        .map(|&p| p.rem_euclid(width) as u32)
        .collect();
    points.sort_unstable();
    points
}

/// Derive the four socket signatures of a square tile image
///
/// Folds the pixel at every sample point along each edge with
/// `acc = acc * K + pixel` using wrapping 32-bit arithmetic. Sample points are
/// expected to be normalized with [`normalize_sample_points`]; points outside
/// the image contribute a transparent pixel.
pub fn derive_sockets(tile: &RgbaImage, sample_points: &[u32]) -> Sockets {
    let far = tile.width().min(tile.height()).saturating_sub(1);
    let sample = |x: u32, y: u32| -> i32 {
        tile.get_pixel_checked(x, y)
            .map_or(0, |pixel| pixel_value(pixel.0))
    };

    let mut acc = [0i32; 4];
    for &p in sample_points {
        let values = [sample(p, 0), sample(far, p), sample(p, far), sample(0, p)];
        for (slot, value) in acc.iter_mut().zip(values) {
            *slot = slot
                .wrapping_mul(SOCKET_HASH_MULTIPLIER)
                .wrapping_add(value);
        }
    }
    acc.map(Signature)
}

/// Human-readable names for signatures, used only for diagnostics
#[derive(Clone, Debug, Default)]
pub struct SocketLabels {
    labels: HashMap<Signature, String>,
}

impl SocketLabels {
    /// Create an empty label map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display name for a signature, replacing any previous one
    pub fn insert(&mut self, signature: Signature, label: impl Into<String>) {
        self.labels.insert(signature, label.into());
    }

    /// Label of a signature, registering the decimal value on first miss
    pub fn label(&mut self, signature: Signature) -> &str {
        self.labels
            .entry(signature)
            .or_insert_with(|| signature.to_string())
    }

    /// Number of registered labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no label is registered
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Format signatures as `[a,b,c]` using their labels
    pub fn format<I>(&mut self, signatures: I) -> String
    where
        I: IntoIterator<Item = Signature>,
    {
        let parts: Vec<String> = signatures
            .into_iter()
            .map(|signature| self.label(signature).to_string())
            .collect();
        format!("[{}]", parts.join(","))
    }
}
