//! Tile sheet slicing and catalog assembly
//!
//! A tile set is a PNG sheet of square textures plus a `.configuration` file
//! with the same stem. Textures are cut row by row and paired in order with
//! the `#tiles` entries of the configuration.

use crate::io::configuration::TILE_SHEET_EXTENSION;
use crate::io::error::{Result, WaveError, invalid_parameter};
use crate::io::manifest::Manifest;
use crate::tiles::catalog::{BaseTile, Catalog};
use crate::tiles::sockets::{SocketLabels, derive_sockets};
use image::{RgbaImage, imageops};
use std::path::{Path, PathBuf};

/// One square texture cut from the sheet
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture pixels
    pub image: RgbaImage,
    /// Column and row in the sheet
    pub source: [u32; 2],
}

/// Textures cut from a tile sheet
#[derive(Clone, Debug)]
pub struct Atlas {
    textures: Vec<Texture>,
    texture_width: u32,
    columns: u32,
    rows: u32,
}

impl Atlas {
    /// Cut the first `texture_count` squares of side `texture_width` from a sheet
    ///
    /// The sheet holds `width / texture_width` columns and
    /// `height / texture_width` rows; partial squares at the borders are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `texture_width` is zero
    /// - The sheet holds fewer than `texture_count` textures
    pub fn slice(sheet: &RgbaImage, texture_width: u32, texture_count: usize) -> Result<Self> {
        if texture_width == 0 {
            return Err(invalid_parameter(
                "texture_width",
                &texture_width,
                &"must be positive",
            ));
        }

        let columns = sheet.width() / texture_width;
        let rows = sheet.height() / texture_width;
        let available = columns as usize * rows as usize;
        if available < texture_count {
            return Err(invalid_parameter(
                "texture_count",
                &texture_count,
                &format!(
                    "sheet of {}x{} pixels holds only {available} textures of width {texture_width}",
                    sheet.width(),
                    sheet.height()
                ),
            ));
        }

        let textures = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| [column, row]))
            .take(texture_count)
            .map(|[column, row]| Texture {
                image: imageops::crop_imm(
                    sheet,
                    column * texture_width,
                    row * texture_width,
                    texture_width,
                    texture_width,
                )
                .to_image(),
                source: [column, row],
            })
            .collect();

        Ok(Self {
            textures,
            texture_width,
            columns,
            rows,
        })
    }

    /// Side length of every texture in pixels
    pub const fn texture_width(&self) -> u32 {
        self.texture_width
    }

    /// Number of texture columns in the sheet
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of texture rows in the sheet
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Textures in sheet order
    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    /// Texture cut from sheet cell `(column, row)`
    pub fn texture_at(&self, source: [u32; 2]) -> Option<&Texture> {
        let [column, row] = source;
        if column >= self.columns {
            return None;
        }
        let index = row as usize * self.columns as usize + column as usize;
        self.textures
            .get(index)
            .filter(|texture| texture.source == source)
    }
}

/// Configuration, textures and the catalog built from them
#[derive(Clone, Debug)]
pub struct TileSet {
    /// Parsed configuration
    pub manifest: Manifest,
    /// Textures cut from the sheet
    pub atlas: Atlas,
    /// Variants with derived sockets
    pub catalog: Catalog,
}

impl TileSet {
    /// Load a tile set from its configuration file
    ///
    /// The sheet is the file with the same stem and a `.png` extension.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either file cannot be read
    /// - The configuration is malformed
    /// - The sheet does not hold enough textures
    /// - The catalog cannot be built
    pub fn load(configuration_path: &Path, allow_duplicate_names: bool) -> Result<Self> {
        let manifest = Manifest::from_file(configuration_path)?;
        let sheet_path = Self::sheet_path(configuration_path);
        let sheet = image::open(&sheet_path)
            .map_err(|e| WaveError::ImageLoad {
                path: sheet_path.clone(),
                source: e,
            })?
            .to_rgba8();

        Self::from_parts(manifest, &sheet, allow_duplicate_names)
    }

    /// Build a tile set from an already parsed configuration and sheet
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet holds too few textures or the catalog
    /// cannot be built.
    pub fn from_parts(
        manifest: Manifest,
        sheet: &RgbaImage,
        allow_duplicate_names: bool,
    ) -> Result<Self> {
        let atlas = Atlas::slice(sheet, manifest.texture_width, manifest.texture_count)?;
        log::debug!(
            "Detected {} columns and {} rows of {}px textures",
            atlas.columns(),
            atlas.rows(),
            atlas.texture_width()
        );

        let base_tiles: Vec<BaseTile> = atlas
            .textures()
            .iter()
            .zip(&manifest.tiles)
            .map(|(texture, entry)| BaseTile {
                name: entry.name.clone(),
                weight: entry.weight,
                rotation_mask: entry.rotation_mask,
                sockets: derive_sockets(&texture.image, &manifest.sample_points),
                source: texture.source,
            })
            .collect();

        let mut labels = SocketLabels::new();
        for (signature, label) in &manifest.labels {
            labels.insert(*signature, label.clone());
        }

        let catalog = Catalog::build(&base_tiles, allow_duplicate_names)?.with_labels(labels);
        log::debug!("{}", catalog.describe());

        Ok(Self {
            manifest,
            atlas,
            catalog,
        })
    }

    /// Sheet path paired with a configuration path
    pub fn sheet_path(configuration_path: &Path) -> PathBuf {
        configuration_path.with_extension(TILE_SHEET_EXTENSION)
    }
}
