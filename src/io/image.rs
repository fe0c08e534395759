//! Grid rendering and PNG export
//!
//! Collapsed cells show their texture rotated clockwise by the variant's
//! rotation. Open cells show every remaining candidate as a thumbnail placed
//! at the candidate's position in the sheet. Contradicted cells stay
//! transparent.

use crate::io::atlas::Atlas;
use crate::io::error::{Result, WaveError, file_system_error};
use crate::spatial::Grid;
use crate::tiles::catalog::Catalog;
use image::{RgbaImage, imageops};
use std::path::Path;

/// Pre-rendered tile images for one catalog and atlas
#[derive(Clone, Debug)]
pub struct Renderer {
    tile_width: u32,
    /// Full-size rotated image per catalog index
    tiles: Vec<RgbaImage>,
    /// Thumbnail and its offset inside the cell per catalog index
    thumbnails: Vec<(RgbaImage, i64, i64)>,
}

impl Renderer {
    /// Prepare images for every variant of the catalog
    ///
    /// Variants whose source is missing from the atlas render as transparent
    /// squares.
    pub fn new(catalog: &Catalog, atlas: &Atlas) -> Self {
        let tile_width = atlas.texture_width();
        let thumb_width = (tile_width / atlas.columns().max(1)).max(1);
        let thumb_height = (tile_width / atlas.rows().max(1)).max(1);

        let mut tiles = Vec::with_capacity(catalog.len());
        let mut thumbnails = Vec::with_capacity(catalog.len());

        for reality in catalog.iter() {
            let Some(texture) = atlas.texture_at(reality.source) else {
                log::warn!("No texture at {:?} for {}", reality.source, reality.name);
                tiles.push(RgbaImage::new(tile_width, tile_width));
                thumbnails.push((RgbaImage::new(thumb_width, thumb_height), 0, 0));
                continue;
            };

            let mut rotated = texture.image.clone();
            for _ in 0..reality.rotation {
                rotated = imageops::rotate90(&rotated);
            }
            tiles.push(rotated);

            let thumbnail = imageops::resize(
                &texture.image,
                thumb_width,
                thumb_height,
                imageops::FilterType::Nearest,
            );
            let [column, row] = reality.source;
            thumbnails.push((
                thumbnail,
                i64::from(column * thumb_width),
                i64::from(row * thumb_height),
            ));
        }

        Self {
            tile_width,
            tiles,
            thumbnails,
        }
    }

    /// Side length of one cell in pixels
    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Draw the whole grid
    pub fn render(&self, grid: &Grid) -> RgbaImage {
        let mut canvas = self.blank_canvas(grid.width(), grid.height());

        for cell in grid.cells() {
            let (x, y) = cell.position();
            let (left, top) = self.cell_origin(x, y);

            if let Some(reality) = cell.collapsed_reality() {
                self.draw_tile(&mut canvas, reality, left, top);
            } else {
                for candidate in cell.candidates().iter() {
                    if let Some((thumbnail, dx, dy)) = self.thumbnails.get(candidate) {
                        imageops::overlay(&mut canvas, thumbnail, left + dx, top + dy);
                    }
                }
            }
        }

        canvas
    }

    /// Draw a row-major assignment of variants, leaving `None` cells empty
    pub fn render_assignments(
        &self,
        width: usize,
        height: usize,
        assignments: &[Option<usize>],
    ) -> RgbaImage {
        let mut canvas = self.blank_canvas(width, height);

        for (index, assignment) in assignments.iter().enumerate().take(width * height) {
            if let Some(reality) = *assignment {
                let (left, top) = self.cell_origin(index % width, index / width);
                self.draw_tile(&mut canvas, reality, left, top);
            }
        }

        canvas
    }

    fn blank_canvas(&self, width: usize, height: usize) -> RgbaImage {
        RgbaImage::new(
            width as u32 * self.tile_width,
            height as u32 * self.tile_width,
        )
    }

    fn cell_origin(&self, x: usize, y: usize) -> (i64, i64) {
        let side = i64::from(self.tile_width);
        (x as i64 * side, y as i64 * side)
    }

    fn draw_tile(&self, canvas: &mut RgbaImage, reality: usize, left: i64, top: i64) {
        if let Some(tile) = self.tiles.get(reality) {
            imageops::overlay(canvas, tile, left, top);
        }
    }
}

/// Render the grid and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(renderer: &Renderer, grid: &Grid, output_path: &Path) -> Result<()> {
    let img = renderer.render(grid);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    img.save(output_path).map_err(|e| WaveError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
