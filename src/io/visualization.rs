//! Collapse history replay and GIF generation

use crate::algorithm::executor::{CollapseEvent, WaveSolver};
use crate::io::configuration::GIF_FINAL_FRAME_HOLD;
use crate::io::error::{Result, WaveError, file_system_error, invalid_parameter};
use crate::io::image::Renderer;
use image::{Frame, RgbaImage};
use std::path::Path;

/// Captured collapse events of one solver run
///
/// Replaying the events step by step rebuilds the grid as it looked after
/// every solver step, which becomes one animation frame.
#[derive(Clone, Debug)]
pub struct VisualizationCapture {
    events: Vec<CollapseEvent>,
    width: usize,
    height: usize,
}

impl VisualizationCapture {
    /// Copy the history of a solver
    pub fn from_solver(solver: &WaveSolver) -> Self {
        let (width, height) = solver.grid().dimensions();
        Self {
            events: solver.history().to_vec(),
            width,
            height,
        }
    }

    /// Returns all recorded collapse events
    pub fn events(&self) -> &[CollapseEvent] {
        &self.events
    }

    /// Number of frames the animation holds before the final hold frame
    pub fn frame_count(&self) -> usize {
        let mut steps: Vec<usize> = self.events.iter().map(|event| event.step).collect();
        steps.dedup();
        steps.len()
    }

    /// Assignments after each step, one row-major snapshot per distinct step
    pub fn snapshots(&self) -> Vec<Vec<Option<usize>>> {
        let mut state = vec![None; self.width * self.height];
        let mut snapshots = Vec::new();
        let mut events = self.events.iter().peekable();

        while let Some(event) = events.next() {
            let (x, y) = event.position;
            if let Some(slot) = state.get_mut(y * self.width + x) {
                *slot = Some(event.reality);
            }
            if events.peek().is_none_or(|next| next.step != event.step) {
                snapshots.push(state.clone());
            }
        }

        snapshots
    }

    /// Export the replayed history as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No collapse events were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        renderer: &Renderer,
        output_path: &Path,
        frame_delay_ms: u32,
    ) -> Result<()> {
        if self.events.is_empty() {
            return Err(invalid_parameter(
                "visualization",
                &"empty",
                &"No collapse events captured for visualization",
            ));
        }

        let frames = self.generate_frames(renderer, frame_delay_ms);

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create directory", e))?;
        }

        let file = std::fs::File::create(output_path)
            .map_err(|e| file_system_error(output_path, "create file", e))?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| WaveError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, renderer: &Renderer, delay_ms: u32) -> Vec<Frame> {
        let mut frames: Vec<Frame> = self
            .snapshots()
            .iter()
            .map(|snapshot| {
                let img = renderer.render_assignments(self.width, self.height, snapshot);
                Self::frame(img, delay_ms)
            })
            .collect();

        // Final frame displays longer for better visibility
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Self::frame(last_frame_img, delay_ms * GIF_FINAL_FRAME_HOLD));
        }

        frames
    }

    fn frame(img: RgbaImage, delay_ms: u32) -> Frame {
        Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
