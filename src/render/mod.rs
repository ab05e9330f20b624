//! Drawing surfaces for the backdrop.
//!
//! The engine talks to a [`Painter`], a small immediate-mode subset of a 2D canvas: clear,
//! set a blur filter, stroke outlines, present. [`cpu::CpuPainter`] is the raster
//! implementation used by the headless stage and the CLI.

pub mod blur;
pub mod cpu;

use crate::foundation::core::{BezPath, FrameRGBA, Rgba8, Viewport};
use crate::foundation::error::FolioResult;

/// Gaussian blur applied to everything drawn in a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlurFilter {
    pub radius_px: u32,
    pub sigma: f32,
}

impl BlurFilter {
    pub const NONE: Self = Self {
        radius_px: 0,
        sigma: 1.0,
    };
}

impl Default for BlurFilter {
    fn default() -> Self {
        Self {
            radius_px: 1,
            sigma: 1.0,
        }
    }
}

/// A drawable surface acquired from the host.
pub trait Painter {
    /// Reallocate for a new viewport. Previous contents are discarded.
    fn resize(&mut self, viewport: Viewport) -> FolioResult<()>;

    /// Clear the full surface to transparent.
    fn clear(&mut self);

    /// Filter applied to subsequent strokes until the next [`Painter::clear`].
    fn set_blur(&mut self, filter: BlurFilter);

    /// Stroke `path` with `color`; the colour's alpha carries the shape opacity.
    fn stroke_path(&mut self, path: &BezPath, color: Rgba8, width: f64) -> FolioResult<()>;

    /// Finish the frame so it becomes visible (and readable through [`Painter::snapshot`]).
    fn present(&mut self) -> FolioResult<()>;

    /// Last presented frame, if the painter keeps pixels around.
    fn snapshot(&self) -> Option<FrameRGBA> {
        None
    }
}
