use kurbo::{BezPath, Rect, RoundedRect, Shape};

use crate::foundation::core::{Rgba8, Surface};
use crate::foundation::error::CardResult;
use crate::render::cpu;

/// Transparent band around the card, in pixels.
pub const MARGIN: u32 = 8;
/// Corner radius of the card frame, in pixels.
pub const CORNER_RADIUS: u32 = 24;

/// Outer/inner bounds of a card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
    pub inner_width: u32,
    pub inner_height: u32,
}

impl FrameGeometry {
    /// Inner dimensions saturate at zero; requests are validated before they get here.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            inner_width: width.saturating_sub(2 * MARGIN),
            inner_height: height.saturating_sub(2 * MARGIN),
        }
    }

    pub fn margin(&self) -> f64 {
        f64::from(MARGIN)
    }

    pub fn inner_width_f(&self) -> f64 {
        f64::from(self.inner_width)
    }

    pub fn inner_height_f(&self) -> f64 {
        f64::from(self.inner_height)
    }

    /// The margin-inset region all content is painted into.
    pub fn inner_rect(&self) -> Rect {
        let m = self.margin();
        Rect::new(m, m, m + self.inner_width_f(), m + self.inner_height_f())
    }

    /// Closed rounded-rectangle outline of the frame.
    pub fn frame_path(&self) -> BezPath {
        let r = self.inner_rect();
        let radius = f64::from(CORNER_RADIUS)
            .min(self.inner_width_f() / 2.0)
            .min(self.inner_height_f() / 2.0);
        RoundedRect::from_rect(r, radius).to_path(0.1)
    }

    /// Coverage of the frame path as a full-card layer (white inside, transparent outside).
    pub fn frame_mask(&self) -> CardResult<Surface> {
        let path = cpu::bezpath_to_cpu(&self.frame_path());
        cpu::rasterize(self.width, self.height, |ctx| {
            ctx.set_paint(cpu::color(Rgba8::WHITE));
            ctx.fill_path(&path);
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
