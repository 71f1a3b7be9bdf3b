use kurbo::Point;

use crate::assets::color::parse_color;
use crate::foundation::core::{Rgba8, Surface};
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::{lerp, unit_to_u8};
use crate::request::model::{GradientKind, GradientSpec};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientShape {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f64 },
}

/// Resolved gradient: geometry in the space of the gradient box plus sorted color stops.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientFill {
    shape: GradientShape,
    stops: Vec<ColorStop>,
}

/// Evenly spaced offsets `i / (n - 1)`; a single color gets the lone offset `0`.
pub fn stop_offsets(n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f32;
            (0..n).map(|i| i as f32 / last).collect()
        }
    }
}

impl GradientFill {
    pub fn new(shape: GradientShape, stops: Vec<ColorStop>) -> CardResult<Self> {
        if stops.is_empty() {
            return Err(CardError::configuration(
                "gradient needs at least one color stop",
            ));
        }
        Ok(Self { shape, stops })
    }

    /// Resolve a request gradient over a `width` x `height` box anchored at the origin.
    pub fn from_spec(spec: &GradientSpec, width: f64, height: f64) -> CardResult<Self> {
        let shape = match spec.kind {
            GradientKind::Radial => GradientShape::Radial {
                center: Point::new(width / 2.0, height / 2.0),
                radius: width.max(height) / 2.0,
            },
            GradientKind::Linear => {
                let dir = spec.direction.as_ref().ok_or_else(|| {
                    CardError::configuration("gradient.direction is required for linear gradients")
                })?;
                GradientShape::Linear {
                    start: dir.start.coordinates(width, height).into(),
                    end: dir.end.coordinates(width, height).into(),
                }
            }
        };

        let colors = spec
            .colors
            .iter()
            .map(|c| parse_color(c))
            .collect::<CardResult<Vec<_>>>()?;
        let stops = stop_offsets(colors.len())
            .into_iter()
            .zip(colors)
            .map(|(offset, color)| ColorStop { offset, color })
            .collect();
        Self::new(shape, stops)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Gradient parameter at `p`, clamped to `[0, 1]` (pad extend).
    ///
    /// `None` means the gradient paints nothing: a linear gradient whose endpoints coincide, or
    /// a radial gradient with zero radius.
    pub fn param_at(&self, p: Point) -> Option<f32> {
        let t = match self.shape {
            GradientShape::Linear { start, end } => {
                let d = end - start;
                let len2 = d.hypot2();
                if len2 <= f64::EPSILON {
                    return None;
                }
                (p - start).dot(d) / len2
            }
            GradientShape::Radial { center, radius } => {
                if radius <= f64::EPSILON {
                    return None;
                }
                (p - center).hypot() / radius
            }
        };
        Some(t.clamp(0.0, 1.0) as f32)
    }

    /// Premultiplied color at parameter `t`, interpolated in premultiplied space.
    pub fn color_at(&self, t: f32) -> [u8; 4] {
        let first = self.stops[0];
        if self.stops.len() == 1 || t <= first.offset {
            return first.color.to_premul();
        }
        let last = self.stops[self.stops.len() - 1];
        if t >= last.offset {
            return last.color.to_premul();
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t > b.offset {
                continue;
            }
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.color.to_premul();
            }
            let u = (t - a.offset) / span;
            let pa = premul_f32(a.color);
            let pb = premul_f32(b.color);
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = unit_to_u8(lerp(pa[i], pb[i], u));
            }
            return out;
        }
        last.color.to_premul()
    }

    /// Premultiplied color of the pixel whose top-left corner is `(x, y)`.
    pub fn sample(&self, x: u32, y: u32) -> [u8; 4] {
        let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        match self.param_at(p) {
            Some(t) => self.color_at(t),
            None => [0, 0, 0, 0],
        }
    }

    /// Fill a `width` x `height` layer with this gradient.
    pub fn rasterize(&self, width: u32, height: u32) -> CardResult<Surface> {
        self.rasterize_region(0, 0, width, height)
    }

    /// Fill a `width` x `height` layer whose top-left pixel sits at `(x0, y0)` in gradient space.
    pub fn rasterize_region(
        &self,
        x0: u32,
        y0: u32,
        width: u32,
        height: u32,
    ) -> CardResult<Surface> {
        let mut out = Surface::transparent(width, height)?;
        if width == 0 || height == 0 {
            return Ok(out);
        }
        if self.stops.len() == 1 && self.param_at(Point::ZERO).is_some() {
            out.fill(self.stops[0].color.to_premul());
            return Ok(out);
        }
        let w = width as usize;
        for (row, line) in out.data_mut().chunks_exact_mut(w * 4).enumerate() {
            for (col, px) in line.chunks_exact_mut(4).enumerate() {
                px.copy_from_slice(&self.sample(x0 + col as u32, y0 + row as u32));
            }
        }
        Ok(out)
    }
}

fn premul_f32(c: Rgba8) -> [f32; 4] {
    let a = f32::from(c.a) / 255.0;
    [
        f32::from(c.r) / 255.0 * a,
        f32::from(c.g) / 255.0 * a,
        f32::from(c.b) / 255.0 * a,
        a,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
