use kurbo::{Point, Rect};

use crate::assets::color::{progress_bar_color, progress_channels};
use crate::foundation::core::{Rgba8, Surface};
use crate::foundation::error::CardResult;
use crate::foundation::math::mul_div255_u8;
use crate::render::composite::{BlendMode, draw_at};
use crate::render::cpu;
use crate::render::frame::FrameGeometry;
use crate::render::gradient::{ColorStop, GradientFill, GradientShape};
use crate::request::model::ProgressSpec;

pub const BAR_HEIGHT: u32 = 2;
pub const GLOW_HEIGHT: u32 = 10;

/// A progress bar that passed the visibility gate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBar {
    ratio: f64,
    bar_color: Rgba8,
    glow_rgb: [u8; 3],
}

impl ProgressBar {
    /// `None` unless the bar is enabled with a positive, finite duration and elapsed time.
    pub fn resolve(spec: Option<&ProgressSpec>) -> Option<Self> {
        let spec = spec?;
        if !spec.show_bar {
            return None;
        }
        let duration = spec.duration.filter(|d| d.is_finite() && *d > 0.0)?;
        let elapsed = spec.elapsed.filter(|e| e.is_finite() && *e > 0.0)?;
        let color = spec.color.as_deref();
        Some(Self {
            ratio: (elapsed / duration).min(1.0),
            bar_color: progress_bar_color(color),
            glow_rgb: progress_channels(color),
        })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn bar_color(&self) -> Rgba8 {
        self.bar_color
    }

    pub fn glow_rgb(&self) -> [u8; 3] {
        self.glow_rgb
    }

    pub fn bar_rect(&self, geom: &FrameGeometry) -> Rect {
        let m = geom.margin();
        let y = m + geom.inner_height_f() - f64::from(BAR_HEIGHT);
        Rect::new(
            m,
            y,
            m + self.ratio * geom.inner_width_f(),
            y + f64::from(BAR_HEIGHT),
        )
    }

    pub fn glow_rect(&self, geom: &FrameGeometry) -> Rect {
        let bar = self.bar_rect(geom);
        Rect::new(bar.x0, bar.y0 - f64::from(GLOW_HEIGHT), bar.x1, bar.y0)
    }

    /// Vertical fade from transparent at the top of the glow band to 30% at the bar.
    pub fn glow_fill(&self) -> CardResult<GradientFill> {
        let [r, g, b] = self.glow_rgb;
        let base = Rgba8::new(r, g, b, 0);
        GradientFill::new(
            GradientShape::Linear {
                start: Point::ZERO,
                end: Point::new(0.0, f64::from(GLOW_HEIGHT)),
            },
            vec![
                ColorStop {
                    offset: 0.0,
                    color: base,
                },
                ColorStop {
                    offset: 0.7,
                    color: base.with_alpha(0.15),
                },
                ColorStop {
                    offset: 1.0,
                    color: base.with_alpha(0.30),
                },
            ],
        )
    }

    /// Draw the bar and its glow onto the card.
    pub fn draw(&self, canvas: &mut Surface, geom: &FrameGeometry) -> CardResult<()> {
        let bar = self.bar_rect(geom);
        let width = bar.width();
        if width <= 0.0 {
            return Ok(());
        }
        let cols = width.ceil() as u32;
        let (x, y) = (bar.x0.round() as i64, bar.y0.round() as i64);

        let color = self.bar_color;
        let bar_layer = cpu::rasterize(cols, BAR_HEIGHT, |ctx| {
            ctx.set_paint(cpu::color(color));
            ctx.fill_rect(&cpu::rect_to_cpu(Rect::new(
                0.0,
                0.0,
                width,
                f64::from(BAR_HEIGHT),
            )));
            Ok(())
        })?;
        draw_at(canvas, &bar_layer, x, y, BlendMode::Normal);

        let mut glow = self.glow_fill()?.rasterize(cols, GLOW_HEIGHT)?;
        fade_last_column(&mut glow, width);
        draw_at(
            canvas,
            &glow,
            x,
            y - i64::from(GLOW_HEIGHT),
            BlendMode::Lighten,
        );

        tracing::debug!(ratio = self.ratio, width, "drew progress bar");
        Ok(())
    }
}

/// Scale the rightmost column by the fractional coverage of `width`.
fn fade_last_column(layer: &mut Surface, width: f64) {
    let frac = width - width.floor();
    if frac <= f64::EPSILON {
        return;
    }
    let cov = (frac * 255.0).round() as u16;
    let w = layer.width() as usize;
    let last = w - 1;
    for row in layer.data_mut().chunks_exact_mut(w * 4) {
        for c in &mut row[last * 4..last * 4 + 4] {
            *c = mul_div255_u8(u16::from(*c), cov);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/progress.rs"]
mod tests;
