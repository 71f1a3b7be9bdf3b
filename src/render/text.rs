//! Title and metadata lines.
//!
//! Lines are built from styled runs and placed left to right by measured advance. Shaping is done
//! with `parley` against the registered card font; glyphs are drawn with `vello_cpu`.

use std::borrow::Cow;

use kurbo::{Affine, Point};

use crate::assets::fonts::RegisteredFont;
use crate::foundation::core::{Rgba8, Surface};
use crate::foundation::error::{CardError, CardResult};
use crate::render::artwork::ArtworkPlacement;
use crate::render::cpu;
use crate::render::frame::{FrameGeometry, MARGIN};
use crate::request::model::{Mode, TrackInfo};

pub const TITLE_OPACITY: f32 = 1.0;
pub const ALBUM_OPACITY: f32 = 0.4;
pub const ARTISTS_OPACITY: f32 = 0.8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub weight: FontWeight,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: TextStyle,
}

/// Runs sharing one baseline, starting at `origin` (x, alphabetic baseline).
#[derive(Clone, Debug, PartialEq)]
pub struct RichLine {
    pub origin: Point,
    pub runs: Vec<TextRun>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedRun<'a> {
    pub run: &'a TextRun,
    pub x: f64,
    pub baseline: f64,
}

impl RichLine {
    /// Position each run after the measured advances of the runs before it.
    pub fn place<'a>(&'a self, mut measure: impl FnMut(&TextRun) -> f64) -> Vec<PlacedRun<'a>> {
        let mut x = self.origin.x;
        self.runs
            .iter()
            .map(|run| {
                let placed = PlacedRun {
                    run,
                    x,
                    baseline: self.origin.y,
                };
                x += measure(run);
                placed
            })
            .collect()
    }
}

/// Mode-specific text geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextProfile {
    pub text_x: f64,
    pub title_baseline: f64,
    pub title_size: f32,
    pub meta_baseline: f64,
    pub meta_size: f32,
    pub separator: &'static str,
}

impl TextProfile {
    pub fn for_mode(mode: Mode, geom: &FrameGeometry, artwork: &ArtworkPlacement) -> Self {
        let m = f64::from(MARGIN);
        match mode {
            Mode::Default => {
                let title_baseline = m + geom.inner_height_f() - 72.0;
                Self {
                    text_x: m + 48.0,
                    title_baseline,
                    title_size: 28.0,
                    meta_baseline: title_baseline + 28.0,
                    meta_size: 18.0,
                    separator: " - ",
                }
            }
            Mode::Compact => {
                let text_y = m + geom.inner_height_f() / 2.0;
                Self {
                    text_x: artwork.right() + 0.05 * geom.inner_width_f(),
                    title_baseline: text_y - 20.0,
                    title_size: 48.0,
                    meta_baseline: text_y + 40.0,
                    meta_size: 28.0,
                    separator: " • ",
                }
            }
        }
    }

    /// Title line followed by the metadata line.
    pub fn lines(&self, track: &TrackInfo) -> [RichLine; 2] {
        let title = RichLine {
            origin: Point::new(self.text_x, self.title_baseline),
            runs: vec![TextRun {
                text: track.name.clone(),
                style: TextStyle {
                    size_px: self.title_size,
                    weight: FontWeight::Bold,
                    opacity: TITLE_OPACITY,
                },
            }],
        };

        let meta_style = |opacity| TextStyle {
            size_px: self.meta_size,
            weight: FontWeight::Regular,
            opacity,
        };
        let mut runs = Vec::with_capacity(2);
        if let Some(album) = &track.album {
            runs.push(TextRun {
                text: format!("{album}{}", self.separator),
                style: meta_style(ALBUM_OPACITY),
            });
        }
        runs.push(TextRun {
            text: track.artist_line(),
            style: meta_style(ARTISTS_OPACITY),
        });
        let meta = RichLine {
            origin: Point::new(self.text_x, self.meta_baseline),
            runs,
        };

        [title, meta]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrushRgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

struct ShapedRun {
    layout: parley::Layout<TextBrushRgba8>,
    baseline: f32,
}

impl ShapedRun {
    fn advance(&self) -> f64 {
        f64::from(self.layout.full_width())
    }
}

/// Per-render shaping state seeded from the registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
}

impl TextLayoutEngine {
    pub fn new(font: &RegisteredFont) -> CardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        if families.is_empty() {
            return Err(CardError::configuration(
                "no font families registered from font bytes",
            ));
        }
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family: font.family().to_owned(),
        })
    }

    fn shape(&mut self, run: &TextRun) -> CardResult<ShapedRun> {
        let size_px = run.style.size_px;
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::render("text size_px must be finite and > 0"));
        }
        let brush = TextBrushRgba8::from(Rgba8::WHITE.with_opacity(run.style.opacity));
        let weight = match run.style.weight {
            FontWeight::Regular => parley::style::FontWeight::NORMAL,
            FontWeight::Bold => parley::style::FontWeight::BOLD,
        };

        let mut builder =
            self.layout_ctx
                .ranged_builder(&mut self.font_ctx, &run.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(&run.text);
        layout.break_all_lines(None);
        let baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline)
            .unwrap_or(0.0);
        Ok(ShapedRun { layout, baseline })
    }

    /// Advance of `run` when shaped with the card font.
    pub fn measure(&mut self, run: &TextRun) -> CardResult<f64> {
        Ok(self.shape(run)?.advance())
    }

    /// Shape and draw `lines` onto a transparent `width` x `height` layer.
    pub fn draw_lines(
        &mut self,
        lines: &[RichLine],
        width: u32,
        height: u32,
    ) -> CardResult<Surface> {
        let mut placed = Vec::new();
        for line in lines {
            let shaped = line
                .runs
                .iter()
                .map(|run| self.shape(run))
                .collect::<CardResult<Vec<_>>>()?;
            let mut advances = shaped.iter().map(ShapedRun::advance);
            let positions = line.place(|_| advances.next().unwrap_or(0.0));
            for (pos, run) in positions.into_iter().zip(shaped) {
                let transform = Affine::translate((pos.x, pos.baseline - f64::from(run.baseline)));
                placed.push((transform, run));
            }
        }

        cpu::rasterize(width, height, |ctx| {
            for (transform, run) in &placed {
                ctx.set_transform(cpu::affine_to_cpu(*transform));
                for line in run.layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item
                        else {
                            continue;
                        };
                        draw_glyph_run(ctx, &glyph_run);
                    }
                }
            }
            Ok(())
        })
    }
}

/// Stroke width added around emboldened glyphs, relative to the font size.
const EMBOLDEN_STROKE_PER_PX: f64 = 1.0 / 32.0;

/// Fill one shaped glyph run, applying the synthetic skew and emboldening parley picked for it.
///
/// Variable-font coordinates are not forwarded.
fn draw_glyph_run(
    ctx: &mut vello_cpu::RenderContext,
    glyph_run: &parley::layout::GlyphRun<'_, TextBrushRgba8>,
) {
    let run = glyph_run.run();
    let synthesis = run.synthesis();
    let font_size = run.font_size();
    let brush = glyph_run.style().brush;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        brush.r, brush.g, brush.b, brush.a,
    ));

    let glyph_transform = synthesis
        .skew()
        .map(|deg| Affine::skew(f64::from(deg).to_radians().tan(), 0.0))
        .unwrap_or(Affine::IDENTITY);
    let glyphs = || {
        glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        })
    };

    ctx.glyph_run(run.font())
        .font_size(font_size)
        .glyph_transform(cpu::affine_to_cpu(glyph_transform))
        .fill_glyphs(glyphs());
    if synthesis.embolden() {
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(
            f64::from(font_size) * EMBOLDEN_STROKE_PER_PX,
        ));
        ctx.glyph_run(run.font())
            .font_size(font_size)
            .glyph_transform(cpu::affine_to_cpu(glyph_transform))
            .stroke_glyphs(glyphs());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
