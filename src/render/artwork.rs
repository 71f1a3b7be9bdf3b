use kurbo::{Affine, RoundedRect, Shape};

use crate::foundation::core::Surface;
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::blur::{blur_plane, radius_for_sigma};
use crate::render::composite::{BlendMode, draw_at, over_in_place};
use crate::render::cpu;
use crate::render::frame::FrameGeometry;
use crate::request::model::Mode;

/// Room around the artwork for the shadow to spread into.
pub const SHADOW_PADDING: u32 = 40;
pub const ARTWORK_CORNER_RADIUS: f64 = 20.0;
pub const SHADOW_OFFSET_Y: u32 = 15;
pub const SHADOW_BLUR: f32 = 30.0;
pub const SHADOW_ALPHA: f32 = 0.8;

/// Where the square artwork sits on the card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArtworkPlacement {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl ArtworkPlacement {
    pub fn for_mode(mode: Mode, geom: &FrameGeometry) -> Self {
        let m = geom.margin();
        let iw = geom.inner_width_f();
        let ih = geom.inner_height_f();
        match mode {
            Mode::Default => {
                let size = 0.6 * iw.min(ih);
                Self {
                    x: m + (iw - size) / 2.0,
                    y: m + (ih - size) / 2.0,
                    size,
                }
            }
            Mode::Compact => {
                let size = 0.8 * ih;
                Self {
                    x: m + 0.05 * iw,
                    y: m + (ih - size) / 2.0,
                    size,
                }
            }
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.size
    }

    /// Side of the padded offscreen layer.
    pub fn layer_side(&self) -> u32 {
        self.size.ceil().max(1.0) as u32 + 2 * SHADOW_PADDING
    }

    /// Card position of the layer's top-left corner.
    pub fn layer_origin(&self) -> (i64, i64) {
        let p = i64::from(SHADOW_PADDING);
        (self.x.round() as i64 - p, self.y.round() as i64 - p)
    }
}

/// Rounded, scaled artwork on a padded transparent layer, without shadow.
pub fn clip_artwork(image: &Surface, placement: &ArtworkPlacement) -> CardResult<Surface> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CardError::artwork(anyhow::anyhow!("artwork image is empty")));
    }
    let side = placement.layer_side();
    let pad = f64::from(SHADOW_PADDING);
    let size = placement.size;

    let paint = cpu::image_paint(image)?;
    let paint_transform = Affine::translate((pad, pad))
        * Affine::scale_non_uniform(
            size / f64::from(image.width()),
            size / f64::from(image.height()),
        );
    let radius = ARTWORK_CORNER_RADIUS.min(size / 2.0);
    let outline = RoundedRect::new(pad, pad, pad + size, pad + size, radius).to_path(0.1);
    let outline = cpu::bezpath_to_cpu(&outline);

    cpu::rasterize(side, side, |ctx| {
        ctx.set_paint(paint);
        ctx.set_paint_transform(cpu::affine_to_cpu(paint_transform));
        ctx.fill_path(&outline);
        Ok(())
    })
}

/// Black drop shadow for `layer`: alpha shifted down, dimmed, then blurred.
pub fn drop_shadow(layer: &Surface) -> CardResult<Surface> {
    let w = layer.width();
    let h = layer.height();
    let shift = SHADOW_OFFSET_Y.min(h) as usize;
    let row = w as usize;
    let dim = (SHADOW_ALPHA * 255.0).round() as u16;

    let mut plane = vec![0u8; row * h as usize];
    for (i, px) in layer.data().chunks_exact(4).enumerate() {
        let target = i + shift * row;
        if target >= plane.len() {
            break;
        }
        plane[target] = mul_div255_u8(u16::from(px[3]), dim);
    }

    let sigma = SHADOW_BLUR / 2.0;
    let blurred = blur_plane(&plane, w, h, radius_for_sigma(sigma), sigma)?;
    let mut data = Vec::with_capacity(blurred.len() * 4);
    for a in blurred {
        data.extend_from_slice(&[0, 0, 0, a]);
    }
    Surface::from_premul(w, h, data)
}

/// Artwork with its shadow on a padded layer, plus the card position of that layer.
#[tracing::instrument(skip(image), fields(src_w = image.width(), src_h = image.height()))]
pub fn artwork_layer(
    image: &Surface,
    placement: &ArtworkPlacement,
) -> CardResult<(Surface, i64, i64)> {
    let art = clip_artwork(image, placement)?;
    let mut layer = drop_shadow(&art)?;
    over_in_place(&mut layer, &art)?;
    let (x, y) = placement.layer_origin();
    Ok((layer, x, y))
}

/// Draw shadowed artwork onto the card.
pub fn draw_artwork(
    canvas: &mut Surface,
    image: &Surface,
    placement: &ArtworkPlacement,
) -> CardResult<()> {
    let (layer, x, y) = artwork_layer(image, placement)?;
    draw_at(canvas, &layer, x, y, BlendMode::Normal);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/artwork.rs"]
mod tests;
