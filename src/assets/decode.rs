use anyhow::Context;

use crate::foundation::core::Surface;
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::mul_div255_u8;

const MAX_SVG_DIM: u32 = 8192;

/// Decode fetched artwork bytes into a premultiplied surface.
///
/// Raster formats are decoded at their native size. SVG documents have no intrinsic pixel size
/// worth trusting, so they are rasterized straight to `svg_target_px` on a side.
pub fn decode_artwork(bytes: &[u8], svg_target_px: u32) -> CardResult<Surface> {
    if looks_like_svg(bytes) {
        return decode_svg(bytes, svg_target_px);
    }
    decode_raster(bytes)
}

pub fn decode_raster(bytes: &[u8]) -> CardResult<Surface> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode artwork image")
        .map_err(CardError::artwork)?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Surface::from_premul(width, height, data)
}

pub fn decode_svg(bytes: &[u8], target_px: u32) -> CardResult<Surface> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .context("parse artwork svg")
        .map_err(CardError::artwork)?;

    let side = target_px.clamp(1, MAX_SVG_DIM);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(side, side)
        .ok_or_else(|| CardError::render("failed to allocate svg pixmap"))?;

    let size = tree.size();
    let sx = (side as f32) / size.width();
    let sy = (side as f32) / size.height();
    if !sx.is_finite() || !sy.is_finite() {
        return Err(CardError::artwork(anyhow::anyhow!(
            "artwork svg has invalid width/height"
        )));
    }
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    Surface::from_premul(side, side, pixmap.data().to_vec())
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
