use crate::foundation::core::Surface;
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Separable blend applied when a layer is drawn onto the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Plain source-over.
    #[default]
    Normal,
    /// Keeps the lighter of source and backdrop per channel, then source-over.
    Lighten,
}

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Premultiplied "lighten": `Cs + Cb - min(Cs * ab, Cb * as)`, alpha as source-over.
pub fn lighten(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if dst[3] == 0 {
        return src;
    }

    let sa = u16::from(src[3]);
    let da = u16::from(dst[3]);
    let mut out = [0u8; 4];
    for i in 0..3 {
        let s = u16::from(src[i]);
        let d = u16::from(dst[i]);
        let overlap = mul_div255_u8(s, da).min(mul_div255_u8(d, sa));
        out[i] = (s + d).saturating_sub(u16::from(overlap)).min(255) as u8;
    }
    out[3] = (sa + da)
        .saturating_sub(u16::from(mul_div255_u8(sa, da)))
        .min(255) as u8;
    out
}

fn blend(dst: PremulRgba8, src: PremulRgba8, mode: BlendMode) -> PremulRgba8 {
    match mode {
        BlendMode::Normal => over(dst, src, 1.0),
        BlendMode::Lighten => lighten(dst, src),
    }
}

/// Draw `src` onto `dst` with its top-left corner at `(x, y)`; out-of-bounds parts are dropped.
pub fn draw_at(dst: &mut Surface, src: &Surface, x: i64, y: i64, mode: BlendMode) {
    let dw = i64::from(dst.width);
    let dh = i64::from(dst.height);
    let sw = i64::from(src.width);
    let sh = i64::from(src.height);

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        let sy = dy - y;
        for dx in x0..x1 {
            let sx = dx - x;
            let si = ((sy * sw + sx) * 4) as usize;
            let di = ((dy * dw + dx) * 4) as usize;
            let s = [
                src.data[si],
                src.data[si + 1],
                src.data[si + 2],
                src.data[si + 3],
            ];
            if s[3] == 0 {
                continue;
            }
            let d = [
                dst.data[di],
                dst.data[di + 1],
                dst.data[di + 2],
                dst.data[di + 3],
            ];
            dst.data[di..di + 4].copy_from_slice(&blend(d, s, mode));
        }
    }
}

/// Source-over of two equally sized layers.
pub fn over_in_place(dst: &mut Surface, src: &Surface) -> CardResult<()> {
    if dst.width != src.width || dst.height != src.height {
        return Err(CardError::render(
            "over_in_place expects equally sized surfaces",
        ));
    }
    draw_at(dst, src, 0, 0, BlendMode::Normal);
    Ok(())
}

/// Scale every pixel of `dst` by the alpha of `mask` (destination-in).
pub fn mask_in_place(dst: &mut Surface, mask: &Surface) -> CardResult<()> {
    if dst.width != mask.width || dst.height != mask.height {
        return Err(CardError::render(
            "mask_in_place expects equally sized surfaces",
        ));
    }
    for (d, m) in dst
        .data
        .chunks_exact_mut(4)
        .zip(mask.data.chunks_exact(4))
    {
        let ma = u16::from(m[3]);
        if ma == 255 {
            continue;
        }
        for c in d.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), ma);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
