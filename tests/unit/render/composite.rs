use super::*;

fn surface(w: u32, h: u32, px: PremulRgba8) -> Surface {
    let mut s = Surface::transparent(w, h).unwrap();
    s.fill(px);
    s
}

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src, 1.0), src);
}

#[test]
fn lighten_keeps_lighter_channel_for_opaque_inputs() {
    let dst = [10, 200, 30, 255];
    let src = [100, 50, 30, 255];
    assert_eq!(lighten(dst, src), [100, 200, 30, 255]);
}

#[test]
fn lighten_with_transparent_operands() {
    let px = [40, 50, 60, 128];
    assert_eq!(lighten(px, [0, 0, 0, 0]), px);
    assert_eq!(lighten([0, 0, 0, 0], px), px);
}

#[test]
fn lighten_translucent_source_never_darkens_opaque_backdrop() {
    let dst = [32, 40, 64, 255];
    let src = [9, 56, 25, 77];
    let out = lighten(dst, src);
    assert_eq!(out[3], 255);
    for i in 0..3 {
        assert!(out[i] >= dst[i], "channel {i}: {out:?}");
    }
}

#[test]
fn draw_at_clips_to_destination_bounds() {
    let mut dst = Surface::transparent(4, 4).unwrap();
    let src = surface(3, 3, [255, 0, 0, 255]);
    draw_at(&mut dst, &src, -1, 2, BlendMode::Normal);

    assert_eq!(dst.pixel(0, 2), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 3), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 0]));
}

#[test]
fn draw_at_fully_outside_is_noop() {
    let mut dst = surface(2, 2, [1, 2, 3, 4]);
    let before = dst.clone();
    draw_at(&mut dst, &surface(2, 2, [255; 4]), 5, 0, BlendMode::Normal);
    draw_at(&mut dst, &surface(2, 2, [255; 4]), -2, 0, BlendMode::Lighten);
    assert_eq!(dst, before);
}

#[test]
fn over_in_place_rejects_size_mismatch() {
    let mut dst = Surface::transparent(2, 2).unwrap();
    assert!(over_in_place(&mut dst, &Surface::transparent(3, 2).unwrap()).is_err());
}

#[test]
fn mask_scales_by_mask_alpha() {
    let mut dst = surface(2, 1, [200, 100, 50, 255]);
    let mut mask = Surface::transparent(2, 1).unwrap();
    mask.data_mut()[0..4].copy_from_slice(&[255, 255, 255, 255]);
    mask.data_mut()[4..8].copy_from_slice(&[0, 0, 0, 0]);
    mask_in_place(&mut dst, &mask).unwrap();
    assert_eq!(dst.pixel(0, 0), Some([200, 100, 50, 255]));
    assert_eq!(dst.pixel(1, 0), Some([0, 0, 0, 0]));

    let mut half = surface(1, 1, [200, 100, 50, 255]);
    mask_in_place(&mut half, &surface(1, 1, [128, 128, 128, 128])).unwrap();
    assert_eq!(half.pixel(0, 0), Some([100, 50, 25, 128]));
}
