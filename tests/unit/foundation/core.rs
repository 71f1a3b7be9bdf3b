use super::*;

#[test]
fn premul_conversion_scales_channels_by_alpha() {
    assert_eq!(Rgba8::opaque(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    assert_eq!(Rgba8::new(255, 128, 0, 128).to_premul(), [128, 64, 0, 128]);
    assert_eq!(Rgba8::TRANSPARENT.to_premul(), [0, 0, 0, 0]);
}

#[test]
fn opacity_scales_existing_alpha() {
    let c = Rgba8::WHITE.with_opacity(0.4);
    assert_eq!(c.a, 102);
    let c = Rgba8::new(1, 2, 3, 128).with_opacity(0.5);
    assert_eq!(c.a, 64);
    assert_eq!((c.r, c.g, c.b), (1, 2, 3));
}

#[test]
fn absolute_alpha_replaces_alpha() {
    assert_eq!(Rgba8::new(1, 2, 3, 10).with_alpha(0.3).a, 77);
}

#[test]
fn transparent_surface_is_zeroed_and_sized() {
    let s = Surface::transparent(3, 2).unwrap();
    assert_eq!(s.width(), 3);
    assert_eq!(s.height(), 2);
    assert_eq!(s.data().len(), 24);
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn from_premul_rejects_wrong_length() {
    assert!(Surface::from_premul(2, 2, vec![0u8; 15]).is_err());
    assert!(Surface::from_premul(2, 2, vec![0u8; 16]).is_ok());
}

#[test]
fn pixel_access_is_bounds_checked() {
    let mut s = Surface::transparent(2, 2).unwrap();
    s.fill([1, 2, 3, 4]);
    assert_eq!(s.pixel(1, 1), Some([1, 2, 3, 4]));
    assert_eq!(s.pixel(2, 0), None);
    assert_eq!(s.pixel(0, 2), None);
}
