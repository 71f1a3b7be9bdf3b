use super::*;

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(radius_for_sigma(15.0), 45);
    assert_eq!(radius_for_sigma(0.4), 2);
    assert_eq!(radius_for_sigma(0.0), 0);
    assert_eq!(radius_for_sigma(f32::NAN), 0);
}

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6];
    let out = blur_plane(&src, 3, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_rejects_length_mismatch() {
    assert!(blur_plane(&[0u8; 5], 3, 2, 1, 1.0).is_err());
}

#[test]
fn blur_interior_of_constant_plane_is_unchanged() {
    let (w, h) = (16u32, 16u32);
    let src = vec![200u8; (w * h) as usize];
    let out = blur_plane(&src, w, h, 2, 1.0).unwrap();
    // Far from the zero-padded border the plane stays constant.
    assert_eq!(out[(8 * w + 8) as usize], 200);
    // Near the border energy leaks out.
    assert!(out[0] < 200);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(4 * w + 4) as usize] = 255;

    let out = blur_plane(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.iter().filter(|&&v| v != 0).count();
    assert!(nonzero > 1);

    let sum: u32 = out.iter().map(|&v| u32::from(v)).sum();
    assert!((sum as i32 - 255).abs() <= 8);
}
