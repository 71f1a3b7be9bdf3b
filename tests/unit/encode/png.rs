use super::*;

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![50, 25, 100, 128, 10, 20, 30, 0, 1, 2, 3, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[100, 50, 199, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..], &[1, 2, 3, 255]);
}

#[test]
fn png_round_trips_through_image_crate() {
    let frame = RenderedFrame {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 64, 0, 128],
    };
    let bytes = encode_png(&frame).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(1, 0).0, [0, 128, 0, 128]);
}

#[test]
fn mismatched_buffer_is_render_error() {
    let frame = RenderedFrame {
        width: 4,
        height: 4,
        data: vec![0; 8],
    };
    let err = encode_png(&frame).unwrap_err();
    assert!(matches!(err, CardError::Render(_)));
}
