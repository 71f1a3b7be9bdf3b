use super::*;
use crate::request::model::{Compass, GradientDirection};

fn spec(kind: GradientKind, colors: &[&str], dir: Option<(&str, &str)>) -> GradientSpec {
    GradientSpec {
        kind,
        colors: colors.iter().map(|c| c.to_string()).collect(),
        direction: dir.map(|(s, e)| GradientDirection {
            start: Compass::from_name(s),
            end: Compass::from_name(e),
        }),
    }
}

#[test]
fn stop_offsets_are_evenly_spaced() {
    assert_eq!(stop_offsets(0), Vec::<f32>::new());
    assert_eq!(stop_offsets(1), vec![0.0]);
    assert_eq!(stop_offsets(2), vec![0.0, 1.0]);
    assert_eq!(stop_offsets(3), vec![0.0, 0.5, 1.0]);
    assert_eq!(stop_offsets(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn first_and_last_stops_map_to_first_and_last_colors() {
    let g = GradientFill::from_spec(
        &spec(GradientKind::Linear, &["#ff0000", "#00ff00", "#0000ff"], Some(("left", "right"))),
        100.0,
        10.0,
    )
    .unwrap();
    let stops = g.stops();
    assert_eq!(stops.len(), 3);
    assert_eq!(stops[0].offset, 0.0);
    assert_eq!(stops[0].color, Rgba8::opaque(255, 0, 0));
    assert_eq!(stops[2].offset, 1.0);
    assert_eq!(stops[2].color, Rgba8::opaque(0, 0, 255));
    assert_eq!(g.color_at(0.0), [255, 0, 0, 255]);
    assert_eq!(g.color_at(0.5), [0, 255, 0, 255]);
    assert_eq!(g.color_at(1.0), [0, 0, 255, 255]);
}

#[test]
fn linear_endpoints_come_from_compass() {
    let g = GradientFill::from_spec(
        &spec(GradientKind::Linear, &["#000", "#fff"], Some(("bottomleft", "topright"))),
        200.0,
        100.0,
    )
    .unwrap();
    assert_eq!(
        g.shape,
        GradientShape::Linear {
            start: Point::new(0.0, 100.0),
            end: Point::new(200.0, 0.0),
        }
    );
    // Bottom-left pixel is near the first color, top-right near the last.
    assert!(g.sample(0, 99)[0] < 10);
    assert!(g.sample(199, 0)[0] > 245);
}

#[test]
fn radial_geometry_is_centered_with_half_max_side_radius() {
    let g = GradientFill::from_spec(&spec(GradientKind::Radial, &["#fff", "#000"], None), 200.0, 100.0)
        .unwrap();
    assert_eq!(
        g.shape,
        GradientShape::Radial {
            center: Point::new(100.0, 50.0),
            radius: 100.0,
        }
    );
    assert_eq!(g.param_at(Point::new(100.0, 50.0)), Some(0.0));
    assert_eq!(g.param_at(Point::new(150.0, 50.0)), Some(0.5));
    assert_eq!(g.param_at(Point::new(0.0, 0.0)), Some(1.0));
}

#[test]
fn linear_without_direction_is_configuration_error() {
    let err =
        GradientFill::from_spec(&spec(GradientKind::Linear, &["#000", "#fff"], None), 10.0, 10.0)
            .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn single_color_is_uniform_fill() {
    let g = GradientFill::from_spec(
        &spec(GradientKind::Linear, &["#336699"], Some(("top", "bottom"))),
        8.0,
        8.0,
    )
    .unwrap();
    let s = g.rasterize(8, 8).unwrap();
    assert!(s.data().chunks_exact(4).all(|px| px == [0x33, 0x66, 0x99, 255]));
}

#[test]
fn coincident_endpoints_paint_nothing() {
    let g = GradientFill::from_spec(
        &spec(GradientKind::Linear, &["#fff", "#000"], Some(("top", "top"))),
        8.0,
        8.0,
    )
    .unwrap();
    let s = g.rasterize(8, 8).unwrap();
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn unknown_compass_names_both_anchor_at_origin_and_paint_nothing() {
    let g = GradientFill::from_spec(
        &spec(GradientKind::Linear, &["#fff", "#000"], Some(("up", "down"))),
        8.0,
        8.0,
    )
    .unwrap();
    assert_eq!(g.param_at(Point::new(4.0, 4.0)), None);
}

#[test]
fn interpolation_is_premultiplied() {
    let g = GradientFill::new(
        GradientShape::Linear {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, 10.0),
        },
        vec![
            ColorStop {
                offset: 0.0,
                color: Rgba8::new(255, 0, 0, 0),
            },
            ColorStop {
                offset: 1.0,
                color: Rgba8::opaque(0, 0, 255),
            },
        ],
    )
    .unwrap();
    // Transparent red contributes no red at all.
    assert_eq!(g.color_at(0.5), [0, 0, 128, 128]);
}

#[test]
fn rasterize_matches_requested_size_and_pads_outside_range() {
    let g = GradientFill::from_spec(
        &spec(GradientKind::Linear, &["#000000", "#ffffff"], Some(("left", "right"))),
        10.0,
        4.0,
    )
    .unwrap();
    let s = g.rasterize(10, 4).unwrap();
    assert_eq!((s.width(), s.height()), (10, 4));
    let left = s.pixel(0, 0).unwrap();
    let right = s.pixel(9, 0).unwrap();
    assert!(left[0] < right[0]);
    assert_eq!(left[3], 255);
    // Same column, different rows: horizontal gradient is constant vertically.
    assert_eq!(s.pixel(5, 0), s.pixel(5, 3));
}

#[test]
fn empty_stop_list_is_rejected() {
    let shape = GradientShape::Radial {
        center: Point::ZERO,
        radius: 1.0,
    };
    assert!(GradientFill::new(shape, Vec::new()).is_err());
}

#[test]
fn region_samples_at_its_offset_in_gradient_space() {
    let g = GradientFill::from_spec(
        &spec(GradientKind::Linear, &["#000000", "#ffffff"], Some(("left", "right"))),
        100.0,
        4.0,
    )
    .unwrap();
    let s = g.rasterize_region(8, 0, 100, 1).unwrap();
    // Column 0 sits at x = 8.5, not 0.5.
    assert_eq!(s.pixel(0, 0), Some(g.sample(8, 0)));
    assert_eq!(s.pixel(0, 0).unwrap()[0], 22);
    // Everything past the end point pads with the last color.
    assert_eq!(s.pixel(92, 0), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(99, 0), Some([255, 255, 255, 255]));
    assert_eq!(g.rasterize(100, 1).unwrap().pixel(99, 0).unwrap()[0], 254);
}
