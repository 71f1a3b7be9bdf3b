use super::*;

fn spec(show_bar: bool, duration: Option<f64>, elapsed: Option<f64>) -> ProgressSpec {
    ProgressSpec {
        show_bar,
        duration,
        elapsed,
        color: None,
    }
}

fn black(width: u32, height: u32) -> Surface {
    let mut s = Surface::transparent(width, height).unwrap();
    s.fill([0, 0, 0, 255]);
    s
}

#[test]
fn gate_requires_flag_and_positive_times() {
    assert!(ProgressBar::resolve(None).is_none());
    assert!(ProgressBar::resolve(Some(&spec(false, Some(200.0), Some(100.0)))).is_none());
    assert!(ProgressBar::resolve(Some(&spec(true, None, Some(100.0)))).is_none());
    assert!(ProgressBar::resolve(Some(&spec(true, Some(0.0), Some(100.0)))).is_none());
    assert!(ProgressBar::resolve(Some(&spec(true, Some(200.0), Some(0.0)))).is_none());
    assert!(ProgressBar::resolve(Some(&spec(true, Some(200.0), Some(-5.0)))).is_none());
    assert!(ProgressBar::resolve(Some(&spec(true, Some(f64::NAN), Some(5.0)))).is_none());
    assert!(ProgressBar::resolve(Some(&spec(true, Some(200.0), Some(100.0)))).is_some());
}

#[test]
fn ratio_is_clamped_to_one() {
    let bar = ProgressBar::resolve(Some(&spec(true, Some(200.0), Some(300.0)))).unwrap();
    assert_eq!(bar.ratio(), 1.0);
    let bar = ProgressBar::resolve(Some(&spec(true, Some(203.0), Some(114.5)))).unwrap();
    assert!((bar.ratio() - 114.5 / 203.0).abs() < 1e-12);
}

#[test]
fn colors_default_to_green() {
    let bar = ProgressBar::resolve(Some(&spec(true, Some(10.0), Some(5.0)))).unwrap();
    assert_eq!(bar.bar_color(), Rgba8::opaque(29, 185, 84));
    assert_eq!(bar.glow_rgb(), [29, 185, 84]);

    let mut s = spec(true, Some(10.0), Some(5.0));
    s.color = Some("rgb(10, 20, 30)".to_owned());
    let bar = ProgressBar::resolve(Some(&s)).unwrap();
    assert_eq!(bar.bar_color(), Rgba8::opaque(10, 20, 30));
    assert_eq!(bar.glow_rgb(), [10, 20, 30]);
}

#[test]
fn bar_and_glow_geometry() {
    let geom = FrameGeometry::new(1920, 973);
    let bar = ProgressBar::resolve(Some(&spec(true, Some(10.0), Some(5.0)))).unwrap();
    assert_eq!(bar.bar_rect(&geom), Rect::new(8.0, 963.0, 960.0, 965.0));
    assert_eq!(bar.glow_rect(&geom), Rect::new(8.0, 953.0, 960.0, 963.0));
}

#[test]
fn glow_fill_stops() {
    let bar = ProgressBar::resolve(Some(&spec(true, Some(10.0), Some(5.0)))).unwrap();
    let fill = bar.glow_fill().unwrap();
    let alphas: Vec<u8> = fill.stops().iter().map(|s| s.color.a).collect();
    let offsets: Vec<f32> = fill.stops().iter().map(|s| s.offset).collect();
    assert_eq!(alphas, vec![0, 38, 77]);
    assert_eq!(offsets, vec![0.0, 0.7, 1.0]);
}

#[test]
fn draw_paints_bar_and_glow_only_up_to_ratio() {
    let geom = FrameGeometry::new(400, 200);
    let bar = ProgressBar::resolve(Some(&spec(true, Some(10.0), Some(5.0)))).unwrap();
    let mut canvas = black(400, 200);
    bar.draw(&mut canvas, &geom).unwrap();

    let on_bar = canvas.pixel(100, 191).unwrap();
    assert!(on_bar[1] > 170 && on_bar[0] < 45, "bar pixel {on_bar:?}");
    assert_eq!(canvas.pixel(300, 191), Some([0, 0, 0, 255]));

    let glow_low = canvas.pixel(100, 189).unwrap();
    let glow_high = canvas.pixel(100, 181).unwrap();
    assert!(glow_low[1] > glow_high[1]);
    assert!(glow_low[1] > 30 && glow_low[1] < 80, "glow pixel {glow_low:?}");
    assert_eq!(glow_low[3], 255);
    assert_eq!(canvas.pixel(100, 179), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(300, 185), Some([0, 0, 0, 255]));
}

#[test]
fn fractional_width_softens_last_column() {
    let geom = FrameGeometry::new(400, 200);
    let bar = ProgressBar::resolve(Some(&spec(true, Some(10.0), Some(3.0)))).unwrap();
    let mut canvas = Surface::transparent(400, 200).unwrap();
    bar.draw(&mut canvas, &geom).unwrap();
    // 8 + 0.3 * 384 = 123.2
    let full = canvas.pixel(122, 191).unwrap()[3];
    let partial = canvas.pixel(123, 191).unwrap()[3];
    assert_eq!(full, 255);
    assert!(partial < 128, "partial coverage {partial}");
    assert_eq!(canvas.pixel(124, 191).unwrap()[3], 0);
}
