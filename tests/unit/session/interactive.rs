use super::*;

fn session(strength: f64) -> InteractiveSession {
    let img = Raster::from_fn(8, 6, |x, y| [x as f32 / 7.0, y as f32 / 5.0, 0.0, 1.0]).unwrap();
    InteractiveSession::new(
        img,
        32,
        Strength::from_percent(strength).unwrap(),
        CompositorOpts::default(),
        std::env::temp_dir().join(format!("inkwarp_session_{}.png", std::process::id())),
    )
    .unwrap()
}

#[test]
fn wheel_step_is_logarithmic() {
    let wheel = WheelScaling::default();
    let next = wheel.apply(1.0, 1.0);
    assert!((next - (1.0 + 2f64.ln() / 15.0)).abs() < 1e-12);
    // Bigger strengths take bigger steps.
    assert!(wheel.apply(50.0, 1.0) - 50.0 > next - 1.0);
    // Scrolling down never goes negative.
    assert!(wheel.apply(0.01, -1000.0) >= 0.0);
}

#[test]
fn zero_strength_cannot_be_scrolled() {
    let mut s = session(0.0);
    assert_eq!(s.scroll(5.0).unwrap(), Strength::ZERO);
}

#[test]
fn scroll_updates_the_next_render() {
    let mut s = session(2.0);
    let before = s.render_export().unwrap();
    let next = s.scroll(3.0).unwrap();
    assert!(next.percent() > 2.0);
    assert_eq!(s.strength(), next);
    assert_ne!(s.render_export().unwrap(), before);
}

#[test]
fn wheel_divisor_must_be_positive() {
    assert!(WheelScaling::new(0.0).is_err());
    assert!(WheelScaling::new(-3.0).is_err());
    let finer = WheelScaling::new(30.0).unwrap();
    let mut s = session(4.0).with_wheel(finer);
    let next = s.scroll(1.0).unwrap();
    assert!((next.percent() - (4.0 + 5f64.ln() / 30.0)).abs() < 1e-12);
}

#[test]
fn preview_uses_window_size_and_export_uses_native_size() {
    let mut s = session(1.0);
    s.resize(Viewport::new(32, 24).unwrap()).unwrap();
    let preview = s.render_preview().unwrap();
    assert_eq!((preview.width(), preview.height()), (32, 24));
    let export = s.render_export().unwrap();
    assert_eq!((export.width(), export.height()), (8, 6));
    assert_eq!(s.state().viewport(), Viewport::new(32, 24).unwrap());
}

#[test]
fn save_writes_native_png() {
    let s = session(1.5);
    let path = s.save().unwrap();
    let decoded = image::open(&path).unwrap().to_rgba8();
    let _ = std::fs::remove_file(&path);
    assert_eq!(decoded.dimensions(), (8, 6));
    assert_eq!(decoded.into_raw(), s.render_export().unwrap().to_rgba8().data);
}
