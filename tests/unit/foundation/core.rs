use super::*;

#[test]
fn viewport_rejects_zero_area() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
    assert!(matches!(
        Viewport::new(0, 0),
        Err(InkwarpError::Precondition(_))
    ));
}

#[test]
fn viewport_tap_step_scales_with_size() {
    let vp = Viewport::new(800, 600).unwrap();
    let (dx, dy) = vp.tap_step();
    assert_eq!(dx, 0.33 / 800.0);
    assert_eq!(dy, 0.33 / 600.0);
    assert_eq!(vp.area(), 480_000);
}

#[test]
fn strength_percent_maps_to_units() {
    let s = Strength::from_percent(5.0).unwrap();
    assert_eq!(s.percent(), 5.0);
    assert!((s.units() - 0.05).abs() < 1e-7);
    assert_eq!(Strength::ZERO.units(), 0.0);
}

#[test]
fn strength_rejects_negative_and_non_finite() {
    assert!(Strength::from_percent(-0.5).is_err());
    assert!(Strength::from_percent(f64::NAN).is_err());
    assert!(Strength::from_percent(f64::INFINITY).is_err());
}

#[test]
fn fps_floor_truncates_partial_frames() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_floor(2.0), 60);
    assert_eq!(fps.secs_to_frames_floor(0.99), 29);
    assert_eq!(fps.frames_per_second_rounded(), 30);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}
