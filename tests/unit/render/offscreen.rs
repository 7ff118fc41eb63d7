use super::*;

fn gradient(w: u32, h: u32) -> Raster {
    Raster::from_fn(w, h, |x, y| {
        [
            x as f32 / (w - 1) as f32,
            y as f32 / (h - 1) as f32,
            0.5,
            1.0,
        ]
    })
    .unwrap()
}

#[test]
fn offscreen_64_square_has_expected_shape_and_range() {
    let state = DistortionState::new(
        gradient(20, 12),
        32,
        Strength::from_percent(5.0).unwrap(),
        CompositorOpts::default(),
    )
    .unwrap();
    let out = state.render_to_buffer(64, 64).unwrap();
    assert_eq!((out.width(), out.height()), (64, 64));
    assert_eq!(out.data().len(), 64 * 64 * 4);
    assert!(out.data().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn offscreen_render_leaves_preview_viewport_alone() {
    let mut state = DistortionState::new(
        gradient(16, 16),
        8,
        Strength::from_percent(2.0).unwrap(),
        CompositorOpts::default(),
    )
    .unwrap();
    let preview_vp = Viewport::new(40, 30).unwrap();
    state.set_viewport(preview_vp).unwrap();

    let before = state.render_viewport().unwrap();
    let export = state.render_to_buffer(16, 16).unwrap();
    let after = state.render_viewport().unwrap();

    assert_eq!(state.viewport(), preview_vp);
    assert_eq!((export.width(), export.height()), (16, 16));
    assert_eq!((after.width(), after.height()), (40, 30));
    assert_eq!(before, after);
}

#[test]
fn native_render_matches_explicit_image_size() {
    let state = DistortionState::new(
        gradient(10, 6),
        5,
        Strength::from_percent(1.0).unwrap(),
        CompositorOpts::default(),
    )
    .unwrap();
    assert_eq!(
        state.render_native().unwrap(),
        state.render_to_buffer(10, 6).unwrap()
    );
}

#[test]
fn zero_area_targets_are_rejected() {
    let mut state = DistortionState::new(
        gradient(4, 4),
        32,
        Strength::ZERO,
        CompositorOpts::default(),
    )
    .unwrap();
    assert!(matches!(
        state.render_to_buffer(0, 64),
        Err(crate::InkwarpError::Precondition(_))
    ));
    assert!(
        state
            .set_viewport(Viewport {
                width: 0,
                height: 3
            })
            .is_err()
    );
    assert_eq!(state.viewport(), Viewport::new(4, 4).unwrap());
}

#[test]
fn period_change_regenerates_field_only_when_needed() {
    let mut state = DistortionState::new(
        gradient(8, 8),
        32,
        Strength::ZERO,
        CompositorOpts::default(),
    )
    .unwrap();
    let original = state.field().clone();
    state.set_period(32).unwrap();
    assert_eq!(state.field(), &original);

    state.set_period(4).unwrap();
    assert_eq!(state.period(), 4);
    assert_ne!(state.field(), &original);

    assert!(state.set_period(0).is_err());
    assert_eq!(state.period(), 4);
}

#[test]
fn oversized_offscreen_target_is_a_precondition_error() {
    let state = DistortionState::new(
        gradient(4, 4),
        32,
        Strength::ZERO,
        CompositorOpts::default(),
    )
    .unwrap();
    assert!(matches!(
        state.render_to_buffer(u32::MAX, u32::MAX),
        Err(crate::InkwarpError::Precondition(_))
    ));
}
