use super::*;

#[test]
fn generation_is_bit_identical_across_calls() {
    let a = DisplacementField::generate(37, 23, DEFAULT_PERIOD).unwrap();
    let b = DisplacementField::generate(37, 23, DEFAULT_PERIOD).unwrap();
    assert_eq!(a.texels().len(), 37 * 23);
    for (ta, tb) in a.texels().iter().zip(b.texels()) {
        assert_eq!(ta[0].to_bits(), tb[0].to_bits());
        assert_eq!(ta[1].to_bits(), tb[1].to_bits());
    }
}

#[test]
fn origin_has_zero_phase() {
    let f = DisplacementField::generate(8, 8, 5).unwrap();
    assert_eq!(f.at(0, 0), [0.5, 1.0]);
}

#[test]
fn channels_stay_in_unit_range_and_encode_unit_directions() {
    let f = DisplacementField::generate(50, 30, 7).unwrap();
    for &[c0, c1] in f.texels() {
        assert!((0.0..=1.0).contains(&c0));
        assert!((0.0..=1.0).contains(&c1));
        let dx = 2.0 * c0 - 1.0;
        let dy = 2.0 * c1 - 1.0;
        assert!((dx * dx + dy * dy - 1.0).abs() < 1e-5);
    }
}

#[test]
fn field_depends_only_on_normalized_radius() {
    let f = DisplacementField::generate(40, 40, 9).unwrap();
    for (x, y) in [(3, 17), (0, 39), (25, 12)] {
        assert_eq!(f.at(x, y), f.at(y, x));
    }
    // Same normalized coordinates on a non-square field give the same value.
    let wide = DisplacementField::generate(80, 40, 9).unwrap();
    assert_eq!(wide.at(20, 10), f.at(10, 10));
}

#[test]
fn one_ring_per_period_step() {
    let f = DisplacementField::generate(64, 64, 4).unwrap();
    // r = 16/64 = 1/period, a full phase turn.
    let [c0, c1] = f.at(16, 0);
    assert!((c0 - 0.5).abs() < 1e-6);
    assert!((c1 - 1.0).abs() < 1e-6);
    // Half a ring: phase = pi.
    let [c0, c1] = f.at(8, 0);
    assert!((c0 - 0.5).abs() < 1e-6);
    assert!(c1.abs() < 1e-6);
}

#[test]
fn invalid_parameters_are_rejected() {
    assert!(matches!(
        DisplacementField::generate(10, 10, 0),
        Err(InkwarpError::Configuration(_))
    ));
    assert!(matches!(
        DisplacementField::generate(0, 10, 32),
        Err(InkwarpError::Precondition(_))
    ));
}

#[test]
fn matches_tracks_generation_parameters() {
    let f = DisplacementField::generate(12, 6, 3).unwrap();
    assert!(f.matches(12, 6, 3));
    assert!(!f.matches(12, 6, 4));
    assert!(!f.matches(6, 12, 3));
    assert_eq!((f.width(), f.height(), f.period()), (12, 6, 3));
}

#[test]
fn zero_strength_decodes_to_zero_displacement() {
    assert_eq!(decode_displacement([0.9, 0.1], 0.0), [0.0, 0.0]);
    let d = decode_displacement([1.0, 0.5], 0.05);
    assert!((d[0] - 0.05).abs() < 1e-7);
    assert_eq!(d[1], 0.0);
}
