use super::*;

#[test]
fn defaults_match_the_command_line_tool() {
    let cfg = WarpConfig::default();
    assert_eq!(cfg.period, 32);
    assert_eq!(cfg.strength_percent, 1.0);
    assert_eq!(cfg.output_path, PathBuf::from("screen.png"));
    assert_eq!(cfg.fps, 30);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = WarpConfig::from_json_str(r#"{ "period": 12, "duration_secs": 2.0 }"#).unwrap();
    assert_eq!(cfg.period, 12);
    assert_eq!(cfg.duration_secs, Some(2.0));
    assert_eq!(cfg.strength_percent, 1.0);
}

#[test]
fn unknown_keys_and_bad_json_are_serde_errors() {
    assert!(matches!(
        WarpConfig::from_json_str(r#"{ "noise": 3 }"#),
        Err(InkwarpError::Serde(_))
    ));
    assert!(matches!(
        WarpConfig::from_json_str("{"),
        Err(InkwarpError::Serde(_))
    ));
}

#[test]
fn validation_rejects_bad_values() {
    let bad = [
        WarpConfig {
            period: 0,
            ..WarpConfig::default()
        },
        WarpConfig {
            strength_percent: -1.0,
            ..WarpConfig::default()
        },
        WarpConfig {
            fps: 0,
            ..WarpConfig::default()
        },
        WarpConfig {
            duration_secs: Some(0.0),
            ..WarpConfig::default()
        },
        WarpConfig {
            wheel_divisor: 0.0,
            ..WarpConfig::default()
        },
        WarpConfig {
            target_strength_percent: Some(f64::NAN),
            ..WarpConfig::default()
        },
    ];
    for cfg in bad {
        assert!(
            matches!(cfg.validate(), Err(InkwarpError::Configuration(_))),
            "{cfg:?}"
        );
    }
}

#[test]
fn sweep_plan_requires_sweep_fields() {
    assert!(WarpConfig::default().sweep_plan().is_err());

    let cfg = WarpConfig {
        duration_secs: Some(2.0),
        target_strength_percent: Some(10.0),
        ..WarpConfig::default()
    };
    let plan = cfg.sweep_plan().unwrap();
    assert_eq!(plan.total_frames, 60);
    assert_eq!(plan.target.percent(), 10.0);
    assert_eq!(plan.period, 32);
}

#[test]
fn missing_file_is_io_error() {
    assert!(
        WarpConfig::from_path("no/such/config.json")
            .unwrap_err()
            .is_io()
    );
}
