use super::*;

#[test]
fn empty_json_yields_defaults() {
    let config = BackdropConfig::from_json_str("{}").unwrap();
    assert_eq!(config, BackdropConfig::default());
    assert_eq!(config.viewport(), Size::new(1280.0, 720.0));
    assert_eq!(config.document().height, 3600.0);
    assert_eq!(config.layers, DEFAULT_LAYERS.to_vec());
    assert!(!config.is_mobile());
}

#[test]
fn partial_json_overrides_fields() {
    let config = BackdropConfig::from_json_str(
        r#"{
            "viewport_width": 390,
            "viewport_height": 844,
            "device_pixel_ratio": 3,
            "layers": ["stars", "ambient"],
            "frame": { "restart_delay_ms": 250 },
            "sections": [{ "id": "hero", "height": 900 }]
        }"#,
    )
    .unwrap();
    assert!(config.is_mobile());
    assert_eq!(config.layers, vec![LayerChoice::Stars, LayerChoice::Ambient]);
    assert_eq!(config.frame.restart_delay_ms, 250.0);
    assert_eq!(config.frame.interval_ms, 1000.0 / 60.0);
    assert_eq!(config.document(), Size::new(390.0, 900.0));
    assert_eq!(config.layer_observer, ObserverOptions::layer());
}

#[test]
fn document_is_never_shorter_than_viewport() {
    let config = BackdropConfig {
        document_height: Some(100.0),
        ..BackdropConfig::default()
    };
    assert_eq!(config.document().height, 720.0);
}

#[test]
fn validation_rejects_bad_values() {
    let bad = [
        BackdropConfig {
            viewport_width: 0.0,
            ..BackdropConfig::default()
        },
        BackdropConfig {
            device_pixel_ratio: f64::NAN,
            ..BackdropConfig::default()
        },
        BackdropConfig {
            layers: Vec::new(),
            ..BackdropConfig::default()
        },
        BackdropConfig {
            frame: FrameTiming {
                interval_ms: -1.0,
                ..FrameTiming::default()
            },
            ..BackdropConfig::default()
        },
    ];
    for config in bad {
        assert!(matches!(
            config.validate(),
            Err(StardriftError::Validation(_))
        ));
    }
}

#[test]
fn parse_errors_are_serde_errors() {
    let err = BackdropConfig::from_json_str(r#"{"layers": ["comets"]}"#).unwrap_err();
    assert!(matches!(err, StardriftError::Serde(_)));
    let err = BackdropConfig::from_json_str(r#"{"viewport": 3}"#).unwrap_err();
    assert!(matches!(err, StardriftError::Serde(_)));
}

#[test]
fn invalid_values_fail_after_parsing() {
    let err = BackdropConfig::from_json_str(r#"{"viewport_height": -5}"#).unwrap_err();
    assert!(err.to_string().contains("viewport_height"));
}

#[test]
fn json_round_trips_through_pretty_output() {
    let config = BackdropConfig::default();
    let json = config.to_json_pretty().unwrap();
    assert_eq!(BackdropConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = BackdropConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, StardriftError::Validation(_)));
}
