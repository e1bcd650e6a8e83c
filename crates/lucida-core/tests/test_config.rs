use lucida_core::{ViewerConfig, ViewerError};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_config_values() {
    let c = ViewerConfig::default();
    assert!(c.auto_scale);
    assert_eq!((c.display_min, c.display_max), (0.0, 255.0));
    assert!(c.zoom_enabled);
    assert!(!c.zoom_indicator_enabled);
    assert_eq!(c.zoom_step_divider, 1.0);
    assert!(c.roi_enabled);
    assert!(!c.status_bar_visible);
    assert_eq!(c.colormap, None);
    assert_eq!(c.status_bar_reserve, 40);
}

#[test]
fn test_default_config_is_valid() {
    assert!(ViewerConfig::default().validate().is_ok());
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_missing_fields_take_defaults() {
    let c: ViewerConfig = serde_json::from_str(r#"{"zoom_step_divider": 2.0}"#).unwrap();
    assert_eq!(c.zoom_step_divider, 2.0);
    assert!(c.auto_scale);
    assert_eq!(c.status_bar_reserve, 40);
}

#[test]
fn test_colormap_name_survives_serialization() {
    let c = ViewerConfig {
        colormap: Some("viridis".into()),
        auto_scale: false,
        ..ViewerConfig::default()
    };
    let json = serde_json::to_string(&c).unwrap();
    let back: ViewerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_zero_divider_is_invalid() {
    let c = ViewerConfig {
        zoom_step_divider: 0.0,
        ..ViewerConfig::default()
    };
    assert!(matches!(c.validate(), Err(ViewerError::InvalidConfig(_))));
}

#[test]
fn test_infinite_display_range_is_invalid() {
    let c = ViewerConfig {
        display_max: f64::INFINITY,
        ..ViewerConfig::default()
    };
    let err = c.validate().unwrap_err();
    assert!(err.to_string().contains("display range"));
}
