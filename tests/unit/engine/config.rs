use super::*;

#[test]
fn empty_document_yields_defaults() {
    let opts = EngineOpts::from_json_str("{}").unwrap();
    assert_eq!(opts, EngineOpts::default());
    assert_eq!(opts.cache_capacity_bytes, DEFAULT_CACHE_CAPACITY_BYTES);
}

#[test]
fn partial_style_keeps_other_defaults() {
    let opts = EngineOpts::from_json_str(
        r##"{
            "cache_capacity_bytes": 65536,
            "style": { "button": "#336699", "shading_style": "hsl", "contrast": 0.8 }
        }"##,
    )
    .unwrap();
    assert_eq!(opts.cache_capacity_bytes, 65536);
    assert_eq!(opts.style.button, Rgba8::opaque(0x33, 0x66, 0x99));
    assert_eq!(opts.style.shading_style, ShadingStyle::Hsl);
    assert_eq!(opts.style.window, StyleConfig::default().window);
}

#[test]
fn colors_accept_every_color_form() {
    let opts = EngineOpts::from_json_str(
        r#"{ "style": {
            "window": [1.0, 0.0, 0.0],
            "text": { "r": 0.0, "g": 1.0, "b": 0.0 },
            "highlight": { "h": 240.0, "s": 1.0, "l": 0.5 }
        } }"#,
    )
    .unwrap();
    assert_eq!(opts.style.window, Rgba8::opaque(255, 0, 0));
    assert_eq!(opts.style.text, Rgba8::opaque(0, 255, 0));
    assert_eq!(opts.style.highlight, Rgba8::opaque(0, 0, 255));
}

#[test]
fn out_of_range_values_are_validation_errors() {
    let err = EngineOpts::from_json_str(r#"{ "style": { "contrast": 2.0 } }"#).unwrap_err();
    assert!(matches!(err, SheenError::Validation(_)));
    let err = EngineOpts::from_json_str(r#"{ "style": { "corner_radius": 40 } }"#).unwrap_err();
    assert!(matches!(err, SheenError::Validation(_)));
    let err =
        EngineOpts::from_json_str(r#"{ "shadows": { "inactive": { "size": 100 } } }"#).unwrap_err();
    assert!(matches!(err, SheenError::Validation(_)));
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = EngineOpts::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, SheenError::Config(_)));
    let err = EngineOpts::from_json_str(r##"{ "style": { "button": "#zzzzzz" } }"##).unwrap_err();
    assert!(matches!(err, SheenError::Config(_)));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = EngineOpts::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
}

#[test]
fn options_survive_serialization() {
    let opts = EngineOpts::default();
    let s = serde_json::to_string(&opts).unwrap();
    assert_eq!(EngineOpts::from_json_str(&s).unwrap(), opts);
}
