use super::*;

#[test]
fn default_template_is_valid() {
    let t = FlyerTemplate::default();
    t.validate().unwrap();
    assert_eq!(t.background.to_hex(), "#231f20");
    assert_eq!(t.date.font_size, 30.0);
    assert_eq!(t.event_type.color, ACCENT);
    assert_eq!(t.address.color, LIGHT);
}

#[test]
fn line_box_scales_with_font_size() {
    let s = FlyerTemplate::default().venue_name;
    assert!((s.line_box() - 27.0 * 0.95).abs() < 1e-5);
}

#[test]
fn partial_json_keeps_defaults() {
    let t: FlyerTemplate =
        serde_json::from_str(r##"{"background":"#000000","padding":20}"##).unwrap();
    assert_eq!(t.background, Rgb8::new(0, 0, 0));
    assert_eq!(t.padding, 20.0);
    assert_eq!(t.font_weight, 900);
    assert_eq!(t.date, FlyerTemplate::default().date);
}

#[test]
fn validate_rejects_degenerate_values() {
    let mut t = FlyerTemplate::default();
    t.show_time.font_size = 0.0;
    let err = t.validate().unwrap_err().to_string();
    assert!(err.contains("show_time.font_size"), "{err}");

    let mut t = FlyerTemplate::default();
    t.font_weight = 950;
    assert!(t.validate().is_err());

    let mut t = FlyerTemplate::default();
    t.padding = f32::NAN;
    assert!(t.validate().is_err());
}

#[test]
fn padding_must_leave_a_content_box() {
    let mut t = FlyerTemplate::default();
    t.padding = 149.0;
    t.check_fits(300.0).unwrap();
    t.padding = 150.0;
    assert!(matches!(t.check_fits(300.0), Err(FlyerError::Validation(_))));
}
