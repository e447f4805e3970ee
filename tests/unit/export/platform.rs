use super::*;
use crate::render::raster::DEFAULT_MAX_DIM;

#[test]
fn platform_sizes() {
    assert_eq!(Platform::Instagram.default_size(), (1080, 1080));
    assert_eq!(Platform::Facebook.default_size(), (1200, 630));
    assert_eq!(Platform::Custom.default_size(), (1080, 1080));
}

#[test]
fn platform_parses_case_insensitively() {
    assert_eq!("Facebook".parse::<Platform>().unwrap(), Platform::Facebook);
    assert_eq!(" instagram ".parse::<Platform>().unwrap(), Platform::Instagram);
    assert!(matches!(
        "tiktok".parse::<Platform>(),
        Err(FlyerError::Validation(_))
    ));
}

#[test]
fn platform_serde_is_lowercase() {
    assert_eq!(serde_json::to_string(&Platform::Custom).unwrap(), "\"custom\"");
    assert_eq!(Platform::Facebook.to_string(), "facebook");
}

#[test]
fn size_is_authoritative_over_label() {
    let spec = ExportSpec::new(500, 700, Platform::Facebook);
    spec.validate(DEFAULT_MAX_DIM).unwrap();
    assert_eq!((spec.width, spec.height), (500, 700));
    assert_eq!(ExportSpec::for_platform(Platform::Facebook).height, 630);
    assert!(ExportSpec::new(0, 10, Platform::Custom).validate(DEFAULT_MAX_DIM).is_err());
}

#[test]
fn validate_rejects_sizes_beyond_max_dim() {
    let spec = ExportSpec::new(2048, 1024, Platform::Custom);
    spec.validate(2048).unwrap();
    assert!(matches!(spec.validate(2047), Err(FlyerError::Validation(_))));
    assert!(matches!(
        ExportSpec::new(10, DEFAULT_MAX_DIM + 1, Platform::Custom).validate(DEFAULT_MAX_DIM),
        Err(FlyerError::Validation(_))
    ));
}
