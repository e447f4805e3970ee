use super::*;

#[test]
fn empty_object_is_all_defaults() {
    let cfg = FlyerConfig::from_json("{}").unwrap();
    assert_eq!(cfg, FlyerConfig::default());
    assert_eq!(cfg.raster.supersample, 8);
    assert_eq!(cfg.raster.nudge_left, 20.0);
    assert_eq!(cfg.logo, LogoSource::Builtin);
}

#[test]
fn nested_partial_override() {
    let cfg = FlyerConfig::from_json(r#"{"raster":{"supersample":2},"font_dirs":["fonts"]}"#)
        .unwrap();
    assert_eq!(cfg.raster.supersample, 2);
    assert_eq!(cfg.raster.logical_size, 300);
    assert_eq!(cfg.font_dirs, vec![PathBuf::from("fonts")]);
}

#[test]
fn invalid_values_are_rejected() {
    let err = FlyerConfig::from_json(r#"{"raster":{"supersample":0}}"#).unwrap_err();
    assert!(matches!(err, FlyerError::Validation(_)));

    let err = FlyerConfig::from_json("[1,2]").unwrap_err();
    assert!(matches!(err, FlyerError::Serde(_)));
}

#[test]
fn load_resolves_relative_paths_against_config_dir() {
    let dir = std::env::temp_dir().join(format!("flyerpress-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("flyer.json");
    std::fs::write(
        &path,
        r#"{"logo":{"kind":"file","path":"logo.png"},"font_dirs":["fonts","/abs/fonts"]}"#,
    )
    .unwrap();

    let cfg = FlyerConfig::load(&path).unwrap();
    assert_eq!(cfg.logo, LogoSource::File(dir.join("logo.png")));
    assert_eq!(cfg.font_dirs, vec![dir.join("fonts"), PathBuf::from("/abs/fonts")]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = FlyerConfig::load(Path::new("target/no/such/flyer.json")).unwrap_err();
    assert!(format!("{err:#}").contains("flyer.json"));
}
