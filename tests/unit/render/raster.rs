use super::*;
use crate::layout::template::BACKGROUND;

fn content() -> FlyerContent {
    FlyerContent {
        date: "Aug 20".to_owned(),
        venue_name: "Saxon Pub".to_owned(),
        venue_address: "1320 S Lamar Blvd".to_owned(),
        city_state: "Austin, TX".to_owned(),
        show_time: "8:30pm".to_owned(),
        event_type: "Live Acoustic Music".to_owned(),
    }
}

fn low_res() -> Rasterizer {
    let mut cfg = FlyerConfig::default();
    cfg.raster.supersample = 1;
    Rasterizer::with_fonts(&cfg, FontSet::from_dirs(&[])).unwrap()
}

#[test]
fn fit_placement_square_and_wide() {
    let p = FitPlacement::compute(300, 1080, 1080, 20.0);
    assert!((p.scale - 3.6).abs() < 1e-9);
    assert!((p.side - 1080.0).abs() < 1e-9);
    assert!((p.x0 + 72.0).abs() < 1e-9);
    assert_eq!(p.y0, 0.0);

    let p = FitPlacement::compute(300, 1200, 630, 20.0);
    assert!((p.scale - 2.1).abs() < 1e-9);
    assert!((p.x0 - 243.0).abs() < 1e-9);
    assert_eq!(p.y0, 0.0);

    let p = FitPlacement::compute(300, 600, 900, 0.0);
    assert_eq!((p.x0, p.y0), (0.0, 150.0));
}

#[test]
fn stage_transform_maps_stage_corners() {
    let p = FitPlacement::compute(300, 1200, 630, 20.0);
    let a = p.stage_to_output(2400);
    let far = a * kurbo::Point::new(2400.0, 2400.0);
    assert!((far.x - (243.0 + 630.0)).abs() < 1e-6);
    assert!((far.y - 630.0).abs() < 1e-6);
}

#[test]
fn opts_validation() {
    RasterOpts::default().validate().unwrap();
    assert_eq!(RasterOpts::default().stage_px(), 2400);
    for bad in [
        RasterOpts { supersample: 0, ..Default::default() },
        RasterOpts { supersample: 17, ..Default::default() },
        RasterOpts { logical_size: 0, ..Default::default() },
        RasterOpts { nudge_left: f32::INFINITY, ..Default::default() },
    ] {
        assert!(matches!(bad.validate(), Err(FlyerError::Validation(_))));
    }
}

#[test]
fn output_size_is_checked() {
    let opts = RasterOpts::default();
    assert!(opts.check_output_size(1, 1).is_ok());
    assert!(opts.check_output_size(0, 10).is_err());
    assert!(opts.check_output_size(16_385, 10).is_err());
}

#[test]
fn rasterize_exact_size_with_background_corners() {
    let r = low_res();
    let out = r.rasterize(&content(), 320, 200).unwrap();
    assert_eq!((out.width(), out.height()), (320, 200));
    assert_eq!(out.data().len(), 320 * 200 * 4);

    let bg = BACKGROUND.to_rgba8();
    for (x, y) in [(0, 0), (319, 0), (0, 199), (319, 199)] {
        assert_eq!(out.pixel(x, y), Some(bg), "corner ({x},{y})");
    }
    assert_eq!(out.pixel(320, 0), None);
}

#[test]
fn builtin_logo_draws_accent_pixels() {
    let r = low_res();
    let out = r.rasterize(&content(), 300, 300).unwrap();
    let bg = BACKGROUND.to_rgba8();
    // Logo box spans logical 90..210 x 15..75, shifted left by 20.
    let touched = (15..75)
        .flat_map(|y| (70..190).map(move |x| (x, y)))
        .any(|(x, y)| out.pixel(x, y) != Some(bg));
    assert!(touched);
}

#[test]
fn staging_is_released_after_render_and_error() {
    let r = low_res();
    r.rasterize(&content(), 100, 100).unwrap();
    assert!(r.rasterize(&content(), 0, 100).is_err());
    let stats = r.staging_stats();
    assert_eq!(stats.live, 0);
    assert_eq!(stats.acquired, 1);
}

#[test]
fn missing_logo_file_rejects_render() {
    let mut cfg = FlyerConfig::default();
    cfg.raster.supersample = 1;
    cfg.logo = LogoSource::File("target/missing-logo.png".into());
    let r = Rasterizer::with_fonts(&cfg, FontSet::from_dirs(&[])).unwrap();
    assert!(matches!(
        r.rasterize(&content(), 100, 100),
        Err(FlyerError::Render(_))
    ));
    assert_eq!(r.staging_stats().live, 0);
}

#[test]
fn encode_png_round_trips_dimensions() {
    let out = low_res().rasterize(&content(), 64, 48).unwrap();
    let png = out.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
    assert_eq!(Some(decoded.to_rgba8().get_pixel(0, 0).0), out.pixel(0, 0));
}

#[test]
fn oversized_padding_is_rejected_at_construction() {
    let mut cfg = FlyerConfig::default();
    cfg.template.padding = cfg.raster.logical_size as f32 / 2.0;
    assert!(matches!(
        Rasterizer::with_fonts(&cfg, FontSet::from_dirs(&[])),
        Err(FlyerError::Validation(_))
    ));

    cfg.raster.logical_size = 400;
    let r = Rasterizer::with_fonts(&cfg, FontSet::from_dirs(&[])).unwrap();
    assert_eq!(r.max_dim(), DEFAULT_MAX_DIM);
}
