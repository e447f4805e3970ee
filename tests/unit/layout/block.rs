use super::*;
use crate::layout::logo::BUILTIN_ASPECT;

fn content() -> FlyerContent {
    FlyerContent {
        date: "Aug 20".to_owned(),
        venue_name: "The Saxon Pub".to_owned(),
        venue_address: "1320 S Lamar Blvd".to_owned(),
        city_state: "Austin, TX".to_owned(),
        show_time: "8:30pm".to_owned(),
        event_type: "Live Acoustic Music".to_owned(),
    }
}

fn renderer() -> LayoutRenderer {
    LayoutRenderer::new(FlyerTemplate::default(), 300.0)
}

#[test]
fn sections_follow_fixed_vertical_order() {
    let block = renderer().layout(&content(), BUILTIN_ASPECT);
    let kinds: Vec<_> = block.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Date,
            SectionKind::VenueName,
            SectionKind::Address,
            SectionKind::ShowTime,
            SectionKind::EventType,
        ]
    );

    let tops: Vec<f32> = block
        .sections
        .iter()
        .flat_map(|s| s.lines.iter().map(|l| l.top))
        .collect();
    assert!(tops.windows(2).all(|w| w[0] < w[1]));
    assert!(tops[0] > block.logo.bottom());
}

#[test]
fn logo_is_centered_under_top_padding() {
    let block = renderer().layout(&content(), BUILTIN_ASPECT);
    assert_eq!(block.logo, BoxRect { x: 90.0, y: 15.0, w: 120.0, h: 60.0 });
    assert_eq!(block.content_box, BoxRect { x: 15.0, y: 15.0, w: 270.0, h: 270.0 });
}

#[test]
fn address_block_has_optional_city_state_line() {
    let r = renderer();
    let block = r.layout(&content(), BUILTIN_ASPECT);
    let addr = block.section(SectionKind::Address).unwrap();
    let texts: Vec<_> = addr.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["1320 S Lamar Blvd", "Austin, TX"]);

    let mut c = content();
    c.city_state.clear();
    let block = r.layout(&c, BUILTIN_ASPECT);
    assert_eq!(block.section(SectionKind::Address).unwrap().lines.len(), 1);
}

#[test]
fn missing_fields_render_as_empty_lines() {
    let c = FlyerContent {
        date: String::new(),
        venue_name: String::new(),
        venue_address: String::new(),
        city_state: String::new(),
        show_time: String::new(),
        event_type: String::new(),
    };
    let block = renderer().layout(&c, BUILTIN_ASPECT);
    assert!(block.sections.iter().all(|s| s.lines.len() == 1));
    assert!(block.sections.iter().all(|s| s.lines[0].text.is_empty()));
}

#[test]
fn wrap_text_is_greedy_and_keeps_long_words() {
    // 10 chars per line at 10px with 0.5em advance over 50px.
    assert_eq!(wrap_text("aaa bbb ccc", 50.0, 10.0, 0.5), vec!["aaa bbb", "ccc"]);
    assert_eq!(
        wrap_text("abcdefghijklmno x", 50.0, 10.0, 0.5),
        vec!["abcdefghijklmno", "x"]
    );
    assert_eq!(wrap_text("", 50.0, 10.0, 0.5), vec![String::new()]);
    assert_eq!(wrap_text("  spaced   out ", 500.0, 10.0, 0.5), vec!["spaced out"]);
}

#[test]
fn long_venue_wraps_onto_more_lines() {
    let mut c = content();
    c.venue_name = "The Extraordinarily Long Named Roadhouse And Dance Hall".to_owned();
    let block = renderer().layout(&c, BUILTIN_ASPECT);
    assert!(block.section(SectionKind::VenueName).unwrap().lines.len() > 1);
}

#[test]
fn svg_escapes_text_and_parses() {
    let mut c = content();
    c.venue_name = "Tom & Jerry's <Bar>".to_owned();
    let svg = renderer().to_svg(&c);
    assert!(svg.contains("Tom &amp; Jerry&apos;s &lt;Bar&gt;"));
    assert!(svg.contains(r#"<clipPath id="content">"#));
    assert!(svg.contains(r##"fill="#231f20""##));
    usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
}

#[test]
fn raster_logo_is_left_out_of_markup() {
    let r = renderer();
    let pixmap = resvg::tiny_skia::Pixmap::new(10, 5).unwrap();
    let logo = PreparedLogo::Raster(std::sync::Arc::new(pixmap));
    let block = r.layout(&content(), logo.aspect());
    assert_eq!(block.logo.h, 60.0);
    let svg = r.block_svg(&block, &logo);
    assert!(!svg.contains(r#"id="logo""#));
}

#[test]
fn escape_xml_borrows_clean_input() {
    assert!(matches!(escape_xml("plain"), Cow::Borrowed("plain")));
}
