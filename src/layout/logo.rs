//! Flyer logo: a built-in vector emblem or an external raster image.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use resvg::tiny_skia;
use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgb8;
use crate::foundation::error::{FlyerError, FlyerResult};

/// Height/width ratio of the built-in emblem.
pub const BUILTIN_ASPECT: f32 = 0.5;

/// Where the flyer logo comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum LogoSource {
    /// Vector emblem drawn in the template accent color.
    #[default]
    Builtin,
    /// PNG/JPEG file, decoded on every render.
    File(PathBuf),
}

/// A logo ready to be placed into a staged flyer.
#[derive(Clone, Debug)]
pub enum PreparedLogo {
    /// Emitted as SVG markup inside the layout block.
    Builtin,
    /// Premultiplied pixels composited onto the staged bitmap after the SVG pass.
    Raster(Arc<tiny_skia::Pixmap>),
}

impl PreparedLogo {
    /// Height/width ratio used to size the logo box.
    pub fn aspect(&self) -> f32 {
        match self {
            Self::Builtin => BUILTIN_ASPECT,
            Self::Raster(p) => p.height() as f32 / p.width() as f32,
        }
    }
}

impl LogoSource {
    /// Load the logo. A missing or undecodable file is a render failure.
    pub fn load(&self) -> FlyerResult<PreparedLogo> {
        match self {
            Self::Builtin => Ok(PreparedLogo::Builtin),
            Self::File(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("read logo '{}'", path.display()))
                    .map_err(|e| FlyerError::render(format!("{e:#}")))?;
                decode_logo(&bytes).map(|p| PreparedLogo::Raster(Arc::new(p)))
            }
        }
    }
}

/// Decode encoded image bytes into a premultiplied pixmap.
pub fn decode_logo(bytes: &[u8]) -> FlyerResult<tiny_skia::Pixmap> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| FlyerError::render(format!("decode logo image: {e}")))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);

    let size = tiny_skia::IntSize::from_wh(width, height)
        .ok_or_else(|| FlyerError::render("logo image has zero size"))?;
    tiny_skia::Pixmap::from_vec(data, size)
        .ok_or_else(|| FlyerError::render("logo pixel buffer does not match its size"))
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// SVG markup for the built-in emblem inside the box `(x, y, w, h)`.
///
/// A framed five-pointed star flanked by two rules.
pub fn builtin_emblem_svg(x: f32, y: f32, w: f32, h: f32, color: Rgb8) -> String {
    let stroke = (h * 0.06).max(0.5);
    let half = stroke / 2.0;
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;
    let outer = h * 0.32;
    let inner = outer * 0.382;
    let rule_gap = outer * 1.4;
    let rule_inset = w * 0.1;
    let fill = color.to_hex();

    let points = (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = -FRAC_PI_2 + (i as f32) * TAU / 10.0;
            format!("{:.2},{:.2}", cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        concat!(
            r#"<g id="logo">"#,
            r#"<rect x="{rx:.2}" y="{ry:.2}" width="{rw:.2}" height="{rh:.2}" rx="{corner:.2}" fill="none" stroke="{fill}" stroke-width="{stroke:.2}"/>"#,
            r#"<polygon points="{points}" fill="{fill}"/>"#,
            r#"<line x1="{l1a:.2}" y1="{cy:.2}" x2="{l1b:.2}" y2="{cy:.2}" stroke="{fill}" stroke-width="{stroke:.2}"/>"#,
            r#"<line x1="{l2a:.2}" y1="{cy:.2}" x2="{l2b:.2}" y2="{cy:.2}" stroke="{fill}" stroke-width="{stroke:.2}"/>"#,
            r#"</g>"#,
        ),
        rx = x + half,
        ry = y + half,
        rw = (w - stroke).max(0.0),
        rh = (h - stroke).max(0.0),
        corner = h * 0.12,
        fill = fill,
        stroke = stroke,
        points = points,
        cy = cy,
        l1a = x + rule_inset,
        l1b = cx - rule_gap,
        l2a = cx + rule_gap,
        l2b = x + w - rule_inset,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/logo.rs"]
mod tests;
