use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgb8;
use crate::foundation::error::{FlyerError, FlyerResult};

/// Dark flyer background.
pub const BACKGROUND: Rgb8 = Rgb8::new(0x23, 0x1f, 0x20);
/// Gold accent used for date, venue and event type.
pub const ACCENT: Rgb8 = Rgb8::new(0xca, 0xa1, 0x2b);
/// Off-white used for the address block and show time.
pub const LIGHT: Rgb8 = Rgb8::new(0xf2, 0xf2, 0xf2);

/// Typography and spacing for one text section of the flyer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionStyle {
    /// Font size in logical units.
    pub font_size: f32,
    /// Line height as a multiple of `font_size`.
    pub line_height: f32,
    /// Fill color.
    pub color: Rgb8,
    /// Space above the section.
    pub margin_top: f32,
    /// Space below the section.
    pub margin_bottom: f32,
}

impl SectionStyle {
    const fn new(font_size: f32, line_height: f32, color: Rgb8) -> Self {
        Self {
            font_size,
            line_height,
            color,
            margin_top: 5.0,
            margin_bottom: 5.0,
        }
    }

    /// Height of one line box.
    pub fn line_box(&self) -> f32 {
        self.font_size * self.line_height
    }
}

/// Visual identity of a flyer, in logical units of the square authoring box.
///
/// Defaults reproduce the house style: dark background, gold and white heavy
/// condensed type, logo on top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerTemplate {
    /// Solid background, also used to fill the letterbox of the final canvas.
    pub background: Rgb8,
    /// Accent color for the built-in logo.
    pub accent: Rgb8,
    /// CSS-style font family list.
    pub font_family: String,
    /// Font weight (100..=900).
    pub font_weight: u16,
    /// Inset on all four sides; content is clipped to the inner box.
    pub padding: f32,
    /// Logo width (height follows the logo's aspect ratio).
    pub logo_width: f32,
    /// Space between the logo and the first text section.
    pub logo_margin_bottom: f32,
    /// Average glyph advance as a fraction of the font size, used for line wrapping.
    pub char_width_em: f32,
    /// Date section.
    pub date: SectionStyle,
    /// Venue name section.
    pub venue_name: SectionStyle,
    /// Street line plus optional city/state line.
    pub address: SectionStyle,
    /// Show time section.
    pub show_time: SectionStyle,
    /// Event type section.
    pub event_type: SectionStyle,
}

impl Default for FlyerTemplate {
    fn default() -> Self {
        Self {
            background: BACKGROUND,
            accent: ACCENT,
            font_family: "Oswald, Impact, 'Arial Narrow', sans-serif".to_owned(),
            font_weight: 900,
            padding: 15.0,
            logo_width: 120.0,
            logo_margin_bottom: 15.0,
            char_width_em: 0.5,
            date: SectionStyle::new(30.0, 0.95, ACCENT),
            venue_name: SectionStyle::new(27.0, 0.95, ACCENT),
            address: SectionStyle::new(18.0, 1.02, LIGHT),
            show_time: SectionStyle::new(18.0, 1.02, LIGHT),
            event_type: SectionStyle::new(15.0, 1.05, ACCENT),
        }
    }
}

impl FlyerTemplate {
    /// Reject values that would produce a degenerate layout.
    pub fn validate(&self) -> FlyerResult<()> {
        fn positive(name: &str, v: f32) -> FlyerResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(FlyerError::validation(format!(
                    "template {name} must be finite and > 0"
                )));
            }
            Ok(())
        }

        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(FlyerError::validation(
                "template padding must be finite and >= 0",
            ));
        }
        if !(100..=900).contains(&self.font_weight) {
            return Err(FlyerError::validation(
                "template font_weight must be within 100..=900",
            ));
        }
        positive("logo_width", self.logo_width)?;
        positive("char_width_em", self.char_width_em)?;
        for (name, s) in self.sections() {
            positive(&format!("{name}.font_size"), s.font_size)?;
            positive(&format!("{name}.line_height"), s.line_height)?;
        }
        Ok(())
    }

    /// Reject padding that leaves no content box inside a `logical_size` square.
    pub fn check_fits(&self, logical_size: f32) -> FlyerResult<()> {
        if 2.0 * self.padding >= logical_size {
            return Err(FlyerError::validation(format!(
                "template padding {} leaves no content box in a {logical_size} square",
                self.padding
            )));
        }
        Ok(())
    }

    fn sections(&self) -> [(&'static str, &SectionStyle); 5] {
        [
            ("date", &self.date),
            ("venue_name", &self.venue_name),
            ("address", &self.address),
            ("show_time", &self.show_time),
            ("event_type", &self.event_type),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/template.rs"]
mod tests;
