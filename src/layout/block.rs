use std::borrow::Cow;
use std::fmt::Write as _;

use crate::foundation::color::Rgb8;
use crate::layout::logo::{PreparedLogo, builtin_emblem_svg};
use crate::layout::template::{FlyerTemplate, SectionStyle};
use crate::show::mapper::FlyerContent;

/// Axis-aligned box in logical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BoxRect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Which flyer field a section shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Date,
    VenueName,
    Address,
    ShowTime,
    EventType,
}

/// One centered line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Top of the line box.
    pub top: f32,
    /// Alphabetic baseline, used as the SVG `y`.
    pub baseline: f32,
    pub font_size: f32,
    pub color: Rgb8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSection {
    pub kind: SectionKind,
    pub lines: Vec<TextLine>,
}

/// Fully positioned flyer content on the square logical box.
///
/// Produced by [`LayoutRenderer::layout`]; independent of the output size.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutBlock {
    pub size: f32,
    pub background: Rgb8,
    /// Padding box; everything but the background is clipped to it.
    pub content_box: BoxRect,
    pub logo: BoxRect,
    pub sections: Vec<LayoutSection>,
    /// Bottom edge of the last line box, before clipping.
    pub content_bottom: f32,
}

impl LayoutBlock {
    pub fn section(&self, kind: SectionKind) -> Option<&LayoutSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn overflows(&self) -> bool {
        self.content_bottom > self.content_box.bottom()
    }
}

/// Lays out [`FlyerContent`] on the fixed square authoring box and serializes it as SVG.
#[derive(Clone, Debug)]
pub struct LayoutRenderer {
    template: FlyerTemplate,
    logical_size: f32,
}

impl LayoutRenderer {
    pub fn new(template: FlyerTemplate, logical_size: f32) -> Self {
        Self {
            template,
            logical_size,
        }
    }

    pub fn template(&self) -> &FlyerTemplate {
        &self.template
    }

    pub fn logical_size(&self) -> f32 {
        self.logical_size
    }

    /// Position the logo and every text line. Missing fields become empty lines.
    ///
    /// `logo_aspect` is height / width of the logo that will be drawn.
    pub fn layout(&self, content: &FlyerContent, logo_aspect: f32) -> LayoutBlock {
        let t = &self.template;
        let inner = (self.logical_size - 2.0 * t.padding).max(0.0);
        let content_box = BoxRect {
            x: t.padding,
            y: t.padding,
            w: inner,
            h: inner,
        };
        let center_x = self.logical_size / 2.0;

        let logo_w = t.logo_width.min(inner);
        let logo_h = if logo_aspect.is_finite() && logo_aspect > 0.0 {
            logo_w * logo_aspect
        } else {
            0.0
        };
        let logo = BoxRect {
            x: center_x - logo_w / 2.0,
            y: t.padding,
            w: logo_w,
            h: logo_h,
        };

        let mut cursor = logo.bottom() + t.logo_margin_bottom;
        let mut content_bottom = logo.bottom();
        let mut sections = Vec::with_capacity(5);

        let mut flow = |kind: SectionKind, style: &SectionStyle, texts: &[&str]| {
            cursor += style.margin_top;
            let mut lines = Vec::new();
            for text in texts {
                for wrapped in wrap_text(text, inner, style.font_size, t.char_width_em) {
                    let line_box = style.line_box();
                    lines.push(TextLine {
                        text: wrapped,
                        top: cursor,
                        baseline: cursor + line_box / 2.0 + 0.35 * style.font_size,
                        font_size: style.font_size,
                        color: style.color,
                    });
                    cursor += line_box;
                    content_bottom = cursor;
                }
            }
            cursor += style.margin_bottom;
            sections.push(LayoutSection { kind, lines });
        };

        flow(SectionKind::Date, &t.date, &[content.date.as_str()]);
        flow(
            SectionKind::VenueName,
            &t.venue_name,
            &[content.venue_name.as_str()],
        );
        if content.city_state.is_empty() {
            flow(
                SectionKind::Address,
                &t.address,
                &[content.venue_address.as_str()],
            );
        } else {
            flow(
                SectionKind::Address,
                &t.address,
                &[content.venue_address.as_str(), content.city_state.as_str()],
            );
        }
        flow(SectionKind::ShowTime, &t.show_time, &[content.show_time.as_str()]);
        flow(
            SectionKind::EventType,
            &t.event_type,
            &[content.event_type.as_str()],
        );

        LayoutBlock {
            size: self.logical_size,
            background: t.background,
            content_box,
            logo,
            sections,
            content_bottom,
        }
    }

    /// Serialize a block as a standalone SVG document.
    ///
    /// Raster logos are not embedded; they are composited after the SVG pass.
    pub fn block_svg(&self, block: &LayoutBlock, logo: &PreparedLogo) -> String {
        let t = &self.template;
        let size = block.size;
        let cb = block.content_box;

        let mut svg = String::with_capacity(2048);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        );
        let _ = write!(
            svg,
            r#"<defs><clipPath id="content"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
            cb.x, cb.y, cb.w, cb.h
        );
        let _ = write!(
            svg,
            r#"<rect width="{size}" height="{size}" fill="{}"/>"#,
            block.background.to_hex()
        );
        let _ = write!(
            svg,
            r#"<g clip-path="url(#content)" font-family="{}" font-weight="{}" text-anchor="middle">"#,
            escape_xml(&t.font_family),
            t.font_weight
        );

        if matches!(logo, PreparedLogo::Builtin) {
            let l = block.logo;
            svg.push_str(&builtin_emblem_svg(l.x, l.y, l.w, l.h, t.accent));
        }

        let center_x = size / 2.0;
        for line in block.sections.iter().flat_map(|s| &s.lines) {
            if line.text.is_empty() {
                continue;
            }
            let _ = write!(
                svg,
                r#"<text x="{center_x}" y="{:.2}" font-size="{}" fill="{}">{}</text>"#,
                line.baseline,
                line.font_size,
                line.color.to_hex(),
                escape_xml(&line.text)
            );
        }

        svg.push_str("</g></svg>");
        svg
    }

    /// Standalone SVG preview using the built-in logo.
    pub fn to_svg(&self, content: &FlyerContent) -> String {
        let logo = PreparedLogo::Builtin;
        let block = self.layout(content, logo.aspect());
        self.block_svg(&block, &logo)
    }
}

/// Greedy word wrap against an estimated advance of `char_width_em * font_size` per char.
///
/// A word wider than the line stays on its own line. Empty input yields one empty line.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32, char_width_em: f32) -> Vec<String> {
    let advance = (font_size * char_width_em).max(f32::EPSILON);
    let max_chars = ((max_width / advance).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = len;
        } else if current_len + 1 + len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = len;
        }
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/block.rs"]
mod tests;
