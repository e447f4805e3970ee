use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extra font directory picked up by [`FontSet::load`].
pub const FONT_DIR_ENV: &str = "FLYERPRESS_FONT_DIR";

/// Shared font database used to shape flyer text.
#[derive(Clone)]
pub struct FontSet {
    db: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl FontSet {
    /// System fonts, then `extra_dirs`, then `$FLYERPRESS_FONT_DIR` if set.
    pub fn load(extra_dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        for dir in extra_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        if let Some(dir) = std::env::var_os(FONT_DIR_ENV) {
            load_fonts_from_dir(&mut db, Path::new(&dir));
        }

        tracing::debug!(faces = db.len(), "font database ready");
        Self { db: Arc::new(db) }
    }

    /// Only the fonts found in `dirs`; no system lookup.
    pub fn from_dirs(dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        for dir in dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        Self { db: Arc::new(db) }
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    pub(crate) fn svg_options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: self.db.clone(),
            font_resolver: make_svg_font_resolver(),
            ..Default::default()
        }
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "font dir not readable, skipped");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if !matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc") {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

/// Resolve the CSS family list in order, then fall back to generic families and finally to any
/// loaded face, so a missing brand font never fails the render.
fn make_svg_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;
    use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families: Vec<Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => Family::Serif,
                    usvg::FontFamily::SansSerif => Family::SansSerif,
                    usvg::FontFamily::Cursive => Family::Cursive,
                    usvg::FontFamily::Fantasy => Family::Fantasy,
                    usvg::FontFamily::Monospace => Family::Monospace,
                    usvg::FontFamily::Named(s) => Family::Name(s),
                })
                .collect();
            families.extend([Family::SansSerif, Family::Serif, Family::Monospace]);

            let stretch = match font.stretch() {
                usvg::FontStretch::UltraCondensed => Stretch::UltraCondensed,
                usvg::FontStretch::ExtraCondensed => Stretch::ExtraCondensed,
                usvg::FontStretch::Condensed => Stretch::Condensed,
                usvg::FontStretch::SemiCondensed => Stretch::SemiCondensed,
                usvg::FontStretch::Normal => Stretch::Normal,
                usvg::FontStretch::SemiExpanded => Stretch::SemiExpanded,
                usvg::FontStretch::Expanded => Stretch::Expanded,
                usvg::FontStretch::ExtraExpanded => Stretch::ExtraExpanded,
                usvg::FontStretch::UltraExpanded => Stretch::UltraExpanded,
            };
            let style = match font.style() {
                usvg::FontStyle::Normal => Style::Normal,
                usvg::FontStyle::Italic => Style::Italic,
                usvg::FontStyle::Oblique => Style::Oblique,
            };

            let query = Query {
                families: &families,
                weight: Weight(font.weight()),
                stretch,
                style,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;
