use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{FlyerError, FlyerResult};
use crate::layout::logo::LogoSource;
use crate::layout::template::FlyerTemplate;
use crate::render::raster::RasterOpts;

/// Everything that shapes a flyer besides the show itself.
///
/// Loaded from JSON; every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerConfig {
    pub raster: RasterOpts,
    pub template: FlyerTemplate,
    pub logo: LogoSource,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
}

impl FlyerConfig {
    pub fn from_json(json: &str) -> FlyerResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| FlyerError::serde(format!("flyer config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config file. Relative logo and font paths resolve against the file's directory.
    pub fn load(path: &Path) -> FlyerResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg = Self::from_json(&text)?;

        if let Some(base) = path.parent() {
            if let LogoSource::File(p) = &mut cfg.logo
                && p.is_relative()
            {
                *p = base.join(&*p);
            }
            for dir in &mut cfg.font_dirs {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> FlyerResult<()> {
        self.raster.validate()?;
        self.template.validate()?;
        self.template.check_fits(self.raster.logical_size as f32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
