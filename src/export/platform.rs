use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{FlyerError, FlyerResult};

/// Social platform label. Picks a conventional size; the label also ends up in file names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Instagram,
    Facebook,
    Custom,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Self::Instagram, Self::Facebook, Self::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Custom => "custom",
        }
    }

    /// `(width, height)` in pixels.
    pub fn default_size(self) -> (u32, u32) {
        match self {
            Self::Instagram | Self::Custom => (1080, 1080),
            Self::Facebook => (1200, 630),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = FlyerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                FlyerError::validation(format!(
                    "unknown platform '{s}' (expected instagram, facebook or custom)"
                ))
            })
    }
}

/// Requested output. `width`/`height` are authoritative; `platform` is only a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSpec {
    pub width: u32,
    pub height: u32,
    pub platform: Platform,
}

impl ExportSpec {
    pub fn new(width: u32, height: u32, platform: Platform) -> Self {
        Self {
            width,
            height,
            platform,
        }
    }

    pub fn for_platform(platform: Platform) -> Self {
        let (width, height) = platform.default_size();
        Self::new(width, height, platform)
    }

    /// Reject zero sizes and sizes beyond `max_dim` on either axis.
    pub fn validate(&self, max_dim: u32) -> FlyerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FlyerError::validation(format!(
                "export size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > max_dim || self.height > max_dim {
            return Err(FlyerError::validation(format!(
                "export size {}x{} exceeds max {max_dim}x{max_dim}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/platform.rs"]
mod tests;
