use anyhow::Context as _;
use image::ImageEncoder as _;
use kurbo::Affine;
use resvg::tiny_skia;
use serde::{Deserialize, Serialize};

use crate::foundation::config::FlyerConfig;
use crate::foundation::error::{FlyerError, FlyerResult};
use crate::layout::block::{BoxRect, LayoutBlock, LayoutRenderer};
use crate::layout::logo::{LogoSource, PreparedLogo};
use crate::layout::template::FlyerTemplate;
use crate::render::fonts::FontSet;
use crate::render::staging::{StagingArea, StagingStats};
use crate::show::mapper::FlyerContent;

/// Largest output width or height accepted by default.
pub const DEFAULT_MAX_DIM: u32 = 16_384;

/// Rasterization tuning. Defaults reproduce the house flyer look.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterOpts {
    /// Side of the square authoring box, in logical units.
    pub logical_size: u32,
    /// Stage resolution multiplier over `logical_size`.
    pub supersample: u32,
    /// Leftward shift of the placed content, in logical units (scaled with the content).
    pub nudge_left: f32,
    /// Largest accepted output width or height.
    pub max_dim: u32,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            logical_size: 300,
            supersample: 8,
            nudge_left: 20.0,
            max_dim: DEFAULT_MAX_DIM,
        }
    }
}

impl RasterOpts {
    pub fn validate(&self) -> FlyerResult<()> {
        if self.logical_size == 0 {
            return Err(FlyerError::validation("raster logical_size must be > 0"));
        }
        if !(1..=16).contains(&self.supersample) {
            return Err(FlyerError::validation(
                "raster supersample must be within 1..=16",
            ));
        }
        if !self.nudge_left.is_finite() {
            return Err(FlyerError::validation("raster nudge_left must be finite"));
        }
        if self.max_dim == 0 {
            return Err(FlyerError::validation("raster max_dim must be > 0"));
        }
        Ok(())
    }

    /// Side of the supersampled stage in pixels.
    pub fn stage_px(&self) -> u32 {
        self.logical_size.saturating_mul(self.supersample)
    }

    pub fn check_output_size(&self, width: u32, height: u32) -> FlyerResult<()> {
        if width == 0 || height == 0 {
            return Err(FlyerError::validation(format!(
                "output size must be non-zero, got {width}x{height}"
            )));
        }
        if width > self.max_dim || height > self.max_dim {
            return Err(FlyerError::validation(format!(
                "output size {width}x{height} exceeds max {0}x{0}",
                self.max_dim
            )));
        }
        Ok(())
    }
}

/// Where the logical square lands on the output canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitPlacement {
    /// Output pixels per logical unit.
    pub scale: f64,
    /// Side of the placed square in output pixels.
    pub side: f64,
    pub x0: f64,
    pub y0: f64,
}

impl FitPlacement {
    /// Uniform scale-to-fit, centered, then shifted left by `nudge_left` logical units.
    pub fn compute(logical_size: u32, width: u32, height: u32, nudge_left: f32) -> Self {
        let logical = logical_size as f64;
        let scale = (width as f64 / logical).min(height as f64 / logical);
        let side = logical * scale;
        Self {
            scale,
            side,
            x0: (width as f64 - side) / 2.0 - nudge_left as f64 * scale,
            y0: (height as f64 - side) / 2.0,
        }
    }

    /// Logical units to output pixels.
    pub fn logical_to_output(&self) -> Affine {
        Affine::translate((self.x0, self.y0)) * Affine::scale(self.scale)
    }

    /// Stage pixels (`stage_px` per side) to output pixels.
    pub fn stage_to_output(&self, stage_px: u32) -> Affine {
        Affine::translate((self.x0, self.y0)) * Affine::scale(self.side / stage_px as f64)
    }
}

fn to_skia(affine: Affine) -> tiny_skia::Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    tiny_skia::Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// A finished flyer bitmap: straight (non-premultiplied) RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterResult {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterResult {
    /// Wrap straight RGBA8 pixels; the buffer must hold exactly `width * height` pixels.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> FlyerResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(FlyerError::render(format!(
                "pixel buffer of {} bytes does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn into_image(self) -> FlyerResult<image::RgbaImage> {
        let (w, h) = (self.width, self.height);
        image::RgbaImage::from_raw(w, h, self.data)
            .ok_or_else(|| FlyerError::render(format!("pixel buffer does not match {w}x{h}")))
    }

    pub fn encode_png(&self) -> FlyerResult<Vec<u8>> {
        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                &self.data,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .context("encode png")?;
        Ok(out)
    }

    fn from_pixmap(pixmap: &tiny_skia::Pixmap) -> Self {
        let mut data = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            data,
        }
    }
}

/// Turns flyer content into a bitmap of an exact size.
///
/// Implementations must be shareable across threads for parallel batch export.
pub trait FlyerRasterizer: Sync {
    fn rasterize(&self, content: &FlyerContent, width: u32, height: u32)
    -> FlyerResult<RasterResult>;

    /// Largest output width or height this rasterizer accepts.
    fn max_dim(&self) -> u32 {
        DEFAULT_MAX_DIM
    }
}

/// CPU rasterizer: SVG layout through `resvg` onto a supersampled stage, then a bicubic
/// scale-to-fit onto the output canvas.
#[derive(Debug)]
pub struct Rasterizer {
    opts: RasterOpts,
    layout: LayoutRenderer,
    logo: LogoSource,
    fonts: FontSet,
    staging: StagingArea,
}

impl Rasterizer {
    /// Build from a config, loading system fonts plus the configured font directories.
    pub fn new(config: &FlyerConfig) -> FlyerResult<Self> {
        let fonts = FontSet::load(&config.font_dirs);
        Self::with_fonts(config, fonts)
    }

    pub fn with_fonts(config: &FlyerConfig, fonts: FontSet) -> FlyerResult<Self> {
        config.validate()?;
        Ok(Self {
            opts: config.raster.clone(),
            layout: LayoutRenderer::new(
                config.template.clone(),
                config.raster.logical_size as f32,
            ),
            logo: config.logo.clone(),
            fonts,
            staging: StagingArea::new(),
        })
    }

    pub fn opts(&self) -> &RasterOpts {
        &self.opts
    }

    pub fn template(&self) -> &FlyerTemplate {
        self.layout.template()
    }

    pub fn layout_renderer(&self) -> &LayoutRenderer {
        &self.layout
    }

    pub fn staging_stats(&self) -> StagingStats {
        self.staging.stats()
    }

    fn draw_stage(
        &self,
        block: &LayoutBlock,
        logo: &PreparedLogo,
        stage: &mut tiny_skia::Pixmap,
    ) -> FlyerResult<()> {
        let svg = self.layout.block_svg(block, logo);
        let tree = usvg::Tree::from_str(&svg, &self.fonts.svg_options())
            .map_err(|e| FlyerError::render(format!("parse flyer layout svg: {e}")))?;

        let ss = self.opts.supersample as f32;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(ss, ss),
            &mut stage.as_mut(),
        );

        if let PreparedLogo::Raster(img) = logo {
            let BoxRect { x, y, w, h } = block.logo;
            let ss = ss as f64;
            let place = Affine::translate((x as f64 * ss, y as f64 * ss))
                * Affine::scale_non_uniform(
                    w as f64 * ss / img.width() as f64,
                    h as f64 * ss / img.height() as f64,
                );
            stage.draw_pixmap(
                0,
                0,
                tiny_skia::Pixmap::as_ref(img),
                &tiny_skia::PixmapPaint {
                    quality: tiny_skia::FilterQuality::Bicubic,
                    ..Default::default()
                },
                to_skia(place),
                None,
            );
        }
        Ok(())
    }

    fn content_mask(
        &self,
        block: &LayoutBlock,
        placement: &FitPlacement,
        width: u32,
        height: u32,
    ) -> FlyerResult<tiny_skia::Mask> {
        let cb = block.content_box;
        let rect = tiny_skia::Rect::from_xywh(cb.x, cb.y, cb.w, cb.h)
            .ok_or_else(|| FlyerError::render("degenerate content box"))?;
        let mut mask = tiny_skia::Mask::new(width, height)
            .ok_or_else(|| FlyerError::render("failed to allocate content mask"))?;
        mask.fill_path(
            &tiny_skia::PathBuilder::from_rect(rect),
            tiny_skia::FillRule::Winding,
            false,
            to_skia(placement.logical_to_output()),
        );
        Ok(mask)
    }
}

impl FlyerRasterizer for Rasterizer {
    fn max_dim(&self) -> u32 {
        self.opts.max_dim
    }

    #[tracing::instrument(skip(self, content), fields(venue = %content.venue_name))]
    fn rasterize(
        &self,
        content: &FlyerContent,
        width: u32,
        height: u32,
    ) -> FlyerResult<RasterResult> {
        self.opts.check_output_size(width, height)?;

        let logo = self.logo.load()?;
        let block = self.layout.layout(content, logo.aspect());
        if block.overflows() {
            tracing::debug!(
                bottom = block.content_bottom,
                "flyer content overflows the padding box and is clipped"
            );
        }

        let stage_px = self.opts.stage_px();
        let mut stage = self.staging.acquire(stage_px)?;
        self.draw_stage(&block, &logo, stage.pixmap_mut())?;

        let placement = FitPlacement::compute(
            self.opts.logical_size,
            width,
            height,
            self.opts.nudge_left,
        );
        let mask = self.content_mask(&block, &placement, width, height)?;

        let mut canvas = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| FlyerError::render("failed to allocate output canvas"))?;
        canvas.fill(block.background.to_skia());
        canvas.draw_pixmap(
            0,
            0,
            stage.pixmap().as_ref(),
            &tiny_skia::PixmapPaint {
                quality: tiny_skia::FilterQuality::Bicubic,
                ..Default::default()
            },
            to_skia(placement.stage_to_output(stage_px)),
            Some(&mask),
        );
        drop(stage);

        Ok(RasterResult::from_pixmap(&canvas))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
