use crate::export::clock::ExportClock;
use crate::export::naming::single_file_name;
use crate::export::platform::ExportSpec;
use crate::export::sink::DownloadSink;
use crate::foundation::error::FlyerResult;
use crate::render::raster::FlyerRasterizer;
use crate::show::mapper::FlyerContent;

/// Render one flyer at `spec` and deliver it as a PNG.
///
/// Returns the delivered file name. On any failure nothing reaches the sink.
#[tracing::instrument(
    skip_all,
    fields(venue = %content.venue_name, platform = %spec.platform, w = spec.width, h = spec.height)
)]
pub fn export_single_flyer<R>(
    rasterizer: &R,
    content: &FlyerContent,
    spec: &ExportSpec,
    clock: &dyn ExportClock,
    sink: &mut dyn DownloadSink,
) -> FlyerResult<String>
where
    R: FlyerRasterizer + ?Sized,
{
    spec.validate(rasterizer.max_dim())?;
    let raster = rasterizer.rasterize(content, spec.width, spec.height)?;
    let png = raster.encode_png()?;

    let file_name = single_file_name(content, spec.platform, clock.now());
    sink.deliver(&file_name, &png)?;
    Ok(file_name)
}

#[cfg(test)]
#[path = "../../tests/unit/export/single.rs"]
mod tests;
