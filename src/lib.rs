//! flyerpress turns show listings into promotional flyer images.
//!
//! A show record (from a REST payload or a spreadsheet import) becomes a PNG of any requested size,
//! or many shows become one zip archive with a folder per calendar month.
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: JSON or CSV -> [`ShowRecord`] (canonical or legacy shape, explicitly tagged)
//! 2. **Map**: `ShowRecord -> FlyerContent` (total: malformed fields fall back to display defaults)
//! 3. **Lay out**: `FlyerContent -> LayoutBlock` on a fixed 300x300 logical box, serialized as SVG
//! 4. **Rasterize**: SVG -> supersampled stage (`resvg`) -> bicubic scale-to-fit onto the output
//!    canvas, background filled first
//! 5. **Export**: one PNG ([`export_single_flyer`]) or a month-partitioned zip
//!    ([`export_all_flyers`]), handed to a [`DownloadSink`]
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Best effort on data, strict on resources**: bad dates or addresses never fail; a logo that
//!   cannot be loaded fails the render, and one failed show aborts a whole batch.
//! - **Isolated staging**: every render owns its stage, so batches may render in parallel and
//!   still produce byte-identical archives.
#![forbid(unsafe_code)]

mod export;
mod foundation;
mod layout;
mod normalize;
mod render;
mod show;

pub use export::batch::{
    ArchiveEntry, ArchiveManifest, BatchOpts, BatchReport, UNKNOWN_MONTH, export_all_flyers,
    plan_batch,
};
pub use export::clock::{ExportClock, FixedClock, SystemClock};
pub use export::naming::{
    archive_file_name, batch_entry_name, sanitize_component, single_file_name,
};
pub use export::platform::{ExportSpec, Platform};
pub use export::single::export_single_flyer;
pub use export::sink::{DirSink, DownloadSink, InMemorySink};
pub use foundation::color::Rgb8;
pub use foundation::config::FlyerConfig;
pub use foundation::error::{FlyerError, FlyerResult};
pub use layout::block::{
    BoxRect, LayoutBlock, LayoutRenderer, LayoutSection, SectionKind, TextLine, wrap_text,
};
pub use layout::logo::{LogoSource, PreparedLogo};
pub use layout::template::{FlyerTemplate, SectionStyle};
pub use normalize::address::{VenueAddress, parse_venue_address};
pub use normalize::datetime::{MONTH_NAMES, TBD, format_date, format_time, month_from_date};
pub use render::fonts::{FONT_DIR_ENV, FontSet};
pub use render::raster::{
    DEFAULT_MAX_DIM, FitPlacement, FlyerRasterizer, RasterOpts, RasterResult, Rasterizer,
};
pub use render::staging::{Stage, StagingArea, StagingStats};
pub use show::ingest::{load_api_shows, load_csv_shows};
pub use show::mapper::{DEFAULT_EVENT_TYPE, DEFAULT_VENUE_NAME, FlyerContent};
pub use show::record::{CanonicalShow, LegacyShow, ShowRecord};
