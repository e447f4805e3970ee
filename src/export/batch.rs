use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{Cursor, Write as _};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;

use crate::export::clock::ExportClock;
use crate::export::naming::{archive_file_name, batch_entry_name};
use crate::export::platform::Platform;
use crate::export::sink::DownloadSink;
use crate::foundation::error::{FlyerError, FlyerResult};
use crate::normalize::datetime::month_from_date;
use crate::render::raster::FlyerRasterizer;
use crate::show::mapper::FlyerContent;
use crate::show::record::ShowRecord;

/// Folder for shows whose date names no month.
pub const UNKNOWN_MONTH: &str = "Unknown Month";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOpts {
    /// Render shows concurrently, each on its own stage. Output is identical to sequential mode.
    pub parallel: bool,
    /// Worker count for parallel mode (`None` = rayon default).
    pub threads: Option<usize>,
}

/// One planned archive member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Month folder (`"August"`, or [`UNKNOWN_MONTH`]).
    pub folder: String,
    pub file_name: String,
    /// Index of the source show in the batch input.
    pub show_index: usize,
}

impl ArchiveEntry {
    /// `folder/file_name` inside the archive.
    pub fn path(&self) -> String {
        format!("{}/{}", self.folder, self.file_name)
    }
}

/// What a batch will write, decided before anything is rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    /// Entries in archive order.
    pub entries: Vec<ArchiveEntry>,
    pub skipped_undated: usize,
    pub skipped_duplicate: usize,
    /// Later shows that mapped to an existing archive path and took its place.
    pub replaced: usize,
}

impl ArchiveManifest {
    /// Month folder -> file names, in archive order within each folder.
    pub fn by_month(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut out: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for e in &self.entries {
            out.entry(e.folder.as_str())
                .or_default()
                .push(e.file_name.as_str());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decide folder and file name for every show.
///
/// Shows with an empty date are skipped, as is any later show repeating an earlier
/// `(date, venue name)` pair. A show landing on an already planned path replaces that entry in
/// place.
pub fn plan_batch(shows: &[ShowRecord], platform: Platform) -> ArchiveManifest {
    let mut manifest = ArchiveManifest::default();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut slot_by_path: HashMap<String, usize> = HashMap::new();

    for (show_index, show) in shows.iter().enumerate() {
        let date = show.date();
        let venue_name = show.venue_name();

        if date.is_empty() {
            tracing::debug!(show_index, "skipping show without a date");
            manifest.skipped_undated += 1;
            continue;
        }
        if !seen.insert((date, venue_name)) {
            tracing::debug!(show_index, date, venue_name, "skipping duplicate show");
            manifest.skipped_duplicate += 1;
            continue;
        }

        let folder = match month_from_date(date) {
            Some(month) => month.to_owned(),
            None => {
                tracing::warn!(show_index, date, "no month in date, filing under '{UNKNOWN_MONTH}'");
                UNKNOWN_MONTH.to_owned()
            }
        };
        let entry = ArchiveEntry {
            folder,
            file_name: batch_entry_name(venue_name, date, platform),
            show_index,
        };

        match slot_by_path.get(&entry.path()) {
            Some(&slot) => {
                tracing::debug!(show_index, path = %entry.path(), "replacing earlier entry");
                manifest.entries[slot] = entry;
                manifest.replaced += 1;
            }
            None => {
                slot_by_path.insert(entry.path(), manifest.entries.len());
                manifest.entries.push(entry);
            }
        }
    }
    manifest
}

/// Outcome of a delivered batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchReport {
    pub archive_name: String,
    /// Archive paths written, in order.
    pub entries: Vec<String>,
    pub skipped_undated: usize,
    pub skipped_duplicate: usize,
    pub replaced: usize,
    pub archive_bytes: usize,
}

/// Render every planned show at the platform size and deliver one zip archive.
///
/// All or nothing: the first failing show aborts the batch and the sink is never called.
#[tracing::instrument(skip_all, fields(platform = %platform, shows = shows.len(), parallel = opts.parallel))]
pub fn export_all_flyers<R>(
    rasterizer: &R,
    shows: &[ShowRecord],
    platform: Platform,
    opts: &BatchOpts,
    clock: &dyn ExportClock,
    sink: &mut dyn DownloadSink,
) -> FlyerResult<BatchReport>
where
    R: FlyerRasterizer + ?Sized,
{
    let manifest = plan_batch(shows, platform);
    let (width, height) = platform.default_size();

    let render_one = |entry: &ArchiveEntry| -> FlyerResult<Vec<u8>> {
        let content = FlyerContent::from_record(&shows[entry.show_index]);
        let raster = rasterizer.rasterize(&content, width, height)?;
        raster.encode_png()
    };

    let mut writer = ArchiveWriter::new();
    if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        let pngs = pool.install(|| {
            manifest
                .entries
                .par_iter()
                .map(render_one)
                .collect::<FlyerResult<Vec<_>>>()
        })?;
        for (entry, png) in manifest.entries.iter().zip(&pngs) {
            writer.add(entry, png)?;
        }
    } else {
        for entry in &manifest.entries {
            let png = render_one(entry)?;
            writer.add(entry, &png)?;
        }
    }
    let archive = writer.finish()?;

    let archive_name = archive_file_name(platform, clock.now());
    sink.deliver(&archive_name, &archive)?;

    tracing::info!(
        archive = %archive_name,
        entries = manifest.len(),
        skipped_undated = manifest.skipped_undated,
        skipped_duplicate = manifest.skipped_duplicate,
        bytes = archive.len(),
        "batch export complete"
    );

    Ok(BatchReport {
        archive_name,
        entries: manifest.entries.iter().map(ArchiveEntry::path).collect(),
        skipped_undated: manifest.skipped_undated,
        skipped_duplicate: manifest.skipped_duplicate,
        replaced: manifest.replaced,
        archive_bytes: archive.len(),
    })
}

/// Deflate-compressed zip with one directory entry per month, written before its first file.
struct ArchiveWriter {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    folders: HashSet<String>,
}

impl ArchiveWriter {
    fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
            folders: HashSet::new(),
        }
    }

    fn add(&mut self, entry: &ArchiveEntry, png: &[u8]) -> FlyerResult<()> {
        if !self.folders.contains(&entry.folder) {
            self.zip
                .add_directory(format!("{}/", entry.folder), self.options)
                .map_err(|e| FlyerError::archive(format!("add folder '{}': {e}", entry.folder)))?;
            self.folders.insert(entry.folder.clone());
        }
        let path = entry.path();
        self.zip
            .start_file(path.as_str(), self.options)
            .map_err(|e| FlyerError::archive(format!("start '{path}': {e}")))?;
        self.zip
            .write_all(png)
            .map_err(|e| FlyerError::archive(format!("write '{path}': {e}")))?;
        tracing::debug!(path = %path, bytes = png.len(), "archive entry added");
        Ok(())
    }

    fn finish(self) -> FlyerResult<Vec<u8>> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| FlyerError::archive(format!("finish archive: {e}")))?;
        Ok(cursor.into_inner())
    }
}

fn build_thread_pool(threads: Option<usize>) -> FlyerResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FlyerError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FlyerError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/batch.rs"]
mod tests;
