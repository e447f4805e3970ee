use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use resvg::tiny_skia;

use crate::foundation::error::{FlyerError, FlyerResult};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StagingStats {
    /// Stages currently checked out.
    pub live: usize,
    /// Highest number of simultaneously live stages.
    pub peak: usize,
    /// Total stages handed out.
    pub acquired: u64,
    /// Total bytes allocated for stage bitmaps.
    pub alloc_bytes: u64,
}

/// Hands out one isolated supersampled bitmap per render.
///
/// Every [`Stage`] is released when dropped, on success and error paths alike, so
/// `stats().live` returns to zero once all renders have finished.
#[derive(Debug, Default)]
pub struct StagingArea {
    live: AtomicUsize,
    peak: AtomicUsize,
    acquired: AtomicU64,
    alloc_bytes: AtomicU64,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> StagingStats {
        StagingStats {
            live: self.live.load(Ordering::Acquire),
            peak: self.peak.load(Ordering::Acquire),
            acquired: self.acquired.load(Ordering::Acquire),
            alloc_bytes: self.alloc_bytes.load(Ordering::Acquire),
        }
    }

    /// Allocate a transparent `side x side` stage.
    pub fn acquire(&self, side: u32) -> FlyerResult<Stage<'_>> {
        let pixmap = tiny_skia::Pixmap::new(side, side).ok_or_else(|| {
            FlyerError::render(format!("failed to allocate {side}x{side} staging bitmap"))
        })?;

        let live = self.live.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak.fetch_max(live, Ordering::AcqRel);
        self.acquired.fetch_add(1, Ordering::AcqRel);
        self.alloc_bytes
            .fetch_add(pixmap.data().len() as u64, Ordering::AcqRel);

        Ok(Stage {
            area: self,
            pixmap,
        })
    }
}

/// A checked-out staging bitmap. Dropping it returns the slot to its [`StagingArea`].
pub struct Stage<'a> {
    area: &'a StagingArea,
    pixmap: tiny_skia::Pixmap,
}

impl Stage<'_> {
    pub fn side(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut tiny_skia::Pixmap {
        &mut self.pixmap
    }
}

impl Drop for Stage<'_> {
    fn drop(&mut self) {
        self.area.live.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/staging.rs"]
mod tests;
