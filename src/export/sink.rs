use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{FlyerError, FlyerResult};

/// Destination for a finished file. Exporters call [`DownloadSink::deliver`] exactly once on
/// success and never on failure.
pub trait DownloadSink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> FlyerResult<()>;
}

/// Writes delivered files into one directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
    delivered: Vec<PathBuf>,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            delivered: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order.
    pub fn delivered(&self) -> &[PathBuf] {
        &self.delivered
    }
}

fn check_file_name(file_name: &str) -> FlyerResult<()> {
    if file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\'])
    {
        return Err(FlyerError::validation(format!(
            "refusing to write '{file_name}': not a plain file name"
        )));
    }
    Ok(())
}

impl DownloadSink for DirSink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> FlyerResult<()> {
        check_file_name(file_name)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;

        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "delivered");
        self.delivered.push(path);
        Ok(())
    }
}

/// Keeps delivered files in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

impl DownloadSink for InMemorySink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> FlyerResult<()> {
        check_file_name(file_name)?;
        self.files.push((file_name.to_owned(), bytes.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
