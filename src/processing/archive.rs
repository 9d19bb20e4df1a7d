use std::io::{Cursor, Write};
use thiserror::Error;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use super::batch::ProcessedEntry;

/// Download name used for the archive returned to clients.
pub const ARCHIVE_FILENAME: &str = "resized_images.zip";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to write zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Failed to write zip entry: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory collection of processed images, keyed by filename.
///
/// Entries keep the order in which their filename was first inserted.
/// Inserting a filename that is already present replaces its contents.
#[derive(Debug, Default)]
pub struct ResultArchive {
    entries: Vec<ProcessedEntry>,
}

impl ResultArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning true if it replaced an earlier one.
    pub fn insert(&mut self, entry: ProcessedEntry) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.filename == entry.filename)
        {
            Some(existing) => {
                existing.data = entry.data;
                true
            }
            None => {
                self.entries.push(entry);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.filename.as_str())
    }

    /// Serializes all entries into a deflate-compressed ZIP container.
    pub fn finish(self) -> Result<Vec<u8>, ArchiveError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in self.entries {
            writer.start_file(entry.filename, options)?;
            writer.write_all(&entry.data)?;
        }

        Ok(writer.finish()?.into_inner())
    }
}
