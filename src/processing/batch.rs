use thiserror::Error;
use tracing::{debug, warn};

use super::{
    archive::ResultArchive,
    codec::{CodecError, DecodedImage},
    validation::{ResizeParams, is_allowed_filename},
};

/// One file part taken from the upload, in submission order.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// A successfully resized and re-encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedEntry {
    pub filename: String,
    pub data: Vec<u8>,
}

/// What happened to a single upload with an allowed extension.
#[derive(Debug)]
pub enum FileOutcome {
    Processed(ProcessedEntry),
    Skipped { filename: String, reason: CodecError },
}

/// Errors that abort the whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("File '{filename}' does not have an allowed image extension")]
    DisallowedExtension { filename: String },
}

/// Decodes, resizes and re-encodes a single upload.
pub fn process_file(file: UploadedFile, params: ResizeParams) -> FileOutcome {
    match DecodedImage::decode(&file.data) {
        Ok(decoded) => encode_file(file.filename, decoded, params),
        Err(reason) => FileOutcome::Skipped {
            filename: file.filename,
            reason,
        },
    }
}

/// Resizes an already decoded upload and writes it back in its own format.
pub fn encode_file(
    filename: String,
    decoded: DecodedImage,
    params: ResizeParams,
) -> FileOutcome {
    match decoded.fit_within(params.max_size).encode(params.quality) {
        Ok(data) => FileOutcome::Processed(ProcessedEntry { filename, data }),
        Err(reason) => FileOutcome::Skipped { filename, reason },
    }
}

/// Runs every upload through the pipeline in order and collects the results.
///
/// Uploads with an empty filename are ignored. A filename without an allowed
/// extension aborts the batch and drops everything processed so far. Files that
/// fail to decode or encode are logged and left out of the archive.
pub fn process_batch(
    files: Vec<UploadedFile>,
    params: ResizeParams,
) -> Result<ResultArchive, BatchError> {
    process_batch_with(files, params, process_file)
}

fn process_batch_with<F>(
    files: Vec<UploadedFile>,
    params: ResizeParams,
    mut process: F,
) -> Result<ResultArchive, BatchError>
where
    F: FnMut(UploadedFile, ResizeParams) -> FileOutcome,
{
    let mut archive = ResultArchive::new();

    for file in files {
        if file.filename.is_empty() {
            debug!("Ignoring upload slot without a filename");
            continue;
        }

        if !is_allowed_filename(&file.filename) {
            warn!(
                "Rejecting batch: '{}' is not an allowed image type",
                file.filename
            );
            return Err(BatchError::DisallowedExtension {
                filename: file.filename,
            });
        }

        match process(file, params) {
            FileOutcome::Processed(entry) => {
                debug!(
                    "Processed '{}' ({} bytes)",
                    entry.filename,
                    entry.data.len()
                );
                if archive.insert(entry) {
                    debug!("Replaced an earlier upload with the same filename");
                }
            }
            FileOutcome::Skipped { filename, reason } => {
                warn!("Skipping {}: {}", filename, reason);
            }
        }
    }

    Ok(archive)
}
