// API handlers for the web server

use super::{
    ServiceSettings,
    error::ApiError,
    extract_request_data::extract_upload_batch,
    headers::{Attachment, X_FILENAME, XFilename},
};
use crate::processing::{
    UploadedFile, archive::ARCHIVE_FILENAME, process_batch, validate_input,
    validation::ResizeParams,
};
use axum::{
    extract::{Request, State},
    http::header,
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use headers::AccessControlExposeHeaders;
use tracing::{debug, info, warn};
use uuid::Uuid;

const ZIP_CONTENT_TYPE: &str = "application/zip";

// --- POST /resizeimage ---
// Resizes every uploaded image and returns them together as a zip archive
pub async fn resize_images(
    State(settings): State<ServiceSettings>,
    request: Request,
) -> Response {
    let request_id = Uuid::new_v4();

    match build_archive(request_id, request).await {
        Ok(archive) => archive_response(archive),
        Err(err) => {
            warn!(
                "Resize request rejected: request_id={}, reason={}",
                request_id,
                err.details()
            );
            err.into_response_with(settings.status_policy)
        }
    }
}

async fn build_archive(request_id: Uuid, request: Request) -> Result<Vec<u8>, ApiError> {
    let batch = extract_upload_batch(request).await?;

    if batch.files.is_empty() {
        return Err(ApiError::NoFilesSelected);
    }

    let params = validate_input(batch.max_size.as_deref(), batch.quality.as_deref())?;

    info!(
        "Resize request: files={}, max_size={}, quality={}, request_id={}",
        batch.files.len(),
        params.max_size,
        params.quality,
        request_id
    );

    let files = batch.files;
    let (entry_count, archive) =
        tokio::task::spawn_blocking(move || process_and_pack(files, params))
            .await
            .map_err(|e| {
                ApiError::InternalServerError(format!("Image processing task failed: {}", e))
            })??;

    info!(
        "Resize completed: entries={}, archive_bytes={}, request_id={}",
        entry_count,
        archive.len(),
        request_id
    );

    Ok(archive)
}

// Runs on the blocking pool: decoding and encoding are CPU bound
fn process_and_pack(
    files: Vec<UploadedFile>,
    params: ResizeParams,
) -> Result<(usize, Vec<u8>), ApiError> {
    let archive = process_batch(files, params)?;
    if archive.is_empty() {
        debug!("No uploads could be processed");
    } else {
        debug!(
            "Archive entries: {:?}",
            archive.filenames().collect::<Vec<_>>()
        );
    }

    let entry_count = archive.len();
    Ok((entry_count, archive.finish()?))
}

fn archive_response(archive: Vec<u8>) -> Response {
    (
        [(header::CONTENT_TYPE, ZIP_CONTENT_TYPE)],
        TypedHeader(Attachment {
            filename: ARCHIVE_FILENAME.to_string(),
        }),
        TypedHeader(XFilename(ARCHIVE_FILENAME.to_string())),
        TypedHeader(
            std::iter::once(X_FILENAME.clone()).collect::<AccessControlExposeHeaders>(),
        ),
        archive,
    )
        .into_response()
}
