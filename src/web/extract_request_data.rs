use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use tracing::debug;

use super::error::ApiError;
use crate::processing::UploadedFile;

pub const FILES_FIELD: &str = "files";
pub const MAX_SIZE_FIELD: &str = "max_size";
pub const QUALITY_FIELD: &str = "quality";

/// Everything the resize endpoint reads from the multipart body.
#[derive(Debug, Default)]
pub struct UploadBatch {
    /// File parts of the `files` field, in submission order.
    pub files: Vec<UploadedFile>,
    pub max_size: Option<String>,
    pub quality: Option<String>,
}

/// Reads the whole multipart body into memory.
///
/// A part counts as a file when it carries a filename, even an empty one.
/// For repeated text fields the first value wins. A body that is not
/// declared as multipart form data carries no uploads and yields an empty batch.
pub async fn extract_upload_batch(request: Request) -> Result<UploadBatch, ApiError> {
    if !is_multipart_form(&request) {
        debug!("Request body is not multipart/form-data, no uploads read");
        return Ok(UploadBatch::default());
    }

    let mut multipart = Multipart::from_request(request, &()).await?;

    let mut batch = UploadBatch::default();
    let mut ignored_fields = 0;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        match file_name {
            Some(filename) if field_name == FILES_FIELD => {
                let data = field.bytes().await?.to_vec();
                debug!("Received file '{}' ({} bytes)", filename, data.len());
                batch.files.push(UploadedFile { filename, data });
            }
            Some(filename) => {
                debug!(
                    "Ignoring file '{}' in multipart field: {}",
                    filename, field_name
                );
                ignored_fields += 1;
            }
            None => {
                let slot = match field_name.as_str() {
                    MAX_SIZE_FIELD => &mut batch.max_size,
                    QUALITY_FIELD => &mut batch.quality,
                    _ => {
                        debug!("Ignoring multipart field: {}", field_name);
                        ignored_fields += 1;
                        continue;
                    }
                };
                let value = field.text().await?;
                if slot.is_none() {
                    *slot = Some(value);
                }
            }
        }
    }

    if ignored_fields > 0 {
        debug!(
            "Ignored {} unrecognized fields in multipart request",
            ignored_fields
        );
    }

    Ok(batch)
}

fn is_multipart_form(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|content_type| {
            content_type.type_() == mime::MULTIPART && content_type.subtype() == mime::FORM_DATA
        })
}


#[cfg(test)]
mod tests {
    use super::test_multipart::{Part, request};
    use super::*;
    use axum::{body::Body, http::header};

    #[tokio::test]
    async fn test_collects_files_and_fields() {
        let req = request(
            "/",
            &[
                Part::File("files", "a.png", b"first".to_vec()),
                Part::Text("max_size", "640"),
                Part::File("files", "b.jpg", b"second".to_vec()),
                Part::Text("quality", "80"),
            ],
        );

        let batch = extract_upload_batch(req).await.unwrap();
        assert_eq!(batch.files.len(), 2);
        assert_eq!(batch.files[0].filename, "a.png");
        assert_eq!(batch.files[0].data, b"first");
        assert_eq!(batch.files[1].filename, "b.jpg");
        assert_eq!(batch.max_size.as_deref(), Some("640"));
        assert_eq!(batch.quality.as_deref(), Some("80"));
    }

    #[tokio::test]
    async fn test_first_text_value_wins() {
        let req = request(
            "/",
            &[
                Part::Text("max_size", "100"),
                Part::Text("max_size", "200"),
            ],
        );

        let batch = extract_upload_batch(req).await.unwrap();
        assert_eq!(batch.max_size.as_deref(), Some("100"));
        assert!(batch.quality.is_none());
        assert!(batch.files.is_empty());
    }

    #[tokio::test]
    async fn test_other_fields_are_ignored() {
        let req = request(
            "/",
            &[
                Part::File("avatar", "me.png", b"x".to_vec()),
                Part::Text("files", "not a file"),
                Part::Text("comment", "hello"),
            ],
        );

        let batch = extract_upload_batch(req).await.unwrap();
        assert!(batch.files.is_empty());
        assert!(batch.max_size.is_none());
    }

    #[tokio::test]
    async fn test_non_multipart_body_has_no_uploads() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let batch = extract_upload_batch(req).await.unwrap();
        assert!(batch.files.is_empty());
        assert!(batch.max_size.is_none());
    }

    #[tokio::test]
    async fn test_missing_content_type_has_no_uploads() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("files=a.png"))
            .unwrap();

        let batch = extract_upload_batch(req).await.unwrap();
        assert!(batch.files.is_empty());
    }

    #[tokio::test]
    async fn test_multipart_without_boundary_is_rejected() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "multipart/form-data")
            .body(Body::from("--x\r\n"))
            .unwrap();

        let err = extract_upload_batch(req).await.unwrap_err();
        assert!(matches!(err, ApiError::UnreadableUpload { .. }));
    }
}
