// Image processing pipeline for the resize service.
// Everything here is synchronous and free of HTTP concerns so it can run on
// the blocking thread pool and be tested directly.

pub mod archive;
pub mod batch;
pub mod codec;
pub mod dimensions;
pub mod validation;

pub use archive::ArchiveError;
pub use batch::{BatchError, UploadedFile, process_batch};
pub use validation::{ValidationError, validate_input};
