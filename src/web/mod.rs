// Web server module
// Serves the image resize endpoint over HTTP

mod app;
mod error;
mod extract_request_data;
mod handlers;
mod headers;
mod listeners;

pub use app::create_router;
pub use listeners::create_listener;

// Default limit for the whole multipart request body
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024 * 1024; // 100MB

/// How rejected requests are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StatusPolicy {
    /// Every input error is a 200 with a plain-text message, as existing clients expect.
    #[default]
    Legacy,
    /// Input errors use 4xx status codes. The message text is unchanged.
    Strict,
}

/// Immutable settings shared by every request, built once at startup.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub max_body_bytes: usize,
    pub status_policy: StatusPolicy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            status_policy: StatusPolicy::default(),
        }
    }
}
