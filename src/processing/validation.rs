use thiserror::Error;

/// File extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

pub const MAX_SIZE_LIMIT: u32 = 2048;
pub const QUALITY_LIMIT: u8 = 100;

/// Validated parameters applied to every file in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    /// Maximum length of the longer side, in pixels.
    pub max_size: u32,
    /// Encoder quality passed through to lossy formats.
    pub quality: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Max size not provided. Please specify a value.")]
    MaxSizeMissing,
    #[error("Invalid max_size value '{0}'. Please provide a valid number.")]
    MaxSizeNotNumeric(String),
    #[error("Max size cannot be greater than 2048")]
    MaxSizeTooLarge,
    #[error("Max size cannot be less than 1")]
    MaxSizeTooSmall,
    #[error("Quality not provided. Please specify a value.")]
    QualityMissing,
    #[error("Invalid quality value '{0}'. Please provide a valid number.")]
    QualityNotNumeric(String),
    #[error("Quality cannot be greater than 100")]
    QualityTooLarge,
    #[error("Quality cannot be less than 1")]
    QualityTooSmall,
}

/// Returns true when the text after the last `.` is an allowed image extension.
/// Names without a `.` are never allowed.
pub fn is_allowed_filename(filename: &str) -> bool {
    filename.rsplit_once('.').is_some_and(|(_, extension)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| extension.eq_ignore_ascii_case(allowed))
    })
}

/// Validates the raw `max_size` and `quality` form values.
/// `max_size` is checked first; the first problem found is returned.
pub fn validate_input(
    max_size: Option<&str>,
    quality: Option<&str>,
) -> Result<ResizeParams, ValidationError> {
    let max_size = match max_size.filter(|s| !s.is_empty()) {
        None => return Err(ValidationError::MaxSizeMissing),
        Some(raw) => parse_integer(raw)
            .ok_or_else(|| ValidationError::MaxSizeNotNumeric(raw.to_string()))?,
    };
    if max_size > i64::from(MAX_SIZE_LIMIT) {
        return Err(ValidationError::MaxSizeTooLarge);
    }
    if max_size < 1 {
        return Err(ValidationError::MaxSizeTooSmall);
    }

    let quality = match quality.filter(|s| !s.is_empty()) {
        None => return Err(ValidationError::QualityMissing),
        Some(raw) => parse_integer(raw)
            .ok_or_else(|| ValidationError::QualityNotNumeric(raw.to_string()))?,
    };
    if quality > i64::from(QUALITY_LIMIT) {
        return Err(ValidationError::QualityTooLarge);
    }
    if quality < 1 {
        return Err(ValidationError::QualityTooSmall);
    }

    // Both values are range checked above.
    Ok(ResizeParams {
        max_size: max_size as u32,
        quality: quality as u8,
    })
}

// Decimal integer with optional sign and surrounding whitespace.
// Values too large for i64 are reported as non-numeric.
fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
