use axum::http;
use headers::{Header, HeaderName, HeaderValue};

pub static X_FILENAME: HeaderName = HeaderName::from_static("x-filename");

/// `x-filename`, readable by browser scripts once exposed through CORS.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct XFilename(pub String);

impl Header for XFilename {
    fn name() -> &'static HeaderName {
        &X_FILENAME
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let filename = value.to_str().map_err(|_| headers::Error::invalid())?.trim();
        if filename.is_empty() {
            return Err(headers::Error::invalid());
        }

        Ok(XFilename(filename.to_string()))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(value));
        }
    }
}

/// `Content-Disposition: attachment; filename="..."`
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Attachment {
    pub filename: String,
}

impl Header for Attachment {
    fn name() -> &'static HeaderName {
        &http::header::CONTENT_DISPOSITION
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let value = value.to_str().map_err(|_| headers::Error::invalid())?;

        let mut parts = value.split(';').map(str::trim);
        if !parts
            .next()
            .is_some_and(|kind| kind.eq_ignore_ascii_case("attachment"))
        {
            return Err(headers::Error::invalid());
        }

        let filename = parts
            .filter_map(|param| param.split_once('='))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case("filename"))
            .map(|(_, value)| unquote(value.trim()))
            .ok_or_else(headers::Error::invalid)?;

        Ok(Attachment { filename })
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        let escaped = self.filename.replace('\\', "\\\\").replace('"', "\\\"");
        let value = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", escaped));
        if let Ok(value) = value {
            values.extend(std::iter::once(value));
        }
    }
}

fn unquote(value: &str) -> String {
    match value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_string(),
    }
}
