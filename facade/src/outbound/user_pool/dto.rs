//! DTOs for decoding provider failure bodies.
//!
//! Failure bodies carry the exception type in `__type`, sometimes prefixed
//! with a namespace and `#`, and the description in `message` or `Message`.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ErrorBodyDto {
    #[serde(rename = "__type")]
    pub(super) error_type: Option<String>,
    #[serde(alias = "Message")]
    pub(super) message: Option<String>,
}

impl ErrorBodyDto {
    /// Decode a failure body, tolerating non-JSON payloads.
    pub(super) fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Exception name without any namespace prefix.
    pub(super) fn exception_name(&self) -> Option<&str> {
        self.error_type
            .as_deref()
            .map(|raw| raw.rsplit_once('#').map_or(raw, |(_, name)| name))
            .filter(|name| !name.is_empty())
    }
}

/// Exception name from the `x-amzn-ErrorType` header, which may carry a
/// `:`-separated suffix such as a documentation URL.
pub(super) fn header_exception_name(raw: &str) -> Option<&str> {
    let name = raw.split_once(':').map_or(raw, |(name, _)| name).trim();
    (!name.is_empty()).then_some(name)
}
