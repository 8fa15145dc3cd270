//! Redirect target template.

use axum::http::HeaderValue;
use url::form_urlencoded;

use crate::error::ConfigError;

pub const STATUS_PLACEHOLDER: &str = "{status}";
pub const URL_PLACEHOLDER: &str = "{url}";

/// A redirect target with `{status}` and `{url}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTemplate {
    target: String,
}

impl RedirectTemplate {
    /// Validate a target template.
    ///
    /// The target must be non-empty and usable as a header value; substituted
    /// values are ASCII-safe, so a valid template always renders to a valid
    /// `Location`.
    pub fn new(target: impl Into<String>) -> Result<Self, ConfigError> {
        let target = target.into();
        if target.is_empty() {
            return Err(ConfigError::MissingTarget);
        }
        if HeaderValue::from_str(&target).is_err() {
            return Err(ConfigError::InvalidTarget(target));
        }
        Ok(Self { target })
    }

    pub fn as_str(&self) -> &str {
        &self.target
    }

    /// Substitute every placeholder occurrence.
    pub fn render(&self, status: u16, url: &str) -> String {
        self.target
            .replace(STATUS_PLACEHOLDER, &status.to_string())
            .replace(URL_PLACEHOLDER, &query_escape(url))
    }
}

/// Escape a string for use inside a URL query component.
pub fn query_escape(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
