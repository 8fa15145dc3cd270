//! Writes the substitute redirect response.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Response, StatusCode, Uri};
use axum::response::IntoResponse;

use crate::error::{ConfigError, WriteError};
use crate::intercept::{ResponseRecorder, ResponseSink};
use crate::redirect::origin::{effective_url, UrlSource};
use crate::redirect::template::RedirectTemplate;

/// Body sent along with the redirect.
pub const REDIRECT_BODY: &[u8] = b"Redirecting";

/// Default redirect status when none is configured.
pub const DEFAULT_OUTPUT_STATUS: StatusCode = StatusCode::FOUND;

#[derive(Debug, Clone)]
pub struct RedirectEmitter {
    template: RedirectTemplate,
    output_status: StatusCode,
}

impl RedirectEmitter {
    /// `output_status == 0` selects the default 302.
    pub fn new(template: RedirectTemplate, output_status: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            template,
            output_status: resolve_output_status(output_status)?,
        })
    }

    pub fn output_status(&self) -> StatusCode {
        self.output_status
    }

    pub fn template(&self) -> &RedirectTemplate {
        &self.template
    }

    /// Render the `Location` for a suppressed request.
    pub fn location(&self, code: StatusCode, headers: &HeaderMap, uri: &Uri) -> String {
        let (url, source) = effective_url(headers, uri);
        if source == UrlSource::Request {
            tracing::warn!(
                url = %url,
                "Missing X-Forwarded-Proto/X-Forwarded-Host, redirecting with local request URL"
            );
        }
        self.template.render(code.as_u16(), &url)
    }

    /// Write the redirect directly to the real sink.
    ///
    /// A failed body write is reported as a 500 when the sink has not sent
    /// its head yet; the error is returned either way.
    pub fn emit(
        &self,
        sink: &mut dyn ResponseSink,
        code: StatusCode,
        headers: &HeaderMap,
        uri: &Uri,
    ) -> Result<(), WriteError> {
        let location = self.location(code, headers, uri);
        tracing::debug!(status = code.as_u16(), location = %location, "Emitting redirect");

        let value = HeaderValue::from_str(&location).map_err(|_| WriteError::InvalidLocation)?;
        sink.headers_mut().insert(header::LOCATION, value);
        sink.write_head(self.output_status);

        if let Err(e) = sink.write(REDIRECT_BODY) {
            if !sink.is_committed() {
                report_error(sink, &e);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Build the redirect as a standalone response.
    pub fn to_response(&self, code: StatusCode, headers: &HeaderMap, uri: &Uri) -> Response<Body> {
        let mut recorder = ResponseRecorder::new();
        if let Err(e) = self.emit(&mut recorder, code, headers, uri) {
            tracing::error!(error = %e, "Failed to build redirect response");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
        recorder.into_response()
    }
}

/// Map a configured redirect status to a `StatusCode`; `0` is the default.
pub fn resolve_output_status(code: u16) -> Result<StatusCode, ConfigError> {
    match code {
        0 => Ok(DEFAULT_OUTPUT_STATUS),
        code => StatusCode::from_u16(code).map_err(|_| ConfigError::InvalidOutputStatus(code)),
    }
}

fn report_error(sink: &mut dyn ResponseSink, err: &WriteError) {
    let headers = sink.headers_mut();
    headers.remove(header::LOCATION);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    sink.write_head(StatusCode::INTERNAL_SERVER_ERROR);
    let _ = sink.write(err.to_string().as_bytes());
}
