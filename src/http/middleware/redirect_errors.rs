//! Error redirection middleware.
//!
//! # Responsibilities
//! - Validate the redirect configuration eagerly and atomically
//! - Run the upstream handler behind a fresh ResponseInterceptor
//! - Emit the redirect on the real sink when the response was suppressed
//!
//! # Design Decisions
//! - One instance serves any number of concurrent requests without locking
//! - Per-request state lives on the stack of the request's task

use axum::body::Body;
use axum::http::{HeaderMap, Request, Response, StatusCode, Uri};

use crate::codes::CodeRangeMatcher;
use crate::config::RedirectConfig;
use crate::error::ConfigError;
use crate::http::middleware::handler::Handler;
use crate::intercept::{ResponseInterceptor, ResponseSink};
use crate::redirect::{RedirectEmitter, RedirectTemplate};

/// Redirects error responses to an external target.
#[derive(Debug)]
pub struct RedirectErrors {
    name: String,
    matcher: CodeRangeMatcher,
    emitter: RedirectEmitter,
}

impl RedirectErrors {
    /// Build the middleware from its configuration.
    pub fn new(config: &RedirectConfig, name: impl Into<String>) -> Result<Self, ConfigError> {
        let template = RedirectTemplate::new(config.target.clone())?;
        let matcher = CodeRangeMatcher::build(&config.status)?;
        let emitter = RedirectEmitter::new(template, config.output_status)?;
        let name = name.into();

        tracing::info!(
            middleware = %name,
            status = %matcher,
            target = %emitter.template().as_str(),
            output_status = emitter.output_status().as_u16(),
            "Redirect middleware configured"
        );

        Ok(Self {
            name,
            matcher,
            emitter,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matcher(&self) -> &CodeRangeMatcher {
        &self.matcher
    }

    pub fn emitter(&self) -> &RedirectEmitter {
        &self.emitter
    }

    /// Whether a response committed with `status` gets replaced.
    pub fn intercepts(&self, status: StatusCode) -> bool {
        self.matcher.matches(status.as_u16())
    }

    /// Run `next` for one request, redirecting if it commits a matched status.
    pub fn serve<H: Handler + ?Sized>(
        &self,
        next: &H,
        req: &Request<Body>,
        sink: &mut dyn ResponseSink,
    ) {
        let mut catcher = ResponseInterceptor::new(&mut *sink, &self.matcher);
        next.serve(req, &mut catcher);

        if catcher.is_passthrough() {
            return;
        }
        let code = catcher.captured_code().unwrap_or(StatusCode::OK);
        drop(catcher);

        self.record_suppression(code);
        if let Err(e) = self.emitter.emit(sink, code, req.headers(), req.uri()) {
            tracing::error!(
                middleware = %self.name,
                status = code.as_u16(),
                error = %e,
                "Failed to write redirect response"
            );
        }
    }

    /// Replace an already-built response when its status is matched.
    ///
    /// A replaced response is dropped with its body unread.
    pub fn filter_response(
        &self,
        response: Response<Body>,
        headers: &HeaderMap,
        uri: &Uri,
    ) -> Response<Body> {
        let code = response.status();
        if !self.intercepts(code) {
            return response;
        }
        drop(response);

        self.record_suppression(code);
        self.emitter.to_response(code, headers, uri)
    }

    fn record_suppression(&self, code: StatusCode) {
        tracing::info!(
            middleware = %self.name,
            status = code.as_u16(),
            "Caught HTTP status code, redirecting"
        );
        metrics::counter!(
            crate::observability::metrics::SUPPRESSED_TOTAL,
            "code" => code.as_u16().to_string()
        )
        .increment(1);
    }
}
