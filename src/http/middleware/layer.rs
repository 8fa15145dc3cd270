//! Tower layer applying [`RedirectErrors`] to ordinary services.
//!
//! A `Response` value carries its status and headers together, so the head is
//! one atomic commit here: the decision is taken on the inner response's
//! status before any of its body is polled.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderMap, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::middleware::redirect_errors::RedirectErrors;
use crate::redirect::origin::{X_FORWARDED_HOST, X_FORWARDED_PROTO};

#[derive(Clone)]
pub struct RedirectErrorsLayer {
    middleware: Arc<RedirectErrors>,
}

impl RedirectErrorsLayer {
    pub fn new(middleware: Arc<RedirectErrors>) -> Self {
        Self { middleware }
    }
}

impl<S> Layer<S> for RedirectErrorsLayer {
    type Service = RedirectErrorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RedirectErrorsService {
            inner,
            middleware: self.middleware.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RedirectErrorsService<S> {
    inner: S,
    middleware: Arc<RedirectErrors>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for RedirectErrorsService<S>
where
    S: Service<Request<ReqBody>, Response = Response<Body>> + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response<Body>, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if self.middleware.matcher().is_empty() {
            return Box::pin(self.inner.call(req));
        }

        let headers = forwarded_headers(req.headers());
        let uri = req.uri().clone();
        let middleware = self.middleware.clone();
        let fut = self.inner.call(req);

        Box::pin(async move {
            let response = fut.await?;
            Ok(middleware.filter_response(response, &headers, &uri))
        })
    }
}

/// Only the headers used to rebuild the client URL are kept.
fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut kept = HeaderMap::new();
    for name in [X_FORWARDED_PROTO, X_FORWARDED_HOST] {
        if let Some(value) = headers.get(name) {
            kept.insert(name, value.clone());
        }
    }
    kept
}
