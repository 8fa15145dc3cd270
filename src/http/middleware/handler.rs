//! Sink-style upstream handlers.

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::{ready, Ready};
use tower::Service;

use crate::http::middleware::redirect_errors::RedirectErrors;
use crate::intercept::{ResponseRecorder, ResponseSink};

/// An upstream unit of work that writes its response through a sink.
pub trait Handler: Send + Sync {
    fn serve(&self, req: &Request<Body>, sink: &mut dyn ResponseSink);
}

impl<F> Handler for F
where
    F: Fn(&Request<Body>, &mut dyn ResponseSink) + Send + Sync,
{
    fn serve(&self, req: &Request<Body>, sink: &mut dyn ResponseSink) {
        self(req, sink)
    }
}

/// Runs a [`Handler`] behind [`RedirectErrors`] as a tower service.
pub struct HandlerService<H> {
    middleware: Arc<RedirectErrors>,
    handler: Arc<H>,
}

impl<H> HandlerService<H> {
    pub fn new(middleware: Arc<RedirectErrors>, handler: H) -> Self {
        Self {
            middleware,
            handler: Arc::new(handler),
        }
    }
}

impl<H> Clone for HandlerService<H> {
    fn clone(&self) -> Self {
        Self {
            middleware: self.middleware.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<H: Handler + 'static> Service<Request<Body>> for HandlerService<H> {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = Ready<Result<Response<Body>, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut recorder = ResponseRecorder::new();
        self.middleware.serve(&*self.handler, &req, &mut recorder);
        ready(Ok(recorder.into_response()))
    }
}

impl RedirectErrors {
    /// Wrap a sink-style handler into a service that can be mounted on a router.
    pub fn handler_service<H: Handler + 'static>(self: Arc<Self>, handler: H) -> HandlerService<H> {
        HandlerService::new(self, handler)
    }
}
