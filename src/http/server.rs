//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router forwarding every request to the upstream
//! - Wire up middleware (tracing, forwarded headers, redirect, timeout)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode, Uri},
    middleware::map_request,
    response::{IntoResponse, Response},
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::error::ConfigError;
use crate::http::middleware::{RedirectErrors, RedirectErrorsLayer};
use crate::redirect::origin::{X_FORWARDED_HOST, X_FORWARDED_PROTO};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: Arc<str>,
}

/// HTTP server fronting a single upstream with error redirection.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails when the redirect configuration is invalid.
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        let middleware = Arc::new(RedirectErrors::new(&config.redirect, "redirect-errors")?);

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let state = AppState {
            client,
            upstream: Arc::from(config.upstream.address.as_str()),
        };

        let router = Self::build_router(&config, state, middleware);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: forwarded headers are in place before the
    /// redirect layer reads them, and timeouts are visible to it.
    fn build_router(config: &ProxyConfig, state: AppState, middleware: Arc<RedirectErrors>) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(RedirectErrorsLayer::new(middleware))
            .layer(map_request(add_forwarded_headers))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// The router, for driving the server without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Record how the client reached us unless an outer proxy already did.
async fn add_forwarded_headers(mut req: Request<Body>) -> Request<Body> {
    let host = req
        .headers()
        .get(header::HOST)
        .cloned()
        .or_else(|| {
            req.uri()
                .authority()
                .and_then(|a| HeaderValue::from_str(a.as_str()).ok())
        });

    let headers = req.headers_mut();
    if !headers.contains_key(X_FORWARDED_PROTO) {
        headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("http"));
    }
    if !headers.contains_key(X_FORWARDED_HOST) {
        if let Some(host) = host {
            headers.insert(X_FORWARDED_HOST, host);
        }
    }
    req
}

/// Forward the request to the upstream unchanged.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (mut parts, body) = request.into_parts();
    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let uri: Uri = match format!("http://{}{}", state.upstream, path).parse() {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(upstream = %state.upstream, error = %e, "Invalid upstream URI");
            return (StatusCode::BAD_GATEWAY, "Invalid upstream address").into_response();
        }
    };

    tracing::debug!(method = %parts.method, uri = %uri, "Proxying request");
    parts.uri = uri;
    let req = Request::from_parts(parts, body);

    match state.client.request(req).await {
        Ok(response) => {
            let (parts, body): (_, hyper::body::Incoming) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(upstream = %state.upstream, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
