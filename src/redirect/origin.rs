//! Reconstruction of the URL as the client saw it.

use axum::http::{HeaderMap, Uri};

pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Where the effective URL was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    /// Both forwarded headers were present.
    Forwarded,
    /// Fallback to the request URI known to this process.
    Request,
}

/// Rebuild the client-facing URL of a request.
pub fn effective_url(headers: &HeaderMap, uri: &Uri) -> (String, UrlSource) {
    let proto = forwarded(headers, X_FORWARDED_PROTO);
    let host = forwarded(headers, X_FORWARDED_HOST);

    match (proto, host) {
        (Some(proto), Some(host)) => {
            let request_uri = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
            (format!("{}://{}{}", proto, host, request_uri), UrlSource::Forwarded)
        }
        _ => (request_url(uri), UrlSource::Request),
    }
}

fn forwarded<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// `Uri`'s `Display` always renders a root path; an absolute URI without
/// a query is kept bare instead (`http://localhost`, not `http://localhost/`).
/// `Uri` cannot tell an explicit root slash from none, so it is dropped too.
fn request_url(uri: &Uri) -> String {
    match (uri.scheme_str(), uri.authority()) {
        (Some(scheme), Some(authority)) if uri.path() == "/" && uri.query().is_none() => {
            format!("{}://{}", scheme, authority)
        }
        _ => uri.to_string(),
    }
}
