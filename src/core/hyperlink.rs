//! Absolute hyperlinks for rendered entities
//!
//! Each representation carries a `url` pointing back at its own detail
//! route. The origin comes from the configured public URL when one is set,
//! otherwise from the request's `Host` header.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Configured public origin, inserted into request extensions by the server
#[derive(Debug, Clone)]
pub struct PublicUrl(pub String);

/// Origin used to build absolute URLs for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Build from an origin such as `http://localhost:8000`
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self(origin.trim_end_matches('/').to_string())
    }

    /// The origin without a trailing slash
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Detail URL of a resource row, e.g. `http://host/parkareas/1`
    pub fn resource(&self, resource: &str, id: i64) -> String {
        format!("{}/{}/{}", self.0, resource, id)
    }

    /// URL of a stored media file given its path relative to the media root
    pub fn media(&self, relative_path: &str) -> String {
        format!("{}/media/{}", self.0, relative_path.trim_start_matches('/'))
    }
}

impl<S> FromRequestParts<S> for BaseUrl
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(PublicUrl(url)) = parts.extensions.get::<PublicUrl>() {
            return Ok(BaseUrl::new(url.clone()));
        }

        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http");

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| parts.uri.authority().map(|a| a.as_str()))
            .unwrap_or("localhost");

        Ok(BaseUrl::new(format!("{}://{}", scheme, host)))
    }
}
