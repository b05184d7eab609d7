//! Shared cache-control policies for HTTP handlers.

use actix_web::http::header::{CACHE_CONTROL, HeaderName};

/// Rendered thumbnails may be cached by browsers and proxies for an hour.
pub const PUBLIC_ONE_HOUR: &str = "public, max-age=3600";

/// Per-user responses must always be revalidated before reuse.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Health check responses must never be cached.
pub const NO_STORE: &str = "no-store";

/// Header tuple for public thumbnail responses.
pub fn public_one_hour_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, PUBLIC_ONE_HOUR)
}

/// Header tuple for private per-user responses.
pub fn private_no_cache_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Header tuple for health checks.
pub fn no_store_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, NO_STORE)
}
