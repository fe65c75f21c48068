//! Cross-origin policy: subdomains of one fixed parent domain.

use axum::http::request::Parts;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Parent domain whose subdomains may call the service.
const ALLOWED_PARENT_DOMAIN: &str = "chaoxing.com";

/// Any method/header; origins limited to `https://*.<parent>`.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().map(origin_allowed).unwrap_or(false)
            },
        ))
}

fn origin_allowed(origin: &str) -> bool {
    let Some(host) = origin.strip_prefix("https://") else {
        return false;
    };
    host.strip_suffix(ALLOWED_PARENT_DOMAIN)
        .is_some_and(|prefix| !prefix.is_empty() && prefix.ends_with('.'))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    // ── origin_allowed ──

    #[test]
    fn test_subdomain_allowed() {
        assert!(origin_allowed("https://passport.chaoxing.com"));
        assert!(origin_allowed("https://mooc1.i.chaoxing.com"));
    }

    #[test]
    fn test_bare_parent_domain_rejected() {
        // The wildcard covers subdomains only
        assert!(!origin_allowed("https://chaoxing.com"));
    }

    #[test]
    fn test_other_domains_rejected() {
        assert!(!origin_allowed("https://evil.example"));
        assert!(!origin_allowed("https://notchaoxing.com"));
        assert!(!origin_allowed("https://chaoxing.com.evil.example"));
    }

    #[test]
    fn test_plain_http_rejected() {
        assert!(!origin_allowed("http://passport.chaoxing.com"));
    }

    // ── layer behavior ──

    fn cors_test_router() -> Router {
        Router::new()
            .route("/query", post(|| async { "ok" }))
            .layer(cors_layer())
    }

    async fn preflight(origin: &str) -> axum::response::Response {
        cors_test_router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/query")
                    .header("origin", origin)
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response")
    }

    #[tokio::test]
    async fn preflight_allows_subdomain_origin() {
        let response = preflight("https://passport.chaoxing.com").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin"),
            Some(&HeaderValue::from_static("https://passport.chaoxing.com"))
        );
    }

    #[tokio::test]
    async fn preflight_blocks_foreign_origin() {
        let response = preflight("https://evil.example").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }
}
