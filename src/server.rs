//! HTTP front end: one redirect route per broadcast.
//!
//! | Route | Success | Any failure |
//! |-------|---------|-------------|
//! | `GET /tagesschau` | 302 to the video file | 503 |
//! | `GET /heute` | 302 to the video file | 503 |
//!
//! The router is built around an injected [`Resolve`] so handlers never touch
//! the network directly.

use crate::models::Broadcast;
use crate::pipeline::{Resolution, Resolve};
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

type SharedResolver = Arc<dyn Resolve>;

/// Build the redirect router around `resolver`.
pub fn build_router(resolver: SharedResolver) -> Router {
    Router::new()
        .route("/tagesschau", get(redirect_tagesschau))
        .route("/heute", get(redirect_heute))
        .with_state(resolver)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

async fn redirect_tagesschau(State(resolver): State<SharedResolver>) -> Response {
    redirect_latest(resolver.as_ref(), Broadcast::Tagesschau).await
}

async fn redirect_heute(State(resolver): State<SharedResolver>) -> Response {
    redirect_latest(resolver.as_ref(), Broadcast::Heute).await
}

async fn redirect_latest(resolver: &dyn Resolve, broadcast: Broadcast) -> Response {
    match resolver.resolve(broadcast).await {
        Ok(Resolution::Found(url)) => found(&url),
        Ok(miss) => {
            warn!(%broadcast, reason = %miss, "No video to redirect to");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
        Err(e) => {
            error!(%broadcast, error = %e, "Pipeline failed");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

/// 302 with `Location: url`. A URL that is not a valid header value is
/// treated like any other failure.
fn found(url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => {
            info!(%url, "Redirecting");
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
        Err(e) => {
            error!(%url, error = %e, "Resolved URL is not a valid Location header");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::fetch::testing::StaticFetcher;
    use crate::pipeline::LiveResolver;
    use crate::scrapers::tagesschau;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Local;
    use tower::ServiceExt;

    struct StubResolver {
        outcome: fn(Broadcast) -> Result<Resolution>,
    }

    #[async_trait]
    impl Resolve for StubResolver {
        async fn resolve(&self, broadcast: Broadcast) -> Result<Resolution> {
            (self.outcome)(broadcast)
        }
    }

    fn router(outcome: fn(Broadcast) -> Result<Resolution>) -> Router {
        build_router(Arc::new(StubResolver { outcome }))
    }

    async fn send_get(app: Router, path: &str) -> Response {
        app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_found_redirects_with_302() {
        let app = router(|broadcast| {
            Ok(Resolution::Found(format!("https://media.example.com/{broadcast}.mp4")))
        });

        let response = send_get(app.clone(), "/tagesschau").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://media.example.com/tagesschau.mp4"
        );

        let response = send_get(app, "/heute").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://media.example.com/heute.mp4"
        );
    }

    #[tokio::test]
    async fn test_page_not_found_is_503() {
        let app = router(|broadcast| {
            Ok(Resolution::PageNotFound {
                broadcast,
                listing_url: "https://www.tagesschau.de/archive.html".to_string(),
            })
        });

        let response = send_get(app, "/tagesschau").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[tokio::test]
    async fn test_video_not_found_is_503() {
        let app = router(|broadcast| {
            Ok(Resolution::VideoNotFound {
                broadcast,
                page_url: "https://www.zdf.de/heute.html".to_string(),
            })
        });

        assert_eq!(
            send_get(app, "/heute").await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_pipeline_error_is_503() {
        let app = router(|_| Err(Error::UnknownQuality("low".to_string())));

        assert_eq!(
            send_get(app, "/heute").await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = router(|_| Ok(Resolution::Found("https://example.com".to_string())));

        assert_eq!(
            send_get(app, "/tagesthemen").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_live_resolver_without_entries_is_503() {
        let today = Local::now().date_naive();
        let fetcher = StaticFetcher::new().with_page(
            tagesschau::archive_url(today),
            r#"<div class="mod modA modThumbnail"><h4><a href="/tt.html">tagesthemen</a></h4>
               <p class="dachzeile">01.01.2024 22:15 Uhr</p></div>"#,
        );
        let app = build_router(Arc::new(LiveResolver::new(fetcher)));

        assert_eq!(
            send_get(app, "/tagesschau").await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
