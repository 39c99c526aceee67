//! HTTP surface: the generation endpoint, the form page, and liveness.
//!
//! `/api/generate-design` is registered for every method so the 405 body
//! stays a JSON `{message}` like the rest of the error responses.

use crate::models::{DesignRequest, GenerateDesignBody, GenerateDesignResponse};
use crate::studio::DesignStudio;
use crate::Error;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    pub studio: Arc<DesignStudio>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/generate-design", any(generate_design))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

/// POST only; `prompt` is the one required field. Optional `negative`,
/// `scale`, and `category` let the served form submit its full state.
async fn generate_design(
    State(state): State<AppState>,
    method: Method,
    body: Option<Json<GenerateDesignBody>>,
) -> Response {
    if method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(json!({ "message": "Method not allowed" })),
        )
            .into_response();
    }

    let body = body.map(|Json(b)| b).unwrap_or_default();
    let prompt = match body.prompt.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Prompt is required" })),
            )
                .into_response();
        }
    };

    let request = DesignRequest::new(
        body.category.unwrap_or_default(),
        prompt,
        body.negative.unwrap_or_default(),
        body.scale.unwrap_or(crate::models::DEFAULT_GUIDANCE_SCALE),
    );

    match state.studio.generate(request).await {
        Ok(result) => (
            StatusCode::OK,
            Json(GenerateDesignResponse {
                image: result.image_ref,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(error: Error) -> Response {
    match error {
        Error::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
        }
        Error::Busy => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "message": "A generation is already in flight" })),
        )
            .into_response(),
        Error::Upstream(details) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "API call failed", "details": details })),
        )
            .into_response(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Something went wrong", "error": other.to_string() })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockImageBackend;
    use crate::studio::StudioOptions;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn make_router(backend: MockImageBackend) -> Router {
        let studio = DesignStudio::new(Box::new(backend), None, StudioOptions::default());
        router(AppState {
            studio: Arc::new(studio),
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(payload: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/generate-design")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let app = make_router(MockImageBackend::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/generate-design")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_missing_prompt_is_bad_request() {
        let app = make_router(MockImageBackend::new());

        let response = app.oneshot(post_json("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Prompt is required");
    }

    #[tokio::test]
    async fn test_blank_prompt_is_bad_request() {
        let app = make_router(MockImageBackend::new());

        let response = app.oneshot(post_json("{\"prompt\":\"   \"}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_successful_generation_returns_image() {
        let app = make_router(
            MockImageBackend::new().with_image_ref("https://images.test/1.png".to_string()),
        );

        let response = app
            .oneshot(post_json("{\"prompt\":\"a dress\",\"category\":\"shoes\"}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["image"], "https://images.test/1.png");
    }

    #[tokio::test]
    async fn test_backend_failure_relays_details() {
        let app = make_router(MockImageBackend::new().with_failure("model overloaded".to_string()));

        let response = app.oneshot(post_json("{\"prompt\":\"a dress\"}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "API call failed");
        assert_eq!(body["details"], "model overloaded");
    }

    #[tokio::test]
    async fn test_out_of_range_scale_is_rejected() {
        let app = make_router(MockImageBackend::new());

        let response = app
            .oneshot(post_json("{\"prompt\":\"a dress\",\"scale\":21}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_serves_the_form() {
        let app = make_router(MockImageBackend::new());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Fashion Design Studio"));
        assert!(html.contains("generate-design"));
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = make_router(MockImageBackend::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
