//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the image-generation
//! backend: model listing, image generation and health checks.

use crate::core::config::HUGGING_FACE_TOKEN_VARS;
use crate::core::constants::service;
use crate::core::model_manager::ModelManager;
use crate::core::provider::ProviderError;
use crate::core::providers::HuggingFaceProvider;
use crate::models::image::{ErrorDetail, ImageRequest, ImageResponse, ModelList};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub model_manager: Arc<ModelManager>,
    /// Absent when no Hugging Face token is configured
    pub provider: Option<Arc<HuggingFaceProvider>>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))
        .route("/api/generate-image", post(generate_image))
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDetail {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// POST /api/generate-image - Generate an image from a prompt
async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<ImageRequest>,
) -> Response {
    if request.prompt.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Prompt is required");
    }

    let request_id = uuid::Uuid::new_v4();
    let preview: String = request.prompt.chars().take(50).collect();
    info!("[{}] Image generation request: {}...", request_id, preview);

    let model = match state.model_manager.resolve(&request.model) {
        Ok(model) => model,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let result = match state.provider.as_ref() {
        Some(provider) => {
            let payload = state.model_manager.build_request(
                &request.prompt,
                request.style.as_deref(),
                request.quality.as_deref(),
                request.size.as_deref(),
            );
            info!(
                "[{}] Generating image with {} ({})",
                request_id, model.id, model.model_id
            );
            provider.generate_image(model.model_id, &payload).await
        }
        None => Err(ProviderError::MissingCredential(HUGGING_FACE_TOKEN_VARS[0])),
    };

    match result {
        Ok(bytes) => {
            info!("[{}] Generated {} bytes", request_id, bytes.len());
            Json(ImageResponse {
                success: true,
                image_url: format!("data:image/png;base64,{}", BASE64.encode(&bytes)),
                model: request.model,
                prompt: request.prompt,
            })
            .into_response()
        }
        Err(e) => {
            error!("[{}] Image generation failed: {}", request_id, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Image generation failed: {}", e),
            )
        }
    }
}

/// GET /api/models - List the registered models
async fn list_models(State(state): State<AppState>) -> impl IntoResponse {
    Json(ModelList {
        models: state.model_manager.model_infos(),
    })
}

/// GET / - Root endpoint
async fn root() -> impl IntoResponse {
    Json(json!({
        "message": service::MESSAGE,
        "status": "running",
    }))
}

/// GET /health - Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": service::NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::HttpResponse;
    use crate::core::provider::testing::StubTransport;
    use serde_json::Value;

    /// Serve the router on an ephemeral port and return its base URL
    async fn spawn_app(stub: Option<Arc<StubTransport>>) -> String {
        let provider = stub.map(|stub| {
            Arc::new(HuggingFaceProvider::new(
                stub,
                "https://inference.test/models",
                "https://router.test/models",
                "hf_test".to_string(),
            ))
        });
        let state = AppState {
            model_manager: Arc::new(ModelManager::new()),
            provider,
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn post_image(base: &str, body: Value) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("{}/api/generate-image", base))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_generate_image_returns_data_url() {
        let stub = Arc::new(StubTransport::new(vec![Ok(HttpResponse::new(
            200,
            b"PNGDATA".to_vec(),
        ))]));
        let base = spawn_app(Some(stub.clone())).await;

        let (status, body) = post_image(
            &base,
            json!({"prompt": "A lighthouse", "model": "dreamshaper", "style": "oil painting"}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["model"], "dreamshaper");
        assert_eq!(body["prompt"], "A lighthouse");
        assert_eq!(body["imageUrl"], format!("data:image/png;base64,{}", BASE64.encode(b"PNGDATA")));

        let sent = stub.sent();
        assert_eq!(sent[0].url, "https://router.test/models/Lykon/dreamshaper-8");
        assert_eq!(
            sent[0].body["inputs"],
            "A lighthouse. Ultra high quality, maximum detail, professional grade, 8K resolution. Style: oil painting"
        );
        assert_eq!(sent[0].body["parameters"]["num_inference_steps"], 50);
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let base = spawn_app(None).await;
        let (status, body) = post_image(&base, json!({"prompt": ""})).await;

        assert_eq!(status, 400);
        assert_eq!(body["detail"], "Prompt is required");
    }

    #[tokio::test]
    async fn test_unknown_model_rejected() {
        let stub = Arc::new(StubTransport::new(Vec::new()));
        let base = spawn_app(Some(stub.clone())).await;
        let (status, body) = post_image(&base, json!({"prompt": "x", "model": "dalle"})).await;

        assert_eq!(status, 400);
        assert_eq!(body["detail"], "Model dalle not found");
        assert!(stub.sent().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let stub = Arc::new(StubTransport::new(vec![Ok(HttpResponse::new(503, "loading"))]));
        let base = spawn_app(Some(stub)).await;
        let (status, body) = post_image(&base, json!({"prompt": "x"})).await;

        assert_eq!(status, 500);
        assert_eq!(body["detail"], "Image generation failed: API Error: 503");
    }

    #[tokio::test]
    async fn test_upstream_timeout_is_500() {
        let stub = Arc::new(StubTransport::timing_out("operation timed out"));
        let base = spawn_app(Some(stub)).await;
        let (status, body) = post_image(&base, json!({"prompt": "x"})).await;

        assert_eq!(status, 500);
        assert_eq!(
            body["detail"],
            "Image generation failed: Request timeout - image generation took too long"
        );
    }

    #[tokio::test]
    async fn test_upstream_unreachable_is_500() {
        let stub = Arc::new(StubTransport::failing("connection refused"));
        let base = spawn_app(Some(stub)).await;
        let (status, body) = post_image(&base, json!({"prompt": "x"})).await;

        assert_eq!(status, 500);
        assert_eq!(
            body["detail"],
            "Image generation failed: Request failed: connection refused"
        );
    }

    #[tokio::test]
    async fn test_missing_token_is_500() {
        let base = spawn_app(None).await;
        let (status, body) = post_image(&base, json!({"prompt": "x"})).await;

        assert_eq!(status, 500);
        assert_eq!(
            body["detail"],
            "Image generation failed: HUGGING_FACE_TOKEN is not set"
        );
    }

    #[tokio::test]
    async fn test_list_models_and_health() {
        let base = spawn_app(None).await;
        let client = reqwest::Client::new();

        let models: Value = client
            .get(format!("{}/api/models", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(models["models"].as_array().unwrap().len(), 3);
        assert_eq!(models["models"][0]["name"], "Stable Diffusion XL");

        let health: Value = client
            .get(format!("{}/health", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["service"], "codebloom-ai-hub");
        assert!(health.get("token_configured").is_none());

        let root: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
        assert_eq!(root["message"], "CodeBloom AI Hub Backend");
    }
}
