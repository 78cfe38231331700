use actix_web::{error::InternalError, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::StudioError;
use crate::logger;
use crate::models::catalog::DEFAULT_DIMENSION;
use crate::models::generation::{
    ErrorBody, GenerateImageRequest, GenerateImageResponse, GenerationRequest,
};
use crate::nebius::ImageGenerator;
use crate::validator;

const DEFAULT_PORT: u16 = 8080;

/// `POST /api/generate-image`. Validation rejections return 400 before any
/// backend call is made; everything else surfaces as 500 with the error
/// message in the body.
pub async fn generate_image(
    generator: web::Data<dyn ImageGenerator>,
    body: web::Json<GenerateImageRequest>,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let body = body.into_inner();

    let prompt = match validator::normalize_prompt(&body.prompt) {
        Ok(prompt) => prompt,
        Err(e) => {
            log::warn!("[{}] rejected: {}", request_id, e);
            return HttpResponse::BadRequest().json(ErrorBody {
                error: e.to_string(),
            });
        }
    };

    let request = GenerationRequest {
        prompt,
        model: body.model,
        width: body.width.filter(|w| *w > 0).unwrap_or(DEFAULT_DIMENSION),
        height: body.height.filter(|h| *h > 0).unwrap_or(DEFAULT_DIMENSION),
    };

    log::info!(
        "[{}] generate-image model={:?} size={}x{}",
        request_id,
        request.model,
        request.width,
        request.height
    );

    match generator.generate(request).await {
        Ok(result) => HttpResponse::Ok().json(GenerateImageResponse {
            image_data: result.image_data,
            revised_prompt: result.revised_prompt,
        }),
        Err(StudioError::ValidationError(message)) => {
            log::warn!("[{}] rejected: {}", request_id, message);
            HttpResponse::BadRequest().json(ErrorBody { error: message })
        }
        Err(e) => {
            log::error!("[{}] generation failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: e.to_string(),
            })
        }
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed request bodies get the same `{ "error": ... }` shape as every
/// other rejection.
fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorBody {
            error: err.to_string(),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

pub async fn run(config: Config, generator: Arc<dyn ImageGenerator>) -> std::io::Result<()> {
    let port = config.port.unwrap_or(DEFAULT_PORT);
    let data = web::Data::from(generator);

    logger::log_startup_info("pixelstudio", env!("CARGO_PKG_VERSION"), port);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(json_error_config())
            .route("/api/generate-image", web::post().to(generate_image))
            .route("/api/health", web::get().to(health))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::models::generation::GenerationResult;
    use actix_web::{http::StatusCode, test};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Substitutable backend that records every request it receives.
    struct StubGenerator {
        calls: Mutex<Vec<GenerationRequest>>,
        outcome: fn() -> Result<GenerationResult>,
    }

    impl StubGenerator {
        fn new(outcome: fn() -> Result<GenerationResult>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                outcome,
            })
        }

        fn calls(&self) -> Vec<GenerationRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageGenerator for StubGenerator {
        async fn generate(&self, request: GenerationRequest) -> Result<GenerationResult> {
            self.calls.lock().unwrap().push(request);
            (self.outcome)()
        }
    }

    async fn call(
        stub: Arc<StubGenerator>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let generator: Arc<dyn ImageGenerator> = stub;
        let data = web::Data::from(generator);
        let app = test::init_service(
            App::new()
                .app_data(data)
                .app_data(json_error_config())
                .route("/api/generate-image", web::post().to(generate_image)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/generate-image")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status();
        let body: serde_json::Value = test::read_body_json(response).await;
        (status, body)
    }

    fn ok_result() -> Result<GenerationResult> {
        Ok(GenerationResult {
            image_data: "X".to_string(),
            revised_prompt: "Y".to_string(),
        })
    }

    fn backend_failure() -> Result<GenerationResult> {
        Err(StudioError::BackendError("model overloaded".to_string()))
    }

    #[actix_web::test]
    async fn test_success_maps_to_camel_case_body() {
        let stub = StubGenerator::new(ok_result);
        let (status, body) = call(
            stub.clone(),
            serde_json::json!({
                "prompt": "a red fox",
                "model": "flux-schnell",
                "width": 512,
                "height": 512
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["imageData"], "X");
        assert_eq!(body["revisedPrompt"], "Y");

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!((calls[0].width, calls[0].height), (512, 512));
    }

    #[actix_web::test]
    async fn test_empty_prompt_is_400_with_no_backend_call() {
        let stub = StubGenerator::new(ok_result);
        let (status, body) = call(
            stub.clone(),
            serde_json::json!({ "prompt": "   ", "model": "flux-schnell" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Prompt is required");
        assert!(stub.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_backend_failure_is_500_with_message() {
        let stub = StubGenerator::new(backend_failure);
        let (status, body) = call(
            stub,
            serde_json::json!({ "prompt": "a red fox", "model": "sdxl" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "model overloaded");
    }

    #[actix_web::test]
    async fn test_missing_dimensions_default() {
        let stub = StubGenerator::new(ok_result);
        let (status, _) = call(
            stub.clone(),
            serde_json::json!({ "prompt": "a red fox", "model": "flux-schnell" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let calls = stub.calls();
        assert_eq!((calls[0].width, calls[0].height), (1024, 1024));
    }

    #[actix_web::test]
    async fn test_unknown_model_routes_to_high_quality() {
        use crate::models::catalog::ModelId;

        let stub = StubGenerator::new(ok_result);
        call(
            stub.clone(),
            serde_json::json!({ "prompt": "a red fox", "model": "imagen-9000" }),
        )
        .await;

        assert_eq!(stub.calls()[0].model, ModelId::Sdxl);
    }

    #[actix_web::test]
    async fn test_malformed_body_gets_error_shape() {
        let stub = StubGenerator::new(ok_result);
        let generator: Arc<dyn ImageGenerator> = stub;
        let data = web::Data::from(generator);
        let app = test::init_service(
            App::new()
                .app_data(data)
                .app_data(json_error_config())
                .route("/api/generate-image", web::post().to(generate_image)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/generate-image")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert!(body["error"].is_string());
    }
}
