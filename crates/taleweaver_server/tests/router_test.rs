//! Tests for the proxy router.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use taleweaver_core::{ImageMediaType, ReferenceImage};
use taleweaver_error::{ProviderError, ProviderErrorKind, ProviderResult, ServerErrorKind};
use taleweaver_interface::ImageGenerator;
use taleweaver_models::{ProxyImageGenerator, RetryPolicy, ServerConfig};
use taleweaver_server::{AppState, GENERATE_IMAGE_PATH, create_router};
use tower::ServiceExt;

const BOUNDARY: &str = "taleweaver-test-boundary";

/// Generator that returns a fixed outcome and records what it was sent.
struct StubGenerator {
    outcome: Result<String, ProviderErrorKind>,
    calls: Mutex<Vec<(String, ImageMediaType, usize)>>,
}

impl StubGenerator {
    fn ok(url: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(url.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(kind: ProviderErrorKind) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(kind),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, ImageMediaType, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StubGenerator {
    async fn generate_image(&self, prompt: &str, reference: &ReferenceImage) -> ProviderResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *reference.media_type(), reference.len()));
        self.outcome
            .clone()
            .map_err(ProviderError::new)
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

struct PanickingGenerator;

#[async_trait]
impl ImageGenerator for PanickingGenerator {
    async fn generate_image(&self, _prompt: &str, _reference: &ReferenceImage) -> ProviderResult<String> {
        panic!("generator exploded");
    }

    fn provider_name(&self) -> &'static str {
        "panicking"
    }
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: Option<&'a str>,
        bytes: &'a [u8],
    },
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n")
                        .as_bytes(),
                );
                if let Some(content_type) = content_type {
                    body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(GENERATE_IMAGE_PATH)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn photo(bytes: &[u8]) -> Part<'_> {
    Part::File {
        name: "childImage",
        file_name: "child.png",
        content_type: Some("image/png"),
        bytes,
    }
}

fn router(generator: Arc<dyn ImageGenerator>) -> Router {
    create_router(AppState::new(generator), &ServerConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", String::from_utf8_lossy(&bytes)));
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(router(StubGenerator::ok("https://img/1.png")), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_generate_image_success() {
    let generator = StubGenerator::ok("https://img/1.png");
    let request = multipart_request(&[
        Part::Text("prompt", "A child on a dragon"),
        photo(&[1, 2, 3, 4]),
        Part::Text("style", "whimsical_cartoon"),
    ]);

    let (status, body) = send(router(generator.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], "https://img/1.png");
    assert!(body.get("error").is_none());
    assert_eq!(
        generator.calls(),
        vec![("A child on a dragon".to_string(), ImageMediaType::Png, 4)]
    );
}

#[tokio::test]
async fn test_style_is_optional() {
    let generator = StubGenerator::ok("https://img/2.png");
    let request = multipart_request(&[Part::Text("prompt", "A child in space"), photo(&[9; 16])]);

    let (status, body) = send(router(generator.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], "https://img/2.png");
    assert_eq!(generator.calls().len(), 1);
}

#[tokio::test]
async fn test_media_type_from_extension_without_content_type() {
    let generator = StubGenerator::ok("https://img/3.png");
    let request = multipart_request(&[
        Part::Text("prompt", "A child in a forest"),
        Part::File {
            name: "childImage",
            file_name: "me.webp",
            content_type: None,
            bytes: &[7; 8],
        },
    ]);

    let (status, _) = send(router(generator.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(generator.calls()[0].1, ImageMediaType::Webp);
}

#[tokio::test]
async fn test_non_multipart_rejected() {
    let generator = StubGenerator::ok("https://img/1.png");
    let request = Request::builder()
        .method(Method::POST)
        .uri(GENERATE_IMAGE_PATH)
        .header("content-type", "application/json")
        .body(Body::from(r#"{"prompt":"hi"}"#))
        .unwrap();

    let (status, body) = send(router(generator.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Content-Type must be multipart/form-data");
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_missing_prompt_rejected() {
    let generator = StubGenerator::ok("https://img/1.png");
    let request = multipart_request(&[photo(&[1, 2, 3])]);

    let (status, body) = send(router(generator.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_blank_prompt_rejected() {
    let generator = StubGenerator::ok("https://img/1.png");
    let request = multipart_request(&[Part::Text("prompt", "   "), photo(&[1, 2, 3])]);

    let (status, body) = send(router(generator), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn test_missing_image_rejected() {
    let generator = StubGenerator::ok("https://img/1.png");
    let request = multipart_request(&[Part::Text("prompt", "A child at sea")]);

    let (status, body) = send(router(generator.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_unsupported_image_type_rejected() {
    let generator = StubGenerator::ok("https://img/1.png");
    let request = multipart_request(&[
        Part::Text("prompt", "A child at sea"),
        Part::File {
            name: "childImage",
            file_name: "child.gif",
            content_type: Some("image/gif"),
            bytes: &[1, 2, 3],
        },
    ]);

    let (status, body) = send(router(generator.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("image/gif"));
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_empty_image_rejected() {
    let generator = StubGenerator::ok("https://img/1.png");
    let request = multipart_request(&[Part::Text("prompt", "A child at sea"), photo(&[])]);

    let (status, body) = send(router(generator.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_provider_failure_is_internal_error() {
    let generator = StubGenerator::failing(ProviderErrorKind::GenerationFailed(
        "Image generation failed".to_string(),
    ));
    let request = multipart_request(&[Part::Text("prompt", "A child at sea"), photo(&[1, 2])]);

    let (status, body) = send(router(generator), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Image generation failed"));
    assert!(body.get("imageUrl").is_none());
}

#[tokio::test]
async fn test_empty_output_is_internal_error() {
    let generator = StubGenerator::failing(ProviderErrorKind::EmptyOutput);
    let request = multipart_request(&[Part::Text("prompt", "A child at sea"), photo(&[1, 2])]);

    let (status, body) = send(router(generator), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "No output image generated");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let generator = StubGenerator::ok("https://img/1.png");
    let config = ServerConfig {
        max_upload_bytes: 256,
        ..ServerConfig::default()
    };
    let app = create_router(AppState::new(generator.clone()), &config);
    let big = vec![0u8; 4096];
    let request = multipart_request(&[Part::Text("prompt", "A child at sea"), photo(&big)]);

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
    let (status, body) = send(router(StubGenerator::ok("https://img/1.png")), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("/nope"));
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let request = Request::builder()
        .method(Method::GET)
        .uri(GENERATE_IMAGE_PATH)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(StubGenerator::ok("https://img/1.png")), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_handler_panic_is_json_500() {
    let request = multipart_request(&[Part::Text("prompt", "A child at sea"), photo(&[1, 2])]);

    let (status, body) = send(router(Arc::new(PanickingGenerator)), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_bind_invalid_address() {
    let config = ServerConfig {
        bind: "not-an-address".to_string(),
        ..ServerConfig::default()
    };

    let err = taleweaver_server::bind(&config).await.unwrap_err();

    assert!(matches!(err.kind, ServerErrorKind::Bind { ref address, .. } if address == "not-an-address"));
}

#[tokio::test]
async fn test_bind_ephemeral_port() {
    let config = ServerConfig {
        bind: "127.0.0.1:0".to_string(),
        ..ServerConfig::default()
    };

    let listener = taleweaver_server::bind(&config).await.unwrap();

    assert_ne!(listener.local_addr().unwrap().port(), 0);
}

#[tokio::test]
async fn test_proxy_client_does_not_resubmit_failed_generation() {
    let generator = StubGenerator::failing(ProviderErrorKind::GenerationFailed("Moderation".to_string()));
    let config = ServerConfig {
        bind: "127.0.0.1:0".to_string(),
        ..ServerConfig::default()
    };
    let listener = taleweaver_server::bind(&config).await.unwrap();
    let address = listener.local_addr().unwrap();
    let server_generator = generator.clone();
    tokio::spawn(async move { taleweaver_server::serve_on(listener, &config, server_generator).await });

    let client = ProxyImageGenerator::new(
        format!("http://{address}{GENERATE_IMAGE_PATH}"),
        None,
        RetryPolicy::new(3, Duration::from_millis(10)),
    );
    let photo = ReferenceImage::new(vec![0xFF, 0xD8, 0xFF], ImageMediaType::Jpeg);
    let err = client.generate_image("A child at sea", &photo).await.unwrap_err();

    assert_eq!(
        err.kind,
        ProviderErrorKind::GenerationFailed("Image generation failed: Moderation".to_string())
    );
    assert_eq!(generator.calls().len(), 1);
}
