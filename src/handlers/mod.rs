//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers.

pub mod health;
pub mod submit;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .route("/submit", post(submit::submit))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use base64::Engine;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::{Config, LimitsConfig, SandboxConfig, ServerConfig},
        evaluation::EvaluationService,
        models::Report,
        sandbox::{ExecOutcome, MockSandboxBackend},
    };

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
            sandbox: SandboxConfig {
                docker_socket: "/var/run/docker.sock".to_string(),
                image: "judgecore/sandbox:latest".to_string(),
                cpu_quota: 1.0,
            },
            limits: LimitsConfig {
                wall_timeout_seconds: 2,
                memory_limit_mb: 256,
                max_output_bytes: 65536,
            },
        }
    }

    #[tokio::test]
    async fn submit_round_trips_through_the_router() {
        let mut backend = MockSandboxBackend::new();
        backend.expect_launch().returning(|_, _| Ok(()));
        backend.expect_push_bytes().returning(|_, _, _| Ok(()));
        backend.expect_exec().returning(|_, _, _| {
            Ok(ExecOutcome {
                stdout: "dlrow olleh".to_string(),
                stderr: String::new(),
                exit_status: Some(0),
                wall_ms: 1.0,
                cpu_ms: 1.0,
                mem_kb: 64,
                flag: None,
            })
        });
        backend.expect_remove().returning(|_, _| Ok(()));

        let config = test_config();
        let evaluation = EvaluationService::new(Arc::new(backend), &config)
            .await
            .expect("mock sandbox should launch");
        let state = AppState::new(Arc::new(evaluation), config);

        let body = serde_json::json!({
            "code": base64::engine::general_purpose::STANDARD.encode("println(reverse(readline()))"),
            "language": "julia",
            "problem": "reverse-string",
        });

        let response = routes()
            .with_state(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/submit")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: Report = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(report.num_test_cases, 5);
    }

    #[tokio::test]
    async fn submit_rejects_unknown_language() {
        let mut backend = MockSandboxBackend::new();
        backend.expect_launch().returning(|_, _| Ok(()));

        let config = test_config();
        let evaluation = EvaluationService::new(Arc::new(backend), &config)
            .await
            .expect("mock sandbox should launch");
        let state = AppState::new(Arc::new(evaluation), config);

        let body = serde_json::json!({
            "code": base64::engine::general_purpose::STANDARD.encode("print(1)"),
            "language": "brainfuck",
            "problem": "sum_two",
        });

        let response = routes()
            .with_state(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/submit")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn submit_rejects_missing_code_field_with_named_error() {
        let mut backend = MockSandboxBackend::new();
        backend.expect_launch().returning(|_, _| Ok(()));

        let config = test_config();
        let evaluation = EvaluationService::new(Arc::new(backend), &config)
            .await
            .expect("mock sandbox should launch");
        let state = AppState::new(Arc::new(evaluation), config);

        let body = serde_json::json!({
            "language": "python3",
            "problem": "sum_two",
        });

        let response = routes()
            .with_state(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/submit")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("MISSING_CODE"));
    }

    #[tokio::test]
    async fn submit_rejects_malformed_json_with_named_error() {
        let mut backend = MockSandboxBackend::new();
        backend.expect_launch().returning(|_, _| Ok(()));

        let config = test_config();
        let evaluation = EvaluationService::new(Arc::new(backend), &config)
            .await
            .expect("mock sandbox should launch");
        let state = AppState::new(Arc::new(evaluation), config);

        let response = routes()
            .with_state(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/submit")
                    .header("content-type", "application/json")
                    .body(Body::from("{not valid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("MALFORMED_PAYLOAD"));
    }
}
