use std::sync::Arc;

use axum::{middleware, routing::get, Router};

pub mod aggregator;
pub mod config;
pub mod http;
pub mod launchctl_client;
pub mod logging;
pub mod parser;
pub mod registry;

use launchctl_client::Prober;
use registry::ServiceDescriptor;

/// Shared state for request handlers. The registry is immutable for the
/// process lifetime; the prober is the seam that tests replace.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<[ServiceDescriptor]>,
    pub prober: Arc<dyn Prober>,
}

impl AppState {
    pub fn new(registry: Vec<ServiceDescriptor>, prober: Arc<dyn Prober>) -> Self {
        Self {
            registry: Arc::from(registry),
            prober,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/status", get(http::handlers::status))
        .route("/", get(http::handlers::index))
        .fallback(http::handlers::not_found)
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::launchctl_client::{ProbeOutcome, Prober};
    use crate::registry::ServiceDescriptor;

    use super::*;

    struct ScriptedProber {
        outcomes: HashMap<String, ProbeOutcome>,
    }

    #[async_trait::async_trait]
    impl Prober for ScriptedProber {
        async fn probe(&self, label: &str) -> ProbeOutcome {
            self.outcomes
                .get(label)
                .cloned()
                .unwrap_or(ProbeOutcome::LaunchFailed("unscripted label".to_string()))
        }
    }

    fn app(registry: Vec<ServiceDescriptor>, outcomes: HashMap<String, ProbeOutcome>) -> Router {
        let state = AppState::new(registry, Arc::new(ScriptedProber { outcomes }));
        build_app(state)
    }

    fn mixed_app() -> Router {
        let registry = vec![
            ServiceDescriptor::new("svc.timeout", "Timeout Service"),
            ServiceDescriptor::new("svc.running", "Running Service"),
            ServiceDescriptor::new("svc.unloaded", "Unloaded Service"),
        ];
        let mut outcomes = HashMap::new();
        outcomes.insert("svc.timeout".to_string(), ProbeOutcome::TimedOut);
        outcomes.insert(
            "svc.running".to_string(),
            ProbeOutcome::Completed {
                exit_code: 0,
                stdout: "{ \"PID\" = 321; };".to_string(),
            },
        );
        outcomes.insert(
            "svc.unloaded".to_string(),
            ProbeOutcome::Completed {
                exit_code: 1,
                stdout: String::new(),
            },
        );
        app(registry, outcomes)
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(Body::empty())
                .expect("request build"),
        )
        .await
        .expect("request execution")
    }

    #[tokio::test]
    async fn status_returns_json_with_cors_header() {
        let response = get(mixed_app(), "/status").await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .expect("content type header");
        assert!(content_type.starts_with("application/json"));
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn status_preserves_registry_order_across_failures() {
        let response = get(mixed_app(), "/status").await;
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let body_json: serde_json::Value =
            serde_json::from_slice(&body).expect("valid json response");

        let services = body_json["services"].as_array().expect("services array");
        assert_eq!(services.len(), 3);
        assert_eq!(services[0]["label"], "svc.timeout");
        assert_eq!(services[0]["status"], "timeout");
        assert_eq!(services[0]["error"], "Command timed out");
        assert_eq!(services[1]["label"], "svc.running");
        assert_eq!(services[1]["running"], true);
        assert_eq!(services[1]["pid"], 321);
        assert_eq!(services[2]["label"], "svc.unloaded");
        assert_eq!(services[2]["status"], "not loaded");
        assert_eq!(services[2]["loaded"], false);
    }

    #[tokio::test]
    async fn status_body_matches_expected_layout_end_to_end() {
        let registry = vec![ServiceDescriptor::new("dev.fjorn.ollama", "Ollama")];
        let mut outcomes = HashMap::new();
        outcomes.insert(
            "dev.fjorn.ollama".to_string(),
            ProbeOutcome::Completed {
                exit_code: 0,
                stdout: "{\n\t\"PID\" = 4821;\n\t\"LastExitStatus\" = 0;\n};\n".to_string(),
            },
        );

        let response = get(app(registry, outcomes), "/status").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();

        assert_eq!(
            body,
            "{\"services\":[{\"label\":\"dev.fjorn.ollama\",\"name\":\"Ollama\",\
             \"running\":true,\"loaded\":true,\"pid\":4821,\"last_exit_status\":0,\
             \"status\":\"running\"}]}"
        );
    }

    #[tokio::test]
    async fn index_serves_html() {
        let response = get(mixed_app(), "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .expect("content type header");
        assert!(content_type.starts_with("text/html"));

        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let body_text = std::str::from_utf8(&body).expect("utf8 body");
        assert!(body_text.contains("/status"));
    }

    #[tokio::test]
    async fn unknown_path_returns_empty_404() {
        for uri in ["/health", "/status/extra", "/unknown-path"] {
            let response = get(mixed_app(), uri).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
            let body = response
                .into_body()
                .collect()
                .await
                .expect("collect body")
                .to_bytes();
            assert!(body.is_empty(), "uri {uri}");
        }
    }
}
