pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/analyze",
            post(handlers::handle_analyze).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::{stub::StubModel, ModelClient};

    const BOUNDARY: &str = "skillmatch-test-boundary";

    const MODEL_REPLY: &str = r#"{"jd_skills": ["Python", "Go", "SQL"], "matched_skills": ["Python", "SQL"], "missing_skills": ["Go"], "resume_skills": ["Python", "SQL"], "score": 67}"#;

    fn test_config() -> Config {
        Config {
            gemini_api_key: "unused".into(),
            gemini_model: "stub".into(),
            gemini_base_url: "http://127.0.0.1:1".into(),
            model_timeout: Duration::from_secs(1),
            max_upload_bytes: 64 * 1024,
            fuzzy_reconcile: false,
            fuzzy_threshold: 80,
            port: 0,
            rust_log: "info".into(),
        }
    }

    fn app(model: Arc<dyn ModelClient>) -> Router {
        build_router(AppState {
            model,
            config: test_config(),
        })
    }

    struct Part<'a> {
        field: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        content: &'a [u8],
    }

    fn part<'a>(field: &'a str, file_name: &'a str, content_type: &'a str, content: &'a [u8]) -> Part<'a> {
        Part {
            field,
            file_name,
            content_type,
            content,
        }
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for Part {
            field,
            file_name,
            content_type,
            content,
        } in parts
        {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn analyze_request(parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn send_raw(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = send_raw(app, request).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(Arc::new(StubModel::replying("{}"))), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_model_json_unmodified() {
        let model = Arc::new(StubModel::replying(MODEL_REPLY));
        let request = analyze_request(&[
            part("resume", "resume.txt", "text/plain", b"Python, SQL"),
            part("job_description", "jd.txt", "text/plain", b"Python, Go, SQL"),
        ]);

        let (status, body) = send(app(model.clone()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::from_str::<Value>(MODEL_REPLY).unwrap());
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Resume:\n'''\nPython, SQL\n'''"));
        assert!(prompts[0].contains("Job Description:\n'''\nPython, Go, SQL\n'''"));
    }

    #[tokio::test]
    async fn test_off_schema_reply_is_relayed_verbatim() {
        let reply = r#"{"score":50,"notes":"x","jd_skills":null,"resume_skills":[{"name":"Python"}]}"#;
        let request = analyze_request(&[
            part("resume", "resume.txt", "text/plain", b"Python"),
            part("job_description", "jd.txt", "text/plain", b"Python"),
        ]);

        let (status, body) = send_raw(app(Arc::new(StubModel::replying(reply))), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, reply);
    }

    #[tokio::test]
    async fn test_missing_job_description_is_bad_request() {
        let request = analyze_request(&[part("resume", "resume.txt", "text/plain", b"Python")]);

        let (status, body) = send(app(Arc::new(StubModel::replying("{}"))), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing upload");
        assert!(body["details"].as_str().unwrap().contains("job_description"));
    }

    #[tokio::test]
    async fn test_unsupported_format_is_415() {
        let request = analyze_request(&[
            part("resume", "resume.doc", "application/msword", b"\xD0\xCF\x11\xE0"),
            part("job_description", "jd.txt", "text/plain", b"Go"),
        ]);

        let (status, body) = send(app(Arc::new(StubModel::replying("{}"))), request).await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"], "Unsupported file format");
    }

    #[tokio::test]
    async fn test_model_failure_is_bad_gateway_with_error_body() {
        let request = analyze_request(&[
            part("resume", "resume.txt", "text/plain", b"Python"),
            part("job_description", "jd.txt", "text/plain", b"Go"),
        ]);

        let (status, body) =
            send(app(Arc::new(StubModel::failing(503, "overloaded"))), request).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            json!({
                "error": "Could not process skill analysis",
                "details": "API error (status 503): overloaded"
            })
        );
    }

    #[tokio::test]
    async fn test_unparseable_model_reply_is_error_body() {
        let request = analyze_request(&[
            part("resume", "resume.txt", "text/plain", b"Python"),
            part("job_description", "jd.txt", "text/plain", b"Go"),
        ]);

        let (status, body) = send(app(Arc::new(StubModel::replying("not json"))), request).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Could not process skill analysis");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_unexpected_fields_are_ignored() {
        let request = analyze_request(&[
            part("avatar", "me.png", "image/png", b"\x89PNG"),
            part("resume", "resume.txt", "text/plain", b"Python"),
            part("job_description", "jd.txt", "text/plain", b"Python"),
        ]);

        let (status, body) =
            send(app(Arc::new(StubModel::replying(r#"{"score": 100}"#))), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"score": 100}));
    }
}
