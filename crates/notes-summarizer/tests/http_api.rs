//! End-to-end tests of the router with a deterministic in-process model

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use notes_summarizer::{
    config::SummarizerConfig,
    export::render_pdf,
    providers::SummarizationProvider,
    server::SummarizerServer,
    LengthBounds, Result,
};

const BOUNDARY: &str = "summarizer-test-boundary";

/// Echoes the first sentence of its input
#[derive(Default)]
struct EchoSummarizer {
    calls: AtomicUsize,
    bounds: Mutex<Vec<LengthBounds>>,
}

#[async_trait]
impl SummarizationProvider for EchoSummarizer {
    async fn load(&self) -> Result<()> {
        Ok(())
    }

    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bounds.lock().unwrap().push(bounds);
        let first = text.split('.').next().unwrap_or(text);
        Ok(format!(" {}. ", first.trim()))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo-1"
    }
}

fn app() -> (Router, Arc<EchoSummarizer>) {
    let provider = Arc::new(EchoSummarizer::default());
    let server = SummarizerServer::with_provider(SummarizerConfig::default(), provider.clone());
    (server.build_router(), provider)
}

fn words(count: usize) -> String {
    let mut text = (0..count)
        .map(|i| format!("note{}", i))
        .collect::<Vec<_>>()
        .join(" ");
    text.push('.');
    text
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(filename, content_type, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn multipart_request(uri: &str, cookie: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(multipart(parts))).unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// `name=value` part of the session cookie set by a response
fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("summarizer_session="))
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_and_ready() {
    let (app, _) = app();

    let response = app.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");

    let response = app.oneshot(get("/ready", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_info_reports_model() {
    let (app, _) = app();
    let response = app.oneshot(get("/api/info", None)).await.unwrap();
    let json = body_json(response).await;

    assert_eq!(json["model"]["name"], "echo-1");
    assert_eq!(json["input"]["min_chars"], 50);
    assert_eq!(json["lengths"]["medium"], serde_json::json!([80, 200]));
}

#[tokio::test]
async fn test_short_input_is_rejected_without_model_call() {
    let (app, provider) = app();
    let request = json_request(
        "/api/summarize",
        serde_json::json!({"extracted_text": "Quantum computing uses qubits.", "length": "short"}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["type"], "input_too_short");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_summarize_medium() {
    let (app, provider) = app();
    let request = json_request(
        "/api/summarize",
        serde_json::json!({"manual_text": words(200), "length": "medium"}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["min_length"], 80);
    assert_eq!(json["max_length"], 200);
    assert_eq!(json["stats"]["words"], 200);
    assert_eq!(json["model"], "echo-1");
    let summary = json["summary"].as_str().unwrap();
    assert!(!summary.is_empty());
    assert_eq!(summary, summary.trim());

    let bounds = provider.bounds.lock().unwrap().clone();
    assert_eq!(bounds, vec![LengthBounds { min_length: 80, max_length: 200 }]);
}

#[tokio::test]
async fn test_summarize_combines_sources() {
    let (app, _) = app();
    let request = json_request(
        "/api/summarize",
        serde_json::json!({
            "manual_text": "  Lecture one covers cell membranes and transport.  ",
            "extracted_text": "Chapter two is about enzymes and reaction rates.",
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["length"], "short");
    assert_eq!(json["summary"], "Lecture one covers cell membranes and transport.");
    assert_eq!(json["stats"]["words"], 15);
}

#[tokio::test]
async fn test_export_txt_round_trip() {
    let (app, _) = app();
    let summary = "Résumé of the lecture: qubits – superposition.";
    let request = json_request("/api/export/txt", serde_json::json!({"summary": summary}));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"summary_"));
    assert!(disposition.ends_with(".txt\""));
    assert_eq!(String::from_utf8(body_bytes(response).await).unwrap(), summary);
}

#[tokio::test]
async fn test_export_pdf_and_empty_summary() {
    let (app, _) = app();

    let request = json_request(
        "/api/export/pdf",
        serde_json::json!({"summary": "Line one.\nLine two."}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert!(body_bytes(response).await.starts_with(b"%PDF"));

    let request = json_request("/api/export/pdf", serde_json::json!({"summary": "   "}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"]["type"], "no_summary");
}

#[tokio::test]
async fn test_extract_pdf() {
    let (app, _) = app();
    let pdf = render_pdf("Quantum computing uses qubits.").unwrap();
    let request = multipart_request(
        "/api/extract",
        None,
        &[Part::File("qubits.pdf", "application/pdf", &pdf)],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["filename"], "qubits.pdf");
    assert_eq!(json["status"], "extracted");
    assert_eq!(json["page_count"], 1);
    assert_eq!(json["truncated"], false);
    assert_eq!(json["text"].as_str().unwrap().trim(), "Quantum computing uses qubits.");
}

#[tokio::test]
async fn test_extract_rejects_other_types() {
    let (app, _) = app();

    let request = multipart_request(
        "/api/extract",
        None,
        &[Part::File("notes.txt", "text/plain", b"plain notes")],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let request = multipart_request(
        "/api/extract",
        None,
        &[Part::File("broken.pdf", "application/pdf", b"not really a pdf")],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = multipart_request("/api/extract", None, &[Part::Text("other", "x")]);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_generate_download_clear() {
    let (app, provider) = app();

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!html.contains("/download/txt"));

    let text = words(200);
    let request = multipart_request(
        "/generate",
        Some(&cookie),
        &[Part::Text("manual_text", &text), Part::Text("length", "medium")],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    let response = app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Summary generated!"));
    assert!(html.contains("/download/txt"));
    assert!(html.contains("/download/pdf"));
    assert!(html.contains(r#"<option value="medium" selected>"#));

    let response = app.clone().oneshot(get("/download/txt", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let summary = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(summary, text);

    let response = app
        .clone()
        .oneshot(multipart_request("/clear", Some(&cookie), &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let fresh = session_cookie(&response);
    assert_ne!(fresh, cookie);

    let response = app.clone().oneshot(get("/", Some(&fresh))).await.unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!html.contains("/download/txt"));
    assert!(!html.contains("note199"));

    let response = app.oneshot(get("/download/txt", Some(&fresh))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_page_short_upload_warns() {
    let (app, provider) = app();
    let pdf = render_pdf("Quantum computing uses qubits.").unwrap();

    let request = multipart_request(
        "/generate",
        None,
        &[
            Part::File("qubits.pdf", "application/pdf", &pdf),
            Part::Text("manual_text", ""),
            Part::Text("length", "short"),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response);

    let response = app.oneshot(get("/", Some(&cookie))).await.unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();

    assert!(html.contains("PDF text extracted successfully!"));
    assert!(html.contains("Please enter at least 50 characters or upload a PDF with text."));
    assert!(html.contains("Quantum computing uses qubits."));
    assert!(!html.contains("/download/txt"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_page_failed_upload_forgets_previous_document() {
    let (app, provider) = app();
    let pdf = render_pdf(&words(40)).unwrap();

    let request = multipart_request(
        "/generate",
        None,
        &[Part::File("a.pdf", "application/pdf", &pdf)],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let cookie = session_cookie(&response);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    let response = app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Summary generated!"));

    let request = multipart_request(
        "/generate",
        Some(&cookie),
        &[
            Part::File("b.pdf", "application/pdf", b"garbage bytes"),
            Part::Text("manual_text", "Too short."),
        ],
    );
    app.clone().oneshot(request).await.unwrap();

    let response = app.oneshot(get("/", Some(&cookie))).await.unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();

    assert!(html.contains("Failed to extract PDF text"));
    assert!(html.contains("Please enter at least 50 characters"));
    assert!(!html.contains("Summary generated!"));
    assert!(!html.contains("/download/txt"));
    assert!(!html.contains("note39"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}
