use axum::http::{StatusCode, header};
use base64::{Engine, engine::general_purpose::STANDARD};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::{
    io::{Cursor, Read},
    sync::Arc,
};
use summary_lens::{
    report::{PLOT_FILE_NAME, REPORT_FILE_NAME},
    summarizer::ExtractiveSummarizer,
};
use tower::ServiceExt; // for `oneshot`
use zip::ZipArchive;

mod common;

use common::{mocks::MockSummarizer, test_utils::*};

const ORIGINAL_TEXT: &str = "Rust is a systems programming language. \
    It guarantees memory safety without a garbage collector. \
    Its ownership model also prevents data races in concurrent code.";
const SUMMARY: &str = "Rust guarantees memory safety without a garbage collector.";

fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_end(&mut buf)
        .unwrap();
    buf
}

#[tokio::test]
async fn test_index_renders_form() {
    let app = create_test_app(Arc::new(MockSummarizer::new(SUMMARY)));

    let response = app.oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("action=\"/analyze\""));
    assert!(html.contains("name=\"text\""));
    assert!(html.contains("name=\"plot_type\""));
}

#[tokio::test]
async fn test_static_pages() {
    for (uri, heading) in [("/about", "<h1>About</h1>"), ("/contact", "<h1>Contact</h1>")] {
        let app = create_test_app(Arc::new(MockSummarizer::new(SUMMARY)));
        let response = app.oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(heading));
    }
}

#[tokio::test]
async fn test_analyze_empty_text_returns_error_object() {
    let summarizer = Arc::new(MockSummarizer::new(SUMMARY));
    let app = create_test_app(summarizer.clone());

    for text in ["", "   \n"] {
        let request = form_request("/analyze", &[("text", text), ("plot_type", "bar")]);
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, json!({ "error": "No text provided." }));
    }

    assert!(summarizer.get_requests().is_empty());
}

#[tokio::test]
async fn test_analyze_text_checked_before_plot_type() {
    let summarizer = Arc::new(MockSummarizer::new(SUMMARY));
    let app = create_test_app(summarizer.clone());

    for fields in [vec![("text", "")], vec![], vec![("plot_type", "bar")]] {
        let request = form_request("/analyze", &fields);
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, json!({ "error": "No text provided." }));
    }

    assert!(summarizer.get_requests().is_empty());
}

#[tokio::test]
async fn test_analyze_missing_plot_type_returns_error_object() {
    let summarizer = Arc::new(MockSummarizer::new(SUMMARY));
    let app = create_test_app(summarizer.clone());

    let request = form_request("/analyze", &[("text", ORIGINAL_TEXT)]);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body, json!({ "error": "No plot type provided." }));
    assert!(summarizer.get_requests().is_empty());
}

#[tokio::test]
async fn test_analyze_unknown_plot_type_is_rejected() {
    let summarizer = Arc::new(MockSummarizer::new(SUMMARY));
    let app = create_test_app(summarizer.clone());

    let request = form_request("/analyze", &[("text", ORIGINAL_TEXT), ("plot_type", "pie")]);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("pie"));
    assert!(summarizer.get_requests().is_empty());
}

#[tokio::test]
async fn test_analyze_renders_result_page() {
    let summarizer = Arc::new(MockSummarizer::new(SUMMARY));
    let app = create_test_app(summarizer.clone());

    let request = form_request(
        "/analyze",
        &[("text", ORIGINAL_TEXT), ("plot_type", "scatter")],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains(SUMMARY));
    assert!(html.contains("It guarantees memory safety without a garbage collector."));
    assert!(html.contains("data:image/png;base64,iVBOR"));

    let score: f64 = hidden_input_value(&html, "similarity_score")
        .unwrap()
        .parse()
        .unwrap();
    assert!(score > 0.0 && score <= 1.0, "score was {score}");

    let requests = summarizer.get_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, ORIGINAL_TEXT);
    assert_eq!(requests[0].1.max_length, 300);
    assert_eq!(requests[0].1.min_length, 50);
}

#[tokio::test]
async fn test_analyze_escapes_user_text() {
    let app = create_test_app(Arc::new(MockSummarizer::new("A <b>bold</b> claim.")));

    let request = form_request(
        "/analyze",
        &[("text", "<script>alert('x')</script> plain words here."), ("plot_type", "bar")],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>bold</b>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_analyze_summarizer_failure_is_server_error() {
    let summarizer = MockSummarizer::new(SUMMARY).with_error("input too long");
    let app = create_test_app(Arc::new(summarizer));

    let request = form_request("/analyze", &[("text", ORIGINAL_TEXT), ("plot_type", "bar")]);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_download_returns_zip_with_report_and_plot() {
    let app = create_test_app(Arc::new(MockSummarizer::new(SUMMARY)));
    let plot = b"\x89PNG\r\n\x1a\nfake image data".to_vec();
    let plot_data = STANDARD.encode(&plot);

    let request = form_request(
        "/download",
        &[
            ("original_text", ORIGINAL_TEXT),
            ("summarized_text", SUMMARY),
            ("similarity_score", "0.6123"),
            ("plot_data", plot_data.as_str()),
        ],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/zip"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"analysis_results.zip\""
    );

    let mut archive = ZipArchive::new(Cursor::new(body_bytes(response).await)).unwrap();
    assert_eq!(archive.len(), 2);
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort();
    assert_eq!(names, vec![REPORT_FILE_NAME, PLOT_FILE_NAME]);

    let report = String::from_utf8(read_entry(&mut archive, REPORT_FILE_NAME)).unwrap();
    assert_eq!(
        report,
        format!(
            "Original Text:\n{ORIGINAL_TEXT}\n\nSummarized Text:\n{SUMMARY}\n\nSimilarity Score: 0.6123\n"
        )
    );
    assert_eq!(read_entry(&mut archive, PLOT_FILE_NAME), plot);
}

#[tokio::test]
async fn test_download_invalid_plot_data() {
    let app = create_test_app(Arc::new(MockSummarizer::new(SUMMARY)));

    let request = form_request(
        "/download",
        &[
            ("original_text", "text"),
            ("summarized_text", "summary"),
            ("similarity_score", "0.5"),
            ("plot_data", "%%% not base64 %%%"),
        ],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_missing_field_is_client_error() {
    let app = create_test_app(Arc::new(MockSummarizer::new(SUMMARY)));

    let request = form_request(
        "/download",
        &[("original_text", "text"), ("summarized_text", "summary")],
    );
    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[test_log::test(tokio::test)]
async fn test_analyze_then_download_round_trip() {
    let app = create_test_app(Arc::new(ExtractiveSummarizer::new()));
    let original = "Multi-line input stays intact.\nQuotes \"like these\" & ampersands survive too.";

    let request = form_request("/analyze", &[("text", original), ("plot_type", "bar")]);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;

    let original_field = hidden_input_value(&html, "original_text").unwrap();
    let summary_field = hidden_input_value(&html, "summarized_text").unwrap();
    let score_field = hidden_input_value(&html, "similarity_score").unwrap();
    let plot_field = hidden_input_value(&html, "plot_data").unwrap();
    assert_eq!(original_field, original);

    let request = form_request(
        "/download",
        &[
            ("original_text", original_field.as_str()),
            ("summarized_text", summary_field.as_str()),
            ("similarity_score", score_field.as_str()),
            ("plot_data", plot_field.as_str()),
        ],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut archive = ZipArchive::new(Cursor::new(body_bytes(response).await)).unwrap();
    let report = String::from_utf8(read_entry(&mut archive, REPORT_FILE_NAME)).unwrap();
    assert!(report.starts_with(&format!("Original Text:\n{original}\n\nSummarized Text:\n{summary_field}\n")));
    assert!(report.ends_with(&format!("Similarity Score: {score_field}\n")));

    let png = read_entry(&mut archive, PLOT_FILE_NAME);
    assert_eq!(png, STANDARD.decode(plot_field).unwrap());
    assert!(png.starts_with(b"\x89PNG"));
}
