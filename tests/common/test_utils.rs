use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde::Serialize;
use summary_lens::{
    analysis::Analyzer,
    config::{ChartConfig, Config},
    server::{self, AppState},
    summarizer::Summarizer,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

/// Create a test configuration with a small chart to keep rendering fast
pub fn create_test_config() -> Config {
    Config {
        chart: ChartConfig {
            width: 320,
            height: 240,
        },
        ..Config::default()
    }
}

/// Build the application router around the given summarizer
pub fn create_test_app(summarizer: Arc<dyn Summarizer>) -> Router {
    let config = create_test_config();
    let state = AppState {
        analyzer: Arc::new(Analyzer::with_summarizer(&config, summarizer)),
    };
    server::router(state, config.server.max_body_bytes)
}

/// Build a urlencoded form POST request
pub fn form_request<T: Serialize>(uri: &str, form: &T) -> Request<Body> {
    let body = serde_urlencoded::to_string(form).expect("Failed to encode form");
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}

pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("Response body is not UTF-8")
}

/// Extracts the `value` attribute of the hidden input called `name` from a
/// rendered result page, undoing the HTML escaping applied by the template.
pub fn hidden_input_value(html: &str, name: &str) -> Option<String> {
    let marker = format!("name=\"{}\" value=\"", name);
    let start = html.find(&marker)? + marker.len();
    let end = start + html[start..].find('"')?;
    Some(unescape_html(&html[start..end]))
}

fn unescape_html(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&#x2f;", "/")
        .replace("&#x2F;", "/")
        .replace("&amp;", "&")
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content)
        .await
        .expect("Failed to write config file");
    config_path.to_string_lossy().to_string()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"

summarizer:
  provider: "openai"
  base_url: "http://localhost:11434/v1"
  api_key: "test-api-key"
  model: "llama3"
  system_prompt: "Summarize tersely."
  max_length: 120
  min_length: 20

similarity:
  max_features: 1000
  stop_words: false

chart:
  width: 800
  height: 600
"#;

/// Configuration whose summary bounds are inverted
pub const INVERTED_BOUNDS_CONFIG_YAML: &str = r#"
summarizer:
  max_length: 10
  min_length: 40
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;
