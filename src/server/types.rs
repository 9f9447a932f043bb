use askama::Template;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub plot_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    pub original_text: String,
    pub summarized_text: String,
    pub similarity_score: String,
    pub plot_data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub original_text: String,
    pub summarized_text: String,
    pub similarity_score: f64,
    pub plot_data: String,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate;
