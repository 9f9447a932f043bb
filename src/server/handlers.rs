use super::types::{
    AboutTemplate, AnalyzeForm, ContactTemplate, DownloadForm, ErrorResponse, IndexTemplate,
    ResultTemplate,
};
use crate::{
    Error, Result,
    analysis::{AnalysisRequest, Analyzer},
    chart::PlotKind,
    report::{ARCHIVE_FILE_NAME, Report},
};
use askama::Template;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const NO_TEXT_ERROR: &str = "No text provided.";
pub const NO_PLOT_TYPE_ERROR: &str = "No plot type provided.";

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

type HandlerResult<T> = std::result::Result<T, (StatusCode, Json<ErrorResponse>)>;

pub async fn index() -> HandlerResult<Html<String>> {
    render(&IndexTemplate)
}

pub async fn about() -> HandlerResult<Html<String>> {
    render(&AboutTemplate)
}

pub async fn contact() -> HandlerResult<Html<String>> {
    render(&ContactTemplate)
}

pub async fn analyze(
    State(state): State<AppState>,
    Form(form): Form<AnalyzeForm>,
) -> HandlerResult<Html<String>> {
    if form.text.trim().is_empty() {
        warn!("Rejected analysis request without text");
        return Err(error_response(StatusCode::BAD_REQUEST, NO_TEXT_ERROR));
    }

    let Some(plot_type) = form.plot_type else {
        warn!("Rejected analysis request without plot type");
        return Err(error_response(StatusCode::BAD_REQUEST, NO_PLOT_TYPE_ERROR));
    };

    let request = plot_type
        .parse::<PlotKind>()
        .and_then(|plot_type| AnalysisRequest::new(form.text, plot_type))
        .map_err(into_response_error)?;

    let result = state
        .analyzer
        .analyze(&request)
        .await
        .map_err(into_response_error)?;

    render(&ResultTemplate {
        plot_data: result.plot_base64(),
        original_text: result.original_text,
        summarized_text: result.summarized_text,
        similarity_score: result.similarity_score,
    })
}

pub async fn download(Form(form): Form<DownloadForm>) -> HandlerResult<Response> {
    let archive = tokio::task::spawn_blocking(move || build_archive(&form))
        .await
        .map_err(|e| into_response_error(e.into()))?
        .map_err(into_response_error)?;

    info!("Serving report archive ({} bytes)", archive.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", ARCHIVE_FILE_NAME),
            ),
        ],
        archive,
    )
        .into_response())
}

fn build_archive(form: &DownloadForm) -> Result<Vec<u8>> {
    let plot_png = STANDARD.decode(form.plot_data.trim())?;
    Report {
        original_text: &form.original_text,
        summarized_text: &form.summarized_text,
        similarity_score: &form.similarity_score,
        plot_png: &plot_png,
    }
    .package()
}

fn render<T: Template>(template: &T) -> HandlerResult<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| into_response_error(Error::from(e)))
}

fn into_response_error(e: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = e.status_code();
    if e.is_client_error() {
        warn!("Rejected request: {}", e);
        let message = match e {
            Error::InvalidInput(msg) => msg,
            other => other.to_string(),
        };
        error_response(status, &message)
    } else {
        error!("Request failed: {}", e);
        error_response(status, "Internal server error")
    }
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
