//! One end-to-end analysis: summarize, normalize, score and chart.

use crate::{
    Error, Result,
    chart::{ChartRenderer, PlotKind},
    config::Config,
    similarity::TfidfVectorizer,
    summarizer::{self, Summarizer, SummaryBounds},
    text::normalize,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub const CHART_LABELS: [&str; 2] = ["Original Text", "Summarized Text"];

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub original_text: String,
    pub plot_type: PlotKind,
}

impl AnalysisRequest {
    /// Rejects empty or whitespace-only text.
    pub fn new(original_text: impl Into<String>, plot_type: PlotKind) -> Result<Self> {
        let original_text = original_text.into();
        if original_text.trim().is_empty() {
            return Err(Error::invalid_input("No text provided."));
        }
        Ok(Self {
            original_text,
            plot_type,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub original_text: String,
    pub summarized_text: String,
    pub similarity_score: f64,
    pub plot_png: Vec<u8>,
}

impl AnalysisResult {
    pub fn plot_base64(&self) -> String {
        STANDARD.encode(&self.plot_png)
    }
}

pub struct Analyzer {
    summarizer: Arc<dyn Summarizer>,
    bounds: SummaryBounds,
    vectorizer: TfidfVectorizer,
    renderer: ChartRenderer,
}

impl Analyzer {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        bounds: SummaryBounds,
        vectorizer: TfidfVectorizer,
        renderer: ChartRenderer,
    ) -> Self {
        Self {
            summarizer,
            bounds,
            vectorizer,
            renderer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_summarizer(config, summarizer::from_config(&config.summarizer))
    }

    /// Uses the configured scoring and chart settings with a caller-supplied
    /// summarizer.
    pub fn with_summarizer(config: &Config, summarizer: Arc<dyn Summarizer>) -> Self {
        Self::new(
            summarizer,
            SummaryBounds::from(&config.summarizer),
            TfidfVectorizer::new(&config.similarity),
            ChartRenderer::new(&config.chart),
        )
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let analysis_id = Uuid::new_v4();
        info!(
            "Analysis {} started ({} chars, {} plot)",
            analysis_id,
            request.original_text.len(),
            request.plot_type
        );

        let summarized_text = self
            .summarizer
            .summarize(&request.original_text, self.bounds)
            .await?;

        let original_clean = normalize(&request.original_text);
        let summarized_clean = normalize(&summarized_text);
        let similarity_score = self
            .vectorizer
            .similarity(&original_clean, &summarized_clean)?;

        let renderer = self.renderer.clone();
        let plot_type = request.plot_type;
        let plot_png = tokio::task::spawn_blocking(move || {
            renderer.render(&CHART_LABELS, &[1.0, similarity_score], plot_type)
        })
        .await??;

        info!(
            "Analysis {} finished: similarity {:.4}, summary {} chars",
            analysis_id,
            similarity_score,
            summarized_text.len()
        );

        Ok(AnalysisResult {
            original_text: request.original_text.clone(),
            summarized_text,
            similarity_score,
            plot_png,
        })
    }
}
