//! Summarization providers.
//!
//! The web layer only sees the [`Summarizer`] trait. Two providers exist:
//! an OpenAI-compatible chat model producing abstractive summaries, and an
//! offline extractive summarizer that picks the highest-scoring sentences.

mod extractive;
mod llm;

pub use extractive::ExtractiveSummarizer;
pub use llm::LlmSummarizer;

use crate::{
    Error, Result,
    config::{SummarizerConfig, SummarizerProvider},
    llm::OpenAiClient,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Length bounds of a summary, counted in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    pub max_length: usize,
    pub min_length: usize,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self {
            max_length: 300,
            min_length: 50,
        }
    }
}

impl SummaryBounds {
    pub fn new(max_length: usize, min_length: usize) -> Result<Self> {
        let bounds = Self {
            max_length,
            min_length,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(Error::invalid_input("max_length must be positive"));
        }
        if self.min_length > self.max_length {
            return Err(Error::invalid_input(format!(
                "min_length ({}) exceeds max_length ({})",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

impl From<&SummarizerConfig> for SummaryBounds {
    fn from(config: &SummarizerConfig) -> Self {
        Self {
            max_length: config.max_length,
            min_length: config.min_length,
        }
    }
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String>;
}

/// Builds the summarizer selected by the configuration.
pub fn from_config(config: &SummarizerConfig) -> Arc<dyn Summarizer> {
    match config.provider {
        SummarizerProvider::OpenAi => {
            info!("Using OpenAI-compatible summarizer with model {}", config.model);
            let client = OpenAiClient::new(config);
            Arc::new(LlmSummarizer::new(
                Arc::new(client),
                config.system_prompt.clone(),
            ))
        }
        SummarizerProvider::Extractive => {
            info!("Using extractive summarizer");
            Arc::new(ExtractiveSummarizer::new())
        }
    }
}
