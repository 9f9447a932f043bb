use async_trait::async_trait;
use summary_lens::{
    Error, Result,
    summarizer::{Summarizer, SummaryBounds},
};
use std::sync::{Arc, Mutex};

/// Mock summarizer for testing
#[derive(Debug)]
pub struct MockSummarizer {
    pub summary: String,
    pub requests: Arc<Mutex<Vec<(String, SummaryBounds)>>>,
    pub error: Option<String>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<(String, SummaryBounds)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), bounds));

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        Ok(self.summary.clone())
    }
}
