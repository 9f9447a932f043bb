use super::{Summarizer, SummaryBounds};
use crate::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a summarization engine. Rewrite the user's text \
as a concise abstractive summary that preserves its key facts. Reply with the summary only.";

/// Rough upper bound of tokens per English word, used to cap completions.
const TOKENS_PER_WORD: usize = 2;

/// Abstractive summarizer backed by a chat-completion model.
pub struct LlmSummarizer {
    client: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl LlmSummarizer {
    pub fn new(client: Arc<dyn LlmClient>, system_prompt: Option<String>) -> Self {
        Self {
            client,
            system_prompt: system_prompt.unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    fn build_request(&self, text: &str, bounds: SummaryBounds) -> ChatCompletionRequest {
        let instruction = format!(
            "Summarize the following text in {} to {} words.\n\n{}",
            bounds.min_length, bounds.max_length, text
        );

        ChatCompletionRequest {
            messages: vec![
                ChatMessage::system(self.system_prompt.clone()),
                ChatMessage::user(instruction),
            ],
            max_completion_tokens: Some(completion_token_cap(bounds.max_length)),
            temperature: Some(0.0),
        }
    }
}

/// Token cap for a summary of at most `max_words` words, saturating at `u32::MAX`.
fn completion_token_cap(max_words: usize) -> u32 {
    u32::try_from(max_words.saturating_mul(TOKENS_PER_WORD)).unwrap_or(u32::MAX)
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String> {
        bounds.validate()?;

        let request = self.build_request(text, bounds);
        let response = self.client.create_chat_completion(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Summary used {} prompt and {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        if response.is_truncated() {
            warn!("Summary was cut off at the completion token cap");
        }

        let summary = response.first_content().map(str::trim).unwrap_or_default();
        if summary.is_empty() {
            return Err(Error::llm("Model returned an empty summary"));
        }

        Ok(summary.to_string())
    }
}
