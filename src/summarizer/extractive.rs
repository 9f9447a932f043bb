use super::{Summarizer, SummaryBounds};
use crate::{
    Result,
    text::{StopWords, split_sentences, tokenize},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

const FREQUENCY_WEIGHT: f64 = 0.7;
const POSITION_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone)]
struct ScoredSentence {
    text: String,
    position: usize,
    words: usize,
    score: f64,
}

/// Offline summarizer selecting the most representative sentences.
#[derive(Debug, Clone, Default)]
pub struct ExtractiveSummarizer {
    stop_words: StopWords,
}

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous core of [`Summarizer::summarize`].
    pub fn summarize_sync(&self, text: &str, bounds: SummaryBounds) -> Result<String> {
        bounds.validate()?;

        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Ok(String::new());
        }

        let mut ranked = self.score_sentences(&sentences);
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.position.cmp(&b.position))
        });

        let mut selected: Vec<&ScoredSentence> = Vec::new();
        let mut word_count = 0;
        for sentence in &ranked {
            if word_count >= bounds.min_length && !selected.is_empty() {
                break;
            }
            if word_count + sentence.words <= bounds.max_length {
                word_count += sentence.words;
                selected.push(sentence);
            }
        }

        if selected.is_empty() {
            // Every sentence is longer than max_length on its own.
            let best = &ranked[0];
            debug!(
                "Truncating sentence {} to {} words",
                best.position, bounds.max_length
            );
            return Ok(truncate_words(&best.text, bounds.max_length));
        }

        selected.sort_by_key(|s| s.position);
        debug!(
            "Selected {} of {} sentences ({} words)",
            selected.len(),
            sentences.len(),
            word_count
        );

        Ok(selected
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn score_sentences(&self, sentences: &[String]) -> Vec<ScoredSentence> {
        let tokenized: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| {
                tokenize(s)
                    .into_iter()
                    .filter(|t| !self.stop_words.contains(t))
                    .collect()
            })
            .collect();

        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for token in tokenized.iter().flatten() {
            *frequencies.entry(token.as_str()).or_insert(0) += 1;
        }
        let max_frequency = frequencies.values().copied().max().unwrap_or(1) as f64;

        let count = sentences.len() as f64;
        sentences
            .iter()
            .zip(&tokenized)
            .enumerate()
            .map(|(position, (text, tokens))| {
                let frequency_score = if tokens.is_empty() {
                    0.0
                } else {
                    tokens
                        .iter()
                        .map(|t| frequencies[t.as_str()] as f64 / max_frequency)
                        .sum::<f64>()
                        / tokens.len() as f64
                };
                let position_score = 1.0 - position as f64 / count;

                ScoredSentence {
                    text: text.clone(),
                    position,
                    words: text.split_whitespace().count(),
                    score: frequency_score * FREQUENCY_WEIGHT + position_score * POSITION_WEIGHT,
                }
            })
            .collect()
    }
}

fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String> {
        self.summarize_sync(text, bounds)
    }
}
