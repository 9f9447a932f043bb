//! TF-IDF vectorization and cosine similarity over a two-document corpus.

use crate::{
    Error, Result,
    config::SimilarityConfig,
    text::{StopWords, tokenize},
};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    stop_words: StopWords,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(&SimilarityConfig::default())
    }
}

impl TfidfVectorizer {
    pub fn new(config: &SimilarityConfig) -> Self {
        let stop_words = if config.stop_words {
            StopWords::english()
        } else {
            StopWords::none()
        };
        Self {
            max_features: config.max_features,
            stop_words,
        }
    }

    /// Learns a vocabulary from `documents` and returns one L2-normalized
    /// TF-IDF vector per document, indexed by vocabulary position.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<Vec<Vec<f64>>> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| self.term_counts(doc))
            .collect();

        let vocabulary = self.build_vocabulary(&counts);
        if vocabulary.is_empty() {
            return Err(Error::similarity(
                "empty vocabulary; documents only contain stop words",
            ));
        }

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = counts.iter().filter(|c| c.contains_key(term)).count() as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vectors = counts
            .iter()
            .map(|doc_counts| {
                let mut vector: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, idf)| doc_counts.get(term).copied().unwrap_or(0) as f64 * idf)
                    .collect();
                l2_normalize(&mut vector);
                vector
            })
            .collect();

        Ok(vectors)
    }

    /// Cosine similarity between two documents, in `[0, 1]`.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        let vectors = self.fit_transform(&[a, b])?;
        let score = cosine_similarity(&vectors[0], &vectors[1]);
        debug!("Computed TF-IDF cosine similarity: {:.4}", score);
        Ok(score)
    }

    fn term_counts(&self, document: &str) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for token in tokenize(document) {
            if self.stop_words.contains(&token) {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }

    /// Keeps the `max_features` most frequent terms across the corpus, ties
    /// broken alphabetically, and returns them sorted alphabetically.
    fn build_vocabulary(&self, counts: &[HashMap<String, usize>]) -> Vec<String> {
        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        for doc_counts in counts {
            for (term, count) in doc_counts {
                *totals.entry(term.as_str()).or_insert(0) += count;
            }
        }

        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|(a_term, a_count), (b_term, b_count)| {
            b_count.cmp(a_count).then_with(|| a_term.cmp(b_term))
        });
        ranked.truncate(self.max_features);

        let kept: HashSet<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        let mut vocabulary: Vec<String> = kept.into_iter().map(str::to_string).collect();
        vocabulary.sort();
        vocabulary
    }
}

/// Cosine similarity of two vectors, `0.0` when either has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
