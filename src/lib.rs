pub mod analysis;
pub mod chart;
pub mod config;
pub mod error;
pub mod llm;
pub mod report;
pub mod server;
pub mod similarity;
pub mod summarizer;
pub mod text;

pub use error::{Error, Result};
