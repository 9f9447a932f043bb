//! Downloadable analysis report: a plain-text summary and the chart image
//! bundled in a zip archive.

use crate::Result;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

pub const REPORT_FILE_NAME: &str = "analysis_results.txt";
pub const PLOT_FILE_NAME: &str = "plot.png";
pub const ARCHIVE_FILE_NAME: &str = "analysis_results.zip";

#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub original_text: &'a str,
    pub summarized_text: &'a str,
    /// Score as displayed to the user; kept verbatim in the report.
    pub similarity_score: &'a str,
    pub plot_png: &'a [u8],
}

impl Report<'_> {
    pub fn text(&self) -> String {
        report_text(
            self.original_text,
            self.summarized_text,
            self.similarity_score,
        )
    }

    /// Writes the report and chart into an in-memory zip archive.
    ///
    /// Entries are stored uncompressed with the zip epoch as timestamp, so
    /// identical inputs produce identical archives.
    pub fn package(&self) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(DateTime::default());

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(REPORT_FILE_NAME, options)?;
        writer.write_all(self.text().as_bytes())?;
        writer.start_file(PLOT_FILE_NAME, options)?;
        writer.write_all(self.plot_png)?;

        let archive = writer.finish()?.into_inner();
        debug!("Packaged report archive ({} bytes)", archive.len());
        Ok(archive)
    }
}

pub fn report_text(original_text: &str, summarized_text: &str, similarity_score: &str) -> String {
    format!(
        "Original Text:\n{original_text}\n\nSummarized Text:\n{summarized_text}\n\nSimilarity Score: {similarity_score}\n"
    )
}
