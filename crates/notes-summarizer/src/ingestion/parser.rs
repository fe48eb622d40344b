//! PDF text extraction

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::types::{preview, ExtractionStatus, TextStats};

/// Text recovered from a document
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Pages in the document
    pub page_count: usize,
    /// Text per page in page order ("" for pages without text).
    /// Holds a single entry when the whole-document fallback was used.
    pub pages: Vec<String>,
    /// Concatenation of `pages`
    pub text: String,
}

impl Extraction {
    fn from_pages(page_count: usize, pages: Vec<String>) -> Self {
        let text = pages.concat();
        Self {
            page_count,
            pages,
            text,
        }
    }

    /// Whether any non-whitespace text was found
    pub fn status(&self) -> ExtractionStatus {
        if self.text.trim().is_empty() {
            ExtractionStatus::NoText
        } else {
            ExtractionStatus::Extracted
        }
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.text)
    }

    /// Truncated preview of the text and whether it was cut
    pub fn preview(&self, limit: usize) -> (String, bool) {
        preview(&self.text, limit)
    }
}

/// Whether an upload is declared as a PDF
pub fn is_pdf(filename: &str, content_type: Option<&str>) -> bool {
    let by_extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    let by_mime = content_type
        .map(|ct| ct.trim().eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false);
    by_extension || by_mime
}

fn clean_page_text(text: &str) -> String {
    let text = text.replace('\0', "");
    if text.trim().is_empty() {
        String::new()
    } else {
        text
    }
}

/// Extract per-page text from PDF bytes.
///
/// Decode failures are errors; pages whose text cannot be decoded contribute
/// an empty string. If no page yields text, a whole-document pass through
/// `pdf-extract` is tried before giving up.
pub fn extract_pages(filename: &str, data: &[u8]) -> Result<Extraction> {
    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| Error::extraction(filename, format!("Failed to load PDF: {}", e)))?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let page_count = page_numbers.len();

    let mut pages = Vec::with_capacity(page_count);
    for number in &page_numbers {
        match doc.extract_text(&[*number]) {
            Ok(text) => pages.push(clean_page_text(&text)),
            Err(e) => {
                tracing::debug!("No text decoded from page {} of {}: {}", number, filename, e);
                pages.push(String::new());
            }
        }
    }

    if page_count > 0 && pages.iter().all(|p| p.trim().is_empty()) {
        if let Some(text) = extract_whole_document(filename, data) {
            return Ok(Extraction::from_pages(page_count, vec![text]));
        }
    }

    Ok(Extraction::from_pages(page_count, pages))
}

/// Whole-document fallback for fonts lopdf cannot decode
fn extract_whole_document(filename: &str, data: &[u8]) -> Option<String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(data)
    }));

    match result {
        Ok(Ok(text)) => {
            let text = clean_page_text(&text);
            if text.trim().is_empty() {
                None
            } else {
                tracing::info!("pdf-extract recovered text from {}", filename);
                Some(text)
            }
        }
        Ok(Err(e)) => {
            tracing::warn!("pdf-extract fallback failed for {}: {}", filename, e);
            None
        }
        Err(_) => {
            tracing::warn!("pdf-extract fallback panicked for {}", filename);
            None
        }
    }
}

/// Runs extraction off the async runtime with a time limit
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    timeout: Duration,
}

impl PdfExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Extract text from an uploaded document
    pub async fn extract(
        &self,
        filename: &str,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) -> Result<Extraction> {
        if !is_pdf(filename, content_type) {
            return Err(Error::UnsupportedFileType(format!(
                "{} - only PDF documents are accepted",
                filename
            )));
        }

        let start = Instant::now();
        let size = data.len();
        let name = filename.to_string();
        let task = tokio::task::spawn_blocking(move || extract_pages(&name, &data));

        let extraction = match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result?,
            Ok(Err(e)) => {
                tracing::error!("PDF extraction worker crashed for {}: {}", filename, e);
                return Err(Error::extraction(filename, "extraction worker crashed"));
            }
            Err(_) => {
                tracing::error!(
                    "PDF extraction timeout for '{}' after {}s ({} bytes)",
                    filename,
                    self.timeout.as_secs(),
                    size
                );
                return Err(Error::extraction(
                    filename,
                    format!("timed out after {}s", self.timeout.as_secs()),
                ));
            }
        };

        tracing::info!(
            "Extracted {} chars from {} ({} pages) in {:.1}s",
            extraction.text.chars().count(),
            filename,
            extraction.page_count,
            start.elapsed().as_secs_f64()
        );
        Ok(extraction)
    }
}
