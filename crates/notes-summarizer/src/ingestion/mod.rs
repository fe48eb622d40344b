//! Document text extraction

mod parser;

#[cfg(test)]
pub(crate) mod fixtures;

pub use parser::{extract_pages, is_pdf, Extraction, PdfExtractor};
