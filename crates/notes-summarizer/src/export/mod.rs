//! Downloadable artifacts for a generated summary

pub mod encoding;
pub mod pdf;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use pdf::{render_pdf, PageLayout};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain; charset=utf-8",
            Self::Pdf => "application/pdf",
        }
    }
}

/// A file ready to be downloaded
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// `Content-Disposition` header value
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// `summary_<YYYYMMDD_HHMMSS>.<ext>`
pub fn artifact_filename<Tz: TimeZone>(format: ExportFormat, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("summary_{}.{}", at.format("%Y%m%d_%H%M%S"), format.extension())
}

/// Build an artifact stamped with the current local time
pub fn export(summary: &str, format: ExportFormat) -> Result<ExportArtifact> {
    export_at(summary, format, &Local::now())
}

/// Build an artifact stamped with `at`
pub fn export_at<Tz: TimeZone>(
    summary: &str,
    format: ExportFormat,
    at: &DateTime<Tz>,
) -> Result<ExportArtifact>
where
    Tz::Offset: std::fmt::Display,
{
    if summary.trim().is_empty() {
        return Err(Error::NoSummary);
    }

    let bytes = match format {
        ExportFormat::Txt => summary.as_bytes().to_vec(),
        ExportFormat::Pdf => render_pdf(summary)?,
    };

    let artifact = ExportArtifact {
        format,
        filename: artifact_filename(format, at),
        bytes,
    };
    tracing::info!("Exported {} ({} bytes)", artifact.filename, artifact.bytes.len());
    Ok(artifact)
}
