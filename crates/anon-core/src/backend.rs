//! Backend trait describing the anonymisation service

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entity::{Choice, EntityStep, FinalOutput, Level, Mode};
use crate::error::Error;

/// Payload for the persistence endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    pub original_text: String,
    pub anonymized_text_highlighted: String,
    pub anonymized_text_clean: String,
    pub model: Mode,
    pub level: Level,
}

/// Result of a successful save: where to go next and how to download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub record_id: Option<String>,
    pub redirect_url: Option<String>,
}

/// Export format for saved records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Pdf,
    Docx,
    Txt,
}

impl DownloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadFormat::Pdf => "pdf",
            DownloadFormat::Docx => "docx",
            DownloadFormat::Txt => "txt",
        }
    }

    pub const ALL: [DownloadFormat; 3] = [
        DownloadFormat::Pdf,
        DownloadFormat::Docx,
        DownloadFormat::Txt,
    ];
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DownloadFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(DownloadFormat::Pdf),
            "docx" => Ok(DownloadFormat::Docx),
            "txt" => Ok(DownloadFormat::Txt),
            other => Err(Error::InvalidFormat(other.to_string())),
        }
    }
}

/// Operations the external anonymisation backend provides
///
/// Each method is one HTTP round trip; implementations live in `anon-api`.
/// Tests drive the workflow with an in-memory fake.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Upload a document, get its plain text back
    async fn extract(&self, file_name: &str, bytes: Vec<u8>) -> anyhow::Result<String>;

    /// Detect personal-data entities in text at the given sensitivity level
    async fn detect(&self, text: &str, level: Level) -> anyhow::Result<Vec<EntityStep>>;

    /// Apply per-entity choices to the original text (stepwise mode)
    async fn finalize(&self, original_text: &str, choices: &[Choice])
        -> anyhow::Result<FinalOutput>;

    /// One-shot AI anonymisation, no per-entity review
    async fn finalize_one_shot(&self, original_text: &str, level: Level)
        -> anyhow::Result<FinalOutput>;

    /// Persist a finalized report
    async fn save(&self, report: &SaveRequest) -> anyhow::Result<SaveReceipt>;

    /// Address of a saved record in the given export format
    fn download_url(&self, record_id: &str, format: DownloadFormat) -> String;
}
