use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anon")]
#[command(about = "Client for a text anonymisation service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Anonymise text non-interactively
    Run {
        /// Text to anonymise (reads stdin when neither TEXT nor --file is given)
        text: Option<String>,

        /// Upload a document and anonymise its extracted text
        #[arg(long)]
        file: Option<PathBuf>,

        /// Sensitivity level: low, medium, high (default from config)
        #[arg(long)]
        level: Option<String>,

        /// Processing mode: stepwise, ai (default from config)
        #[arg(long)]
        mode: Option<String>,

        /// In stepwise mode, take the first suggestion for every entity
        /// instead of keeping the original text
        #[arg(long)]
        auto_suggest: bool,

        /// Print the highlighted form (with <mark> markup) instead of clean text
        #[arg(long)]
        highlighted: bool,

        /// Save the report and print download links
        #[arg(long)]
        save: bool,

        /// Write the clean output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Upload a document and print the extracted text
    Extract {
        /// Document to upload (.txt, .pdf, .docx)
        file: PathBuf,
    },

    /// Interactive per-entity review
    Review {
        /// Text to prefill the input with
        text: Option<String>,

        /// Upload a document and prefill with its extracted text
        #[arg(long)]
        file: Option<PathBuf>,

        /// Sensitivity level: low, medium, high (default from config)
        #[arg(long)]
        level: Option<String>,

        /// Processing mode: stepwise, ai (default from config)
        #[arg(long)]
        mode: Option<String>,
    },

    /// Download a saved report
    Download {
        /// Record identifier returned on save
        record_id: String,

        /// Export format: pdf, docx, txt
        #[arg(long, default_value = "txt")]
        format: String,

        /// Destination path (default: report_<id>.<format>)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
