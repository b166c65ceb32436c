use std::path::PathBuf;

use anon_api::Client;
use anon_core::{Backend, Level, Mode};
use anyhow::Result;

/// Launch the interactive review TUI, optionally prefilled with text or
/// with a document's extracted text
pub async fn handle(
    client: Client,
    text: Option<String>,
    file: Option<PathBuf>,
    level: Level,
    mode: Mode,
) -> Result<()> {
    let initial_text = match (text, file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "upload".to_string());
            let bytes = std::fs::read(&path)?;
            Some(client.extract(&file_name, bytes).await?)
        }
        (None, None) => None,
    };

    anon_tui::run(client, level, mode, initial_text).await
}
