use std::path::PathBuf;

use anon_api::Client;
use anon_core::Backend;
use anyhow::Result;

/// Upload a document and print the text the server extracted from it
pub async fn handle(client: &Client, file: PathBuf) -> Result<()> {
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    let bytes = std::fs::read(&file)?;
    let text = client.extract(&file_name, bytes).await?;
    println!("{text}");
    Ok(())
}
