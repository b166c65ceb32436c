use std::path::PathBuf;

use anon_api::Client;
use anon_core::DownloadFormat;
use anyhow::Result;

/// Fetch a saved report in the given export format
pub async fn handle(
    client: &Client,
    record_id: String,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let format: DownloadFormat = format.parse()?;
    let bytes = client.download(&record_id, format).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("report_{record_id}.{format}")));
    std::fs::write(&path, &bytes)?;
    println!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
