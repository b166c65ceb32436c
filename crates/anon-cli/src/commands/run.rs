use std::io::Read;
use std::path::PathBuf;

use anon_api::Client;
use anon_core::{Backend, DownloadFormat, Level, Mode, Phase, ReviewSession};
use anyhow::{bail, Result};

pub struct RunOptions {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub level: Level,
    pub mode: Mode,
    pub auto_suggest: bool,
    pub highlighted: bool,
    pub save: bool,
    pub output: Option<PathBuf>,
}

/// Non-interactive anonymisation: the CLI stand-in for the browser's
/// no-review submission path. Runs the same session controller the TUI
/// uses, with an automatic choice policy instead of manual review.
pub async fn handle(client: &Client, opts: RunOptions) -> Result<()> {
    let text = read_input(client, opts.text, opts.file).await?;

    let mut session = ReviewSession::new();
    let epoch = session.start(&text, opts.level, opts.mode)?;

    match opts.mode {
        Mode::OneShot => {
            let output = client.finalize_one_shot(&text, opts.level).await?;
            session.apply_one_shot(epoch, output);
        }
        Mode::Stepwise => {
            let steps = client.detect(&text, opts.level).await?;
            let count = steps.len();
            session.apply_detection(epoch, steps);

            if session.phase() == Phase::Reviewing {
                eprintln!("Detected {count} entities");
                if opts.auto_suggest {
                    apply_first_suggestions(&mut session);
                }
                let (epoch, original_text, choices) = session.begin_finalize()?;
                let output = client.finalize(&original_text, &choices).await?;
                session.apply_final(epoch, output);
            } else {
                eprintln!("No personal data detected; text unchanged");
            }
        }
    }

    let Some(output) = session.output() else {
        bail!("No output produced");
    };
    let rendered = if opts.highlighted {
        output.anonymized_text_highlighted.clone()
    } else {
        output.anonymized_text_clean.clone()
    };

    match &opts.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }

    if opts.save {
        let receipt = client.save(&session.save_payload()?).await?;
        eprintln!("Report saved");
        if let Some(record_id) = &receipt.record_id {
            for format in DownloadFormat::ALL {
                eprintln!("  {}", client.download_url(record_id, format));
            }
        } else if let Some(url) = &receipt.redirect_url {
            eprintln!("  View at: {url}");
        }
    }

    Ok(())
}

/// Walk every step and pick the server's first suggestion where one exists
fn apply_first_suggestions(session: &mut ReviewSession) {
    for index in 0..session.steps().len() {
        let suggestion = session.steps()[index].suggestions.first().cloned();
        if let Some(value) = suggestion {
            session.set_replacement(value);
        }
        session.next();
    }
}

async fn read_input(
    client: &Client,
    text: Option<String>,
    file: Option<PathBuf>,
) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let bytes = std::fs::read(&path)?;
        return client.extract(&file_name, bytes).await;
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
