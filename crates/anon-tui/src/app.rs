use anyhow::Result;
use anon_core::{Backend, Level, Mode, Phase, ReviewSession, SaveReceipt};
use std::path::Path;

use crate::file_browser::FileBrowser;

/// Row selected in the review stepper: keep-original first, then the
/// server's suggestions, then the custom value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRow {
    KeepOriginal,
    Suggestion(usize),
    Custom,
}

pub struct App<B: Backend> {
    pub backend: B,
    pub session: ReviewSession,
    pub input_buffer: String,
    pub level: Level,
    pub mode: Mode,
    pub highlight: OptionRow,
    pub custom_buffer: String,
    pub browser: Option<FileBrowser>,
    pub receipt: Option<SaveReceipt>,
    pub status_message: Option<String>,
}

impl<B: Backend> App<B> {
    pub fn new(backend: B, level: Level, mode: Mode, initial_text: Option<String>) -> Self {
        Self {
            backend,
            session: ReviewSession::new(),
            input_buffer: initial_text.unwrap_or_default(),
            level,
            mode,
            highlight: OptionRow::KeepOriginal,
            custom_buffer: String::new(),
            browser: None,
            receipt: None,
            status_message: None,
        }
    }

    pub fn cycle_level(&mut self) {
        self.level = match self.level {
            Level::Low => Level::Medium,
            Level::Medium => Level::High,
            Level::High => Level::Low,
        };
    }

    pub fn cycle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Stepwise => Mode::OneShot,
            Mode::OneShot => Mode::Stepwise,
        };
    }

    pub fn input_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.status_message = None;
    }

    pub fn dismiss_error(&mut self) {
        self.session.dismiss_error();
        self.status_message = None;
    }

    /// Submit the composed text: detection for stepwise mode, a single
    /// finalization call for one-shot mode.
    pub async fn submit(&mut self) -> Result<()> {
        let epoch = match self.session.start(&self.input_buffer, self.level, self.mode) {
            Ok(epoch) => epoch,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return Ok(());
            }
        };

        match self.mode {
            Mode::Stepwise => match self.backend.detect(self.session.input_text(), self.level).await
            {
                Ok(steps) => {
                    if self.session.apply_detection(epoch, steps) {
                        self.sync_highlight();
                        if self.session.phase() == Phase::Displayed {
                            self.status_message =
                                Some("No personal data detected; text unchanged".to_string());
                        }
                    }
                }
                Err(e) => self.session.fail(epoch, format!("Detection failed: {e}")),
            },
            Mode::OneShot => {
                let text = self.session.input_text().to_string();
                match self.backend.finalize_one_shot(&text, self.level).await {
                    Ok(output) => {
                        self.session.apply_one_shot(epoch, output);
                    }
                    Err(e) => self.session.fail(epoch, format!("Anonymisation failed: {e}")),
                }
            }
        }
        Ok(())
    }

    /// Mirror the current choice into the highlighted row. A replacement
    /// matching a suggestion literally selects that suggestion, never the
    /// custom row.
    pub fn sync_highlight(&mut self) {
        let Some(choice) = self.session.current_choice() else {
            self.highlight = OptionRow::KeepOriginal;
            return;
        };
        if choice.is_keep_original() {
            self.highlight = OptionRow::KeepOriginal;
            self.custom_buffer.clear();
            return;
        }
        let suggestions = self
            .session
            .current_step()
            .map(|s| s.suggestions.clone())
            .unwrap_or_default();
        if let Some(idx) = suggestions.iter().position(|s| s == &choice.replacement) {
            self.highlight = OptionRow::Suggestion(idx);
            self.custom_buffer.clear();
        } else {
            self.highlight = OptionRow::Custom;
            self.custom_buffer = choice.replacement.clone();
        }
    }

    pub fn next_step(&mut self) {
        self.session.next();
        self.sync_highlight();
    }

    pub fn previous_step(&mut self) {
        self.session.previous();
        self.sync_highlight();
    }

    /// Move the highlight down one row and apply that row's choice
    pub fn highlight_down(&mut self) {
        let count = self
            .session
            .current_step()
            .map(|s| s.suggestions.len())
            .unwrap_or(0);
        self.highlight = match self.highlight {
            OptionRow::KeepOriginal if count > 0 => OptionRow::Suggestion(0),
            OptionRow::KeepOriginal => OptionRow::Custom,
            OptionRow::Suggestion(i) if i + 1 < count => OptionRow::Suggestion(i + 1),
            OptionRow::Suggestion(_) => OptionRow::Custom,
            OptionRow::Custom => OptionRow::Custom,
        };
        self.apply_highlight();
    }

    /// Move the highlight up one row and apply that row's choice
    pub fn highlight_up(&mut self) {
        let count = self
            .session
            .current_step()
            .map(|s| s.suggestions.len())
            .unwrap_or(0);
        self.highlight = match self.highlight {
            OptionRow::Custom if count > 0 => OptionRow::Suggestion(count - 1),
            OptionRow::Custom => OptionRow::KeepOriginal,
            OptionRow::Suggestion(0) => OptionRow::KeepOriginal,
            OptionRow::Suggestion(i) => OptionRow::Suggestion(i - 1),
            OptionRow::KeepOriginal => OptionRow::KeepOriginal,
        };
        self.apply_highlight();
    }

    fn apply_highlight(&mut self) {
        match self.highlight {
            OptionRow::KeepOriginal => self.session.keep_original(),
            OptionRow::Suggestion(i) => {
                let suggestion = self
                    .session
                    .current_step()
                    .and_then(|s| s.suggestions.get(i).cloned());
                if let Some(value) = suggestion {
                    self.session.set_replacement(value);
                }
            }
            OptionRow::Custom => {
                let value = self.custom_buffer.clone();
                self.session.set_replacement(value);
            }
        }
    }

    /// Typing into the custom field implicitly selects the custom option
    pub fn custom_char(&mut self, c: char) {
        self.custom_buffer.push(c);
        self.highlight = OptionRow::Custom;
        self.apply_highlight();
    }

    pub fn custom_backspace(&mut self) {
        self.custom_buffer.pop();
        self.highlight = OptionRow::Custom;
        self.apply_highlight();
    }

    /// Submit the full choice list; on failure the session returns to
    /// Reviewing with choices untouched.
    pub async fn finalize(&mut self) -> Result<()> {
        let (epoch, original_text, choices) = match self.session.begin_finalize() {
            Ok(parts) => parts,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return Ok(());
            }
        };
        match self.backend.finalize(&original_text, &choices).await {
            Ok(output) => {
                self.session.apply_final(epoch, output);
            }
            Err(e) => self.session.fail(epoch, format!("Finalisation failed: {e}")),
        }
        Ok(())
    }

    pub async fn save(&mut self) -> Result<()> {
        if self.receipt.is_some() {
            return Ok(()); // already saved
        }
        let payload = match self.session.save_payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return Ok(());
            }
        };
        match self.backend.save(&payload).await {
            Ok(receipt) => {
                self.status_message = Some("Report saved".to_string());
                self.receipt = Some(receipt);
            }
            Err(e) => {
                // Finalized output stays intact for retry
                self.status_message = Some(format!("Save failed: {e}"));
            }
        }
        Ok(())
    }

    pub fn open_browser(&mut self) -> Result<()> {
        self.browser = Some(FileBrowser::new(None)?);
        Ok(())
    }

    pub fn close_browser(&mut self) {
        self.browser = None;
    }

    /// Upload the picked document and replace the compose buffer with the
    /// extracted text. Prior input is left untouched on failure.
    pub async fn upload_selected(&mut self) -> Result<()> {
        let Some(path) = self.browser.as_ref().and_then(|b| b.selected_file()) else {
            self.status_message = Some("Select a .txt, .pdf or .docx file".to_string());
            return Ok(());
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        match self.read_and_extract(&path, &file_name).await {
            Ok(text) => {
                self.input_buffer = text;
                self.status_message = Some(format!("Extracted text from {file_name}"));
                self.close_browser();
            }
            Err(e) => {
                self.status_message = Some(format!("Extraction failed: {e}"));
            }
        }
        Ok(())
    }

    async fn read_and_extract(&self, path: &Path, file_name: &str) -> Result<String> {
        let bytes = std::fs::read(path)?;
        self.backend.extract(file_name, bytes).await
    }

    /// Discard the session and start over with an empty compose screen
    pub fn start_over(&mut self) {
        self.session.reset();
        self.input_buffer.clear();
        self.custom_buffer.clear();
        self.highlight = OptionRow::KeepOriginal;
        self.receipt = None;
        self.status_message = None;
    }

    /// Abandon review or result and return to compose, keeping the text
    pub fn back_to_compose(&mut self) {
        let text = self.session.input_text().to_string();
        self.session.reset();
        if !text.is_empty() {
            self.input_buffer = text;
        }
        self.custom_buffer.clear();
        self.highlight = OptionRow::KeepOriginal;
        self.receipt = None;
    }
}
