//! Review-session state machine
//!
//! `ReviewSession` holds all state for one anonymisation attempt:
//! `Idle → Loading → Reviewing → Finalizing → Displayed`, with errors
//! returning control to the state the user retries from. Transitions are
//! pure: network results are fed back by the caller together with the
//! epoch captured when the request started, and responses for an
//! abandoned session are discarded.

use crate::backend::SaveRequest;
use crate::entity::{Choice, EntityStep, FinalOutput, Level, Mode};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Reviewing,
    Finalizing,
    Displayed,
}

#[derive(Debug, Default)]
pub struct ReviewSession {
    epoch: u64,
    phase: Phase,
    input_text: String,
    level: Level,
    mode: Mode,
    steps: Vec<EntityStep>,
    current: usize,
    choices: Vec<Choice>,
    output: Option<FinalOutput>,
    error: Option<String>,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn steps(&self) -> &[EntityStep] {
        &self.steps
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn output(&self) -> Option<&FinalOutput> {
        self.output.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Begin a new attempt. Empty or whitespace-only input is rejected
    /// locally; no request should be sent. Returns the epoch to attach to
    /// the detection (or one-shot) request.
    pub fn start(&mut self, text: &str, level: Level, mode: Mode) -> Result<u64> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        self.epoch += 1;
        self.phase = Phase::Loading;
        self.input_text = text.to_string();
        self.level = level;
        self.mode = mode;
        self.steps.clear();
        self.choices.clear();
        self.current = 0;
        self.output = None;
        self.error = None;
        Ok(self.epoch)
    }

    /// Feed in a detection response. Zero entities means the text is
    /// already final: both output forms equal the original and review is
    /// bypassed. Stale responses (epoch mismatch) are discarded.
    pub fn apply_detection(&mut self, epoch: u64, steps: Vec<EntityStep>) -> bool {
        if epoch != self.epoch || self.phase != Phase::Loading {
            return false;
        }
        if steps.is_empty() {
            self.output = Some(FinalOutput::unchanged(&self.input_text));
            self.phase = Phase::Displayed;
            return true;
        }
        self.choices = steps.iter().map(Choice::keep_original).collect();
        self.steps = steps;
        self.current = 0;
        self.phase = Phase::Reviewing;
        true
    }

    /// Feed in a one-shot finalization response (ai mode skips review)
    pub fn apply_one_shot(&mut self, epoch: u64, output: FinalOutput) -> bool {
        if epoch != self.epoch || self.phase != Phase::Loading {
            return false;
        }
        self.output = Some(output);
        self.phase = Phase::Displayed;
        true
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&EntityStep> {
        self.steps.get(self.current)
    }

    pub fn current_choice(&self) -> Option<&Choice> {
        self.choices.get(self.current)
    }

    pub fn is_last_step(&self) -> bool {
        !self.steps.is_empty() && self.current + 1 == self.steps.len()
    }

    /// `(index + 1, total)` for the progress indicator
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.steps.len())
    }

    /// Advance to the next step; no-op on the last step
    pub fn next(&mut self) {
        if self.phase == Phase::Reviewing && self.current + 1 < self.steps.len() {
            self.current += 1;
        }
    }

    /// Go back one step; no-op on the first step
    pub fn previous(&mut self) {
        if self.phase == Phase::Reviewing {
            self.current = self.current.saturating_sub(1);
        }
    }

    /// Set the current step's replacement (suggestion or custom value)
    pub fn set_replacement(&mut self, value: impl Into<String>) {
        if let Some(choice) = self.choices.get_mut(self.current) {
            choice.replacement = value.into();
        }
    }

    /// Reset the current step's choice to keep the original text
    pub fn keep_original(&mut self) {
        if let Some(choice) = self.choices.get_mut(self.current) {
            choice.replacement = choice.original.clone();
        }
    }

    /// Exact string equality decides which control shows as selected; if a
    /// custom value collides with a suggestion, the suggestion wins.
    pub fn is_selected(&self, candidate: &str) -> bool {
        self.current_choice()
            .map(|c| c.replacement == candidate)
            .unwrap_or(false)
    }

    /// Move to Finalizing and hand back everything the finalization
    /// request needs: the epoch, the original text, and the full choice
    /// list.
    pub fn begin_finalize(&mut self) -> Result<(u64, String, Vec<Choice>)> {
        if self.phase != Phase::Reviewing {
            return Err(Error::NoReview);
        }
        self.phase = Phase::Finalizing;
        self.error = None;
        Ok((self.epoch, self.input_text.clone(), self.choices.clone()))
    }

    /// Feed in the finalization response
    pub fn apply_final(&mut self, epoch: u64, output: FinalOutput) -> bool {
        if epoch != self.epoch || self.phase != Phase::Finalizing {
            return false;
        }
        self.output = Some(output);
        self.phase = Phase::Displayed;
        true
    }

    /// Record a request failure. Control returns to the state the user can
    /// retry from: a failed detection goes back to Idle with the entered
    /// text kept, a failed finalization back to Reviewing with choices
    /// untouched.
    pub fn fail(&mut self, epoch: u64, message: impl Into<String>) {
        if epoch != self.epoch {
            return;
        }
        self.phase = match self.phase {
            Phase::Loading => Phase::Idle,
            Phase::Finalizing => Phase::Reviewing,
            other => other,
        };
        self.error = Some(message.into());
    }

    pub fn can_save(&self) -> bool {
        self.phase == Phase::Displayed
            && self
                .output
                .as_ref()
                .is_some_and(|o| !o.anonymized_text_clean.trim().is_empty())
    }

    /// Build the persistence payload from the last-displayed output
    pub fn save_payload(&self) -> Result<SaveRequest> {
        let output = match self.output.as_ref() {
            Some(output) if self.can_save() => output,
            _ => return Err(Error::NothingToSave),
        };
        Ok(SaveRequest {
            original_text: self.input_text.clone(),
            anonymized_text_highlighted: output.anonymized_text_highlighted.clone(),
            anonymized_text_clean: output.anonymized_text_clean.clone(),
            model: self.mode,
            level: self.level,
        })
    }

    /// Discard all session state and return to Idle. Bumps the epoch so
    /// in-flight responses for the abandoned session are discarded.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.phase = Phase::Idle;
        self.input_text.clear();
        self.steps.clear();
        self.choices.clear();
        self.current = 0;
        self.output = None;
        self.error = None;
    }
}
