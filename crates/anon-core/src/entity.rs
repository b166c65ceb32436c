//! Domain models for the review workflow

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How aggressively categories of personal data are targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Level::Low),
            "medium" => Ok(Level::Medium),
            "high" => Ok(Level::High),
            other => Err(Error::InvalidLevel(other.to_string())),
        }
    }
}

/// Processing mode: per-entity review or a one-shot AI pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    #[default]
    #[serde(rename = "stepwise")]
    Stepwise,
    #[serde(rename = "ai")]
    OneShot,
}

impl Mode {
    /// Wire identifier sent in finalization and persistence requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Stepwise => "stepwise",
            Mode::OneShot => "ai",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stepwise" => Ok(Mode::Stepwise),
            "ai" => Ok(Mode::OneShot),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// One detected personal-data mention awaiting a user decision
///
/// `text_to_replace` holds every literal variant grouped under this entity
/// (e.g. "Sarah" and "Sarah Malik"); `display_text` is the canonical form
/// shown in the stepper. Immutable once received from the detection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStep {
    pub display_text: String,
    pub text_to_replace: Vec<String>,
    pub label: String,
    pub suggestions: Vec<String>,
}

/// Per-step user decision, sent verbatim to the finalization endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub original_list: Vec<String>,
    pub original: String,
    pub replacement: String,
}

impl Choice {
    /// Initial state for a step: keep the original text unchanged
    pub fn keep_original(step: &EntityStep) -> Self {
        Self {
            original_list: step.text_to_replace.clone(),
            original: step.display_text.clone(),
            replacement: step.display_text.clone(),
        }
    }

    /// True when the choice would leave the text untouched
    pub fn is_keep_original(&self) -> bool {
        self.replacement == self.original
    }
}

/// Final anonymised text in both display and export forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalOutput {
    /// Contains `<mark>` markup around replaced spans
    pub anonymized_text_highlighted: String,
    /// Plain text, for saving and export
    pub anonymized_text_clean: String,
}

impl FinalOutput {
    /// Output for text where nothing was detected: both forms equal the input
    pub fn unchanged(text: &str) -> Self {
        Self {
            anonymized_text_highlighted: text.to_string(),
            anonymized_text_clean: text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trips_through_str() {
        for level in [Level::Low, Level::Medium, Level::High] {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        }
        assert!("extreme".parse::<Level>().is_err());
    }

    #[test]
    fn mode_wire_names() {
        assert_eq!(Mode::Stepwise.as_str(), "stepwise");
        assert_eq!(Mode::OneShot.as_str(), "ai");
        assert_eq!("ai".parse::<Mode>().unwrap(), Mode::OneShot);
    }

    #[test]
    fn choice_serializes_with_wire_field_names() {
        let choice = Choice {
            original_list: vec!["John".to_string()],
            original: "John".to_string(),
            replacement: "Person A".to_string(),
        };
        let json = serde_json::to_value(&choice).unwrap();
        assert_eq!(json["original_list"][0], "John");
        assert_eq!(json["original"], "John");
        assert_eq!(json["replacement"], "Person A");
    }

    #[test]
    fn keep_original_matches_display_text() {
        let step = EntityStep {
            display_text: "Sarah Malik".to_string(),
            text_to_replace: vec!["Sarah Malik".to_string(), "Sarah".to_string()],
            label: "PERSON".to_string(),
            suggestions: vec!["Jane Doe".to_string()],
        };
        let choice = Choice::keep_original(&step);
        assert!(choice.is_keep_original());
        assert_eq!(choice.original_list.len(), 2);
    }
}
