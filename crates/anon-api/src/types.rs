//! Wire request and response shapes

use anon_core::{Choice, Level};
use serde::{Deserialize, Serialize};

/// Either the expected payload or a server-reported failure
///
/// The backend signals failure both through status codes and through
/// `{ "error": … }` bodies; untagged deserialization covers the latter.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Reply<T> {
    Ok(T),
    Err(ErrorBody),
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl<T> Reply<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Err(body) => Err(body.error),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DetectRequest<'a> {
    pub text: &'a str,
    pub level: Level,
}

/// Finalization request; the `model` tag selects the processing mode
#[derive(Debug, Serialize)]
#[serde(tag = "model")]
pub enum FinalizeRequest<'a> {
    #[serde(rename = "stepwise")]
    Stepwise {
        original_text: &'a str,
        choices: &'a [Choice],
    },
    #[serde(rename = "ai")]
    OneShot {
        original_text: &'a str,
        level: Level,
    },
}

#[derive(Debug, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default)]
    pub record_id: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anon_core::{EntityStep, FinalOutput};

    #[test]
    fn stepwise_finalize_request_shape() {
        let choices = vec![Choice {
            original_list: vec!["John".to_string()],
            original: "John".to_string(),
            replacement: "Person A".to_string(),
        }];
        let request = FinalizeRequest::Stepwise {
            original_text: "John met Mary.",
            choices: &choices,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "stepwise");
        assert_eq!(json["original_text"], "John met Mary.");
        assert_eq!(json["choices"][0]["replacement"], "Person A");
    }

    #[test]
    fn one_shot_finalize_request_shape() {
        let request = FinalizeRequest::OneShot {
            original_text: "John met Mary.",
            level: Level::High,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "ai");
        assert_eq!(json["level"], "high");
    }

    #[test]
    fn detection_reply_parses_entity_list() {
        let body = r#"[
            {"display_text": "John", "text_to_replace": ["John"],
             "label": "PERSON", "suggestions": ["James", "Jim"]}
        ]"#;
        let reply: Reply<Vec<EntityStep>> = serde_json::from_str(body).unwrap();
        let steps = reply.into_result().unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].label, "PERSON");
        assert_eq!(steps[0].suggestions, vec!["James", "Jim"]);
    }

    #[test]
    fn detection_reply_parses_error_body() {
        let reply: Reply<Vec<EntityStep>> =
            serde_json::from_str(r#"{"error": "Missing text or anonymization level."}"#).unwrap();
        assert_eq!(
            reply.into_result().unwrap_err(),
            "Missing text or anonymization level."
        );
    }

    #[test]
    fn final_output_reply_parses() {
        let body = r#"{"anonymized_text_highlighted": "<mark>Person A</mark> met.",
                       "anonymized_text_clean": "Person A met."}"#;
        let reply: Reply<FinalOutput> = serde_json::from_str(body).unwrap();
        let output = reply.into_result().unwrap();
        assert_eq!(output.anonymized_text_clean, "Person A met.");
    }
}
