use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

pub const MIN_DESCRIPTION_CHARS: usize = 5;
pub const MAX_DESCRIPTION_CHARS: usize = 100;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateSurveyRequest {
    #[validate(custom(function = "validate_description"))]
    pub description: String,
}

/// Strips Unicode whitespace plus the ASCII separators U+001C..=U+001F, the
/// same set Python's `str.strip()` removes.
pub fn trim_description(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

/// Checks run against the trimmed text, in order; the first failure wins.
fn validate_description(value: &str) -> Result<(), ValidationError> {
    let trimmed = trim_description(value);
    let chars = trimmed.chars().count();

    let (code, message) = if trimmed.is_empty() {
        ("empty", "Description cannot be empty.")
    } else if chars < MIN_DESCRIPTION_CHARS {
        ("too_short", "Description too short.")
    } else if chars > MAX_DESCRIPTION_CHARS {
        ("too_long", "Description too long.")
    } else {
        return Ok(());
    };

    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    Err(err)
}

/// First human-readable message out of a validation failure.
pub fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

/// The survey is whatever JSON the model produced; it is not reshaped.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateSurveyResponse {
    pub survey: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    ShortAnswer,
    OpenQuestion,
    Scale,
    NpsScore,
}

impl QuestionType {
    pub fn has_options(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultipleChoice)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Typed view of a generated survey.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyResponse {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl SurveyResponse {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
