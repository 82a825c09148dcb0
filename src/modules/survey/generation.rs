use serde_json::Value;

use crate::services::llm::ChatMessage;

const SYSTEM_PROMPT: &str = "You are an expert survey generator. \
Always return clean, valid JSON that matches the exact schema provided. \
Generate practical, well-structured surveys with appropriate question types.";

const SCHEMA_TEMPLATE: &str = r#"{
  "title": "Survey Title Here",
  "description": "Brief survey description under 100 characters",
  "questions": [
    {
      "type": "singleChoice",
      "text": "Question text here?",
      "options": ["Option 1", "Option 2", "Option 3"]
    },
    {
      "type": "multipleChoice",
      "text": "Which of these apply to you?",
      "options": ["Choice A", "Choice B", "Choice C"]
    },
    {
      "type": "shortAnswer",
      "text": "Please provide your thoughts:"
    },
    {
      "type": "openQuestion",
      "text": "Tell us more about your experience:"
    },
    {
      "type": "scale",
      "text": "Rate your satisfaction (1-10 stars):"
    },
    {
      "type": "npsScore",
      "text": "How likely are you to recommend us?"
    }
  ]
}"#;

const RULES: &str = r#"IMPORTANT RULES:
- Use ONLY these question types: "singleChoice", "multipleChoice", "shortAnswer", "openQuestion", "scale", "npsScore"
- Always use "text" field for question content (not "title")
- For choice questions, provide 3-5 realistic options as simple strings
- For shortAnswer/openQuestion/scale/npsScore, do not include options
- Generate 5-10 relevant questions
- Make questions specific to the survey topic
- Return only the JSON, no other text"#;

/// The system + user conversation sent for a description. The description is
/// embedded verbatim, so the same input always yields the same prompt.
pub fn build_messages(description: &str) -> Vec<ChatMessage> {
    let user_prompt = format!(
        "Generate a survey from this description: {description}\n\n\
         Return ONLY valid JSON in this exact format:\n\
         {SCHEMA_TEMPLATE}\n\n\
         {RULES}"
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_prompt)]
}

/// Turns completion text into the survey payload. Only JSON syntax is checked;
/// any valid document is passed through unchanged.
pub fn parse_completion(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_has_system_then_user_message() {
        let messages = build_messages("Customer satisfaction for a coffee shop");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[0].content.contains("valid JSON"));
    }

    #[test]
    fn user_message_embeds_description_schema_and_rules() {
        let messages = build_messages("  Employee onboarding experience ");
        let user = &messages[1].content;

        assert!(user.starts_with("Generate a survey from this description:   Employee onboarding experience \n"));
        assert!(user.contains(SCHEMA_TEMPLATE));
        for kind in ["singleChoice", "multipleChoice", "shortAnswer", "openQuestion", "scale", "npsScore"] {
            assert!(user.contains(kind), "missing {kind}");
        }
        assert!(user.contains("Generate 5-10 relevant questions"));
        assert!(user.contains("3-5 realistic options"));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_messages("Hotel stay review"), build_messages("Hotel stay review"));
    }

    #[test]
    fn schema_template_is_itself_valid_json() {
        let value = parse_completion(SCHEMA_TEMPLATE).unwrap();
        assert_eq!(value["questions"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn structurally_wrong_json_still_parses() {
        let value = parse_completion(r#"{"unexpected": [1, 2, 3]}"#).unwrap();
        assert_eq!(value["unexpected"][2], 3);
    }

    #[test]
    fn non_json_text_fails() {
        assert!(parse_completion("Sure! Here is your survey:").is_err());
        assert!(parse_completion("").is_err());
    }
}
