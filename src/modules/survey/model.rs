/// A cached generation, keyed by the exact description it was produced for.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    pub id: Option<i64>,
    pub description: String,
    pub generated_json: String,
}

impl SurveyRecord {
    pub fn new(description: String, generated_json: String) -> Self {
        Self {
            id: None,
            description,
            generated_json,
        }
    }
}
