use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::survey::{crud::CrudError, schema::DetailResponse};
use crate::services::llm::LlmError;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("OpenAI API error: {0}")]
    Generation(String),
    #[error("{0}")]
    Persistence(#[from] CrudError),
}

impl SurveyError {
    pub fn status(&self) -> StatusCode {
        match self {
            SurveyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SurveyError::Generation(_) | SurveyError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<LlmError> for SurveyError {
    fn from(err: LlmError) -> Self {
        SurveyError::Generation(err.to_string())
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(err: serde_json::Error) -> Self {
        SurveyError::Generation(format!("Invalid JSON in completion: {}", err))
    }
}

impl IntoResponse for SurveyError {
    fn into_response(self) -> Response {
        (self.status(), Json(DetailResponse { detail: self.to_string() })).into_response()
    }
}
