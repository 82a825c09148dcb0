use std::time::Instant;

use axum::{extract::State, Json};
use tracing::{error, info, warn};
use validator::Validate;

use crate::modules::survey::{
    crud::CrudError,
    error::SurveyError,
    extract::SurveyJson,
    generation::{build_messages, parse_completion},
    model::SurveyRecord,
    schema::{first_message, GenerateSurveyRequest, GenerateSurveyResponse},
};
use crate::AppState;

pub async fn generate_survey(
    State(state): State<AppState>,
    SurveyJson(payload): SurveyJson<GenerateSurveyRequest>,
) -> Result<Json<GenerateSurveyResponse>, SurveyError> {
    if let Err(e) = payload.validate() {
        let detail = first_message(&e);
        warn!(%detail, "rejected survey description");
        return Err(SurveyError::InvalidInput(detail));
    }

    // The cache key is the description exactly as received, not the trimmed form.
    let description = payload.description;

    if let Some(record) = state.surveys.find_by_description(&description).await? {
        info!(id = ?record.id, "survey cache hit");
        let survey = parse_completion(&record.generated_json).map_err(CrudError::CorruptRecord)?;
        return Ok(Json(GenerateSurveyResponse { survey }));
    }

    info!(model = state.llm.model(), %description, "survey cache miss, generating");
    let started = Instant::now();

    let raw = state.llm.chat(&build_messages(&description)).await.map_err(|e| {
        error!(error = %e, "survey generation failed");
        SurveyError::from(e)
    })?;

    let survey = parse_completion(&raw).map_err(|e| {
        error!(error = %e, "model returned invalid JSON");
        SurveyError::from(e)
    })?;

    info!(elapsed_ms = started.elapsed().as_millis() as u64, "survey generated");

    match state.surveys.insert(SurveyRecord::new(description, raw)).await {
        Ok(id) => info!(id, "survey stored"),
        Err(CrudError::DuplicateDescription) => {
            // A concurrent request stored the same description first.
            warn!("lost insert race for survey description");
            return Err(CrudError::DuplicateDescription.into());
        }
        Err(e) => {
            error!(error = %e, "failed to store survey");
            return Err(e.into());
        }
    }

    Ok(Json(GenerateSurveyResponse { survey }))
}
