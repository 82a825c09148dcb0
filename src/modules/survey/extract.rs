use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::modules::survey::error::SurveyError;

/// `Json` body extractor whose rejections answer with `{"detail"}` like every
/// other error from this module.
pub struct SurveyJson<T>(pub T);

impl<S, T> FromRequest<S> for SurveyJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = SurveyError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| SurveyError::InvalidInput(rejection.body_text()))?;
        Ok(Self(value))
    }
}
