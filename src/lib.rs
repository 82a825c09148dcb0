use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::config::settings::Settings;
use crate::modules::survey::crud::SurveyRepository;
use crate::services::llm::{LlmClient, LlmError};

pub mod config;
pub mod modules;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub surveys: Arc<dyn SurveyRepository>,
    pub llm: LlmClient,
}

impl AppState {
    pub fn new(settings: &Settings, surveys: Arc<dyn SurveyRepository>) -> Result<Self, LlmError> {
        Ok(Self {
            surveys,
            llm: LlmClient::new(settings)?,
        })
    }
}

/// Full application router: survey routes behind a CORS layer that admits any
/// origin, method and header.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(modules::survey::routes::routes())
        .layer(cors)
        .with_state(state)
}
