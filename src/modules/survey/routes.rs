use axum::{routing::post, Router};

use crate::modules::survey::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/surveys/generate", post(controller::generate_survey))
}
