//! Run with: cargo run --bin generate_sample -- [description]
//! Expects the server to be running (BIND_ADDR, default 127.0.0.1:8000).

use std::env;
use std::time::Instant;

use reqwest::Client;
use serde_json::json;
use surveyor::config::settings::DEFAULT_BIND_ADDR;
use surveyor::modules::survey::schema::{DetailResponse, GenerateSurveyResponse, SurveyResponse};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let description = env::args()
        .nth(1)
        .unwrap_or_else(|| "Customer satisfaction for a coffee shop".to_string());

    println!("\n🧪 Generating survey for: {}\n", description);

    let client = Client::new();
    let start = Instant::now();
    let response = client
        .post(format!("http://{}/api/surveys/generate", addr))
        .json(&json!({ "description": description }))
        .send()
        .await?;
    let elapsed = start.elapsed().as_millis();

    if !response.status().is_success() {
        let status = response.status();
        let body: DetailResponse = response.json().await?;
        println!("❌ {}: {}", status, body.detail);
        return Ok(());
    }

    let body: GenerateSurveyResponse = response.json().await?;
    println!("⏱️  Response time: {}ms\n", elapsed);

    match SurveyResponse::from_value(body.survey.clone()) {
        Ok(survey) => {
            println!("📝 {}\n   {}\n", survey.title, survey.description);
            for (i, q) in survey.questions.iter().enumerate() {
                println!("  {}. [{:?}] {}", i + 1, q.kind, q.text);
                for option in &q.options {
                    println!("       - {}", option);
                }
            }
        }
        Err(e) => {
            println!("⚠️  Survey does not match the expected shape ({})", e);
            println!("{}", serde_json::to_string_pretty(&body.survey)?);
        }
    }

    Ok(())
}
