//! Run with: cargo run --bin init_db

use std::env;
use std::path::PathBuf;

use surveyor::config::settings::DEFAULT_DATABASE_PATH;
use surveyor::modules::survey::crud::SurveyCrud;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = env::var("DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE_PATH));

    println!("Creating tables in {}...", path.display());
    let crud = SurveyCrud::new(&path)?;
    println!("✓ Tables created successfully");

    println!("  surveys: {} row(s)", crud.count().await?);
    Ok(())
}
