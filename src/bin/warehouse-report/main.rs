mod args;

use anyhow::Context as _;
use args::Args;
use chrono::Utc;
use clap::Parser as _;
use greenhouse_telemetry::warehouse::{aggregate_counts, new_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let pool = new_pool(&args.database_url)
        .await
        .context("failed to connect to warehouse")?;

    let counts = aggregate_counts(&pool).await;
    if counts.is_empty() {
        println!("no counts available");
    }
    for (name, count) in &counts {
        println!("{name}: {count}");
    }

    let generated = Utc::now().with_timezone(&args.timezone);
    println!("generated at {}", generated.format("%Y-%m-%dT%H:%M:%S %Z"));

    Ok(())
}
