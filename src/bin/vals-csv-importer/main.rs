mod args;
mod csv;

use std::fs::File;

use anyhow::Context as _;
use args::Args;
use clap::Parser as _;
use greenhouse_telemetry::warehouse::{new_pool, save};

use crate::csv::CsvValsIter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let file =
        File::open(&args.file).with_context(|| format!("failed to open file: {:?}", args.file))?;
    let iter = CsvValsIter::new(file);

    let pool = new_pool(&args.database_url)
        .await
        .context("failed to connect to warehouse")?;

    let mut inserted = 0;
    let mut failed = 0;

    for result in iter {
        let record = result.context("failed to parse CSV record")?;
        let saved = save(
            &pool,
            Some(&record.data_type),
            Some(&record.device_name),
            &record.timestamp,
            Some(&record.data),
        )
        .await;

        if saved {
            inserted += 1;
        } else {
            failed += 1;
        }
    }

    println!(
        "Inserted {} records from {:?} ({} failed)",
        inserted, args.file, failed
    );

    Ok(())
}
