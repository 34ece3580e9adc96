use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long)]
    pub file: PathBuf,

    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}
