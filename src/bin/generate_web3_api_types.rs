//! Regenerates the Web3 API TypeScript declarations from the published
//! OpenAPI document.

use clap::Parser;
use moralis_web3_api::codegen::{self, DEFAULT_OUTPUT_PATH, DEFAULT_SCHEMA_URL};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// OpenAPI document to render.
    #[clap(short, long, default_value = DEFAULT_SCHEMA_URL)]
    url: String,
    /// Declaration file to write.
    #[clap(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    info!(url = %args.url, "generating Web3 API types");
    match codegen::generate_web3_api_types(&args.url, &args.output).await {
        Ok(()) => {
            info!("done generating Web3 API types");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "failed to generate Web3 API types");
            ExitCode::FAILURE
        }
    }
}
