//! Book indexer entry point.
//!
//! Runs one ingestion to completion: load records, submit batches, declare
//! index attributes, then track every indexing task to a terminal state.
//! Exits non-zero when any task failed.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use book_indexer::Dependencies;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let deps = match Dependencies::new().await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Initialization failed");
            return ExitCode::FAILURE;
        }
    };

    match deps.pipeline.run().await {
        Ok(report) => {
            info!(
                succeeded = report.succeeded,
                failed = report.failed,
                "Ingestion finished"
            );
            if report.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!(error = %e, "Ingestion aborted");
            ExitCode::FAILURE
        }
    }
}
