use std::process::ExitCode;

use dotenvy::dotenv;
use gold_loader::run_from_env;
use log::{error, info};

fn main() -> ExitCode {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    match run_from_env() {
        Ok(summary) => {
            info!(
                "gold-loader: {} loaded, {} failed, {} lines skipped",
                summary.report.loaded(),
                summary.report.failed(),
                summary.report.skipped_lines()
            );
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => info!("gold-loader: run summary\n{}", json),
                Err(e) => error!("gold-loader: unable to render run summary: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("gold-loader: run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
