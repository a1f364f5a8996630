use leakscope::commands;
use leakscope::error::LeakscopeError;
use leakscope::logger::initialize as logger_initialize;

use client_core::config::{AppConfig, try_load_dotenv};
use client_core::session::SessionState;
use client_core::token_store::{TokenStore, detect_data_paths};

use std::env;
use std::fs::create_dir_all;
use std::process::ExitCode;

use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(LeakscopeError::Usage { message, .. }) => {
            eprintln!("error: {message}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), LeakscopeError> {
    // .env first so LEAKSCOPE_* overrides apply to everything below
    let env_result = try_load_dotenv();

    let paths = detect_data_paths()?;
    create_dir_all(&paths.data_dir)
        .map_err(|e| LeakscopeError::app(format!("Failed to create data directory: {e}")))?;

    // Logger before any real work
    logger_initialize(&paths.data_dir)?;
    info!("leakscope starting (data dir: {})", paths.data_dir.display());

    // Re-report the .env source: try_load_dotenv ran before the logger
    if let Some(path) = &env_result.path {
        info!("Environment overrides loaded from {}", path.display());
    }

    let config = AppConfig::load(&paths.data_dir)?;
    let base_url = config.backend_base_url();
    info!("Backend target: {base_url}");

    let state = SessionState::new(TokenStore::new(&paths.data_dir));
    state.initialize().await?;

    let args: Vec<String> = env::args().skip(1).collect();
    commands::dispatch(&state, &config, &base_url, &args).await
}
