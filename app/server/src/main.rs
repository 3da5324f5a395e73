//! FILENAME: app/server/src/main.rs
//! Starts the record-serving API.

use axum::Router;
use bi_server::{define_table, logging, ApiError, JsonFileSource, MemorySource, ServerConfig};
use bi_server::{log_error, log_info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        log_error!("SERVER", "{}", e);
        eprintln!("bi-server: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ApiError> {
    let config = ServerConfig::from_env();
    logging::init(config.log_level, config.log_file.as_deref())?;

    let table = define_table(&config.table, &config.columns);
    let app: Router = match &config.data_path {
        Some(path) => {
            log_info!("SERVER", "serving rows from {}", path.display());
            table.handler(JsonFileSource::new(path), config.namespace.clone())
        }
        None => {
            log_info!("SERVER", "no BI_DATA_PATH set, serving an empty table");
            table.handler(MemorySource::default(), config.namespace.clone())
        }
    };

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log_info!("SERVER", "listening on {} (namespace '{}')", addr, config.namespace);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            log_info!("SERVER", "shutdown signal received");
        }
    }

    Ok(())
}
