//! Last Location - Tempo de Busca da Última Localização
//!
//! Este programa busca a última localização conhecida em um backend (HTTP ou
//! WebSocket), mede o tempo de cada busca e mostra o histórico em uma tabela
//! com as estatísticas de tempo.
//!
//! Uso:
//!   LOCATION_ENDPOINT=http://localhost:8080/last-location ./target/release/last-location
//!   LOCATION_ENDPOINT=ws://localhost:9000 HEADLESS=1 FETCH_COUNT=20 ./target/release/last-location

use clap::Parser;
use last_location_tracker::{app, client_for_endpoint, config::Config, AppError, ResultTracker};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Logging
// ============================================================================

/// Headless loga no stderr; com a TUI o terminal está ocupado, então vai para arquivo.
fn init_logging(config: &Config) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if config.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        let file = File::create(&config.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

// ============================================================================
// Função Principal
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let config = Config::parse();
    init_logging(&config)?;

    let client = client_for_endpoint(&config.endpoint, config.timeout())?;
    tracing::info!(endpoint = %config.endpoint, timeout_ms = config.timeout_ms, "configurado");

    let mut tracker = if config.no_seed {
        ResultTracker::new()
    } else {
        ResultTracker::with_seed_results()
    };

    if config.headless {
        let table = app::run_headless(&mut tracker, client.as_ref(), config.count).await?;
        print!("{}", table);
    } else {
        app::run_tui(&mut tracker, client).await?;
    }

    Ok(())
}
