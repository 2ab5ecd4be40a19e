//! Configuração via linha de comando ou variáveis de ambiente
//!
//! Uso:
//!   LOCATION_ENDPOINT=http://localhost:8080/last-location ./target/release/last-location
//!   ./target/release/last-location --endpoint ws://localhost:9000 --headless --count 10

use clap::builder::FalseyValueParser;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "last-location", version, about = "Mede o tempo de busca da última localização")]
pub struct Config {
    /// Endpoint do backend (http, https, ws ou wss)
    #[arg(long, env = "LOCATION_ENDPOINT")]
    pub endpoint: String,

    /// Timeout por busca em ms (0 = sem timeout)
    #[arg(long, env = "FETCH_TIMEOUT_MS", default_value_t = 0)]
    pub timeout_ms: u64,

    /// Roda sem TUI: faz `count` buscas e imprime a tabela
    #[arg(long, env = "HEADLESS", value_parser = FalseyValueParser::new())]
    pub headless: bool,

    /// Número de buscas no modo headless
    #[arg(long, env = "FETCH_COUNT", default_value_t = 1)]
    pub count: u32,

    /// Começa sem os registros de exemplo
    #[arg(long, env = "NO_SEED", value_parser = FalseyValueParser::new())]
    pub no_seed: bool,

    /// Arquivo de log enquanto a TUI ocupa o terminal
    #[arg(long, env = "LOG_FILE", default_value = "last-location.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
