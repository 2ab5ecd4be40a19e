//! Tipos e estruturas de dados

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Endereço devolvido pelo backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
}

impl Address {
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
        }
    }
}

/// Corpo da resposta de `fetch_last_location`.
///
/// Campos extras enviados pelo backend são ignorados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub address: Address,
}

/// Um resultado registrado: uma busca bem-sucedida e quanto tempo ela levou.
///
/// Imutável depois de criado; só o tracker constrói novos registros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRecord {
    pub timestamp: u64,      // Início da busca (ms desde a época Unix)
    pub address: Address,
    pub execution_time: u64, // Duração da busca (ms)
}

/// Timestamp atual em milissegundos desde a época Unix.
///
/// Relógio antes de 1970 vira 0 em vez de falhar.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(millis)
        .unwrap_or(0)
}

/// Duração em milissegundos, saturando em `u64::MAX`.
pub fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Os dois registros de exemplo exibidos ao iniciar.
pub fn seed_records(now: u64) -> Vec<LocationRecord> {
    vec![
        LocationRecord {
            timestamp: now,
            address: Address::new("5th Ave", "Random City"),
            execution_time: 900,
        },
        LocationRecord {
            timestamp: now + 2000,
            address: Address::new("Main Road", "New Town"),
            execution_time: 400,
        },
    ]
}
