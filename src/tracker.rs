//! Tracker de Resultados
//!
//! Dono exclusivo da sequência de resultados e da flag de carregamento.
//! A máquina de estados tem dois estados, `Idle` e `Loading`:
//!
//! - `Idle → Loading` em [`ResultTracker::start_fetch`] (rejeitado se já `Loading`)
//! - `Loading → Idle` em [`ResultTracker::record_success`] ou [`ResultTracker::record_failure`]
//!
//! A checagem e a troca de estado acontecem antes de qualquer ponto de
//! suspensão, então nunca existem duas buscas em andamento.

use crate::client::LocationClient;
use crate::error::{FetchError, TrackerError};
use crate::stats::{Stats, StatsMemo};
use crate::types::{millis, seed_records, unix_millis, LocationRecord, LocationResponse};
use std::sync::Arc;
use tokio::time::Instant;

/// Busca em andamento: quando começou.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    pub timestamp: u64, // Época Unix (ms), vira o timestamp do registro
    pub started: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Loading(PendingFetch),
}

pub struct ResultTracker {
    results: Arc<Vec<LocationRecord>>,
    state: TrackerState,
    memo: StatsMemo,
}

impl Default for ResultTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultTracker {
    /// Tracker com sequência vazia.
    pub fn new() -> Self {
        Self::with_results(Vec::new())
    }

    /// Tracker com os dois registros de exemplo.
    pub fn with_seed_results() -> Self {
        Self::with_results(seed_records(unix_millis()))
    }

    pub fn with_results(results: Vec<LocationRecord>) -> Self {
        Self {
            results: Arc::new(results),
            state: TrackerState::Idle,
            memo: StatsMemo::new(),
        }
    }

    /// Sequência atual, do mais antigo para o mais novo.
    pub fn results(&self) -> &Arc<Vec<LocationRecord>> {
        &self.results
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, TrackerState::Loading(_))
    }

    /// Estatísticas da sequência atual (recalculadas só quando ela muda).
    pub fn stats(&mut self) -> Stats {
        self.memo.get(&self.results)
    }

    pub fn start_fetch(&mut self) -> Result<PendingFetch, TrackerError> {
        if self.is_loading() {
            tracing::warn!("busca ignorada: outra já está em andamento");
            return Err(TrackerError::AlreadyLoading);
        }

        let pending = PendingFetch {
            timestamp: unix_millis(),
            started: Instant::now(),
        };
        self.state = TrackerState::Loading(pending);
        tracing::debug!(timestamp = pending.timestamp, "buscando última localização");
        Ok(pending)
    }

    pub fn record_success(
        &mut self,
        response: LocationResponse,
    ) -> Result<&LocationRecord, TrackerError> {
        let pending = self.finish()?;
        let execution_time = millis(pending.started.elapsed());

        let record = LocationRecord {
            timestamp: pending.timestamp,
            address: response.address,
            execution_time,
        };

        tracing::info!(
            street = %record.address.street,
            city = %record.address.city,
            execution_time_ms = execution_time,
            "localização recebida"
        );

        // Nova sequência: a anterior continua intacta para quem ainda a referencia
        let mut next = Vec::with_capacity(self.results.len() + 1);
        next.extend_from_slice(&self.results);
        next.push(record);
        self.results = Arc::new(next);

        Ok(&self.results[self.results.len() - 1])
    }

    pub fn record_failure(&mut self, error: &FetchError) -> Result<(), TrackerError> {
        let pending = self.finish()?;
        tracing::error!(
            error = %error,
            elapsed_ms = millis(pending.started.elapsed()),
            "falha ao buscar última localização"
        );
        Ok(())
    }

    /// Ciclo completo: inicia, espera o cliente e registra o desfecho.
    ///
    /// `Ok(None)` quando a busca falhou (já registrado no log).
    pub async fn handle_trigger<C>(
        &mut self,
        client: &C,
    ) -> Result<Option<LocationRecord>, TrackerError>
    where
        C: LocationClient + ?Sized,
    {
        self.start_fetch()?;

        match client.fetch_last_location().await {
            Ok(response) => self.record_success(response).map(|r| Some(r.clone())),
            Err(e) => self.record_failure(&e).map(|_| None),
        }
    }

    fn finish(&mut self) -> Result<PendingFetch, TrackerError> {
        match std::mem::replace(&mut self.state, TrackerState::Idle) {
            TrackerState::Loading(pending) => Ok(pending),
            TrackerState::Idle => Err(TrackerError::NotLoading),
        }
    }
}
