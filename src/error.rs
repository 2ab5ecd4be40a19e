//! Tipos de erro

use std::time::Duration;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Falha ao buscar a última localização.
///
/// Todas as variantes seguem o mesmo caminho no tracker: log e nenhum registro novo.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("requisição HTTP falhou: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend respondeu HTTP {0}")]
    Status(u16),

    #[error("erro no WebSocket: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("resposta inválida: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("conexão fechada antes da resposta")]
    Closed,

    #[error("sem resposta após {0:?}")]
    Timeout(Duration),
}

/// Transição inválida na máquina de estados do tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("já existe uma busca em andamento")]
    AlreadyLoading,

    #[error("nenhuma busca em andamento")]
    NotLoading,
}

/// Erros de nível superior do binário.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuração inválida: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
