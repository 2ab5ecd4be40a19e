//! Cliente de Busca da Última Localização
//!
//! O tracker só conhece o trait [`LocationClient`]. O transporte concreto é
//! escolhido pelo esquema da URL do endpoint:
//!
//! - `http://` / `https://` → [`HttpLocationClient`]
//! - `ws://` / `wss://` → [`WsLocationClient`]

mod http;
mod ws;

pub use http::HttpLocationClient;
pub use ws::WsLocationClient;

use crate::error::{AppError, FetchError};
use crate::types::LocationResponse;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Operação única consumida pelo tracker: sem parâmetros, resolve para um endereço.
#[async_trait]
pub trait LocationClient: Send + Sync {
    async fn fetch_last_location(&self) -> Result<LocationResponse, FetchError>;
}

/// Cria o cliente adequado para o endpoint.
///
/// `timeout` zero significa sem timeout.
pub fn client_for_endpoint(
    endpoint: &str,
    timeout: Duration,
) -> Result<Arc<dyn LocationClient>, AppError> {
    let scheme = endpoint
        .split_once("://")
        .map(|(scheme, _)| scheme.to_ascii_lowercase())
        .ok_or_else(|| AppError::Config(format!("endpoint sem esquema: {}", endpoint)))?;

    let timeout = (!timeout.is_zero()).then_some(timeout);

    match scheme.as_str() {
        "http" | "https" => {
            let client = HttpLocationClient::new(endpoint, timeout)
                .map_err(|e| AppError::Config(format!("cliente HTTP: {}", e)))?;
            Ok(Arc::new(client))
        }
        "ws" | "wss" => Ok(Arc::new(WsLocationClient::new(endpoint, timeout))),
        other => Err(AppError::Config(format!(
            "esquema não suportado: {} (use http, https, ws ou wss)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_transport_by_scheme() {
        assert!(client_for_endpoint("http://127.0.0.1:8080/last", Duration::ZERO).is_ok());
        assert!(client_for_endpoint("HTTPS://example.com/last", Duration::ZERO).is_ok());
        assert!(client_for_endpoint("ws://127.0.0.1:9000/", Duration::from_secs(1)).is_ok());
        assert!(client_for_endpoint("wss://example.com/ws", Duration::ZERO).is_ok());
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = client_for_endpoint("ftp://example.com", Duration::ZERO).err();
        assert!(matches!(err, Some(AppError::Config(_))));

        let err = client_for_endpoint("example.com/last", Duration::ZERO).err();
        assert!(matches!(err, Some(AppError::Config(_))));
    }
}
