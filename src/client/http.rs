//! Transporte HTTP (reqwest)

use super::LocationClient;
use crate::error::FetchError;
use crate::types::LocationResponse;
use async_trait::async_trait;
use std::time::Duration;

/// `GET <endpoint>` com corpo JSON `{"address":{"street":..,"city":..}}`.
pub struct HttpLocationClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpLocationClient {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
            timeout,
        })
    }

    fn map_error(&self, e: reqwest::Error) -> FetchError {
        match self.timeout {
            Some(timeout) if e.is_timeout() => FetchError::Timeout(timeout),
            _ => FetchError::Http(e),
        }
    }
}

#[async_trait]
impl LocationClient for HttpLocationClient {
    async fn fetch_last_location(&self) -> Result<LocationResponse, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Lê o corpo inteiro antes de decodificar: JSON malformado vira Decode, não Http
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Servidor HTTP mínimo que responde uma única requisição e fecha.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let reply = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/last-location", addr)
    }

    #[tokio::test]
    async fn decodes_address() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"address":{"street":"Oak St","city":"Springfield"}}"#,
        )
        .await;

        let client = HttpLocationClient::new(&url, None).unwrap();
        let response = client.fetch_last_location().await.unwrap();
        assert_eq!(response.address, Address::new("Oak St", "Springfield"));
    }

    #[tokio::test]
    async fn non_success_status_fails() {
        let url = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;

        let client = HttpLocationClient::new(&url, None).unwrap();
        let err = client.fetch_last_location().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn malformed_payload_fails() {
        let url = serve_once("HTTP/1.1 200 OK", r#"{"street":"Oak St"}"#).await;

        let client = HttpLocationClient::new(&url, None).unwrap();
        let err = client.fetch_last_location().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
