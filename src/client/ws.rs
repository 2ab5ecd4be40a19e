//! Transporte WebSocket (tokio-tungstenite)

use super::LocationClient;
use crate::error::FetchError;
use crate::types::LocationResponse;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Mensagem de requisição enviada logo após conectar.
pub const REQUEST_MESSAGE: &str = r#"{"action":"getLastLocation"}"#;

/// Uma conexão por busca: conecta, envia a requisição, espera o primeiro frame de texto.
pub struct WsLocationClient {
    url: String,
    timeout: Option<Duration>,
}

impl WsLocationClient {
    pub fn new(url: &str, timeout: Option<Duration>) -> Self {
        Self {
            url: url.to_string(),
            timeout,
        }
    }

    async fn request(&self) -> Result<LocationResponse, FetchError> {
        tracing::debug!(url = %self.url, "conectando");
        let (ws_stream, _) = connect_async(self.url.as_str()).await?;
        let (mut write, mut read) = ws_stream.split();

        write.send(Message::Text(REQUEST_MESSAGE.to_string())).await?;

        // Ping/Pong são respondidos pelo tungstenite; frames binários não fazem parte do protocolo
        while let Some(msg) = read.next().await {
            match msg? {
                Message::Text(text) => {
                    let response = serde_json::from_str(&text)?;
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(response);
                }
                Message::Close(_) => return Err(FetchError::Closed),
                _ => continue,
            }
        }

        Err(FetchError::Closed)
    }
}

#[async_trait]
impl LocationClient for WsLocationClient {
    async fn fetch_last_location(&self) -> Result<LocationResponse, FetchError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.request())
                .await
                .map_err(|_| FetchError::Timeout(timeout))?,
            None => self.request().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    /// Servidor que aceita uma conexão, confere a requisição e responde com `reply`.
    async fn serve_once(reply: Option<&'static str>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(socket).await.unwrap();

            let request = ws.next().await.unwrap().unwrap();
            assert_eq!(request, Message::Text(REQUEST_MESSAGE.to_string()));

            ws.send(Message::Ping(vec![1, 2, 3])).await.unwrap();
            match reply {
                Some(text) => ws.send(Message::Text(text.to_string())).await.unwrap(),
                None => ws.close(None).await.unwrap(),
            }
            // Drena até o cliente fechar
            while let Some(Ok(_)) = ws.next().await {}
        });

        format!("ws://{}", addr)
    }

    #[tokio::test]
    async fn decodes_first_text_frame() {
        let url = serve_once(Some(
            r#"{"address":{"street":"Oak St","city":"Springfield"}}"#,
        ))
        .await;

        let client = WsLocationClient::new(&url, None);
        let response = client.fetch_last_location().await.unwrap();
        assert_eq!(response.address, Address::new("Oak St", "Springfield"));
    }

    #[tokio::test]
    async fn close_before_reply_fails() {
        let url = serve_once(None).await;

        let client = WsLocationClient::new(&url, Some(Duration::from_secs(5)));
        let err = client.fetch_last_location().await.unwrap_err();
        assert!(matches!(err, FetchError::Closed));
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let _ws = accept_async(socket).await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client = WsLocationClient::new(&format!("ws://{}", addr), Some(Duration::from_millis(200)));
        let err = client.fetch_last_location().await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }
}
