use crate::error::RemoteError;
use crate::models::{RelayLogs, RelayedRequest, RelayedResponse};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// The backend that performs outbound calls and buffers dashboard logs.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn send(&self, request: &RelayedRequest) -> Result<RelayedResponse, RemoteError>;

    async fn logs(&self) -> Result<RelayLogs, RemoteError>;
}

/// Relay reached over HTTP at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: Client,
    send_url: Url,
    logs_url: Url,
}

impl HttpRelay {
    pub fn new(client: Client, base_url: &Url) -> Result<Self, RemoteError> {
        Ok(Self {
            client,
            send_url: base_url.join("/api/send")?,
            logs_url: base_url.join("/api/logs")?,
        })
    }

    /// Client without a timeout: a hung relay call simply never completes.
    pub fn build_client() -> Result<Client, RemoteError> {
        Ok(Client::builder().build()?)
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn send(&self, request: &RelayedRequest) -> Result<RelayedResponse, RemoteError> {
        info!(
            "Relaying {} {} through {}",
            request.method, request.endpoint, self.send_url
        );

        // The body is read whatever the status: failures come back as 500 with JSON.
        let resp = self.client.post(self.send_url.clone()).json(request).send().await?;
        debug!("Relay answered send with status {}", resp.status());
        let reply = resp.json::<RelayedResponse>().await?;
        Ok(reply)
    }

    async fn logs(&self) -> Result<RelayLogs, RemoteError> {
        let resp = self.client.get(self.logs_url.clone()).send().await?;
        let logs = resp.json::<RelayLogs>().await?;
        debug!("Fetched {} relay log lines", logs.logs.len());
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_resolved_against_the_relay_root() {
        let base = Url::parse("http://relay.local:6001/dashboard/").unwrap();
        let relay = HttpRelay::new(Client::new(), &base).unwrap();
        assert_eq!(relay.send_url.as_str(), "http://relay.local:6001/api/send");
        assert_eq!(relay.logs_url.as_str(), "http://relay.local:6001/api/logs");
    }

    #[tokio::test]
    async fn unreachable_relay_is_a_transport_error() {
        let base = Url::parse("http://127.0.0.1:1/").unwrap();
        let relay = HttpRelay::new(Client::new(), &base).unwrap();
        match relay.logs().await {
            Err(RemoteError::Transport(message)) => assert!(!message.is_empty()),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
