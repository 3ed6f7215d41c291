//! HTTP implementation of the remote gateway.

use std::time::Duration;

use async_trait::async_trait;
use choreboard_core::gateway::{RemoteGateway, RemoteMutation, RemoteSnapshot};
use choreboard_core::{ChoreboardError, Result};
use reqwest::Client;

/// Gateway to the spreadsheet-backed sync endpoint.
///
/// One URL serves both operations: GET returns the full state as tables,
/// POST appends a single mutation. The endpoint sends no usable
/// acknowledgement for writes, so they are fire-and-forget by contract.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpGateway {
    /// Creates a gateway for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn fetch_all(&self) -> Result<RemoteSnapshot> {
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| ChoreboardError::network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ChoreboardError::RemoteStatus {
                status: response.status().as_u16(),
            });
        }

        response
            .json::<RemoteSnapshot>()
            .await
            .map_err(|err| ChoreboardError::parse(err.to_string()))
    }

    async fn send_mutation(&self, mutation: RemoteMutation) {
        let request = self
            .client
            .post(&self.endpoint)
            .json(&mutation)
            .timeout(self.timeout);

        match request.send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                // The write may still have been applied; the board must not
                // block on it either way
                tracing::debug!("[HttpGateway] write returned status {}", response.status());
            }
            Err(err) => {
                tracing::warn!("[HttpGateway] background write failed: {}", err);
            }
        }
    }
}
