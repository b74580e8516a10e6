//! Adapter for oracle networks that serve signed data over HTTP.

use super::OracleAdapter;
use alloy::primitives::{Address, Bytes};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

/// Configuration of an [`HttpAdapter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpAdapterConfig {
    /// The oracle id served by the endpoint.
    pub oracle_id: String,
    /// The endpoint queries are posted to.
    pub url: Url,
}

/// Request body sent to the endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OffchainDataRequest<'a> {
    oracle_contract: Address,
    oracle_query: &'a Bytes,
}

/// Response body expected from the endpoint.
#[derive(Debug, Deserialize)]
struct OffchainDataResponse {
    data: Bytes,
}

/// Generic adapter that posts the oracle query to an HTTP endpoint and uses the returned bytes as
/// the offchain data.
///
/// The endpoint receives `{"oracleContract": "0x..", "oracleQuery": "0x.."}` and must answer with
/// `{"data": "0x.."}`.
#[derive(Debug, Clone)]
pub struct HttpAdapter {
    client: Client,
    oracle_id: String,
    url: Url,
}

impl HttpAdapter {
    /// Creates a new adapter for `oracle_id` served at `url`.
    pub fn new(oracle_id: impl Into<String>, url: Url) -> Self {
        Self { client: Client::new(), oracle_id: oracle_id.into(), url }
    }

    /// Sets the HTTP client used for requests.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// The endpoint queries are posted to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Creates one shareable adapter per config.
    pub fn from_configs<C>(
        configs: impl IntoIterator<Item = HttpAdapterConfig>,
    ) -> Vec<Arc<dyn OracleAdapter<C>>>
    where
        C: Sync + ?Sized,
    {
        configs
            .into_iter()
            .map(|config| Arc::new(Self::from(config)) as Arc<dyn OracleAdapter<C>>)
            .collect()
    }
}

impl From<HttpAdapterConfig> for HttpAdapter {
    fn from(config: HttpAdapterConfig) -> Self {
        Self::new(config.oracle_id, config.url)
    }
}

#[async_trait::async_trait]
impl<C> OracleAdapter<C> for HttpAdapter
where
    C: Sync + ?Sized,
{
    fn oracle_id(&self) -> &str {
        &self.oracle_id
    }

    async fn fetch_offchain_data(
        &self,
        _client: &C,
        oracle: Address,
        query: &Bytes,
    ) -> eyre::Result<Bytes> {
        debug!(oracle_id = %self.oracle_id, %oracle, url = %self.url, "Fetching offchain data.");

        let response = self
            .client
            .post(self.url.clone())
            .json(&OffchainDataRequest { oracle_contract: oracle, oracle_query: query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => format!("<failed to read response body: {err}>"),
            };
            error!(oracle_id = %self.oracle_id, %status, %body, "Offchain data request failed.");
            eyre::bail!("offchain data request to {} failed with {status}: {body}", self.url);
        }

        let OffchainDataResponse { data } = response.json().await?;
        Ok(data)
    }
}
