use crate::address::WalletAddress;
use crate::error::FetchError;
use crate::models::TransactionRecord;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.basescan.org/api";
pub const DEFAULT_TX_URL: &str = "https://basescan.org/tx/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Fixed query of the `txlist` action: whole chain, first page of 20, newest first.
const START_BLOCK: u64 = 0;
const END_BLOCK: u64 = 99_999_999;
const PAGE: u32 = 1;
const PAGE_SIZE: u32 = 20;
const SORT: &str = "desc";

const STATUS_OK: &str = "1";
const STATUS_NOT_OK: &str = "0";
const NO_TRANSACTIONS: &str = "No transactions found";

pub fn build_request_url(api_url: &str, address: &WalletAddress) -> String {
    format!(
        "{api_url}?module=account&action=txlist&address={address}&startblock={START_BLOCK}\
         &endblock={END_BLOCK}&page={PAGE}&offset={PAGE_SIZE}&sort={SORT}"
    )
}

/// Envelope shared by every explorer action. `result` is an array on success
/// and a string on most failures, so it is decoded lazily.
#[derive(Debug, Deserialize)]
pub struct ExplorerEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// Maps the endpoint's overloaded `status` field onto an outcome. The
/// "not found" check must come first: it is reported with the failure status.
pub fn interpret_envelope(
    envelope: ExplorerEnvelope,
) -> Result<Vec<TransactionRecord>, FetchError> {
    let message = envelope.message.as_deref();

    if envelope.status == STATUS_NOT_OK && message == Some(NO_TRANSACTIONS) {
        return Ok(Vec::new());
    }

    if envelope.status == STATUS_OK {
        return serde_json::from_value(envelope.result).map_err(|e| {
            warn!("Explorer reported success with an unreadable result: {}", e);
            FetchError::malformed()
        });
    }

    Err(FetchError::endpoint(message))
}

pub fn interpret_body(http_status: u16, body: &str) -> Result<Vec<TransactionRecord>, FetchError> {
    if !(200..300).contains(&http_status) {
        return Err(FetchError::http_status(http_status));
    }

    let envelope: ExplorerEnvelope = serde_json::from_str(body).map_err(|e| {
        warn!("Explorer returned a body that is not a valid envelope: {}", e);
        FetchError::malformed()
    })?;

    interpret_envelope(envelope)
}

/// Anything that can list the recent transactions of an address.
pub trait TransactionSource: Send + Sync {
    fn fetch_transactions(
        &self,
        address: &WalletAddress,
    ) -> impl Future<Output = Result<Vec<TransactionRecord>, FetchError>> + Send;
}

#[derive(Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    api_url: String,
    request_timeout: Duration,
}

impl ExplorerClient {
    pub fn new(api_url: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            request_timeout,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get(&self, url: &str) -> Result<(u16, String), reqwest::Error> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

impl TransactionSource for ExplorerClient {
    async fn fetch_transactions(
        &self,
        address: &WalletAddress,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        let url = build_request_url(&self.api_url, address);
        debug!("GET {}", url);

        let (status, body) = match timeout(self.request_timeout, self.get(&url)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("Request to {} failed: {}", self.api_url, e);
                return Err(FetchError::transport());
            }
            Err(_) => {
                warn!(
                    "Request timeout after {} seconds on {}",
                    self.request_timeout.as_secs(),
                    self.api_url
                );
                return Err(FetchError::transport());
            }
        };

        let transactions = interpret_body(status, &body)?;
        info!(
            "Fetched {} transaction(s) for {}",
            transactions.len(),
            address.short()
        );
        Ok(transactions)
    }
}
