use crate::address::WalletAddress;
use crate::error::ValidationError;
use crate::explorer::TransactionSource;
use crate::models::{TransactionRecord, TransactionView};
use crate::session::{SearchState, Session};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Ties the session state to a transaction source. Cloning is cheap and every
/// clone drives the same session.
pub struct Dashboard<S> {
    source: Arc<S>,
    session: Arc<Mutex<Session>>,
    tx_url: String,
}

impl<S> Clone for Dashboard<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            session: Arc::clone(&self.session),
            tx_url: self.tx_url.clone(),
        }
    }
}

impl<S: TransactionSource> Dashboard<S> {
    pub fn new(source: S, tx_url: impl Into<String>) -> Self {
        Self {
            source: Arc::new(source),
            session: Arc::new(Mutex::new(Session::new())),
            tx_url: tx_url.into(),
        }
    }

    /// Runs one analyze action: validate, fetch once, commit.
    ///
    /// The session lock is not held across the fetch, so overlapping calls are
    /// allowed; the last one issued wins. Returns the state as it stands after
    /// this call, which is a newer search's state if this one was superseded.
    pub async fn analyze(&self, input: &str) -> Result<SearchState, ValidationError> {
        let ticket = self.session.lock().await.begin(input)?;
        info!(
            "Analyzing {} (search #{})",
            ticket.address.short(),
            ticket.generation
        );

        let outcome = self.source.fetch_transactions(&ticket.address).await;
        if let Err(e) = &outcome {
            error!(
                "Error fetching transactions for {}: {} ({})",
                ticket.address, e, e.kind
            );
        }

        let mut session = self.session.lock().await;
        session.commit(&ticket, outcome);
        Ok(session.state().clone())
    }

    pub async fn state(&self) -> SearchState {
        self.session.lock().await.state().clone()
    }

    pub async fn is_busy(&self) -> bool {
        self.session.lock().await.state().is_loading()
    }

    /// Display rows for the current result set, empty unless results are shown.
    pub async fn views(&self) -> Vec<TransactionView> {
        match self.session.lock().await.state() {
            SearchState::Loaded {
                address,
                transactions,
            } => render_views(transactions, address, &self.tx_url),
            _ => Vec::new(),
        }
    }

    pub fn tx_url(&self) -> &str {
        &self.tx_url
    }
}

pub fn render_views(
    transactions: &[TransactionRecord],
    address: &WalletAddress,
    tx_url: &str,
) -> Vec<TransactionView> {
    transactions
        .iter()
        .map(|tx| TransactionView::new(tx, address, tx_url))
        .collect()
}
