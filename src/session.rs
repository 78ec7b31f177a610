//! Search state of a single dashboard.
//!
//! Every analyze action moves the session through one atomic transition. A
//! monotonically increasing generation is stamped on each issued search, and
//! only the outcome carrying the latest generation may be committed, so a slow
//! response for an older address can never replace a newer result.

use crate::address::WalletAddress;
use crate::error::{FetchError, ValidationError};
use crate::models::TransactionRecord;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    NotSearched,
    Loading {
        generation: u64,
        address: WalletAddress,
    },
    Failed {
        message: String,
    },
    Loaded {
        address: WalletAddress,
        transactions: Vec<TransactionRecord>,
    },
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        match self {
            SearchState::Loaded { transactions, .. } => transactions,
            _ => &[],
        }
    }
}

/// Proof that a search was issued. Hand it back to [`Session::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub address: WalletAddress,
}

#[derive(Debug, Default)]
pub struct Session {
    state: SearchState,
    latest_generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Validates `input` and, if it is an address, starts a new search that
    /// supersedes whatever was shown or in flight before.
    ///
    /// Invalid input moves the session to `Failed` and issues no ticket, so no
    /// request may be made for it. Either way the action supersedes any search
    /// still in flight: it is not aborted, but its outcome is rejected later
    /// by [`Session::commit`].
    pub fn begin(&mut self, input: &str) -> Result<SearchTicket, ValidationError> {
        self.latest_generation += 1;

        let address = match WalletAddress::parse(input) {
            Ok(address) => address,
            Err(e) => {
                self.state = SearchState::Failed {
                    message: e.to_string(),
                };
                return Err(e);
            }
        };

        let ticket = SearchTicket {
            generation: self.latest_generation,
            address: address.clone(),
        };
        self.state = SearchState::Loading {
            generation: ticket.generation,
            address,
        };
        Ok(ticket)
    }

    /// Applies the outcome of the search identified by `ticket`. Returns
    /// `false` and leaves the state untouched when a newer search has been
    /// issued since.
    pub fn commit(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<TransactionRecord>, FetchError>,
    ) -> bool {
        if ticket.generation != self.latest_generation {
            debug!(
                "Discarding stale response #{} for {} (latest is #{})",
                ticket.generation,
                ticket.address.short(),
                self.latest_generation
            );
            return false;
        }

        self.state = match outcome {
            Ok(transactions) => SearchState::Loaded {
                address: ticket.address.clone(),
                transactions,
            },
            Err(e) => SearchState::Failed { message: e.message },
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::record;

    const A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    #[test]
    fn starts_not_searched() {
        let session = Session::new();
        assert_eq!(session.state(), &SearchState::NotSearched);
        assert!(session.state().transactions().is_empty());
    }

    #[test]
    fn invalid_input_fails_without_ticket() {
        let mut session = Session::new();
        assert_eq!(session.begin("0x123"), Err(ValidationError::InvalidAddress));
        assert_eq!(
            session.state().error(),
            Some("Please enter a valid Ethereum address")
        );
    }

    #[test]
    fn invalid_input_supersedes_search_in_flight() {
        let mut session = Session::new();
        let ticket = session.begin(A).unwrap();
        let _ = session.begin("not an address");

        assert!(!session.commit(&ticket, Ok(vec![record("0x1", A, B, "1")])));
        assert!(session.state().error().is_some());
        assert!(session.state().transactions().is_empty());
    }

    #[test]
    fn valid_input_clears_previous_error() {
        let mut session = Session::new();
        let _ = session.begin("nope");
        let ticket = session.begin(A).unwrap();
        assert!(session.state().is_loading());
        assert_eq!(session.state().error(), None);
        assert_eq!(ticket.generation, session.latest_generation());
    }

    #[test]
    fn new_search_hides_previous_results() {
        let mut session = Session::new();
        let first = session.begin(A).unwrap();
        assert!(session.commit(&first, Ok(vec![record("0x1", A, B, "1")])));
        assert_eq!(session.state().transactions().len(), 1);

        session.begin(B).unwrap();
        assert!(session.state().transactions().is_empty());
        assert!(session.state().is_loading());
    }

    #[test]
    fn failure_releases_loading_state() {
        let mut session = Session::new();
        let ticket = session.begin(A).unwrap();
        let err = FetchError::endpoint(Some("Invalid address format"));
        assert!(session.commit(&ticket, Err(err)));
        assert!(!session.state().is_loading());
        assert_eq!(session.state().error(), Some("Invalid address format"));
        assert!(session.state().transactions().is_empty());
    }

    #[test]
    fn empty_success_is_loaded_not_failed() {
        let mut session = Session::new();
        let ticket = session.begin(A).unwrap();
        assert!(session.commit(&ticket, Ok(Vec::new())));
        assert!(!session.state().is_loading());
        assert_eq!(session.state().error(), None);
        assert!(matches!(session.state(), SearchState::Loaded { .. }));
    }

    #[test]
    fn stale_response_arriving_last_is_discarded() {
        let mut session = Session::new();
        let ticket_a = session.begin(A).unwrap();
        let ticket_b = session.begin(B).unwrap();

        assert!(session.commit(&ticket_b, Ok(vec![record("0xb", B, A, "2")])));
        assert!(!session.commit(&ticket_a, Ok(vec![record("0xa", A, B, "1")])));

        match session.state() {
            SearchState::Loaded { address, transactions } => {
                assert_eq!(address.as_str(), B);
                assert_eq!(transactions[0].hash, "0xb");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn stale_response_arriving_first_does_not_end_loading() {
        let mut session = Session::new();
        let ticket_a = session.begin(A).unwrap();
        let _ticket_b = session.begin(B).unwrap();

        assert!(!session.commit(&ticket_a, Err(FetchError::transport())));
        assert!(session.state().is_loading());
    }
}
