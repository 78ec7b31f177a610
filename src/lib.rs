pub mod address;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod explorer;
pub mod format;
pub mod knowledge;
pub mod models;
pub mod query;
pub mod session;

pub use address::WalletAddress;
pub use dashboard::Dashboard;
pub use error::{FetchError, FetchFailure, ValidationError};
pub use explorer::{ExplorerClient, TransactionSource};
pub use models::{Direction, TransactionRecord, TransactionView};
pub use session::{SearchState, SearchTicket, Session};
