use crate::address::{WalletAddress, shorten_address};
use crate::format::{explorer_link, format_timestamp, format_value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One transfer as returned by the explorer's `txlist` action. Fields are kept
/// as the endpoint's strings; the wire payload carries more fields, which are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: String,
    pub value: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    #[serde(rename = "gasPrice")]
    pub gas_price: String,
    #[serde(rename = "gasUsed")]
    pub gas_used: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    pub fn classify(record: &TransactionRecord, queried: &WalletAddress) -> Self {
        if queried.matches(&record.from) {
            Direction::Outgoing
        } else {
            Direction::Incoming
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Outgoing => "Sent",
            Direction::Incoming => "Received",
        }
    }

    pub fn sign(self) -> char {
        match self {
            Direction::Outgoing => '-',
            Direction::Incoming => '+',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display row derived from a [`TransactionRecord`] relative to the queried
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionView {
    pub hash: String,
    pub direction: Direction,
    /// `To: ...` for outgoing rows, `From: ...` for incoming rows.
    pub counterparty: String,
    pub value: String,
    pub value_wei: String,
    pub time: String,
    pub link: String,
}

impl TransactionView {
    pub fn new(record: &TransactionRecord, queried: &WalletAddress, tx_url: &str) -> Self {
        let direction = Direction::classify(record, queried);
        let counterparty = match direction {
            Direction::Outgoing => format!("To: {}", shorten_address(&record.to)),
            Direction::Incoming => format!("From: {}", shorten_address(&record.from)),
        };

        Self {
            hash: record.hash.clone(),
            direction,
            counterparty,
            value: format!("{}{}", direction.sign(), format_value(&record.value)),
            value_wei: record.value.clone(),
            time: format_timestamp(&record.timestamp),
            link: explorer_link(tx_url, &record.hash),
        }
    }
}
