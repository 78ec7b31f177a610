//! Illustrative knowledge graph of a wallet and its trading journal.
//!
//! The content is fixed sample data shown next to the transaction history.
//! There is no persistence and no query engine; every node and edge kind has
//! its own closed set of fields.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Wallet {
        address: &'static str,
        chain: &'static str,
    },
    Token {
        symbol: &'static str,
        decimals: u8,
        stablecoin: bool,
    },
    Protocol {
        chain: &'static str,
        tvl_usd: u64,
    },
    Transaction {
        amount: f64,
        token: &'static str,
        apy: f64,
    },
    Trade {
        pnl: f64,
        roi: f64,
    },
    Yield {
        protocol: &'static str,
        token: &'static str,
        apy: f64,
        amount: f64,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Wallet { .. } => "wallet",
            NodeKind::Token { .. } => "token",
            NodeKind::Protocol { .. } => "protocol",
            NodeKind::Transaction { .. } => "transaction",
            NodeKind::Trade { .. } => "trade",
            NodeKind::Yield { .. } => "yield",
        }
    }

    /// One-line summary of the variant's fields.
    pub fn details(&self) -> String {
        match self {
            NodeKind::Wallet { address, chain } => format!("{address} on {chain}"),
            NodeKind::Token {
                symbol,
                decimals,
                stablecoin,
            } => {
                let kind = if *stablecoin { ", stablecoin" } else { "" };
                format!("{symbol} ({decimals} decimals{kind})")
            }
            NodeKind::Protocol { chain, tvl_usd } => format!("{chain}, TVL ${tvl_usd}"),
            NodeKind::Transaction { amount, token, apy } => {
                format!("{amount} {token} at {apy}% APY")
            }
            NodeKind::Trade { pnl, roi } => format!("PnL ${pnl}, ROI {roi}%"),
            NodeKind::Yield {
                protocol,
                token,
                apy,
                amount,
            } => format!("{amount} {token} in {protocol} at {apy}% APY"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeNode {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub created_at: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeKind {
    Holds { balance: f64 },
    Traded,
    Deposited { amount: f64 },
    Withdrew { amount: f64 },
    Yielded { amount: f64 },
    Linked,
}

impl EdgeKind {
    pub fn name(&self) -> &'static str {
        match self {
            EdgeKind::Holds { .. } => "holds",
            EdgeKind::Traded => "traded",
            EdgeKind::Deposited { .. } => "deposited",
            EdgeKind::Withdrew { .. } => "withdrew",
            EdgeKind::Yielded { .. } => "yielded",
            EdgeKind::Linked => "linked",
        }
    }

    pub fn details(&self) -> String {
        match self {
            EdgeKind::Holds { balance } => format!("balance {balance}"),
            EdgeKind::Deposited { amount }
            | EdgeKind::Withdrew { amount }
            | EdgeKind::Yielded { amount } => format!("amount {amount}"),
            EdgeKind::Traded | EdgeKind::Linked => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeEdge {
    pub id: &'static str,
    pub source: &'static str,
    pub target: &'static str,
    #[serde(flatten)]
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<KnowledgeNode>,
    pub edges: Vec<KnowledgeEdge>,
}

impl KnowledgeGraph {
    pub fn node(&self, id: &str) -> Option<&KnowledgeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a KnowledgeEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Edges whose source or target names no node.
    pub fn dangling_edges(&self) -> Vec<&KnowledgeEdge> {
        self.edges
            .iter()
            .filter(|e| self.node(e.source).is_none() || self.node(e.target).is_none())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalTrade {
    pub id: &'static str,
    pub token_in: &'static str,
    pub token_out: &'static str,
    pub amount_in: f64,
    pub amount_out: f64,
    pub entry_price: f64,
    pub exit_price: Option<f64>,
    pub pnl: Option<f64>,
    pub reasoning: &'static str,
    pub tx_hash: &'static str,
    pub timestamp: &'static str,
}

impl JournalTrade {
    pub fn is_open(&self) -> bool {
        self.exit_price.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journal {
    pub trades: Vec<JournalTrade>,
}

impl Journal {
    /// Realised PnL over closed trades that report one.
    pub fn total_pnl(&self) -> f64 {
        self.trades.iter().filter_map(|t| t.pnl).sum()
    }
}

const SEEDED_AT: &str = "2026-02-28T00:00:00Z";

pub fn sample_graph() -> KnowledgeGraph {
    let nodes = vec![
        KnowledgeNode {
            id: "wallet-1",
            label: "My Wallet",
            kind: NodeKind::Wallet {
                address: "0x4c9a...a8e9",
                chain: "Base",
            },
            created_at: SEEDED_AT,
        },
        KnowledgeNode {
            id: "token-usdc",
            label: "USDC",
            kind: NodeKind::Token {
                symbol: "USDC",
                decimals: 6,
                stablecoin: true,
            },
            created_at: SEEDED_AT,
        },
        KnowledgeNode {
            id: "token-eth",
            label: "ETH",
            kind: NodeKind::Token {
                symbol: "ETH",
                decimals: 18,
                stablecoin: false,
            },
            created_at: SEEDED_AT,
        },
        KnowledgeNode {
            id: "protocol-aave",
            label: "Aave",
            kind: NodeKind::Protocol {
                chain: "Base",
                tvl_usd: 4_200_000_000,
            },
            created_at: SEEDED_AT,
        },
        KnowledgeNode {
            id: "tx-1",
            label: "Deposit to Aave",
            kind: NodeKind::Transaction {
                amount: 1000.0,
                token: "USDC",
                apy: 4.52,
            },
            created_at: "2026-02-28T10:00:00Z",
        },
        KnowledgeNode {
            id: "trade-1",
            label: "ETH Long",
            kind: NodeKind::Trade {
                pnl: 250.0,
                roi: 12.5,
            },
            created_at: "2026-02-27T14:30:00Z",
        },
    ];

    let edges = vec![
        KnowledgeEdge {
            id: "e1",
            source: "wallet-1",
            target: "token-usdc",
            kind: EdgeKind::Holds { balance: 50_000.0 },
        },
        KnowledgeEdge {
            id: "e2",
            source: "wallet-1",
            target: "token-eth",
            kind: EdgeKind::Holds { balance: 10.5 },
        },
        KnowledgeEdge {
            id: "e3",
            source: "wallet-1",
            target: "protocol-aave",
            kind: EdgeKind::Deposited { amount: 1000.0 },
        },
        KnowledgeEdge {
            id: "e4",
            source: "wallet-1",
            target: "tx-1",
            kind: EdgeKind::Linked,
        },
        KnowledgeEdge {
            id: "e5",
            source: "wallet-1",
            target: "trade-1",
            kind: EdgeKind::Traded,
        },
    ];

    KnowledgeGraph { nodes, edges }
}

pub fn sample_journal() -> Journal {
    Journal {
        trades: vec![
            JournalTrade {
                id: "trade-1",
                token_in: "USDC",
                token_out: "ETH",
                amount_in: 2000.0,
                amount_out: 0.65,
                entry_price: 3076.0,
                exit_price: Some(3460.0),
                pnl: Some(250.0),
                reasoning: "Bullish on Base ecosystem growth, technical breakout at $3K resistance",
                tx_hash: "0xabc123...",
                timestamp: "2026-02-27T14:30:00Z",
            },
            JournalTrade {
                id: "trade-2",
                token_in: "ETH",
                token_out: "USDC",
                amount_in: 0.5,
                amount_out: 1750.0,
                entry_price: 3200.0,
                exit_price: Some(3500.0),
                pnl: Some(150.0),
                reasoning: "Taking profits at resistance, will rebuy on pullback",
                tx_hash: "0xdef456...",
                timestamp: "2026-02-26T09:15:00Z",
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn sample_graph_has_no_dangling_edges() {
        let graph = sample_graph();
        assert_eq!(graph.nodes.len(), 6);
        assert_eq!(graph.edges.len(), 5);
        assert!(graph.dangling_edges().is_empty());
    }

    #[test]
    fn dangling_edges_are_reported() {
        let mut graph = sample_graph();
        graph.edges.push(KnowledgeEdge {
            id: "e6",
            source: "wallet-1",
            target: "yield-1",
            kind: EdgeKind::Yielded { amount: 12.0 },
        });
        let dangling = graph.dangling_edges();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].id, "e6");
    }

    #[test]
    fn wallet_links_to_everything_else() {
        let graph = sample_graph();
        let targets: Vec<&str> = graph.edges_from("wallet-1").map(|e| e.target).collect();
        assert_eq!(
            targets,
            ["token-usdc", "token-eth", "protocol-aave", "tx-1", "trade-1"]
        );
        assert_eq!(graph.edges_from("token-eth").count(), 0);
    }

    #[test]
    fn node_lookup_and_details() {
        let graph = sample_graph();
        let usdc = graph.node("token-usdc").unwrap();
        assert_eq!(usdc.kind.name(), "token");
        assert_eq!(usdc.kind.details(), "USDC (6 decimals, stablecoin)");
        assert!(graph.node("missing").is_none());
    }

    #[test]
    fn timestamps_are_rfc3339() {
        let graph = sample_graph();
        for node in &graph.nodes {
            assert!(DateTime::parse_from_rfc3339(node.created_at).is_ok(), "{}", node.id);
        }
        for trade in &sample_journal().trades {
            assert!(DateTime::parse_from_rfc3339(trade.timestamp).is_ok(), "{}", trade.id);
        }
    }

    #[test]
    fn node_serializes_with_type_tag() {
        let graph = sample_graph();
        let json = serde_json::to_value(graph.node("protocol-aave").unwrap()).unwrap();
        assert_eq!(json["type"], "protocol");
        assert_eq!(json["tvl_usd"], 4_200_000_000u64);
        assert_eq!(json["label"], "Aave");
    }

    #[test]
    fn journal_totals_pnl() {
        let journal = sample_journal();
        assert_eq!(journal.total_pnl(), 400.0);
        assert!(journal.trades.iter().all(|t| !t.is_open()));
    }
}
