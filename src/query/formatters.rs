use crate::knowledge::{Journal, KnowledgeGraph};
use crate::models::TransactionView;
use comfy_table::{Cell, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use csv::Writer;
use serde_json::json;

pub const NO_TRANSACTIONS: &str = "No transactions found for this address";

#[derive(Debug, Clone)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            _ => OutputFormat::Table,
        }
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header);
    table
}

fn finish_csv(wtr: Writer<Vec<u8>>) -> String {
    String::from_utf8(wtr.into_inner().unwrap_or_default()).unwrap_or_default()
}

pub fn format_transactions(
    views: &[TransactionView],
    address_short: &str,
    format: &OutputFormat,
) -> String {
    match format {
        OutputFormat::Table => format_transactions_table(views, address_short),
        OutputFormat::Json => format_transactions_json(views),
        OutputFormat::Csv => format_transactions_csv(views),
    }
}

fn format_transactions_table(views: &[TransactionView], address_short: &str) -> String {
    if views.is_empty() {
        return NO_TRANSACTIONS.to_string();
    }

    let mut table = new_table(vec!["", "Counterparty", "Value", "Time", "Link"]);
    for view in views {
        table.add_row(vec![
            Cell::new(view.direction.label()),
            Cell::new(&view.counterparty),
            Cell::new(&view.value),
            Cell::new(&view.time),
            Cell::new(&view.link),
        ]);
    }

    format!(
        "Transaction History ({address_short})\n{} transactions found\n{table}",
        views.len()
    )
}

fn format_transactions_json(views: &[TransactionView]) -> String {
    serde_json::to_string_pretty(views).unwrap_or_else(|_| "[]".to_string())
}

fn format_transactions_csv(views: &[TransactionView]) -> String {
    let mut wtr = Writer::from_writer(vec![]);

    let _ = wtr.write_record([
        "direction",
        "counterparty",
        "value",
        "value_wei",
        "time",
        "hash",
        "link",
    ]);

    for view in views {
        let _ = wtr.write_record([
            view.direction.label(),
            &view.counterparty,
            &view.value,
            &view.value_wei,
            &view.time,
            &view.hash,
            &view.link,
        ]);
    }

    finish_csv(wtr)
}

pub fn format_error(message: &str, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Table => format!("Error: {message}"),
        OutputFormat::Json => json!({ "error": message }).to_string(),
        OutputFormat::Csv => {
            let mut wtr = Writer::from_writer(vec![]);
            let _ = wtr.write_record(["error"]);
            let _ = wtr.write_record([message]);
            finish_csv(wtr)
        }
    }
}

pub fn format_graph(graph: &KnowledgeGraph, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let mut nodes = new_table(vec!["Id", "Type", "Label", "Details", "Created"]);
            for node in &graph.nodes {
                nodes.add_row(vec![
                    Cell::new(node.id),
                    Cell::new(node.kind.name()),
                    Cell::new(node.label),
                    Cell::new(node.kind.details()),
                    Cell::new(node.created_at),
                ]);
            }

            let mut edges = new_table(vec!["Id", "Source", "Relation", "Target", "Details"]);
            for edge in &graph.edges {
                edges.add_row(vec![
                    Cell::new(edge.id),
                    Cell::new(edge.source),
                    Cell::new(edge.kind.name()),
                    Cell::new(edge.target),
                    Cell::new(edge.kind.details()),
                ]);
            }

            format!("Nodes\n{nodes}\nEdges\n{edges}")
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(graph).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Csv => {
            let mut wtr = Writer::from_writer(vec![]);
            let _ = wtr.write_record(["kind", "id", "type", "label", "source", "target", "details"]);
            for node in &graph.nodes {
                let _ = wtr.write_record([
                    "node",
                    node.id,
                    node.kind.name(),
                    node.label,
                    "",
                    "",
                    &node.kind.details(),
                ]);
            }
            for edge in &graph.edges {
                let _ = wtr.write_record([
                    "edge",
                    edge.id,
                    edge.kind.name(),
                    "",
                    edge.source,
                    edge.target,
                    &edge.kind.details(),
                ]);
            }
            finish_csv(wtr)
        }
    }
}

pub fn format_journal(journal: &Journal, format: &OutputFormat) -> String {
    let optional = |v: Option<f64>| v.map_or("N/A".to_string(), |v| v.to_string());

    match format {
        OutputFormat::Table => {
            if journal.trades.is_empty() {
                return "No trades recorded.".to_string();
            }

            let mut table = new_table(vec![
                "Trade", "Pair", "In", "Out", "Entry", "Exit", "PnL", "Reasoning",
            ]);
            for trade in &journal.trades {
                table.add_row(vec![
                    Cell::new(trade.id),
                    Cell::new(format!("{} -> {}", trade.token_in, trade.token_out)),
                    Cell::new(trade.amount_in),
                    Cell::new(trade.amount_out),
                    Cell::new(trade.entry_price),
                    Cell::new(optional(trade.exit_price)),
                    Cell::new(optional(trade.pnl)),
                    Cell::new(trade.reasoning),
                ]);
            }

            format!("{table}\nTotal PnL: ${}", journal.total_pnl())
        }
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "trades": journal.trades,
            "total_pnl": journal.total_pnl(),
        }))
        .unwrap_or_else(|_| "{}".to_string()),
        OutputFormat::Csv => {
            let mut wtr = Writer::from_writer(vec![]);
            let _ = wtr.write_record([
                "id",
                "token_in",
                "token_out",
                "amount_in",
                "amount_out",
                "entry_price",
                "exit_price",
                "pnl",
                "reasoning",
                "tx_hash",
                "timestamp",
            ]);
            for trade in &journal.trades {
                let _ = wtr.write_record([
                    trade.id,
                    trade.token_in,
                    trade.token_out,
                    &trade.amount_in.to_string(),
                    &trade.amount_out.to_string(),
                    &trade.entry_price.to_string(),
                    &optional(trade.exit_price),
                    &optional(trade.pnl),
                    trade.reasoning,
                    trade.tx_hash,
                    trade.timestamp,
                ]);
            }
            finish_csv(wtr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::WalletAddress;
    use crate::knowledge::{sample_graph, sample_journal};
    use crate::models::tests::record;

    const ME: &str = "0xabcdef1234567890abcdef1234567890abcdef12";
    const THEM: &str = "0x4c9a1234567890abcdef1234567890abcdefa8e9";

    fn views() -> Vec<TransactionView> {
        let me = WalletAddress::parse(ME).unwrap();
        vec![
            TransactionView::new(&record("0x01", ME, THEM, "1500000000000000000"), &me, "tx/"),
            TransactionView::new(&record("0x02", THEM, ME, "0"), &me, "tx/"),
        ]
    }

    #[test]
    fn output_format_parses_loosely() {
        assert!(matches!(OutputFormat::from("JSON"), OutputFormat::Json));
        assert!(matches!(OutputFormat::from("csv"), OutputFormat::Csv));
        assert!(matches!(OutputFormat::from("whatever"), OutputFormat::Table));
    }

    #[test]
    fn empty_result_uses_fixed_message() {
        let out = format_transactions(&[], "0xabcd...ef12", &OutputFormat::Table);
        assert_eq!(out, NO_TRANSACTIONS);
        assert_eq!(format_transactions(&[], "", &OutputFormat::Json), "[]");
    }

    #[test]
    fn table_lists_rows_in_order() {
        let out = format_transactions(&views(), "0xabcd...ef12", &OutputFormat::Table);
        assert!(out.starts_with("Transaction History (0xabcd...ef12)\n2 transactions found"));
        let sent = out.find("-1.500000 ETH").unwrap();
        let received = out.find("+0 ETH").unwrap();
        assert!(sent < received);
        assert!(out.contains("To: 0x4c9a...a8e9"));
        assert!(out.contains("From: 0x4c9a...a8e9"));
    }

    #[test]
    fn json_rows_carry_direction() {
        let out = format_transactions(&views(), "", &OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["direction"], "outgoing");
        assert_eq!(parsed[1]["direction"], "incoming");
        assert_eq!(parsed[0]["value_wei"], "1500000000000000000");
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let out = format_transactions(&views(), "", &OutputFormat::Csv);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("direction,counterparty,value"));
        assert!(lines[1].starts_with("Sent,To: 0x4c9a...a8e9,-1.500000 ETH"));
    }

    #[test]
    fn errors_render_per_format() {
        assert_eq!(format_error("Unknown error", &OutputFormat::Table), "Error: Unknown error");
        assert_eq!(
            format_error("Unknown error", &OutputFormat::Json),
            r#"{"error":"Unknown error"}"#
        );
    }

    #[test]
    fn graph_renders_every_node_and_edge() {
        let graph = sample_graph();
        let csv = format_graph(&graph, &OutputFormat::Csv);
        assert_eq!(csv.lines().count(), 1 + graph.nodes.len() + graph.edges.len());

        let table = format_graph(&graph, &OutputFormat::Table);
        assert!(table.contains("protocol-aave"));
        assert!(table.contains("deposited"));
    }

    #[test]
    fn journal_reports_total_pnl() {
        let journal = sample_journal();
        let table = format_journal(&journal, &OutputFormat::Table);
        assert!(table.ends_with("Total PnL: $400"));

        let json: serde_json::Value =
            serde_json::from_str(&format_journal(&journal, &OutputFormat::Json)).unwrap();
        assert_eq!(json["total_pnl"], 400.0);
        assert_eq!(json["trades"][1]["tokenIn"], "ETH");
    }
}
