// crates/hatchery-cli/src/output.rs
//
// Output formatting utilities for the Hatchery CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Two-decimal rendering used for table cells.
pub fn num(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled, Serialize)]
    struct Row {
        week: u64,
        value: String,
    }

    #[test]
    fn test_format_table_contains_headers() {
        let rows = vec![Row {
            week: 1,
            value: num(2.5),
        }];
        let table = format_table(&rows);
        assert!(table.contains("week"));
        assert!(table.contains("2.50"));
    }

    #[test]
    fn test_format_json() {
        let rows = vec![Row {
            week: 3,
            value: "x".to_string(),
        }];
        let json = format_json(&rows);
        assert!(json.contains("\"week\": 3"));
    }
}
