pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of an envelope, or the value itself when unwrapped.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Split a result object into its scalar fields and its `periods` rows,
/// which schedules carry.
pub(crate) fn split_periods(result: &Map<String, Value>) -> (Vec<(&str, &Value)>, Option<&Vec<Value>>) {
    let scalars = result
        .iter()
        .filter(|(k, _)| k.as_str() != "periods")
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    let periods = result.get("periods").and_then(Value::as_array);
    (scalars, periods)
}

/// Schedule columns in ledger order.
const PERIOD_COLUMNS: [&str; 6] = [
    "period",
    "opening_balance",
    "payment",
    "interest",
    "amortization",
    "closing_balance",
];

/// Column headers for a set of period rows: known columns first in ledger
/// order, then anything else the first row carries.
pub(crate) fn period_headers(first: &Map<String, Value>) -> Vec<&str> {
    let known = PERIOD_COLUMNS.iter().copied().filter(|c| first.contains_key(*c));
    let extra = first
        .keys()
        .map(String::as_str)
        .filter(|k| !PERIOD_COLUMNS.contains(k));
    known.chain(extra).collect()
}

/// Render a JSON scalar for text output. Decimals arrive as strings.
pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
