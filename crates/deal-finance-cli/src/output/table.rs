use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, period_headers, split_periods};

/// Format output as tables using the tabled crate: a field/value table for
/// the result, a row table for schedule periods, then warnings and
/// methodology from the envelope.
pub fn print_table(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let Value::Object(envelope) = value else {
        println!("{}", format_scalar(value));
        return Ok(());
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => print_result(result),
        _ => print_fields(envelope.iter().map(|(k, v)| (k.as_str(), v))),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
    Ok(())
}

fn print_result(result: &Map<String, Value>) {
    let (scalars, periods) = split_periods(result);
    print_fields(scalars.into_iter());
    if let Some(rows) = periods {
        println!();
        print_rows(rows);
    }
}

fn print_fields<'a>(fields: impl Iterator<Item = (&'a str, &'a Value)>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.to_string(), format_scalar(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(no periods)");
        return;
    };

    let headers = period_headers(first);
    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(*h).map(format_scalar).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
