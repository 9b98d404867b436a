use serde_json::Value;
use std::io::{self, Write};

use super::{format_scalar, period_headers, result_of, split_periods};

/// Write output as CSV to stdout.
///
/// Schedules are written one row per period; any other result is written
/// as two-column `field,value` records.
pub fn print_csv(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    write_csv(stdout.lock(), value)
}

fn write_csv<W: Write>(out: W, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(out);

    match result_of(value) {
        Value::Object(result) => match split_periods(result) {
            (_, Some(rows)) => write_rows(&mut wtr, rows)?,
            (scalars, None) => {
                wtr.write_record(["field", "value"])?;
                for (key, val) in scalars {
                    wtr.write_record([key.to_string(), format_scalar(val)])?;
                }
            }
        },
        Value::Array(rows) => write_rows(&mut wtr, rows)?,
        other => wtr.write_record([format_scalar(other)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> Result<(), Box<dyn std::error::Error>> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };
    let headers = period_headers(first);
    wtr.write_record(&headers)?;

    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(format_scalar).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}
