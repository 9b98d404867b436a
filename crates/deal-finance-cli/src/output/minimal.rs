use serde_json::Value;

use super::{format_scalar, result_of};

/// Headline figure per command, in priority order.
const HEADLINE_KEYS: [&str; 6] = [
    "estimated_roi",
    "interest_savings",
    "capital_gains_tax",
    "total_interest",
    "default_interest_rate",
    "monthly_payment",
];

/// Print just the headline figure of the output, falling back to the first
/// field of the result object.
pub fn print_minimal(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", headline(result_of(value)));
    Ok(())
}

fn headline(result: &Value) -> String {
    let Value::Object(map) = result else {
        return format_scalar(result);
    };

    HEADLINE_KEYS
        .iter()
        .find_map(|key| map.get(*key).filter(|v| !v.is_null()).map(format_scalar))
        .or_else(|| {
            map.iter()
                .next()
                .map(|(key, val)| format!("{}: {}", key, format_scalar(val)))
        })
        .unwrap_or_default()
}
