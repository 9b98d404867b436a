use clap::Args;
use serde_json::{json, Value};

use deal_finance_core::locale::locale_defaults;

use crate::config::CliConfig;

/// Arguments for the locale defaults lookup
#[derive(Args)]
pub struct DefaultsArgs {
    /// Locale to look up (falls back to en-US when unknown)
    #[arg(long)]
    pub locale: Option<String>,
}

pub fn run_defaults(args: DefaultsArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let locale = config.locale_or_default(args.locale.as_deref());
    let defaults = locale_defaults(&locale);

    let mut warnings = Vec::new();
    if !locale.is_recognized() {
        warnings.push(format!("Unknown locale {locale}; using {} defaults", defaults.tag));
    }

    Ok(json!({
        "result": defaults,
        "requested_locale": locale,
        "warnings": warnings,
    }))
}
