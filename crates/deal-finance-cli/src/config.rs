use std::env;

use deal_finance_core::Locale;

pub const LOG_LEVEL_VAR: &str = "DEAL_LOG_LEVEL";
pub const LOCALE_VAR: &str = "DEAL_LOCALE";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Host settings read from the environment (and an optional `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Fallback tracing filter when neither `RUST_LOG` nor `--log-level` is set
    pub log_level: String,
    /// Locale used by commands invoked without `--locale`
    pub default_locale: Locale,
}

impl CliConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup(LOG_LEVEL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let default_locale = lookup(LOCALE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(Locale::from)
            .unwrap_or_default();

        Self {
            log_level,
            default_locale,
        }
    }

    /// Locale from a command flag, or the configured default.
    pub fn locale_or_default(&self, flag: Option<&str>) -> Locale {
        flag.map(Locale::from)
            .unwrap_or_else(|| self.default_locale.clone())
    }
}
