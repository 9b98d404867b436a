//! Locale tags and the per-locale default tables consumed by input forms.
//!
//! The tables are immutable constants keyed by locale variant. Any tag without a row
//! of its own resolves to the en-US row, which doubles as the universal
//! fallback for tax policy as well.

use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Locale of the evaluation. Selects tax policy and default financing terms.
///
/// Unknown tags are preserved verbatim in `Other` so results echo back what
/// the caller sent, but they behave exactly like en-US.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locale {
    PtBr,
    #[default]
    EnUs,
    Other(String),
}

impl Locale {
    pub fn as_str(&self) -> &str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
            Locale::Other(tag) => tag,
        }
    }

    /// Whether this locale has a dedicated row in the defaults table.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Locale::Other(_))
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "pt-br" => Locale::PtBr,
            "en-us" => Locale::EnUs,
            _ => Locale::Other(tag.trim().to_string()),
        }
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Locale::from(tag.as_str())
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.as_str().to_string()
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Locale::from(s))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default financing terms offered by the input forms for one locale.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleDefaults {
    /// BCP-47 tag of the row
    pub tag: &'static str,
    /// Nominal annual interest rate pre-filled in forms, as a percentage
    pub default_interest_rate: Percent,
    /// Selectable loan terms in years, ascending
    pub loan_term_options: &'static [u32],
    /// Whether capital-gains tax is modelled for this locale
    pub models_capital_gains: bool,
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

const PT_BR: LocaleDefaults = LocaleDefaults {
    tag: "pt-BR",
    default_interest_rate: dec!(11.5),
    loan_term_options: &[5, 10, 15, 20, 25, 30],
    models_capital_gains: true,
};

const EN_US: LocaleDefaults = LocaleDefaults {
    tag: "en-US",
    default_interest_rate: dec!(7.5),
    loan_term_options: &[10, 15, 20, 25, 30],
    models_capital_gains: false,
};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Full defaults row for `locale`, falling back to en-US.
///
/// Keyed on the variant, the same key tax policy dispatches on.
pub fn locale_defaults(locale: &Locale) -> &'static LocaleDefaults {
    match locale {
        Locale::PtBr => &PT_BR,
        Locale::EnUs | Locale::Other(_) => &EN_US,
    }
}

/// Default nominal annual interest rate (percent) for `locale`.
pub fn get_default_interest_rate(locale: &Locale) -> Percent {
    locale_defaults(locale).default_interest_rate
}

/// Loan-term choices in years for `locale`, in ascending order.
pub fn get_loan_term_options(locale: &Locale) -> &'static [u32] {
    locale_defaults(locale).loan_term_options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags_case_insensitively() {
        assert_eq!(Locale::from("pt-BR"), Locale::PtBr);
        assert_eq!(Locale::from("pt_br"), Locale::PtBr);
        assert_eq!(Locale::from(" EN-us "), Locale::EnUs);
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let locale = Locale::from("de-DE");
        assert_eq!(locale, Locale::Other("de-DE".into()));
        assert_eq!(locale.to_string(), "de-DE");
        assert!(!locale.is_recognized());
    }

    #[test]
    fn test_default_rates() {
        assert_eq!(get_default_interest_rate(&Locale::PtBr), dec!(11.5));
        assert_eq!(get_default_interest_rate(&Locale::EnUs), dec!(7.5));
    }

    #[test]
    fn test_loan_term_options() {
        assert_eq!(get_loan_term_options(&Locale::PtBr), &[5, 10, 15, 20, 25, 30]);
        assert_eq!(get_loan_term_options(&Locale::EnUs), &[10, 15, 20, 25, 30]);
    }

    #[test]
    fn test_unknown_locale_falls_back_to_en_us() {
        let locale = Locale::from("fr-FR");
        assert_eq!(get_default_interest_rate(&locale), dec!(7.5));
        assert_eq!(get_loan_term_options(&locale), &[10, 15, 20, 25, 30]);
        assert_eq!(locale_defaults(&locale).tag, "en-US");
    }

    #[test]
    fn test_hand_built_other_never_gets_a_known_row() {
        let locale = Locale::Other("pt-BR".into());
        let row = locale_defaults(&locale);
        assert_eq!(row.tag, "en-US");
        assert!(!row.models_capital_gains);
    }

    #[test]
    fn test_locale_serde_uses_tags() {
        let json = serde_json::to_string(&Locale::PtBr).unwrap();
        assert_eq!(json, "\"pt-BR\"");
        let parsed: Locale = serde_json::from_str("\"es-AR\"").unwrap();
        assert_eq!(parsed, Locale::Other("es-AR".into()));
    }
}
