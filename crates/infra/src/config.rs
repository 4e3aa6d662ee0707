//! Configuration loading and representation.

use fairsplit_expenses::DEFAULT_CURRENCY;
use fairsplit_observability::LogFormat;

use crate::error::{InfraError, InfraResult};

/// Default currency tag for records that do not carry one.
pub const CURRENCY_VAR: &str = "FAIRSPLIT_CURRENCY";
/// `pretty` or `json`.
pub const LOG_FORMAT_VAR: &str = "FAIRSPLIT_LOG_FORMAT";

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub default_currency: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> InfraResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> InfraResult<Self> {
        let mut config = Self::default();

        if let Some(currency) = lookup(CURRENCY_VAR) {
            config.default_currency = parse_currency(&currency)?;
        }
        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            config.log_format = format
                .parse()
                .map_err(|e| InfraError::InvalidConfig(format!("{LOG_FORMAT_VAR}: {e}")))?;
        }

        Ok(config)
    }
}

fn parse_currency(raw: &str) -> InfraResult<String> {
    let code = raw.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(InfraError::InvalidConfig(format!(
            "{CURRENCY_VAR}: `{raw}` is not a currency code"
        )));
    }
    Ok(code.to_ascii_uppercase())
}
