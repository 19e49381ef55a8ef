use std::env;

use bloomsense_core::keys;

/// Service settings, read from the environment at cold start.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bucket holding assessments and the question bank.
    pub bucket: String,
    /// Object key of the question bank JSON.
    pub question_bank_key: String,
    /// Instrument used for scoring and as the question fallback.
    pub instrument_id: String,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            bucket: get("BLOOMSENSE_BUCKET", "bloomsense"),
            question_bank_key: get("BLOOMSENSE_QUESTION_BANK_KEY", keys::QUESTION_BANK),
            instrument_id: get("BLOOMSENSE_INSTRUMENT", "mchat_rf"),
        }
    }
}
