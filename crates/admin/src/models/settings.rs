//! Store-wide settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shopdesk_core::CurrencyCode;

/// Singleton settings bag.
///
/// `currency` is the only field every store has; the rest (logo, banner and
/// other image URLs) vary per deployment and are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub currency: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Settings {
    /// Store currency as a typed code (USD when unset).
    #[must_use]
    pub fn currency_code(&self) -> CurrencyCode {
        if self.currency.trim().is_empty() {
            CurrencyCode::default()
        } else {
            CurrencyCode::new(&self.currency)
        }
    }

    /// String-valued settings whose key names an image or URL field.
    pub fn image_urls(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extra.iter().filter_map(|(key, value)| {
            let lower = key.to_ascii_lowercase();
            let looks_like_image =
                lower.ends_with("url") || lower.contains("image") || lower.contains("logo");
            match value {
                serde_json::Value::String(url) if looks_like_image => {
                    Some((key.as_str(), url.as_str()))
                }
                _ => None,
            }
        })
    }

    /// Set a string field, routing `currency` to its dedicated slot.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if key == "currency" {
            self.currency = value;
        } else {
            self.extra
                .insert(key.to_string(), serde_json::Value::String(value));
        }
    }
}
