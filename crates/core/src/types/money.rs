//! Monetary amounts using decimal arithmetic.
//!
//! The backend sends amounts as JSON numbers in the store currency's
//! standard unit (dollars, not cents). The store currency itself lives in
//! the settings resource, so amounts travel without a currency and are
//! paired with one only for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency code, as stored in the settings resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code, normalized to uppercase.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_uppercase())
    }

    /// The three-letter code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol for well-known currencies; falls back to the code.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "USD" | "CAD" | "AUD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "INR" => "₹",
            "JPY" => "¥",
            other => other,
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".to_owned())
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decimal amount paired with a currency for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// Currency the amount is expressed in.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = self.currency.symbol();
        let amount = self.amount.round_dp(2);
        if symbol == self.currency.as_str() {
            write!(f, "{amount:.2} {symbol}")
        } else {
            write!(f, "{symbol}{amount:.2}")
        }
    }
}
