use std::collections::HashMap;

use crate::errors::CoreError;

/// Converts ledger values into the display currency.
///
/// Purchases are recorded in the ledger's base currency. To show them in
/// another currency we scale by the ratio of the BTC price quoted in both:
/// `ratio = btc_price[target] / btc_price[base]`.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Trim and upper-case a currency code, requiring exactly 3 ASCII letters.
    pub fn normalize_code(&self, code: &str) -> Result<String, CoreError> {
        let trimmed = code.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{code}': must be exactly 3 ASCII letters (e.g., AUD, USD, EUR)"
            )));
        }
        Ok(trimmed)
    }

    /// Scale factor from base-currency values to target-currency values.
    /// Falls back to 1.0 when either price is unusable.
    pub fn price_ratio(&self, base_price: f64, target_price: f64) -> f64 {
        if base_price.is_finite() && base_price > 0.0 && target_price.is_finite() && target_price > 0.0 {
            target_price / base_price
        } else {
            1.0
        }
    }

    /// Ratio between two currencies given BTC quotes keyed by currency code.
    /// Missing quotes give 1.0.
    pub fn ratio_from_quotes(&self, quotes: &HashMap<String, f64>, base: &str, target: &str) -> f64 {
        let base = base.to_uppercase();
        let target = target.to_uppercase();
        if base == target {
            return 1.0;
        }
        match (quotes.get(&base), quotes.get(&target)) {
            (Some(&b), Some(&t)) => self.price_ratio(b, t),
            _ => 1.0,
        }
    }

    pub fn convert(&self, value: f64, ratio: f64) -> f64 {
        value * ratio
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
