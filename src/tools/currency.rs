//! Currency conversion through a USD base

use crate::core::CurrencyConfig;
use serde::Serialize;
use std::collections::BTreeMap;

/// Exchange rates, each expressed as units per 1 USD
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    rates: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
    /// Units of `to` per unit of `from`
    pub rate: f64,
}

impl CurrencyTable {
    /// Build from configuration, dropping unusable rates
    pub fn new(config: &CurrencyConfig) -> Self {
        let rates = config
            .rates
            .iter()
            .filter(|(code, rate)| {
                let usable = rate.is_finite() && **rate > 0.0;
                if !usable {
                    log::warn!("Ignoring invalid exchange rate for {}: {}", code, rate);
                }
                usable
            })
            .map(|(code, rate)| (code.to_ascii_uppercase(), *rate))
            .collect();
        Self { rates }
    }

    /// Supported currency codes, sorted
    pub fn codes(&self) -> Vec<&str> {
        self.rates.keys().map(String::as_str).collect()
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.trim().to_ascii_uppercase()).copied()
    }

    /// `amount / rate_from * rate_to`
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<Conversion> {
        if !(amount.is_finite() && amount > 0.0) {
            return None;
        }
        let rate_from = self.rate(from)?;
        let rate_to = self.rate(to)?;

        Some(Conversion {
            amount,
            from: from.trim().to_ascii_uppercase(),
            to: to.trim().to_ascii_uppercase(),
            result: amount / rate_from * rate_to,
            rate: rate_to / rate_from,
        })
    }
}
