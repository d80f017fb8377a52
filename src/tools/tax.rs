//! Corporate income and withholding tax
//!
//! Rates are jurisdiction rules that change, so they come from
//! configuration rather than constants.

use crate::core::TaxConfig;
use crate::tools::input::{round2, valid_rate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorporateTax {
    pub profit: f64,
    pub rate_percent: f64,
    pub tax: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithholdingTax {
    pub amount: f64,
    pub payment_type: String,
    pub rate_percent: f64,
    pub tax: f64,
    pub net_amount: f64,
}

pub struct TaxCalculator<'a> {
    config: &'a TaxConfig,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(config: &'a TaxConfig) -> Self {
        Self { config }
    }

    /// Payment types with a configured withholding rate
    pub fn payment_types(&self) -> Vec<&str> {
        self.config.withholding_rates.keys().map(String::as_str).collect()
    }

    /// Flat corporate income tax on a positive profit
    pub fn corporate(&self, profit: f64) -> Option<CorporateTax> {
        if !(profit.is_finite() && profit > 0.0) {
            return None;
        }
        let rate_percent = valid_rate(self.config.corporate_rate)?;
        let tax = profit * rate_percent / 100.0;

        Some(CorporateTax {
            profit,
            rate_percent,
            tax: round2(tax),
            net_profit: round2(profit - tax),
        })
    }

    /// Tax withheld from a payment to a non-resident
    pub fn withholding(&self, amount: f64, payment_type: &str) -> Option<WithholdingTax> {
        if !(amount.is_finite() && amount > 0.0) {
            return None;
        }
        let rate_percent = valid_rate(*self.config.withholding_rates.get(payment_type)?)?;
        let tax = amount * rate_percent / 100.0;

        Some(WithholdingTax {
            amount,
            payment_type: payment_type.to_string(),
            rate_percent,
            tax: round2(tax),
            net_amount: round2(amount - tax),
        })
    }
}
