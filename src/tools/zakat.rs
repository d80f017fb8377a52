//! Zakat on accumulated wealth

use crate::core::ZakatConfig;
use crate::tools::input::{round2, valid_rate};
use serde::{Deserialize, Serialize};

/// Zakatable holdings, all in the same currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZakatAssets {
    pub cash: f64,
    pub gold: f64,
    pub silver: f64,
    pub investments: f64,
    pub trade_goods: f64,
    pub receivables: f64,
}

impl ZakatAssets {
    fn values(&self) -> [f64; 6] {
        [self.cash, self.gold, self.silver, self.investments, self.trade_goods, self.receivables]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZakatResult {
    pub total_assets: f64,
    pub liabilities: f64,
    pub net_wealth: f64,
    pub nisab: f64,
    pub eligible: bool,
    pub zakat_due: f64,
}

/// Net wealth at or above the nisab owes the configured rate
pub fn calculate(config: &ZakatConfig, assets: &ZakatAssets, liabilities: f64) -> Option<ZakatResult> {
    let values = assets.values();
    if values.iter().chain([&liabilities]).any(|v| !v.is_finite() || *v < 0.0) {
        return None;
    }
    let total_assets: f64 = values.iter().sum();
    if total_assets <= 0.0 {
        return None;
    }

    let rate = valid_rate(config.rate)?;
    let nisab = config.nisab_gold_grams * config.gold_price_per_gram;
    if !nisab.is_finite() || nisab < 0.0 {
        return None;
    }
    let net_wealth = (total_assets - liabilities).max(0.0);
    let eligible = net_wealth > 0.0 && net_wealth >= nisab;
    let zakat_due = if eligible { net_wealth * rate / 100.0 } else { 0.0 };

    Some(ZakatResult {
        total_assets: round2(total_assets),
        liabilities: round2(liabilities),
        net_wealth: round2(net_wealth),
        nisab: round2(nisab),
        eligible,
        zakat_due: round2(zakat_due),
    })
}
