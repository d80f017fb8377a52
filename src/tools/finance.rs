//! Compound interest and loan amortization

use crate::tools::input::round2;
use serde::{Deserialize, Serialize};

const MAX_YEARS: f64 = 100.0;

/// How often interest is added to the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compounding {
    Annually,
    Semiannually,
    Quarterly,
    Monthly,
    Daily,
    Continuously,
}

impl Compounding {
    /// Periods per year; `None` for continuous compounding
    pub fn periods_per_year(self) -> Option<f64> {
        match self {
            Compounding::Annually => Some(1.0),
            Compounding::Semiannually => Some(2.0),
            Compounding::Quarterly => Some(4.0),
            Compounding::Monthly => Some(12.0),
            Compounding::Daily => Some(365.0),
            Compounding::Continuously => None,
        }
    }

    fn amount(self, principal: f64, rate: f64, years: f64) -> f64 {
        match self.periods_per_year() {
            Some(n) => principal * (1.0 + rate / n).powf(n * years),
            None => principal * (rate * years).exp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBalance {
    pub year: u32,
    pub balance: f64,
    pub interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundResult {
    pub final_amount: f64,
    pub interest: f64,
    /// Balance at the end of each year (the last entry may be partial)
    pub breakdown: Vec<YearBalance>,
}

/// `A = P(1 + r/n)^(nt)`, or `P·e^(rt)` when compounding continuously.
///
/// `rate_percent` is the annual rate in percent.
pub fn compound_interest(
    principal: f64,
    rate_percent: f64,
    years: f64,
    compounding: Compounding,
) -> Option<CompoundResult> {
    if !(principal > 0.0 && rate_percent >= 0.0 && years > 0.0 && years <= MAX_YEARS)
        || !rate_percent.is_finite()
        || !principal.is_finite()
    {
        return None;
    }

    let rate = rate_percent / 100.0;
    let final_amount = compounding.amount(principal, rate, years);
    if !final_amount.is_finite() {
        return None;
    }

    let whole_years = years.ceil() as u32;
    let breakdown = (1..=whole_years)
        .map(|year| {
            let balance = compounding.amount(principal, rate, f64::from(year).min(years));
            YearBalance {
                year,
                balance: round2(balance),
                interest: round2(balance - principal),
            }
        })
        .collect();

    Some(CompoundResult {
        final_amount: round2(final_amount),
        interest: round2(final_amount - principal),
        breakdown,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<AmortizationRow>,
}

/// Fixed monthly payment `M = P·[i(1+i)^n]/[(1+i)^n − 1]` with `i` the
/// monthly rate and `n` the number of months.
pub fn loan(principal: f64, annual_rate_percent: f64, years: f64) -> Option<LoanResult> {
    if !(principal > 0.0 && annual_rate_percent >= 0.0 && years > 0.0 && years <= MAX_YEARS)
        || !principal.is_finite()
        || !annual_rate_percent.is_finite()
    {
        return None;
    }

    let months = (years * 12.0).round() as u32;
    if months == 0 {
        return None;
    }
    let n = f64::from(months);
    let i = annual_rate_percent / 100.0 / 12.0;

    let payment = if i == 0.0 {
        principal / n
    } else {
        let growth = (1.0 + i).powf(n);
        principal * (i * growth) / (growth - 1.0)
    };
    if !payment.is_finite() || !(payment * n).is_finite() {
        return None;
    }

    let mut balance = principal;
    let schedule = (1..=months)
        .map(|month| {
            let interest = balance * i;
            let principal_part = payment - interest;
            balance -= principal_part;
            if balance.abs() < 1e-6 {
                balance = 0.0;
            }
            AmortizationRow {
                month,
                payment: round2(payment),
                principal: round2(principal_part),
                interest: round2(interest),
                balance: round2(balance),
            }
        })
        .collect();

    let total_payment = payment * n;
    Some(LoanResult {
        monthly_payment: round2(payment),
        total_payment: round2(total_payment),
        total_interest: round2(total_payment - principal),
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_compounding_one_year() {
        let result = compound_interest(1000.0, 10.0, 1.0, Compounding::Annually).unwrap();
        assert_eq!(result.final_amount, 1100.00);
        assert_eq!(result.interest, 100.00);
        assert_eq!(result.breakdown.len(), 1);
    }

    #[test]
    fn test_monthly_compounding() {
        // 1000 * (1 + 0.05/12)^(120)
        let result = compound_interest(1000.0, 5.0, 10.0, Compounding::Monthly).unwrap();
        assert_eq!(result.final_amount, 1647.01);
        assert_eq!(result.breakdown.len(), 10);
        assert_eq!(result.breakdown.last().unwrap().balance, result.final_amount);
    }

    #[test]
    fn test_continuous_compounding() {
        let result = compound_interest(1000.0, 10.0, 1.0, Compounding::Continuously).unwrap();
        assert_eq!(result.final_amount, 1105.17);
    }

    #[test]
    fn test_partial_year_breakdown() {
        let result = compound_interest(1000.0, 10.0, 1.5, Compounding::Annually).unwrap();
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].balance, 1100.0);
        assert_eq!(result.breakdown[1].balance, result.final_amount);
    }

    #[test]
    fn test_compound_invalid_input() {
        assert!(compound_interest(0.0, 10.0, 1.0, Compounding::Annually).is_none());
        assert!(compound_interest(1000.0, -1.0, 1.0, Compounding::Annually).is_none());
        assert!(compound_interest(1000.0, 10.0, 0.0, Compounding::Annually).is_none());
        assert!(compound_interest(1000.0, 10.0, 500.0, Compounding::Annually).is_none());
    }

    #[test]
    fn test_compound_overflow_is_withheld() {
        assert!(compound_interest(1000.0, 1_000_000.0, 100.0, Compounding::Annually).is_none());
        assert!(compound_interest(1000.0, 1_000_000.0, 100.0, Compounding::Continuously).is_none());
        assert!(compound_interest(f64::MAX, 10.0, 100.0, Compounding::Daily).is_none());
    }

    #[test]
    fn test_thirty_year_mortgage() {
        let result = loan(100_000.0, 6.0, 30.0).unwrap();
        assert_eq!(result.monthly_payment, 599.55);
        assert_eq!(result.schedule.len(), 360);
        assert_eq!(result.total_payment, 215_838.19);
        assert_eq!(result.total_interest, 115_838.19);
        assert_eq!(result.schedule[0].interest, 500.0);
        assert_eq!(result.schedule.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_zero_rate_loan() {
        let result = loan(12_000.0, 0.0, 1.0).unwrap();
        assert_eq!(result.monthly_payment, 1000.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_loan_invalid_input() {
        assert!(loan(-5.0, 6.0, 30.0).is_none());
        assert!(loan(100_000.0, 6.0, 0.0).is_none());
        assert!(loan(100_000.0, 6.0, 0.01).is_none());
        assert!(loan(f64::INFINITY, 6.0, 30.0).is_none());
    }

    #[test]
    fn test_loan_overflow_is_withheld() {
        assert!(loan(1000.0, 1e9, 30.0).is_none());
        assert!(loan(f64::MAX, 6.0, 30.0).is_none());
    }
}
