use serde::{Deserialize, Serialize};

/// Fixed instalment and the sum paid over the full term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repayment {
    pub monthly_payment: f64,
    pub total_payment: f64,
}

impl Repayment {
    pub fn total_interest(&self, principal: f64) -> f64 {
        self.total_payment - principal
    }
}

/// Level monthly instalment for a fixed-rate loan.
///
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate and `n` the
/// number of instalments. A zero rate spreads the principal evenly. Nothing is
/// rounded, and a zero tenure is not guarded: the result is then non-finite.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> f64 {
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let payments = f64::from(tenure_years) * 12.0;

    if monthly_rate == 0.0 {
        return principal / payments;
    }

    let growth = (1.0 + monthly_rate).powf(payments);
    principal * monthly_rate * growth / (growth - 1.0)
}

pub fn amortize(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> Repayment {
    let monthly_payment = monthly_payment(principal, annual_rate_percent, tenure_years);
    Repayment {
        monthly_payment,
        total_payment: monthly_payment * f64::from(tenure_years) * 12.0,
    }
}
