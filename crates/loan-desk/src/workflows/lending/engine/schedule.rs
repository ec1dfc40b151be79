//! Fixed pricing tables: share of income lent, repayment tenure, and annual rate.
//!
//! Brackets outside the tables resolve to `0` rather than an error; the
//! eligibility rules keep those combinations from being quoted in practice.
//! The youngest bracket is open-ended, so a negative age prices like a minor.

use serde::{Deserialize, Serialize};

use super::super::domain::LoanType;

/// Share of annual income offered as principal for each product.
pub const fn income_multiplier(loan_type: LoanType) -> f64 {
    match loan_type {
        LoanType::Personal => 0.20,
        LoanType::Automobile => 0.40,
        LoanType::Housing | LoanType::Property => 0.50,
    }
}

pub fn max_loan_amount(loan_type: LoanType, annual_income: f64) -> f64 {
    annual_income * income_multiplier(loan_type)
}

/// Repayment term in years. Depends on age only.
pub const fn tenure_years(age: i32) -> u32 {
    match age {
        i32::MIN..=39 => 20,
        40..=49 => 15,
        50..=60 => 10,
        _ => 0,
    }
}

/// Annual interest rate in percent for a product at a given age.
pub const fn interest_rate(loan_type: LoanType, age: i32) -> f64 {
    match loan_type {
        LoanType::Housing | LoanType::Property => match age {
            24..=39 => 8.0,
            40..=49 => 8.5,
            50..=60 => 9.0,
            _ => 0.0,
        },
        LoanType::Automobile => match age {
            i32::MIN..=39 => 7.0,
            40..=49 => 8.0,
            50..=60 => 9.5,
            _ => 0.0,
        },
        LoanType::Personal => match age {
            24..=50 => 6.5,
            _ => 0.0,
        },
    }
}

/// Rate and term resolved together for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSchedule {
    pub interest_rate: f64,
    pub tenure_years: u32,
}

pub const fn resolve(loan_type: LoanType, age: i32) -> RateSchedule {
    RateSchedule {
        interest_rate: interest_rate(loan_type, age),
        tenure_years: tenure_years(age),
    }
}
