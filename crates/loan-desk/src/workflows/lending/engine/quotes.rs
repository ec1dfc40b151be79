use serde::{Deserialize, Serialize};

use super::super::domain::LoanType;
use super::amortization::amortize;
use super::schedule::{max_loan_amount, resolve};

/// Priced offer for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub full_name: String,
    pub age: i32,
    pub loan_type: LoanType,
    pub eligible_amount: f64,
    pub tenure_years: u32,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub total_payment: f64,
}

pub fn generate_quote(
    loan_type: LoanType,
    age: i32,
    annual_income: f64,
    full_name: &str,
) -> LoanQuote {
    let eligible_amount = max_loan_amount(loan_type, annual_income);
    let schedule = resolve(loan_type, age);
    let repayment = amortize(eligible_amount, schedule.interest_rate, schedule.tenure_years);

    LoanQuote {
        full_name: full_name.to_string(),
        age,
        loan_type,
        eligible_amount,
        tenure_years: schedule.tenure_years,
        interest_rate: schedule.interest_rate,
        monthly_payment: repayment.monthly_payment,
        total_payment: repayment.total_payment,
    }
}

/// One quote per product, in the order the products were granted.
pub fn generate_quotes(
    loan_types: &[LoanType],
    age: i32,
    annual_income: f64,
    full_name: &str,
) -> Vec<LoanQuote> {
    loan_types
        .iter()
        .map(|loan_type| generate_quote(*loan_type, age, annual_income, full_name))
        .collect()
}
