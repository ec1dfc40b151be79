use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::{EmploymentType, LoanType};

/// Youngest age at which every product is offered.
pub const FULL_PRODUCT_MIN_AGE: i32 = 24;
/// Oldest age still offered credit.
pub const MAX_ELIGIBLE_AGE: i32 = 60;

/// Why an applicant receives no quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IneligibilityReason {
    NoIncome,
    AgeOverLimit,
}

impl IneligibilityReason {
    pub const fn summary(self) -> &'static str {
        match self {
            IneligibilityReason::NoIncome => "No income or unemployed - not eligible for any loan",
            IneligibilityReason::AgeOverLimit => "Age over 60 - not eligible for any loan",
        }
    }
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.summary())
    }
}

impl From<IneligibilityReason> for String {
    fn from(value: IneligibilityReason) -> Self {
        value.summary().to_string()
    }
}

impl TryFrom<String> for IneligibilityReason {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        [IneligibilityReason::NoIncome, IneligibilityReason::AgeOverLimit]
            .into_iter()
            .find(|reason| reason.summary() == value)
            .ok_or_else(|| format!("unknown ineligibility reason '{value}'"))
    }
}

/// Outcome of the eligibility rules for one applicant.
///
/// `is_eligible`, a non-empty `eligible_loan_types` and an absent
/// `ineligibility_reason` always agree; use the constructors to keep it so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityVerdict {
    pub is_eligible: bool,
    pub eligible_loan_types: Vec<LoanType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ineligibility_reason: Option<IneligibilityReason>,
    pub age: i32,
    pub full_name: String,
}

impl EligibilityVerdict {
    fn eligible(loan_types: Vec<LoanType>, age: i32, full_name: &str) -> Self {
        Self {
            is_eligible: true,
            eligible_loan_types: loan_types,
            ineligibility_reason: None,
            age,
            full_name: full_name.to_string(),
        }
    }

    fn ineligible(reason: IneligibilityReason, age: i32, full_name: &str) -> Self {
        Self {
            is_eligible: false,
            eligible_loan_types: Vec::new(),
            ineligibility_reason: Some(reason),
            age,
            full_name: full_name.to_string(),
        }
    }
}

/// Apply the eligibility rules in order; the first matching rule decides.
pub fn check_eligibility(
    age: i32,
    employment_type: EmploymentType,
    annual_income: f64,
    full_name: &str,
) -> EligibilityVerdict {
    if employment_type == EmploymentType::Unemployed
        || annual_income.is_nan()
        || annual_income <= 0.0
    {
        return EligibilityVerdict::ineligible(IneligibilityReason::NoIncome, age, full_name);
    }

    match age {
        a if a < FULL_PRODUCT_MIN_AGE => {
            EligibilityVerdict::eligible(vec![LoanType::Automobile], age, full_name)
        }
        FULL_PRODUCT_MIN_AGE..=MAX_ELIGIBLE_AGE => {
            EligibilityVerdict::eligible(LoanType::ALL.to_vec(), age, full_name)
        }
        _ => EligibilityVerdict::ineligible(IneligibilityReason::AgeOverLimit, age, full_name),
    }
}
