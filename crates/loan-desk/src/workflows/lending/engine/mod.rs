//! Deterministic decision pipeline: age, eligibility, pricing tables, and amortization.

pub mod age;
pub mod amortization;
pub mod eligibility;
pub mod quotes;
pub mod schedule;

pub use age::age_on;
pub use amortization::{amortize, monthly_payment, Repayment};
pub use eligibility::{check_eligibility, EligibilityVerdict, IneligibilityReason};
pub use quotes::{generate_quote, generate_quotes, LoanQuote};
pub use schedule::{interest_rate, max_loan_amount, tenure_years, RateSchedule};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Applicant, ApplicantDetails, LoanType};

/// Everything decided for one applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResult {
    pub user_details: ApplicantDetails,
    pub eligibility: EligibilityVerdict,
    pub quotes: Vec<LoanQuote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ineligibility_reason: Option<IneligibilityReason>,
}

impl ApplicationResult {
    pub fn is_eligible(&self) -> bool {
        self.eligibility.is_eligible
    }

    pub fn quote_for(&self, loan_type: LoanType) -> Option<&LoanQuote> {
        self.quotes.iter().find(|quote| quote.loan_type == loan_type)
    }
}

/// Run the whole pipeline for `applicant` as of `today`.
pub fn evaluate_application(applicant: &Applicant, today: NaiveDate) -> ApplicationResult {
    let age = age_on(applicant.date_of_birth, today);
    let full_name = applicant.full_name();

    let eligibility = check_eligibility(
        age,
        applicant.employment_type,
        applicant.annual_income,
        &full_name,
    );

    let (quotes, ineligibility_reason) = if eligibility.is_eligible {
        let quotes = generate_quotes(
            &eligibility.eligible_loan_types,
            age,
            applicant.annual_income,
            &full_name,
        );
        (quotes, None)
    } else {
        (Vec::new(), eligibility.ineligibility_reason)
    };

    ApplicationResult {
        user_details: ApplicantDetails::from_applicant(applicant, age),
        eligibility,
        quotes,
        ineligibility_reason,
    }
}
