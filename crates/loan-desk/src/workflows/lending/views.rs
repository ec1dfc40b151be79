//! Read models served to the admin dashboard, partner exports, and the webhook.
//!
//! Each application splits into two tables: applicant details and collateral
//! (eligibility plus quotes). Optional applicant fields are always present,
//! serialized as `null` when missing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{ApplicationId, EmploymentType, Gender, LoanType, MaritalStatus};
use super::engine::{IneligibilityReason, LoanQuote};
use super::repository::ApplicationRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EligibilityStatus {
    #[serde(rename = "ELIGIBLE")]
    Eligible,
    #[serde(rename = "NOT ELIGIBLE")]
    NotEligible,
}

impl EligibilityStatus {
    pub const fn for_result(is_eligible: bool) -> Self {
        if is_eligible {
            EligibilityStatus::Eligible
        } else {
            EligibilityStatus::NotEligible
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "ELIGIBLE",
            EligibilityStatus::NotEligible => "NOT ELIGIBLE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetailsView {
    pub full_name: String,
    pub age: i32,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub phone_number: String,
    pub email: String,
    pub employment_type: EmploymentType,
    pub annual_income: f64,
    pub requested_loan_type: Option<LoanType>,
    pub expected_loan_amount: Option<f64>,
    pub preferred_tenure: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRow {
    pub loan_type: LoanType,
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub interest_rate: f64,
    pub tenure_years: u32,
}

impl From<&LoanQuote> for QuoteRow {
    fn from(quote: &LoanQuote) -> Self {
        Self {
            loan_type: quote.loan_type,
            loan_amount: quote.eligible_amount,
            monthly_payment: quote.monthly_payment,
            interest_rate: quote.interest_rate,
            tenure_years: quote.tenure_years,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralView {
    pub eligibility_status: EligibilityStatus,
    pub ineligibility_reason: Option<IneligibilityReason>,
    pub eligible_loan_types: Vec<LoanType>,
    pub loan_quotes: Vec<QuoteRow>,
}

/// Both tables for one application. Also the webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationNotice {
    pub application_id: ApplicationId,
    pub submitted_at: DateTime<Utc>,
    pub applicant_details: ApplicantDetailsView,
    pub collateral: CollateralView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantTableRow {
    pub application_id: ApplicationId,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: ApplicantDetailsView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralTableRow {
    pub application_id: ApplicationId,
    pub submitted_at: DateTime<Utc>,
    pub applicant_name: String,
    #[serde(flatten)]
    pub collateral: CollateralView,
}

impl ApplicationRecord {
    pub fn applicant_details_view(&self) -> ApplicantDetailsView {
        let details = &self.result.user_details;
        ApplicantDetailsView {
            full_name: details.full_name.clone(),
            age: details.age,
            date_of_birth: details.date_of_birth,
            gender: details.gender,
            marital_status: details.marital_status,
            phone_number: details.phone_number.clone(),
            email: details.email.clone(),
            employment_type: details.employment_type,
            annual_income: details.annual_income,
            requested_loan_type: details.requested_loan_type,
            expected_loan_amount: details.expected_loan_amount,
            preferred_tenure: details.preferred_tenure,
        }
    }

    pub fn collateral_view(&self) -> CollateralView {
        let eligibility = &self.result.eligibility;
        CollateralView {
            eligibility_status: EligibilityStatus::for_result(eligibility.is_eligible),
            ineligibility_reason: self.result.ineligibility_reason,
            eligible_loan_types: eligibility.eligible_loan_types.clone(),
            loan_quotes: self.result.quotes.iter().map(QuoteRow::from).collect(),
        }
    }

    pub fn notice(&self) -> ApplicationNotice {
        ApplicationNotice {
            application_id: self.application_id.clone(),
            submitted_at: self.submitted_at,
            applicant_details: self.applicant_details_view(),
            collateral: self.collateral_view(),
        }
    }

    pub fn applicant_row(&self) -> ApplicantTableRow {
        ApplicantTableRow {
            application_id: self.application_id.clone(),
            submitted_at: self.submitted_at,
            details: self.applicant_details_view(),
        }
    }

    pub fn collateral_row(&self) -> CollateralTableRow {
        CollateralTableRow {
            application_id: self.application_id.clone(),
            submitted_at: self.submitted_at,
            applicant_name: self.result.user_details.full_name.clone(),
            collateral: self.collateral_view(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv export: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv export is not valid utf-8")]
    Encoding,
}

#[derive(Debug, Serialize)]
struct CsvExportRow<'a> {
    application_id: &'a str,
    submitted_at: String,
    full_name: &'a str,
    age: i32,
    employment_type: &'static str,
    annual_income: f64,
    eligibility_status: &'static str,
    ineligibility_reason: Option<&'static str>,
    loan_type: Option<&'static str>,
    loan_amount: Option<f64>,
    interest_rate: Option<f64>,
    tenure_years: Option<u32>,
    monthly_payment: Option<String>,
    total_payment: Option<String>,
}

/// Flatten records to CSV with one line per quote. Ineligible applications
/// keep a single line with empty quote columns. Payments are rounded to cents.
pub fn export_csv(records: &[ApplicationRecord]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for record in records {
        let details = &record.result.user_details;
        let status = EligibilityStatus::for_result(record.result.is_eligible());
        let base = CsvExportRow {
            application_id: &record.application_id.0,
            submitted_at: record.submitted_at.to_rfc3339(),
            full_name: &details.full_name,
            age: details.age,
            employment_type: details.employment_type.label(),
            annual_income: details.annual_income,
            eligibility_status: status.label(),
            ineligibility_reason: record.result.ineligibility_reason.map(|r| r.summary()),
            loan_type: None,
            loan_amount: None,
            interest_rate: None,
            tenure_years: None,
            monthly_payment: None,
            total_payment: None,
        };

        if record.result.quotes.is_empty() {
            writer.serialize(&base)?;
            continue;
        }

        for quote in &record.result.quotes {
            writer.serialize(CsvExportRow {
                submitted_at: base.submitted_at.clone(),
                loan_type: Some(quote.loan_type.label()),
                loan_amount: Some(quote.eligible_amount),
                interest_rate: Some(quote.interest_rate),
                tenure_years: Some(quote.tenure_years),
                monthly_payment: Some(format!("{:.2}", quote.monthly_payment)),
                total_payment: Some(format!("{:.2}", quote.total_payment)),
                ..base
            })?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ExportError::Encoding)
}
