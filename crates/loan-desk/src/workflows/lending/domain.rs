use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loan products offered by the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Housing,
    Personal,
    Property,
    Automobile,
}

impl LoanType {
    /// Every product, in the order quotes are presented to eligible applicants.
    pub const ALL: [LoanType; 4] = [
        LoanType::Housing,
        LoanType::Personal,
        LoanType::Property,
        LoanType::Automobile,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LoanType::Housing => "housing",
            LoanType::Personal => "personal",
            LoanType::Property => "property",
            LoanType::Automobile => "automobile",
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    Salaried,
    SelfEmployed,
    Freelancer,
    Unemployed,
    Retired,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::Salaried => "salaried",
            EmploymentType::SelfEmployed => "self-employed",
            EmploymentType::Freelancer => "freelancer",
            EmploymentType::Unemployed => "unemployed",
            EmploymentType::Retired => "retired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer-not-to-say",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Divorced => "divorced",
            MaritalStatus::Widowed => "widowed",
        }
    }
}

/// Raw form payload as posted by the application form, before intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    pub employment_type: EmploymentType,
    pub annual_income: f64,
    #[serde(default)]
    pub requested_loan_type: Option<LoanType>,
    #[serde(default)]
    pub expected_loan_amount: Option<f64>,
    #[serde(default)]
    pub preferred_tenure: Option<u32>,
}

/// Validated applicant. Immutable once intake has accepted the submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub phone_number: String,
    pub email: String,
    pub employment_type: EmploymentType,
    pub annual_income: f64,
    /// Echoed for the loan officer; no rule consults it.
    pub requested_loan_type: Option<LoanType>,
    pub expected_loan_amount: Option<f64>,
    pub preferred_tenure: Option<u32>,
}

impl Applicant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Applicant echo stored alongside the decision, including the derived age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetails {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub phone_number: String,
    pub email: String,
    pub employment_type: EmploymentType,
    pub annual_income: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_loan_type: Option<LoanType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_loan_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_tenure: Option<u32>,
}

impl ApplicantDetails {
    pub fn from_applicant(applicant: &Applicant, age: i32) -> Self {
        Self {
            full_name: applicant.full_name(),
            first_name: applicant.first_name.clone(),
            last_name: applicant.last_name.clone(),
            date_of_birth: applicant.date_of_birth,
            age,
            gender: applicant.gender,
            marital_status: applicant.marital_status,
            phone_number: applicant.phone_number.clone(),
            email: applicant.email.clone(),
            employment_type: applicant.employment_type,
            annual_income: applicant.annual_income,
            requested_loan_type: applicant.requested_loan_type,
            expected_loan_amount: applicant.expected_loan_amount,
            preferred_tenure: applicant.preferred_tenure,
        }
    }
}
