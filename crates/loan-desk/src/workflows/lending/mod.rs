//! Loan application intake, decisioning, and the back-office tables built from it.

pub mod domain;
pub mod engine;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Applicant, ApplicantDetails, ApplicationId, ApplicationSubmission, EmploymentType, Gender,
    LoanType, MaritalStatus,
};
pub use engine::{
    evaluate_application, ApplicationResult, EligibilityVerdict, IneligibilityReason, LoanQuote,
};
pub use intake::IntakeError;
pub use repository::{
    ApplicationNotifier, ApplicationRecord, ApplicationRepository, DisabledNotifier,
    NotifierError, RepositoryError,
};
pub use router::application_router;
pub use service::{ApplicationServiceError, LoanApplicationService, SubmissionReceipt};
pub use views::{ApplicationNotice, EligibilityStatus};
