use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{ApplicationId, ApplicationSubmission};
use super::engine::{evaluate_application, ApplicationResult};
use super::intake::{applicant_from_submission, IntakeError};
use super::repository::{
    ApplicationNotifier, ApplicationRecord, ApplicationRepository, RepositoryError,
};
use super::views::{
    export_csv, ApplicantTableRow, ApplicationNotice, CollateralTableRow, ExportError,
};

const ID_ATTEMPTS: u32 = 3;

pub const SUBMISSION_MESSAGE: &str = "Your loan application has been submitted successfully";

/// Service composing intake, the decision engine, storage, and the notifier.
pub struct LoanApplicationService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

/// Confirmation returned to the applicant. Quotes are kept for the back office.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub success: bool,
    pub application_id: ApplicationId,
    pub message: String,
    pub applicant_name: String,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    fn for_record(record: &ApplicationRecord) -> Self {
        Self {
            success: true,
            application_id: record.application_id.clone(),
            message: SUBMISSION_MESSAGE.to_string(),
            applicant_name: record.result.user_details.full_name.clone(),
            submitted_at: record.submitted_at,
        }
    }
}

impl<R, N> LoanApplicationService<R, N>
where
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Submit a new application stamped with the current time.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<SubmissionReceipt, ApplicationServiceError> {
        self.submit_at(submission, Utc::now())
    }

    /// Submit with an explicit timestamp; ages are computed on its UTC date.
    pub fn submit_at(
        &self,
        submission: ApplicationSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, ApplicationServiceError> {
        let today = submitted_at.date_naive();
        let applicant = applicant_from_submission(submission, today)?;
        let result = evaluate_application(&applicant, today);

        let stored = self.store(submitted_at, result)?;

        info!(
            application_id = %stored.application_id,
            eligible = stored.result.is_eligible(),
            quotes = stored.result.quotes.len(),
            "loan application stored"
        );

        self.notify(stored.notice());

        Ok(SubmissionReceipt::for_record(&stored))
    }

    // Generated ids can collide once the sequence wraps; draw a fresh one.
    fn store(
        &self,
        submitted_at: DateTime<Utc>,
        result: ApplicationResult,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut attempt = 1;
        loop {
            let record = ApplicationRecord {
                application_id: self.repository.generate_id(),
                submitted_at,
                result: result.clone(),
            };
            match self.repository.insert(record) {
                Err(RepositoryError::Conflict) if attempt < ID_ATTEMPTS => {
                    debug!(attempt, "application id already taken, retrying");
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }

    // Delivery problems never reach the applicant.
    fn notify(&self, notice: ApplicationNotice) {
        let application_id = notice.application_id.clone();
        if let Err(err) = self.notifier.publish(notice) {
            warn!(%application_id, error = %err, "application notification failed");
        }
    }

    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn applicant_table(&self) -> Result<Vec<ApplicantTableRow>, ApplicationServiceError> {
        Ok(self.list()?.iter().map(ApplicationRecord::applicant_row).collect())
    }

    pub fn collateral_table(&self) -> Result<Vec<CollateralTableRow>, ApplicationServiceError> {
        Ok(self.list()?.iter().map(ApplicationRecord::collateral_row).collect())
    }

    pub fn export(&self) -> Result<Vec<ApplicationNotice>, ApplicationServiceError> {
        Ok(self.list()?.iter().map(ApplicationRecord::notice).collect())
    }

    pub fn export_csv(&self) -> Result<String, ApplicationServiceError> {
        Ok(export_csv(&self.list()?)?)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
