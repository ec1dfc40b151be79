use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::ApplicationId;
use super::engine::ApplicationResult;
use super::views::ApplicationNotice;

/// Stored submission: the decision plus when and under which id it was filed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: ApplicationResult,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Reference number of the form `LN<unix millis><4-digit sequence>`.
///
/// The sequence wraps at 10 000, so ids repeat if that many are drawn within
/// one millisecond. The service redraws on `Conflict`.
pub fn next_application_id(now: DateTime<Utc>) -> ApplicationId {
    let sequence = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed) % 10_000;
    ApplicationId(format!("LN{}{sequence:04}", now.timestamp_millis()))
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations own id uniqueness: one insert per generated id.
pub trait ApplicationRepository: Send + Sync {
    fn generate_id(&self) -> ApplicationId {
        next_application_id(Utc::now())
    }
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    /// Every stored record, oldest submission first.
    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// One-way hook receiving finished applications (webhooks, queues, mail).
pub trait ApplicationNotifier: Send + Sync {
    fn publish(&self, notice: ApplicationNotice) -> Result<(), NotifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Notifier used when no delivery target is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

impl ApplicationNotifier for DisabledNotifier {
    fn publish(&self, _notice: ApplicationNotice) -> Result<(), NotifierError> {
        Ok(())
    }
}
