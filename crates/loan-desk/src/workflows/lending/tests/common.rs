use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::lending::domain::{
    Applicant, ApplicationId, ApplicationSubmission, EmploymentType, Gender, MaritalStatus,
};
use crate::workflows::lending::repository::{
    ApplicationNotifier, ApplicationRecord, ApplicationRepository, NotifierError,
    RepositoryError,
};
use crate::workflows::lending::views::ApplicationNotice;
use crate::workflows::lending::{application_router, LoanApplicationService};

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn today() -> NaiveDate {
    submitted_at().date_naive()
}

/// Salaried 35-year-old on 2025-06-15 earning 100k.
pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission {
        first_name: "Asha".to_string(),
        last_name: "Verma".to_string(),
        date_of_birth: "1990-01-01".to_string(),
        gender: Gender::Female,
        marital_status: MaritalStatus::Married,
        phone_number: "+1 555 0100".to_string(),
        email: "asha.verma@example.com".to_string(),
        employment_type: EmploymentType::Salaried,
        annual_income: 100_000.0,
        requested_loan_type: None,
        expected_loan_amount: None,
        preferred_tenure: None,
    }
}

pub(super) fn submission_born(date_of_birth: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        date_of_birth: date_of_birth.to_string(),
        ..submission()
    }
}

pub(super) fn applicant(date_of_birth: NaiveDate, annual_income: f64) -> Applicant {
    Applicant {
        first_name: "Asha".to_string(),
        last_name: "Verma".to_string(),
        date_of_birth,
        gender: Gender::Female,
        marital_status: MaritalStatus::Single,
        phone_number: "+1 555 0100".to_string(),
        email: "asha.verma@example.com".to_string(),
        employment_type: EmploymentType::Salaried,
        annual_income,
        requested_loan_type: None,
        expected_loan_amount: None,
        preferred_tenure: None,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

pub(super) fn build_service() -> (
    LoanApplicationService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = LoanApplicationService::new(repository.clone(), notifier.clone());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.application_id == record.application_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.application_id == id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<ApplicationNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<ApplicationNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl ApplicationNotifier for MemoryNotifier {
    fn publish(&self, notice: ApplicationNotice) -> Result<(), NotifierError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl ApplicationNotifier for FailingNotifier {
    fn publish(&self, _notice: ApplicationNotice) -> Result<(), NotifierError> {
        Err(NotifierError::Transport("connection refused".to_string()))
    }
}

/// Always hands out the same id, so the second insert collides.
#[derive(Default)]
pub(super) struct FixedIdRepository {
    inner: MemoryRepository,
}

impl ApplicationRepository for FixedIdRepository {
    fn generate_id(&self) -> ApplicationId {
        ApplicationId("LN-FIXED".to_string())
    }

    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.list()
    }
}

/// Hands out ids from a script, then falls back to `LN-END`.
pub(super) struct ScriptedIdRepository {
    ids: Mutex<Vec<&'static str>>,
    pub(super) inner: MemoryRepository,
}

impl ScriptedIdRepository {
    pub(super) fn new(ids: &[&'static str]) -> Self {
        let mut ids = ids.to_vec();
        ids.reverse();
        Self {
            ids: Mutex::new(ids),
            inner: MemoryRepository::default(),
        }
    }
}

impl ApplicationRepository for ScriptedIdRepository {
    fn generate_id(&self) -> ApplicationId {
        let next = self.ids.lock().expect("id script poisoned").pop();
        ApplicationId(next.unwrap_or("LN-END").to_string())
    }

    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.list()
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn application_router_with_service(
    service: LoanApplicationService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    application_router(Arc::new(service))
}
