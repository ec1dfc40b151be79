use chrono::NaiveDate;
use loan_desk::config::WebhookConfig;
use loan_desk::workflows::lending::{
    ApplicationId, ApplicationNotice, ApplicationNotifier, ApplicationRecord,
    ApplicationRepository, EmploymentType, NotifierError, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct StoredApplications {
    order: Vec<ApplicationId>,
    by_id: HashMap<ApplicationId, ApplicationRecord>,
}

/// Process-local store. Lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<StoredApplications>>,
}

impl InMemoryApplicationRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoredApplications>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.by_id.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.order.push(record.application_id.clone());
        guard
            .by_id
            .insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.by_id.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .order
            .iter()
            .filter_map(|id| guard.by_id.get(id).cloned())
            .collect())
    }
}

/// Posts finished applications to the configured webhook on a background task.
#[derive(Clone)]
pub(crate) struct WebhookNotifier {
    target: Option<WebhookTarget>,
}

#[derive(Clone)]
struct WebhookTarget {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub(crate) fn from_config(config: &WebhookConfig) -> Result<Self, std::io::Error> {
        let target = match &config.url {
            Some(url) => {
                let client = reqwest::Client::builder()
                    .timeout(config.timeout)
                    .build()
                    .map_err(std::io::Error::other)?;
                Some(WebhookTarget {
                    client,
                    url: url.clone(),
                })
            }
            None => None,
        };
        Ok(Self { target })
    }
}

impl ApplicationNotifier for WebhookNotifier {
    fn publish(&self, notice: ApplicationNotice) -> Result<(), NotifierError> {
        let Some(target) = self.target.clone() else {
            return Ok(());
        };
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|err| NotifierError::Transport(err.to_string()))?;

        runtime.spawn(async move {
            let application_id = notice.application_id.clone();
            let delivery = target
                .client
                .post(&target.url)
                .json(&notice)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            match delivery {
                Ok(response) => {
                    debug!(%application_id, status = %response.status(), "webhook delivered")
                }
                Err(err) => warn!(%application_id, error = %err, "webhook delivery failed"),
            }
        });

        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_employment_type(raw: &str) -> Result<EmploymentType, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    [
        EmploymentType::Salaried,
        EmploymentType::SelfEmployed,
        EmploymentType::Freelancer,
        EmploymentType::Unemployed,
        EmploymentType::Retired,
    ]
    .into_iter()
    .find(|kind| kind.label() == normalized)
    .ok_or_else(|| {
        format!(
            "unknown employment type '{raw}' (expected salaried, self-employed, freelancer, unemployed, or retired)"
        )
    })
}
