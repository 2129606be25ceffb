use metrics_exporter_prometheus::PrometheusHandle;
use staffing_desk::config::DeskConfig;
use staffing_desk::workflows::staffing::{
    demo_store, ReportMonth, RepositoryError, StaffingRepository, StaffingStore,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local dataset. Writes are accepted only against the revision they read.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStaffingRepository {
    store: Arc<Mutex<StaffingStore>>,
}

impl InMemoryStaffingRepository {
    pub(crate) fn new(store: StaffingStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub(crate) fn from_config(config: &DeskConfig) -> Self {
        if config.seed_demo {
            Self::new(demo_store())
        } else {
            Self::default()
        }
    }
}

impl StaffingRepository for InMemoryStaffingRepository {
    fn snapshot(&self) -> Result<StaffingStore, RepositoryError> {
        let guard = self.store.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn replace(&self, expected_revision: u64, store: StaffingStore) -> Result<(), RepositoryError> {
        let mut guard = self.store.lock().map_err(poisoned)?;
        if guard.revision() != expected_revision {
            return Err(RepositoryError::Conflict {
                expected: expected_revision,
                found: guard.revision(),
            });
        }
        *guard = store;
        Ok(())
    }
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

pub(crate) fn parse_month(raw: &str) -> Result<ReportMonth, String> {
    raw.parse::<ReportMonth>()
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_revision_is_rejected() {
        let repository = InMemoryStaffingRepository::new(demo_store());
        let first = repository.snapshot().expect("snapshot");
        let second = repository.snapshot().expect("snapshot");

        let worker = first.workers()[0].clone();
        repository
            .replace(first.revision(), first.with_worker(worker.clone()))
            .expect("first write wins");

        match repository.replace(second.revision(), second.with_worker(worker)) {
            Err(RepositoryError::Conflict { expected, found }) => {
                assert_eq!(expected, 0);
                assert_eq!(found, 1);
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn seeding_can_be_disabled() {
        let empty = InMemoryStaffingRepository::from_config(&DeskConfig {
            currency_symbol: "¥".to_string(),
            seed_demo: false,
        });
        assert!(empty.snapshot().expect("snapshot").workers().is_empty());
    }

    #[test]
    fn month_parser_reports_bad_input() {
        assert!(parse_month("2026-01").is_ok());
        let err = parse_month("01/2026").expect_err("rejected");
        assert!(err.contains("YYYY-MM"));
    }
}
