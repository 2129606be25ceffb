use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::staffing::repository::{RepositoryError, StaffingRepository};
use crate::workflows::staffing::seed::demo_store;
use crate::workflows::staffing::store::StaffingStore;
use crate::workflows::staffing::{staffing_router, StaffingService};

#[derive(Clone)]
pub(super) struct MemoryRepository {
    pub(super) store: Arc<Mutex<StaffingStore>>,
}

impl MemoryRepository {
    pub(super) fn seeded() -> Self {
        Self::with_store(demo_store())
    }

    pub(super) fn with_store(store: StaffingStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub(super) fn current(&self) -> StaffingStore {
        self.store.lock().expect("repository mutex poisoned").clone()
    }
}

impl StaffingRepository for MemoryRepository {
    fn snapshot(&self) -> Result<StaffingStore, RepositoryError> {
        Ok(self.current())
    }

    fn replace(&self, expected_revision: u64, store: StaffingStore) -> Result<(), RepositoryError> {
        let mut guard = self.store.lock().expect("repository mutex poisoned");
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

/// Serves the demo data but reports every write as stale.
pub(super) struct ConflictRepository;

impl StaffingRepository for ConflictRepository {
    fn snapshot(&self) -> Result<StaffingStore, RepositoryError> {
        Ok(demo_store())
    }

    fn replace(&self, expected_revision: u64, _store: StaffingStore) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict {
            expected: expected_revision,
            found: expected_revision + 1,
        })
    }
}

pub(super) struct UnavailableRepository;

impl StaffingRepository for UnavailableRepository {
    fn snapshot(&self) -> Result<StaffingStore, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn replace(&self, _expected_revision: u64, _store: StaffingStore) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (StaffingService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::seeded();
    let service = StaffingService::new(Arc::new(repository.clone()));
    (service, repository)
}

pub(super) fn router_with_service(service: StaffingService<MemoryRepository>) -> axum::Router {
    staffing_router(Arc::new(service))
}

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&body).expect("serialize request"),
        ))
        .expect("request builds")
}

pub(super) fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
