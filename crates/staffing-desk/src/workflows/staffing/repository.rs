use super::store::StaffingStore;

/// Storage seam holding the current dataset snapshot.
///
/// Writers read a snapshot, derive the next store from it and hand it back together
/// with the revision they started from; a mismatch means someone else wrote first.
pub trait StaffingRepository: Send + Sync {
    fn snapshot(&self) -> Result<StaffingStore, RepositoryError>;
    fn replace(&self, expected_revision: u64, store: StaffingStore) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("dataset was modified concurrently (expected revision {expected}, found {found})")]
    Conflict { expected: u64, found: u64 },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
