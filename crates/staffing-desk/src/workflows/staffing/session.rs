use serde::{Deserialize, Serialize};

use super::domain::WorkerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Worker,
}

/// Signed-in identity for one dashboard. There is no credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    pub user_id: String,
}

const ADMIN_USER_ID: &str = "admin001";

/// Demo e-mail fragments and the worker they sign in as, checked in order.
const DEMO_ACCOUNTS: [(&str, &str); 3] = [("tanaka", "W001"), ("sato", "W002"), ("suzuki", "W003")];
const FALLBACK_WORKER: &str = "W001";

impl Session {
    pub fn login(role: Role, email: &str) -> Self {
        match role {
            Role::Admin => Self {
                role,
                user_id: ADMIN_USER_ID.to_string(),
            },
            Role::Worker => Self {
                role,
                user_id: resolve_worker_id(email).0,
            },
        }
    }

    pub fn worker_id(&self) -> Option<WorkerId> {
        match self.role {
            Role::Worker => Some(WorkerId(self.user_id.clone())),
            Role::Admin => None,
        }
    }
}

pub fn resolve_worker_id(email: &str) -> WorkerId {
    let id = DEMO_ACCOUNTS
        .iter()
        .find(|(fragment, _)| email.contains(fragment))
        .map(|(_, id)| *id)
        .unwrap_or(FALLBACK_WORKER);
    WorkerId::from(id)
}
