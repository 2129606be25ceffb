use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Job, JobStatus, StaffingError, Worker, WorkerId,
};

/// Who is applying. Built from the worker record so the name snapshot matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub worker_id: WorkerId,
    pub worker_name: String,
}

impl From<&Worker> for ApplicationRequest {
    fn from(worker: &Worker) -> Self {
        Self {
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
        }
    }
}

/// Applications are never removed from a job, so the position is a stable suffix.
fn next_application_id(job: &Job) -> ApplicationId {
    ApplicationId(format!("{}-A{:03}", job.id, job.applications.len() + 1))
}

/// Appends a new `応募済み` application. `current_workers` is left untouched.
pub fn apply_to_job(
    job: &Job,
    request: ApplicationRequest,
    applied_at: DateTime<Utc>,
) -> Result<Job, StaffingError> {
    let blocked = job.applications.iter().any(|application| {
        application.worker_id == request.worker_id && application.status.is_active()
    });
    if blocked {
        return Err(StaffingError::AlreadyApplied {
            job_id: job.id.clone(),
            worker_id: request.worker_id,
        });
    }

    let mut updated = job.clone();
    updated.applications.push(Application {
        id: next_application_id(job),
        job_id: job.id.clone(),
        worker_id: request.worker_id,
        worker_name: request.worker_name,
        status: ApplicationStatus::Applied,
        applied_at,
        approved_at: None,
    });
    Ok(updated)
}

pub fn set_application_status(
    job: &Job,
    application_id: &ApplicationId,
    status: ApplicationStatus,
    at: DateTime<Utc>,
) -> Result<Job, StaffingError> {
    let position = job
        .applications
        .iter()
        .position(|application| &application.id == application_id)
        .ok_or_else(|| StaffingError::ApplicationNotFound {
            job_id: job.id.clone(),
            application_id: application_id.clone(),
        })?;

    let current = job.applications[position].status;
    if !current.can_transition_to(status) {
        return Err(StaffingError::InvalidTransition {
            from: current,
            to: status,
        });
    }

    let mut updated = job.clone();
    if current == status {
        return Ok(updated);
    }

    let application = &mut updated.applications[position];
    application.status = status;
    if status == ApplicationStatus::Approved && application.approved_at.is_none() {
        application.approved_at = Some(at);
    }
    Ok(updated)
}

/// Worker-initiated cancel of their live application on this job.
pub fn withdraw_application(
    job: &Job,
    worker_id: &WorkerId,
    at: DateTime<Utc>,
) -> Result<Job, StaffingError> {
    let application_id = job
        .applications
        .iter()
        .rev()
        .find(|application| &application.worker_id == worker_id && application.status.is_active())
        .map(|application| application.id.clone())
        .ok_or_else(|| StaffingError::NoActiveApplication {
            job_id: job.id.clone(),
            worker_id: worker_id.clone(),
        })?;

    set_application_status(job, &application_id, ApplicationStatus::Cancelled, at)
}

/// Job status changes are always driven by the administrator.
pub fn set_job_status(job: &Job, status: JobStatus) -> Job {
    let mut updated = job.clone();
    updated.status = status;
    updated
}
