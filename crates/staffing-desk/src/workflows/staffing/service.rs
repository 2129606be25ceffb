use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use super::conversations::{
    conversation_for, conversations, mark_conversation_read, search_conversations, Conversation,
    MessageDraft,
};
use super::domain::{
    ApplicationId, ApplicationStatus, BadgeVariant, Job, JobId, JobStatus, JobTemplate, Message,
    Participant, StaffingError, TemplateId, WorkHistory, Worker, WorkerId,
};
use super::forms::{JobForm, JobTemplateForm, ScheduleForm, WorkerForm};
use super::lifecycle::{
    apply_to_job, set_application_status, set_job_status, withdraw_application,
    ApplicationRequest,
};
use super::queries::{
    aggregate_worker_totals, applied_jobs_for, history_for, messages_for, search_workers,
    unread_message_count, visible_jobs_for, WorkerTotals,
};
use super::report::{
    admin_overview, history_csv_string, payment_csv_string, payment_report, AdminOverview, ExportError,
    PaymentReport, ReportMonth,
};
use super::repository::{RepositoryError, StaffingRepository};
use super::session::{Role, Session};
use super::store::StaffingStore;

/// Job row as listed on the admin board.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub status_label: &'static str,
    pub badge: BadgeVariant,
}

impl From<Job> for JobListing {
    fn from(job: Job) -> Self {
        Self {
            status_label: job.status.label(),
            badge: job.badge_variant(),
            job,
        }
    }
}

/// A worker's message box.
#[derive(Debug, Clone, Serialize)]
pub struct Inbox {
    pub worker_id: WorkerId,
    pub messages: Vec<Message>,
    pub unread_count: usize,
}

/// Facade over the repository that runs every dashboard operation against the
/// current snapshot and commits the derived store.
pub struct StaffingService<R> {
    repository: Arc<R>,
}

impl<R> StaffingService<R>
where
    R: StaffingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn snapshot(&self) -> Result<StaffingStore, StaffingServiceError> {
        Ok(self.repository.snapshot()?)
    }

    fn commit<T>(
        &self,
        change: impl FnOnce(&StaffingStore) -> Result<(StaffingStore, T), StaffingError>,
    ) -> Result<T, StaffingServiceError> {
        let current = self.repository.snapshot()?;
        let (next, value) = change(&current)?;
        self.repository.replace(current.revision(), next)?;
        Ok(value)
    }

    /// Workers must exist in the dataset; admins always sign in.
    pub fn login(&self, role: Role, email: &str) -> Result<Session, StaffingServiceError> {
        let session = Session::login(role, email);
        if let Some(worker_id) = session.worker_id() {
            self.repository.snapshot()?.worker(&worker_id)?;
        }
        info!(role = ?session.role, user_id = %session.user_id, "session opened");
        Ok(session)
    }

    pub fn workers(&self, query: Option<&str>) -> Result<Vec<Worker>, StaffingServiceError> {
        let store = self.repository.snapshot()?;
        Ok(search_workers(store.workers(), query.unwrap_or_default()))
    }

    pub fn register_worker(
        &self,
        form: WorkerForm,
        joined: NaiveDate,
    ) -> Result<Worker, StaffingServiceError> {
        let worker = self.commit(|store| {
            let worker = form.into_worker(store.next_worker_id(), joined)?;
            Ok((store.with_worker(worker.clone()), worker))
        })?;
        info!(worker_id = %worker.id, level = worker.level.label(), "worker registered");
        Ok(worker)
    }

    pub fn delete_worker(&self, worker_id: &WorkerId) -> Result<(), StaffingServiceError> {
        self.commit(|store| Ok((store.without_worker(worker_id)?, ())))?;
        info!(%worker_id, "worker deleted");
        Ok(())
    }

    pub fn visible_jobs(&self, worker_id: &WorkerId) -> Result<Vec<Job>, StaffingServiceError> {
        let store = self.repository.snapshot()?;
        let worker = store.worker(worker_id)?;
        Ok(visible_jobs_for(worker, store.jobs()))
    }

    pub fn applied_jobs(&self, worker_id: &WorkerId) -> Result<Vec<Job>, StaffingServiceError> {
        let store = self.repository.snapshot()?;
        store.worker(worker_id)?;
        Ok(applied_jobs_for(worker_id, store.jobs()))
    }

    pub fn work_history(
        &self,
        worker_id: &WorkerId,
    ) -> Result<Vec<WorkHistory>, StaffingServiceError> {
        let store = self.repository.snapshot()?;
        store.worker(worker_id)?;
        Ok(history_for(worker_id, store.history()))
    }

    pub fn worker_totals(&self, worker_id: &WorkerId) -> Result<WorkerTotals, StaffingServiceError> {
        let store = self.repository.snapshot()?;
        store.worker(worker_id)?;
        Ok(aggregate_worker_totals(worker_id, store.history()))
    }

    pub fn inbox(&self, worker_id: &WorkerId) -> Result<Inbox, StaffingServiceError> {
        let store = self.repository.snapshot()?;
        store.worker(worker_id)?;
        Ok(Inbox {
            worker_id: worker_id.clone(),
            messages: messages_for(worker_id, store.messages()),
            unread_count: unread_message_count(worker_id, store.messages()),
        })
    }

    pub fn jobs(&self) -> Result<Vec<JobListing>, StaffingServiceError> {
        let store = self.repository.snapshot()?;
        Ok(store.jobs().iter().cloned().map(JobListing::from).collect())
    }

    /// Creates a job, or overwrites `job_id` keeping its status and applications.
    pub fn save_job(
        &self,
        job_id: Option<&JobId>,
        form: JobForm,
    ) -> Result<Job, StaffingServiceError> {
        let job = self.commit(|store| {
            let existing = job_id.map(|id| store.job(id)).transpose()?;
            let job = form.into_job(store.next_job_id(), existing)?;
            Ok((store.with_job(job.clone()), job))
        })?;
        info!(job_id = %job.id, title = %job.title, "job saved");
        Ok(job)
    }

    pub fn create_job_from_template(
        &self,
        template_id: &TemplateId,
        schedule: ScheduleForm,
    ) -> Result<Job, StaffingServiceError> {
        let job = self.commit(|store| {
            let schedule = schedule.parse()?;
            let job = store
                .template(template_id)?
                .instantiate(store.next_job_id(), schedule);
            Ok((store.with_job(job.clone()), job))
        })?;
        info!(job_id = %job.id, %template_id, "job created from template");
        Ok(job)
    }

    pub fn set_job_status(
        &self,
        job_id: &JobId,
        status: JobStatus,
    ) -> Result<Job, StaffingServiceError> {
        let job = self.commit(|store| {
            let job = set_job_status(store.job(job_id)?, status);
            Ok((store.with_job(job.clone()), job))
        })?;
        info!(%job_id, status = status.label(), "job status changed");
        Ok(job)
    }

    pub fn apply(
        &self,
        job_id: &JobId,
        worker_id: &WorkerId,
        at: DateTime<Utc>,
    ) -> Result<Job, StaffingServiceError> {
        let job = self.commit(|store| {
            let request = ApplicationRequest::from(store.worker(worker_id)?);
            let job = apply_to_job(store.job(job_id)?, request, at)?;
            Ok((store.with_job(job.clone()), job))
        })?;
        info!(%job_id, %worker_id, "application submitted");
        Ok(job)
    }

    pub fn set_application_status(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<Job, StaffingServiceError> {
        let job = self.commit(|store| {
            let job = set_application_status(store.job(job_id)?, application_id, status, at)?;
            Ok((store.with_job(job.clone()), job))
        })?;
        info!(%job_id, %application_id, status = status.label(), "application status changed");
        Ok(job)
    }

    pub fn withdraw(
        &self,
        job_id: &JobId,
        worker_id: &WorkerId,
        at: DateTime<Utc>,
    ) -> Result<Job, StaffingServiceError> {
        let job = self.commit(|store| {
            let job = withdraw_application(store.job(job_id)?, worker_id, at)?;
            Ok((store.with_job(job.clone()), job))
        })?;
        info!(%job_id, %worker_id, "application withdrawn");
        Ok(job)
    }

    pub fn templates(&self) -> Result<Vec<JobTemplate>, StaffingServiceError> {
        Ok(self.repository.snapshot()?.templates().to_vec())
    }

    pub fn save_template(
        &self,
        template_id: Option<&TemplateId>,
        form: JobTemplateForm,
        now: DateTime<Utc>,
    ) -> Result<JobTemplate, StaffingServiceError> {
        let template = self.commit(|store| {
            let existing = template_id.map(|id| store.template(id)).transpose()?;
            let template = form.into_template(store.next_template_id(), existing, now)?;
            Ok((store.with_template(template.clone()), template))
        })?;
        info!(template_id = %template.id, name = %template.name, "template saved");
        Ok(template)
    }

    pub fn delete_template(&self, template_id: &TemplateId) -> Result<(), StaffingServiceError> {
        self.commit(|store| Ok((store.without_template(template_id)?, ())))?;
        info!(%template_id, "template deleted");
        Ok(())
    }

    /// Worker participants must be registered.
    pub fn send_message(
        &self,
        draft: MessageDraft,
        at: DateTime<Utc>,
    ) -> Result<Message, StaffingServiceError> {
        let message = self.commit(|store| {
            for participant in [&draft.from, &draft.to] {
                if let Participant::Worker(worker_id) = participant {
                    store.worker(worker_id)?;
                }
            }
            let message = draft.into_message(store.next_message_id(), at)?;
            Ok((store.with_message(message.clone()), message))
        })?;
        info!(message_id = %message.id, from = %message.from, to = %message.to, "message sent");
        Ok(message)
    }

    pub fn conversations(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<Conversation>, StaffingServiceError> {
        let store = self.repository.snapshot()?;
        let threads = conversations(store.workers(), store.messages());
        Ok(match query {
            Some(query) => search_conversations(&threads, query),
            None => threads,
        })
    }

    /// Admin opened the thread with `worker_id`.
    pub fn mark_conversation_read(
        &self,
        worker_id: &WorkerId,
    ) -> Result<Conversation, StaffingServiceError> {
        let conversation = self.commit(|store| {
            let worker = store.worker(worker_id)?;
            let messages = mark_conversation_read(
                store.messages(),
                &Participant::Admin,
                &Participant::Worker(worker_id.clone()),
            );
            let conversation = conversation_for(worker, &messages);
            Ok((store.with_messages(messages), conversation))
        })?;
        info!(%worker_id, "conversation marked read");
        Ok(conversation)
    }

    pub fn payment_report(
        &self,
        month: Option<ReportMonth>,
    ) -> Result<PaymentReport, StaffingServiceError> {
        let store = self.repository.snapshot()?;
        Ok(payment_report(store.workers(), store.history(), month))
    }

    pub fn export_payments_csv(
        &self,
        month: Option<ReportMonth>,
    ) -> Result<String, StaffingServiceError> {
        let report = self.payment_report(month)?;
        let csv = payment_csv_string(&report)?;
        info!(month = ?report.month, rows = report.rows.len(), "payment report exported");
        Ok(csv)
    }

    /// Work history detail rows behind the payment report.
    pub fn export_history_csv(
        &self,
        month: Option<ReportMonth>,
    ) -> Result<String, StaffingServiceError> {
        let report = self.payment_report(month)?;
        let csv = history_csv_string(&report)?;
        info!(month = ?report.month, rows = report.history.len(), "payment history exported");
        Ok(csv)
    }

    pub fn overview(&self) -> Result<AdminOverview, StaffingServiceError> {
        Ok(admin_overview(&self.repository.snapshot()?))
    }
}

/// Error raised by the staffing service.
#[derive(Debug, thiserror::Error)]
pub enum StaffingServiceError {
    #[error(transparent)]
    Staffing(#[from] StaffingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
