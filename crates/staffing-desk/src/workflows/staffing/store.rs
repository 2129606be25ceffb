use serde::{Deserialize, Serialize};

use super::domain::{
    HistoryId, Job, JobId, JobTemplate, Message, MessageId, StaffingError, TemplateId,
    WorkHistory, Worker, WorkerId,
};

/// Records addressable by a string id within their collection.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Worker {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Keyed for Job {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Keyed for JobTemplate {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Keyed for Message {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Keyed for WorkHistory {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Replace-by-id when present, append otherwise. Returns a new collection.
pub fn upsert<T: Keyed + Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    match next.iter().position(|existing| existing.key() == item.key()) {
        Some(index) => next[index] = item,
        None => next.push(item),
    }
    next
}

/// Filter-out by id. `None` when nothing matched.
pub fn remove<T: Keyed + Clone>(items: &[T], key: &str) -> Option<Vec<T>> {
    if !items.iter().any(|item| item.key() == key) {
        return None;
    }
    Some(
        items
            .iter()
            .filter(|item| item.key() != key)
            .cloned()
            .collect(),
    )
}

/// Next id of the form `{prefix}{n:03}` above every numeric suffix already in use.
pub fn next_key<T: Keyed>(items: &[T], prefix: &str) -> String {
    let highest = items
        .iter()
        .filter_map(|item| item.key().strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:03}", highest + 1)
}

/// Immutable snapshot of the whole dataset for one session.
///
/// Every mutating method returns a new store whose `revision` is one higher; the
/// receiver is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffingStore {
    revision: u64,
    workers: Vec<Worker>,
    templates: Vec<JobTemplate>,
    jobs: Vec<Job>,
    messages: Vec<Message>,
    history: Vec<WorkHistory>,
}

impl StaffingStore {
    pub fn new(
        workers: Vec<Worker>,
        templates: Vec<JobTemplate>,
        jobs: Vec<Job>,
        messages: Vec<Message>,
        history: Vec<WorkHistory>,
    ) -> Self {
        Self {
            revision: 0,
            workers,
            templates,
            jobs,
            messages,
            history,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn templates(&self) -> &[JobTemplate] {
        &self.templates
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn history(&self) -> &[WorkHistory] {
        &self.history
    }

    pub fn worker(&self, id: &WorkerId) -> Result<&Worker, StaffingError> {
        self.workers
            .iter()
            .find(|worker| &worker.id == id)
            .ok_or_else(|| StaffingError::WorkerNotFound(id.clone()))
    }

    pub fn job(&self, id: &JobId) -> Result<&Job, StaffingError> {
        self.jobs
            .iter()
            .find(|job| &job.id == id)
            .ok_or_else(|| StaffingError::JobNotFound(id.clone()))
    }

    pub fn template(&self, id: &TemplateId) -> Result<&JobTemplate, StaffingError> {
        self.templates
            .iter()
            .find(|template| &template.id == id)
            .ok_or_else(|| StaffingError::TemplateNotFound(id.clone()))
    }

    pub fn next_worker_id(&self) -> WorkerId {
        WorkerId(next_key(&self.workers, "W"))
    }

    pub fn next_job_id(&self) -> JobId {
        JobId(next_key(&self.jobs, "J"))
    }

    pub fn next_template_id(&self) -> TemplateId {
        TemplateId(next_key(&self.templates, "T"))
    }

    pub fn next_message_id(&self) -> MessageId {
        MessageId(next_key(&self.messages, "M"))
    }

    pub fn next_history_id(&self) -> HistoryId {
        HistoryId(next_key(&self.history, "H"))
    }

    fn bumped(&self) -> Self {
        let mut next = self.clone();
        next.revision += 1;
        next
    }

    pub fn with_worker(&self, worker: Worker) -> Self {
        let mut next = self.bumped();
        next.workers = upsert(&self.workers, worker);
        next
    }

    /// Deletion is refused while anything still points at the worker, so no dangling
    /// ids are left behind.
    pub fn without_worker(&self, id: &WorkerId) -> Result<Self, StaffingError> {
        self.worker(id)?;
        if self.worker_is_referenced(id) {
            return Err(StaffingError::WorkerReferenced(id.clone()));
        }

        let mut next = self.bumped();
        next.workers = remove(&self.workers, id.as_str()).unwrap_or_default();
        Ok(next)
    }

    pub fn worker_is_referenced(&self, id: &WorkerId) -> bool {
        self.jobs.iter().any(|job| job.has_application_from(id))
            || self
                .messages
                .iter()
                .any(|message| message.from.is_worker(id) || message.to.is_worker(id))
            || self.history.iter().any(|entry| &entry.worker_id == id)
    }

    pub fn with_job(&self, job: Job) -> Self {
        let mut next = self.bumped();
        next.jobs = upsert(&self.jobs, job);
        next
    }

    pub fn with_template(&self, template: JobTemplate) -> Self {
        let mut next = self.bumped();
        next.templates = upsert(&self.templates, template);
        next
    }

    /// Jobs already created from the template keep their copied fields.
    pub fn without_template(&self, id: &TemplateId) -> Result<Self, StaffingError> {
        let templates = remove(&self.templates, id.as_str())
            .ok_or_else(|| StaffingError::TemplateNotFound(id.clone()))?;
        let mut next = self.bumped();
        next.templates = templates;
        Ok(next)
    }

    pub fn with_message(&self, message: Message) -> Self {
        let mut next = self.bumped();
        next.messages = upsert(&self.messages, message);
        next
    }

    pub fn with_messages(&self, messages: Vec<Message>) -> Self {
        let mut next = self.bumped();
        next.messages = messages;
        next
    }

    pub fn with_history(&self, entry: WorkHistory) -> Self {
        let mut next = self.bumped();
        next.history = upsert(&self.history, entry);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::staffing::domain::{JobSchedule, WorkerLevel};
    use crate::workflows::staffing::seed::demo_store;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn mutations_leave_previous_snapshot_untouched() {
        let store = demo_store();
        let mut job = store.jobs()[0].clone();
        job.title = "変更済み".to_string();

        let next = store.with_job(job.clone());

        assert_eq!(next.revision(), store.revision() + 1);
        assert_eq!(next.job(&job.id).expect("job present").title, "変更済み");
        assert_ne!(store.job(&job.id).expect("job present").title, "変更済み");
        assert_eq!(next.jobs().len(), store.jobs().len());
    }

    #[test]
    fn next_ids_continue_numbering() {
        let store = demo_store();
        let highest = store.jobs().len();
        assert_eq!(store.next_job_id().0, format!("J{:03}", highest + 1));
        assert_eq!(store.next_worker_id().0, "W006");
    }

    #[test]
    fn referenced_worker_cannot_be_deleted() {
        let store = demo_store();
        let err = store
            .without_worker(&WorkerId::from("W001"))
            .expect_err("W001 has history");
        assert_eq!(err, StaffingError::WorkerReferenced(WorkerId::from("W001")));

        let missing = store
            .without_worker(&WorkerId::from("W999"))
            .expect_err("unknown worker");
        assert_eq!(missing, StaffingError::WorkerNotFound(WorkerId::from("W999")));
    }

    #[test]
    fn unreferenced_worker_is_removed() {
        let store = demo_store();
        let mut worker = store.workers()[0].clone();
        worker.id = store.next_worker_id();
        let with_new = store.with_worker(worker.clone());

        let without = with_new.without_worker(&worker.id).expect("deletes");
        assert_eq!(without.workers().len(), store.workers().len());
        assert!(without.worker(&worker.id).is_err());
    }

    #[test]
    fn template_copy_has_no_aliasing() {
        let store = demo_store();
        let template = store.templates()[0].clone();
        let schedule = JobSchedule {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).expect("valid time"),
            location: "本館".to_string(),
            max_workers: 4,
            visibility_level: WorkerLevel::All,
        };

        let mut job = template.instantiate(store.next_job_id(), schedule);
        assert_eq!(job.title, template.name);
        assert_eq!(job.category, template.category);
        assert_eq!(job.salary, template.base_salary);
        assert_eq!(job.break_time, template.break_time);
        assert_eq!(job.description, template.description);
        assert_eq!(job.details, template.details);

        job.title = "別名".to_string();
        job.details.precautions = Some("変更".to_string());
        let next = store.with_job(job);

        let source = next.template(&template.id).expect("template kept");
        assert_eq!(source, &template);
    }
}
