//! Temporary-staffing desk: workers, jobs built from templates, applications,
//! admin/worker messaging, and payment reporting over work history.

pub mod conversations;
pub mod domain;
pub mod forms;
pub mod lifecycle;
pub mod queries;
pub mod report;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use conversations::{Conversation, MessageDraft};
pub use domain::{
    Application, ApplicationId, ApplicationStatus, BadgeVariant, HistoryId, Job, JobDetails,
    JobId, JobSchedule, JobStatus, JobTemplate, Message, MessageId, Participant, SectionCode,
    StaffingError, TemplateId, WorkHistory, WorkStatus, Worker, WorkerId, WorkerLevel,
};
pub use forms::{DetailsForm, JobForm, JobTemplateForm, ScheduleForm, WorkerForm};
pub use lifecycle::ApplicationRequest;
pub use queries::WorkerTotals;
pub use report::{AdminOverview, ExportError, PaymentReport, ReportMonth};
pub use repository::{RepositoryError, StaffingRepository};
pub use router::staffing_router;
pub use seed::demo_store;
pub use service::{Inbox, JobListing, StaffingService, StaffingServiceError};
pub use session::{Role, Session};
pub use store::StaffingStore;
