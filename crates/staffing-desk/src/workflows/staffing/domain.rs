use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a registered worker (`W001`).
    WorkerId
);
string_id!(JobId);
string_id!(TemplateId);
string_id!(
    /// Unique within the owning job only.
    ApplicationId
);
string_id!(MessageId);
string_id!(HistoryId);

/// Tier tag shared by workers and job visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerLevel {
    #[serde(rename = "全体")]
    All,
    #[serde(rename = "お気に入り")]
    Favorite,
    #[serde(rename = "熟練者")]
    Expert,
    #[serde(rename = "中級者")]
    Intermediate,
    #[serde(rename = "初級者")]
    Beginner,
}

impl WorkerLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::All,
            Self::Favorite,
            Self::Expert,
            Self::Intermediate,
            Self::Beginner,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "全体",
            Self::Favorite => "お気に入り",
            Self::Expert => "熟練者",
            Self::Intermediate => "中級者",
            Self::Beginner => "初級者",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label() == raw.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[serde(rename = "募集中")]
    Open,
    #[serde(rename = "締切")]
    Closed,
    #[serde(rename = "完了")]
    Completed,
    #[serde(rename = "キャンセル")]
    Cancelled,
}

impl JobStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Open, Self::Closed, Self::Completed, Self::Cancelled]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "募集中",
            Self::Closed => "締切",
            Self::Completed => "完了",
            Self::Cancelled => "キャンセル",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == raw.trim())
    }

    pub const fn badge_variant(self) -> BadgeVariant {
        match self {
            Self::Open => BadgeVariant::Default,
            Self::Closed => BadgeVariant::Secondary,
            Self::Completed => BadgeVariant::Outline,
            Self::Cancelled => BadgeVariant::Destructive,
        }
    }
}

/// Colour semantics the dashboards attach to a job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
    Destructive,
}

impl BadgeVariant {
    /// Maps a raw status label; anything that is not a job status renders as `Default`.
    pub fn for_label(raw: &str) -> Self {
        JobStatus::from_label(raw)
            .map(JobStatus::badge_variant)
            .unwrap_or(Self::Default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "応募済み")]
    Applied,
    #[serde(rename = "承認")]
    Approved,
    #[serde(rename = "辞退")]
    Rejected,
    #[serde(rename = "キャンセル")]
    Cancelled,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "応募済み",
            Self::Approved => "承認",
            Self::Rejected => "辞退",
            Self::Cancelled => "キャンセル",
        }
    }

    /// Applications in these states block the same worker from applying again.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Applied | Self::Approved)
    }

    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Applied, Self::Approved | Self::Rejected) => true,
            (_, Self::Cancelled) => true,
            (Self::Applied, Self::Applied)
            | (Self::Approved, Self::Approved)
            | (Self::Rejected, Self::Rejected) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkStatus {
    #[serde(rename = "完了")]
    Completed,
    #[serde(rename = "未完了")]
    Incomplete,
}

impl WorkStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "完了",
            Self::Incomplete => "未完了",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionCode {
    #[serde(rename = "宴会")]
    Banquet,
    #[serde(rename = "朔風")]
    Sakufu,
    #[serde(rename = "グランカフェ")]
    GrandCafe,
    #[serde(rename = "ルーム掃除")]
    RoomCleaning,
    #[serde(rename = "調理補助")]
    KitchenAssistant,
    #[serde(rename = "フロント夜勤")]
    FrontDeskNight,
    #[serde(rename = "おせち")]
    Osechi,
    #[serde(rename = "フィエスタ ビアガーデン")]
    FiestaBeerGarden,
}

impl SectionCode {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Banquet,
            Self::Sakufu,
            Self::GrandCafe,
            Self::RoomCleaning,
            Self::KitchenAssistant,
            Self::FrontDeskNight,
            Self::Osechi,
            Self::FiestaBeerGarden,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Banquet => "宴会",
            Self::Sakufu => "朔風",
            Self::GrandCafe => "グランカフェ",
            Self::RoomCleaning => "ルーム掃除",
            Self::KitchenAssistant => "調理補助",
            Self::FrontDeskNight => "フロント夜勤",
            Self::Osechi => "おせち",
            Self::FiestaBeerGarden => "フィエスタ ビアガーデン",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|code| code.label() == raw.trim())
    }
}

/// Either side of a message: the administrator desk or a worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Participant {
    Admin,
    Worker(WorkerId),
}

impl Participant {
    pub const ADMIN_LABEL: &'static str = "admin";

    pub fn is_worker(&self, worker_id: &WorkerId) -> bool {
        matches!(self, Self::Worker(id) if id == worker_id)
    }
}

impl From<String> for Participant {
    fn from(value: String) -> Self {
        if value == Self::ADMIN_LABEL {
            Self::Admin
        } else {
            Self::Worker(WorkerId(value))
        }
    }
}

impl From<Participant> for String {
    fn from(value: Participant) -> Self {
        match value {
            Participant::Admin => Participant::ADMIN_LABEL.to_string(),
            Participant::Worker(id) => id.0,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str(Self::ADMIN_LABEL),
            Self::Worker(id) => f.write_str(id.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub level: WorkerLevel,
    pub group: String,
    pub total_hours: f64,
    pub total_earnings: f64,
    pub joined_date: NaiveDate,
}

/// Optional operational fields shared by templates and the jobs copied from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_code: Option<SectionCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precautions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workplace_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtime_allowance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_night_allowance: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTemplate {
    pub id: TemplateId,
    pub name: String,
    pub category: String,
    pub base_salary: u32,
    /// Minutes.
    pub break_time: u32,
    pub description: String,
    #[serde(default)]
    pub description_images: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: JobDetails,
}

/// Scheduling inputs supplied when a job is created from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSchedule {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub max_workers: u32,
    pub visibility_level: WorkerLevel,
}

impl JobTemplate {
    /// Copies the template fields into a fresh open job. The job keeps no link back
    /// beyond `template_id`.
    pub fn instantiate(&self, id: JobId, schedule: JobSchedule) -> Job {
        Job {
            id,
            template_id: Some(self.id.clone()),
            title: self.name.clone(),
            category: self.category.clone(),
            date: schedule.date,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            location: schedule.location,
            salary: self.base_salary,
            break_time: self.break_time,
            max_workers: schedule.max_workers,
            current_workers: 0,
            status: JobStatus::Open,
            visibility_level: schedule.visibility_level,
            description: self.description.clone(),
            description_images: self.description_images.clone(),
            applications: Vec::new(),
            details: self.details.clone(),
            implementation_date: None,
            application_deadline: None,
            recruitment_count: None,
            document_files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<TemplateId>,
    pub title: String,
    pub category: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    /// Hourly rate in yen.
    pub salary: u32,
    pub break_time: u32,
    pub max_workers: u32,
    pub current_workers: u32,
    pub status: JobStatus,
    pub visibility_level: WorkerLevel,
    pub description: String,
    #[serde(default)]
    pub description_images: Vec<String>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(flatten)]
    pub details: JobDetails,
    // Recorded for display only; nothing schedules off these two.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruitment_count: Option<u32>,
    #[serde(default)]
    pub document_files: Vec<String>,
}

impl Job {
    pub fn badge_variant(&self) -> BadgeVariant {
        self.status.badge_variant()
    }

    pub fn application(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|application| &application.id == id)
    }

    pub fn has_application_from(&self, worker_id: &WorkerId) -> bool {
        self.applications
            .iter()
            .any(|application| &application.worker_id == worker_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub from: Participant,
    pub to: Participant,
    pub subject: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHistory {
    pub id: HistoryId,
    pub job_id: JobId,
    pub worker_id: WorkerId,
    pub job_title: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub earnings: f64,
    pub status: WorkStatus,
}

/// Recoverable domain failures surfaced to the dashboards as notifications.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaffingError {
    #[error("worker {worker_id} already has an active application for job {job_id}")]
    AlreadyApplied { job_id: JobId, worker_id: WorkerId },
    #[error("application {application_id} not found on job {job_id}")]
    ApplicationNotFound {
        job_id: JobId,
        application_id: ApplicationId,
    },
    #[error("no active application from worker {worker_id} on job {job_id}")]
    NoActiveApplication { job_id: JobId, worker_id: WorkerId },
    #[error("worker {0} not found")]
    WorkerNotFound(WorkerId),
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("template {0} not found")]
    TemplateNotFound(TemplateId),
    #[error("application cannot move from {} to {}", from.label(), to.label())]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("worker {0} is still referenced by applications, messages, or work history")]
    WorkerReferenced(WorkerId),
    #[error("{field} must be a number (got '{value}')")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} is not a valid {expected} (got '{value}')")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl StaffingError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ApplicationNotFound { .. }
                | Self::NoActiveApplication { .. }
                | Self::WorkerNotFound(_)
                | Self::JobNotFound(_)
                | Self::TemplateNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_variant_mapping_is_fixed() {
        assert_eq!(JobStatus::Open.badge_variant(), BadgeVariant::Default);
        assert_eq!(JobStatus::Closed.badge_variant(), BadgeVariant::Secondary);
        assert_eq!(JobStatus::Completed.badge_variant(), BadgeVariant::Outline);
        assert_eq!(
            JobStatus::Cancelled.badge_variant(),
            BadgeVariant::Destructive
        );
        assert_eq!(BadgeVariant::for_label("締切"), BadgeVariant::Secondary);
        assert_eq!(BadgeVariant::for_label("保留"), BadgeVariant::Default);
    }

    #[test]
    fn statuses_serialize_as_japanese_labels() {
        let json = serde_json::to_string(&ApplicationStatus::Applied).expect("serializes");
        assert_eq!(json, "\"応募済み\"");
        let level: WorkerLevel = serde_json::from_str("\"中級者\"").expect("deserializes");
        assert_eq!(level, WorkerLevel::Intermediate);
        assert_eq!(
            SectionCode::from_label("フィエスタ ビアガーデン"),
            Some(SectionCode::FiestaBeerGarden)
        );
    }

    #[test]
    fn participant_round_trips_through_plain_strings() {
        let admin: Participant = serde_json::from_str("\"admin\"").expect("admin parses");
        assert_eq!(admin, Participant::Admin);
        let worker: Participant = serde_json::from_str("\"W002\"").expect("worker parses");
        assert!(worker.is_worker(&WorkerId::from("W002")));
        assert_eq!(
            serde_json::to_string(&worker).expect("serializes"),
            "\"W002\""
        );
    }

    #[test]
    fn application_transitions_follow_lifecycle() {
        use ApplicationStatus::*;
        assert!(Applied.can_transition_to(Approved));
        assert!(Applied.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Cancelled));
        assert!(Rejected.can_transition_to(Cancelled));
        assert!(Approved.can_transition_to(Approved));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Cancelled.can_transition_to(Applied));
        assert!(!Approved.can_transition_to(Rejected));
    }
}
