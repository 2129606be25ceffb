//! Raw form payloads from the admin screens and their strict conversion into entities.
//!
//! Numeric fields are rejected with [`StaffingError::InvalidNumber`] instead of being
//! coerced to zero. Blank optional fields become `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;

use super::domain::{
    Job, JobDetails, JobId, JobSchedule, JobStatus, JobTemplate, SectionCode, StaffingError,
    TemplateId, Worker, WorkerId, WorkerLevel,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetailsForm {
    pub working_hours: String,
    pub section_code: String,
    pub precautions: String,
    pub belongings: String,
    pub workplace_address: String,
    pub emergency_contact: String,
    pub overtime_allowance: String,
    pub late_night_allowance: String,
}

impl DetailsForm {
    fn parse(&self) -> Result<JobDetails, StaffingError> {
        let section_code = match non_blank(&self.section_code) {
            Some(raw) => Some(SectionCode::from_label(raw).ok_or_else(|| {
                StaffingError::InvalidField {
                    field: "section_code",
                    expected: "section code",
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        Ok(JobDetails {
            working_hours: non_blank(&self.working_hours).map(str::to_string),
            section_code,
            precautions: non_blank(&self.precautions).map(str::to_string),
            belongings: non_blank(&self.belongings).map(str::to_string),
            workplace_address: non_blank(&self.workplace_address).map(str::to_string),
            emergency_contact: non_blank(&self.emergency_contact).map(str::to_string),
            overtime_allowance: parse_optional_u32("overtime_allowance", &self.overtime_allowance)?,
            late_night_allowance: parse_optional_u32(
                "late_night_allowance",
                &self.late_night_allowance,
            )?,
        })
    }
}

/// Job editor payload. Every value arrives as the text the admin typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobForm {
    pub title: String,
    pub category: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub salary: String,
    pub break_time: String,
    pub max_workers: String,
    pub visibility_level: String,
    pub description: String,
    pub description_images: Vec<String>,
    pub implementation_date: String,
    pub application_deadline: String,
    pub recruitment_count: String,
    pub document_files: Vec<String>,
    #[serde(flatten)]
    pub details: DetailsForm,
}

impl JobForm {
    /// Builds the job. When `existing` is given its id, template link, status, worker
    /// count, and applications carry over.
    pub fn into_job(self, id: JobId, existing: Option<&Job>) -> Result<Job, StaffingError> {
        let visibility_level = parse_visibility(&self.visibility_level)?;

        Ok(Job {
            id: existing.map(|job| job.id.clone()).unwrap_or(id),
            template_id: existing.and_then(|job| job.template_id.clone()),
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            date: parse_date("date", &self.date)?,
            start_time: parse_time("start_time", &self.start_time)?,
            end_time: parse_time("end_time", &self.end_time)?,
            location: self.location.trim().to_string(),
            salary: parse_u32("salary", &self.salary)?,
            break_time: parse_u32("break_time", &self.break_time)?,
            max_workers: parse_u32("max_workers", &self.max_workers)?,
            current_workers: existing.map(|job| job.current_workers).unwrap_or(0),
            status: existing.map(|job| job.status).unwrap_or(JobStatus::Open),
            visibility_level,
            description: self.description,
            description_images: self.description_images,
            applications: existing
                .map(|job| job.applications.clone())
                .unwrap_or_default(),
            details: self.details.parse()?,
            implementation_date: parse_optional_datetime(
                "implementation_date",
                &self.implementation_date,
            )?,
            application_deadline: parse_optional_datetime(
                "application_deadline",
                &self.application_deadline,
            )?,
            recruitment_count: parse_optional_u32("recruitment_count", &self.recruitment_count)?,
            document_files: self.document_files,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobTemplateForm {
    pub name: String,
    pub category: String,
    pub base_salary: String,
    pub break_time: String,
    pub description: String,
    pub description_images: Vec<String>,
    #[serde(flatten)]
    pub details: DetailsForm,
}

impl JobTemplateForm {
    pub fn into_template(
        self,
        id: TemplateId,
        existing: Option<&JobTemplate>,
        now: DateTime<Utc>,
    ) -> Result<JobTemplate, StaffingError> {
        Ok(JobTemplate {
            id: existing.map(|template| template.id.clone()).unwrap_or(id),
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            base_salary: parse_u32("base_salary", &self.base_salary)?,
            break_time: parse_u32("break_time", &self.break_time)?,
            description: self.description,
            description_images: self.description_images,
            created_at: existing.map(|template| template.created_at).unwrap_or(now),
            details: self.details.parse()?,
        })
    }
}

/// Per-date inputs for creating a job from a template.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleForm {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub max_workers: String,
    pub visibility_level: String,
}

impl ScheduleForm {
    pub fn parse(&self) -> Result<JobSchedule, StaffingError> {
        Ok(JobSchedule {
            date: parse_date("date", &self.date)?,
            start_time: parse_time("start_time", &self.start_time)?,
            end_time: parse_time("end_time", &self.end_time)?,
            location: self.location.trim().to_string(),
            max_workers: parse_u32("max_workers", &self.max_workers)?,
            visibility_level: parse_visibility(&self.visibility_level)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub level: String,
    pub group: String,
}

impl WorkerForm {
    pub fn into_worker(self, id: WorkerId, joined: NaiveDate) -> Result<Worker, StaffingError> {
        let level = match non_blank(&self.level) {
            Some(raw) => WorkerLevel::from_label(raw).ok_or_else(|| StaffingError::InvalidField {
                field: "level",
                expected: "worker level",
                value: raw.to_string(),
            })?,
            None => WorkerLevel::Beginner,
        };

        Ok(Worker {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            level,
            group: self.group.trim().to_string(),
            total_hours: 0.0,
            total_earnings: 0.0,
            joined_date: joined,
        })
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_visibility(raw: &str) -> Result<WorkerLevel, StaffingError> {
    match non_blank(raw) {
        Some(value) => WorkerLevel::from_label(value).ok_or_else(|| StaffingError::InvalidField {
            field: "visibility_level",
            expected: "worker level",
            value: value.to_string(),
        }),
        None => Ok(WorkerLevel::All),
    }
}

fn parse_u32(field: &'static str, raw: &str) -> Result<u32, StaffingError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| StaffingError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_optional_u32(field: &'static str, raw: &str) -> Result<Option<u32>, StaffingError> {
    non_blank(raw).map(|value| parse_u32(field, value)).transpose()
}

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, StaffingError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| StaffingError::InvalidField {
        field,
        expected: "YYYY-MM-DD date",
        value: raw.to_string(),
    })
}

fn parse_time(field: &'static str, raw: &str) -> Result<NaiveTime, StaffingError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| StaffingError::InvalidField {
            field,
            expected: "HH:MM time",
            value: raw.to_string(),
        })
}

fn parse_optional_datetime(
    field: &'static str,
    raw: &str,
) -> Result<Option<NaiveDateTime>, StaffingError> {
    non_blank(raw)
        .map(|value| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").map_err(|_| {
                StaffingError::InvalidField {
                    field,
                    expected: "YYYY-MM-DDTHH:MM timestamp",
                    value: raw.to_string(),
                }
            })
        })
        .transpose()
}
