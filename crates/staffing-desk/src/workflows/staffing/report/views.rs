use super::super::domain::{
    BadgeVariant, HistoryId, JobId, JobStatus, WorkStatus, WorkerId, WorkerLevel,
};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PaymentRow {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub level: WorkerLevel,
    pub level_label: &'static str,
    pub work_days: usize,
    pub total_hours: f64,
    pub total_earnings: f64,
    pub hourly_rate: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentHistoryRow {
    pub history_id: HistoryId,
    pub date: NaiveDate,
    pub worker_id: WorkerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_name: Option<String>,
    pub job_title: String,
    pub hours: f64,
    pub earnings: f64,
    pub status: WorkStatus,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub rows: Vec<PaymentRow>,
    pub history: Vec<PaymentHistoryRow>,
    pub total_hours: f64,
    pub total_earnings: f64,
    pub average_hourly_rate: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentJobEntry {
    pub job_id: JobId,
    pub title: String,
    pub date: NaiveDate,
    pub current_workers: u32,
    pub max_workers: u32,
    pub status: JobStatus,
    pub status_label: &'static str,
    pub badge: BadgeVariant,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub total_hours: f64,
    pub total_earnings: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminOverview {
    pub total_workers: usize,
    pub open_jobs: usize,
    pub completed_jobs: usize,
    pub total_earnings: f64,
    pub recent_jobs: Vec<RecentJobEntry>,
    pub top_workers: Vec<RankingEntry>,
}
