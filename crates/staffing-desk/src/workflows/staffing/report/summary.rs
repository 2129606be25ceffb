use super::super::domain::{Job, JobStatus, StaffingError, WorkHistory, Worker};
use super::super::queries::{aggregate_worker_totals, order_independent_sum, WorkerTotals};
use super::super::store::StaffingStore;
use super::views::{
    AdminOverview, PaymentHistoryRow, PaymentReport, PaymentRow, RankingEntry, RecentJobEntry,
};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const RECENT_JOB_LIMIT: usize = 3;
const RANKING_LIMIT: usize = 3;

/// Calendar month filter written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    pub year: i32,
    pub month: u32,
}

impl ReportMonth {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for ReportMonth {
    type Err = StaffingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || StaffingError::InvalidField {
            field: "month",
            expected: "YYYY-MM month",
            value: raw.to_string(),
        };

        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str, width: usize| {
            part.len() == width && part.bytes().all(|byte| byte.is_ascii_digit())
        };
        if !digits(year, 4) || !digits(month, 2) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// `round(earnings / hours)`, or 0 when no hours were worked.
pub fn hourly_rate(totals: &WorkerTotals) -> u64 {
    if totals.total_hours > 0.0 {
        (totals.total_earnings / totals.total_hours).round().max(0.0) as u64
    } else {
        0
    }
}

/// Rounds to whole currency units and groups thousands: `¥144,000`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{symbol}{grouped}")
    } else {
        format!("{symbol}{grouped}")
    }
}

pub fn payment_report(
    workers: &[Worker],
    history: &[WorkHistory],
    month: Option<ReportMonth>,
) -> PaymentReport {
    let scoped: Vec<WorkHistory> = history
        .iter()
        .filter(|entry| month.map_or(true, |month| month.contains(entry.date)))
        .cloned()
        .collect();

    let rows: Vec<PaymentRow> = workers
        .iter()
        .map(|worker| {
            let totals = aggregate_worker_totals(&worker.id, &scoped);
            let work_days = scoped
                .iter()
                .filter(|entry| entry.worker_id == worker.id)
                .map(|entry| entry.date)
                .collect::<BTreeSet<_>>()
                .len();

            PaymentRow {
                worker_id: worker.id.clone(),
                worker_name: worker.name.clone(),
                level: worker.level,
                level_label: worker.level.label(),
                work_days,
                total_hours: totals.total_hours,
                total_earnings: totals.total_earnings,
                hourly_rate: hourly_rate(&totals),
            }
        })
        .collect();

    let history_rows = scoped
        .iter()
        .map(|entry| PaymentHistoryRow {
            history_id: entry.id.clone(),
            date: entry.date,
            worker_id: entry.worker_id.clone(),
            worker_name: workers
                .iter()
                .find(|worker| worker.id == entry.worker_id)
                .map(|worker| worker.name.clone()),
            job_title: entry.job_title.clone(),
            hours: entry.hours,
            earnings: entry.earnings,
            status: entry.status,
            status_label: entry.status.label(),
        })
        .collect();

    let totals = WorkerTotals {
        total_hours: order_independent_sum(rows.iter().map(|row| row.total_hours)),
        total_earnings: order_independent_sum(rows.iter().map(|row| row.total_earnings)),
    };

    PaymentReport {
        month: month.map(|month| month.to_string()),
        rows,
        history: history_rows,
        total_hours: totals.total_hours,
        total_earnings: totals.total_earnings,
        average_hourly_rate: hourly_rate(&totals),
    }
}

/// Workers ranked by hours from their work history, highest first. Ties keep
/// registration order.
pub fn worker_ranking(workers: &[Worker], history: &[WorkHistory], limit: usize) -> Vec<RankingEntry> {
    let mut ranked: Vec<(&Worker, WorkerTotals)> = workers
        .iter()
        .map(|worker| (worker, aggregate_worker_totals(&worker.id, history)))
        .collect();
    ranked.sort_by(|(_, left), (_, right)| right.total_hours.total_cmp(&left.total_hours));

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (worker, totals))| RankingEntry {
            rank: index + 1,
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
            total_hours: totals.total_hours,
            total_earnings: totals.total_earnings,
        })
        .collect()
}

fn recent_job(job: &Job) -> RecentJobEntry {
    RecentJobEntry {
        job_id: job.id.clone(),
        title: job.title.clone(),
        date: job.date,
        current_workers: job.current_workers,
        max_workers: job.max_workers,
        status: job.status,
        status_label: job.status.label(),
        badge: job.badge_variant(),
    }
}

pub fn admin_overview(store: &StaffingStore) -> AdminOverview {
    let count_status = |status: JobStatus| {
        store
            .jobs()
            .iter()
            .filter(|job| job.status == status)
            .count()
    };

    AdminOverview {
        total_workers: store.workers().len(),
        open_jobs: count_status(JobStatus::Open),
        completed_jobs: count_status(JobStatus::Completed),
        total_earnings: order_independent_sum(store.history().iter().map(|entry| entry.earnings)),
        recent_jobs: store
            .jobs()
            .iter()
            .take(RECENT_JOB_LIMIT)
            .map(recent_job)
            .collect(),
        top_workers: worker_ranking(store.workers(), store.history(), RANKING_LIMIT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::staffing::seed::demo_store;

    #[test]
    fn currency_is_rounded_and_grouped_at_display_time() {
        assert_eq!(format_currency(9600.0, "¥"), "¥9,600");
        assert_eq!(format_currency(1_234_567.5, "¥"), "¥1,234,568");
        assert_eq!(format_currency(999.4, "¥"), "¥999");
        assert_eq!(format_currency(0.0, "¥"), "¥0");
        assert_eq!(format_currency(-1500.0, "$"), "-$1,500");
    }

    #[test]
    fn month_parses_and_rejects_garbage() {
        let month: ReportMonth = "2026-01".parse().expect("valid month");
        assert_eq!(month, ReportMonth { year: 2026, month: 1 });
        assert_eq!(month.to_string(), "2026-01");
        assert!("2026-13".parse::<ReportMonth>().is_err());
        assert!("January".parse::<ReportMonth>().is_err());
        for loose in ["2026-1", "2026-001", "+2026-+1", "26-01", "2026-00", "２０２６-01"] {
            assert!(loose.parse::<ReportMonth>().is_err(), "{loose} accepted");
        }
    }

    #[test]
    fn hourly_rate_handles_zero_hours() {
        assert_eq!(hourly_rate(&WorkerTotals::default()), 0);
        let totals = WorkerTotals {
            total_hours: 8.5,
            total_earnings: 10_200.0,
        };
        assert_eq!(hourly_rate(&totals), 1200);
    }

    #[test]
    fn month_filter_scopes_rows_and_history() {
        let store = demo_store();
        let all = payment_report(store.workers(), store.history(), None);
        let january = payment_report(
            store.workers(),
            store.history(),
            Some(ReportMonth {
                year: 2026,
                month: 1,
            }),
        );

        assert_eq!(all.history.len(), store.history().len());
        assert!(january.history.len() < all.history.len());
        assert!(january.history.iter().all(|row| row.date.month() == 1));
        assert_eq!(january.month.as_deref(), Some("2026-01"));
        assert_eq!(all.rows.len(), store.workers().len());
    }

    #[test]
    fn ranking_uses_history_totals() {
        let store = demo_store();
        let overview = admin_overview(&store);

        assert_eq!(overview.total_workers, 5);
        assert_eq!(overview.open_jobs, 4);
        assert_eq!(overview.completed_jobs, 1);
        assert_eq!(overview.recent_jobs.len(), 3);
        assert_eq!(overview.top_workers.len(), 3);

        for entry in &overview.top_workers {
            let totals = aggregate_worker_totals(&entry.worker_id, store.history());
            assert_eq!(entry.total_hours, totals.total_hours);
            assert_eq!(entry.total_earnings, totals.total_earnings);
        }
        assert_eq!(overview.top_workers[0].worker_id.as_str(), "W002");
    }
}
