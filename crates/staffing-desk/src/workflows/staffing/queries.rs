//! Read-side derivations shared by the admin and worker dashboards.
//!
//! Every function here is pure: it borrows the collections it filters and returns owned
//! results in input order.

use serde::Serialize;

use super::domain::{
    BadgeVariant, Job, JobStatus, Message, WorkHistory, Worker, WorkerId, WorkerLevel,
};

/// Open jobs the worker is allowed to see: visibility `全体` or the worker's own level.
pub fn visible_jobs_for(worker: &Worker, jobs: &[Job]) -> Vec<Job> {
    jobs.iter()
        .filter(|job| job.status == JobStatus::Open)
        .filter(|job| {
            job.visibility_level == WorkerLevel::All || job.visibility_level == worker.level
        })
        .cloned()
        .collect()
}

/// Jobs carrying any application from the worker, withdrawn and rejected ones included.
pub fn applied_jobs_for(worker_id: &WorkerId, jobs: &[Job]) -> Vec<Job> {
    jobs.iter()
        .filter(|job| job.has_application_from(worker_id))
        .cloned()
        .collect()
}

pub fn history_for(worker_id: &WorkerId, history: &[WorkHistory]) -> Vec<WorkHistory> {
    history
        .iter()
        .filter(|entry| &entry.worker_id == worker_id)
        .cloned()
        .collect()
}

pub fn unread_message_count(worker_id: &WorkerId, messages: &[Message]) -> usize {
    messages
        .iter()
        .filter(|message| !message.read && message.to.is_worker(worker_id))
        .count()
}

/// Inbox view for a worker: everything they sent or received.
pub fn messages_for(worker_id: &WorkerId, messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .filter(|message| message.to.is_worker(worker_id) || message.from.is_worker(worker_id))
        .cloned()
        .collect()
}

pub fn status_badge_variant(status: JobStatus) -> BadgeVariant {
    status.badge_variant()
}

/// Case-sensitive substring match on name or e-mail; an empty term matches everyone.
pub fn search_workers(workers: &[Worker], term: &str) -> Vec<Worker> {
    workers
        .iter()
        .filter(|worker| worker.name.contains(term) || worker.email.contains(term))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WorkerTotals {
    pub total_hours: f64,
    pub total_earnings: f64,
}

pub fn aggregate_worker_totals(worker_id: &WorkerId, history: &[WorkHistory]) -> WorkerTotals {
    let entries: Vec<&WorkHistory> = history
        .iter()
        .filter(|entry| &entry.worker_id == worker_id)
        .collect();

    WorkerTotals {
        total_hours: order_independent_sum(entries.iter().map(|entry| entry.hours)),
        total_earnings: order_independent_sum(entries.iter().map(|entry| entry.earnings)),
    }
}

/// Sums after sorting so any permutation of the input yields the same bits.
pub(crate) fn order_independent_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut values: Vec<f64> = values.into_iter().collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::staffing::domain::{HistoryId, JobId, WorkStatus};
    use chrono::NaiveDate;

    fn entry(id: &str, worker: &str, hours: f64, earnings: f64) -> WorkHistory {
        WorkHistory {
            id: HistoryId::from(id),
            job_id: JobId::from("J001"),
            worker_id: WorkerId::from(worker),
            job_title: "宴会サービス".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid date"),
            hours,
            earnings,
            status: WorkStatus::Completed,
        }
    }

    #[test]
    fn totals_sum_hours_and_earnings_for_one_worker() {
        let history = vec![
            entry("H1", "W1", 5.0, 6000.0),
            entry("H2", "W1", 3.0, 3600.0),
            entry("H3", "W2", 8.0, 9000.0),
        ];

        let totals = aggregate_worker_totals(&WorkerId::from("W1"), &history);

        assert_eq!(totals.total_hours, 8.0);
        assert_eq!(totals.total_earnings, 9600.0);
    }

    #[test]
    fn totals_ignore_input_order() {
        let history = vec![
            entry("H1", "W1", 0.1, 1000.37),
            entry("H2", "W1", 0.2, 1e16),
            entry("H3", "W1", 0.3, -1e16 + 2.0),
            entry("H4", "W1", 7.75, 0.01),
        ];
        let worker = WorkerId::from("W1");
        let baseline = aggregate_worker_totals(&worker, &history);

        let mut reversed = history.clone();
        reversed.reverse();
        let mut rotated = history.clone();
        rotated.rotate_left(2);

        for permutation in [reversed, rotated] {
            let totals = aggregate_worker_totals(&worker, &permutation);
            assert_eq!(totals.total_hours.to_bits(), baseline.total_hours.to_bits());
            assert_eq!(
                totals.total_earnings.to_bits(),
                baseline.total_earnings.to_bits()
            );
        }
    }

    #[test]
    fn totals_for_unknown_worker_are_zero() {
        let history = vec![entry("H1", "W1", 5.0, 6000.0)];
        let totals = aggregate_worker_totals(&WorkerId::from("W9"), &history);
        assert_eq!(totals, WorkerTotals::default());
    }

    #[test]
    fn history_keeps_input_order() {
        let history = vec![
            entry("H1", "W1", 1.0, 1.0),
            entry("H2", "W2", 1.0, 1.0),
            entry("H3", "W1", 1.0, 1.0),
        ];
        let ids: Vec<String> = history_for(&WorkerId::from("W1"), &history)
            .into_iter()
            .map(|entry| entry.id.0)
            .collect();
        assert_eq!(ids, vec!["H1", "H3"]);
    }
}
