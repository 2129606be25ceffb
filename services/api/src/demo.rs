use crate::infra::{parse_month, InMemoryStaffingRepository};
use chrono::Utc;
use clap::Args;
use staffing_desk::config::AppConfig;
use staffing_desk::error::AppError;
use staffing_desk::workflows::staffing::report::{
    format_currency, write_history_csv_to_path, write_payment_csv_to_path,
};
use staffing_desk::workflows::staffing::{
    demo_store, ApplicationStatus, JobStatus, PaymentReport, ReportMonth, Role, StaffingService,
    WorkerId,
};
use std::path::PathBuf;
use std::sync::Arc;

type DemoService = StaffingService<InMemoryStaffingRepository>;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Worker e-mail used for the worker sign-in.
    #[arg(long, default_value = "sato@example.com")]
    pub(crate) email: String,
    /// Skip the admin portion of the demo.
    #[arg(long)]
    pub(crate) skip_admin: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PaymentsArgs {
    /// Restrict the report to one month (YYYY-MM).
    #[arg(long, value_parser = parse_month)]
    pub(crate) month: Option<ReportMonth>,
    /// Write the per-worker rows to this CSV file.
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Write the work history detail rows to this CSV file.
    #[arg(long)]
    pub(crate) history_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct JobsArgs {
    /// Worker e-mail; the job board is filtered for that worker's level.
    #[arg(long, default_value = "tanaka@example.com")]
    pub(crate) email: String,
}

fn demo_service() -> DemoService {
    StaffingService::new(Arc::new(InMemoryStaffingRepository::new(demo_store())))
}

fn currency_symbol() -> Result<String, AppError> {
    Ok(AppConfig::load()?.desk.currency_symbol)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { email, skip_admin } = args;
    let symbol = currency_symbol()?;
    let service = demo_service();

    println!("Staffing desk demo");
    let session = service.login(Role::Worker, &email)?;
    let worker_id = WorkerId(session.user_id.clone());
    println!("\nSigned in as worker {} ({})", worker_id, email);

    let visible = service.visible_jobs(&worker_id)?;
    println!("\nOpen jobs for this worker");
    for job in &visible {
        println!(
            "- {} {} | {} {}-{} | {} | {}/{} staffed",
            job.id,
            job.title,
            job.date,
            job.start_time.format("%H:%M"),
            job.end_time.format("%H:%M"),
            format_currency(f64::from(job.salary), &symbol),
            job.current_workers,
            job.max_workers
        );
    }

    let target = visible.iter().find(|job| {
        !job.applications
            .iter()
            .any(|application| application.worker_id == worker_id && application.status.is_active())
    });
    match target {
        Some(job) => match service.apply(&job.id, &worker_id, Utc::now()) {
            Ok(_) => println!("\nApplied to {} ({})", job.id, job.title),
            Err(err) => println!("\nApplication rejected: {}", err),
        },
        None => println!("\nNo new jobs to apply to"),
    }

    println!("\nApplications");
    for job in service.applied_jobs(&worker_id)? {
        for application in job
            .applications
            .iter()
            .filter(|application| application.worker_id == worker_id)
        {
            println!("- {} {} | {}", job.id, job.title, application.status.label());
        }
    }

    let inbox = service.inbox(&worker_id)?;
    println!("\nInbox ({} unread)", inbox.unread_count);
    for message in &inbox.messages {
        let marker = if message.read { " " } else { "*" };
        println!(
            "{} {} {}: {}",
            marker,
            message.timestamp.format("%Y-%m-%d %H:%M"),
            message.from,
            message.subject
        );
    }

    let totals = service.worker_totals(&worker_id)?;
    println!(
        "\nWork totals: {:.1}h | {}",
        totals.total_hours,
        format_currency(totals.total_earnings, &symbol)
    );

    if skip_admin {
        return Ok(());
    }

    println!("\nAdmin dashboard");
    service.login(Role::Admin, "admin@example.com")?;
    let pending = service
        .snapshot()?
        .jobs()
        .iter()
        .filter(|job| job.status == JobStatus::Open)
        .flat_map(|job| job.applications.iter())
        .find(|application| application.status == ApplicationStatus::Applied)
        .cloned();
    if let Some(application) = pending {
        match service.set_application_status(
            &application.job_id,
            &application.id,
            ApplicationStatus::Approved,
            Utc::now(),
        ) {
            Ok(_) => println!(
                "- Approved {} for {} on {}",
                application.id, application.worker_name, application.job_id
            ),
            Err(err) => println!("- Approval failed: {}", err),
        }
    }

    let overview = service.overview()?;
    println!(
        "- {} workers | {} open jobs | {} completed | {} paid out",
        overview.total_workers,
        overview.open_jobs,
        overview.completed_jobs,
        format_currency(overview.total_earnings, &symbol)
    );
    println!("Recent jobs");
    for job in &overview.recent_jobs {
        println!(
            "  - {} {} | {} | {}",
            job.job_id, job.title, job.date, job.status_label
        );
    }
    println!("Top workers");
    for entry in &overview.top_workers {
        println!(
            "  {}. {} | {:.1}h | {}",
            entry.rank,
            entry.worker_name,
            entry.total_hours,
            format_currency(entry.total_earnings, &symbol)
        );
    }

    render_payment_report(&service.payment_report(None)?, &symbol);
    Ok(())
}

pub(crate) fn run_payments(args: PaymentsArgs) -> Result<(), AppError> {
    let PaymentsArgs {
        month,
        csv,
        history_csv,
    } = args;
    let symbol = currency_symbol()?;
    let report = demo_service().payment_report(month)?;

    render_payment_report(&report, &symbol);

    if let Some(path) = csv {
        write_payment_csv_to_path(&report, &path)?;
        println!("\nWrote {} rows to {}", report.rows.len(), path.display());
    }
    if let Some(path) = history_csv {
        write_history_csv_to_path(&report, &path)?;
        println!(
            "Wrote {} history rows to {}",
            report.history.len(),
            path.display()
        );
    }
    Ok(())
}

pub(crate) fn run_jobs(args: JobsArgs) -> Result<(), AppError> {
    let service = demo_service();
    let session = service.login(Role::Worker, &args.email)?;
    let worker_id = WorkerId(session.user_id);

    println!("Job board for {}", worker_id);
    let visible = service.visible_jobs(&worker_id)?;
    if visible.is_empty() {
        println!("- no open jobs at this level");
    }
    for job in &visible {
        println!(
            "- {} {} | {} | {} | {}",
            job.id,
            job.title,
            job.date,
            job.location,
            job.visibility_level.label()
        );
    }

    println!("\nApplied");
    for job in service.applied_jobs(&worker_id)? {
        println!("- {} {} | {}", job.id, job.title, job.status.label());
    }
    Ok(())
}

pub(crate) fn render_payment_report(report: &PaymentReport, symbol: &str) {
    match &report.month {
        Some(month) => println!("\nPayment report for {}", month),
        None => println!("\nPayment report (all periods)"),
    }

    if report.rows.is_empty() {
        println!("- no completed work recorded");
        return;
    }

    for row in &report.rows {
        println!(
            "- {} {} ({}) | {} days | {:.1}h | {} | {}/h",
            row.worker_id,
            row.worker_name,
            row.level_label,
            row.work_days,
            row.total_hours,
            format_currency(row.total_earnings, symbol),
            format_currency(row.hourly_rate as f64, symbol)
        );
    }
    println!(
        "Total: {:.1}h | {} | average {}/h",
        report.total_hours,
        format_currency(report.total_earnings, symbol),
        format_currency(report.average_hourly_rate as f64, symbol)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payments_command_writes_both_csv_files() {
        let dir = std::env::temp_dir();
        let csv = dir.join(format!("staffing-desk-cli-payments-{}.csv", std::process::id()));
        let history_csv = dir.join(format!("staffing-desk-cli-history-{}.csv", std::process::id()));

        run_payments(PaymentsArgs {
            month: Some(ReportMonth {
                year: 2025,
                month: 12,
            }),
            csv: Some(csv.clone()),
            history_csv: Some(history_csv.clone()),
        })
        .expect("payments command runs");

        let payments = std::fs::read_to_string(&csv).expect("payments written");
        let history = std::fs::read_to_string(&history_csv).expect("history written");
        std::fs::remove_file(&csv).ok();
        std::fs::remove_file(&history_csv).ok();

        assert!(payments.starts_with("ワーカーID,氏名"));
        assert_eq!(history.lines().count(), 2);
        assert!(history.contains("2025-12-24,W002,"));
    }
}
