use super::views::PaymentReport;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Encoding(std::string::FromUtf8Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "failed to write payment export: {}", err),
            ExportError::Csv(err) => write!(f, "could not encode payment CSV: {}", err),
            ExportError::Encoding(err) => write!(f, "payment CSV is not valid UTF-8: {}", err),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            ExportError::Csv(err) => Some(err),
            ExportError::Encoding(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<std::string::FromUtf8Error> for ExportError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Encoding(err)
    }
}

#[derive(Serialize)]
struct PaymentCsvRow<'a> {
    #[serde(rename = "ワーカーID")]
    worker_id: &'a str,
    #[serde(rename = "氏名")]
    worker_name: &'a str,
    #[serde(rename = "レベル")]
    level: &'static str,
    #[serde(rename = "勤務日数")]
    work_days: usize,
    #[serde(rename = "総勤務時間")]
    total_hours: f64,
    #[serde(rename = "総報酬")]
    total_earnings: i64,
    #[serde(rename = "平均時給")]
    hourly_rate: u64,
}

#[derive(Serialize)]
struct HistoryCsvRow<'a> {
    #[serde(rename = "日付")]
    date: String,
    #[serde(rename = "ワーカーID")]
    worker_id: &'a str,
    #[serde(rename = "ワーカー名")]
    worker_name: &'a str,
    #[serde(rename = "案件名")]
    job_title: &'a str,
    #[serde(rename = "勤務時間")]
    hours: f64,
    #[serde(rename = "報酬")]
    earnings: i64,
    #[serde(rename = "ステータス")]
    status: &'static str,
}

/// One row per worker. Earnings are rounded to whole currency units.
pub fn write_payment_csv<W: Write>(report: &PaymentReport, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &report.rows {
        csv_writer.serialize(PaymentCsvRow {
            worker_id: row.worker_id.as_str(),
            worker_name: &row.worker_name,
            level: row.level_label,
            work_days: row.work_days,
            total_hours: row.total_hours,
            total_earnings: row.total_earnings.round() as i64,
            hourly_rate: row.hourly_rate,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Detail rows in history order; unknown workers export with a blank name.
pub fn write_history_csv<W: Write>(report: &PaymentReport, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &report.history {
        csv_writer.serialize(HistoryCsvRow {
            date: row.date.format("%Y-%m-%d").to_string(),
            worker_id: row.worker_id.as_str(),
            worker_name: row.worker_name.as_deref().unwrap_or_default(),
            job_title: &row.job_title,
            hours: row.hours,
            earnings: row.earnings.round() as i64,
            status: row.status_label,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn payment_csv_string(report: &PaymentReport) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_payment_csv(report, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn history_csv_string(report: &PaymentReport) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_history_csv(report, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn write_payment_csv_to_path<P: AsRef<Path>>(
    report: &PaymentReport,
    path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_payment_csv(report, file)
}

pub fn write_history_csv_to_path<P: AsRef<Path>>(
    report: &PaymentReport,
    path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_history_csv(report, file)
}
