mod export;
mod summary;
pub mod views;

pub use export::{
    history_csv_string, payment_csv_string, write_history_csv, write_history_csv_to_path,
    write_payment_csv, write_payment_csv_to_path, ExportError,
};
pub use summary::{
    admin_overview, format_currency, hourly_rate, payment_report, worker_ranking, ReportMonth,
};
pub use views::{AdminOverview, PaymentReport};
