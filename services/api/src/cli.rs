use crate::demo::{run_demo, run_jobs, run_payments, DemoArgs, JobsArgs, PaymentsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use staffing_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "staffing-desk",
    version,
    about = "Staffing desk service: job board, applications, messaging, and payment reports"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Walk through the worker and admin dashboards against the demo dataset
    Demo(DemoArgs),
    /// Print the payment report, optionally writing it to CSV
    Payments(PaymentsArgs),
    /// List the jobs a worker can see and has applied to
    Jobs(JobsArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct ServeArgs {
    /// Override the configured host (defaults to APP_SERVER_HOST)
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port (defaults to APP_SERVER_PORT)
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Payments(args) => run_payments(args),
        Command::Jobs(args) => run_jobs(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["staffing-desk", "payments", "--month", "2025-12"])
            .expect("payments parses");
        match cli.command {
            Some(Command::Payments(args)) => {
                assert_eq!(args.month.map(|month| month.to_string()).as_deref(), Some("2025-12"));
                assert!(args.csv.is_none());
                assert!(args.history_csv.is_none());
            }
            other => panic!("expected payments, got {other:?}"),
        }

        assert!(Cli::try_parse_from(["staffing-desk", "payments", "--month", "2025-13"]).is_err());

        let cli = Cli::try_parse_from([
            "staffing-desk",
            "payments",
            "--history-csv",
            "history.csv",
        ])
        .expect("history flag parses");
        match cli.command {
            Some(Command::Payments(args)) => {
                assert_eq!(args.history_csv, Some(std::path::PathBuf::from("history.csv")));
            }
            other => panic!("expected payments, got {other:?}"),
        }

        let cli = Cli::try_parse_from(["staffing-desk"]).expect("bare invocation parses");
        assert!(cli.command.is_none());
    }
}
