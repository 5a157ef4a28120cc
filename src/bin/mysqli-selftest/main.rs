mod args;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use mysql_interface::harness::{
    Fixture, Report, create_table_sql, dry_run_cases, live_cases, run_cases,
};
use mysql_interface::prelude::*;
use tracing::Level;

use crate::args::{Args, Mode};
use crate::logging::LogWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let writer = LogWriter::new(args.log.clone()).unwrap_or_else(|err| {
        eprintln!("failed to open log file: {err}");
        std::process::exit(1);
    });

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let fixture = args.fixture();
    let report = match args.mode {
        Mode::DryRun => {
            let mut db = MysqlInterface::with_executor(RecordingExecutor::new());
            run_cases(&mut db, &fixture, &dry_run_cases()).await
        }
        Mode::Live => match live(&args, &fixture).await {
            Ok(report) => report,
            Err(err) => {
                tracing::error!(%err, "live self-test could not start");
                return ExitCode::FAILURE;
            }
        },
    };

    for result in &report.results {
        println!("{result}");
    }
    println!("{}", report.summary());

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn live(args: &Args, fixture: &Fixture) -> Result<Report, MysqlInterfaceError> {
    let mut db = MysqlInterface::new(args.options().build()?)?;
    if args.create_table {
        db.query(&create_table_sql(fixture)).await?;
        db.close().await?;
    }
    Ok(run_cases(&mut db, fixture, &live_cases()).await)
}
