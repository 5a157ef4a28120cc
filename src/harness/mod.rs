//! Self-test cases for the CRUD operations.
//!
//! [`dry_run_cases`] check the rendered SQL against a [`RecordingExecutor`]; [`live_cases`]
//! run the same operations against a real server and check what comes back.
//!
//! [`RecordingExecutor`]: crate::executor::RecordingExecutor

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::MysqlInterfaceError;
use crate::executor::SqlExecutor;
use crate::interface::MysqlInterface;

mod cases;

pub use cases::{create_table_sql, dry_run_cases, live_cases};

pub type CaseFuture<'a> = Pin<Box<dyn Future<Output = Result<Check, MysqlInterfaceError>> + 'a>>;
pub type CaseBody<E> = for<'a> fn(&'a mut MysqlInterface<E>, &'a Fixture) -> CaseFuture<'a>;

/// Which table the cases work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub database: String,
    pub table: String,
    /// Auto-increment key column
    pub id_column: String,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            database: "db".to_string(),
            table: "fruits".to_string(),
            id_column: "fruitsId".to_string(),
        }
    }
}

/// Verdict of a case body that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Pass,
    Fail(String),
}

impl Check {
    /// Pass when `actual == expected`, otherwise fail showing both.
    pub fn equal<T: PartialEq + fmt::Debug>(actual: T, expected: T) -> Self {
        if actual == expected {
            Check::Pass
        } else {
            Check::Fail(format!("expected {expected:?}, got {actual:?}"))
        }
    }

    pub fn that(condition: bool, detail: impl Into<String>) -> Self {
        if condition {
            Check::Pass
        } else {
            Check::Fail(detail.into())
        }
    }
}

pub struct TestCase<E: SqlExecutor> {
    pub name: &'static str,
    pub run: bool,
    body: CaseBody<E>,
}

impl<E: SqlExecutor> TestCase<E> {
    #[must_use]
    pub fn new(name: &'static str, body: CaseBody<E>) -> Self {
        Self {
            name,
            run: true,
            body,
        }
    }

    /// Keep the case listed but do not run it.
    #[must_use]
    pub fn skipped(mut self) -> Self {
        self.run = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub name: String,
    pub status: CaseStatus,
}

impl fmt::Display for CaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            CaseStatus::Passed => write!(f, "PASS {}", self.name),
            CaseStatus::Failed(detail) => write!(f, "FAIL {}: {detail}", self.name),
            CaseStatus::Skipped => write!(f, "SKIP {}", self.name),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub results: Vec<CaseResult>,
}

impl Report {
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Passed))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Failed(_)))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Skipped))
    }

    /// Skipped cases do not count against the run.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }

    fn count(&self, pred: impl Fn(&CaseStatus) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.status)).count()
    }
}

/// Run every enabled case in order, each between its own `connect` and `close`.
pub async fn run_cases<E: SqlExecutor>(
    db: &mut MysqlInterface<E>,
    fixture: &Fixture,
    cases: &[TestCase<E>],
) -> Report {
    let mut report = Report::default();

    for case in cases {
        let status = if case.run {
            run_one(db, fixture, case).await
        } else {
            CaseStatus::Skipped
        };

        match &status {
            CaseStatus::Failed(detail) => {
                tracing::warn!(case = case.name, %detail, "self-test case failed");
            }
            _ => tracing::info!(case = case.name, ?status, "self-test case finished"),
        }

        report.results.push(CaseResult {
            name: case.name.to_string(),
            status,
        });
    }

    report
}

async fn run_one<E: SqlExecutor>(
    db: &mut MysqlInterface<E>,
    fixture: &Fixture,
    case: &TestCase<E>,
) -> CaseStatus {
    if let Err(err) = db.connect().await {
        return CaseStatus::Failed(format!("connect: {err}"));
    }

    let outcome = (case.body)(db, fixture).await;
    let closed = db.close().await;

    match (outcome, closed) {
        (Ok(Check::Pass), Ok(())) => CaseStatus::Passed,
        (Ok(Check::Fail(detail)), _) => CaseStatus::Failed(detail),
        (Err(err), _) => CaseStatus::Failed(err.to_string()),
        (Ok(Check::Pass), Err(err)) => CaseStatus::Failed(format!("close: {err}")),
    }
}
