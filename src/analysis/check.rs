//! Threshold table run
//!
//! Compares every configured package in turn. A package that cannot be
//! compared counts as a failure without stopping the run.

use tracing::error;

use crate::config::Threshold;
use crate::model::{LookupPath, SizeStore, WarningTrigger};
use crate::view::{render_report, StatusSink};

use super::compare::{compare, CompareContext, CompareOptions};

/// Why a package failed the check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// Measured above its ceiling
    TooLarge(LookupPath),
    /// Could not be measured or compared
    Failed { path: LookupPath, reason: String },
}

impl CheckFailure {
    pub fn path(&self) -> &LookupPath {
        match self {
            CheckFailure::TooLarge(path) | CheckFailure::Failed { path, .. } => path,
        }
    }
}

/// Outcome of a full threshold table run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub checked: usize,
    /// Report rows in table order; empty on the default branch
    pub rows: Vec<String>,
    pub failures: Vec<CheckFailure>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Markdown report, `None` when no package produced a row
    pub fn report(&self) -> Option<String> {
        (!self.rows.is_empty()).then(|| render_report(&self.rows))
    }
}

/// Compare every package of `thresholds` against its ceiling
pub fn check(
    ctx: &CompareContext<'_>,
    store: &mut SizeStore,
    thresholds: &[Threshold],
    warning: WarningTrigger,
    sink: &mut dyn StatusSink,
) -> CheckOutcome {
    let mut outcome = CheckOutcome { checked: thresholds.len(), ..Default::default() };

    for threshold in thresholds {
        let path = threshold.lookup_path();
        let options = CompareOptions { max_size: threshold.max_size, warning };
        match compare(ctx, store, &path, options, sink) {
            Ok(comparison) => {
                if comparison.verdict.status.is_failure() {
                    outcome.failures.push(CheckFailure::TooLarge(path));
                }
                outcome.rows.extend(comparison.report_row);
            }
            Err(e) => {
                error!(%path, error = %e, "comparison failed");
                outcome.failures.push(CheckFailure::Failed { path, reason: e.to_string() });
            }
        }
    }

    outcome
}
