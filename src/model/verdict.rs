use std::fmt;
use std::str::FromStr;

use super::LookupPath;
use crate::util::{format_delta_mb, format_mb};

/// Outcome of comparing a package against its ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warning,
    Error,
}

impl Status {
    pub fn emoji(self) -> &'static str {
        match self {
            Status::Ok => "✅",
            Status::Warning => "⚠️",
            Status::Error => "❌",
        }
    }

    /// Only ERROR blocks a release
    pub fn is_failure(self) -> bool {
        self == Status::Error
    }
}

/// When a gate-passing measurement is reported as WARNING instead of OK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarningTrigger {
    /// The package grew compared to its baseline
    #[default]
    Growth,
    /// Every passing measurement; for runs with reduced measurement confidence
    Always,
    Never,
}

impl FromStr for WarningTrigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "growth" => Ok(WarningTrigger::Growth),
            "always" => Ok(WarningTrigger::Always),
            "never" => Ok(WarningTrigger::Never),
            other => Err(format!("unknown warning trigger '{other}' (expected growth, always or never)")),
        }
    }
}

impl fmt::Display for WarningTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WarningTrigger::Growth => "growth",
            WarningTrigger::Always => "always",
            WarningTrigger::Never => "never",
        })
    }
}

/// A classified size comparison for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub path: LookupPath,
    pub current_size: u64,
    /// `None` when no ancestor recorded a size for this package
    pub previous_size: Option<u64>,
    pub max_size: u64,
    pub status: Status,
}

impl Verdict {
    /// Classify a measurement: the ceiling (inclusive) is the only gate
    pub fn classify(
        path: LookupPath,
        current_size: u64,
        previous_size: Option<u64>,
        max_size: u64,
        trigger: WarningTrigger,
    ) -> Self {
        let grew = previous_size.is_some_and(|prev| current_size > prev);
        let status = if current_size > max_size {
            Status::Error
        } else {
            match trigger {
                WarningTrigger::Growth if grew => Status::Warning,
                WarningTrigger::Always => Status::Warning,
                _ => Status::Ok,
            }
        };
        Self { path, current_size, previous_size, max_size, status }
    }

    /// Signed size change against the baseline, zero without one
    pub fn delta(&self) -> i128 {
        match self.previous_size {
            Some(prev) => i128::from(self.current_size) - i128::from(prev),
            None => 0,
        }
    }

    /// One-line human readable status
    pub fn message(&self) -> String {
        let outcome = if self.status.is_failure() { "too large" } else { "OK" };
        match self.previous_size {
            Some(prev) => format!(
                "{} size {} is {}: {} diff with previous {} (max: {})",
                self.path,
                format_mb(self.current_size),
                outcome,
                format_delta_mb(self.delta()),
                format_mb(prev),
                format_mb(self.max_size),
            ),
            None => format!(
                "{} size {} is {}: no previous size recorded (max: {})",
                self.path,
                format_mb(self.current_size),
                outcome,
                format_mb(self.max_size),
            ),
        }
    }

    /// Markdown table row for the pull request size report
    pub fn report_row(&self) -> String {
        let previous = self.previous_size.map(format_mb).unwrap_or_else(|| "n/a".to_string());
        format!(
            "|{}|{}|{}|{}|{}|{}|",
            self.path,
            format_delta_mb(self.delta()),
            self.status.emoji(),
            format_mb(self.current_size),
            previous,
            format_mb(self.max_size),
        )
    }
}
