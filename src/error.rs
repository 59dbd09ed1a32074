//! Error taxonomy for size measurement and comparison

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while measuring, resolving or comparing package sizes
#[derive(Debug, Error)]
pub enum SizeError {
    #[error("{0} is not part of the accepted flavors")]
    UnknownFlavor(String),

    #[error("{0} is not a supported package format")]
    UnsupportedFormat(String),

    #[error("environment variable {0} is not set")]
    MissingPackageDir(&'static str),

    #[error("no package matching {pattern} in {}", .dir.display())]
    PackageNotFound { dir: PathBuf, pattern: String },

    #[error("could not parse a size out of `{command}` output: {output:?}")]
    Parse { command: String, output: String },

    #[error("no recorded size for {path} in the ancestry of {commit}")]
    NotFound { commit: String, path: String },

    #[error("`{command}` failed ({status}): {stderr}")]
    ExternalCommand {
        command: String,
        status: String,
        stderr: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Glob(#[from] globset::Error),
}

impl SizeError {
    /// True for errors raised before any measurement took place
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SizeError::UnknownFlavor(_)
                | SizeError::UnsupportedFormat(_)
                | SizeError::MissingPackageDir(_)
                | SizeError::PackageNotFound { .. }
        )
    }

    /// True when no baseline exists for the requested lookup path
    pub fn is_not_found(&self) -> bool {
        matches!(self, SizeError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, SizeError>;
