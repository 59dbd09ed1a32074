//! Package size analysis
//!
//! - **extractor**: compressed, installed and per-binary sizes
//! - **flatten**: nested size tree to rows
//! - **history**: baseline lookup through commit ancestry
//! - **compare**: regression gate and store write-back
//! - **check**: the gate over a whole threshold table
//! - **metrics**: telemetry series for the monitoring backend

mod check;
mod compare;
mod extractor;
mod flatten;
mod history;
mod metrics;

pub use check::{check, CheckFailure, CheckOutcome};
pub use compare::{
    compare, find_package, CompareContext, CompareOptions, Comparison, PackageDirs, DEFAULT_BRANCH,
    REFERENCE_BRANCH,
};
pub use extractor::{
    directory_size, extract_package, file_size, measure, measure_binaries, uncompressed_size, BinarySize,
    PackageSizes,
};
pub use flatten::{flatten, FlatEntry};
pub use history::resolve_previous;
pub use metrics::{build_series, SeriesRequest, BINARY_METRIC, COMPRESSED_PACKAGE_METRIC, PACKAGE_METRIC};
