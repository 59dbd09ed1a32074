//! Package size telemetry
//!
//! Independent of the regression gate: never reads or writes the size store.

use std::path::Path;
use tempfile::TempDir;
use tracing::debug;

use crate::error::Result;
use crate::model::{Flavor, MetricSeries, PackageFormat};
use crate::repository::CommandRunner;
use crate::util::now_unix;

use super::extractor::{directory_size, extract_package, file_size, measure_binaries};

pub const COMPRESSED_PACKAGE_METRIC: &str = "datadog.agent.compressed_package.size";
pub const PACKAGE_METRIC: &str = "datadog.agent.package.size";
pub const BINARY_METRIC: &str = "datadog.agent.binary.size";

/// Identity of the package build being reported
#[derive(Debug, Clone, Copy)]
pub struct SeriesRequest<'a> {
    pub flavor: &'a str,
    pub os: &'a str,
    pub package_path: &'a Path,
    pub major_version: &'a str,
    pub git_ref: &'a str,
    pub bucket_branch: &'a str,
    pub arch: &'a str,
}

/// Build size series for a package: compressed, extracted and per-binary
///
/// The package is unpacked into a temporary directory that is removed on
/// every exit path.
pub fn build_series(runner: &dyn CommandRunner, request: &SeriesRequest<'_>) -> Result<Vec<MetricSeries>> {
    let flavor: Flavor = request.flavor.parse()?;
    let format: PackageFormat = request.os.parse()?;

    let extract_dir = TempDir::new()?;
    extract_package(runner, format, request.package_path, extract_dir.path())?;

    let compressed = file_size(request.package_path)?;
    let uncompressed = directory_size(extract_dir.path())?;
    let binaries = measure_binaries(flavor, extract_dir.path())?;
    debug!(%flavor, compressed, uncompressed, binaries = binaries.len(), "measured package");

    let timestamp = now_unix();
    let tags = vec![
        format!("os:{}", request.os),
        format!("package:{}", flavor.package_name()),
        format!("agent:{}", request.major_version),
        format!("git_ref:{}", request.git_ref),
        format!("bucket_branch:{}", request.bucket_branch),
        format!("arch:{}", request.arch),
    ];

    let mut series = vec![
        MetricSeries::gauge(COMPRESSED_PACKAGE_METRIC, timestamp, compressed as f64, tags.clone()),
        MetricSeries::gauge(PACKAGE_METRIC, timestamp, uncompressed as f64, tags.clone()),
    ];
    series.extend(binaries.into_iter().map(|binary| {
        let mut binary_tags = tags.clone();
        binary_tags.push(format!("bin:{}", binary.name));
        MetricSeries::gauge(BINARY_METRIC, timestamp, binary.bytes as f64, binary_tags)
    }));

    Ok(series)
}
