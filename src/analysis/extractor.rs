//! Package size extraction
//!
//! Compressed size is the artifact's length on disk. Uncompressed size comes
//! either from the packaging tool's metadata (`uncompressed_size`) or from the
//! extracted tree on disk (`directory_size`).

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SizeError};
use crate::model::{Flavor, PackageFormat};
use crate::repository::CommandRunner;

/// Sizes of a package artifact, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageSizes {
    pub compressed_bytes: u64,
    pub uncompressed_bytes: u64,
}

/// On-disk size of one binary inside an extracted package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySize {
    pub name: &'static str,
    pub bytes: u64,
}

/// Measure compressed and installed size of a package artifact
pub fn measure(runner: &dyn CommandRunner, package: &Path, format: PackageFormat) -> Result<PackageSizes> {
    let compressed_bytes = file_size(package)?;
    let uncompressed_bytes = uncompressed_size(runner, package, format)?;
    Ok(PackageSizes { compressed_bytes, uncompressed_bytes })
}

/// Installed size as reported by the packaging tool, normalized to bytes
pub fn uncompressed_size(runner: &dyn CommandRunner, package: &Path, format: PackageFormat) -> Result<u64> {
    let command = format.inspect_command(package);
    let output = runner.run(&command)?;
    let raw = parse_size(&command, &output)?;
    let bytes = format.to_bytes(raw).ok_or_else(|| SizeError::Parse {
        command: command.clone(),
        output: output.clone(),
    })?;
    debug!(package = %package.display(), %format, bytes, "installed size");
    Ok(bytes)
}

/// Parse the first line of a command's output as an integer
fn parse_size(command: &str, output: &str) -> Result<u64> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.parse::<u64>().ok())
        .ok_or_else(|| SizeError::Parse {
            command: command.to_string(),
            output: output.to_string(),
        })
}

pub fn file_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)?.len())
}

/// Total size of regular files under `dir`; symlinks are not followed
pub fn directory_size(dir: &Path) -> Result<u64> {
    let mut total = 0;
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            total += entry.metadata().map_err(io::Error::from)?.len();
        }
    }
    Ok(total)
}

/// Unpack a package into `dir` with the format's native tooling
pub fn extract_package(runner: &dyn CommandRunner, format: PackageFormat, package: &Path, dir: &Path) -> Result<()> {
    runner.run(&format.extract_command(package, dir))?;
    Ok(())
}

/// Sizes of the flavor's scanned binaries under an extraction root, in set order
pub fn measure_binaries(flavor: Flavor, root: &Path) -> Result<Vec<BinarySize>> {
    flavor
        .binaries()
        .iter()
        .map(|binary| -> Result<BinarySize> {
            let bytes = file_size(&root.join(binary.path))?;
            Ok(BinarySize { name: binary.name, bytes })
        })
        .collect()
}
