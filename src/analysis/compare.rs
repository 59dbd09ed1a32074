//! Size regression gate
//!
//! Measures one package, finds its baseline in history, classifies the result
//! against a ceiling and records the new size at the current commit.

use globset::Glob;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Result, SizeError};
use crate::model::{LookupPath, PackageFormat, SizeStore, Verdict, WarningTrigger};
use crate::repository::{CommandRunner, Vcs};
use crate::util::now_unix;
use crate::view::{emit, StatusSink};

use super::extractor::uncompressed_size;
use super::history::resolve_previous;

pub const DEFAULT_BRANCH: &str = "main";
pub const REFERENCE_BRANCH: &str = "origin/main";

/// Artifact directories, one for SUSE packages and one for everything else
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDirs {
    pub default: Option<PathBuf>,
    pub suse: Option<PathBuf>,
}

impl PackageDirs {
    pub fn dir_for(&self, format: PackageFormat) -> Result<&Path> {
        let dir = match format {
            PackageFormat::Suse => &self.suse,
            PackageFormat::Deb | PackageFormat::Rpm => &self.default,
        };
        dir.as_deref()
            .ok_or(SizeError::MissingPackageDir(format.package_dir_var()))
    }
}

/// Collaborators and settings shared by every comparison in a run
pub struct CompareContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub vcs: &'a dyn Vcs,
    pub dirs: PackageDirs,
    pub default_branch: String,
    pub reference_branch: String,
}

impl<'a> CompareContext<'a> {
    pub fn new(runner: &'a dyn CommandRunner, vcs: &'a dyn Vcs, dirs: PackageDirs) -> Self {
        Self {
            runner,
            vcs,
            dirs,
            default_branch: DEFAULT_BRANCH.to_string(),
            reference_branch: REFERENCE_BRANCH.to_string(),
        }
    }
}

/// Per-package comparison settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    pub max_size: u64,
    pub warning: WarningTrigger,
}

impl CompareOptions {
    pub fn new(max_size: u64) -> Self {
        Self { max_size, warning: WarningTrigger::default() }
    }
}

/// Result of one comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub verdict: Verdict,
    /// Pull request report row; only produced off the default branch
    pub report_row: Option<String>,
}

/// Locate the package artifact for `path`; the first match by name wins
pub fn find_package(dirs: &PackageDirs, path: &LookupPath) -> Result<PathBuf> {
    let dir = dirs.dir_for(path.format)?;
    let pattern = path.format.artifact_pattern(path.flavor, &path.arch);
    let matcher = Glob::new(&pattern)?.compile_matcher();

    let mut matches: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| matcher.is_match(entry.file_name()))
        .map(|entry| entry.path())
        .collect();
    matches.sort();

    matches.into_iter().next().ok_or_else(|| SizeError::PackageNotFound {
        dir: dir.to_path_buf(),
        pattern,
    })
}

/// Compare the current package against its baseline and record its size
///
/// The size is always written at the current HEAD commit. On the default
/// branch the baseline is looked up from HEAD itself; elsewhere from the
/// merge-base with the reference branch.
pub fn compare(
    ctx: &CompareContext<'_>,
    store: &mut SizeStore,
    path: &LookupPath,
    options: CompareOptions,
    sink: &mut dyn StatusSink,
) -> Result<Comparison> {
    let package = find_package(&ctx.dirs, path)?;
    let current_size = uncompressed_size(ctx.runner, &package, path.format)?;

    let branch = ctx.vcs.current_branch()?;
    let head = ctx.vcs.head_commit()?;
    let on_default_branch = branch == ctx.default_branch;
    let lookup_commit = if on_default_branch {
        head.clone()
    } else {
        ctx.vcs.merge_base(&branch, &ctx.reference_branch)?
    };

    let previous_size = match resolve_previous(store, &lookup_commit, path, ctx.vcs) {
        Ok(size) => Some(size),
        Err(e) if e.is_not_found() => {
            warn!(%path, commit = %lookup_commit, "no baseline recorded, first measurement");
            None
        }
        Err(e) => return Err(e),
    };

    let verdict = Verdict::classify(path.clone(), current_size, previous_size, options.max_size, options.warning);

    store.record(&head, path, current_size, now_unix());
    info!(%path, commit = %head, size = current_size, "recorded package size");

    emit(sink, &verdict);

    let report_row = (!on_default_branch).then(|| verdict.report_row());
    Ok(Comparison { verdict, report_row })
}
