use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pkgsize::analysis::{DEFAULT_BRANCH, REFERENCE_BRANCH};
use pkgsize::model::{Flavor, PackageFormat, WarningTrigger};

#[derive(Parser, Debug)]
#[command(name = "pkgsize", version, about = "Track installer package size regressions")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Size store JSON file (defaults to the user cache directory)
    #[arg(long, env = "PKGSIZE_STORE")]
    pub store: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Path inside the git repository the packages were built from
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Branch whose runs record baselines without producing report rows
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub default_branch: String,

    /// Revision feature branches are compared against
    #[arg(long, default_value = REFERENCE_BRANCH)]
    pub reference_branch: String,

    /// Artifact directory for deb and rpm packages
    #[arg(long, env = "OMNIBUS_PACKAGE_DIR")]
    pub package_dir: Option<PathBuf>,

    /// Artifact directory for SUSE packages
    #[arg(long, env = "OMNIBUS_PACKAGE_DIR_SUSE")]
    pub package_dir_suse: Option<PathBuf>,

    /// When a passing package is reported as a warning: growth, always or never
    #[arg(long, default_value_t = WarningTrigger::Growth)]
    pub warn_on: WarningTrigger,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare one package against its baseline and record its size
    Compare {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        repo: RepoArgs,
        /// Package architecture, e.g. amd64 or aarch64
        #[arg(long)]
        arch: String,
        /// Package flavor, e.g. datadog-agent
        #[arg(long)]
        flavor: Flavor,
        /// Package OS family: deb, rpm or suse
        #[arg(long)]
        os: PackageFormat,
        /// Size ceiling in bytes
        #[arg(long)]
        max_size: u64,
    },
    /// Compare every configured package and print the report table
    Check {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        repo: RepoArgs,
        /// JSON threshold table replacing the built-in one
        #[arg(long)]
        thresholds: Option<PathBuf>,
        /// Write the report table to this file instead of stdout
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print every recorded size as a flat row
    List {
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Print package size series as JSON
    Metrics {
        #[arg(long)]
        flavor: String,
        /// OS family of the package: debian, centos or suse
        #[arg(long)]
        os: String,
        #[arg(long)]
        package_path: PathBuf,
        #[arg(long)]
        major_version: String,
        #[arg(long)]
        git_ref: String,
        #[arg(long)]
        bucket_branch: String,
        #[arg(long)]
        arch: String,
        /// Write the series to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Drop commit records older than the given number of days
    Prune {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long, default_value = "90")]
        older_than_days: u32,
    },
}
