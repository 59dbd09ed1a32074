mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, RepoArgs, StoreArgs};
use pkgsize::analysis::{
    build_series, check, compare, flatten, CompareContext, CompareOptions, PackageDirs, SeriesRequest,
};
use pkgsize::config::load_thresholds;
use pkgsize::model::LookupPath;
use pkgsize::repository::{default_store_path, load_store, save_store, GitRepo, ShellRunner};
use pkgsize::util::{format_timestamp, now_unix};
use pkgsize::view::ConsoleSink;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compare { store, repo, arch, flavor, os, max_size } => {
            let path = LookupPath::new(arch, flavor, os);
            run_compare(&store, &repo, &path, max_size)
        }
        Command::Check { store, repo, thresholds, report } => {
            run_check(&store, &repo, thresholds.as_deref(), report.as_deref())
        }
        Command::List { store } => run_list(&store),
        Command::Metrics {
            flavor,
            os,
            package_path,
            major_version,
            git_ref,
            bucket_branch,
            arch,
            output,
        } => {
            let request = SeriesRequest {
                flavor: &flavor,
                os: &os,
                package_path: &package_path,
                major_version: &major_version,
                git_ref: &git_ref,
                bucket_branch: &bucket_branch,
                arch: &arch,
            };
            run_metrics(&request, output.as_deref())
        }
        Command::Prune { store, older_than_days } => run_prune(&store, older_than_days),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn store_path(args: &StoreArgs) -> Result<PathBuf> {
    match &args.store {
        Some(path) => Ok(path.clone()),
        None => default_store_path(),
    }
}

fn package_dirs(args: &RepoArgs) -> PackageDirs {
    PackageDirs {
        default: args.package_dir.clone(),
        suse: args.package_dir_suse.clone(),
    }
}

fn open_repo(args: &RepoArgs) -> Result<GitRepo> {
    GitRepo::discover(&args.repo)
        .with_context(|| format!("Could not open git repository at {}", args.repo.display()))
}

fn context<'a>(args: &RepoArgs, runner: &'a ShellRunner, repo: &'a GitRepo) -> CompareContext<'a> {
    let mut ctx = CompareContext::new(runner, repo, package_dirs(args));
    ctx.default_branch = args.default_branch.clone();
    ctx.reference_branch = args.reference_branch.clone();
    ctx
}

fn run_compare(store_args: &StoreArgs, repo_args: &RepoArgs, path: &LookupPath, max_size: u64) -> Result<()> {
    let store_path = store_path(store_args)?;
    let mut store = load_store(&store_path)?;
    let repo = open_repo(repo_args)?;
    let runner = ShellRunner;
    let ctx = context(repo_args, &runner, &repo);

    let options = CompareOptions { max_size, warning: repo_args.warn_on };
    let comparison = compare(&ctx, &mut store, path, options, &mut ConsoleSink)
        .with_context(|| format!("Could not compare {path}"))?;

    save_store(&store_path, &mut store)?;

    if let Some(row) = comparison.report_row {
        println!("{row}");
    }
    if comparison.verdict.status.is_failure() {
        bail!("{path} exceeds its size ceiling");
    }
    Ok(())
}

fn run_check(
    store_args: &StoreArgs,
    repo_args: &RepoArgs,
    thresholds: Option<&Path>,
    report: Option<&Path>,
) -> Result<()> {
    let store_path = store_path(store_args)?;
    let mut store = load_store(&store_path)?;
    let thresholds = load_thresholds(thresholds)?;
    let repo = open_repo(repo_args)?;
    let runner = ShellRunner;
    let ctx = context(repo_args, &runner, &repo);

    let outcome = check(&ctx, &mut store, &thresholds, repo_args.warn_on, &mut ConsoleSink);

    save_store(&store_path, &mut store)?;

    if let Some(table) = outcome.report() {
        match report {
            Some(file) => fs::write(file, table)
                .with_context(|| format!("Could not write report: {}", file.display()))?,
            None => println!("{table}"),
        }
    }

    if !outcome.passed() {
        bail!("{} of {} package(s) failed the size check", outcome.failures.len(), outcome.checked);
    }
    Ok(())
}

fn run_list(store_args: &StoreArgs) -> Result<()> {
    let store = load_store(&store_path(store_args)?)?;
    if let Some(ts) = store.generated_at() {
        eprintln!("Generated: {}", format_timestamp(ts));
    }
    for entry in flatten(store.as_map()) {
        println!("{} {}", entry.keys.join(" "), entry.value);
    }
    Ok(())
}

fn run_metrics(request: &SeriesRequest<'_>, output: Option<&Path>) -> Result<()> {
    let series = build_series(&ShellRunner, request)
        .with_context(|| format!("Could not measure {}", request.package_path.display()))?;
    let json = serde_json::to_string_pretty(&series)?;
    match output {
        Some(file) => fs::write(file, json)
            .with_context(|| format!("Could not write series: {}", file.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn run_prune(store_args: &StoreArgs, older_than_days: u32) -> Result<()> {
    let store_path = store_path(store_args)?;
    let mut store = load_store(&store_path)?;
    let cutoff = now_unix() - i64::from(older_than_days) * 24 * 60 * 60;
    let removed = store.prune_older_than(cutoff);
    save_store(&store_path, &mut store)?;
    eprintln!("Removed {} commit record(s) older than {}", removed, format_timestamp(cutoff));
    Ok(())
}
