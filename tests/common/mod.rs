// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use git2::{Repository, RepositoryInitOptions, Signature};
use pkgsize::error::{Result, SizeError};
use pkgsize::model::SizeStore;
use pkgsize::repository::{Ancestry, CommandRunner, Vcs};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary git repository whose initial branch is `main`
pub fn create_test_repo() -> (TempDir, PathBuf, Repository) {
    let dir = TempDir::new().unwrap();
    let repo_path = dir.path().to_path_buf();
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(&repo_path, &opts).unwrap();

    // Configure git user for commits
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (dir, repo_path, repo)
}

/// Add files to the repository and commit on top of HEAD
pub fn add_commit(repo: &Repository, files: &[(&str, &[u8])], message: &str) -> git2::Oid {
    let sig = Signature::now("Test User", "test@example.com").unwrap();

    let mut index = repo.index().unwrap();

    for (path, content) in files {
        let full_path = repo.workdir().unwrap().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full_path, content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }

    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).unwrap()
}

/// Create `name` at HEAD and check it out
pub fn checkout_new_branch(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch(name, &head, false).unwrap();
    repo.set_head(&format!("refs/heads/{name}")).unwrap();
}

/// Point `refs/remotes/origin/main` at a commit
pub fn set_origin_main(repo: &Repository, oid: git2::Oid) {
    repo.reference("refs/remotes/origin/main", oid, true, "test").unwrap();
}

/// In-memory version control: fixed branch, HEAD, merge-bases and parent links
pub struct FakeVcs {
    pub branch: String,
    pub head: String,
    pub merge_bases: HashMap<(String, String), String>,
    pub parents: HashMap<String, String>,
    pub parent_queries: Cell<usize>,
}

impl FakeVcs {
    pub fn new(branch: &str, head: &str) -> Self {
        Self {
            branch: branch.to_string(),
            head: head.to_string(),
            merge_bases: HashMap::new(),
            parents: HashMap::new(),
            parent_queries: Cell::new(0),
        }
    }

    pub fn with_merge_base(mut self, branch: &str, reference: &str, base: &str) -> Self {
        self.merge_bases
            .insert((branch.to_string(), reference.to_string()), base.to_string());
        self
    }

    pub fn with_parent(mut self, child: &str, parent: &str) -> Self {
        self.parents.insert(child.to_string(), parent.to_string());
        self
    }
}

impl Ancestry for FakeVcs {
    fn parent(&self, commit: &str) -> Result<Option<String>> {
        self.parent_queries.set(self.parent_queries.get() + 1);
        Ok(self.parents.get(commit).cloned())
    }
}

impl Vcs for FakeVcs {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn head_commit(&self) -> Result<String> {
        Ok(self.head.clone())
    }

    fn merge_base(&self, branch: &str, reference: &str) -> Result<String> {
        self.merge_bases
            .get(&(branch.to_string(), reference.to_string()))
            .cloned()
            .ok_or_else(|| SizeError::ExternalCommand {
                command: format!("git merge-base {branch} {reference}"),
                status: "exit status: 1".to_string(),
                stderr: "no merge base".to_string(),
            })
    }
}

/// Answers known command lines with canned output and records every call
#[derive(Default)]
pub struct ScriptedRunner {
    pub outputs: HashMap<String, String>,
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, command: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs.insert(command.into(), output.into());
        self
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &str) -> Result<String> {
        self.calls.borrow_mut().push(command.to_string());
        self.outputs
            .get(command)
            .cloned()
            .ok_or_else(|| SizeError::ExternalCommand {
                command: command.to_string(),
                status: "exit status: 127".to_string(),
                stderr: "unexpected command".to_string(),
            })
    }
}

/// Directory holding empty package artifacts with the given file names
pub fn package_dir(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        std::fs::write(dir.path().join(name), b"package").unwrap();
    }
    dir
}

/// Size history shared by the comparison tests
pub fn package_sizes() -> SizeStore {
    serde_json::from_value(json!({
        "25": {
            "timestamp": 1700000000,
            "aarch64": {"datadog-agent": {"suse": 68000000, "rpm": 68000000}},
            "x86_64": {"datadog-iot-agent": {"rpm": 78000000}}
        },
        "12345": {
            "timestamp": 1700000100,
            "amd64": {"datadog-heroku-agent": {"deb": 70000000}}
        },
        "timestamp": 1700000200
    }))
    .unwrap()
}
