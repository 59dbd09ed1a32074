use git2::{ErrorCode, Oid, Repository};
use std::path::Path;
use tracing::debug;

use crate::error::Result;

/// Steps backwards through commit history one parent at a time
pub trait Ancestry {
    /// First parent of `commit`, or `None` at a root or an unknown commit
    fn parent(&self, commit: &str) -> Result<Option<String>>;
}

/// Version control queries needed to pick a comparison baseline
pub trait Vcs: Ancestry {
    /// Short name of the checked out branch ("HEAD" when detached)
    fn current_branch(&self) -> Result<String>;

    /// Hash of the checked out commit
    fn head_commit(&self) -> Result<String>;

    /// Most recent common ancestor of two revisions
    fn merge_base(&self, branch: &str, reference: &str) -> Result<String>;
}

/// git2-backed repository access
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the repository containing `path`
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Self { repo })
    }

    fn resolve(&self, rev: &str) -> Result<Oid> {
        Ok(self.repo.revparse_single(rev)?.peel_to_commit()?.id())
    }
}

impl Ancestry for GitRepo {
    fn parent(&self, commit: &str) -> Result<Option<String>> {
        let Ok(oid) = Oid::from_str(commit) else {
            return Ok(None);
        };
        let commit = match self.repo.find_commit(oid) {
            Ok(c) => c,
            // Shallow clones stop here
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if commit.parent_count() == 0 {
            return Ok(None);
        }
        let parent = commit.parent_id(0)?.to_string();
        debug!(commit = %oid, %parent, "stepped to parent");
        Ok(Some(parent))
    }
}

impl Vcs for GitRepo {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Ok("HEAD".to_string());
        }
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    fn head_commit(&self) -> Result<String> {
        Ok(self.repo.head()?.peel_to_commit()?.id().to_string())
    }

    fn merge_base(&self, branch: &str, reference: &str) -> Result<String> {
        let ours = self.resolve(branch)?;
        let theirs = self.resolve(reference)?;
        let base = self.repo.merge_base(ours, theirs)?;
        debug!(branch, reference, %base, "resolved merge-base");
        Ok(base.to_string())
    }
}
