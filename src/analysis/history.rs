use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{Result, SizeError};
use crate::model::{LookupPath, SizeStore};
use crate::repository::Ancestry;

/// Size recorded at the nearest commit in `commit`'s first-parent chain
///
/// `commit` itself is checked first, without querying ancestry. Fails with
/// `NotFound` when the chain runs out, which means "no baseline yet" rather
/// than a regression.
pub fn resolve_previous<A>(store: &SizeStore, commit: &str, path: &LookupPath, ancestry: &A) -> Result<u64>
where
    A: Ancestry + ?Sized,
{
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut current = commit.to_string();

    loop {
        if let Some(size) = store.get(&current, path) {
            debug!(%path, commit = %current, size, "found baseline");
            return Ok(size);
        }
        visited.insert(current.clone());

        match ancestry.parent(&current)? {
            Some(parent) if !visited.contains(&parent) => current = parent,
            _ => {
                return Err(SizeError::NotFound {
                    commit: commit.to_string(),
                    path: path.to_string(),
                });
            }
        }
    }
}
