use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::model::SizeStore;
use crate::util::now_unix;

/// Default location of the local size store, under the user cache directory
pub fn default_store_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .context("Could not determine cache directory")?
        .join("pkgsize");
    Ok(cache_dir.join("package_sizes.json"))
}

/// Load a size store from a JSON file; a missing file yields an empty store
pub fn load_store(path: &Path) -> Result<SizeStore> {
    if !path.exists() {
        info!(path = %path.display(), "no size store yet, starting empty");
        return Ok(SizeStore::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Could not read size store: {}", path.display()))?;
    let store = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid size store: {}", path.display()))?;
    debug!(path = %path.display(), "loaded size store");
    Ok(store)
}

/// Save a size store as pretty JSON, refreshing its generation timestamp
pub fn save_store(path: &Path, store: &mut SizeStore) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    store.touch(now_unix());
    let json = serde_json::to_string_pretty(store)?;
    fs::write(path, json).with_context(|| format!("Could not write size store: {}", path.display()))?;
    debug!(path = %path.display(), "saved size store");
    Ok(())
}
