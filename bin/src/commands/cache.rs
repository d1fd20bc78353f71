//! Cache command implementation.

use anyhow::Result;
use screener_lib::prelude::*;
use std::path::Path;

/// Print each cache file with its entry counts.
pub(crate) fn show(cache_dir: &Path) -> Result<()> {
    let store = CacheStore::new(cache_dir);
    println!("Cache directory: {}", store.base_path().display());

    for kind in AttributeKind::all() {
        let path = store.path(*kind);
        if !path.exists() {
            println!("{kind}: no cache at {}", path.display());
            continue;
        }

        let map = store.try_load(*kind)?;
        let missing = map.values().filter(|value| **value == NO_DATA).count();
        println!(
            "{kind}: {} entries ({missing} without data) in {}",
            map.len(),
            path.display()
        );
    }
    Ok(())
}

/// Delete the cache files.
pub(crate) fn clear(cache_dir: &Path) -> Result<()> {
    let store = CacheStore::new(cache_dir);

    for kind in AttributeKind::all() {
        let path = store.path(*kind);
        if store.clear(*kind)? {
            println!("Removed {}", path.display());
        } else {
            println!("No {kind} cache at {}", path.display());
        }
    }
    Ok(())
}
