use crate::snapshot::Snapshot;
use crate::store::StoreError;
use std::fs;
use std::path::Path;

/// Save a snapshot to a pretty-printed JSON file
pub fn save_snapshot(snapshot: &Snapshot, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;

    log::debug!(
        "Saved snapshot ({} inductions, {} reweights, {} sales) to {}",
        snapshot.inductions.len(),
        snapshot.reweights.len(),
        snapshot.sales.len(),
        path.display()
    );
    Ok(())
}

/// Load a snapshot from a JSON file; a missing file is an empty snapshot
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!("No existing snapshot file found: {}", path.display());
        return Ok(Snapshot::default());
    }

    let json = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&json)?;

    log::info!(
        "Loaded snapshot from {}: {} inductions, {} reweights, {} sales",
        path.display(),
        snapshot.inductions.len(),
        snapshot.reweights.len(),
        snapshot.sales.len()
    );
    Ok(snapshot)
}
