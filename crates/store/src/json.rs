//! JSON file-backed snapshot store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use strata_core::engine::AssociationSnapshot;
use tracing::{debug, info};

use crate::SnapshotStore;
use crate::error::StoreError;

/// Stores one pretty-printed JSON file per association under a data
/// directory.
///
/// Saves write to a temp file in the same directory and move it into
/// place with [`fs::rename`], which is atomic on POSIX, so a crash
/// mid-write never leaves a torn snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    data_dir: PathBuf,
}

impl JsonSnapshotStore {
    /// Opens a store rooted at `data_dir`, creating the directory if
    /// it does not exist yet.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Path of the snapshot file for an association name.
    #[must_use]
    pub fn snapshot_path(&self, association: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.json", canonical_name(association)))
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn save(&self, snapshot: &AssociationSnapshot) -> Result<(), StoreError> {
        let path = self.snapshot_path(&snapshot.settings.name);
        let json = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&path, &json)?;
        info!(
            association = %snapshot.settings.name,
            revision = snapshot.revision,
            path = %path.display(),
            "Snapshot saved"
        );
        Ok(())
    }

    fn load(&self, association: &str) -> Result<Option<AssociationSnapshot>, StoreError> {
        let path = self.snapshot_path(association);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(association, "No snapshot on disk");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let snapshot: AssociationSnapshot = serde_json::from_str(&json)?;
        debug!(
            association,
            revision = snapshot.revision,
            "Snapshot loaded"
        );
        Ok(Some(snapshot))
    }
}

/// Maps an association name to a stable, filesystem-safe file stem.
fn canonical_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if stem.trim_matches('_').is_empty() {
        "association".to_owned()
    } else {
        stem
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => "tmp".to_owned(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, json: &str) -> Result<(), StoreError> {
    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
