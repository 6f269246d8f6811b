//! File-based loadout repository.

use std::fs;
use std::path::{Path, PathBuf};

use loadout_core::{LoadoutError, LoadoutRecord};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data in {path}: {reason}")]
    CorruptedData { path: PathBuf, reason: String },

    #[error("loadout `{0}` not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Stores each loadout as its own bincode file.
///
/// # File Format
///
/// Loadouts are stored as `{slug}.bin`, where the slug is derived from the
/// label (see [`slug`]). Writes go to a `.bin.tmp` sibling first and are
/// renamed into place, so a crash never leaves a half-written save.
pub struct FileLoadoutRepository {
    base_dir: PathBuf,
}

impl FileLoadoutRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, label: &str) -> PathBuf {
        self.base_dir.join(format!("{}.bin", slug(label)))
    }

    /// Writes `record`, replacing any save with the same slug.
    pub fn save(&self, record: &LoadoutRecord) -> Result<PathBuf> {
        let path = self.record_path(&record.label);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = record
            .to_bytes()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(label = %record.label, path = %path.display(), "loadout saved");
        Ok(path)
    }

    pub fn load(&self, label: &str) -> Result<Option<LoadoutRecord>> {
        let path = self.record_path(label);
        if !path.exists() {
            return Ok(None);
        }
        self.read(&path).map(Some)
    }

    /// Like [`Self::load`], but a missing save is an error.
    pub fn require(&self, label: &str) -> Result<LoadoutRecord> {
        self.load(label)?
            .ok_or_else(|| RepositoryError::NotFound(label.to_owned()))
    }

    pub fn exists(&self, label: &str) -> bool {
        self.record_path(label).exists()
    }

    /// Deletes the save. Returns whether there was one.
    pub fn delete(&self, label: &str) -> Result<bool> {
        let path = self.record_path(label);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        tracing::debug!(label, "loadout deleted");
        Ok(true)
    }

    /// All saved loadouts, sorted by label. Unreadable files are skipped.
    pub fn list(&self) -> Result<Vec<LoadoutRecord>> {
        let mut records = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("bin") {
                continue;
            }
            match self.read(&path) {
                Ok(record) => records.push(record),
                Err(err) => tracing::warn!(path = %path.display(), error = %err, "skipping save"),
            }
        }

        records.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(records)
    }

    fn read(&self, path: &Path) -> Result<LoadoutRecord> {
        let bytes = fs::read(path)?;
        LoadoutRecord::from_bytes(&bytes).map_err(|e| match e {
            LoadoutError::Encoding(reason) => RepositoryError::CorruptedData {
                path: path.to_path_buf(),
                reason,
            },
            other => RepositoryError::Serialization(other.to_string()),
        })
    }
}

/// File-name-safe form of a label: lowercase ASCII alphanumerics separated by
/// single dashes. Labels without any such character map to `loadout`.
pub fn slug(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("loadout");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_core::GroupId;
    use tempfile::TempDir;

    fn record(label: &str) -> LoadoutRecord {
        LoadoutRecord {
            label: label.to_owned(),
            next_group_id: GroupId(0),
            groups: Vec::new(),
            blacklist: Vec::new(),
        }
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Soldier (copy)"), "soldier-copy");
        assert_eq!(slug("  heavy--gunner "), "heavy-gunner");
        assert_eq!(slug("???"), "loadout");
    }

    #[test]
    fn test_save_load_delete() {
        let dir = TempDir::new().unwrap();
        let repo = FileLoadoutRepository::new(dir.path()).unwrap();

        let path = repo.save(&record("Soldier")).unwrap();
        assert!(path.ends_with("soldier.bin"));
        assert!(repo.exists("soldier"));
        assert_eq!(repo.load("Soldier").unwrap(), Some(record("Soldier")));

        assert!(repo.delete("Soldier").unwrap());
        assert!(!repo.delete("Soldier").unwrap());
        assert_eq!(repo.load("Soldier").unwrap(), None);
        assert!(matches!(repo.require("Soldier"), Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn test_list_sorts_and_skips_garbage() {
        let dir = TempDir::new().unwrap();
        let repo = FileLoadoutRepository::new(dir.path()).unwrap();
        repo.save(&record("cook")).unwrap();
        repo.save(&record("brawler")).unwrap();
        fs::write(dir.path().join("broken.bin"), [0xff, 0xff]).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a save").unwrap();

        let labels: Vec<_> = repo.list().unwrap().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["brawler", "cook"]);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let repo = FileLoadoutRepository::new(dir.path()).unwrap();
        repo.save(&record("cook")).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["cook.bin"]);
    }
}
