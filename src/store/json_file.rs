use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{MemoryStore, StoreError, TaskStore};
use crate::model::Task;

/// Task store persisted as a JSON array of tasks.
///
/// Mutations are applied in memory and the whole file is rewritten after
/// each successful call. A call that fails, in the mutation or in the
/// write, leaves the task list as it was.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tasks: MemoryStore,
}

/// Write through a temp file in the same directory, then rename into place.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl JsonFileStore {
    /// Open `path`; a missing file is an empty task list.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tasks: Vec<Task> = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Vec::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::info!(path = %path.display(), count = tasks.len(), "task file loaded");
        Ok(JsonFileStore {
            path,
            tasks: MemoryStore::from_tasks(tasks),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.tasks.snapshot()).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        atomic_write(&self.path, json.as_bytes()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn commit(
        &mut self,
        f: impl FnOnce(&mut MemoryStore) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let before = self.tasks.snapshot();
        let result = f(&mut self.tasks).and_then(|()| self.save());
        if let Err(e) = &result {
            tracing::warn!(path = %self.path.display(), err = %e, "mutation rolled back");
            self.tasks.restore(before);
        }
        result
    }
}

impl TaskStore for JsonFileStore {
    fn export(&self, filters: &[String]) -> Result<Vec<Task>, StoreError> {
        self.tasks.export(filters)
    }

    fn annotate(&mut self, id: u32, text: &str) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.annotate(id, text))
    }

    fn replace_annotations(&mut self, id: u32, text: &str) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.replace_annotations(id, text))
    }

    fn set_description(&mut self, id: u32, text: &str) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.set_description(id, text))
    }

    fn add_tags(&mut self, id: u32, tags: &[String]) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.add_tags(id, tags))
    }

    fn remove_tags(&mut self, id: u32, tags: &[String]) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.remove_tags(id, tags))
    }

    fn set_due_date(&mut self, id: u32, date: &str) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.set_due_date(id, date))
    }

    fn set_recurrence(&mut self, id: u32, spec: &str) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.set_recurrence(id, spec))
    }

    fn set_project(&mut self, id: u32, project: &str) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.set_project(id, project))
    }

    fn set_priority(&mut self, id: u32, priority: &str) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.set_priority(id, priority))
    }

    fn add_line(&mut self, line: &str) -> Result<(), StoreError> {
        self.commit(|tasks| tasks.add_line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("tasks.json")).unwrap();
        assert!(store.export(&[]).unwrap().is_empty());
    }

    #[test]
    fn mutations_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tasks.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.add_line("Water plants project:home").unwrap();
        store.set_priority(1, "H").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let tasks = reopened.export(&[]).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].project, "home");
        assert_eq!(tasks[0].priority, "H");
    }

    #[test]
    fn failed_mutation_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.set_project(4, "x").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn failed_write_leaves_tasks_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        // Renaming onto a directory fails
        fs::create_dir(&path).unwrap();

        assert!(matches!(store.add_line("Buy milk"), Err(StoreError::Io { .. })));
        assert!(store.add_line("Buy milk").is_err());
        assert!(store.export(&[]).unwrap().is_empty());
    }

    #[test]
    fn failed_write_keeps_earlier_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.add_line("Call mom").unwrap();
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.annotate(1, "left a message").is_err());
        let tasks = store.export(&[]).unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].annotations.is_empty());
    }

    #[test]
    fn corrupt_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{not json").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("tasks.json"));
    }
}
