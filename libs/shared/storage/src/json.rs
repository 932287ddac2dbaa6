use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Whole-file JSON collection: fully materialized into memory on every
/// read, rewritten wholesale on every write. A missing file reads as an
/// empty collection. The mutex serializes the read-modify-write window
/// in-process; the write itself is not atomic across process crashes.
pub struct JsonCollection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(data_dir: &str, file_name: &str) -> Self {
        Self {
            path: Path::new(data_dir).join(file_name),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<T>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("collection lock poisoned: {}", self.path.display()))?;
        self.read_items()
    }

    /// Locked read-modify-write. An Err from the closure aborts the write,
    /// leaving the file untouched.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut Vec<T>) -> Result<R>) -> Result<R> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("collection lock poisoned: {}", self.path.display()))?;
        let mut items = self.read_items()?;
        let outcome = mutate(&mut items)?;
        self.write_items(&items)?;
        Ok(outcome)
    }

    fn read_items(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))
    }

    fn write_items(&self, items: &[T]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        debug!("Rewrote {} ({} records)", self.path.display(), items.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        value: i64,
    }

    fn collection(dir: &TempDir) -> JsonCollection<Row> {
        JsonCollection::new(dir.path().to_str().unwrap(), "rows.json")
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        assert!(collection(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn update_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let rows = collection(&dir);

        rows.update(|items| {
            items.push(Row { id: "a".into(), value: 1 });
            Ok(())
        })
        .unwrap();

        // A second handle over the same path sees the write
        let reloaded = collection(&dir).load().unwrap();
        assert_eq!(reloaded, vec![Row { id: "a".into(), value: 1 }]);
    }

    #[test]
    fn failed_update_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let rows = collection(&dir);
        rows.update(|items| {
            items.push(Row { id: "a".into(), value: 1 });
            Ok(())
        })
        .unwrap();

        let result: Result<()> = rows.update(|items| {
            items.clear();
            Err(anyhow!("abort"))
        });
        assert!(result.is_err());
        assert_eq!(rows.load().unwrap().len(), 1);
    }
}
