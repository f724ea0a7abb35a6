// src/fs/mock.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};

use super::FileSystem;

#[derive(Debug, Clone)]
enum MockEntry {
    File(Vec<u8>),
    Dir,
}

/// In-memory [`FileSystem`] for tests.
///
/// Stricter than the real one in one respect: `append` fails when the
/// parent directory does not exist, which is exactly the failure the
/// logbook's create-and-retry path has to handle. The `fail_reads` /
/// `fail_writes` toggles force errors to exercise the non-fatal paths.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a directory and all its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap();
        let mut current = path.as_ref().to_path_buf();
        loop {
            entries.insert(current.clone(), MockEntry::Dir);
            match current.parent() {
                Some(p) if !p.as_os_str().is_empty() => current = p.to_path_buf(),
                _ => break,
            }
        }
    }

    /// Insert a file, creating parent directories implicitly.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.add_dir(parent);
            }
        }
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path, MockEntry::File(content.into()));
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(path.as_ref());
    }

    /// Current contents of a file, if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path.as_ref()) {
            Some(MockEntry::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// Make subsequent read operations fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent write/append/create operations fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(
            self.entries.lock().unwrap().get(path),
            Some(MockEntry::File(_))
        )
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entries.lock().unwrap().get(path), Some(MockEntry::Dir))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("injected create_dir_all failure: {:?}", path));
        }
        self.add_dir(path);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("injected read_dir failure: {:?}", path));
        }
        let entries = self.entries.lock().unwrap();
        if !matches!(entries.get(path), Some(MockEntry::Dir)) {
            return Err(anyhow!("not a directory: {:?}", path));
        }
        let mut children: Vec<PathBuf> = entries
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        children.sort();
        Ok(children)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("injected write failure: {:?}", path));
        }
        self.add_file(path, contents);
        Ok(())
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("injected append failure: {:?}", path));
        }
        let mut entries = self.entries.lock().unwrap();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty()
                && !matches!(entries.get(parent), Some(MockEntry::Dir))
            {
                return Err(anyhow!("no such directory: {:?}", parent));
            }
        }
        match entries.get_mut(path) {
            Some(MockEntry::File(existing)) => existing.extend_from_slice(contents),
            Some(MockEntry::Dir) => return Err(anyhow!("is a directory: {:?}", path)),
            None => {
                entries.insert(path.to_path_buf(), MockEntry::File(contents.to_vec()));
            }
        }
        Ok(())
    }
}
