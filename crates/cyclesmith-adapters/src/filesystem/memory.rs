//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use cyclesmith_core::{
    application::{ApplicationError, ports::Filesystem},
    error::CycleResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn missing(path: &Path) -> ApplicationError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "No such file".into(),
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) -> CycleResult<()> {
        let path = path.as_ref();
        let mut inner = self.write()?;
        if let Some(parent) = path.parent() {
            inner.add_dirs(parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<_> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    fn read(&self) -> CycleResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write(&self) -> CycleResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> CycleResult<String> {
        let inner = self.read()?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| MemoryFilesystemInner::missing(path).into())
    }

    fn write_file(&self, path: &Path, content: &str) -> CycleResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> CycleResult<()> {
        let mut inner = self.write()?;
        let content = inner
            .files
            .remove(from)
            .ok_or_else(|| MemoryFilesystemInner::missing(from))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> CycleResult<()> {
        let content = self.read_to_string(from)?;
        self.write_file(to, &content)
    }

    fn list_dir(&self, path: &Path) -> CycleResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(MemoryFilesystemInner::missing(path).into());
        }
        let mut entries: Vec<_> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        entries.sort();
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> CycleResult<()> {
        self.write()?.add_dirs(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/pkg/include/A.h"), "x").is_err());

        fs.create_dir_all(Path::new("/pkg/include")).unwrap();
        fs.write_file(Path::new("/pkg/include/A.h"), "x").unwrap();
        assert!(fs.is_dir(Path::new("/pkg")));
        assert_eq!(fs.read_file("/pkg/include/A.h").as_deref(), Some("x"));
    }

    #[test]
    fn list_dir_returns_direct_children() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/pkg/include/Ana_LinkDef.h", "").unwrap();
        fs.add_file("/pkg/include/deep/X.h", "").unwrap();
        fs.add_file("/pkg/Makefile", "").unwrap();

        let entries = fs.list_dir(Path::new("/pkg/include")).unwrap();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/pkg/include/Ana_LinkDef.h"),
                PathBuf::from("/pkg/include/deep"),
            ]
        );
    }

    #[test]
    fn rename_moves_content() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/a/x", "old").unwrap();
        fs.rename(Path::new("/a/x"), Path::new("/a/x.backup")).unwrap();
        assert_eq!(fs.list_files(), vec![PathBuf::from("/a/x.backup")]);
        assert!(fs.rename(Path::new("/a/x"), Path::new("/a/y")).is_err());
    }
}
