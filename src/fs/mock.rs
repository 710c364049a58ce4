use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Default)]
struct MockState {
    files: HashMap<PathBuf, String>,
    dirs: HashSet<PathBuf>,
    executable: HashSet<PathBuf>,
    failing_writes: HashSet<PathBuf>,
}

/// In-memory file system with injectable write failures
pub struct MockFileSystem {
    state: RwLock<MockState>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            state: RwLock::new(MockState::default()),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut state = self.write_state();
        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut state, parent);
        }
        state.files.insert(path, content.to_string());
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        Self::ensure_parents(&mut self.write_state(), &path);
    }

    /// Every later write to `path` fails
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.write_state().failing_writes.insert(path);
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = self.normalize_path(path.as_ref());
        self.read_state().files.get(&path).cloned()
    }

    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        let path = self.normalize_path(path.as_ref());
        self.read_state().executable.contains(&path)
    }

    pub fn file_count(&self) -> usize {
        self.read_state().files.len()
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(state: &mut MockState, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            state.dirs.insert(current.clone());
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, MockState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, MockState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        let state = self.read_state();
        state.files.contains_key(&path) || state.dirs.contains(&path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.read_state().files.contains_key(&path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        self.read_state()
            .files
            .get(&path)
            .cloned()
            .ok_or_else(|| anyhow!("File not found: {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = self.normalize_path(path);
        let mut state = self.write_state();
        if state.files.contains_key(&path) {
            return Err(anyhow!("Not a directory: {:?}", path));
        }
        Self::ensure_parents(&mut state, &path);
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let path = self.normalize_path(path);
        let mut state = self.write_state();

        if state.failing_writes.contains(&path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        if let Some(parent) = path.parent() {
            if !state.dirs.contains(parent) {
                return Err(anyhow!("Directory not found: {:?}", parent));
            }
        }

        state.files.insert(path, content.to_string());
        Ok(())
    }

    fn set_executable(&self, path: &Path) -> Result<()> {
        let path = self.normalize_path(path);
        let mut state = self.write_state();
        if !state.files.contains_key(&path) {
            return Err(anyhow!("File not found: {:?}", path));
        }
        state.executable.insert(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_and_read() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");

        assert!(fs.exists(Path::new("package.json")));
        assert!(fs.is_file(Path::new("package.json")));
        assert!(fs.exists(Path::new("/mock")));
        assert_eq!(fs.read_to_string(Path::new("package.json")).unwrap(), "{}");
    }

    #[test]
    fn test_write_requires_parent_directory() {
        let fs = MockFileSystem::new();

        assert!(fs.write(Path::new("frontend/Dockerfile"), "FROM node").is_err());

        fs.create_dir_all(Path::new("frontend")).unwrap();
        fs.write(Path::new("frontend/Dockerfile"), "FROM node").unwrap();
        assert_eq!(fs.contents("frontend/Dockerfile").as_deref(), Some("FROM node"));
    }

    #[test]
    fn test_injected_write_failure() {
        let fs = MockFileSystem::new();
        fs.add_dir("");
        fs.fail_writes_to("deploy.sh");

        let err = fs.write(Path::new("deploy.sh"), "#!/bin/bash").unwrap_err();
        assert!(err.to_string().contains("Permission denied"));
        assert!(fs.contents("deploy.sh").is_none());
        assert!(fs.write(Path::new("update.sh"), "#!/bin/bash").is_ok());
    }

    #[test]
    fn test_set_executable() {
        let fs = MockFileSystem::new();
        fs.add_file("update.sh", "#!/bin/bash");

        assert!(!fs.is_executable("update.sh"));
        fs.set_executable(Path::new("update.sh")).unwrap();
        assert!(fs.is_executable("update.sh"));
        assert!(fs.set_executable(Path::new("missing.sh")).is_err());
    }

    #[test]
    fn test_create_dir_over_file_fails() {
        let fs = MockFileSystem::new();
        fs.add_file("frontend", "not a dir");

        assert!(fs.create_dir_all(Path::new("frontend")).is_err());
    }
}
