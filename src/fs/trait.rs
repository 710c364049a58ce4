//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// File operations the generator needs, abstracted for tests
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Create a directory and all missing parents
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Create or truncate a file
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Mark a file as executable by owner, group and others
    fn set_executable(&self, path: &Path) -> Result<()>;
}

/// Lets a caller keep a handle on the file system it hands to the generator
impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        (**self).read_to_string(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        (**self).create_dir_all(path)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        (**self).write(path, content)
    }

    fn set_executable(&self, path: &Path) -> Result<()> {
        (**self).set_executable(path)
    }
}
