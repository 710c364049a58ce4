//! FileSystem abstraction for testable file operations

mod materialize;
mod mock;
mod real;
mod r#trait;

pub use materialize::{materialize, write_artifact};
pub use mock::MockFileSystem;
pub use r#trait::FileSystem;
pub use real::RealFileSystem;
