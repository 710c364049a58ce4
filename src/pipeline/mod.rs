//! Generation pipeline: preflight, validate, compile, patch, write

pub mod orchestrator;
pub mod result;

pub use orchestrator::Generator;
pub use result::{FileOutcome, FileStatus, GenerationResult};
