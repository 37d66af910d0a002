// Port Layer - Interfaces for external dependencies

pub mod command_runner;
pub mod file_system;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use command_runner::{CommandRunner, ExecutionError, ExecutionResult, ExecutionStatus};
pub use file_system::{FileSystem, FsError};
pub use time_provider::TimeProvider;
