// CCS Infrastructure - System Adapters
// Implements: CommandRunner, FileSystem

pub mod local_file_system;
pub mod shell_runner;

pub use local_file_system::LocalFileSystem;
pub use shell_runner::ShellCommandRunner;
