// Domain Layer - Pure command model and toolchain configuration

pub mod command;
pub mod error;
pub mod toolchain;

// Re-exports
pub use command::Command;
pub use error::DomainError;
pub use toolchain::{Language, ToolchainConfig, ToolchainSlot};
