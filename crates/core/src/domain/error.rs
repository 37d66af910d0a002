// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown toolchain slot: {0}")]
    UnknownSlot(String),

    #[error("Toolchain slot not configured: {0}")]
    SlotUnset(crate::domain::ToolchainSlot),
}
