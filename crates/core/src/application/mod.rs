// Application Layer - Use Cases

pub mod toolchain;

// Re-exports
pub use toolchain::Toolchain;
