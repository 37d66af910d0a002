// Toolchain constants (No magic values)

/// Program used to create a single directory
pub const MKDIR_PROGRAM: &str = "mkdir";

/// Flag making `mkdir` create missing parents
pub const MKDIR_PARENTS_FLAG: &str = "-p";

/// Program used to remove a directory tree
pub const RM_PROGRAM: &str = "rm";

/// Recursive + force flags for `rm`
pub const RM_RECURSIVE_FLAG: &str = "-rf";

/// Output flag appended by the assemble/link/compile helpers
pub const OUTPUT_FLAG: &str = "-o";

/// Compile-only flag used by the compile helper
pub const COMPILE_ONLY_FLAG: &str = "-c";

/// Zero-fill utility used to create fixed-size files
pub const DD_PROGRAM: &str = "dd";

/// Input source for zero-filled files
pub const ZERO_SOURCE: &str = "if=/dev/zero";

/// Block size for zero-filled files (one byte, so `count` is the file size)
pub const DD_BLOCK_SIZE: &str = "bs=1";
