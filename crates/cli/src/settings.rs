//! Toolchain configuration loading
//!
//! Precedence, lowest first: all slots unset, config file, `CCS_*`
//! environment variables, command-line overrides.

use anyhow::{Context, Result};
use ccs_core::domain::ToolchainConfig;
use config::{Config, Environment, File, Map};
use std::path::PathBuf;

/// Environment prefix (`CCS_ASSEMBLER`, `CCS_LINKER`, ...)
pub const ENV_PREFIX: &str = "CCS";

/// Config file looked up in the working directory when no path is given
/// (`ccs.toml`, `ccs.json`, ...). Optional.
pub const DEFAULT_CONFIG_NAME: &str = "ccs";

/// Resolve the toolchain configuration.
///
/// An explicit `path` must exist; the default file is optional. `~` is
/// expanded in explicit paths.
pub fn load_toolchain_config(
    path: Option<&str>,
    overrides: &ToolchainConfig,
) -> Result<ToolchainConfig> {
    load_with_env(path, None, overrides)
}

/// Same as [`load_toolchain_config`], reading `CCS_*` variables from `env`
/// instead of the process environment when given
fn load_with_env(
    path: Option<&str>,
    env: Option<Map<String, String>>,
    overrides: &ToolchainConfig,
) -> Result<ToolchainConfig> {
    let builder = Config::builder();
    let builder = match path {
        Some(p) => {
            let expanded = PathBuf::from(shellexpand::tilde(p).into_owned());
            builder.add_source(File::from(expanded).required(true))
        }
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
    };

    let mut toolchain: ToolchainConfig = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Invalid toolchain configuration")?;

    toolchain.merge(overrides);
    tracing::debug!(toolchain = ?toolchain, "Toolchain configuration resolved");
    Ok(toolchain)
}
