//! CCS CLI - run toolchain commands and manage build trees from the shell

mod logging;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::info;

use ccs_core::application::Toolchain;
use ccs_core::domain::{Command, Language, ToolchainConfig, ToolchainSlot};
use ccs_core::port::time_provider::SystemTimeProvider;
use ccs_core::port::ExecutionResult;
use ccs_infra_system::{LocalFileSystem, ShellCommandRunner};

#[derive(Parser)]
#[command(name = "ccs")]
#[command(about = "Minimal build helper: toolchain commands, build trees, raw images", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Do not echo command lines before running them
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Toolchain config file (default: ./ccs.toml if present)
    #[arg(long, global = true, env = "CCS_CONFIG")]
    config: Option<String>,

    /// C compiler
    #[arg(long, global = true)]
    cc: Option<String>,

    /// C++ compiler
    #[arg(long, global = true)]
    cxx: Option<String>,

    /// Linker
    #[arg(long, global = true)]
    ld: Option<String>,

    /// Assembler
    #[arg(long = "as", global = true)]
    assembler: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command through the shell and exit with its exit code
    Run {
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the rendered command line without running it
    Render {
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List every regular file under a directory, recursively
    Ls {
        dir: PathBuf,
    },

    /// Exit 0 if the directory can be opened, 1 otherwise
    Exists {
        dir: PathBuf,
    },

    /// Create a directory
    Mkdir {
        dir: PathBuf,

        /// Create missing parents
        #[arg(short, long)]
        parents: bool,
    },

    /// Remove a directory tree (rm -rf)
    Rmdir {
        dir: PathBuf,
    },

    /// Assemble one file with the configured assembler
    Assemble {
        file: PathBuf,
        output: PathBuf,

        /// Extra flags (without -o)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        flags: String,
    },

    /// Link one file with the configured linker
    Link {
        file: PathBuf,
        output: PathBuf,

        /// Extra flags (without -o)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        flags: String,
    },

    /// Compile one file to an object with the configured C or C++ compiler
    Compile {
        file: PathBuf,
        output: PathBuf,

        /// Use the C++ compiler
        #[arg(long)]
        cpp: bool,

        /// Extra flags (without -c / -o)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        flags: String,
    },

    /// Write the content of a binary file into another at an offset (truncates the target)
    Write {
        file: PathBuf,

        /// File whose bytes are written
        #[arg(long)]
        input: PathBuf,

        /// Byte offset inside the target
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },

    /// Create a zero-filled file of an exact size
    Mkfile {
        name: PathBuf,
        size: u64,
    },

    /// Show the resolved toolchain
    Toolchain,
}

#[derive(Tabled)]
struct SlotRow {
    slot: String,
    program: String,
}

impl Cli {
    /// Slots given on the command line
    fn overrides(&self) -> ToolchainConfig {
        ToolchainConfig {
            c_compiler: self.cc.clone(),
            cpp_compiler: self.cxx.clone(),
            linker: self.ld.clone(),
            assembler: self.assembler.clone(),
        }
    }
}

/// Fail unless the child exited 0
fn checked(result: ExecutionResult) -> Result<()> {
    let rendered = result.rendered.clone();
    result
        .ensure_success()
        .with_context(|| format!("Build step failed: {}", rendered))?;
    Ok(())
}

/// One path per line, then the file count
fn write_listing(out: &mut impl Write, files: &[PathBuf]) -> std::io::Result<()> {
    for file in files {
        writeln!(out, "{}", file.display())?;
    }
    writeln!(out, "{} {} files", "✓".green(), files.len())
}

fn print_toolchain(toolchain: &Toolchain) {
    let rows: Vec<SlotRow> = ToolchainSlot::ALL
        .iter()
        .map(|slot| SlotRow {
            slot: slot.to_string(),
            program: toolchain
                .slot(*slot)
                .map(str::to_string)
                .unwrap_or_else(|| "(unset)".to_string()),
        })
        .collect();

    println!("{}", "Toolchain".cyan().bold());
    println!("{}", Table::new(rows));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = settings::load_toolchain_config(cli.config.as_deref(), &cli.overrides())?;
    let toolchain = Toolchain::new(
        config,
        Arc::new(ShellCommandRunner::new(Arc::new(SystemTimeProvider))),
        Arc::new(LocalFileSystem::new()),
    );
    let announce = !cli.quiet;

    info!(version = ccs_core::VERSION, "ccs starting");

    match cli.command {
        Commands::Run { program, args } => {
            let cmd = Command::with_program(program).args(args);
            let result = toolchain.run(&cmd, announce)?;
            if !result.success() {
                if let Some(signal) = &result.signal {
                    eprintln!("{} terminated by {}", "✗".red(), signal);
                }
                std::process::exit(result.exit_code.unwrap_or(1));
            }
        }

        Commands::Render { program, args } => {
            let cmd = Command::with_program(program).args(args);
            println!("{}", cmd.render());
        }

        Commands::Ls { dir } => {
            let files = toolchain
                .list_files(&dir)
                .with_context(|| format!("Cannot list {}", dir.display()))?;
            write_listing(&mut std::io::stdout().lock(), &files)?;
        }

        Commands::Exists { dir } => {
            if !toolchain.folder_exists(&dir) {
                std::process::exit(1);
            }
        }

        Commands::Mkdir { dir, parents } => {
            let result = if parents {
                toolchain.create_directory_recursive(&dir, announce)?
            } else {
                toolchain.create_directory(&dir, announce)?
            };
            checked(result)?;
        }

        Commands::Rmdir { dir } => {
            checked(toolchain.remove_directory_recursive(&dir, announce)?)?;
        }

        Commands::Assemble { file, output, flags } => {
            checked(toolchain.assemble(&file, &flags, &output, announce)?)?;
        }

        Commands::Link { file, output, flags } => {
            checked(toolchain.link(&file, &flags, &output, announce)?)?;
        }

        Commands::Compile {
            file,
            output,
            cpp,
            flags,
        } => {
            let language = if cpp { Language::Cpp } else { Language::C };
            checked(toolchain.compile(language, &file, &flags, &output, announce)?)?;
        }

        Commands::Write {
            file,
            input,
            offset,
        } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("Cannot read {}", input.display()))?;
            toolchain.write_bytes(&data, offset, &file, announce)?;
        }

        Commands::Mkfile { name, size } => {
            checked(toolchain.create_sized_file(&name, size, announce)?)?;
        }

        Commands::Toolchain => print_toolchain(&toolchain),
    }

    Ok(())
}
