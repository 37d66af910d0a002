// Toolchain Service - build and filesystem steps on top of the command model

pub mod constants;

use crate::domain::{Command, DomainError, Language, ToolchainConfig, ToolchainSlot};
use crate::error::Result;
use crate::port::{CommandRunner, ExecutionResult, FileSystem};
use constants::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Toolchain service
///
/// Remembers the configured compilers, linker and assembler, and turns
/// common build steps into [`Command`]s handed to a [`CommandRunner`].
///
/// Child exit codes are returned inside [`ExecutionResult`] and are not
/// checked here; call `ensure_success()` on the result to fail fast.
pub struct Toolchain {
    config: ToolchainConfig,
    runner: Arc<dyn CommandRunner>,
    fs: Arc<dyn FileSystem>,
}

impl Toolchain {
    pub fn new(
        config: ToolchainConfig,
        runner: Arc<dyn CommandRunner>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self { config, runner, fs }
    }

    /// Set one slot, replacing its previous value
    pub fn configure(&mut self, slot: ToolchainSlot, value: impl Into<String>) {
        let value = value.into();
        debug!(slot = %slot, value = %value, "Toolchain slot configured");
        self.config.set(slot, value);
    }

    pub fn slot(&self, slot: ToolchainSlot) -> Option<&str> {
        self.config.get(slot)
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Run an arbitrary command through the configured runner
    pub fn run(&self, cmd: &Command, announce: bool) -> Result<ExecutionResult> {
        Ok(self.runner.run(cmd, announce)?)
    }

    /// `mkdir <path>` (parent must exist)
    pub fn create_directory(&self, path: impl AsRef<Path>, announce: bool) -> Result<ExecutionResult> {
        let cmd = Command::with_program(MKDIR_PROGRAM).arg(path_arg(path));
        self.run(&cmd, announce)
    }

    /// `mkdir -p <path>`
    pub fn create_directory_recursive(
        &self,
        path: impl AsRef<Path>,
        announce: bool,
    ) -> Result<ExecutionResult> {
        let cmd = Command::with_program(MKDIR_PROGRAM)
            .arg(MKDIR_PARENTS_FLAG)
            .arg(path_arg(path));
        self.run(&cmd, announce)
    }

    /// `rm -rf <path>`
    pub fn remove_directory_recursive(
        &self,
        path: impl AsRef<Path>,
        announce: bool,
    ) -> Result<ExecutionResult> {
        let cmd = Command::with_program(RM_PROGRAM)
            .arg(RM_RECURSIVE_FLAG)
            .arg(path_arg(path));
        self.run(&cmd, announce)
    }

    /// `<assembler> <file> <flags> -o <output>`
    ///
    /// `flags` must not contain an output flag.
    pub fn assemble(
        &self,
        file: impl AsRef<Path>,
        flags: &str,
        output: impl AsRef<Path>,
        announce: bool,
    ) -> Result<ExecutionResult> {
        let cmd = self.build_step(ToolchainSlot::Assembler, None, file, flags, output)?;
        self.run(&cmd, announce)
    }

    /// `<linker> <file> <flags> -o <output>`
    ///
    /// Links a single input file; `flags` must not contain an output flag.
    pub fn link(
        &self,
        file: impl AsRef<Path>,
        flags: &str,
        output: impl AsRef<Path>,
        announce: bool,
    ) -> Result<ExecutionResult> {
        let cmd = self.build_step(ToolchainSlot::Linker, None, file, flags, output)?;
        self.run(&cmd, announce)
    }

    /// `<cc|cxx> -c <file> <flags> -o <output>`
    pub fn compile(
        &self,
        language: Language,
        file: impl AsRef<Path>,
        flags: &str,
        output: impl AsRef<Path>,
        announce: bool,
    ) -> Result<ExecutionResult> {
        let cmd = self.build_step(
            language.compiler_slot(),
            Some(COMPILE_ONLY_FLAG),
            file,
            flags,
            output,
        )?;
        self.run(&cmd, announce)
    }

    /// Write `data` at `offset` into `file`.
    ///
    /// The file is opened in write mode, so it is recreated (truncated)
    /// every time; earlier content is lost.
    pub fn write_bytes(
        &self,
        data: &[u8],
        offset: u64,
        file: impl AsRef<Path>,
        announce: bool,
    ) -> Result<()> {
        let file = file.as_ref();
        if announce {
            println!("Writing Data to {} ", file.display());
        }
        self.fs.write_bytes(file, offset, data)?;
        info!(
            file = %file.display(),
            offset = offset,
            bytes = data.len(),
            "Raw data written"
        );
        Ok(())
    }

    /// Create `name` as exactly `size` zero bytes:
    /// `dd if=/dev/zero of=<name> bs=1 count=<size>`
    pub fn create_sized_file(
        &self,
        name: impl AsRef<Path>,
        size: u64,
        announce: bool,
    ) -> Result<ExecutionResult> {
        let cmd = Command::with_program(DD_PROGRAM)
            .arg(ZERO_SOURCE)
            .arg(format!("of={}", path_arg(name)))
            .arg(DD_BLOCK_SIZE)
            .arg(format!("count={}", size));
        self.run(&cmd, announce)
    }

    /// True if `path` can be opened as a directory
    pub fn folder_exists(&self, path: impl AsRef<Path>) -> bool {
        self.fs.folder_exists(path.as_ref())
    }

    /// Every regular file under `root`, recursively
    pub fn list_files(&self, root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        Ok(self.fs.list_files(root.as_ref())?)
    }

    /// Fixed argument shape shared by assemble/link/compile
    fn build_step(
        &self,
        slot: ToolchainSlot,
        leading: Option<&str>,
        file: impl AsRef<Path>,
        flags: &str,
        output: impl AsRef<Path>,
    ) -> Result<Command> {
        let program = self
            .config
            .get(slot)
            .ok_or(DomainError::SlotUnset(slot))?;

        let mut cmd = Command::with_program(program);
        if let Some(leading) = leading {
            cmd.add_argument(leading);
        }
        cmd.add_argument(path_arg(file));
        if !flags.is_empty() {
            cmd.add_argument(flags);
        }
        cmd.add_argument(OUTPUT_FLAG);
        cmd.add_argument(path_arg(output));
        Ok(cmd)
    }
}

fn path_arg(path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::port::command_runner::mocks::{MockBehavior, RecordingRunner};
    use crate::port::file_system::mocks::RecordingFileSystem;
    use crate::port::{ExecutionError, ExecutionStatus};

    fn toolchain_with(runner: &RecordingRunner) -> Toolchain {
        Toolchain::new(
            ToolchainConfig::new(),
            Arc::new(runner.clone()),
            Arc::new(RecordingFileSystem::new()),
        )
    }

    #[test]
    fn test_directory_helpers_render_expected_lines() {
        let runner = RecordingRunner::new_success();
        let toolchain = toolchain_with(&runner);

        toolchain.create_directory("build", true).unwrap();
        toolchain.create_directory_recursive("build/obj/boot", false).unwrap();
        toolchain.remove_directory_recursive("build", true).unwrap();

        assert_eq!(
            runner.lines(),
            vec!["mkdir build", "mkdir -p build/obj/boot", "rm -rf build"]
        );
        assert_eq!(runner.announced(), vec![true, false, true]);
    }

    #[test]
    fn test_assemble_uses_configured_assembler() {
        let runner = RecordingRunner::new_success();
        let mut toolchain = toolchain_with(&runner);
        toolchain.configure(ToolchainSlot::Assembler, "nasm");

        let result = toolchain
            .assemble("boot/boot.asm", "-f bin", "build/boot.bin", false)
            .unwrap();

        assert!(result.success());
        assert_eq!(runner.lines(), vec!["nasm boot/boot.asm -f bin -o build/boot.bin"]);
    }

    #[test]
    fn test_link_uses_latest_linker() {
        let runner = RecordingRunner::new_success();
        let mut toolchain = toolchain_with(&runner);
        toolchain.configure(ToolchainSlot::Linker, "ld");
        toolchain.configure(ToolchainSlot::Linker, "ld.lld");

        toolchain
            .link("kernel.o", "-T link.ld", "kernel.elf", false)
            .unwrap();

        assert_eq!(runner.lines(), vec!["ld.lld kernel.o -T link.ld -o kernel.elf"]);
    }

    #[test]
    fn test_empty_flags_are_skipped() {
        let runner = RecordingRunner::new_success();
        let mut toolchain = toolchain_with(&runner);
        toolchain.configure(ToolchainSlot::Linker, "ld");

        toolchain.link("a.o", "", "a.out", false).unwrap();

        assert_eq!(runner.lines(), vec!["ld a.o -o a.out"]);
    }

    #[test]
    fn test_compile_selects_compiler_by_language() {
        let runner = RecordingRunner::new_success();
        let mut toolchain = toolchain_with(&runner);
        toolchain.configure(ToolchainSlot::CCompiler, "gcc");
        toolchain.configure(ToolchainSlot::CppCompiler, "g++");

        toolchain
            .compile(Language::C, "main.c", "-O2 -Wall", "main.o", false)
            .unwrap();
        toolchain
            .compile(Language::Cpp, "util.cpp", "-std=c++17", "util.o", false)
            .unwrap();

        assert_eq!(
            runner.lines(),
            vec![
                "gcc -c main.c -O2 -Wall -o main.o",
                "g++ -c util.cpp -std=c++17 -o util.o"
            ]
        );
    }

    #[test]
    fn test_unset_slot_is_an_error_and_runs_nothing() {
        let runner = RecordingRunner::new_success();
        let toolchain = toolchain_with(&runner);

        let err = toolchain.assemble("a.asm", "", "a.o", false).unwrap_err();

        assert!(matches!(
            err,
            AppError::Domain(DomainError::SlotUnset(ToolchainSlot::Assembler))
        ));
        assert!(err.to_string().contains("assembler"));
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn test_child_failure_is_reported_not_raised() {
        let runner = RecordingRunner::new(MockBehavior::ExitCode(1));
        let toolchain = toolchain_with(&runner);

        let result = toolchain.create_directory("exists", false).unwrap();

        assert_eq!(result.status, ExecutionStatus::Failed);
        assert_eq!(result.exit_code, Some(1));
        assert!(result.ensure_success().is_err());
    }

    #[test]
    fn test_spawn_failure_propagates() {
        let runner = RecordingRunner::new(MockBehavior::SpawnFail("no shell".to_string()));
        let toolchain = toolchain_with(&runner);

        let err = toolchain.remove_directory_recursive("build", false).unwrap_err();

        assert!(matches!(
            err,
            AppError::Execution(ExecutionError::SpawnFailed { .. })
        ));
    }

    #[test]
    fn test_create_sized_file_uses_dd() {
        let runner = RecordingRunner::new_success();
        let toolchain = toolchain_with(&runner);

        toolchain.create_sized_file("disk.img", 1474560, false).unwrap();

        assert_eq!(
            runner.lines(),
            vec!["dd if=/dev/zero of=disk.img bs=1 count=1474560"]
        );
    }

    #[test]
    fn test_write_bytes_goes_through_file_system() {
        let runner = RecordingRunner::new_success();
        let fs = RecordingFileSystem::new();
        let toolchain = Toolchain::new(
            ToolchainConfig::new(),
            Arc::new(runner.clone()),
            Arc::new(fs.clone()),
        );

        toolchain
            .write_bytes(&[0x55, 0xAA], 510, "mbr.bin", false)
            .unwrap();

        let written = fs.written(Path::new("mbr.bin")).unwrap();
        assert_eq!(written.len(), 512);
        assert_eq!(&written[510..], &[0x55, 0xAA]);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn test_listing_and_folder_checks_delegate() {
        let fs = RecordingFileSystem::with_files(["src/boot.asm", "src/kernel/main.c"]);
        let toolchain = Toolchain::new(
            ToolchainConfig::new(),
            Arc::new(RecordingRunner::new_success()),
            Arc::new(fs),
        );

        assert!(toolchain.folder_exists("src/kernel"));
        assert!(!toolchain.folder_exists("out"));
        assert_eq!(toolchain.list_files("src").unwrap().len(), 2);
        assert!(toolchain.list_files("out").is_err());
    }
}
