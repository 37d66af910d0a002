// Command Domain Model
// In-memory program + ordered arguments, rendered into a single shell line

use std::fmt;

/// Separator placed between the program and each argument
pub const ARGUMENT_SEPARATOR: char = ' ';

/// A program name plus an ordered list of arguments, not yet serialized.
///
/// Every string is an owned copy. Lengths are derived from the strings
/// themselves, so the argument list and its lengths can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    program: Option<String>,
    arguments: Vec<String>,
}

impl Command {
    /// Create an empty command (no program, no arguments)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a command with its program already set
    ///
    /// # Example
    /// ```
    /// use ccs_core::domain::Command;
    ///
    /// let cmd = Command::with_program("mkdir").arg("-p").arg("build/obj");
    /// assert_eq!(cmd.render(), "mkdir -p build/obj");
    /// ```
    pub fn with_program(program: impl Into<String>) -> Self {
        let mut cmd = Self::new();
        cmd.set_program(program);
        cmd
    }

    /// Set (or replace) the program. An empty name is accepted.
    pub fn set_program(&mut self, program: impl Into<String>) {
        self.program = Some(program.into());
    }

    /// Append an argument to the end of the list
    pub fn add_argument(&mut self, argument: impl Into<String>) {
        self.arguments.push(argument.into());
    }

    /// Remove every argument equal to `argument`, keeping the others in order.
    ///
    /// Returns the number of removed arguments (0 when there was no match).
    pub fn remove_argument(&mut self, argument: &str) -> usize {
        let before = self.arguments.len();
        self.arguments.retain(|a| a != argument);
        before - self.arguments.len()
    }

    /// Chainable form of [`Command::add_argument`]
    pub fn arg(mut self, argument: impl Into<String>) -> Self {
        self.add_argument(argument);
        self
    }

    /// Chainable form appending several arguments in order
    pub fn args<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Byte length of the program (0 when unset)
    pub fn program_length(&self) -> usize {
        self.program.as_ref().map_or(0, String::len)
    }

    /// Byte length of every argument, in insertion order
    pub fn argument_lengths(&self) -> Vec<usize> {
        self.arguments.iter().map(String::len).collect()
    }

    /// True when neither a program nor arguments were set
    pub fn is_empty(&self) -> bool {
        self.program.is_none() && self.arguments.is_empty()
    }

    /// Exact byte length of [`Command::render`]:
    /// program + every argument + one separator per argument.
    pub fn rendered_len(&self) -> usize {
        self.program_length()
            + self.arguments.iter().map(String::len).sum::<usize>()
            + self.arguments.len()
    }

    /// Serialize into a single command line.
    ///
    /// Arguments are copied verbatim: no quoting, no escaping. The shell that
    /// eventually receives the line applies its own parsing.
    pub fn render(&self) -> String {
        let mut line = String::with_capacity(self.rendered_len());
        if let Some(program) = &self.program {
            line.push_str(program);
        }
        for argument in &self.arguments {
            line.push(ARGUMENT_SEPARATOR);
            line.push_str(argument);
        }
        debug_assert_eq!(line.len(), self.rendered_len());
        line
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_command_is_empty() {
        let cmd = Command::new();
        assert!(cmd.is_empty());
        assert!(cmd.program().is_none());
        assert_eq!(cmd.program_length(), 0);
        assert!(cmd.arguments().is_empty());
        assert_eq!(cmd.render(), "");
    }

    #[test]
    fn test_echo_hello_round_trip() {
        let mut cmd = Command::new();
        cmd.set_program("echo");
        cmd.add_argument("hello");

        let line = cmd.render();
        assert_eq!(line, "echo hello");
        assert_eq!(line.len(), 10);
        assert_eq!(cmd.rendered_len(), 10);
    }

    #[test]
    fn test_program_only_has_no_trailing_separator() {
        let cmd = Command::with_program("make");
        assert_eq!(cmd.render(), "make");
        assert_eq!(cmd.rendered_len(), 4);
    }

    #[test]
    fn test_lengths_track_arguments() {
        let mut cmd = Command::with_program("nasm");
        let values = ["boot.asm", "-f", "bin", "", "ünïcode"];
        for (i, v) in values.iter().enumerate() {
            cmd.add_argument(*v);
            assert_eq!(cmd.arguments().len(), i + 1);
            assert_eq!(cmd.argument_lengths().len(), i + 1);
        }
        let expected: Vec<usize> = values.iter().map(|v| v.len()).collect();
        assert_eq!(cmd.argument_lengths(), expected);
    }

    #[test]
    fn test_render_splits_back_into_parts() {
        let cmd = Command::with_program("ld").args(["kernel.o", "-T", "link.ld", "-o", "kernel.bin"]);
        let rendered = cmd.render();
        let split: Vec<&str> = rendered.split(' ').collect();
        assert_eq!(split.len(), 6);
        assert_eq!(split[0], "ld");
        assert_eq!(&split[1..], ["kernel.o", "-T", "link.ld", "-o", "kernel.bin"]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let cmd = Command::with_program("gcc").arg("-c").arg("main.c");
        assert_eq!(cmd.render(), cmd.render());
        assert_eq!(cmd.to_string(), cmd.render());
    }

    #[test]
    fn test_arguments_before_program() {
        let mut cmd = Command::new();
        cmd.add_argument("-rf");
        cmd.add_argument("build");
        assert_eq!(cmd.render(), " -rf build");

        cmd.set_program("rm");
        assert_eq!(cmd.render(), "rm -rf build");
    }

    #[test]
    fn test_set_program_overwrites() {
        let mut cmd = Command::with_program("clang");
        cmd.set_program("gcc");
        assert_eq!(cmd.program(), Some("gcc"));
        assert_eq!(cmd.program_length(), 3);

        cmd.set_program("");
        assert_eq!(cmd.program(), Some(""));
        assert_eq!(cmd.program_length(), 0);
        assert!(!cmd.is_empty());
    }

    #[test]
    fn test_remove_argument_removes_all_occurrences_in_order() {
        let mut cmd = Command::with_program("cc").args(["-g", "a.c", "-g", "b.c", "-g"]);

        let removed = cmd.remove_argument("-g");

        assert_eq!(removed, 3);
        assert_eq!(cmd.arguments(), ["a.c", "b.c"]);
        assert_eq!(cmd.argument_lengths(), vec![3, 3]);
        assert_eq!(cmd.render(), "cc a.c b.c");
    }

    #[test]
    fn test_remove_adjacent_duplicates() {
        let mut cmd = Command::with_program("cc").args(["-O2", "-O2", "x.c"]);
        assert_eq!(cmd.remove_argument("-O2"), 2);
        assert_eq!(cmd.arguments(), ["x.c"]);
    }

    #[test]
    fn test_remove_absent_argument_is_noop() {
        let mut cmd = Command::with_program("cc").args(["a.c", "b.c"]);
        let before = cmd.clone();

        assert_eq!(cmd.remove_argument("c.c"), 0);
        assert_eq!(cmd, before);

        let mut empty = Command::new();
        assert_eq!(empty.remove_argument("anything"), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_remove_requires_exact_match() {
        let mut cmd = Command::with_program("cc").args(["-Wall", "-W"]);
        assert_eq!(cmd.remove_argument("-W"), 1);
        assert_eq!(cmd.arguments(), ["-Wall"]);
    }
}
