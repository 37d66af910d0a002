// Toolchain Domain Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// One of the four named toolchain slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolchainSlot {
    CCompiler,
    CppCompiler,
    Linker,
    Assembler,
}

impl ToolchainSlot {
    pub const ALL: [ToolchainSlot; 4] = [
        ToolchainSlot::CCompiler,
        ToolchainSlot::CppCompiler,
        ToolchainSlot::Linker,
        ToolchainSlot::Assembler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainSlot::CCompiler => "c_compiler",
            ToolchainSlot::CppCompiler => "cpp_compiler",
            ToolchainSlot::Linker => "linker",
            ToolchainSlot::Assembler => "assembler",
        }
    }
}

impl fmt::Display for ToolchainSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolchainSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c_compiler" | "cc" => Ok(ToolchainSlot::CCompiler),
            "cpp_compiler" | "cxx" => Ok(ToolchainSlot::CppCompiler),
            "linker" | "ld" => Ok(ToolchainSlot::Linker),
            "assembler" | "as" => Ok(ToolchainSlot::Assembler),
            other => Err(DomainError::UnknownSlot(other.to_string())),
        }
    }
}

/// Source language handled by the compile helper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Cpp,
}

impl Language {
    /// Slot holding the compiler for this language
    pub fn compiler_slot(&self) -> ToolchainSlot {
        match self {
            Language::C => ToolchainSlot::CCompiler,
            Language::Cpp => ToolchainSlot::CppCompiler,
        }
    }
}

/// Currently configured toolchain programs.
///
/// Each slot stays `None` until configured. Setting a slot replaces the
/// previous value (last write wins, no history).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub c_compiler: Option<String>,
    pub cpp_compiler: Option<String>,
    pub linker: Option<String>,
    pub assembler: Option<String>,
}

impl ToolchainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one slot, replacing its previous value
    pub fn set(&mut self, slot: ToolchainSlot, value: impl Into<String>) {
        *self.slot_mut(slot) = Some(value.into());
    }

    /// Clear one slot back to unset
    pub fn unset(&mut self, slot: ToolchainSlot) {
        *self.slot_mut(slot) = None;
    }

    pub fn get(&self, slot: ToolchainSlot) -> Option<&str> {
        match slot {
            ToolchainSlot::CCompiler => self.c_compiler.as_deref(),
            ToolchainSlot::CppCompiler => self.cpp_compiler.as_deref(),
            ToolchainSlot::Linker => self.linker.as_deref(),
            ToolchainSlot::Assembler => self.assembler.as_deref(),
        }
    }

    /// Overlay every slot that is set in `other` onto `self`
    pub fn merge(&mut self, other: &ToolchainConfig) {
        for slot in ToolchainSlot::ALL {
            if let Some(value) = other.get(slot) {
                self.set(slot, value);
            }
        }
    }

    fn slot_mut(&mut self, slot: ToolchainSlot) -> &mut Option<String> {
        match slot {
            ToolchainSlot::CCompiler => &mut self.c_compiler,
            ToolchainSlot::CppCompiler => &mut self.cpp_compiler,
            ToolchainSlot::Linker => &mut self.linker,
            ToolchainSlot::Assembler => &mut self.assembler,
        }
    }
}
