//! Instruction mnemonics.
//!
//! The guide names the machine instruction an intrinsic compiles to in free
//! text. Library routines (SVML entries) carry a `...` placeholder instead of
//! a mnemonic; those map to [`Mnemonic::unknown`].

use std::fmt;

/// Uppercase instruction mnemonic, best-effort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mnemonic(String);

const UNKNOWN: &str = "UNKNOWN";

impl Mnemonic {
    /// Sentinel for intrinsics without a fixed instruction.
    pub fn unknown() -> Mnemonic {
        Mnemonic(UNKNOWN.to_string())
    }

    /// Parse mnemonic text; trims decoration and uppercases. Empty text and
    /// the guide's `...` placeholder resolve to the unknown sentinel.
    pub fn parse(s: &str) -> Mnemonic {
        let word = s.trim().split_whitespace().next().unwrap_or("");
        if word.is_empty() || word == "..." {
            return Mnemonic::unknown();
        }
        Mnemonic(word.to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN
    }
}

impl Default for Mnemonic {
    fn default() -> Self {
        Mnemonic::unknown()
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uppercases_first_word() {
        assert_eq!(Mnemonic::parse("vpaddd").as_str(), "VPADDD");
        assert_eq!(Mnemonic::parse("  paddd xmm, xmm ").as_str(), "PADDD");
    }

    #[test]
    fn placeholder_is_unknown() {
        assert!(Mnemonic::parse("...").is_unknown());
        assert!(Mnemonic::parse("").is_unknown());
        assert_eq!(Mnemonic::parse("UNKNOWN"), Mnemonic::unknown());
    }
}
