//! Common types shared across Chroma crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output representation of a generated color module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// Quoted, hash-prefixed strings (`"#dc143c"`).
    Strings,
    /// Decimal integers (`14423100`).
    Numbers,
    /// Bare hexadecimal literals (`0xdc143c`).
    Hex,
}

impl FormatKind {
    /// Every format, in build order.
    pub const ALL: [FormatKind; 3] = [Self::Strings, Self::Numbers, Self::Hex];

    /// Stable lowercase name used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Strings => "strings",
            Self::Numbers => "numbers",
            Self::Hex => "hex",
        }
    }

    /// Default file name of the generated document.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Strings => "colors-strings.ts",
            Self::Numbers => "colors-numbers.ts",
            Self::Hex => "colors-hex.ts",
        }
    }

    /// Subdirectory of the dist tree that receives bundled output.
    pub fn dist_subdir(&self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strings" | "string" => Ok(Self::Strings),
            "numbers" | "number" | "decimal" => Ok(Self::Numbers),
            "hex" | "hex_literal" => Ok(Self::Hex),
            other => Err(format!(
                "unknown format '{other}' (expected one of: strings, numbers, hex)"
            )),
        }
    }
}
