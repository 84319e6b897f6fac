//! Color definition files.
//!
//! A color file is two lines of UTF-8 text:
//!
//! ```text
//! warm,bold
//! dc143c
//! ```
//!
//! The first line lists the categories the color belongs to, the second
//! holds six hex digits. Surrounding whitespace is ignored, as is any
//! whitespace inside the category list. Lines past the second are ignored.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::color::{is_identifier, Rgb};

/// Reasons a color file cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorFileError {
    #[error("invalid color name '{0}'")]
    InvalidName(String),

    #[error("expected a category line followed by a hex value line")]
    Incomplete,

    #[error("invalid hex color format '{0}'")]
    InvalidHex(String),

    #[error("no valid category in '{line}'")]
    NoValidCategory { line: String, rejected: Vec<String> },
}

/// One parsed color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    name: String,
    categories: Vec<String>,
    value: Rgb,
    #[serde(skip)]
    source: PathBuf,
}

/// A successfully parsed file plus the category tokens it had to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedColor {
    pub entry: ColorEntry,
    pub rejected_categories: Vec<String>,
}

impl ColorEntry {
    /// Build an entry, checking the name and every category.
    ///
    /// Duplicate categories collapse to their first occurrence.
    pub fn new(
        name: impl Into<String>,
        categories: impl IntoIterator<Item = impl Into<String>>,
        value: Rgb,
        source: impl Into<PathBuf>,
    ) -> Result<Self, ColorFileError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ColorFileError::InvalidName(name));
        }

        let mut unique: Vec<String> = Vec::new();
        let mut rejected = Vec::new();
        for category in categories {
            let category: String = category.into();
            if !is_identifier(&category) {
                rejected.push(category);
            } else if !unique.contains(&category) {
                unique.push(category);
            }
        }

        if unique.is_empty() || !rejected.is_empty() {
            return Err(ColorFileError::NoValidCategory {
                line: rejected.join(","),
                rejected,
            });
        }

        Ok(Self {
            name,
            categories: unique,
            value,
            source: source.into(),
        })
    }

    /// Parse the text of a color file named `name`.
    ///
    /// Invalid category tokens are dropped and reported in
    /// [`ParsedColor::rejected_categories`]; the color still registers
    /// under its remaining categories.
    pub fn parse(
        name: &str,
        content: &str,
        source: impl Into<PathBuf>,
    ) -> Result<ParsedColor, ColorFileError> {
        if !is_identifier(name) {
            return Err(ColorFileError::InvalidName(name.to_string()));
        }

        let mut lines = content.trim().lines();
        let category_line = lines.next().unwrap_or_default();
        let hex = lines.next().map(str::trim).unwrap_or_default();

        if category_line.trim().is_empty() || hex.is_empty() {
            return Err(ColorFileError::Incomplete);
        }

        let value = Rgb::from_hex(hex).ok_or_else(|| ColorFileError::InvalidHex(hex.to_string()))?;

        let compact: String = category_line.chars().filter(|c| !c.is_whitespace()).collect();
        let (valid, rejected): (Vec<&str>, Vec<&str>) =
            compact.split(',').partition(|token| is_identifier(token));

        if valid.is_empty() {
            return Err(ColorFileError::NoValidCategory {
                line: compact.clone(),
                rejected: rejected.into_iter().map(str::to_string).collect(),
            });
        }

        let entry = Self::new(name, valid, value, source)?;
        Ok(ParsedColor {
            entry,
            rejected_categories: rejected.into_iter().map(str::to_string).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn value(&self) -> Rgb {
        self.value
    }

    /// File the entry was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str, content: &str) -> Result<ParsedColor, ColorFileError> {
        ColorEntry::parse(name, content, format!("colors/test/{name}.txt"))
    }

    #[test]
    fn test_parse_two_categories() {
        let parsed = parse("crimson", "warm,bold\ndc143c").unwrap();

        assert_eq!(parsed.entry.name(), "crimson");
        assert_eq!(parsed.entry.categories(), ["warm", "bold"]);
        assert_eq!(parsed.entry.value().value(), 0xdc143c);
        assert_eq!(parsed.entry.source(), Path::new("colors/test/crimson.txt"));
        assert!(parsed.rejected_categories.is_empty());
    }

    #[test]
    fn test_parse_strips_whitespace() {
        let parsed = parse("navy", "\n  cool , dark ,\tdeep \r\n 000080  \n\n").unwrap();
        assert_eq!(parsed.entry.categories(), ["cool", "dark", "deep"]);
        assert_eq!(parsed.entry.value().value(), 0x000080);
    }

    #[test]
    fn test_parse_ignores_extra_lines() {
        let parsed = parse("navy", "cool\n000080\nthis line is ignored").unwrap();
        assert_eq!(parsed.entry.value().value(), 0x000080);
    }

    #[test]
    fn test_invalid_categories_are_dropped_individually() {
        let parsed = parse("teal", "cool,not-valid,,blue_green\n008080").unwrap();

        assert_eq!(parsed.entry.categories(), ["cool", "blue_green"]);
        assert_eq!(parsed.rejected_categories, vec!["not-valid".to_string(), String::new()]);
    }

    #[test]
    fn test_duplicate_categories_collapse() {
        let parsed = parse("teal", "cool,cool,blue\n008080").unwrap();
        assert_eq!(parsed.entry.categories(), ["cool", "blue"]);
    }

    #[test]
    fn test_no_valid_category() {
        let err = parse("teal", "not-valid,also!bad\n008080").unwrap_err();
        assert_eq!(
            err,
            ColorFileError::NoValidCategory {
                line: "not-valid,also!bad".to_string(),
                rejected: vec!["not-valid".to_string(), "also!bad".to_string()],
            }
        );
    }

    #[test]
    fn test_invalid_name() {
        assert_eq!(
            parse("bad!name", "warm\ndc143c").unwrap_err(),
            ColorFileError::InvalidName("bad!name".to_string())
        );
    }

    #[test]
    fn test_invalid_hex() {
        assert_eq!(
            parse("crimson", "warm\nzzzzzz").unwrap_err(),
            ColorFileError::InvalidHex("zzzzzz".to_string())
        );
        assert_eq!(
            parse("crimson", "warm\n#dc143c").unwrap_err(),
            ColorFileError::InvalidHex("#dc143c".to_string())
        );
    }

    #[test]
    fn test_incomplete_files() {
        assert_eq!(parse("a", "").unwrap_err(), ColorFileError::Incomplete);
        assert_eq!(parse("a", "   \n  ").unwrap_err(), ColorFileError::Incomplete);
        assert_eq!(parse("a", "warm").unwrap_err(), ColorFileError::Incomplete);
        assert_eq!(parse("a", "warm\n\ndc143c").unwrap_err(), ColorFileError::Incomplete);
    }

    #[test]
    fn test_new_validates() {
        let rgb = Rgb::from_hex("ffffff").unwrap();
        assert!(ColorEntry::new("white", ["light"], rgb, "x").is_ok());
        assert!(matches!(
            ColorEntry::new("white", Vec::<String>::new(), rgb, "x"),
            Err(ColorFileError::NoValidCategory { .. })
        ));
        assert!(matches!(
            ColorEntry::new("white", ["light", "not valid"], rgb, "x"),
            Err(ColorFileError::NoValidCategory { .. })
        ));
        assert!(matches!(
            ColorEntry::new("wh ite", ["light"], rgb, "x"),
            Err(ColorFileError::InvalidName(_))
        ));
    }
}
