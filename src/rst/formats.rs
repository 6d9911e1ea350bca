//! Tree output formats
//!
//! The parser hands over a bracketed tree; formatters decide how it is laid
//! out. Each format implements [`Formatter`] and is looked up by name in a
//! [`FormatRegistry`].
//!
//! Built-in formats:
//! - `pretty`: margin-wrapped, two spaces per nesting level (the default)
//! - `flat`: the whole tree on one line
//!
//! Every format ends its output with a newline.

pub mod bracket;
pub mod lexer;

pub use bracket::{BracketTree, Child};

use std::collections::HashMap;
use thiserror::Error;

/// Wrap margin used when none is configured
pub const DEFAULT_MARGIN: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    #[error("malformed bracketed tree: {0}")]
    Syntax(String),
}

pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "pretty", "flat")
    fn name(&self) -> &str;

    fn serialize(&self, tree: &BracketTree) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Margin-wrapped output
#[derive(Debug, Clone, Copy)]
pub struct PrettyFormatter {
    pub margin: usize,
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
        }
    }
}

impl Formatter for PrettyFormatter {
    fn name(&self) -> &str {
        "pretty"
    }

    fn serialize(&self, tree: &BracketTree) -> Result<String, FormatError> {
        Ok(format!("{}\n", tree.pformat(self.margin)))
    }

    fn description(&self) -> &str {
        "Bracketed tree wrapped at the configured margin"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlatFormatter;

impl Formatter for FlatFormatter {
    fn name(&self) -> &str {
        "flat"
    }

    fn serialize(&self, tree: &BracketTree) -> Result<String, FormatError> {
        Ok(format!("{}\n", tree.to_flat()))
    }

    fn description(&self) -> &str {
        "Bracketed tree on a single line"
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any existing one with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, tree: &BracketTree, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(tree)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registry with the built-in formats, `pretty` wrapping at `margin`
    pub fn with_margin(margin: usize) -> Self {
        let mut registry = Self::new();
        registry.register(PrettyFormatter { margin });
        registry.register(FlatFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_margin(DEFAULT_MARGIN)
    }
}
