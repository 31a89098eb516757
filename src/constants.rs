//! Built-in constants
//!
//! Constants are bracketed symbolic names (`<alpha>`, `<space>`, ...) that stand
//! for a fixed regex fragment. The table is immutable and shared read-only by
//! every compilation.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const BUILTIN: &[(&str, &str)] = &[
    ("<char>", "."),
    ("<space>", "\\s"),
    ("<alpha>", "[a-zA-Z]"),
    ("<alphanum>", "\\w"),
    ("<word>", "\\w"),
    ("<num>", "\\d"),
    ("<!alpha>", "[^a-zA-Z]"),
    ("<!num>", "\\D"),
    ("<!alphanum>", "\\W"),
    ("<!word>", "\\W"),
    ("<start>", "^"),
    ("<end>", "$"),
    ("<newline>", "\n"),
    ("<tab>", "\t"),
    ("<return>", "\r"),
    ("<null>", "\\x00"),
    ("<feed>", "\\f"),
    ("<vertical>", "\\v"),
    ("<hex>", "[0-9a-fA-F]"),
];

static BUILTIN_TABLE: Lazy<ConstantTable> = Lazy::new(|| ConstantTable {
    entries: BUILTIN.iter().copied().collect(),
});

/// Mapping from `<name>` tokens to regex fragments.
#[derive(Debug)]
pub struct ConstantTable {
    entries: HashMap<&'static str, &'static str>,
}

impl ConstantTable {
    /// The table every compilation uses.
    pub fn builtin() -> &'static ConstantTable {
        &BUILTIN_TABLE
    }

    /// Look up a token, brackets included (`"<alpha>"`).
    pub fn get(&self, token: &str) -> Option<&'static str> {
        self.entries.get(token).copied()
    }

    /// All constant names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Whether a token has the `<...>` shape of a constant reference.
///
/// Says nothing about whether the constant exists.
pub fn is_bracketed(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('<') && token.ends_with('>')
}
