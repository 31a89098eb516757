//! Compilation pipeline
//!
//! ```text
//! file ─► imports ─┐
//!                  ├─► strip comments ─► resolve blocks ─► compile clauses ─► validate
//! text ────────────┘
//! ```
//!
//! Every stage either hands a complete result to the next or stops the
//! pipeline with the first error; nothing partial is ever returned.

use crate::comments::strip_comments;
use crate::context::CompileContext;
use crate::error::{CompileError, Result};
use crate::imports::{ImportResolver, DEFAULT_EXTENSION};
use crate::parsing::parse;
use crate::resolving::{self, legacy};
use serde::Deserialize;
use std::path::Path;

/// How block constructs are located in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockMode {
    /// Brace-balanced parsing; blocks nest.
    #[default]
    Nested,
    /// Line-anchored regex rewriting where a block ends at its first `};`.
    Legacy,
}

/// Knobs for a [`Compiler`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Reject output the target regex dialect cannot compile.
    pub validate: bool,
    pub block_mode: BlockMode,
    /// Extension appended to `#import` targets, without the dot.
    pub import_extension: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            validate: true,
            block_mode: BlockMode::default(),
            import_extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Compiles rgr source into a regex pattern.
///
/// A compiler holds only options; each call gets its own [`CompileContext`],
/// so one compiler can be reused, and shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compile in-memory source. `#import` directives are not followed.
    pub fn compile_str(&self, source: &str) -> Result<String> {
        self.compile_source(source)
    }

    /// Compile a file together with everything it imports.
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let resolver = ImportResolver::with_extension(&self.options.import_extension);
        let source = resolver.resolve(path.as_ref())?;
        self.compile_source(&source)
    }

    fn compile_source(&self, source: &str) -> Result<String> {
        let source = strip_comments(source);
        log::debug!("stripped comments, {} bytes left", source.len());

        let mut ctx = CompileContext::new();
        let pattern = match self.options.block_mode {
            BlockMode::Nested => {
                let statements = parse(&source)?;
                log::debug!("parsed {} top-level statement(s)", statements.len());
                resolving::resolve(&statements, &mut ctx)?
            }
            BlockMode::Legacy => legacy::resolve(&source, &mut ctx)?,
        };
        log::debug!(
            "compiled pattern {pattern:?} with {} variable(s)",
            ctx.variable_count()
        );

        if self.options.validate {
            validate(&pattern)?;
        }
        Ok(pattern)
    }
}

/// Check that a pattern compiles in the target dialect (named groups and
/// lookaround included).
pub fn validate(pattern: &str) -> Result<()> {
    fancy_regex::Regex::new(pattern)
        .map(drop)
        .map_err(|e| CompileError::InvalidRegexOutput {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Compile in-memory source with default options.
pub fn compile(source: &str) -> Result<String> {
    Compiler::new().compile_str(source)
}

/// Compile a file and its imports with default options.
pub fn compile_file(path: impl AsRef<Path>) -> Result<String> {
    Compiler::new().compile_file(path)
}
