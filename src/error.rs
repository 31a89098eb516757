//! Errors produced while compiling rgr source into a pattern.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure the compiler can report.
///
/// Compilation is fail-fast: the first error met during left-to-right,
/// depth-first resolution is returned and no partial pattern is produced.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A `<name>` token that is not in the constant table.
    #[error("no constant named {name}")]
    UnknownConstant { name: String },

    /// A block whose command phrase is not a known command.
    #[error("unknown command: {command}")]
    UnknownCommand { command: String },

    /// A block that could not be split into a command and an interior.
    #[error("unable to parse block `{block}`: {reason}")]
    UnparsableBlock { block: String, reason: String },

    /// A `let` block for a name that already has a value.
    #[error("variable {name} is already defined")]
    DuplicateVariable { name: String },

    /// A file reached a second time while following `#import` directives.
    #[error("double import of file {}", path.display())]
    DoubleImport { path: PathBuf },

    #[error("unable to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The assembled pattern is rejected by the target regex dialect.
    #[error("compiled pattern `{pattern}` is not a valid regex: {message}")]
    InvalidRegexOutput { pattern: String, message: String },
}

impl CompileError {
    pub(crate) fn unparsable(block: impl Into<String>, reason: impl Into<String>) -> Self {
        CompileError::UnparsableBlock {
            block: block.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
