//! Import resolution
//!
//! A file may start with one `#import name;` directive, pulling in `name.rgr`
//! (relative to the importing file). Imports are followed depth-first with a
//! stack of pending files; the imported text is placed before the text of the
//! file that imported it. Reaching any file a second time, the root included,
//! is an error.

use crate::error::{CompileError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

static IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#import\s+([.\w\-/]+);").unwrap());

pub const DEFAULT_EXTENSION: &str = "rgr";

/// A file read while following imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub path: PathBuf,
    /// The file's text with its import directive removed.
    pub contents: String,
    /// Files this one imports, already resolved against its directory.
    pub imports: Vec<PathBuf>,
}

impl ImportedFile {
    pub fn load(path: &Path, extension: &str) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CompileError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_source(path, &text, extension))
    }

    /// Split the import directive, if any, off already-read text.
    pub fn from_source(path: &Path, text: &str, extension: &str) -> Self {
        let (contents, imports) = match IMPORT.captures(text) {
            Some(caps) => {
                let directive = caps.get(0).map_or(0, |m| m.end());
                let target = format!("{}.{extension}", &caps[1]);
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                (text[directive..].to_string(), vec![base.join(target)])
            }
            None => (text.to_string(), Vec::new()),
        };
        ImportedFile {
            path: path.to_path_buf(),
            contents,
            imports,
        }
    }
}

/// Follows `#import` directives from a root file.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    extension: String,
}

impl ImportResolver {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_EXTENSION)
    }

    /// Use a different extension for imported files (without the dot).
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Read `root` and everything it imports, in visiting order.
    pub fn collect(&self, root: &Path) -> Result<Vec<ImportedFile>> {
        let mut pending = vec![root.to_path_buf()];
        let mut visited = HashSet::new();
        let mut files = Vec::new();

        while let Some(path) = pending.pop() {
            let key = fs::canonicalize(&path).map_err(|source| CompileError::FileRead {
                path: path.clone(),
                source,
            })?;
            if !visited.insert(key) {
                return Err(CompileError::DoubleImport { path });
            }

            let file = ImportedFile::load(&path, &self.extension)?;
            log::trace!("read {} importing {:?}", path.display(), file.imports);
            pending.extend(file.imports.iter().cloned());
            files.push(file);
        }

        Ok(files)
    }

    /// Produce one source buffer with every imported file ahead of its importer.
    pub fn resolve(&self, root: &Path) -> Result<String> {
        let files = self.collect(root)?;
        log::debug!("resolved {} file(s) from {}", files.len(), root.display());
        let contents: Vec<&str> = files.iter().rev().map(|f| f.contents.as_str()).collect();
        Ok(contents.join("\n"))
    }
}

impl Default for ImportResolver {
    fn default() -> Self {
        Self::new()
    }
}
