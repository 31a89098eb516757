//! Regex-driven block rewriting
//!
//! Finds the first block in the text, compiles it and splices the result back
//! in as a raw clause (`` `fragment`; ``), then scans again from the top until
//! no block is left. The remaining text is split on `;` and compiled clause by
//! clause.
//!
//! Blocks must start at the beginning of a line, and the interior must start on
//! the line after `{`. A block ends at the first `};` after its header, so a
//! block nested inside another cuts the outer one short.

use crate::clause::parse_clause;
use crate::commands::Command;
use crate::context::CompileContext;
use crate::error::{CompileError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[\w \t.<>]+\{(?s:.)*?\};").unwrap());
static BLOCK_PARTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<command>[\w\s.<>]+?)\s*\{\n(?P<interior>(?s:.)+?)\}").unwrap()
});

/// Rewrite every block of `source` into a raw clause.
pub fn simplify_blocks(source: &str, ctx: &mut CompileContext) -> Result<String> {
    let mut text = source.to_string();

    while let Some(found) = BLOCK.find(&text) {
        let range = found.range();
        let block = found.as_str();
        let parts = BLOCK_PARTS.captures(block).ok_or_else(|| {
            CompileError::unparsable(block, "expected `command {` followed by a line break")
        })?;

        let command = Command::parse(parts["command"].trim())?;
        let interior = compile_clauses(&parts["interior"], command.joiner(), ctx)?;
        log::trace!("rewrote {block:?} -> {command:?} over {interior:?}");

        let replacement = match command {
            Command::Define(name) => {
                ctx.define(&name, interior)?;
                String::new()
            }
            command => command
                .wrap(&interior)
                .map(|fragment| format!("`{fragment}`;"))
                .unwrap_or_default(),
        };
        text.replace_range(range, &replacement);
    }

    Ok(text)
}

/// Split text on `;` and compile each non-empty clause.
pub fn compile_clauses(text: &str, joiner: &str, ctx: &CompileContext) -> Result<String> {
    let mut fragments = Vec::new();
    for piece in text.split(';') {
        let clause = piece.trim();
        if clause.is_empty() {
            continue;
        }
        fragments.push(parse_clause(clause, ctx)?);
    }
    Ok(fragments.join(joiner))
}

/// Compile comment-free source the legacy way.
pub fn resolve(source: &str, ctx: &mut CompileContext) -> Result<String> {
    let simplified = simplify_blocks(source, ctx)?;
    compile_clauses(&simplified, "", ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> Result<String> {
        resolve(source, &mut CompileContext::new())
    }

    #[test]
    fn test_blocks_become_raw_clauses() {
        let mut ctx = CompileContext::new();
        let text = simplify_blocks("match {\n\"a\";\n};\n\"b\";", &mut ctx).unwrap();
        assert_eq!(text, "`(?:a)`;\n\"b\";");
    }

    #[test]
    fn test_lookbehind() {
        assert_eq!(
            compile("before {\n\"www.\";\n};\nsome of <word>;\n\".com\"").unwrap(),
            "(?<=www\\.)\\w+\\.com"
        );
    }

    #[test]
    fn test_alternation() {
        assert_eq!(
            compile("either {\n\"corgi\";\n\"shiba\";\n\"husky\";\n};").unwrap(),
            "(?:corgi|shiba|husky)"
        );
    }

    #[test]
    fn test_let() {
        assert_eq!(
            compile("let .dog {\n\"corgi\";\n};\n\"a \";\n.dog;").unwrap(),
            "a corgi"
        );
    }

    #[test]
    fn test_sequential_blocks() {
        let source = "capture as first {\n<num>;\n};\n\"-\";\ncapture as second {\n<num>;\n};";
        assert_eq!(compile(source).unwrap(), "(?<first>\\d)\\-(?<second>\\d)");
    }

    #[test]
    fn test_first_close_ends_the_block() {
        // The inner block's `};` closes the outer block, leaving the inner
        // header behind as a bare clause and a stray `};` at the end.
        let source = "match {\neither {\n\"a\";\n};\n\"b\";\n};";
        let mut ctx = CompileContext::new();
        let text = simplify_blocks(source, &mut ctx).unwrap();
        assert_eq!(text, "`(?:either {\n\"a\")`;\n\"b\";\n};");
    }

    #[test]
    fn test_interior_must_start_on_new_line() {
        let err = compile("match {\"a\";};").unwrap_err();
        assert!(matches!(err, CompileError::UnparsableBlock { .. }));
    }

    #[test]
    fn test_unknown_command() {
        let err = compile("around {\n\"a\";\n};").unwrap_err();
        assert!(matches!(err, CompileError::UnknownCommand { .. }));
    }
}
