//! Block resolution
//!
//! Blocks are compiled into atomic fragments, innermost first, so that by the
//! time a clause sequence is joined every element is a finished regex fragment.
//!
//! Two resolvers exist:
//!
//! * the nested resolver in this module walks the statement tree produced by
//!   [`crate::parsing`]; braces nest properly and everything resolves strictly
//!   in source order
//! * [`legacy`] rewrites the source text one block at a time with regexes, where
//!   a block ends at the first `};` it contains; kept for sources written
//!   against that behavior

pub mod legacy;

use crate::clause::parse_clause;
use crate::commands::Command;
use crate::context::CompileContext;
use crate::error::Result;
use crate::parsing::{Block, Statement};

/// Compile a statement sequence, concatenating the fragments.
pub fn resolve(statements: &[Statement], ctx: &mut CompileContext) -> Result<String> {
    resolve_joined(statements, "", ctx)
}

/// Compile a statement sequence, separating the fragments with `joiner`.
///
/// Statements that produce no text (`let` blocks) contribute nothing, not even
/// a separator.
pub fn resolve_joined(
    statements: &[Statement],
    joiner: &str,
    ctx: &mut CompileContext,
) -> Result<String> {
    let mut fragments = Vec::with_capacity(statements.len());
    for statement in statements {
        if let Some(fragment) = resolve_statement(statement, ctx)? {
            fragments.push(fragment);
        }
    }
    Ok(fragments.join(joiner))
}

fn resolve_statement(statement: &Statement, ctx: &mut CompileContext) -> Result<Option<String>> {
    match statement {
        Statement::Clause(clause) => {
            let fragment = parse_clause(clause, ctx)?;
            log::trace!("clause {clause:?} -> {fragment:?}");
            Ok(Some(fragment))
        }
        Statement::Block(block) => resolve_block(block, ctx),
    }
}

/// Compile one block, binding its variable for `let` blocks.
pub fn resolve_block(block: &Block, ctx: &mut CompileContext) -> Result<Option<String>> {
    let command = Command::parse(&block.header)?;
    let interior = resolve_joined(&block.body, command.joiner(), ctx)?;
    log::trace!("block {:?} -> {command:?} over {interior:?}", block.header);

    match command {
        Command::Define(name) => {
            ctx.define(&name, interior)?;
            Ok(None)
        }
        command => Ok(command.wrap(&interior)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use crate::parsing::parse;

    fn resolve_source(source: &str) -> Result<String> {
        let statements = parse(source)?;
        resolve(&statements, &mut CompileContext::new())
    }

    #[test]
    fn test_lookbehind() {
        assert_eq!(
            resolve_source("before {\n\"www.\";\n};\nsome of <word>;\n\".com\"").unwrap(),
            "(?<=www\\.)\\w+\\.com"
        );
    }

    #[test]
    fn test_lookahead() {
        assert_eq!(
            resolve_source("some of <word>;\nafter {\n\".com\";\n};").unwrap(),
            "\\w+(?=\\.com)"
        );
    }

    #[test]
    fn test_alternation() {
        assert_eq!(
            resolve_source("either {\n\"corgi\";\n\"shiba\";\n\"husky\";\n};").unwrap(),
            "(?:corgi|shiba|husky)"
        );
    }

    #[test]
    fn test_capture() {
        assert_eq!(
            resolve_source("capture as shiba {\n\"inu\";\n};").unwrap(),
            "(?<shiba>inu)"
        );
    }

    #[test]
    fn test_nesting() {
        let source = "capture as dog {\n  either {\n    \"corgi\";\n    \"shiba\";\n  };\n  maybe of \"s\";\n};";
        assert_eq!(resolve_source(source).unwrap(), "(?<dog>(?:corgi|shiba)s?)");
    }

    #[test]
    fn test_let_emits_nothing() {
        let source = "let .dog {\n either {\n\"corgi\";\n\"husky\";\n};\n};\n\"my \";\n.dog;";
        assert_eq!(resolve_source(source).unwrap(), "my (?:corgi|husky)");
    }

    #[test]
    fn test_let_inside_alternation_adds_no_separator() {
        let source = "either {\n\"a\";\nlet .x {\n\"b\";\n};\n\"c\";\n};\n.x;";
        assert_eq!(resolve_source(source).unwrap(), "(?:a|c)b");
    }

    #[test]
    fn test_reference_before_definition_is_bareword() {
        let source = ".dog;\nlet .dog {\n\"corgi\";\n};\n.dog;";
        assert_eq!(resolve_source(source).unwrap(), ".dogcorgi");
    }

    #[test]
    fn test_unknown_command() {
        let err = resolve_source("around {\n\"a\";\n};").unwrap_err();
        assert!(matches!(err, CompileError::UnknownCommand { command } if command == "around"));
    }

    #[test]
    fn test_error_inside_block_propagates() {
        let err = resolve_source("match {\n<bogus>;\n};").unwrap_err();
        assert!(matches!(err, CompileError::UnknownConstant { .. }));
    }
}
