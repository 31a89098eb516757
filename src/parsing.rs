//! Statement tree parsing
//!
//! Turns comment-free source into a tree of statements: plain clauses and
//! `header { ... }` blocks whose interiors are themselves statements. Braces are
//! balanced with real nesting, so a block may contain other blocks.
//!
//! ```text
//! statements := (clause ';' | block)* clause?
//! block      := header '{' statements '}' ';'?
//! ```

use crate::error::{CompileError, Result};
use crate::lexing::{tokenize, Token};
use std::ops::Range;

/// One unit of parsed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Trimmed clause text, never empty.
    Clause(String),
    Block(Block),
}

/// A `header { body };` construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The command phrase in front of `{`, trimmed.
    pub header: String,
    pub body: Vec<Statement>,
    /// The block's source text, for error messages.
    pub source: String,
}

/// Parse source into top-level statements.
pub fn parse(source: &str) -> Result<Vec<Statement>> {
    let mut parser = Parser {
        source,
        tokens: tokenize(source),
        pos: 0,
    };
    parser.statements(None)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Parse statements until end of input, or until the `}` closing the
    /// block opened by `open` (left unconsumed).
    fn statements(&mut self, open: Option<(&str, usize)>) -> Result<Vec<Statement>> {
        let source = self.source;
        let mut statements = Vec::new();
        let mut pending: Option<Range<usize>> = None;

        while let Some((token, span)) = self.tokens.get(self.pos).cloned() {
            match token {
                Token::Semicolon => {
                    self.flush(&mut pending, &mut statements);
                    self.pos += 1;
                }
                Token::OpenBrace => {
                    let header_start = pending.as_ref().map_or(span.start, |p| p.start);
                    let header = source[header_start..span.start].trim();
                    pending = None;
                    if header.is_empty() {
                        return Err(CompileError::unparsable(
                            self.snippet(span.start),
                            "block has no command",
                        ));
                    }
                    self.pos += 1;
                    let body = self.statements(Some((header, header_start)))?;
                    let close = self.close_block();
                    statements.push(Statement::Block(Block {
                        header: header.to_string(),
                        body,
                        source: source[header_start..close].trim_start().to_string(),
                    }));
                }
                Token::CloseBrace => {
                    if open.is_none() {
                        return Err(CompileError::unparsable(
                            self.snippet(span.start),
                            "unexpected `}`",
                        ));
                    }
                    self.flush(&mut pending, &mut statements);
                    return Ok(statements);
                }
                Token::Literal | Token::Raw | Token::Text => {
                    let start = pending.as_ref().map_or(span.start, |p| p.start);
                    pending = Some(start..span.end);
                    self.pos += 1;
                }
            }
        }

        if let Some((header, start)) = open {
            return Err(CompileError::unparsable(
                self.snippet(start),
                format!("missing `}}` closing `{header}` block"),
            ));
        }
        self.flush(&mut pending, &mut statements);
        Ok(statements)
    }

    /// Consume the `}` of a block plus an optional trailing `;`, returning the
    /// byte offset just past what was consumed.
    fn close_block(&mut self) -> usize {
        let (_, close) = self.tokens[self.pos].clone();
        self.pos += 1;
        let mut end = close.end;

        let mut lookahead = self.pos;
        if let Some((Token::Text, span)) = self.tokens.get(lookahead) {
            if self.source[span.clone()].trim().is_empty() {
                lookahead += 1;
            }
        }
        if let Some((Token::Semicolon, span)) = self.tokens.get(lookahead) {
            end = span.end;
            self.pos = lookahead + 1;
        }
        end
    }

    fn flush(&self, pending: &mut Option<Range<usize>>, statements: &mut Vec<Statement>) {
        if let Some(span) = pending.take() {
            let text = self.source[span].trim();
            if !text.is_empty() {
                statements.push(Statement::Clause(text.to_string()));
            }
        }
    }

    /// The rest of the line starting at `offset`.
    fn snippet(&self, offset: usize) -> String {
        let rest = &self.source[offset..];
        rest.lines().next().unwrap_or(rest).trim().to_string()
    }
}
