//! Tokenization of comment-free rgr source
//!
//! The tokenizer only separates the structural characters (`{`, `}`, `;`) from
//! everything else, keeping quoted (`"..."`) and raw (`` `...` ``) strings whole
//! so that structural characters inside them are not mistaken for structure.
//! Clause text is later recovered from the source through the token spans.

use logos::Logos;
use std::ops::Range;

/// All tokens the rgr tokenizer produces.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token(";")]
    Semicolon,

    // Quoted literal, escaped when compiled
    #[regex(r#""[^"\n]*""#)]
    Literal,

    // Raw fragment, passed through verbatim
    #[regex(r"`[^`]*`")]
    Raw,

    // Anything else, including a lone unterminated quote or backtick
    #[regex(r#"[^{};"`]+"#)]
    #[regex(r#"["`]"#, priority = 1)]
    Text,
}

/// Tokenize source, pairing every token with its byte range.
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        // Every byte is covered by some pattern; anything logos still rejects
        // is carried along as plain text.
        let token = result.unwrap_or(Token::Text);
        tokens.push((token, lexer.span()));
    }

    tokens
}
