//! Clause parsing
//!
//! A clause is one trimmed, `;`-delimited statement. It compiles to a regex
//! fragment by, in order:
//!
//! 1. whole-clause atoms: a defined `.variable`, a `"literal"` (escaped) or a
//!    `` `raw` `` fragment (verbatim)
//! 2. quantifier phrases, most specific first, since `N to M of` overlaps `N of`:
//!    `N to M of R`, `at least N of R`, `at most N of R`, `N of R`,
//!    `some of R`, `any of R`, `maybe of R`
//! 3. any other atom: a `<constant>` or bare text passed through untouched
//!
//! The request `R` of a quantifier has its quotes stripped or its constant
//! resolved; it is never escaped.

use crate::constants::is_bracketed;
use crate::context::CompileContext;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;

static RANGE_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(\d+)\s+to\s+(\d+)\s+of\s+(.+)$").unwrap());
static AT_LEAST_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^at\s+least\s+(\d+)\s+of\s+(.+)$").unwrap());
static AT_MOST_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^at\s+most\s+(\d+)\s+of\s+(.+)$").unwrap());
static AMOUNT_OF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^(\d+)\s+of\s+(.+)$").unwrap());
static SOME_OF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^some\s+of\s+(.+)$").unwrap());
static ANY_OF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^any\s+of\s+(.+)$").unwrap());
static MAYBE_OF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^maybe\s+of\s+(.+)$").unwrap());

/// How many repetitions a quantifier phrase asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quantifier {
    /// `N to M of`
    Between(String, String),
    /// `at least N of`
    AtLeast(String),
    /// `at most N of`
    AtMost(String),
    /// `N of`
    Exactly(String),
    /// `some of`
    OneOrMore,
    /// `any of`
    ZeroOrMore,
    /// `maybe of`
    Optional,
}

/// A clause recognized as `<quantifier> of <request>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantified<'a> {
    pub quantifier: Quantifier,
    pub request: &'a str,
}

impl<'a> Quantified<'a> {
    /// Recognize a quantifier phrase, trying the more specific forms first.
    pub fn parse(clause: &'a str) -> Option<Self> {
        let (quantifier, request) = if let Some(caps) = RANGE_OF.captures(clause) {
            (
                Quantifier::Between(caps[1].to_string(), caps[2].to_string()),
                caps.get(3),
            )
        } else if let Some(caps) = AT_LEAST_OF.captures(clause) {
            (Quantifier::AtLeast(caps[1].to_string()), caps.get(2))
        } else if let Some(caps) = AT_MOST_OF.captures(clause) {
            (Quantifier::AtMost(caps[1].to_string()), caps.get(2))
        } else if let Some(caps) = AMOUNT_OF.captures(clause) {
            (Quantifier::Exactly(caps[1].to_string()), caps.get(2))
        } else if let Some(caps) = SOME_OF.captures(clause) {
            (Quantifier::OneOrMore, caps.get(1))
        } else if let Some(caps) = ANY_OF.captures(clause) {
            (Quantifier::ZeroOrMore, caps.get(1))
        } else if let Some(caps) = MAYBE_OF.captures(clause) {
            (Quantifier::Optional, caps.get(1))
        } else {
            return None;
        };

        let request = request?.as_str().trim();
        if request.is_empty() {
            return None;
        }
        Some(Quantified {
            quantifier,
            request,
        })
    }

    pub fn compile(&self, ctx: &CompileContext) -> Result<String> {
        // Constants are already atomic and need no group.
        if let Quantifier::Exactly(n) = &self.quantifier {
            if is_bracketed(self.request) {
                return Ok(format!("{}{{{n}}}", ctx.constant(self.request)?));
            }
        }

        let what = resolve_request(self.request, ctx)?;
        Ok(match &self.quantifier {
            Quantifier::Between(n, m) => format!("({what}){{{n},{m}}}"),
            Quantifier::AtLeast(n) => format!("({what}){{{n},}}"),
            Quantifier::AtMost(n) => format!("({what}){{,{n}}}"),
            Quantifier::Exactly(n) => format!("({what}){{{n}}}"),
            Quantifier::OneOrMore => format!("{what}+"),
            Quantifier::ZeroOrMore => format!("{what}*"),
            Quantifier::Optional => format!("{what}?"),
        })
    }
}

/// Compile one trimmed clause into a regex fragment.
pub fn parse_clause(clause: &str, ctx: &CompileContext) -> Result<String> {
    if is_whole_atom(clause, ctx) {
        return resolve_atomic(clause, ctx);
    }
    if let Some(quantified) = Quantified::parse(clause) {
        return quantified.compile(ctx);
    }
    resolve_atomic(clause, ctx)
}

/// Resolve a token that carries no quantifier.
///
/// * `"text"` - the text with every regex metacharacter escaped
/// * `` `text` `` - the text verbatim
/// * `<name>` - the constant's fragment, or an error for an unknown constant
/// * `.name` - the variable's fragment, if defined
/// * anything else - the token unchanged
pub fn resolve_atomic(token: &str, ctx: &CompileContext) -> Result<String> {
    if let Some(inner) = strip_quotes(token, '"') {
        return Ok(regex::escape(inner));
    }
    if let Some(inner) = strip_quotes(token, '`') {
        return Ok(inner.to_string());
    }
    if is_bracketed(token) {
        return ctx.constant(token).map(str::to_string);
    }
    if let Some(fragment) = ctx.variable(token) {
        return Ok(fragment.to_string());
    }
    Ok(token.to_string())
}

fn resolve_request(request: &str, ctx: &CompileContext) -> Result<String> {
    if let Some(inner) = strip_quotes(request, '"').or_else(|| strip_quotes(request, '`')) {
        return Ok(inner.to_string());
    }
    if is_bracketed(request) {
        return ctx.constant(request).map(str::to_string);
    }
    Ok(request.to_string())
}

fn is_whole_atom(clause: &str, ctx: &CompileContext) -> bool {
    ctx.variable(clause).is_some()
        || strip_quotes(clause, '"').is_some()
        || strip_quotes(clause, '`').is_some()
}

fn strip_quotes(token: &str, quote: char) -> Option<&str> {
    token
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;

    fn compile(clause: &str) -> String {
        parse_clause(clause, &CompileContext::new()).unwrap()
    }

    #[test]
    fn test_literal_is_escaped() {
        assert_eq!(compile("\"www.\""), "www\\.");
        assert_eq!(compile("\"a+b\""), "a\\+b");
    }

    #[test]
    fn test_raw_is_verbatim() {
        assert_eq!(compile("`abc123(?=something)`"), "abc123(?=something)");
    }

    #[test]
    fn test_constants() {
        assert_eq!(compile("<space>"), "\\s");
        assert_eq!(compile("<start>"), "^");
    }

    #[test]
    fn test_unknown_constant() {
        let err = parse_clause("<bogus>", &CompileContext::new()).unwrap_err();
        assert!(matches!(err, CompileError::UnknownConstant { .. }));
    }

    #[test]
    fn test_bareword_passes_through() {
        assert_eq!(compile("batman"), "batman");
        assert_eq!(compile("hello world"), "hello world");
        assert_eq!(compile("[a-f]+"), "[a-f]+");
    }

    #[test]
    fn test_quantifiers() {
        assert_eq!(compile("5 to 9 of \"hello\""), "(hello){5,9}");
        assert_eq!(compile("at least 5 of \"ducks\""), "(ducks){5,}");
        assert_eq!(compile("at most 5 of \"ducks\""), "(ducks){,5}");
        assert_eq!(compile("16 of \"na\""), "(na){16}");
        assert_eq!(compile("some of <alpha>"), "[a-zA-Z]+");
        assert_eq!(compile("any of <alpha>"), "[a-zA-Z]*");
        assert_eq!(compile("maybe of <space>"), "\\s?");
    }

    #[test]
    fn test_exact_count_of_constant_is_not_grouped() {
        assert_eq!(compile("3 of <num>"), "\\d{3}");
        assert_eq!(compile("3 of num"), "(num){3}");
    }

    #[test]
    fn test_quantifier_with_unknown_constant() {
        let ctx = CompileContext::new();
        for clause in ["3 of <bogus>", "some of <bogus>", "1 to 2 of <bogus>"] {
            let err = parse_clause(clause, &ctx).unwrap_err();
            assert!(matches!(err, CompileError::UnknownConstant { .. }), "{clause}");
        }
    }

    #[test]
    fn test_request_is_not_escaped() {
        assert_eq!(compile("some of \"a.b\""), "a.b+");
        assert_eq!(compile("2 of `a|b`"), "(a|b){2}");
    }

    #[test]
    fn test_whitespace_between_words() {
        assert_eq!(compile("at   least\t2 of x"), "(x){2,}");
    }

    #[test]
    fn test_quoted_phrase_is_a_literal() {
        assert_eq!(compile("\"3 of x\""), "3 of x");
    }

    #[test]
    fn test_variables() {
        let mut ctx = CompileContext::new();
        assert_eq!(parse_clause(".dog", &ctx).unwrap(), ".dog");
        ctx.define(".dog", "(?:corgi|shiba)".to_string()).unwrap();
        assert_eq!(parse_clause(".dog", &ctx).unwrap(), "(?:corgi|shiba)");
    }

    #[test]
    fn test_quantified_parse() {
        let q = Quantified::parse("1 to 3 of <hex>").unwrap();
        assert_eq!(
            q.quantifier,
            Quantifier::Between("1".to_string(), "3".to_string())
        );
        assert_eq!(q.request, "<hex>");
        assert_eq!(Quantified::parse("some of"), None);
        assert_eq!(Quantified::parse("plenty of x"), None);
    }
}
