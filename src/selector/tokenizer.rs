//! logos-based selector tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `~=` as [`Token::Includes`] beats `~` as [`Token::Tilde`])
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `*=` matches [`Token::Substring`], not `Star` + `Equals`
//! - `:hover` matches [`Token::PseudoClass`], not a stray `:`
//! - `-x` matches [`Token::Ident`] (CSS identifiers may start with a hyphen)

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Attribute operators (two characters, defined first) ──────────

    /// `~=` whitespace-separated word match.
    #[token("~=")]
    Includes,

    /// `|=` exact or hyphen-prefixed match.
    #[token("|=")]
    DashMatch,

    /// `^=` prefix match.
    #[token("^=")]
    Prefix,

    /// `$=` suffix match.
    #[token("$=")]
    Suffix,

    /// `*=` substring match.
    #[token("*=")]
    Substring,

    // ── Compound tokens ──────────────────────────────────────────────

    /// Pseudo-class or pseudo-element: `:hover`, `::before`.
    #[regex(r"::?[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Bare number, only meaningful as an attribute value.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// Identifier: tag names, class names, ids, attribute names.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `=`
    #[token("=")]
    Equals,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,

    /// `+`
    #[token("+")]
    Plus,

    /// `~`
    #[token("~")]
    Tilde,
}

/// A token with its source text and byte span.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub text: String,
    /// Byte offset where this token starts in the source.
    pub start: usize,
    /// Byte offset where this token ends in the source.
    pub end: usize,
}

/// Tokenize a selector string.
///
/// Returns `Err(offset)` with the byte offset of the first character that
/// does not start any token.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, usize> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(token) => tokens.push(Spanned {
                token,
                text: input[span.clone()].to_string(),
                start: span.start,
                end: span.end,
            }),
            Err(()) => return Err(span.start),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap_or_else(|pos| panic!("lex error at {pos}"))
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens("[ ] = , . # * > + ~"),
            vec![
                Token::BracketOpen,
                Token::BracketClose,
                Token::Equals,
                Token::Comma,
                Token::Dot,
                Token::Hash,
                Token::Star,
                Token::GreaterThan,
                Token::Plus,
                Token::Tilde,
            ]
        );
    }

    #[test]
    fn test_attribute_operators_beat_single_chars() {
        assert_eq!(
            tokens("~= |= ^= $= *="),
            vec![
                Token::Includes,
                Token::DashMatch,
                Token::Prefix,
                Token::Suffix,
                Token::Substring,
            ]
        );
    }

    #[test]
    fn test_hyphenated_ident() {
        let result = tokenize("data-toggle-state").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].token, Token::Ident);
        assert_eq!(result[0].text, "data-toggle-state");
    }

    #[test]
    fn test_leading_hyphen_ident() {
        assert_eq!(tokens("-webkit-thing"), vec![Token::Ident]);
    }

    #[test]
    fn test_pseudo_class() {
        assert_eq!(tokens(":hover ::before"), vec![Token::PseudoClass, Token::PseudoClass]);
    }

    #[test]
    fn test_strings_and_numbers() {
        assert_eq!(
            tokens(r#""true" 'x y' 27"#),
            vec![Token::StringLiteral, Token::StringLiteralSingle, Token::Number]
        );
    }

    #[test]
    fn test_spans_detect_adjacency() {
        let result = tokenize(".menu .item").unwrap();
        assert_eq!(result[1].start, result[0].end);
        assert!(result[2].start > result[1].end);
    }

    #[test]
    fn test_attribute_selector_sequence() {
        assert_eq!(
            tokens(r#"[data-toggle-state="true"]"#),
            vec![
                Token::BracketOpen,
                Token::Ident,
                Token::Equals,
                Token::StringLiteral,
                Token::BracketClose,
            ]
        );
    }

    #[test]
    fn test_invalid_character_reports_offset() {
        assert_eq!(tokenize(".menu !"), Err(6));
    }
}
