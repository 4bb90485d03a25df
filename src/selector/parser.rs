//! Recursive descent selector parser.
//!
//! Parses a selector group into a [`SelectorList`]. Uses the logos-based
//! tokenizer from [`crate::selector::tokenizer`].

use crate::selector::model::*;
use crate::selector::tokenizer::{tokenize, Spanned, Token};

/// Errors from selector parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("invalid character at byte {0}")]
    InvalidCharacter(usize),
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("unsupported selector syntax: {0}")]
    Unsupported(String),
}

/// Parse a comma-separated selector group such as `.menu, nav > [data-open]`.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let tokens = tokenize(input).map_err(SelectorError::InvalidCharacter)?;
    if tokens.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let mut selectors = vec![parser.parse_selector()?];

    while let Some(tok) = parser.peek() {
        if tok.token != Token::Comma {
            return Err(parser.unexpected("expected ',' or end of selector"));
        }
        parser.advance();
        selectors.push(parser.parse_selector()?);
    }

    Ok(SelectorList { selectors })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<Spanned>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn unexpected(&self, message: &str) -> SelectorError {
        match self.peek() {
            Some(tok) => SelectorError::UnexpectedToken {
                position: tok.start,
                message: format!("{message}, got {:?} '{}'", tok.token, tok.text),
            },
            None => SelectorError::UnexpectedEof(message.to_owned()),
        }
    }

    /// Returns `true` if the current token immediately follows the previous
    /// one with no whitespace in between.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.start == prev.end)
    }

    /// Parse a single complex selector: compounds joined by combinators.
    fn parse_selector(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound()?)];

        loop {
            match self.peek().map(|t| &t.token) {
                Some(Token::GreaterThan) => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound()?));
                }
                Some(Token::Plus | Token::Tilde) => {
                    return Err(SelectorError::Unsupported(
                        "sibling combinators".to_owned(),
                    ));
                }
                // A selector-starting token separated by whitespace is a
                // descendant combinator; an adjacent one would already have
                // been consumed by `parse_compound`.
                Some(
                    Token::Ident
                    | Token::Hash
                    | Token::Dot
                    | Token::Star
                    | Token::BracketOpen
                    | Token::PseudoClass,
                ) => {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse a compound selector: simple selectors with no whitespace between
    /// them, e.g. `button.primary[aria-expanded]`.
    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut compound = CompoundSelector::new();

        match self.peek().map(|t| &t.token) {
            Some(Token::Ident) => {
                let tok = self.advance().ok_or_else(|| self.unexpected("expected tag name"))?;
                compound.push(SelectorComponent::Type(tok.text.to_ascii_lowercase()));
            }
            Some(Token::Star) => {
                self.advance();
                compound.push(SelectorComponent::Universal);
            }
            Some(Token::Dot | Token::Hash | Token::BracketOpen | Token::PseudoClass) => {
                compound.push(self.parse_simple()?);
            }
            _ => return Err(self.unexpected("expected selector")),
        }

        while self.is_adjacent()
            && matches!(
                self.peek().map(|t| &t.token),
                Some(Token::Dot | Token::Hash | Token::BracketOpen | Token::PseudoClass)
            )
        {
            compound.push(self.parse_simple()?);
        }

        Ok(compound)
    }

    /// Parse a `.class`, `#id`, `[attr]` or pseudo-class component.
    fn parse_simple(&mut self) -> Result<SelectorComponent, SelectorError> {
        let tok = self
            .advance()
            .ok_or_else(|| SelectorError::UnexpectedEof("expected selector".to_owned()))?;
        match tok.token {
            Token::Dot => Ok(SelectorComponent::Class(self.expect_ident("class name")?)),
            Token::Hash => Ok(SelectorComponent::Id(self.expect_ident("id")?)),
            Token::BracketOpen => self.parse_attribute(),
            Token::PseudoClass => Err(SelectorError::Unsupported(tok.text)),
            other => Err(SelectorError::UnexpectedToken {
                position: tok.start,
                message: format!("expected selector, got {other:?} '{}'", tok.text),
            }),
        }
    }

    /// Parse the identifier that must immediately follow `.` or `#`.
    fn expect_ident(&mut self, what: &str) -> Result<String, SelectorError> {
        if !self.is_adjacent() || self.peek().map(|t| &t.token) != Some(&Token::Ident) {
            return Err(self.unexpected(&format!("expected {what}")));
        }
        let tok = self
            .advance()
            .ok_or_else(|| SelectorError::UnexpectedEof(format!("expected {what}")))?;
        Ok(tok.text)
    }

    /// Parse the inside of `[ ... ]`; the opening bracket is already consumed.
    fn parse_attribute(&mut self) -> Result<SelectorComponent, SelectorError> {
        let name = match self.advance() {
            Some(tok) if tok.token == Token::Ident => tok.text.to_ascii_lowercase(),
            Some(tok) => {
                return Err(SelectorError::UnexpectedToken {
                    position: tok.start,
                    message: format!("expected attribute name, got '{}'", tok.text),
                })
            }
            None => return Err(SelectorError::UnexpectedEof("expected attribute name".into())),
        };

        let operator = match self.peek().map(|t| &t.token) {
            Some(Token::BracketClose) => {
                self.advance();
                return Ok(SelectorComponent::Attribute(AttributeSelector::exists(name)));
            }
            Some(Token::Equals) => AttributeOperator::Equals,
            Some(Token::Includes) => AttributeOperator::Includes,
            Some(Token::DashMatch) => AttributeOperator::DashMatch,
            Some(Token::Prefix) => AttributeOperator::Prefix,
            Some(Token::Suffix) => AttributeOperator::Suffix,
            Some(Token::Substring) => AttributeOperator::Substring,
            _ => return Err(self.unexpected("expected attribute operator or ']'")),
        };
        self.advance();

        let value = match self.advance() {
            Some(tok) => match tok.token {
                Token::StringLiteral | Token::StringLiteralSingle => {
                    tok.text[1..tok.text.len() - 1].to_owned()
                }
                Token::Ident | Token::Number => tok.text,
                other => {
                    return Err(SelectorError::UnexpectedToken {
                        position: tok.start,
                        message: format!("expected attribute value, got {other:?} '{}'", tok.text),
                    })
                }
            },
            None => return Err(SelectorError::UnexpectedEof("expected attribute value".into())),
        };

        match self.advance() {
            Some(tok) if tok.token == Token::BracketClose => {}
            Some(tok) => {
                return Err(SelectorError::UnexpectedToken {
                    position: tok.start,
                    message: format!("expected ']', got '{}'", tok.text),
                })
            }
            None => return Err(SelectorError::UnexpectedEof("expected ']'".into())),
        }

        Ok(SelectorComponent::Attribute(AttributeSelector {
            name,
            operator,
            value,
        }))
    }
}
