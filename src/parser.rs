//! The parser facade: owns the options, the token buffer and the context.
//!
//! ## Examples
//!
//! ```rust
//! use dumper::{Parser, Realm, Token, Value};
//!
//! let realm = Realm::new();
//! let user = realm.object();
//! user.insert("id", 1);
//!
//! let mut parser = Parser::default();
//! parser.parse(&Value::from(&user));
//! let tokens = parser.flush();
//!
//! let start = Token::ObjectStart { constructor_name: Some("Object".to_string()) };
//! assert_eq!(tokens.first(), Some(&start));
//! assert_eq!(tokens.last(), Some(&Token::ObjectEnd));
//! assert!(parser.flush().is_empty());
//! ```

use crate::context::Context;
use crate::options::ParserOptions;
use crate::token::Token;
use crate::tokenizers;
use crate::value::Value;
use tracing::debug;

/// Converts values into a flat token stream.
///
/// One instance can be reused across many `parse` + `flush` cycles. It is not
/// meant to be shared by interleaved callers: the traversal context belongs
/// to the instance.
#[derive(Debug, Default)]
pub struct Parser {
    options: ParserOptions,
    tokens: Vec<Token>,
    pub(crate) context: Context,
}

impl Parser {
    /// Creates a parser with fixed options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Parser {
            options,
            tokens: Vec::new(),
            context: Context::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Tokenizes `value` into the buffer. Never fails: values without a
    /// handler become `unknown` tokens.
    pub fn parse(&mut self, value: &Value) {
        tokenizers::tokenize(self, value);
    }

    #[inline]
    pub(crate) fn collect(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Returns the buffered tokens and resets the buffer and the context.
    pub fn flush(&mut self) -> Vec<Token> {
        let tokens = std::mem::take(&mut self.tokens);
        self.context = Context::default();
        debug!(tokens = tokens.len(), "flushed token stream");
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Realm;

    #[test]
    fn test_flush_resets_state() {
        let realm = Realm::new();
        let mut parser = Parser::default();

        parser.parse(&Value::from(realm.array([1, 2])));
        assert!(!parser.tokens.is_empty());
        assert!(parser.context.is_clear());

        let tokens = parser.flush();
        assert_eq!(tokens.len(), 8);
        assert!(parser.tokens.is_empty());
        assert!(parser.context.is_clear());
    }

    #[test]
    fn test_scalars() {
        let mut parser = Parser::default();
        parser.parse(&Value::Undefined);
        parser.parse(&Value::Null);
        parser.parse(&Value::from(true));
        parser.parse(&Value::from(f64::NAN));

        let tokens = parser.flush();
        assert_eq!(tokens[0], Token::Undefined);
        assert_eq!(tokens[1], Token::Null);
        assert_eq!(tokens[2], Token::Boolean { value: true });
        assert!(matches!(tokens[3], Token::Number { value } if value.is_nan()));
    }
}
