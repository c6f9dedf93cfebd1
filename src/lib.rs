//! # dumper
//!
//! Turns arbitrary, possibly cyclic value graphs into a flat stream of
//! tokens, and renders that stream for the terminal or as HTML.
//!
//! ## How it works
//!
//! Values live in a [`Realm`], a small object model with prototypes,
//! accessors, hidden members and the usual builtins (arrays, maps, sets,
//! errors, dates, URLs, typed arrays and so on). A [`Parser`] walks a value
//! and records one [`Token`] per structural event: the start of an object,
//! a key, a scalar, a circular reference. Formatters consume the tokens and
//! never touch the value again.
//!
//! ## Key Features
//!
//! - **Cycle safe**: a value already on the active path becomes a
//!   `*-circular-ref` token instead of being walked again
//! - **Bounded**: nesting depth, array length and string length are capped
//!   by [`ParserOptions`]
//! - **Side-effect free**: accessors are reported as getters and never run,
//!   except where a builtin needs them
//! - **Serializable tokens**: every token serializes to the same JSON shape
//!   a JavaScript consumer would expect
//!
//! ## Quick Start
//!
//! ```rust
//! use dumper::{Realm, Token, Value};
//!
//! let realm = Realm::new();
//! let user = realm.object();
//! user.insert("name", "virk");
//! user.insert("self", &user);
//!
//! let tokens = dumper::tokenize(&Value::from(&user));
//! assert!(tokens.contains(&Token::ObjectCircularRef));
//! ```
//!
//! ### Rendering
//!
//! ```rust
//! use dumper::{value, ParserOptions, Realm, Theme};
//!
//! let realm = Realm::new();
//! let data = value!(&realm, { "id": 1, "tags": ["a"] });
//!
//! let output = dumper::dump_with_options(&data, ParserOptions::default(), Theme::plain());
//! assert_eq!(output, "{\n  id: 1,\n  tags: [\n    'a',\n  ],\n}");
//! ```
//!
//! ### Rust data
//!
//! Anything that implements `Serialize` can be brought into a realm with
//! [`to_value`].
//!
//! ```rust
//! use dumper::{to_value, Realm};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let realm = Realm::new();
//! let point = to_value(&realm, &Point { x: 1, y: 2 }).unwrap();
//! let output = dumper::dump_with_options(
//!     &point,
//!     Default::default(),
//!     dumper::Theme::plain(),
//! );
//! assert!(output.starts_with("Point {"));
//! ```

pub mod console;
mod context;
pub mod error;
pub mod html;
pub mod inspect;
mod macros;
pub mod object;
pub mod options;
pub mod parser;
pub mod realm;
pub mod ser;
pub mod theme;
pub mod token;
mod tokenizers;
pub mod type_tag;
pub mod value;

pub use console::ConsoleFormatter;
pub use error::{Error, Result};
pub use html::{HtmlFormatter, HtmlStyles};
pub use object::{
    Function, FunctionKind, Getter, Intrinsic, Object, ObjectKind, PromiseState, Property,
    Setter, Slot, TypedArray,
};
pub use options::{ParserOptions, PrototypeInspection};
pub use parser::Parser;
pub use realm::Realm;
pub use ser::{to_value, ValueSerializer};
pub use theme::Theme;
pub use token::Token;
pub use type_tag::TypeTag;
pub use value::{PropertyKey, Symbol, Value};

use std::io;

/// Tokenizes a value with the default options.
///
/// # Examples
///
/// ```rust
/// use dumper::{Token, Value};
///
/// let tokens = dumper::tokenize(&Value::from(22));
/// assert_eq!(tokens, vec![Token::Number { value: 22.0 }]);
/// ```
#[must_use]
pub fn tokenize(value: &Value) -> Vec<Token> {
    tokenize_with_options(value, ParserOptions::default())
}

/// Tokenizes a value with custom options.
///
/// # Examples
///
/// ```rust
/// use dumper::{ParserOptions, Realm, Token, Value};
///
/// let realm = Realm::new();
/// let outer = realm.object();
/// outer.insert("inner", realm.object());
///
/// let options = ParserOptions::new().with_depth(1);
/// let tokens = dumper::tokenize_with_options(&Value::from(&outer), options);
/// assert!(tokens.contains(&Token::ObjectMaxDepthRef));
/// ```
#[must_use]
pub fn tokenize_with_options(value: &Value, options: ParserOptions) -> Vec<Token> {
    let mut parser = Parser::new(options);
    parser.parse(value);
    parser.flush()
}

/// Renders a value for the terminal. Colors follow `NO_COLOR`.
#[must_use]
pub fn dump(value: &Value) -> String {
    dump_with_options(value, ParserOptions::default(), Theme::from_env())
}

/// Renders a value with custom parser options and theme.
///
/// # Examples
///
/// ```rust
/// use dumper::{ParserOptions, Theme, Value};
///
/// let output = dumper::dump_with_options(
///     &Value::from("hello"),
///     ParserOptions::default(),
///     Theme::plain(),
/// );
/// assert_eq!(output, "'hello'");
/// ```
#[must_use]
pub fn dump_with_options(value: &Value, options: ParserOptions, theme: Theme) -> String {
    let tokens = tokenize_with_options(value, options);
    ConsoleFormatter::new(theme).format(&tokens)
}

/// Renders a value as HTML with the default parser options and styles.
#[must_use]
pub fn dump_html(value: &Value) -> String {
    dump_html_with_options(value, ParserOptions::default(), HtmlStyles::default())
}

/// Renders a value as HTML with custom parser options and styles.
///
/// # Examples
///
/// ```rust
/// use dumper::{HtmlStyles, ParserOptions, Value};
///
/// let output = dumper::dump_html_with_options(
///     &Value::from(true),
///     ParserOptions::default(),
///     HtmlStyles::unstyled(),
/// );
/// assert_eq!(
///     output,
///     "<pre style=\"\"><code><span class=\"dumper-boolean\" style=\"\">true</span></code></pre>"
/// );
/// ```
#[must_use]
pub fn dump_html_with_options(value: &Value, options: ParserOptions, styles: HtmlStyles) -> String {
    let tokens = tokenize_with_options(value, options);
    HtmlFormatter::new(styles).format(&tokens)
}

/// Renders a value and writes it, followed by a newline, to `writer`.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dump_to_writer<W>(
    mut writer: W,
    value: &Value,
    options: ParserOptions,
    theme: Theme,
) -> Result<()>
where
    W: io::Write,
{
    let output = dump_with_options(value, options, theme);
    writeln!(writer, "{output}").map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_scalar() {
        assert_eq!(tokenize(&Value::Null), vec![Token::Null]);
        assert_eq!(
            tokenize(&Value::from("hi")),
            vec![Token::String {
                value: "'hi'".to_string()
            }]
        );
    }

    #[test]
    fn test_dump_plain() {
        let realm = Realm::new();
        let list = realm.array([1, 2]);
        let output = dump_with_options(
            &Value::from(&list),
            ParserOptions::default(),
            Theme::plain(),
        );
        assert_eq!(output, "[\n  1,\n  2,\n]");
    }

    #[test]
    fn test_dump_to_writer() {
        let mut buffer = Vec::new();
        dump_to_writer(
            &mut buffer,
            &Value::from(true),
            ParserOptions::default(),
            Theme::plain(),
        )
        .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "true\n");
    }

    #[test]
    fn test_dump_to_failing_writer() {
        struct Broken;

        impl io::Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let result = dump_to_writer(Broken, &Value::Null, ParserOptions::default(), Theme::plain());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
