//! Configuration options for the parser.
//!
//! This module provides types to control how far and how wide the parser
//! walks a value graph:
//!
//! - [`ParserOptions`]: Main configuration struct
//! - [`PrototypeInspection`]: Whether prototype members of objects are tokenized
//!
//! Options are fixed once a [`Parser`](crate::Parser) is constructed. Build a
//! new parser when different settings are needed.
//!
//! ## Examples
//!
//! ```rust
//! use dumper::{ParserOptions, PrototypeInspection};
//!
//! let options = ParserOptions::new()
//!     .with_depth(10)
//!     .with_show_hidden(true)
//!     .with_object_prototype(PrototypeInspection::UnlessPlainObject)
//!     .with_collapse(["DateTime", "Decimal"]);
//!
//! assert_eq!(options.depth, 10);
//! assert!(options.is_collapsed("Decimal"));
//! ```

/// Controls tokenization of an object's prototype chain.
///
/// # Examples
///
/// ```rust
/// use dumper::PrototypeInspection;
///
/// assert_eq!(PrototypeInspection::from(true), PrototypeInspection::Always);
/// assert_eq!(PrototypeInspection::from(false), PrototypeInspection::Never);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PrototypeInspection {
    #[default]
    Never,
    /// Walk the whole chain, hiding the members of `Object.prototype`.
    Always,
    /// Walk the chain up to `Object.prototype`, skipping plain objects entirely.
    UnlessPlainObject,
}

impl From<bool> for PrototypeInspection {
    fn from(value: bool) -> Self {
        if value {
            PrototypeInspection::Always
        } else {
            PrototypeInspection::Never
        }
    }
}

/// Configuration options for [`Parser`](crate::Parser).
///
/// # Examples
///
/// ```rust
/// use dumper::ParserOptions;
///
/// let options = ParserOptions::default();
/// assert_eq!(options.depth, 5);
/// assert_eq!(options.max_array_length, 100);
/// assert_eq!(options.max_string_length, 1000);
/// assert!(!options.show_hidden);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ParserOptions {
    /// Include non-enumerable own properties.
    pub show_hidden: bool,
    /// Composite nesting levels expanded before a max-depth sentinel.
    pub depth: usize,
    pub inspect_object_prototype: PrototypeInspection,
    pub inspect_array_prototype: bool,
    /// Tokenize the static members of classes.
    pub inspect_static_members: bool,
    /// Elements of arrays, maps and sets visited before a max-length sentinel.
    pub max_array_length: usize,
    /// Characters rendered before a string is truncated.
    pub max_string_length: usize,
    /// Constructor names whose instances are never expanded.
    pub collapse: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            show_hidden: false,
            depth: 5,
            inspect_object_prototype: PrototypeInspection::Never,
            inspect_array_prototype: false,
            inspect_static_members: false,
            max_array_length: 100,
            max_string_length: 1000,
            collapse: Vec::new(),
        }
    }
}

impl ParserOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows non-enumerable own properties.
    #[must_use]
    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    /// Sets the maximum composite nesting depth.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dumper::ParserOptions;
    ///
    /// let options = ParserOptions::new().with_depth(1);
    /// assert_eq!(options.depth, 1);
    /// ```
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Enables prototype inspection for objects. Accepts a `bool` or a
    /// [`PrototypeInspection`].
    #[must_use]
    pub fn with_object_prototype(mut self, inspect: impl Into<PrototypeInspection>) -> Self {
        self.inspect_object_prototype = inspect.into();
        self
    }

    /// Enables prototype inspection for arrays.
    #[must_use]
    pub fn with_array_prototype(mut self, inspect: bool) -> Self {
        self.inspect_array_prototype = inspect;
        self
    }

    /// Enables tokenization of class static members.
    #[must_use]
    pub fn with_static_members(mut self, inspect: bool) -> Self {
        self.inspect_static_members = inspect;
        self
    }

    #[must_use]
    pub fn with_max_array_length(mut self, max_array_length: usize) -> Self {
        self.max_array_length = max_array_length;
        self
    }

    #[must_use]
    pub fn with_max_string_length(mut self, max_string_length: usize) -> Self {
        self.max_string_length = max_string_length;
        self
    }

    /// Replaces the list of collapsed constructor names.
    #[must_use]
    pub fn with_collapse<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collapse = names.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` when instances of `constructor_name` are collapsed.
    #[inline]
    #[must_use]
    pub fn is_collapsed(&self, constructor_name: &str) -> bool {
        self.collapse.iter().any(|name| name == constructor_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let options = ParserOptions::new()
            .with_show_hidden(true)
            .with_depth(2)
            .with_object_prototype(true)
            .with_array_prototype(true)
            .with_static_members(true)
            .with_max_array_length(3)
            .with_max_string_length(4)
            .with_collapse(vec!["User".to_string()]);

        assert!(options.show_hidden);
        assert_eq!(options.depth, 2);
        assert_eq!(options.inspect_object_prototype, PrototypeInspection::Always);
        assert!(options.inspect_array_prototype);
        assert!(options.inspect_static_members);
        assert_eq!(options.max_array_length, 3);
        assert_eq!(options.max_string_length, 4);
        assert!(options.is_collapsed("User"));
        assert!(!options.is_collapsed("Post"));
    }
}
