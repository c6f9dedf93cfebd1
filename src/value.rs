//! Dynamic value representation for the host heap.
//!
//! This module provides the [`Value`] enum which represents any runtime value
//! the parser can walk: primitives are stored inline, everything with identity
//! lives behind an [`Object`] handle.
//!
//! ## Core Types
//!
//! - [`Value`]: undefined, null, boolean, number, bigint, string, symbol or object
//! - [`Symbol`]: a unique, optionally described symbol
//! - [`PropertyKey`]: a string or symbol property key
//!
//! ## Usage Patterns
//!
//! ```rust
//! use dumper::{Realm, Symbol, Value};
//!
//! let realm = Realm::new();
//!
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let symbol = Value::from(Symbol::new("id"));
//!
//! let user = realm.object();
//! user.insert("name", "virk");
//! let user = Value::from(user);
//!
//! assert!(number.is_number());
//! assert!(text.is_string());
//! assert!(symbol.is_symbol());
//! assert!(user.is_object());
//! ```

use crate::inspect;
use crate::object::{Object, ObjectKind};
use num_bigint::BigInt;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Any value of the host runtime.
///
/// Cloning a `Value` is cheap for composites: it clones the [`Object`]
/// handle, never the graph behind it.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(BigInt),
    String(String),
    Symbol(Symbol),
    Object(Object),
}

/// A symbol with reference identity.
///
/// Two symbols are equal only when they are the same symbol, even if their
/// descriptions match.
///
/// # Examples
///
/// ```rust
/// use dumper::Symbol;
///
/// let a = Symbol::new("id");
/// let b = Symbol::new("id");
///
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// assert_eq!(a.to_string(), "Symbol(id)");
/// ```
#[derive(Clone, Debug)]
pub struct Symbol(Rc<Option<String>>);

impl Symbol {
    /// Creates a symbol with a description.
    pub fn new(description: impl Into<String>) -> Self {
        Symbol(Rc::new(Some(description.into())))
    }

    /// Creates a symbol without a description.
    pub fn anonymous() -> Self {
        Symbol(Rc::new(None))
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

/// A property key: either a string or a symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(String),
    Symbol(Symbol),
}

impl PropertyKey {
    #[inline]
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    /// Returns `true` if this is the string key `name`.
    #[inline]
    #[must_use]
    pub fn is_str(&self, name: &str) -> bool {
        matches!(self, PropertyKey::String(s) if s == name)
    }

    /// Returns the numeric value of a canonical array index key.
    ///
    /// Canonical indices have no sign, no leading zeros and stay below
    /// `u32::MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dumper::PropertyKey;
    ///
    /// assert_eq!(PropertyKey::from("12").array_index(), Some(12));
    /// assert_eq!(PropertyKey::from("012").array_index(), None);
    /// assert_eq!(PropertyKey::from("name").array_index(), None);
    /// ```
    #[must_use]
    pub fn array_index(&self) -> Option<u32> {
        let PropertyKey::String(s) = self else {
            return None;
        };
        if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
            return None;
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<u32>().ok().filter(|index| *index != u32::MAX)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => f.write_str(s),
            PropertyKey::Symbol(symbol) => symbol.fmt(f),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(value: &str) -> Self {
        PropertyKey::String(value.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        PropertyKey::String(value)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(value: Symbol) -> Self {
        PropertyKey::Symbol(value)
    }
}

impl From<&Symbol> for PropertyKey {
    fn from(value: &Symbol) -> Self {
        PropertyKey::Symbol(value.clone())
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// If the value is a string, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Compares two values with the host's `SameValueZero` rules: objects and
    /// symbols by identity, `NaN` equal to itself, `+0` equal to `-0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dumper::Value;
    ///
    /// assert!(Value::from(f64::NAN).same_value_zero(&Value::from(f64::NAN)));
    /// assert!(Value::from(0.0).same_value_zero(&Value::from(-0.0)));
    /// assert!(!Value::from(1).same_value_zero(&Value::from("1")));
    /// ```
    #[must_use]
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Writes the host's string coercion of the value, guarding against
    /// arrays that contain themselves.
    fn coerce(&self, out: &mut String, stack: &mut Vec<usize>) {
        match self {
            Value::Undefined => out.push_str("undefined"),
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => out.push_str(&inspect::number_to_string(*n)),
            Value::BigInt(n) => out.push_str(&n.to_string()),
            Value::String(s) => out.push_str(s),
            Value::Symbol(symbol) => out.push_str(&symbol.to_string()),
            Value::Object(object) => {
                if stack.contains(&object.id()) {
                    return;
                }
                stack.push(object.id());
                coerce_object(object, out, stack);
                stack.pop();
            }
        }
    }
}

fn coerce_object(object: &Object, out: &mut String, stack: &mut Vec<usize>) {
    let elements = match &*object.kind() {
        ObjectKind::Array(elements) => elements.clone(),
        ObjectKind::TypedArray(array) => (0..array.len()).map(|i| array.get(i)).collect(),
        ObjectKind::Function(function) => {
            out.push_str(&format!("function {}() {{ [native code] }}", function.name));
            return;
        }
        ObjectKind::Date(date) => {
            out.push_str(&inspect::date_to_string(date.as_ref()));
            return;
        }
        ObjectKind::RegExp { source, flags } => {
            out.push_str(&format!("/{source}/{flags}"));
            return;
        }
        ObjectKind::Url { url, .. } => {
            out.push_str(url.as_str());
            return;
        }
        ObjectKind::Buffer(bytes) => {
            out.push_str(&String::from_utf8_lossy(bytes));
            return;
        }
        ObjectKind::Host { display, .. } => {
            out.push_str(display);
            return;
        }
        _ => {
            out.push_str("[object Object]");
            return;
        }
    };

    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        match element {
            None | Some(Value::Undefined) | Some(Value::Null) => {}
            Some(value) => value.coerce(out, stack),
        }
    }
}

/// Formats the value the way the host's `String(value)` would.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.coerce(&mut out, &mut Vec::new());
        f.write_str(&out)
    }
}

// From implementations for creating values from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<&Object> for Value {
    fn from(value: &Object) -> Self {
        Value::Object(value.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Realm;

    #[test]
    fn test_string_coercion_of_primitives() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(1).to_string(), "1");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(BigInt::from(100)).to_string(), "100");
        assert_eq!(Value::from(Symbol::new("foo")).to_string(), "Symbol(foo)");
    }

    #[test]
    fn test_string_coercion_of_objects() {
        let realm = Realm::new();
        assert_eq!(Value::from(realm.object()).to_string(), "[object Object]");

        let array = realm.array([Value::from(1), Value::Null, Value::from("a")]);
        assert_eq!(Value::from(&array).to_string(), "1,,a");

        array.push(Value::from(&array));
        assert_eq!(Value::from(&array).to_string(), "1,,a,");
    }

    #[test]
    fn test_symbol_keys_are_distinct() {
        let a = PropertyKey::from(Symbol::new("a"));
        let b = PropertyKey::from(Symbol::new("a"));
        assert_ne!(a, b);
        assert!(a.is_symbol());
        assert_eq!(a.to_string(), "Symbol(a)");
    }

    #[test]
    fn test_array_index_rejects_non_canonical_keys() {
        assert_eq!(PropertyKey::from("0").array_index(), Some(0));
        assert_eq!(PropertyKey::from("4294967295").array_index(), None);
        assert_eq!(PropertyKey::from("-1").array_index(), None);
        assert_eq!(PropertyKey::from("").array_index(), None);
    }
}
