//! Normalized runtime type classification.

use crate::object::{Intrinsic, Object, ObjectKind, TypedArray};
use crate::value::Value;
use std::fmt;

/// The classification the dispatch table is keyed on.
///
/// Ordinary objects whose prototype chain reaches `Error.prototype` are
/// classified as [`TypeTag::Error`], not [`TypeTag::Object`].
///
/// # Examples
///
/// ```rust
/// use dumper::{Realm, TypeTag, Value};
///
/// let realm = Realm::new();
///
/// assert_eq!(TypeTag::of(&Value::from(f64::NAN)), TypeTag::NaN);
/// assert_eq!(TypeTag::of(&Value::from(realm.error("boom"))), TypeTag::Error);
/// assert_eq!(TypeTag::of(&Value::from(realm.object())).name(), "Object");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Undefined,
    Null,
    String,
    Number,
    NaN,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Array,
    Int8Array,
    Uint8Array,
    Uint8ClampedArray,
    Int16Array,
    Uint16Array,
    Int32Array,
    Uint32Array,
    Float32Array,
    Float64Array,
    BigInt64Array,
    BigUint64Array,
    Map,
    Set,
    Function,
    Date,
    RegExp,
    Buffer,
    Url,
    UrlSearchParams,
    FormData,
    Error,
    WeakSet,
    WeakMap,
    WeakRef,
    Promise,
    Blob,
    Observable,
    Generator,
    AsyncGenerator,
    /// A host type without a handler.
    Host(String),
}

impl TypeTag {
    /// Classifies a value.
    #[must_use]
    pub fn of(value: &Value) -> TypeTag {
        match value {
            Value::Undefined => TypeTag::Undefined,
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(n) if n.is_nan() => TypeTag::NaN,
            Value::Number(_) => TypeTag::Number,
            Value::BigInt(_) => TypeTag::BigInt,
            Value::String(_) => TypeTag::String,
            Value::Symbol(_) => TypeTag::Symbol,
            Value::Object(object) => Self::of_object(object),
        }
    }

    fn of_object(object: &Object) -> TypeTag {
        match &*object.kind() {
            ObjectKind::Ordinary if object.inherits_from(Intrinsic::ErrorPrototype) => {
                TypeTag::Error
            }
            ObjectKind::Ordinary => TypeTag::Object,
            ObjectKind::Array(_) => TypeTag::Array,
            ObjectKind::TypedArray(array) => match array {
                TypedArray::Int8(_) => TypeTag::Int8Array,
                TypedArray::Uint8(_) => TypeTag::Uint8Array,
                TypedArray::Uint8Clamped(_) => TypeTag::Uint8ClampedArray,
                TypedArray::Int16(_) => TypeTag::Int16Array,
                TypedArray::Uint16(_) => TypeTag::Uint16Array,
                TypedArray::Int32(_) => TypeTag::Int32Array,
                TypedArray::Uint32(_) => TypeTag::Uint32Array,
                TypedArray::Float32(_) => TypeTag::Float32Array,
                TypedArray::Float64(_) => TypeTag::Float64Array,
                TypedArray::BigInt64(_) => TypeTag::BigInt64Array,
                TypedArray::BigUint64(_) => TypeTag::BigUint64Array,
            },
            ObjectKind::Map(_) => TypeTag::Map,
            ObjectKind::Set(_) => TypeTag::Set,
            ObjectKind::Function(_) => TypeTag::Function,
            ObjectKind::Date(_) => TypeTag::Date,
            ObjectKind::RegExp { .. } => TypeTag::RegExp,
            ObjectKind::Buffer(_) => TypeTag::Buffer,
            ObjectKind::Url { .. } => TypeTag::Url,
            ObjectKind::UrlSearchParams(_) => TypeTag::UrlSearchParams,
            ObjectKind::FormData(_) => TypeTag::FormData,
            ObjectKind::WeakMap => TypeTag::WeakMap,
            ObjectKind::WeakSet => TypeTag::WeakSet,
            ObjectKind::WeakRef => TypeTag::WeakRef,
            ObjectKind::Promise(_) => TypeTag::Promise,
            ObjectKind::Blob { .. } => TypeTag::Blob,
            ObjectKind::Observable => TypeTag::Observable,
            ObjectKind::Generator { is_async: false } => TypeTag::Generator,
            ObjectKind::Generator { is_async: true } => TypeTag::AsyncGenerator,
            ObjectKind::Host { type_name, .. } => TypeTag::Host(type_name.clone()),
        }
    }

    /// The host type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TypeTag::Undefined => "undefined",
            TypeTag::Null => "null",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::NaN => "NaN",
            TypeTag::Boolean => "boolean",
            TypeTag::BigInt => "bigint",
            TypeTag::Symbol => "symbol",
            TypeTag::Object => "Object",
            TypeTag::Array => "Array",
            TypeTag::Int8Array => "Int8Array",
            TypeTag::Uint8Array => "Uint8Array",
            TypeTag::Uint8ClampedArray => "Uint8ClampedArray",
            TypeTag::Int16Array => "Int16Array",
            TypeTag::Uint16Array => "Uint16Array",
            TypeTag::Int32Array => "Int32Array",
            TypeTag::Uint32Array => "Uint32Array",
            TypeTag::Float32Array => "Float32Array",
            TypeTag::Float64Array => "Float64Array",
            TypeTag::BigInt64Array => "BigInt64Array",
            TypeTag::BigUint64Array => "BigUint64Array",
            TypeTag::Map => "Map",
            TypeTag::Set => "Set",
            TypeTag::Function => "Function",
            TypeTag::Date => "Date",
            TypeTag::RegExp => "RegExp",
            TypeTag::Buffer => "Buffer",
            TypeTag::Url => "URL",
            TypeTag::UrlSearchParams => "URLSearchParams",
            TypeTag::FormData => "FormData",
            TypeTag::Error => "Error",
            TypeTag::WeakSet => "WeakSet",
            TypeTag::WeakMap => "WeakMap",
            TypeTag::WeakRef => "WeakRef",
            TypeTag::Promise => "Promise",
            TypeTag::Blob => "Blob",
            TypeTag::Observable => "Observable",
            TypeTag::Generator => "Generator",
            TypeTag::AsyncGenerator => "AsyncGenerator",
            TypeTag::Host(name) => name.as_str(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PromiseState, Realm, Symbol};
    use num_bigint::BigInt;

    #[test]
    fn test_primitives() {
        assert_eq!(TypeTag::of(&Value::Undefined), TypeTag::Undefined);
        assert_eq!(TypeTag::of(&Value::Null), TypeTag::Null);
        assert_eq!(TypeTag::of(&Value::from(false)), TypeTag::Boolean);
        assert_eq!(TypeTag::of(&Value::from(1)), TypeTag::Number);
        assert_eq!(TypeTag::of(&Value::from(BigInt::from(1))), TypeTag::BigInt);
        assert_eq!(TypeTag::of(&Value::from("a")), TypeTag::String);
        assert_eq!(TypeTag::of(&Value::from(Symbol::anonymous())), TypeTag::Symbol);
    }

    #[test]
    fn test_builtins() {
        let realm = Realm::new();
        let cases = [
            (realm.array([1]), TypeTag::Array),
            (realm.typed_array(TypedArray::Float64(vec![1.0])), TypeTag::Float64Array),
            (realm.set([1]), TypeTag::Set),
            (realm.function("f"), TypeTag::Function),
            (realm.class("A", None), TypeTag::Function),
            (realm.invalid_date(), TypeTag::Date),
            (realm.regexp("a", "g"), TypeTag::RegExp),
            (realm.buffer(vec![1u8]), TypeTag::Buffer),
            (realm.url("https://example.com").unwrap(), TypeTag::Url),
            (realm.weak_ref(), TypeTag::WeakRef),
            (realm.promise(PromiseState::Pending), TypeTag::Promise),
            (realm.generator(true), TypeTag::AsyncGenerator),
            (realm.host_object("Proxy", "[object Proxy]"), TypeTag::Host("Proxy".to_string())),
        ];

        for (object, expected) in cases {
            assert_eq!(TypeTag::of(&Value::from(object)), expected);
        }
    }

    #[test]
    fn test_error_subclasses_are_errors() {
        let realm = Realm::new();
        let error_class = realm.constructor("Error").unwrap();
        let class = realm.class("ValidationError", Some(&error_class));
        let error = realm.construct_error(&class, "invalid");

        assert_eq!(TypeTag::of(&Value::from(error)), TypeTag::Error);
        assert_eq!(TypeTag::of(&Value::from(realm.instance(&class))), TypeTag::Error);
        assert_eq!(TypeTag::of(&Value::from(realm.error_prototype())), TypeTag::Object);
    }
}
