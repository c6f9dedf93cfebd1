//! The realm: intrinsics and the factory for host values.
//!
//! A [`Realm`] owns `Object.prototype`, `Function.prototype`,
//! `Array.prototype`, `Error.prototype` and one constructor per builtin kind.
//! Every composite created through it is wired to the right prototype, so
//! constructor names, `instanceof Error` checks and prototype walks behave the
//! way they do in the host.
//!
//! ## Examples
//!
//! ```rust
//! use dumper::{Realm, Value};
//!
//! let realm = Realm::new();
//!
//! let user_class = realm.class("User", None);
//! let user = realm.instance(&user_class);
//! user.insert("id", 1);
//!
//! assert_eq!(user.constructor_name().as_deref(), Some("User"));
//!
//! let error = realm.error("Something went wrong");
//! assert_eq!(error.constructor_name().as_deref(), Some("Error"));
//! ```

use crate::error::{Error, Result};
use crate::object::{
    Function, FunctionKind, Intrinsic, Object, ObjectKind, PromiseState, Property, TypedArray,
};
use crate::value::{PropertyKey, Value};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;

const OBJECT_PROTOTYPE_METHODS: &[&str] = &[
    "__defineGetter__",
    "__defineSetter__",
    "hasOwnProperty",
    "__lookupGetter__",
    "__lookupSetter__",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toString",
    "valueOf",
    "toLocaleString",
];

const FUNCTION_PROTOTYPE_METHODS: &[&str] = &["apply", "bind", "call", "toString"];

const ARRAY_PROTOTYPE_METHODS: &[&str] = &[
    "at", "concat", "copyWithin", "fill", "find", "findIndex", "lastIndexOf", "pop", "push",
    "reverse", "shift", "unshift", "slice", "sort", "splice", "includes", "indexOf", "join",
    "keys", "entries", "values", "forEach", "filter", "flat", "flatMap", "map", "every", "some",
    "reduce", "reduceRight", "toLocaleString", "toString",
];

const TYPED_ARRAYS: &[&str] = &[
    "Int8Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "Int16Array",
    "Uint16Array",
    "Int32Array",
    "Uint32Array",
    "Float32Array",
    "Float64Array",
    "BigInt64Array",
    "BigUint64Array",
];

/// Builtin constructors, their prototype methods and whether the prototype
/// carries a `size` getter.
const BUILTINS: &[(&str, &[&str], bool)] = &[
    (
        "Map",
        &["get", "set", "has", "delete", "clear", "entries", "forEach", "keys", "values"],
        true,
    ),
    ("Set", &["has", "add", "delete", "clear", "entries", "forEach", "values", "keys"], true),
    ("Date", &["toISOString", "toJSON", "getTime", "valueOf", "toString"], false),
    ("RegExp", &["exec", "test", "toString"], false),
    ("Promise", &["then", "catch", "finally"], false),
    ("WeakMap", &["delete", "get", "set", "has"], false),
    ("WeakSet", &["delete", "has", "add"], false),
    ("WeakRef", &["deref"], false),
    ("Blob", &["slice", "stream", "text", "arrayBuffer"], false),
    ("URL", &["toString", "toJSON"], false),
    (
        "URLSearchParams",
        &["append", "delete", "get", "getAll", "has", "set", "sort", "toString"],
        true,
    ),
    ("FormData", &["append", "delete", "get", "getAll", "has", "set", "entries"], false),
    ("Buffer", &["toString", "toJSON", "equals", "compare", "write"], false),
    ("Observable", &["subscribe"], false),
    ("Generator", &["next", "return", "throw"], false),
    ("AsyncGenerator", &["next", "return", "throw"], false),
];

/// Owner of the intrinsics and factory of host values.
pub struct Realm {
    object_prototype: Object,
    function_prototype: Object,
    array_prototype: Object,
    error_prototype: Object,
    /// Constructor name to prototype, for every builtin kind.
    prototypes: IndexMap<&'static str, Object>,
    /// Classes created on behalf of Rust types by the serde bridge.
    classes: RefCell<IndexMap<String, Object>>,
}

impl fmt::Debug for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Realm")
            .field("builtins", &self.prototypes.keys().collect::<Vec<_>>())
            .field("classes", &self.classes.borrow().len())
            .finish()
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}

impl Realm {
    /// Creates a realm with all intrinsics installed.
    pub fn new() -> Self {
        let object_prototype =
            Object::new_intrinsic(ObjectKind::Ordinary, None, Intrinsic::ObjectPrototype);
        let function_prototype = Object::new(
            ObjectKind::Function(Function::new("", FunctionKind::Plain)),
            Some(&object_prototype),
        );
        let array_prototype = Object::new_intrinsic(
            ObjectKind::Array(Vec::new()),
            Some(&object_prototype),
            Intrinsic::ArrayPrototype,
        );
        let error_prototype = Object::new_intrinsic(
            ObjectKind::Ordinary,
            Some(&object_prototype),
            Intrinsic::ErrorPrototype,
        );

        let mut realm = Realm {
            object_prototype,
            function_prototype,
            array_prototype,
            error_prototype,
            prototypes: IndexMap::new(),
            classes: RefCell::new(IndexMap::new()),
        };
        realm.install_intrinsics();
        realm
    }

    fn install_intrinsics(&mut self) {
        let object_prototype = self.object_prototype.clone();
        self.install_constructor("Object", &object_prototype);
        self.install_methods(&object_prototype, OBJECT_PROTOTYPE_METHODS);
        object_prototype.define_property(
            "__proto__",
            Property::accessor(
                |receiver| {
                    receiver
                        .as_object()
                        .and_then(Object::prototype)
                        .map_or(Value::Null, Value::from)
                },
                |_, _| {},
            ),
        );

        let function_prototype = self.function_prototype.clone();
        self.install_constructor("Function", &function_prototype);
        self.install_methods(&function_prototype, FUNCTION_PROTOTYPE_METHODS);

        let array_prototype = self.array_prototype.clone();
        self.install_constructor("Array", &array_prototype);
        array_prototype.insert_hidden("length", 0);
        self.install_methods(&array_prototype, ARRAY_PROTOTYPE_METHODS);

        let error_prototype = self.error_prototype.clone();
        self.install_constructor("Error", &error_prototype);
        error_prototype.insert_hidden("name", "Error");
        error_prototype.insert_hidden("message", "");
        self.install_methods(&error_prototype, &["toString"]);

        for name in TYPED_ARRAYS {
            let prototype = Object::new(ObjectKind::Ordinary, Some(&self.object_prototype));
            self.install_constructor(*name, &prototype);
            prototype.define_property("length", Property::getter(typed_array_length));
            self.install_methods(&prototype, &["at", "fill", "join", "set", "subarray"]);
        }

        for (name, methods, has_size) in BUILTINS {
            let prototype = Object::new(ObjectKind::Ordinary, Some(&self.object_prototype));
            self.install_constructor(*name, &prototype);
            if *has_size {
                prototype.define_property(
                    "size",
                    Property::getter(|receiver| {
                        receiver
                            .as_object()
                            .and_then(Object::size)
                            .map_or(Value::Undefined, |size| Value::Number(size as f64))
                    }),
                );
            }
            self.install_methods(&prototype, methods);
        }
    }

    /// Creates the constructor function for `prototype` and links both ways.
    fn install_constructor(&mut self, name: &'static str, prototype: &Object) {
        let constructor = self.callable(name, FunctionKind::Plain);
        constructor.insert_hidden("prototype", prototype);
        prototype.insert_hidden("constructor", &constructor);
        self.prototypes.insert(name, prototype.clone());
    }

    fn install_methods(&self, prototype: &Object, methods: &[&str]) {
        for method in methods {
            prototype.insert_hidden(*method, self.callable(method, FunctionKind::Plain));
        }
    }

    fn callable(&self, name: &str, kind: FunctionKind) -> Object {
        let function = Object::new(
            ObjectKind::Function(Function::new(name, kind)),
            Some(&self.function_prototype),
        );
        function.define_property("length", Property::readonly(0));
        function.define_property("name", Property::readonly(name));
        function
    }

    fn builtin(&self, kind: ObjectKind, constructor: &str) -> Object {
        let prototype = self
            .prototypes
            .get(constructor)
            .unwrap_or(&self.object_prototype);
        Object::new(kind, Some(prototype))
    }

    #[must_use]
    pub fn object_prototype(&self) -> &Object {
        &self.object_prototype
    }

    #[must_use]
    pub fn function_prototype(&self) -> &Object {
        &self.function_prototype
    }

    #[must_use]
    pub fn array_prototype(&self) -> &Object {
        &self.array_prototype
    }

    #[must_use]
    pub fn error_prototype(&self) -> &Object {
        &self.error_prototype
    }

    /// Returns a builtin constructor such as `Error` or `Map`.
    #[must_use]
    pub fn constructor(&self, name: &str) -> Option<Object> {
        match self.prototypes.get(name)?.peek(&PropertyKey::from("constructor")) {
            Value::Object(constructor) => Some(constructor),
            _ => None,
        }
    }

    /// Creates an empty plain object.
    #[must_use]
    pub fn object(&self) -> Object {
        Object::new(ObjectKind::Ordinary, Some(&self.object_prototype))
    }

    /// `Object.create(prototype)`.
    #[must_use]
    pub fn object_with_prototype(&self, prototype: Option<&Object>) -> Object {
        Object::new(ObjectKind::Ordinary, prototype)
    }

    /// Creates a dense array.
    pub fn array<I, V>(&self, values: I) -> Object
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let elements = values.into_iter().map(|v| Some(v.into())).collect();
        Object::new(ObjectKind::Array(elements), Some(&self.array_prototype))
    }

    /// Creates an array of `length` holes.
    #[must_use]
    pub fn sparse_array(&self, length: usize) -> Object {
        Object::new(
            ObjectKind::Array(vec![None; length]),
            Some(&self.array_prototype),
        )
    }

    #[must_use]
    pub fn typed_array(&self, array: TypedArray) -> Object {
        let constructor = array.name();
        self.builtin(ObjectKind::TypedArray(array), constructor)
    }

    /// Creates a map. Later duplicate keys replace earlier values.
    pub fn map<I, K, V>(&self, entries: I) -> Object
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let map = self.builtin(ObjectKind::Map(Vec::new()), "Map");
        for (key, value) in entries {
            map.map_insert(key, value);
        }
        map
    }

    /// Creates a set. Duplicates are dropped.
    pub fn set<I, V>(&self, values: I) -> Object
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let set = self.builtin(ObjectKind::Set(Vec::new()), "Set");
        for value in values {
            set.set_add(value);
        }
        set
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Object {
        self.callable(name, FunctionKind::Plain)
    }

    #[must_use]
    pub fn async_function(&self, name: &str) -> Object {
        self.callable(name, FunctionKind::Async)
    }

    #[must_use]
    pub fn generator_function(&self, name: &str) -> Object {
        self.callable(name, FunctionKind::Generator)
    }

    #[must_use]
    pub fn async_generator_function(&self, name: &str) -> Object {
        self.callable(name, FunctionKind::AsyncGenerator)
    }

    /// Declares a class, optionally extending `parent`.
    ///
    /// The class inherits static members from its parent and its
    /// `prototype` inherits from the parent's `prototype`. Extending a
    /// subclass of `Error` produces classes whose instances are errors.
    #[must_use]
    pub fn class(&self, name: &str, parent: Option<&Object>) -> Object {
        let class = self.callable(name, FunctionKind::Class);
        let parent_prototype = match parent {
            Some(parent) => {
                class.set_prototype(Some(parent));
                parent
                    .peek(&PropertyKey::from("prototype"))
                    .as_object()
                    .cloned()
            }
            None => Some(self.object_prototype.clone()),
        };

        let prototype = Object::new(ObjectKind::Ordinary, parent_prototype.as_ref());
        prototype.insert_hidden("constructor", &class);
        class.define_property("prototype", Property::readonly(&prototype));
        class
    }

    /// `new Class()` without running a constructor body.
    #[must_use]
    pub fn instance(&self, class: &Object) -> Object {
        let prototype = class
            .peek(&PropertyKey::from("prototype"))
            .as_object()
            .cloned()
            .unwrap_or_else(|| self.object_prototype.clone());
        Object::new(ObjectKind::Ordinary, Some(&prototype))
    }

    /// `new Error(message)`.
    #[must_use]
    pub fn error(&self, message: &str) -> Object {
        let error = Object::new(ObjectKind::Ordinary, Some(&self.error_prototype));
        init_error(&error, "Error", message);
        error
    }

    /// `new Error(message, { cause })`.
    #[must_use]
    pub fn error_with_cause(&self, message: &str, cause: impl Into<Value>) -> Object {
        let error = self.error(message);
        error.insert_hidden("cause", cause);
        error
    }

    /// `new Class(message)` for a class that extends `Error`.
    #[must_use]
    pub fn construct_error(&self, class: &Object, message: &str) -> Object {
        let error = self.instance(class);
        let name = class
            .function()
            .map_or_else(|| "Error".to_string(), |function| function.name);
        init_error(&error, &name, message);
        error
    }

    #[must_use]
    pub fn date(&self, date: DateTime<Utc>) -> Object {
        self.builtin(ObjectKind::Date(Some(date)), "Date")
    }

    /// `new Date(NaN)`.
    #[must_use]
    pub fn invalid_date(&self) -> Object {
        self.builtin(ObjectKind::Date(None), "Date")
    }

    #[must_use]
    pub fn regexp(&self, source: &str, flags: &str) -> Object {
        self.builtin(
            ObjectKind::RegExp {
                source: source.to_string(),
                flags: flags.to_string(),
            },
            "RegExp",
        )
    }

    #[must_use]
    pub fn buffer(&self, bytes: impl Into<Vec<u8>>) -> Object {
        self.builtin(ObjectKind::Buffer(bytes.into()), "Buffer")
    }

    /// `new URL(input)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when `input` is not an absolute URL.
    pub fn url(&self, input: &str) -> Result<Object> {
        let url = url::Url::parse(input).map_err(|e| Error::invalid_url(input, &e.to_string()))?;
        let pairs = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect::<Vec<_>>();
        let search_params = self.url_search_params(pairs);
        Ok(self.builtin(ObjectKind::Url { url, search_params }, "URL"))
    }

    pub fn url_search_params<I, K, V>(&self, pairs: I) -> Object
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.builtin(ObjectKind::UrlSearchParams(pairs), "URLSearchParams")
    }

    /// Creates form data. Entries that are neither strings nor objects are
    /// stored as their string form, like `FormData.append` does.
    pub fn form_data<I, K, V>(&self, entries: I) -> Object
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| {
                let value = match value.into() {
                    value @ (Value::String(_) | Value::Object(_)) => value,
                    other => Value::String(other.to_string()),
                };
                (key.into(), value)
            })
            .collect();
        self.builtin(ObjectKind::FormData(entries), "FormData")
    }

    #[must_use]
    pub fn weak_map(&self) -> Object {
        self.builtin(ObjectKind::WeakMap, "WeakMap")
    }

    #[must_use]
    pub fn weak_set(&self) -> Object {
        self.builtin(ObjectKind::WeakSet, "WeakSet")
    }

    #[must_use]
    pub fn weak_ref(&self) -> Object {
        self.builtin(ObjectKind::WeakRef, "WeakRef")
    }

    #[must_use]
    pub fn promise(&self, state: PromiseState) -> Object {
        self.builtin(ObjectKind::Promise(state), "Promise")
    }

    #[must_use]
    pub fn blob(&self, size: usize, content_type: &str) -> Object {
        self.builtin(
            ObjectKind::Blob {
                size,
                content_type: content_type.to_string(),
            },
            "Blob",
        )
    }

    #[must_use]
    pub fn observable(&self) -> Object {
        self.builtin(ObjectKind::Observable, "Observable")
    }

    /// A suspended generator object.
    #[must_use]
    pub fn generator(&self, is_async: bool) -> Object {
        let constructor = if is_async { "AsyncGenerator" } else { "Generator" };
        self.builtin(ObjectKind::Generator { is_async }, constructor)
    }

    /// An object of a type this crate has no handler for.
    #[must_use]
    pub fn host_object(&self, type_name: &str, display: &str) -> Object {
        Object::new(
            ObjectKind::Host {
                type_name: type_name.to_string(),
                display: display.to_string(),
            },
            Some(&self.object_prototype),
        )
    }

    /// Returns the class standing in for a Rust type, creating it once.
    pub(crate) fn named_class(&self, name: &str) -> Object {
        if let Some(class) = self.classes.borrow().get(name) {
            return class.clone();
        }
        let class = self.class(name, None);
        self.classes
            .borrow_mut()
            .insert(name.to_string(), class.clone());
        class
    }
}

fn typed_array_length(receiver: &Value) -> Value {
    receiver
        .as_object()
        .and_then(Object::size)
        .map_or(Value::Undefined, |size| Value::Number(size as f64))
}

/// Installs the own `stack` and `message` members of an error instance.
fn init_error(error: &Object, name: &str, message: &str) {
    let stack = format!("{name}: {message}\n    at <anonymous>");
    error.define_property(
        "stack",
        Property::accessor(move |_| Value::from(stack.as_str()), |_, _| {}),
    );
    error.insert_hidden("message", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_names() {
        let realm = Realm::new();
        assert_eq!(realm.object().constructor_name().as_deref(), Some("Object"));
        assert_eq!(
            realm.array([1, 2]).constructor_name().as_deref(),
            Some("Array")
        );
        assert_eq!(
            realm.map::<_, Value, Value>([]).constructor_name().as_deref(),
            Some("Map")
        );
        assert_eq!(
            realm
                .typed_array(TypedArray::Int8(vec![1]))
                .constructor_name()
                .as_deref(),
            Some("Int8Array")
        );
        assert_eq!(realm.object_with_prototype(None).constructor_name(), None);
        assert_eq!(
            realm.function("foo").constructor_name().as_deref(),
            Some("Function")
        );
    }

    #[test]
    fn test_class_hierarchy() {
        let realm = Realm::new();
        let error_class = realm.constructor("Error").unwrap();
        let exception = realm.class("Exception", Some(&error_class));
        let http_exception = realm.class("HttpException", Some(&exception));

        let error = realm.construct_error(&http_exception, "Not found");
        assert!(error.inherits_from(Intrinsic::ErrorPrototype));
        assert_eq!(error.constructor_name().as_deref(), Some("HttpException"));
        assert_eq!(
            http_exception.constructor_name().as_deref(),
            Some("Function")
        );
    }

    #[test]
    fn test_error_members() {
        let realm = Realm::new();
        let error = realm.error_with_cause("boom", "root cause");

        let keys: Vec<String> = error.own_keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["stack", "message", "cause"]);

        let stack = error.get_own_property(&PropertyKey::from("stack")).unwrap();
        assert!(stack.is_accessor());
        assert!(stack.is_writable());
        assert_eq!(
            stack.read(&Value::from(&error)).as_str(),
            Some("Error: boom\n    at <anonymous>")
        );
    }

    #[test]
    fn test_invalid_url() {
        let realm = Realm::new();
        assert!(realm.url("https://example.com/?a=1").is_ok());
        assert!(matches!(
            realm.url("/relative"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_form_data_coerces_primitives() {
        let realm = Realm::new();
        let form = realm.form_data([("age", Value::from(22)), ("name", Value::from("virk"))]);
        match &*form.kind() {
            ObjectKind::FormData(entries) => {
                assert_eq!(entries[0].1.as_str(), Some("22"));
                assert_eq!(entries[1].1.as_str(), Some("virk"));
            }
            other => panic!("unexpected kind {other:?}"),
        };
    }

    #[test]
    fn test_named_classes_are_cached() {
        let realm = Realm::new();
        let a = realm.named_class("User");
        let b = realm.named_class("User");
        assert!(a.ptr_eq(&b));
    }
}
