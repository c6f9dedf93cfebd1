//! Heap objects of the host runtime.
//!
//! An [`Object`] is a shared, interior-mutable handle. Everything the parser
//! needs to reflect on lives here: the internal [`ObjectKind`], the ordered
//! own-property table, and the prototype link.
//!
//! Objects are normally created through a [`Realm`](crate::Realm), which wires
//! up prototypes and constructors the way the host would.
//!
//! ## Identity
//!
//! Two handles are the same object when [`Object::ptr_eq`] says so. The
//! parser's cycle detection is keyed on [`Object::id`].
//!
//! ## Reference cycles
//!
//! Handles are reference counted. A graph that contains itself (or a realm,
//! whose prototypes and constructors point at each other) is never freed.

use crate::value::{PropertyKey, Value};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// A host getter. Receives the object the property was read from.
pub type Getter = Rc<dyn Fn(&Value) -> Value>;

/// A host setter. Receives the receiver and the assigned value.
pub type Setter = Rc<dyn Fn(&Value, Value)>;

/// Storage of a single property.
#[derive(Clone)]
pub enum Slot {
    Data { value: Value, writable: bool },
    Accessor {
        get: Option<Getter>,
        set: Option<Setter>,
    },
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Data { value, writable } => f
                .debug_struct("Data")
                .field("value", value)
                .field("writable", writable)
                .finish(),
            Slot::Accessor { get, set } => f
                .debug_struct("Accessor")
                .field("get", &get.is_some())
                .field("set", &set.is_some())
                .finish(),
        }
    }
}

/// An own property: its storage plus the enumerable flag.
///
/// # Examples
///
/// ```rust
/// use dumper::{Property, Value};
///
/// let property = Property::data(Value::from(1));
/// assert!(property.enumerable);
/// assert!(property.is_writable());
///
/// let getter = Property::getter(|_| Value::from("computed"));
/// assert!(getter.is_accessor());
/// assert!(!getter.is_writable());
/// ```
#[derive(Clone, Debug)]
pub struct Property {
    pub slot: Slot,
    pub enumerable: bool,
}

impl Property {
    /// An enumerable, writable data property.
    pub fn data(value: impl Into<Value>) -> Self {
        Property {
            slot: Slot::Data {
                value: value.into(),
                writable: true,
            },
            enumerable: true,
        }
    }

    /// A non-enumerable, writable data property.
    pub fn hidden(value: impl Into<Value>) -> Self {
        Property {
            slot: Slot::Data {
                value: value.into(),
                writable: true,
            },
            enumerable: false,
        }
    }

    /// A non-enumerable, read-only data property.
    pub fn readonly(value: impl Into<Value>) -> Self {
        Property {
            slot: Slot::Data {
                value: value.into(),
                writable: false,
            },
            enumerable: false,
        }
    }

    /// A non-enumerable accessor with only a getter, like a class getter.
    pub fn getter(get: impl Fn(&Value) -> Value + 'static) -> Self {
        Property {
            slot: Slot::Accessor {
                get: Some(Rc::new(get)),
                set: None,
            },
            enumerable: false,
        }
    }

    /// A non-enumerable accessor with a getter and a setter.
    pub fn accessor(
        get: impl Fn(&Value) -> Value + 'static,
        set: impl Fn(&Value, Value) + 'static,
    ) -> Self {
        Property {
            slot: Slot::Accessor {
                get: Some(Rc::new(get)),
                set: Some(Rc::new(set)),
            },
            enumerable: false,
        }
    }

    #[must_use]
    pub fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_accessor(&self) -> bool {
        matches!(self.slot, Slot::Accessor { .. })
    }

    /// Data properties are writable when flagged so, accessors when they have a setter.
    #[inline]
    #[must_use]
    pub fn is_writable(&self) -> bool {
        match &self.slot {
            Slot::Data { writable, .. } => *writable,
            Slot::Accessor { set, .. } => set.is_some(),
        }
    }

    /// Reads the property, invoking the getter of an accessor.
    pub fn read(&self, receiver: &Value) -> Value {
        match &self.slot {
            Slot::Data { value, .. } => value.clone(),
            Slot::Accessor { get: Some(get), .. } => get(receiver),
            Slot::Accessor { get: None, .. } => Value::Undefined,
        }
    }
}

/// Realm objects with a special role during traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intrinsic {
    ObjectPrototype,
    ArrayPrototype,
    ErrorPrototype,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    Plain,
    Async,
    Generator,
    AsyncGenerator,
    Class,
}

/// Metadata of a callable. Bodies are never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub kind: FunctionKind,
}

impl Function {
    pub fn new(name: impl Into<String>, kind: FunctionKind) -> Self {
        Function {
            name: name.into(),
            kind,
        }
    }
}

/// Fixed-width numeric arrays.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    BigInt64(Vec<i64>),
    BigUint64(Vec<u64>),
}

impl TypedArray {
    /// Returns the constructor name of this array kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            TypedArray::Int8(_) => "Int8Array",
            TypedArray::Uint8(_) => "Uint8Array",
            TypedArray::Uint8Clamped(_) => "Uint8ClampedArray",
            TypedArray::Int16(_) => "Int16Array",
            TypedArray::Uint16(_) => "Uint16Array",
            TypedArray::Int32(_) => "Int32Array",
            TypedArray::Uint32(_) => "Uint32Array",
            TypedArray::Float32(_) => "Float32Array",
            TypedArray::Float64(_) => "Float64Array",
            TypedArray::BigInt64(_) => "BigInt64Array",
            TypedArray::BigUint64(_) => "BigUint64Array",
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
            TypedArray::BigInt64(v) => v.len(),
            TypedArray::BigUint64(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads one element as a host value.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        let value = match self {
            TypedArray::Int8(v) => Value::from(*v.get(index)?),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => Value::from(*v.get(index)?),
            TypedArray::Int16(v) => Value::from(*v.get(index)?),
            TypedArray::Uint16(v) => Value::from(*v.get(index)?),
            TypedArray::Int32(v) => Value::from(*v.get(index)?),
            TypedArray::Uint32(v) => Value::from(*v.get(index)?),
            TypedArray::Float32(v) => Value::from(*v.get(index)?),
            TypedArray::Float64(v) => Value::from(*v.get(index)?),
            TypedArray::BigInt64(v) => Value::BigInt((*v.get(index)?).into()),
            TypedArray::BigUint64(v) => Value::BigInt((*v.get(index)?).into()),
        };
        Some(value)
    }
}

/// Settlement state of a promise, inspected synchronously.
#[derive(Clone, Debug, Default)]
pub enum PromiseState {
    #[default]
    Pending,
    Fulfilled(Value),
    Rejected(Value),
}

impl PromiseState {
    #[inline]
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, PromiseState::Pending)
    }
}

/// The internal slots of an object, which decide how it is classified.
#[derive(Clone, Debug, Default)]
pub enum ObjectKind {
    #[default]
    Ordinary,
    /// Elements of an array; `None` is a hole.
    Array(Vec<Option<Value>>),
    TypedArray(TypedArray),
    /// Entries in insertion order.
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    Function(Function),
    /// `None` is an invalid date.
    Date(Option<DateTime<Utc>>),
    RegExp { source: String, flags: String },
    Buffer(Vec<u8>),
    /// A parsed URL and the `URLSearchParams` object it hands out.
    Url {
        url: url::Url,
        search_params: Object,
    },
    UrlSearchParams(Vec<(String, String)>),
    FormData(Vec<(String, Value)>),
    WeakMap,
    WeakSet,
    WeakRef,
    Promise(PromiseState),
    Blob { size: usize, content_type: String },
    Observable,
    Generator { is_async: bool },
    /// A value the crate cannot classify. Always tokenized as `unknown`.
    Host { type_name: String, display: String },
}

struct ObjectData {
    kind: ObjectKind,
    prototype: Option<Object>,
    properties: IndexMap<PropertyKey, Property>,
    intrinsic: Option<Intrinsic>,
}

/// A shared handle to a heap object.
///
/// # Examples
///
/// ```rust
/// use dumper::{PropertyKey, Realm, Value};
///
/// let realm = Realm::new();
/// let user = realm.object();
/// user.insert("id", 1);
/// user.insert_hidden("secret", "s3cr3t");
///
/// assert_eq!(user.own_keys().len(), 2);
/// assert!(!user.get_own_property(&PropertyKey::from("secret")).unwrap().enumerable);
/// assert_eq!(user.constructor_name().as_deref(), Some("Object"));
/// ```
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only shallow data: the graph may contain itself.
        match self.0.try_borrow() {
            Ok(data) => f
                .debug_struct("Object")
                .field("id", &self.id())
                .field("properties", &data.properties.len())
                .finish_non_exhaustive(),
            Err(_) => f.debug_struct("Object").field("id", &self.id()).finish(),
        }
    }
}

impl Object {
    /// Creates an object with the given internal slots and prototype.
    pub fn new(kind: ObjectKind, prototype: Option<&Object>) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            kind,
            prototype: prototype.cloned(),
            properties: IndexMap::new(),
            intrinsic: None,
        })))
    }

    pub(crate) fn new_intrinsic(
        kind: ObjectKind,
        prototype: Option<&Object>,
        intrinsic: Intrinsic,
    ) -> Self {
        let object = Object::new(kind, prototype);
        object.0.borrow_mut().intrinsic = Some(intrinsic);
        object
    }

    /// Identity of the object, stable for as long as any handle lives.
    #[inline]
    #[must_use]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn kind(&self) -> Ref<'_, ObjectKind> {
        Ref::map(self.0.borrow(), |data| &data.kind)
    }

    pub fn kind_mut(&self) -> RefMut<'_, ObjectKind> {
        RefMut::map(self.0.borrow_mut(), |data| &mut data.kind)
    }

    #[must_use]
    pub fn prototype(&self) -> Option<Object> {
        self.0.borrow().prototype.clone()
    }

    /// Replaces the prototype. Returns `false`, leaving the object untouched,
    /// when the change would make the prototype chain circular.
    pub fn set_prototype(&self, prototype: Option<&Object>) -> bool {
        let mut current = prototype.cloned();
        while let Some(proto) = current {
            if proto.ptr_eq(self) {
                return false;
            }
            current = proto.prototype();
        }
        self.0.borrow_mut().prototype = prototype.cloned();
        true
    }

    #[must_use]
    pub fn intrinsic(&self) -> Option<Intrinsic> {
        self.0.borrow().intrinsic
    }

    /// Finds an intrinsic on this object or its prototype chain.
    #[must_use]
    pub fn find_intrinsic(&self, intrinsic: Intrinsic) -> Option<Object> {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            if object.intrinsic() == Some(intrinsic) {
                return Some(object);
            }
            current = object.prototype();
        }
        None
    }

    /// `instanceof` against an intrinsic prototype: the object itself is not
    /// part of the check.
    #[must_use]
    pub fn inherits_from(&self, intrinsic: Intrinsic) -> bool {
        self.prototype()
            .and_then(|proto| proto.find_intrinsic(intrinsic))
            .is_some()
    }

    /// Plain objects have no prototype or inherit straight from `Object.prototype`.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        match self.prototype() {
            None => true,
            Some(proto) => proto.intrinsic() == Some(Intrinsic::ObjectPrototype),
        }
    }

    /// Defines an enumerable, writable data property. Redefining a key keeps
    /// its position.
    pub fn insert(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) {
        self.define_property(key, Property::data(value));
    }

    /// Defines a non-enumerable, writable data property.
    pub fn insert_hidden(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) {
        self.define_property(key, Property::hidden(value));
    }

    pub fn define_property(&self, key: impl Into<PropertyKey>, property: Property) {
        self.0.borrow_mut().properties.insert(key.into(), property);
    }

    /// Defines an accessor with a getter only.
    pub fn define_getter(
        &self,
        key: impl Into<PropertyKey>,
        enumerable: bool,
        get: impl Fn(&Value) -> Value + 'static,
    ) {
        self.define_property(key, Property::getter(get).with_enumerable(enumerable));
    }

    pub fn remove(&self, key: &PropertyKey) -> Option<Property> {
        self.0.borrow_mut().properties.shift_remove(key)
    }

    /// Returns a copy of an own property's descriptor.
    #[must_use]
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<Property> {
        self.0.borrow().properties.get(key).cloned()
    }

    /// Own keys in host enumeration order: array indices ascending, then
    /// strings in insertion order, then symbols in insertion order.
    #[must_use]
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let data = self.0.borrow();
        let mut indices: Vec<(u32, &PropertyKey)> = data
            .properties
            .keys()
            .filter_map(|key| key.array_index().map(|index| (index, key)))
            .collect();
        indices.sort_by_key(|(index, _)| *index);

        let strings = data
            .properties
            .keys()
            .filter(|key| !key.is_symbol() && key.array_index().is_none());
        let symbols = data.properties.keys().filter(|key| key.is_symbol());

        indices
            .into_iter()
            .map(|(_, key)| key)
            .chain(strings)
            .chain(symbols)
            .cloned()
            .collect()
    }

    /// Resolves `key` through this object and its prototype chain without
    /// running accessors: an accessor reads as `undefined`.
    #[must_use]
    pub fn peek(&self, key: &PropertyKey) -> Value {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            if let Some(property) = object.get_own_property(key) {
                return match property.slot {
                    Slot::Data { value, .. } => value,
                    Slot::Accessor { .. } => Value::Undefined,
                };
            }
            current = object.prototype();
        }
        Value::Undefined
    }

    /// Returns the function metadata when this object is callable.
    #[must_use]
    pub fn function(&self) -> Option<Function> {
        match &*self.kind() {
            ObjectKind::Function(function) => Some(function.clone()),
            _ => None,
        }
    }

    /// `Object.getPrototypeOf(value)?.constructor.name`, without running getters.
    #[must_use]
    pub fn constructor_name(&self) -> Option<String> {
        let proto = self.prototype()?;
        match proto.peek(&PropertyKey::from("constructor")) {
            Value::Object(constructor) => constructor.function().map(|function| function.name),
            _ => None,
        }
    }

    /// Appends an element to an array. Other kinds are left untouched.
    pub fn push(&self, value: impl Into<Value>) {
        if let ObjectKind::Array(elements) = &mut *self.kind_mut() {
            elements.push(Some(value.into()));
        }
    }

    /// Stores an array element, leaving holes when writing past the end.
    pub fn set_index(&self, index: usize, value: impl Into<Value>) {
        if let ObjectKind::Array(elements) = &mut *self.kind_mut() {
            if elements.len() <= index {
                elements.resize(index + 1, None);
            }
            elements[index] = Some(value.into());
        }
    }

    /// Adds or replaces a map entry, comparing keys with `SameValueZero`.
    pub fn map_insert(&self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let ObjectKind::Map(entries) = &mut *self.kind_mut() {
            match entries.iter_mut().find(|(k, _)| k.same_value_zero(&key)) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
    }

    /// Adds a value to a set unless an equal one is already present.
    pub fn set_add(&self, value: impl Into<Value>) {
        let value = value.into();
        if let ObjectKind::Set(values) = &mut *self.kind_mut() {
            if !values.iter().any(|v| v.same_value_zero(&value)) {
                values.push(value);
            }
        }
    }

    /// Number of elements of an array-like, entries of a map or values of a set.
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        match &*self.kind() {
            ObjectKind::Array(elements) => Some(elements.len()),
            ObjectKind::TypedArray(array) => Some(array.len()),
            ObjectKind::Buffer(bytes) => Some(bytes.len()),
            ObjectKind::Map(entries) => Some(entries.len()),
            ObjectKind::Set(values) => Some(values.len()),
            _ => None,
        }
    }

    /// Snapshot of at most `limit` array-like elements plus the full length.
    pub(crate) fn elements(&self, limit: usize) -> Option<(usize, Vec<Option<Value>>)> {
        match &*self.kind() {
            ObjectKind::Array(elements) => Some((
                elements.len(),
                elements.iter().take(limit).cloned().collect(),
            )),
            ObjectKind::TypedArray(array) => Some((
                array.len(),
                (0..array.len().min(limit)).map(|i| array.get(i)).collect(),
            )),
            _ => None,
        }
    }

    /// Snapshot of at most `limit` map entries plus the full size.
    pub(crate) fn map_entries(&self, limit: usize) -> Option<(usize, Vec<(Value, Value)>)> {
        match &*self.kind() {
            ObjectKind::Map(entries) => Some((
                entries.len(),
                entries.iter().take(limit).cloned().collect(),
            )),
            _ => None,
        }
    }

    /// Snapshot of at most `limit` set values plus the full size.
    pub(crate) fn set_values(&self, limit: usize) -> Option<(usize, Vec<Value>)> {
        match &*self.kind() {
            ObjectKind::Set(values) => {
                Some((values.len(), values.iter().take(limit).cloned().collect()))
            }
            _ => None,
        }
    }
}
