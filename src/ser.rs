//! Building host values from Rust data.
//!
//! [`to_value`] walks any `Serialize` type and rebuilds it as a [`Value`]
//! graph inside a [`Realm`], so ordinary Rust data can be tokenized and
//! dumped without hand-building objects.
//!
//! The mapping follows what a JavaScript program would see after parsing the
//! equivalent JSON, with a few additions:
//!
//! - integers beyond `Number.MAX_SAFE_INTEGER` become bigints
//! - byte slices become buffers
//! - structs become instances of a class named after the struct
//! - maps with non-string keys become `Map`s
//!
//! ## Examples
//!
//! ```rust
//! use dumper::{to_value, Realm, Token};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User { id: u32 }
//!
//! let realm = Realm::new();
//! let value = to_value(&realm, &User { id: 1 }).unwrap();
//! let tokens = dumper::tokenize(&value);
//! assert!(matches!(
//!     &tokens[0],
//!     Token::ObjectStart { constructor_name: Some(name) } if name == "User"
//! ));
//! ```

use crate::object::Object;
use crate::realm::Realm;
use crate::value::Value;
use crate::{Error, Result};
use num_bigint::BigInt;
use serde::{ser, Serialize};

/// Largest integer a double holds exactly.
const MAX_SAFE_INTEGER: i128 = (1 << 53) - 1;

/// Converts any `Serialize` value into a host value owned by `realm`.
///
/// # Errors
///
/// Fails only when the `Serialize` implementation itself reports an error.
pub fn to_value<T>(realm: &Realm, value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer { realm })
}

/// Serializer producing [`Value`]s inside a [`Realm`].
#[derive(Clone, Copy)]
pub struct ValueSerializer<'r> {
    realm: &'r Realm,
}

impl<'r> ValueSerializer<'r> {
    pub fn new(realm: &'r Realm) -> Self {
        ValueSerializer { realm }
    }
}

pub struct SerializeVec<'r> {
    realm: &'r Realm,
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap<'r> {
    realm: &'r Realm,
    entries: Vec<(Value, Value)>,
    current_key: Option<Value>,
    class_name: Option<&'static str>,
    variant: Option<&'static str>,
}

fn integer(value: i128) -> Value {
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value) {
        Value::Number(value as f64)
    } else {
        Value::BigInt(BigInt::from(value))
    }
}

/// `{ variant: value }`, the externally tagged enum shape.
fn tagged(realm: &Realm, variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(variant) => {
            let object = realm.object();
            object.insert(variant, value);
            Value::Object(object)
        }
        None => value,
    }
}

impl<'r> ser::Serializer for ValueSerializer<'r> {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec<'r>;
    type SerializeTuple = SerializeVec<'r>;
    type SerializeTupleStruct = SerializeVec<'r>;
    type SerializeTupleVariant = SerializeVec<'r>;
    type SerializeMap = SerializeMap<'r>;
    type SerializeStruct = SerializeMap<'r>;
    type SerializeStructVariant = SerializeMap<'r>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(integer(i128::from(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(integer(i128::from(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        match i128::try_from(v) {
            Ok(v) => Ok(integer(v)),
            Err(_) => Ok(Value::BigInt(BigInt::from(v))),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Object(self.realm.buffer(v)))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(self)?;
        Ok(tagged(self.realm, Some(variant), value))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec<'r>> {
        Ok(SerializeVec::new(self.realm, len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec<'r>> {
        Ok(SerializeVec::new(self.realm, len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec<'r>> {
        Ok(SerializeVec::new(self.realm, len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec<'r>> {
        Ok(SerializeVec::new(self.realm, len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap<'r>> {
        Ok(SerializeMap::new(self.realm, None, None))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SerializeMap<'r>> {
        Ok(SerializeMap::new(self.realm, Some(name), None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap<'r>> {
        Ok(SerializeMap::new(self.realm, None, Some(variant)))
    }
}

impl<'r> SerializeVec<'r> {
    fn new(realm: &'r Realm, capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            realm,
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(self.realm, value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        let array = Value::Object(self.realm.array(self.vec));
        tagged(self.realm, self.variant, array)
    }
}

impl<'r> SerializeMap<'r> {
    fn new(
        realm: &'r Realm,
        class_name: Option<&'static str>,
        variant: Option<&'static str>,
    ) -> Self {
        SerializeMap {
            realm,
            entries: Vec::new(),
            current_key: None,
            class_name,
            variant,
        }
    }

    fn finish(self) -> Value {
        let SerializeMap {
            realm,
            entries,
            class_name,
            variant,
            ..
        } = self;
        let object = match class_name {
            Some(name) => realm.instance(&realm.named_class(name)),
            None if entries.iter().all(|(key, _)| key.as_str().is_some()) => realm.object(),
            None => return tagged(realm, variant, Value::Object(realm.map(entries))),
        };
        fill(&object, entries);
        tagged(realm, variant, Value::Object(object))
    }
}

fn fill(object: &Object, entries: Vec<(Value, Value)>) {
    for (key, value) in entries {
        if let Value::String(key) = key {
            object.insert(key, value);
        }
    }
}

impl<'r> ser::SerializeSeq for SerializeVec<'r> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'r> ser::SerializeTuple for SerializeVec<'r> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'r> ser::SerializeTupleStruct for SerializeVec<'r> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'r> ser::SerializeTupleVariant for SerializeVec<'r> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'r> ser::SerializeMap for SerializeMap<'r> {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_value(self.realm, key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entries.push((key, to_value(self.realm, value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'r> ser::SerializeStruct for SerializeMap<'r> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entries
            .push((Value::from(key), to_value(self.realm, value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'r> ser::SerializeStructVariant for SerializeMap<'r> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entries
            .push((Value::from(key), to_value(self.realm, value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;
    use crate::value::PropertyKey;
    use serde::Serialize;
    use std::collections::BTreeMap;

    fn number(value: &Value) -> f64 {
        match value {
            Value::Number(n) => *n,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn test_integers_switch_to_bigint_past_safe_range() {
        let realm = Realm::new();
        assert_eq!(number(&to_value(&realm, &42u64).unwrap()), 42.0);
        assert_eq!(
            number(&to_value(&realm, &9_007_199_254_740_991i64).unwrap()),
            9_007_199_254_740_991.0
        );
        assert!(matches!(
            to_value(&realm, &9_007_199_254_740_992i64).unwrap(),
            Value::BigInt(_)
        ));
        assert!(matches!(
            to_value(&realm, &u128::MAX).unwrap(),
            Value::BigInt(_)
        ));
    }

    #[test]
    fn test_struct_becomes_named_instance() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let realm = Realm::new();
        let value = to_value(&realm, &Point { x: 1, y: 2 }).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.constructor_name().as_deref(), Some("Point"));
        assert_eq!(number(&object.peek(&PropertyKey::from("y"))), 2.0);

        let other = to_value(&realm, &Point { x: 3, y: 4 }).unwrap();
        assert!(object
            .prototype()
            .unwrap()
            .ptr_eq(&other.as_object().unwrap().prototype().unwrap()));
    }

    #[test]
    fn test_maps_pick_object_or_map() {
        let realm = Realm::new();

        let mut by_name = BTreeMap::new();
        by_name.insert("a", 1);
        let value = to_value(&realm, &by_name).unwrap();
        assert!(value.as_object().unwrap().is_plain());

        let mut by_id = BTreeMap::new();
        by_id.insert(1, "a");
        let value = to_value(&realm, &by_id).unwrap();
        assert!(matches!(
            &*value.as_object().unwrap().kind(),
            ObjectKind::Map(entries) if entries.len() == 1
        ));
    }

    #[test]
    fn test_enum_variants() {
        #[derive(Serialize)]
        enum Shape {
            Empty,
            Circle(f64),
            Rect { w: u8, h: u8 },
        }

        let realm = Realm::new();
        assert_eq!(
            to_value(&realm, &Shape::Empty).unwrap().as_str(),
            Some("Empty")
        );

        let circle = to_value(&realm, &Shape::Circle(1.5)).unwrap();
        let circle = circle.as_object().unwrap();
        assert_eq!(number(&circle.peek(&PropertyKey::from("Circle"))), 1.5);

        let rect = to_value(&realm, &Shape::Rect { w: 2, h: 3 }).unwrap();
        let inner = rect
            .as_object()
            .unwrap()
            .peek(&PropertyKey::from("Rect"));
        assert_eq!(
            number(&inner.as_object().unwrap().peek(&PropertyKey::from("h"))),
            3.0
        );
    }

    #[test]
    fn test_bytes_and_options() {
        let realm = Realm::new();
        let value = to_value(&realm, &Bytes(&[1, 2])).unwrap();
        assert!(matches!(
            &*value.as_object().unwrap().kind(),
            ObjectKind::Buffer(bytes) if bytes == &[1, 2]
        ));

        assert!(matches!(
            to_value(&realm, &None::<u8>).unwrap(),
            Value::Null
        ));
        let list = to_value(&realm, &vec![Some(1), None]).unwrap();
        assert_eq!(list.as_object().unwrap().size(), Some(2));
    }

    struct Bytes<'a>(&'a [u8]);

    impl Serialize for Bytes<'_> {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: ser::Serializer,
        {
            serializer.serialize_bytes(self.0)
        }
    }
}
