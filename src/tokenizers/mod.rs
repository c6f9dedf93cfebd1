//! The type dispatch table and the composite walkers.
//!
//! [`tokenize`] classifies a value and routes it to its handler. Scalars are
//! collected directly; composites go through the walkers in the sub-modules,
//! which call back into [`Parser::parse`] for their children.

mod array;
mod builtins;
mod collections;
mod function;
mod object;
mod prototype;

use crate::context::Composite;
use crate::inspect;
use crate::object::{Object, ObjectKind, Property};
use crate::parser::Parser;
use crate::token::Token;
use crate::type_tag::TypeTag;
use crate::value::{PropertyKey, Value};
use std::panic::{self, AssertUnwindSafe};
use tracing::trace;

/// Routes a value to the handler registered for its type.
pub(crate) fn tokenize(parser: &mut Parser, value: &Value) {
    match (TypeTag::of(value), value) {
        (TypeTag::Undefined, _) => parser.collect(Token::Undefined),
        (TypeTag::Null, _) => parser.collect(Token::Null),
        (TypeTag::Boolean, Value::Bool(value)) => parser.collect(Token::Boolean { value: *value }),
        (TypeTag::Number | TypeTag::NaN, Value::Number(value)) => {
            parser.collect(Token::Number { value: *value });
        }
        (TypeTag::BigInt, Value::BigInt(value)) => parser.collect(Token::BigInt {
            value: format!("{value}n"),
        }),
        (TypeTag::String, Value::String(value)) => {
            let value = inspect::quote_string(value, parser.options().max_string_length);
            parser.collect(Token::String { value });
        }
        (TypeTag::Symbol, Value::Symbol(symbol)) => parser.collect(Token::Symbol {
            value: symbol.to_string(),
        }),
        (tag, Value::Object(object)) => tokenize_object(parser, tag, object),
        (tag, value) => unknown(parser, &tag, value),
    }
}

fn tokenize_object(parser: &mut Parser, tag: TypeTag, object: &Object) {
    match tag {
        TypeTag::Object => object::tokenize(parser, object, &object::ObjectOptions::default()),
        TypeTag::Array
        | TypeTag::Int8Array
        | TypeTag::Uint8Array
        | TypeTag::Uint8ClampedArray
        | TypeTag::Int16Array
        | TypeTag::Uint16Array
        | TypeTag::Int32Array
        | TypeTag::Uint32Array
        | TypeTag::Float32Array
        | TypeTag::Float64Array
        | TypeTag::BigInt64Array
        | TypeTag::BigUint64Array => array::tokenize(parser, object),
        TypeTag::Map => collections::tokenize_map(parser, object),
        TypeTag::Set => collections::tokenize_set(parser, object),
        TypeTag::Function => function::tokenize(parser, object),
        TypeTag::Error => builtins::tokenize_error(parser, object),
        TypeTag::Url => builtins::tokenize_url(parser, object),
        TypeTag::UrlSearchParams => builtins::tokenize_url_search_params(parser, object),
        TypeTag::FormData => builtins::tokenize_form_data(parser, object),
        TypeTag::Date => {
            let value = match &*object.kind() {
                ObjectKind::Date(date) => inspect::date_to_string(date.as_ref()),
                _ => Value::from(object).to_string(),
            };
            parser.collect(Token::Date { value });
        }
        TypeTag::RegExp => parser.collect(Token::Regexp {
            value: Value::from(object).to_string(),
        }),
        TypeTag::Buffer => {
            let value = match &*object.kind() {
                ObjectKind::Buffer(bytes) => inspect::inspect_buffer(bytes),
                _ => inspect::inspect_buffer(&[]),
            };
            parser.collect(Token::Buffer { value });
        }
        TypeTag::Promise => {
            let is_fulfilled = match &*object.kind() {
                ObjectKind::Promise(state) => state.is_settled(),
                _ => false,
            };
            parser.collect(Token::Promise { is_fulfilled });
        }
        TypeTag::Blob => {
            let token = match &*object.kind() {
                ObjectKind::Blob { size, content_type } => Token::Blob {
                    size: *size,
                    content_type: content_type.clone(),
                },
                _ => Token::Blob {
                    size: 0,
                    content_type: String::new(),
                },
            };
            parser.collect(token);
        }
        TypeTag::WeakSet => parser.collect(Token::WeakSet),
        TypeTag::WeakMap => parser.collect(Token::WeakMap),
        TypeTag::WeakRef => parser.collect(Token::WeakRef),
        TypeTag::Observable => parser.collect(Token::Observable),
        TypeTag::Generator => parser.collect(Token::Generator { is_async: false }),
        TypeTag::AsyncGenerator => parser.collect(Token::Generator { is_async: true }),
        TypeTag::Host(_)
        | TypeTag::Undefined
        | TypeTag::Null
        | TypeTag::String
        | TypeTag::Number
        | TypeTag::NaN
        | TypeTag::Boolean
        | TypeTag::BigInt
        | TypeTag::Symbol => unknown(parser, &tag, &Value::from(object)),
    }
}

fn unknown(parser: &mut Parser, tag: &TypeTag, value: &Value) {
    trace!(js_type = tag.name(), "no tokenizer registered, emitting unknown");
    parser.collect(Token::Unknown {
        js_type: tag.name().to_string(),
        value: value.to_string(),
    });
}

/// Runs the cycle check, then the depth check. Collects the sentinel and
/// returns `false` when either one stops the traversal.
pub(crate) fn admit(parser: &mut Parser, kind: Composite, object: &Object) -> bool {
    if parser.context.is_seen(kind, object) {
        trace!(kind = kind.name(), "circular reference");
        parser.collect(kind.circular_ref());
        return false;
    }
    if parser.context.depth() >= parser.options().depth {
        trace!(
            kind = kind.name(),
            depth = parser.context.depth(),
            "max depth reached"
        );
        parser.collect(kind.max_depth_ref());
        return false;
    }
    true
}

/// Marks `object` as on the active path for the duration of `walk`.
///
/// The mark is removed even when `walk` panics (a host getter may), so a
/// parser that survives the panic does not report `object` as circular on
/// its next pass.
pub(crate) fn within<R>(
    parser: &mut Parser,
    kind: Composite,
    object: &Object,
    walk: impl FnOnce(&mut Parser) -> R,
) -> R {
    parser.context.enter(kind, object);
    let result = panic::catch_unwind(AssertUnwindSafe(|| walk(parser)));
    parser.context.leave(kind, object);
    match result {
        Ok(result) => result,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Emits the key of a member and then either its value or a getter marker.
/// `value` is `None` when the member is an accessor that must not run.
pub(crate) fn emit_member(
    parser: &mut Parser,
    key: &PropertyKey,
    property: &Property,
    is_own_key: bool,
    value: Option<Value>,
) {
    parser.collect(Token::ObjectKey {
        value: key.to_string(),
        is_symbol: key.is_symbol(),
        is_writable: property.is_writable(),
        is_own_key,
    });

    match value {
        None => parser.collect(Token::ObjectValueGetter),
        Some(value) => {
            parser.collect(Token::ObjectValueStart);
            parser.parse(&value);
            parser.collect(Token::ObjectValueEnd);
        }
    }
}

/// Emits the max-length sentinel shared by arrays, maps and sets.
pub(crate) fn max_length_ref(parser: &mut Parser, kind: Composite, limit: usize, size: usize) {
    trace!(kind = kind.name(), limit, size, "max length reached");
    let token = match kind {
        Composite::Map => Token::MapMaxLengthRef { limit, size },
        Composite::Set => Token::SetMaxLengthRef { limit, size },
        Composite::Array | Composite::Object => Token::ArrayMaxLengthRef { limit, size },
    };
    parser.collect(token);
}
