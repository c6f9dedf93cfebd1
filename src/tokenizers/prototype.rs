use super::emit_member;
use crate::object::{Intrinsic, Object};
use crate::parser::Parser;
use crate::token::Token;
use crate::value::PropertyKey;

/// Tokenizes the members inherited by `object` inside one
/// `prototype-start`/`prototype-end` pair.
///
/// The own keys of the `ignore` intrinsic are filtered out of every level.
/// With `stop_at_boundary` the walk also ends when it reaches that intrinsic.
/// Accessors are never invoked; data members are read through `object`, the
/// way `object[key]` resolves.
pub(crate) fn tokenize(
    parser: &mut Parser,
    object: &Object,
    ignore: Intrinsic,
    stop_at_boundary: bool,
) {
    let boundary = object.find_intrinsic(ignore);
    let ignored = boundary.as_ref().map(Object::own_keys).unwrap_or_default();

    let mut levels: Vec<(Object, Vec<PropertyKey>)> = Vec::new();
    let mut current = object.prototype();
    while let Some(proto) = current {
        if stop_at_boundary && boundary.as_ref().is_some_and(|b| b.ptr_eq(&proto)) {
            break;
        }
        let keys = proto
            .own_keys()
            .into_iter()
            .filter(|key| !ignored.contains(key))
            .collect();
        current = proto.prototype();
        levels.push((proto, keys));
    }

    if levels.is_empty() {
        return;
    }

    parser.collect(Token::PrototypeStart);
    for (proto, keys) in levels {
        for key in keys {
            if key.is_str("constructor") {
                continue;
            }
            let Some(property) = proto.get_own_property(&key) else {
                continue;
            };
            let value = if property.is_accessor() {
                None
            } else {
                Some(object.peek(&key))
            };
            emit_member(parser, &key, &property, false, value);
        }
    }
    parser.collect(Token::PrototypeEnd);
}
