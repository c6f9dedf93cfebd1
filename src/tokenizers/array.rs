use super::{admit, max_length_ref, prototype, within};
use crate::context::Composite;
use crate::object::{Intrinsic, Object, ObjectKind};
use crate::parser::Parser;
use crate::token::Token;
use tracing::trace;

/// Tokenizes arrays and typed arrays.
pub(crate) fn tokenize(parser: &mut Parser, object: &Object) {
    if !admit(parser, Composite::Array, object) {
        return;
    }

    let limit = parser.options().max_array_length;
    let (size, elements) = object.elements(limit).unwrap_or_default();
    let name = object
        .constructor_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| kind_name(object).to_string());

    if parser.options().is_collapsed(&name) {
        trace!(name = name.as_str(), "collapsed array");
        parser.collect(Token::Collapse {
            name: name.clone(),
            token: Box::new(Token::ArrayStart { name, size }),
        });
        return;
    }

    within(parser, Composite::Array, object, |parser| {
        parser.collect(Token::ArrayStart { name, size });

        for (index, element) in elements.into_iter().enumerate() {
            match element {
                Some(value) => {
                    parser.collect(Token::ArrayValueStart { index });
                    parser.parse(&value);
                    parser.collect(Token::ArrayValueEnd { index });
                }
                None => parser.collect(Token::ArrayValueHole { index }),
            }
        }
        if size > limit {
            max_length_ref(parser, Composite::Array, limit, size);
        }

        if parser.options().inspect_array_prototype {
            // Typed arrays do not inherit from Array.prototype.
            let ignore = if object.find_intrinsic(Intrinsic::ArrayPrototype).is_some() {
                Intrinsic::ArrayPrototype
            } else {
                Intrinsic::ObjectPrototype
            };
            prototype::tokenize(parser, object, ignore, true);
        }

        parser.collect(Token::ArrayEnd { size });
    });
}

fn kind_name(object: &Object) -> &'static str {
    match &*object.kind() {
        ObjectKind::TypedArray(array) => array.name(),
        _ => "Array",
    }
}
