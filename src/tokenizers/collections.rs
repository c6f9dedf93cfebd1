use super::{admit, max_length_ref, within};
use crate::context::Composite;
use crate::object::Object;
use crate::parser::Parser;
use crate::token::Token;

/// Tokenizes the entries of a map in insertion order.
pub(crate) fn tokenize_map(parser: &mut Parser, object: &Object) {
    if !admit(parser, Composite::Map, object) {
        return;
    }

    let limit = parser.options().max_array_length;
    let (size, entries) = object.map_entries(limit).unwrap_or_default();

    within(parser, Composite::Map, object, |parser| {
        parser.collect(Token::MapStart { size });

        for (index, (key, value)) in entries.into_iter().enumerate() {
            parser.collect(Token::MapRowStart { index });

            parser.collect(Token::MapKeyStart { index });
            parser.parse(&key);
            parser.collect(Token::MapKeyEnd { index });

            parser.collect(Token::MapValueStart { index });
            parser.parse(&value);
            parser.collect(Token::MapValueEnd { index });

            parser.collect(Token::MapRowEnd { index });
        }
        if size > limit {
            max_length_ref(parser, Composite::Map, limit, size);
        }

        parser.collect(Token::MapEnd { size });
    });
}

/// Tokenizes the values of a set in insertion order.
pub(crate) fn tokenize_set(parser: &mut Parser, object: &Object) {
    if !admit(parser, Composite::Set, object) {
        return;
    }

    let limit = parser.options().max_array_length;
    let (size, values) = object.set_values(limit).unwrap_or_default();

    within(parser, Composite::Set, object, |parser| {
        parser.collect(Token::SetStart { size });

        for (index, value) in values.into_iter().enumerate() {
            parser.collect(Token::SetValueStart { index });
            parser.parse(&value);
            parser.collect(Token::SetValueEnd { index });
        }
        if size > limit {
            max_length_ref(parser, Composite::Set, limit, size);
        }

        parser.collect(Token::SetEnd { size });
    });
}
