use super::{admit, emit_member, prototype, within};
use crate::context::Composite;
use crate::object::{Intrinsic, Object};
use crate::options::PrototypeInspection;
use crate::parser::Parser;
use crate::token::Token;
use crate::value::Value;
use tracing::trace;

/// Per-call overrides of the object walker. `None` fields fall back to the
/// parser options.
#[derive(Debug, Default)]
pub(crate) struct ObjectOptions<'a> {
    /// Label used instead of the resolved constructor name.
    pub(crate) constructor_name: Option<&'a str>,
    pub(crate) show_hidden: Option<bool>,
    pub(crate) inspect_prototype: Option<PrototypeInspection>,
    /// Own keys that are never emitted.
    pub(crate) members_to_ignore: &'a [&'a str],
    /// Accessors that are read instead of reported as getters.
    pub(crate) eager_getters: &'a [&'a str],
}

pub(crate) fn tokenize(parser: &mut Parser, object: &Object, options: &ObjectOptions<'_>) {
    if !admit(parser, Composite::Object, object) {
        return;
    }

    let name = options
        .constructor_name
        .map(str::to_string)
        .or_else(|| object.constructor_name());

    if let Some(name) = name.as_deref() {
        if parser.options().is_collapsed(name) {
            trace!(name, "collapsed object");
            parser.collect(Token::Collapse {
                name: name.to_string(),
                token: Box::new(Token::ObjectStart {
                    constructor_name: Some(name.to_string()),
                }),
            });
            return;
        }
    }

    let show_hidden = options.show_hidden.unwrap_or(parser.options().show_hidden);
    let inspection = options
        .inspect_prototype
        .unwrap_or(parser.options().inspect_object_prototype);

    within(parser, Composite::Object, object, |parser| {
        parser.collect(Token::ObjectStart {
            constructor_name: name,
        });

        let receiver = Value::from(object);
        for key in object.own_keys() {
            if options.members_to_ignore.iter().any(|member| key.is_str(member)) {
                continue;
            }
            let Some(property) = object.get_own_property(&key) else {
                continue;
            };
            if !property.enumerable && !show_hidden {
                continue;
            }

            let eager = options.eager_getters.iter().any(|getter| key.is_str(getter));
            let value = if property.is_accessor() && !eager {
                None
            } else {
                Some(property.read(&receiver))
            };
            emit_member(parser, &key, &property, true, value);
        }

        match inspection {
            PrototypeInspection::Never => {}
            PrototypeInspection::Always => {
                prototype::tokenize(parser, object, Intrinsic::ObjectPrototype, false);
            }
            PrototypeInspection::UnlessPlainObject => {
                if !object.is_plain() {
                    prototype::tokenize(parser, object, Intrinsic::ObjectPrototype, true);
                }
            }
        }

        parser.collect(Token::ObjectEnd);
    });
}
