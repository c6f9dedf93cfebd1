use super::object::{self, ObjectOptions};
use crate::object::{FunctionKind, Object};
use crate::options::PrototypeInspection;
use crate::parser::Parser;
use crate::token::Token;

/// Static members that every class carries and that are never shown.
const IGNORED_STATIC_MEMBERS: &[&str] = &["prototype", "name", "length"];

/// Tokenizes function metadata. Classes optionally expose their static
/// members inside a `static-members-start`/`static-members-end` pair.
pub(crate) fn tokenize(parser: &mut Parser, object: &Object) {
    let Some(function) = object.function() else {
        return;
    };

    let (is_class, is_async, is_generator) = match function.kind {
        FunctionKind::Plain => (false, false, false),
        FunctionKind::Async => (false, true, false),
        FunctionKind::Generator => (false, false, true),
        FunctionKind::AsyncGenerator => (false, true, true),
        FunctionKind::Class => (true, false, false),
    };
    let name = if function.name.is_empty() {
        "anonymous".to_string()
    } else {
        function.name
    };

    parser.collect(Token::Function {
        name,
        is_class,
        is_async,
        is_generator,
    });

    if is_class && parser.options().inspect_static_members {
        parser.collect(Token::StaticMembersStart);
        object::tokenize(
            parser,
            object,
            &ObjectOptions {
                show_hidden: Some(true),
                inspect_prototype: Some(PrototypeInspection::Never),
                members_to_ignore: IGNORED_STATIC_MEMBERS,
                ..ObjectOptions::default()
            },
        );
        parser.collect(Token::StaticMembersEnd);
    }
}
