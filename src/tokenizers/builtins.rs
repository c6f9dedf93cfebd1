//! Builtins that are re-expressed as plain objects before tokenizing.

use super::object::{self, ObjectOptions};
use crate::object::{Intrinsic, Object, ObjectKind};
use crate::parser::Parser;

const ERROR_EAGER_GETTERS: &[&str] = &["message", "stack"];

/// Errors always show hidden members and read `message` and `stack` even
/// when they are accessors.
pub(crate) fn tokenize_error(parser: &mut Parser, error: &Object) {
    object::tokenize(
        parser,
        error,
        &ObjectOptions {
            show_hidden: Some(true),
            eager_getters: ERROR_EAGER_GETTERS,
            ..ObjectOptions::default()
        },
    );
}

pub(crate) fn tokenize_url(parser: &mut Parser, object: &Object) {
    let (url, search_params) = match &*object.kind() {
        ObjectKind::Url { url, search_params } => (url.clone(), search_params.clone()),
        _ => return,
    };

    let hash = match url.fragment() {
        Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
        _ => String::new(),
    };
    let search = match url.query() {
        Some(query) if !query.is_empty() => format!("?{query}"),
        _ => String::new(),
    };
    let hostname = url.host_str().unwrap_or_default().to_string();
    let port = url.port().map(|port| port.to_string()).unwrap_or_default();
    let host = if port.is_empty() {
        hostname.clone()
    } else {
        format!("{hostname}:{port}")
    };

    let projection = projection(object);
    projection.insert("hash", hash);
    projection.insert("host", host);
    projection.insert("hostname", hostname);
    projection.insert("href", url.as_str());
    projection.insert("origin", url.origin().ascii_serialization());
    projection.insert("password", url.password().unwrap_or_default());
    projection.insert("pathname", url.path());
    projection.insert("port", port);
    projection.insert("protocol", format!("{}:", url.scheme()));
    projection.insert("search", search);
    projection.insert("searchParams", search_params);
    projection.insert("username", url.username());

    tokenize_as(parser, &projection, "URL");
}

pub(crate) fn tokenize_url_search_params(parser: &mut Parser, object: &Object) {
    let projection = projection(object);
    if let ObjectKind::UrlSearchParams(pairs) = &*object.kind() {
        for (key, value) in pairs {
            projection.insert(key.as_str(), value.as_str());
        }
    }
    tokenize_as(parser, &projection, "URLSearchParams");
}

pub(crate) fn tokenize_form_data(parser: &mut Parser, object: &Object) {
    let projection = projection(object);
    if let ObjectKind::FormData(entries) = &*object.kind() {
        for (key, value) in entries {
            projection.insert(key.as_str(), value.clone());
        }
    }
    tokenize_as(parser, &projection, "FormData");
}

/// A fresh plain object in the same realm as `object`. Entries inserted with
/// an existing key keep the first position and take the last value.
fn projection(object: &Object) -> Object {
    let object_prototype = object.find_intrinsic(Intrinsic::ObjectPrototype);
    Object::new(ObjectKind::Ordinary, object_prototype.as_ref())
}

fn tokenize_as(parser: &mut Parser, projection: &Object, constructor_name: &str) {
    object::tokenize(
        parser,
        projection,
        &ObjectOptions {
            constructor_name: Some(constructor_name),
            ..ObjectOptions::default()
        },
    );
}

