//! The token vocabulary shared by the parser and every renderer.
//!
//! A [`Token`] is one fragment of a value's structure. Composite values are
//! bracketed by `*-start`/`*-end` pairs; sentinels replace a whole bracket
//! when traversal stops early.
//!
//! Tokens serialize as flat, internally tagged records so a stream can be
//! handed to renderers written in other languages:
//!
//! ```rust
//! use dumper::Token;
//!
//! let token = Token::ArrayStart { name: "Array".to_string(), size: 2 };
//! let json = serde_json::to_string(&token).unwrap();
//! assert_eq!(json, r#"{"type":"array-start","name":"Array","size":2}"#);
//! ```

use serde::Serialize;

/// One emitted record of the token stream.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Token {
    /// A composite that was not expanded because its constructor is collapsed.
    /// `token` is the start token that would have been emitted.
    Collapse { name: String, token: Box<Token> },

    ObjectStart { constructor_name: Option<String> },
    ObjectEnd,
    ObjectKey {
        value: String,
        is_symbol: bool,
        is_writable: bool,
        is_own_key: bool,
    },
    ObjectValueStart,
    ObjectValueEnd,
    /// Stands in for the value of an accessor that was not invoked.
    ObjectValueGetter,
    ObjectCircularRef,
    ObjectMaxDepthRef,

    ArrayStart { name: String, size: usize },
    ArrayEnd { size: usize },
    ArrayValueStart { index: usize },
    ArrayValueEnd { index: usize },
    ArrayValueHole { index: usize },
    ArrayCircularRef,
    ArrayMaxDepthRef,
    ArrayMaxLengthRef { limit: usize, size: usize },

    PrototypeStart,
    PrototypeEnd,

    MapStart { size: usize },
    MapEnd { size: usize },
    MapRowStart { index: usize },
    MapRowEnd { index: usize },
    MapKeyStart { index: usize },
    MapKeyEnd { index: usize },
    MapValueStart { index: usize },
    MapValueEnd { index: usize },
    MapCircularRef,
    MapMaxDepthRef,
    MapMaxLengthRef { limit: usize, size: usize },

    SetStart { size: usize },
    SetEnd { size: usize },
    SetValueStart { index: usize },
    SetValueEnd { index: usize },
    SetCircularRef,
    SetMaxDepthRef,
    SetMaxLengthRef { limit: usize, size: usize },

    StaticMembersStart,
    StaticMembersEnd,

    String { value: String },
    Number { value: f64 },
    Boolean { value: bool },
    #[serde(rename = "bigInt")]
    BigInt { value: String },
    Undefined,
    Null,
    Symbol { value: String },
    Date { value: String },
    Regexp { value: String },
    Buffer { value: String },
    Function {
        name: String,
        is_class: bool,
        is_async: bool,
        is_generator: bool,
    },
    Unknown { js_type: String, value: String },

    WeakSet,
    WeakMap,
    WeakRef,
    Observable,
    Generator { is_async: bool },
    Promise { is_fulfilled: bool },
    Blob { size: usize, content_type: String },
}

impl Token {
    /// Returns the `type` discriminator of the token.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Token::Collapse { .. } => "collapse",
            Token::ObjectStart { .. } => "object-start",
            Token::ObjectEnd => "object-end",
            Token::ObjectKey { .. } => "object-key",
            Token::ObjectValueStart => "object-value-start",
            Token::ObjectValueEnd => "object-value-end",
            Token::ObjectValueGetter => "object-value-getter",
            Token::ObjectCircularRef => "object-circular-ref",
            Token::ObjectMaxDepthRef => "object-max-depth-ref",
            Token::ArrayStart { .. } => "array-start",
            Token::ArrayEnd { .. } => "array-end",
            Token::ArrayValueStart { .. } => "array-value-start",
            Token::ArrayValueEnd { .. } => "array-value-end",
            Token::ArrayValueHole { .. } => "array-value-hole",
            Token::ArrayCircularRef => "array-circular-ref",
            Token::ArrayMaxDepthRef => "array-max-depth-ref",
            Token::ArrayMaxLengthRef { .. } => "array-max-length-ref",
            Token::PrototypeStart => "prototype-start",
            Token::PrototypeEnd => "prototype-end",
            Token::MapStart { .. } => "map-start",
            Token::MapEnd { .. } => "map-end",
            Token::MapRowStart { .. } => "map-row-start",
            Token::MapRowEnd { .. } => "map-row-end",
            Token::MapKeyStart { .. } => "map-key-start",
            Token::MapKeyEnd { .. } => "map-key-end",
            Token::MapValueStart { .. } => "map-value-start",
            Token::MapValueEnd { .. } => "map-value-end",
            Token::MapCircularRef => "map-circular-ref",
            Token::MapMaxDepthRef => "map-max-depth-ref",
            Token::MapMaxLengthRef { .. } => "map-max-length-ref",
            Token::SetStart { .. } => "set-start",
            Token::SetEnd { .. } => "set-end",
            Token::SetValueStart { .. } => "set-value-start",
            Token::SetValueEnd { .. } => "set-value-end",
            Token::SetCircularRef => "set-circular-ref",
            Token::SetMaxDepthRef => "set-max-depth-ref",
            Token::SetMaxLengthRef { .. } => "set-max-length-ref",
            Token::StaticMembersStart => "static-members-start",
            Token::StaticMembersEnd => "static-members-end",
            Token::String { .. } => "string",
            Token::Number { .. } => "number",
            Token::Boolean { .. } => "boolean",
            Token::BigInt { .. } => "bigInt",
            Token::Undefined => "undefined",
            Token::Null => "null",
            Token::Symbol { .. } => "symbol",
            Token::Date { .. } => "date",
            Token::Regexp { .. } => "regexp",
            Token::Buffer { .. } => "buffer",
            Token::Function { .. } => "function",
            Token::Unknown { .. } => "unknown",
            Token::WeakSet => "weak-set",
            Token::WeakMap => "weak-map",
            Token::WeakRef => "weak-ref",
            Token::Observable => "observable",
            Token::Generator { .. } => "generator",
            Token::Promise { .. } => "promise",
            Token::Blob { .. } => "blob",
        }
    }

    /// Returns `true` for tokens that stop traversal of a subtree.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(
            self,
            Token::Collapse { .. }
                | Token::ObjectCircularRef
                | Token::ObjectMaxDepthRef
                | Token::ArrayCircularRef
                | Token::ArrayMaxDepthRef
                | Token::ArrayMaxLengthRef { .. }
                | Token::MapCircularRef
                | Token::MapMaxDepthRef
                | Token::MapMaxLengthRef { .. }
                | Token::SetCircularRef
                | Token::SetMaxDepthRef
                | Token::SetMaxLengthRef { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_serialized_tag() {
        let tokens = vec![
            Token::ObjectStart {
                constructor_name: None,
            },
            Token::ObjectValueGetter,
            Token::ArrayValueHole { index: 1 },
            Token::MapMaxLengthRef { limit: 1, size: 2 },
            Token::StaticMembersStart,
            Token::BigInt {
                value: "1n".to_string(),
            },
            Token::WeakSet,
            Token::Unknown {
                js_type: "Proxy".to_string(),
                value: String::new(),
            },
        ];

        for token in tokens {
            let json = serde_json::to_value(&token).unwrap();
            assert_eq!(json["type"], token.kind());
        }
    }

    #[test]
    fn test_sentinels() {
        assert!(Token::ArrayCircularRef.is_sentinel());
        assert!(Token::SetMaxLengthRef { limit: 1, size: 3 }.is_sentinel());
        assert!(!Token::ObjectValueGetter.is_sentinel());
        assert!(!Token::PrototypeStart.is_sentinel());
    }
}
