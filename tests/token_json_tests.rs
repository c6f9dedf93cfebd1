use dumper::{tokenize, Realm, Token, Value};
use serde_json::json;

#[test]
fn test_object_tokens_shape() {
    let tokens = vec![
        Token::ObjectStart {
            constructor_name: None,
        },
        Token::ObjectKey {
            value: "id".to_string(),
            is_symbol: false,
            is_writable: true,
            is_own_key: true,
        },
        Token::ObjectValueGetter,
        Token::ObjectEnd,
    ];

    assert_eq!(
        serde_json::to_value(&tokens).unwrap(),
        json!([
            { "type": "object-start", "constructorName": null },
            {
                "type": "object-key",
                "value": "id",
                "isSymbol": false,
                "isWritable": true,
                "isOwnKey": true
            },
            { "type": "object-value-getter" },
            { "type": "object-end" }
        ])
    );
}

#[test]
fn test_collapse_nests_its_start_token() {
    let token = Token::Collapse {
        name: "Array".to_string(),
        token: Box::new(Token::ArrayStart {
            name: "Array".to_string(),
            size: 3,
        }),
    };

    assert_eq!(
        serde_json::to_value(&token).unwrap(),
        json!({
            "type": "collapse",
            "name": "Array",
            "token": { "type": "array-start", "name": "Array", "size": 3 }
        })
    );
}

#[test]
fn test_scalar_tokens_shape() {
    let cases = vec![
        (
            Token::BigInt {
                value: "1n".to_string(),
            },
            json!({ "type": "bigInt", "value": "1n" }),
        ),
        (
            Token::Unknown {
                js_type: "Proxy".to_string(),
                value: "[object Proxy]".to_string(),
            },
            json!({ "type": "unknown", "jsType": "Proxy", "value": "[object Proxy]" }),
        ),
        (
            Token::Function {
                name: "run".to_string(),
                is_class: false,
                is_async: true,
                is_generator: false,
            },
            json!({
                "type": "function",
                "name": "run",
                "isClass": false,
                "isAsync": true,
                "isGenerator": false
            }),
        ),
        (
            Token::Blob {
                size: 4,
                content_type: "text/plain".to_string(),
            },
            json!({ "type": "blob", "size": 4, "contentType": "text/plain" }),
        ),
        (
            Token::Promise { is_fulfilled: true },
            json!({ "type": "promise", "isFulfilled": true }),
        ),
        (
            Token::SetMaxLengthRef { limit: 2, size: 5 },
            json!({ "type": "set-max-length-ref", "limit": 2, "size": 5 }),
        ),
        (
            Token::Generator { is_async: true },
            json!({ "type": "generator", "isAsync": true }),
        ),
        (Token::WeakRef, json!({ "type": "weak-ref" })),
        (
            Token::StaticMembersStart,
            json!({ "type": "static-members-start" }),
        ),
    ];

    for (token, expected) in cases {
        assert_eq!(serde_json::to_value(&token).unwrap(), expected);
    }
}

#[test]
fn test_stream_from_parser() {
    let realm = Realm::new();
    let list = realm.array(Vec::<Value>::new());
    list.push(&list);

    let json = serde_json::to_string(&tokenize(&Value::from(&list))).unwrap();
    assert_eq!(
        json,
        concat!(
            r#"[{"type":"array-start","name":"Array","size":1},"#,
            r#"{"type":"array-value-start","index":0},"#,
            r#"{"type":"array-circular-ref"},"#,
            r#"{"type":"array-value-end","index":0},"#,
            r#"{"type":"array-end","size":1}]"#
        )
    );
}
