use dumper::{value, ObjectKind, PropertyKey, Realm, Value};

#[test]
fn test_value_macro_undefined_and_null() {
    let realm = Realm::new();
    assert!(matches!(value!(&realm, undefined), Value::Undefined));
    assert!(matches!(value!(&realm, null), Value::Null));
}

#[test]
fn test_value_macro_booleans() {
    let realm = Realm::new();
    assert!(matches!(value!(&realm, true), Value::Bool(true)));
    assert!(matches!(value!(&realm, false), Value::Bool(false)));
}

#[test]
fn test_value_macro_numbers() {
    let realm = Realm::new();
    assert!(matches!(value!(&realm, 42), Value::Number(n) if n == 42.0));
    assert!(matches!(value!(&realm, 3.5), Value::Number(n) if n == 3.5));
    assert!(matches!(value!(&realm, -123), Value::Number(n) if n == -123.0));
}

#[test]
fn test_value_macro_strings() {
    let realm = Realm::new();
    assert_eq!(value!(&realm, "hello world").as_str(), Some("hello world"));
    assert_eq!(value!(&realm, "").as_str(), Some(""));
}

#[test]
fn test_value_macro_arrays() {
    let realm = Realm::new();
    let empty = value!(&realm, []);
    assert_eq!(empty.as_object().unwrap().size(), Some(0));

    let list = value!(&realm, [1, "two", null, [3]]);
    let list = list.as_object().unwrap();
    match &*list.kind() {
        ObjectKind::Array(elements) => {
            assert_eq!(elements.len(), 4);
            assert!(matches!(elements[0], Some(Value::Number(n)) if n == 1.0));
            assert_eq!(elements[1].as_ref().and_then(Value::as_str), Some("two"));
            assert!(matches!(elements[2], Some(Value::Null)));
            assert!(matches!(&elements[3], Some(Value::Object(_))));
        }
        other => panic!("expected an array, got {other:?}"),
    };
}

#[test]
fn test_value_macro_objects() {
    let realm = Realm::new();
    assert!(value!(&realm, {}).as_object().unwrap().own_keys().is_empty());

    let user = value!(&realm, {
        "name": "Alice",
        "age": 30,
        "tags": ["rust", "serde"],
    });
    let user = user.as_object().unwrap();
    let keys: Vec<String> = user.own_keys().iter().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["name", "age", "tags"]);
    assert_eq!(user.peek(&PropertyKey::from("name")).as_str(), Some("Alice"));
    assert_eq!(user.constructor_name().as_deref(), Some("Object"));
}

#[test]
fn test_value_macro_accepts_existing_objects() {
    let realm = Realm::new();
    let shared = realm.object();
    let first = Value::from(&shared);
    let second = first.clone();
    let list = value!(&realm, [first, second]);

    let tokens = dumper::tokenize(&list);
    assert!(!tokens.contains(&dumper::Token::ObjectCircularRef));
}
