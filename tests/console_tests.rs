use dumper::{
    dump_with_options, value, ConsoleFormatter, ParserOptions, Property, PrototypeInspection,
    Realm, Theme, Token, Value,
};

fn plain(value: &Value) -> String {
    dump_with_options(value, ParserOptions::default(), Theme::plain())
}

fn plain_with(value: &Value, options: ParserOptions) -> String {
    dump_with_options(value, options, Theme::plain())
}

#[test]
fn test_nested_object() {
    let realm = Realm::new();
    let user = value!(&realm, {
        "name": "virk",
        "meta": { "admin": true },
        "deleted": undefined
    });

    assert_eq!(
        plain(&user),
        "{\n  name: 'virk',\n  meta: {\n    admin: true,\n  },\n  deleted: undefined,\n}"
    );
}

#[test]
fn test_circular_reference() {
    let realm = Realm::new();
    let user = realm.object();
    user.insert("self", &user);

    assert_eq!(plain(&Value::from(&user)), "{\n  self: [*Circular],\n}");
}

#[test]
fn test_max_depth() {
    let realm = Realm::new();
    let outer = realm.object();
    outer.insert("a", realm.object());
    outer.insert("b", realm.array([1]));

    let output = plain_with(&Value::from(&outer), ParserOptions::new().with_depth(1));
    assert_eq!(output, "{\n  a: [Object],\n  b: [Array],\n}");
}

#[test]
fn test_sparse_array_and_max_length() {
    let realm = Realm::new();
    let list = realm.array(["x"]);
    list.set_index(3, "y");
    assert_eq!(
        plain(&Value::from(&list)),
        "[\n  'x',\n  <hole>,\n  <hole>,\n  'y',\n]"
    );

    let list = realm.array([1, 2, 3]);
    let output = plain_with(
        &Value::from(&list),
        ParserOptions::new().with_max_array_length(1),
    );
    assert_eq!(output, "[\n  1,\n  [...2 more items]\n]");
}

#[test]
fn test_map_and_set() {
    let realm = Realm::new();
    let map = realm.map([("a", 1)]);
    assert_eq!(
        plain(&Value::from(&map)),
        "Map(1) {\n  [\n    key: 'a',\n    value: 1,\n  ],\n}"
    );

    let set = realm.set(["a"]);
    assert_eq!(plain(&Value::from(&set)), "Set(1) [\n  'a',\n]");
}

#[test]
fn test_error_stack_is_reindented() {
    let realm = Realm::new();
    let error = realm.error("boom");

    assert_eq!(
        plain(&Value::from(&error)),
        "Error {\n  stack: 'Error: boom\n  at <anonymous>',\n  message: 'boom',\n}"
    );
}

#[test]
fn test_class_static_members() {
    let realm = Realm::new();
    let class = realm.class("User", None);
    class.insert("count", 1);

    let output = plain_with(
        &Value::from(&class),
        ParserOptions::new().with_static_members(true),
    );
    assert_eq!(output, "[class User] {\n  static count: 1,\n}");

    assert_eq!(plain(&Value::from(&class)), "[class User]");
}

#[test]
fn test_prototype_block() {
    let realm = Realm::new();
    let class = realm.class("User", None);
    let prototype = class
        .peek(&"prototype".into())
        .as_object()
        .cloned()
        .unwrap();
    prototype.define_property("fullName", Property::getter(|_| Value::from("computed")));
    let user = realm.instance(&class);
    user.insert("id", 1);

    let output = plain_with(
        &Value::from(&user),
        ParserOptions::new().with_object_prototype(PrototypeInspection::UnlessPlainObject),
    );
    assert_eq!(
        output,
        "User {\n  id: 1,\n  [[Prototype]] {\n    fullName: [Getter],\n  }\n}"
    );
}

#[test]
fn test_typed_array_label() {
    let realm = Realm::new();
    let bytes = realm.typed_array(dumper::TypedArray::Uint8(vec![7]));

    assert_eq!(plain(&Value::from(&bytes)), "Uint8Array [\n  7,\n]");
}

#[test]
fn test_collapsed_instances() {
    let realm = Realm::new();
    let class = realm.class("DateTime", None);
    let holder = realm.object();
    holder.insert("at", realm.instance(&class));

    let output = plain_with(
        &Value::from(&holder),
        ParserOptions::new().with_collapse(["DateTime"]),
    );
    assert_eq!(output, "{\n  at: DateTime { collapsed },\n}");
}

#[test]
fn test_long_strings_wrap() {
    let realm = Realm::new();
    let text = "lorem ipsum ".repeat(10);
    let holder = realm.object();
    holder.insert("text", text.trim_end());

    let output = plain(&Value::from(&holder));
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines.len() > 3);
    assert!(lines[2].starts_with("  "));
}

#[test]
fn test_colored_output() {
    let formatter = ConsoleFormatter::new(Theme::default());
    let output = formatter.format(&[Token::Number { value: 1.0 }]);
    assert!(output.contains("\u{1b}["));
    assert!(output.contains('1'));

    let plain = ConsoleFormatter::new(Theme::plain());
    assert_eq!(plain.format(&[Token::Number { value: 1.0 }]), "1");
}

#[test]
fn test_scalar_labels() {
    let realm = Realm::new();
    let cases = vec![
        (Value::Null, "null"),
        (Value::Number(-0.0), "0"),
        (Value::Number(f64::NAN), "NaN"),
        (Value::from(realm.weak_set()), "[WeakSet]"),
        (Value::from(realm.generator(true)), "[AsyncGenerator] {}"),
        (Value::from(realm.async_function("load")), "[async function load]"),
        (Value::from(realm.regexp("a+", "g")), "/a+/g"),
    ];

    for (value, expected) in cases {
        assert_eq!(plain(&value), expected);
    }
}
