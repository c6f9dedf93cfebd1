//! Bounding the output with ParserOptions.
//!
//! Run with: cargo run --example custom_options

use dumper::{dump_with_options, value, ParserOptions, PrototypeInspection, Realm, Theme, Value};

fn main() {
    let realm = Realm::new();
    let data = value!(&realm, {
        "name": "MyApp",
        "description": "A fairly long description that will not fit the string limit",
        "releases": [1, 2, 3, 4, 5, 6, 7, 8],
        "config": { "database": { "pool": { "min": 2, "max": 10 } } }
    });

    println!("Defaults:");
    println!("{}\n", dump_with_options(&data, ParserOptions::default(), Theme::plain()));

    // Shallow and short
    println!("depth 2, 3 items, 20 characters:");
    let options = ParserOptions::new()
        .with_depth(2)
        .with_max_array_length(3)
        .with_max_string_length(20);
    println!("{}\n", dump_with_options(&data, options, Theme::plain()));

    // Collapse a class by name and show prototype members
    let class = realm.class("Connection", None);
    let holder = realm.object();
    holder.insert("primary", realm.instance(&class));
    holder.insert("replica", realm.instance(&class));

    println!("Collapsed instances:");
    let options = ParserOptions::new()
        .with_collapse(["Connection"])
        .with_object_prototype(PrototypeInspection::UnlessPlainObject);
    println!("{}", dump_with_options(&Value::from(&holder), options, Theme::default()));
}
