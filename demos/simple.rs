//! Tokenizing and dumping a cyclic value graph.
//!
//! Run with: cargo run --example simple

use dumper::{tokenize, Realm, Token, Value};

fn main() {
    let realm = Realm::new();

    let user = realm.object();
    user.insert("id", 42);
    user.insert("name", "Alice Johnson");
    user.insert("roles", realm.array(["admin", "editor"]));

    // The user points back at itself
    user.insert("self", &user);

    let value = Value::from(&user);

    // Raw token stream
    let tokens = tokenize(&value);
    println!("{} tokens", tokens.len());
    for token in &tokens {
        println!("  {}", token.kind());
    }
    assert!(tokens.contains(&Token::ObjectCircularRef));

    // Console output (colors follow NO_COLOR)
    println!("\n{}", dumper::dump(&value));
}
