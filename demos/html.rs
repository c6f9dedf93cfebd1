//! Rendering serde data as HTML.
//!
//! Run with: cargo run --example html

use dumper::{dump_html_with_options, to_value, HtmlStyles, ParserOptions, Realm};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Product {
    sku: String,
    price: f64,
    tags: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let realm = Realm::new();
    let product = Product {
        sku: "WIDGET-<001>".to_string(),
        price: 29.99,
        tags: vec!["sale".to_string(), "new & shiny".to_string()],
    };

    let value = to_value(&realm, &product)?;

    // Night Owl styles
    println!("{}\n", dumper::dump_html(&value));

    // Bare markup, for pages that bring their own stylesheet
    let html = dump_html_with_options(&value, ParserOptions::default(), HtmlStyles::unstyled());
    println!("{html}");

    Ok(())
}
