//! Printing the shape of values instead of their content.
//!
//! Run with: cargo run --example dump

use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use var_type::{
    describe, dump, to_type_string_with_options, value, DescribeOptions, RecordStyle, Value,
};

#[derive(Debug, Serialize)]
struct User {
    name: String,
    age: u32,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let user = User {
        name: "Jane".to_string(),
        age: 28,
        roles: vec!["admin".to_string(), "editor".to_string()],
    };

    print!("User:        ");
    dump(&user)?;
    println!();

    let mut scores = BTreeMap::new();
    scores.insert("jane", vec![9.5, 7.0]);
    scores.insert("joe", vec![]);
    print!("Scores:      ");
    dump(&scores)?;
    println!();

    // Build values by hand with value!
    let mixed = value!({0: 1, 1: "str", "key": true});
    println!("Mixed keys:  {}", describe(&mixed));

    // Describe a JSON document
    let json: Value = serde_json::from_str(r#"{"items": [{"id": 1}, {"id": 2.5}], "next": null}"#)?;
    println!("JSON:        {}", describe(&json));

    // Bare record names
    let options = DescribeOptions::new().with_record_style(RecordStyle::NameOnly);
    println!(
        "Name only:   {}",
        to_type_string_with_options(&vec![user], options)?
    );

    Ok(())
}
