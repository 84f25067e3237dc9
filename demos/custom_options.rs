//! Indentation, compact output, parser tracing and error reporting.
//!
//! Run with: RUST_LOG=trace cargo run --example custom_options

use gqlmark::{
    args, dumps_with_options, loads, loads_with_options, Document, DumpOptions, LoadOptions,
    Selection,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let doc = Document::from(vec![Selection::new("friends")
        .with_params(args! { "recent" => true })
        .with_filter("after", 2434423)
        .with_filter("first", 10)
        .with_field("id")
        .with_selection(Selection::new("photo").with_params(50).with_field("url"))]);

    println!("Default (2 spaces):");
    println!("{}\n", dumps_with_options(&doc, &DumpOptions::new())?);

    println!("4 spaces:");
    println!("{}\n", dumps_with_options(&doc, &DumpOptions::new().with_indent(4))?);

    println!("Compact:");
    let compact = dumps_with_options(&doc, &DumpOptions::compact())?;
    println!("{}\n", compact);

    // Rule-by-rule trace goes to the log at trace level.
    let options = LoadOptions::new().with_debug(true).with_max_depth(8);
    let parsed = loads_with_options(&compact, &options)?;
    assert_eq!(parsed, doc);

    println!("Syntax error report:");
    if let Err(err) = loads("{\n  user {id name}\n}") {
        println!("{}", err);
    }

    Ok(())
}
