//! Loading a query, inspecting it and dumping it back.
//!
//! Run with: cargo run --example simple

use gqlmark::{dumps, dumps_compact, loads};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let query = r#"
    {
        user(id: 232) {
            id,
            name,
            photos(size: 50).first(10) {
                url,
                width
            }
        },
        company(userId: 232) {
            address
        }
    }"#;

    let doc = loads(query)?;

    for selection in &doc {
        println!("{} (params: {:?})", selection.name, selection.params);
        for field in selection.fields() {
            println!("  field: {}", field);
        }
        if let Some(photos) = selection.selection("photos") {
            for (name, value) in photos.filter_map() {
                println!("  photos filter {}: {:?}", name, value);
            }
        }
    }

    let pretty = dumps(&doc)?;
    println!("\nIndented:\n{}\n", pretty);

    let compact = dumps_compact(&doc)?;
    println!("Compact:\n{}\n", compact);

    assert_eq!(loads(&pretty)?, doc);
    assert_eq!(loads(&compact)?, doc);
    println!("✓ Round-trip successful");

    Ok(())
}
