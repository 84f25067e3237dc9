use gqlmark::{args, dumps_compact, loads, ArgMap, Document, Literal, Selection, Value};

#[test]
fn test_args_macro_null() {
    assert_eq!(args!(()), Value::Literal(Literal::Null));
}

#[test]
fn test_args_macro_booleans() {
    assert_eq!(args!(true), Value::Literal(Literal::Bool(true)));
    assert_eq!(args!(false), Value::Literal(Literal::Bool(false)));
}

#[test]
fn test_args_macro_numbers() {
    assert_eq!(args!(42), Value::Literal(Literal::Int(42)));
    assert_eq!(args!(-123), Value::Literal(Literal::Int(-123)));
    assert_eq!(args!(3.5), Value::Literal(Literal::Float(3.5)));
    assert_eq!(args!(i64::MAX), Value::Literal(Literal::Int(i64::MAX)));
}

#[test]
fn test_args_macro_strings() {
    assert_eq!(args!("hello world"), Value::Literal(Literal::from("hello world")));
    assert_eq!(args!(String::new()), Value::Literal(Literal::from("")));
}

#[test]
fn test_args_macro_empty() {
    let value = args!();
    assert!(value.is_mapping());
    assert_eq!(value.as_mapping(), Some(&ArgMap::new()));
}

#[test]
fn test_args_macro_named_keeps_order() {
    let value = args! {
        "username" => "Hebe",
        "id" => 232,
        "recent" => true,
        "cursor" => (),
    };

    let map = value.as_mapping().unwrap();
    let keys: Vec<_> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["username", "id", "recent", "cursor"]);
    assert_eq!(value.get("cursor"), Some(&Literal::Null));
}

#[test]
fn test_args_macro_with_expressions() {
    let size = 25;
    let name = String::from("Louro Jose");
    let value = args! { "size" => size * 2, "username" => name.as_str() };

    assert_eq!(value.get("size"), Some(&Literal::Int(50)));
    assert_eq!(value.get("username").and_then(Literal::as_str), Some("Louro Jose"));
}

#[test]
fn test_args_macro_matches_parsed_arguments() {
    let doc = loads("{ photos(username: 'Hebe', size: 50).after(id: 232).first(2) { url } }").unwrap();

    let expected = Document::from(vec![Selection::new("photos")
        .with_params(args! { "username" => "Hebe", "size" => 50 })
        .with_filter("after", args! { "id" => 232 })
        .with_filter("first", args!(2))
        .with_field("url")]);

    assert_eq!(doc, expected);
    assert_eq!(
        dumps_compact(&expected).unwrap(),
        "{photos(username:\"Hebe\",size:50).after(id:232).first(2){url}}"
    );
}
