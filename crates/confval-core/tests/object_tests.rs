/// Object and array helper tests.
///
/// Auto-vivifying `value["key"]`, bounds-checked `at`, `find`/`contains` on
/// objects and non-objects, insertion order, duplicate keys through the raw
/// container, and the array helpers (`ensure_array`, `push`, `at_index`).
use confval_core::{Global, Kind, LookupError, Value, ValueString};

// ============================================================================
// Auto-vivification
// ============================================================================

#[test]
fn index_on_integer_converts_to_object() {
    let mut v = Value::new();
    v.assign(42);
    v["k"].assign(1);

    assert!(v.is_object());
    assert_eq!(v.as_object().len(), 1);
    assert_eq!(v["k"].get::<i32>().unwrap(), 1);
}

#[test]
fn index_on_array_discards_elements() {
    let mut v = Value::new();
    v.push("a");
    v.push("b");
    v["k"].assign(true);

    assert!(v.is_object());
    assert_eq!(v.as_object().len(), 1);
}

#[test]
fn missing_key_is_inserted_as_null() {
    let mut v = Value::new();
    v.set_object();

    let inserted = &mut v["missing"];
    assert!(inserted.is_null());
    assert!(v.contains("missing"));
    assert_eq!(v.as_object().len(), 1);
}

#[test]
fn existing_key_is_reused_not_duplicated() {
    let mut v = Value::new();
    v["port"].assign(80);
    v["port"].assign(8080);

    assert_eq!(v.as_object().len(), 1);
    assert_eq!(v["port"].get::<u16>().unwrap(), 8080);
}

#[test]
fn nested_chains_build_tree() {
    let mut root = Value::new();
    root["a"]["b"]["c"].assign(42);

    assert!(root["a"].is_object());
    assert!(root["a"]["b"].is_object());
    assert_eq!(root["a"]["b"]["c"].get::<i64>().unwrap(), 42);
}

#[test]
fn entry_matches_index_mut() {
    let mut v = Value::new();
    v.entry("x").assign(1);
    v["x"].assign(2);
    assert_eq!(*v.entry("x").as_integer(), 2);
}

#[test]
fn ensure_object_keeps_existing_object() {
    let mut v = Value::new();
    v["keep"].assign(1);
    let object = v.ensure_object();
    assert_eq!(object.len(), 1);
}

#[test]
fn ensure_object_replaces_string() {
    let mut v = Value::new();
    v.assign("text");
    assert!(v.ensure_object().is_empty());
    assert!(v.is_object());
}

// ============================================================================
// Insertion order and duplicates
// ============================================================================

#[test]
fn insertion_order_is_preserved() {
    let mut v = Value::new();
    v["zeta"].assign(1);
    v["alpha"].assign(2);
    v["mid"].assign(3);

    let keys: Vec<&str> = v.as_object().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}

#[test]
fn raw_container_allows_duplicate_keys() {
    let mut v = Value::new();
    v["dup"].assign(1);

    let mut second = Value::new();
    second.assign(2);
    v.as_object_mut()
        .push((ValueString::from_str_in("dup", Global), second));

    assert_eq!(v.as_object().len(), 2);
    // Lookups see the first pair.
    assert_eq!(v["dup"].get::<i32>().unwrap(), 1);
    assert_eq!(v.at("dup").unwrap().get::<i32>().unwrap(), 1);
}

// ============================================================================
// at
// ============================================================================

#[test]
fn at_returns_existing_value() {
    let mut v = Value::new();
    v["answer"].assign(42);

    let answer = v.at("answer").unwrap();
    assert_eq!(answer.get::<i32>().unwrap(), 42);
}

#[test]
fn at_missing_key_fails_without_inserting() {
    let mut v = Value::new();
    v["present"].assign(1);

    let err = v.at("missing").unwrap_err();
    assert_eq!(
        err,
        LookupError::KeyNotFound {
            key: "missing".to_string()
        }
    );
    assert!(!v.contains("missing"));
    assert_eq!(v.as_object().len(), 1);
}

#[test]
fn at_on_non_object_fails() {
    let mut v = Value::new();
    v.assign(3);

    let err = v.at("k").unwrap_err();
    assert_eq!(err, LookupError::NotAnObject { found: Kind::Integer });
    assert!(v.is_integer(), "at never vivifies");
}

#[test]
fn at_mut_allows_in_place_update() {
    let mut v = Value::new();
    v["count"].assign(1);

    v.at_mut("count").unwrap().assign(2);
    assert_eq!(v["count"].get::<i32>().unwrap(), 2);

    assert!(matches!(
        v.at_mut("nope"),
        Err(LookupError::KeyNotFound { .. })
    ));
}

#[test]
fn lookup_error_messages() {
    let err = LookupError::KeyNotFound {
        key: "port".to_string(),
    };
    assert_eq!(err.to_string(), "key not found: \"port\"");

    let err = LookupError::NotAnObject { found: Kind::Array };
    assert_eq!(err.to_string(), "expected an object, found array");
}

#[test]
#[should_panic(expected = "key not found")]
fn shared_index_on_missing_key_panics() {
    let mut v = Value::new();
    v.set_object();
    let shared = &v;
    let _ = &shared["missing"];
}

// ============================================================================
// find / contains
// ============================================================================

#[test]
fn find_returns_matching_pair() {
    let mut v = Value::new();
    v["host"].assign("localhost");

    let (key, value) = v.find("host").unwrap();
    assert_eq!(key, "host");
    assert_eq!(value.as_string(), "localhost");
    assert!(v.find("port").is_none());
}

#[test]
fn find_mut_edits_value() {
    let mut v = Value::new();
    v["host"].assign("localhost");

    let (_, value) = v.find_mut("host").unwrap();
    value.as_string_mut().push_str(":8080");
    assert_eq!(v["host"].as_string(), "localhost:8080");
}

#[test]
fn find_and_contains_on_non_object_are_not_found() {
    let mut v = Value::new();
    assert!(v.find("k").is_none());
    assert!(!v.contains("k"));

    v.assign("string");
    assert!(v.find("k").is_none());
    assert!(!v.contains("k"));
    assert!(v.find_mut("k").is_none());
    assert!(v.is_string(), "lookups never change the kind");
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn push_builds_array_in_order() {
    let mut v = Value::new();
    v.push(1);
    v.push("two");
    v.push(3.0);

    let array = v.as_array();
    assert_eq!(array.len(), 3);
    assert!(array[0].is_integer());
    assert!(array[1].is_string());
    assert!(array[2].is_floating());
}

#[test]
fn push_returns_new_element() {
    let mut v = Value::new();
    let first = v.push(None::<i32>);
    assert!(first.is_null());
    v.push(0)["nested"].assign("x");

    assert_eq!(v.as_array().len(), 2);
    assert_eq!(v.at_index(1).unwrap()["nested"].as_string(), "x");
}

#[test]
fn ensure_array_replaces_object() {
    let mut v = Value::new();
    v["k"].assign(1);
    assert!(v.ensure_array().is_empty());
    assert!(v.is_array());
}

#[test]
fn at_index_bounds() {
    let mut v = Value::new();
    v.push(10);

    assert_eq!(v.at_index(0).unwrap().get::<i32>().unwrap(), 10);
    assert_eq!(
        v.at_index(1).unwrap_err(),
        LookupError::IndexOutOfBounds { index: 1, len: 1 }
    );

    let mut scalar = Value::new();
    scalar.assign(true);
    assert_eq!(
        scalar.at_index(0).unwrap_err(),
        LookupError::NotAnArray { found: Kind::Boolean }
    );
}

#[test]
fn at_index_mut_updates_element() {
    let mut v = Value::new();
    v.push(1);
    v.at_index_mut(0).unwrap().assign("replaced");
    assert_eq!(v.as_array()[0].as_string(), "replaced");
}
