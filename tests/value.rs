use nanojson::{from_str, json, Map, Value};

#[test]
fn default_is_null() {
    assert_eq!(Value::default(), Value::Null);
}

#[test]
fn conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(1.5), Value::Number(1.5));
    assert_eq!(Value::from(7u8), Value::Number(7.0));
    assert_eq!(Value::from(-3i64), Value::Number(-3.0));
    assert_eq!(Value::from("abc"), Value::String(String::from("abc")));
    assert_eq!(Value::from(String::from("abc")), Value::String(String::from("abc")));
    assert_eq!(Value::from(()), Value::Null);
    assert_eq!(
        Value::from(vec![1, 2, 3]),
        json!([1, 2, 3])
    );

    let map: Map = vec![(String::from("k"), Value::Null)].into();
    assert_eq!(Value::from(map), json!({"k": null}));

    let collected: Value = ["a", "b"].iter().copied().collect();
    assert_eq!(collected, json!(["a", "b"]));
    let collected: Map = vec![(String::from("k"), Value::from(1))]
        .into_iter()
        .collect();
    assert_eq!(Value::from(collected), json!({"k": 1}));
}

#[test]
fn type_predicates_and_accessors() {
    let value = json!({"s": "text", "n": 0.5, "b": true, "z": null, "a": [1]});

    assert!(value.is_object());
    assert!(value["z"].is_null());
    assert!(value["b"].is_boolean());
    assert!(value["n"].is_number());
    assert!(value["s"].is_string());
    assert!(value["a"].is_array());

    assert_eq!(value["b"].as_bool(), Some(true));
    assert_eq!(value["n"].as_f64(), Some(0.5));
    assert_eq!(value["s"].as_str(), Some("text"));
    assert_eq!(value["a"].as_array().map(Vec::len), Some(1));
    assert_eq!(value.as_object().map(Map::len), Some(5));

    // Mismatched accessors come back empty.
    assert_eq!(value["s"].as_bool(), None);
    assert_eq!(value["n"].as_str(), None);
    assert_eq!(value["b"].as_array(), None);
}

#[test]
fn indexing() {
    let value = json!({"list": ["a", "b"], "map": {"k": 1}});

    assert_eq!(value["list"][0], "a");
    assert_eq!(value["list"][1], "b");
    assert_eq!(value["map"]["k"], 1);

    // Out-of-range and wrong-type indexing are soft: they yield null.
    assert_eq!(value["list"][9], Value::Null);
    assert_eq!(value["missing"], Value::Null);
    assert_eq!(value["map"][0], Value::Null);

    // get() makes the miss observable.
    assert_eq!(value.get("missing"), None);
    assert!(value.get("list").is_some());
    assert_eq!(value["list"].get(9), None);
}

#[test]
fn index_assignment() {
    let mut value = json!({"a": [1, 2]});

    value["a"][0] = json!(true);
    assert_eq!(value, json!({"a": [true, 2]}));

    // Assigning to a fresh key inserts it.
    value["b"] = json!("new");
    assert_eq!(value["b"], "new");

    // Assigning through a null makes an object on the way.
    let mut root = Value::Null;
    root["x"] = json!(1);
    assert_eq!(root, json!({"x": 1}));
}

#[test]
#[should_panic(expected = "cannot access index 5 of JSON array of length 2")]
fn array_assignment_out_of_bounds_panics() {
    let mut value = json!([1, 2]);
    value[5] = json!(3);
}

#[test]
fn take_leaves_null_behind() {
    let mut value = json!({"src": {"inner": [1, 2]}, "dst": null});

    let moved = value["src"]["inner"].take();
    assert_eq!(moved, json!([1, 2]));
    assert_eq!(value["src"]["inner"], Value::Null);

    value["dst"] = moved;
    assert_eq!(value, json!({"src": {"inner": null}, "dst": [1, 2]}));
}

#[test]
fn swap_values() {
    let mut a = json!([1, 2]);
    let mut b = json!("text");
    std::mem::swap(&mut a, &mut b);
    assert_eq!(a, json!("text"));
    assert_eq!(b, json!([1, 2]));
}

#[test]
fn deep_clone_is_independent() {
    let original = json!({"a": [1, {"b": "c"}]});
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy["a"][1]["b"] = json!("changed");
    assert_eq!(original["a"][1]["b"], "c");
    assert_ne!(copy, original);
}

#[test]
fn clone_of_duplicate_key_object_compares_equal() {
    let value = from_str(r#"{"k":1,"k":2}"#).unwrap();
    let copy = value.clone();
    assert_eq!(copy, value);
}

#[test]
fn equality() {
    assert_eq!(json!(null), json!(null));
    assert_ne!(json!(null), json!(false));
    assert_ne!(json!(0), json!(false));
    assert_ne!(json!(""), json!(null));

    // Object comparison ignores member order.
    assert_eq!(json!({"a": 1, "b": 2}), json!({"b": 2, "a": 1}));
    assert_ne!(json!({"a": 1}), json!({"a": 1, "b": 2}));

    // Array comparison does not.
    assert_ne!(json!([1, 2]), json!([2, 1]));

    // IEEE comparison for numbers: NaN is not equal to itself.
    assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
}

#[test]
fn object_mutation_through_value() {
    let mut value = json!({"a": 1, "b": 2, "c": 3});
    let object = value.as_object_mut().unwrap();

    assert_eq!(object.insert(String::from("a"), json!(10)), Some(json!(1)));
    assert_eq!(object.swap_remove("b"), Some(json!(2)));
    assert_eq!(object.swap_remove("nope"), None);
    assert_eq!(object.len(), 2);

    *object.entry("d").or_insert(Value::Null) = json!(4);
    assert_eq!(value, json!({"a": 10, "c": 3, "d": 4}));
}

#[test]
fn array_growth_and_shrink() {
    let mut value = Value::Array(Vec::new());
    let array = value.as_array_mut().unwrap();
    assert_eq!(array.capacity(), 0);

    for i in 0..100 {
        array.push(Value::from(i));
    }
    assert_eq!(array.len(), 100);
    for (i, element) in array.iter().enumerate() {
        assert_eq!(*element, i);
    }

    array.shrink_to_fit();
    assert_eq!(array.capacity(), array.len());
}

#[test]
fn object_capacity_management() {
    let mut map = Map::with_capacity(8);
    assert!(map.capacity() >= 8);
    map.insert(String::from("k"), Value::Null);
    map.reserve(100);
    assert!(map.capacity() >= 101);
    map.shrink_to_fit();
    assert_eq!(map.capacity(), map.len());
    map.clear();
    assert!(map.is_empty());
}

#[test]
fn array_mutation_through_value() {
    let mut value = json!([1, 2, 3]);
    let array = value.as_array_mut().unwrap();
    array.push(json!("tail"));
    array.remove(0);
    assert_eq!(value, json!([2, 3, "tail"]));
}

#[test]
fn parse_via_from_str_trait() {
    let value: Value = r#"{"k": [1, 2]}"#.parse().unwrap();
    assert_eq!(value, json!({"k": [1, 2]}));

    let err = "nope".parse::<Value>().unwrap_err();
    assert_eq!(err.line(), 1);
}

#[test]
fn json_macro() {
    // Literals.
    assert_eq!(json!(null), Value::Null);
    assert_eq!(json!(true), Value::Bool(true));
    assert_eq!(json!(1.5), Value::Number(1.5));
    assert_eq!(json!("s"), Value::String(String::from("s")));
    assert_eq!(json!([]), Value::Array(Vec::new()));
    assert_eq!(json!({}), Value::Object(Map::new()));

    // Interpolation.
    let code = 200;
    let features = vec!["parse", "stringify"];
    let value = json!({
        "code": code,
        "success": code == 200,
        "payload": {
            features[0]: features[1],
        },
    });
    assert_eq!(value["code"], 200);
    assert_eq!(value["success"], true);
    assert_eq!(value["payload"]["parse"], "stringify");

    // Trailing commas in arrays too.
    assert_eq!(json!([1, 2,]), json!([1, 2]));

    // Equivalence with parsing.
    assert_eq!(
        json!({"a": [null, true, 1.25], "b": "x"}),
        from_str(r#"{"a": [null, true, 1.25], "b": "x"}"#).unwrap()
    );
}
