use nanojson::{from_str, json, ErrorCode, Value};

fn assert_parse_error(input: &str, code: ErrorCode) {
    match from_str(input) {
        Ok(value) => panic!("{:?} parsed as {:?}, expected {:?}", input, value, code),
        Err(err) => assert_eq!(err.code(), code, "input: {:?}", input),
    }
}

fn assert_parse_number(input: &str, expected: f64) {
    match from_str(input) {
        Ok(Value::Number(n)) => {
            assert_eq!(n, expected, "input: {:?}", input);
        }
        other => panic!("{:?} parsed as {:?}", input, other),
    }
}

fn assert_parse_string(input: &str, expected: &str) {
    match from_str(input) {
        Ok(Value::String(s)) => assert_eq!(s, expected, "input: {:?}", input),
        other => panic!("{:?} parsed as {:?}", input, other),
    }
}

#[test]
fn parse_null() {
    assert_eq!(from_str("null").unwrap(), Value::Null);
    assert_eq!(from_str(" \t\r\n null \t\r\n ").unwrap(), Value::Null);
}

#[test]
fn parse_booleans() {
    assert_eq!(from_str("true").unwrap(), Value::Bool(true));
    assert_eq!(from_str("false").unwrap(), Value::Bool(false));
}

#[test]
fn parse_numbers() {
    let cases: [(&str, f64); 18] = [
        ("0", 0.0),
        ("-0", 0.0),
        ("-0.0", 0.0),
        ("1", 1.0),
        ("-1", -1.0),
        ("1.5", 1.5),
        ("-1.5", -1.5),
        ("3.1416", 3.1416),
        ("1E10", 1e10),
        ("1e10", 1e10),
        ("1E+10", 1e10),
        ("1E-10", 1e-10),
        ("-1E10", -1e10),
        ("-1e10", -1e10),
        ("-1E+10", -1e10),
        ("-1E-10", -1e-10),
        ("1.234E+10", 1.234e10),
        ("1.234E-10", 1.234e-10),
    ];
    for (input, expected) in cases {
        assert_parse_number(input, expected);
    }

    // Underflows to zero rather than erroring.
    assert_parse_number("1e-10000", 0.0);
}

#[test]
fn parse_number_boundaries() {
    let cases: [(&str, f64); 9] = [
        // Smallest number such that 1.0 + x != 1.0.
        ("1.0000000000000002", 1.000_000_000_000_000_2),
        // Minimum denormal.
        ("4.9406564584124654e-324", 4.9406564584124654e-324),
        ("-4.9406564584124654e-324", -4.9406564584124654e-324),
        // Max subnormal double.
        ("2.2250738585072009e-308", 2.2250738585072009e-308),
        ("-2.2250738585072009e-308", -2.2250738585072009e-308),
        // Min normal positive double.
        ("2.2250738585072014e-308", 2.2250738585072014e-308),
        ("-2.2250738585072014e-308", -2.2250738585072014e-308),
        // Max double.
        ("1.7976931348623157e+308", f64::MAX),
        ("-1.7976931348623157e+308", f64::MIN),
    ];
    for (input, expected) in cases {
        assert_parse_number(input, expected);
    }
}

#[test]
fn parse_negative_zero_keeps_sign() {
    match from_str("-0.0").unwrap() {
        Value::Number(n) => assert!(n == 0.0 && n.is_sign_negative()),
        other => panic!("parsed as {:?}", other),
    }
}

#[test]
fn parse_strings() {
    let cases: [(&str, &str); 7] = [
        (r#""""#, ""),
        (r#""Hello""#, "Hello"),
        (r#""Hello\nWorld""#, "Hello\nWorld"),
        (r#""\" \\ / \b \f \n \r \t""#, "\" \\ / \x08 \x0c \n \r \t"),
        (r#""Hello\u0000World""#, "Hello\0World"),
        (r#""$""#, "\u{24}"),
        (r#""¢""#, "\u{A2}"),
    ];
    for (input, expected) in cases {
        assert_parse_string(input, expected);
    }
}

#[test]
fn parse_unicode_escapes() {
    assert_parse_string(r#""\u0024""#, "\u{24}");
    assert_parse_string(r#""\u00A2""#, "\u{A2}");
    assert_parse_string(r#""\u20AC""#, "\u{20AC}");
    // Surrogate pair for U+1D11E, in both hex digit cases.
    assert_parse_string(r#""\uD834\uDD1E""#, "\u{1D11E}");
    assert_parse_string(r#""\ud834\udd1e""#, "\u{1D11E}");
    // Raw multibyte UTF-8 passes through unchanged.
    assert_parse_string("\"\u{20AC}\u{1D11E}\"", "\u{20AC}\u{1D11E}");
}

#[test]
fn parse_arrays() {
    assert_eq!(from_str("[ ]").unwrap(), Value::Array(Vec::new()));
    assert_eq!(
        from_str(r#"[ null , false , true , 123 , "abc" ]"#).unwrap(),
        json!([null, false, true, 123, "abc"])
    );
    assert_eq!(
        from_str("[ [ ] , [ 0 ] , [ 0 , 1 ] , [ 0 , 1 , 2 ] ]").unwrap(),
        json!([[], [0], [0, 1], [0, 1, 2]])
    );
}

#[test]
fn parse_object() {
    assert_eq!(from_str(" { } ").unwrap(), json!({}));

    let value = from_str(
        r#" {
            "n" : null ,
            "f" : false ,
            "t" : true ,
            "i" : 123 ,
            "s" : "abc",
            "a" : [ 1, 2, 3 ],
            "o" : { "1" : 1, "2" : 2, "3" : 3 }
        } "#,
    )
    .unwrap();
    assert_eq!(
        value,
        json!({
            "n": null,
            "f": false,
            "t": true,
            "i": 123,
            "s": "abc",
            "a": [1, 2, 3],
            "o": {"1": 1, "2": 2, "3": 3}
        })
    );

    // Members come out in source order.
    let object = value.as_object().unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, ["n", "f", "t", "i", "s", "a", "o"]);
}

#[test]
fn parse_object_keeps_duplicate_keys() {
    let value = from_str(r#"{"k": 1, "k": 2}"#).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    // Keyed lookup sees the first occurrence; the second stays reachable by
    // index.
    assert_eq!(object.get("k"), Some(&Value::Number(1.0)));
    assert_eq!(object.get_index(1), Some((&String::from("k"), &Value::Number(2.0))));
}

#[test]
fn error_expected_value() {
    for input in ["", " ", " \t\r\n "] {
        assert_parse_error(input, ErrorCode::ExpectedSomeValue);
    }
}

#[test]
fn error_invalid_value() {
    let cases = [
        // Broken literals.
        "nul", "truf", "fals", // Not numbers.
        "+0", "+1", ".123", "1.", "INF", "inf", "NAN", "nan", "-",
        // Bytes that cannot start a value.
        "?", "]", // A comma with no element behind it.
        "[1,]", r#"["a", nul]"#,
    ];
    for input in cases {
        assert_parse_error(input, ErrorCode::InvalidValue);
    }
}

#[test]
fn error_trailing_characters() {
    for input in ["null x", "null false", "0123", "0x0", "0x123", "1e3 4"] {
        assert_parse_error(input, ErrorCode::TrailingCharacters);
    }
}

#[test]
fn error_number_out_of_range() {
    for input in ["1e309", "-1e309", "1.8e308"] {
        assert_parse_error(input, ErrorCode::NumberOutOfRange);
    }
}

#[test]
fn error_unterminated_string() {
    for input in [r#"""#, r#""abc"#, r#""abc\"#, r#""abc\""#] {
        assert_parse_error(input, ErrorCode::EofWhileParsingString);
    }
}

#[test]
fn error_invalid_escape() {
    for input in [r#""\v""#, r#""\'""#, r#""\0""#, r#""\x12""#] {
        assert_parse_error(input, ErrorCode::InvalidEscape);
    }
}

#[test]
fn error_control_character_in_string() {
    for input in ["\"\x01\"", "\"\x1F\"", "\"ab\ncd\""] {
        assert_parse_error(input, ErrorCode::ControlCharacterWhileParsingString);
    }
}

#[test]
fn error_invalid_unicode_hex() {
    let cases = [
        r#""\u""#,
        r#""\u0""#,
        r#""\u01""#,
        r#""\u012""#,
        r#""\u/000""#,
        r#""\uG000""#,
        r#""\u0/00""#,
        r#""\u0G00""#,
        r#""\u00/0""#,
        r#""\u00G0""#,
        r#""\u000/""#,
        r#""\u000G""#,
        r#""\u 123""#,
    ];
    for input in cases {
        assert_parse_error(input, ErrorCode::InvalidUnicodeHexEscape);
    }
}

#[test]
fn error_invalid_unicode_surrogate() {
    let cases = [
        // Lone high surrogates.
        r#""\uD800""#,
        r#""\uDBFF""#,
        r#""\uD800\\""#,
        // High surrogate paired with something that is not a low surrogate.
        r#""\uD800\uDBFF""#,
        r#""\uD800""#,
        // A low surrogate cannot come first.
        r#""\uDC00""#,
        r#""\uDFFF""#,
    ];
    for input in cases {
        assert_parse_error(input, ErrorCode::InvalidUnicodeSurrogate);
    }
}

#[test]
fn error_array_missing_comma_or_bracket() {
    for input in ["[1", "[1}", "[1 2", "[[]"] {
        assert_parse_error(input, ErrorCode::ExpectedListCommaOrEnd);
    }
}

#[test]
fn error_object_missing_key() {
    let cases = [
        "{:1,", "{1:1,", "{true:1,", "{false:1,", "{null:1,", "{[]:1,", "{{}:1,", "{\"a\":1,",
    ];
    for input in cases {
        assert_parse_error(input, ErrorCode::ExpectedObjectKey);
    }
}

#[test]
fn error_object_missing_colon() {
    for input in [r#"{"a"}"#, r#"{"a","b"}"#] {
        assert_parse_error(input, ErrorCode::ExpectedColon);
    }
}

#[test]
fn error_object_missing_comma_or_brace() {
    for input in [r#"{"a":1"#, r#"{"a":1]"#, r#"{"a":1 "b""#, r#"{"a":{}"#] {
        assert_parse_error(input, ErrorCode::ExpectedObjectCommaOrEnd);
    }
}

#[test]
fn recursion_limit() {
    // 127 levels parse; one more trips the limit.
    let deep_ok = "[".repeat(127) + &"]".repeat(127);
    assert!(from_str(&deep_ok).is_ok());

    let too_deep = "[".repeat(128);
    assert_parse_error(&too_deep, ErrorCode::RecursionLimitExceeded);

    let too_deep_objects = "{\"k\":".repeat(128) + "null" + &"}".repeat(128);
    assert_parse_error(&too_deep_objects, ErrorCode::RecursionLimitExceeded);
}

#[test]
fn error_positions() {
    let err = from_str("").unwrap_err();
    assert_eq!((err.line(), err.column()), (1, 0));
    assert_eq!(err.to_string(), "expected value at line 1 column 0");

    // Errors on a byte still under the cursor point at that byte, column 1
    // for the first character of the input.
    let err = from_str("?").unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidValue);
    assert_eq!((err.line(), err.column()), (1, 1));

    let err = from_str("  null  x").unwrap_err();
    assert_eq!(err.code(), ErrorCode::TrailingCharacters);
    assert_eq!((err.line(), err.column()), (1, 9));

    let err = from_str("[\n  1 2\n]").unwrap_err();
    assert_eq!(err.code(), ErrorCode::ExpectedListCommaOrEnd);
    assert_eq!((err.line(), err.column()), (2, 5));
    assert_eq!(err.to_string(), "expected `,` or `]` at line 2 column 5");
}
