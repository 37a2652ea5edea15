//! Integration tests for the JSON parser.

use json_eval::{JsonParseError, JsonParser, Members, Value};

fn parse(text: &str) -> Members {
    JsonParser::parse(text).unwrap_or_else(|e| panic!("parse({text}) failed: {e}"))
}

fn parse_err(text: &str) -> JsonParseError {
    JsonParser::parse(text)
        .err()
        .unwrap_or_else(|| panic!("expected error for {text}"))
}

// ---------------------------------------------------------------- Structure

#[test]
fn test_empty_object() {
    assert_eq!(0, parse("{}").len());
    assert_eq!(0, parse("  { }  ").len());
}

#[test]
fn test_string_value() {
    let result = parse(r#"{"string": "something"}"#);
    assert_eq!(Some(&Value::String("something".into())), result.get("string"));
}

#[test]
fn test_integer_values() {
    let result = parse(r#"{"integer": 5, "negativeInt": -6}"#);
    assert_eq!(Some(&Value::Int(5)), result.get("integer"));
    assert_eq!(Some(&Value::Int(-6)), result.get("negativeInt"));
}

#[test]
fn test_float_values() {
    let result = parse(r#"{"floating": 0.12, "negativeFloat": -12.002, "scaled": 1.0321e-5}"#);
    assert_eq!(Some(&Value::Float(0.12)), result.get("floating"));
    assert_eq!(Some(&Value::Float(-12.002)), result.get("negativeFloat"));
    assert_eq!(Some(&Value::Float(1.0321e-5)), result.get("scaled"));
}

#[test]
fn test_int_float_classification() {
    // Same digits, classified only by what the two scans consume.
    let result = parse(r#"{"a": 5, "b": 5.0, "c": 5e0, "d": 5.5}"#);
    assert_eq!(Some(&Value::Int(5)), result.get("a"));
    assert_eq!(Some(&Value::Float(5.0)), result.get("b"));
    assert_eq!(Some(&Value::Float(5.0)), result.get("c"));
    assert_eq!(Some(&Value::Float(5.5)), result.get("d"));
}

#[test]
fn test_null_and_bools() {
    let result = parse(r#"{"shouldBeNull": null, "yes": true, "no": false}"#);
    assert_eq!(Some(&Value::Null), result.get("shouldBeNull"));
    assert_eq!(Some(&Value::Bool(true)), result.get("yes"));
    assert_eq!(Some(&Value::Bool(false)), result.get("no"));
}

#[test]
fn test_empty_containers() {
    let result = parse(r#"{"object": {}, "array": []}"#);
    assert_eq!(Some(&Value::Object(Members::new())), result.get("object"));
    assert_eq!(Some(&Value::Array(vec![])), result.get("array"));
}

#[test]
fn test_nested_document() {
    let result = parse(r#"{"a": {"b": [1, 2, {"c": "test"}, [11, 12]]}}"#);
    let Some(Value::Object(a)) = result.get("a") else {
        panic!("expected object at 'a'");
    };
    let Some(Value::Array(b)) = a.get("b") else {
        panic!("expected array at 'a.b'");
    };
    assert_eq!(4, b.len());
    assert_eq!(Value::Int(1), b[0]);
    let Value::Object(c) = &b[2] else {
        panic!("expected object at 'a.b[2]'");
    };
    assert_eq!(Some(&Value::String("test".into())), c.get("c"));
    assert_eq!(Value::Array(vec![Value::Int(11), Value::Int(12)]), b[3]);
}

#[test]
fn test_whitespace_between_tokens_is_insignificant() {
    let compact = parse(r#"{"a":{"b":[1,2]}}"#);
    let spaced = parse("{\n  \"a\" : {\n    \"b\" : [ 1 ,\t2 ]\n  }\n}");
    assert_eq!(compact, spaced);
}

#[test]
fn test_whitespace_inside_strings_is_preserved() {
    let result = parse("{\"s\": \"two  spaces and\ta tab\"}");
    assert_eq!(
        Some(&Value::String("two  spaces and\ta tab".into())),
        result.get("s")
    );
}

// ------------------------------------------------------------------ Escapes

#[test]
fn test_escape_sequences_decode() {
    let result = parse(r#"{"s": "a\nb\tc\bd\fe\rf\"g\\h\/i"}"#);
    assert_eq!(
        Some(&Value::String("a\nb\tc\u{0008}d\u{000C}e\rf\"g\\h/i".into())),
        result.get("s")
    );
}

#[test]
fn test_unicode_escape_decodes_to_one_character() {
    let result = parse(r#"{"s": "\u0041\u00e9\u4f60"}"#);
    assert_eq!(Some(&Value::String("A\u{e9}\u{4f60}".into())), result.get("s"));
}

#[test]
fn test_unknown_escape_is_rejected() {
    assert_eq!(JsonParseError::BadEscape('x'), parse_err(r#"{"s": "\x"}"#));
}

#[test]
fn test_bad_unicode_escape_is_rejected() {
    assert_eq!(JsonParseError::BadUnicodeEscape, parse_err(r#"{"s": "\u00zz"}"#));
}

#[test]
fn test_unterminated_string() {
    assert_eq!(JsonParseError::UnterminatedString, parse_err(r#"{"s": "abc"#));
}

// --------------------------------------------------------------------- Keys

#[test]
fn test_identifier_keys_are_accepted() {
    let result = parse(r#"{"_a": 1, "$b": 2, "c1_d$": 3}"#);
    assert_eq!(3, result.len());
}

#[test]
fn test_non_identifier_keys_are_rejected() {
    assert_eq!(
        JsonParseError::InvalidKey("my-key".into()),
        parse_err(r#"{"my-key": 1}"#)
    );
    assert_eq!(
        JsonParseError::InvalidKey("1a".into()),
        parse_err(r#"{"1a": 1}"#)
    );
    assert_eq!(JsonParseError::InvalidKey("".into()), parse_err(r#"{"": 1}"#));
    assert_eq!(
        JsonParseError::InvalidKey("with space".into()),
        parse_err(r#"{"with space": 1}"#)
    );
}

#[test]
fn test_duplicate_keys_are_rejected() {
    assert_eq!(
        JsonParseError::DuplicateKey("a".into()),
        parse_err(r#"{"a": 1, "a": 2}"#)
    );
}

// ------------------------------------------------------------------- Errors

#[test]
fn test_input_too_short() {
    assert_eq!(JsonParseError::TooShort, parse_err(""));
    assert_eq!(JsonParseError::TooShort, parse_err("  {  "));
}

#[test]
fn test_top_level_must_be_an_object() {
    assert_eq!(JsonParseError::MissingOpeningBrace, parse_err("[1, 2]"));
    assert_eq!(JsonParseError::MissingOpeningBrace, parse_err("\"ab\""));
}

#[test]
fn test_missing_colon() {
    assert_eq!(JsonParseError::MissingColon, parse_err(r#"{"a" 1}"#));
}

#[test]
fn test_missing_comma() {
    assert_eq!(JsonParseError::MissingComma, parse_err(r#"{"a": 1 "b": 2}"#));
    assert_eq!(JsonParseError::MissingComma, parse_err(r#"{"a": [1 2]}"#));
}

#[test]
fn test_trailing_comma() {
    assert_eq!(JsonParseError::TrailingComma, parse_err(r#"{"a": 1,}"#));
    assert_eq!(JsonParseError::TrailingComma, parse_err(r#"{"a": [1, 2,]}"#));
}

#[test]
fn test_bare_minus() {
    assert_eq!(JsonParseError::BareMinus, parse_err(r#"{"a": -}"#));
    assert_eq!(JsonParseError::BareMinus, parse_err(r#"{"a": -x}"#));
}

#[test]
fn test_bad_literals() {
    assert_eq!(JsonParseError::InvalidLiteral, parse_err(r#"{"a": tru}"#));
    assert_eq!(JsonParseError::InvalidLiteral, parse_err(r#"{"a": nul}"#));
    assert_eq!(JsonParseError::InvalidLiteral, parse_err(r#"{"a": falsy}"#));
}

#[test]
fn test_truncated_input() {
    assert_eq!(JsonParseError::UnexpectedEnd, parse_err(r#"{"a": 1"#));
    assert_eq!(JsonParseError::UnexpectedEnd, parse_err(r#"{"a": [1, 2"#));
}

#[test]
fn test_trailing_content_is_rejected() {
    assert_eq!(JsonParseError::TrailingContent, parse_err(r#"{"a": 1} extra"#));
    assert_eq!(0, parse("{}  \n").len());
}

#[test]
fn test_integer_overflow() {
    assert_eq!(
        JsonParseError::IntegerOverflow,
        parse_err(r#"{"a": 9223372036854775808}"#)
    );
    // The same digits with a fraction classify as a float and are fine.
    let result = parse(r#"{"a": 9223372036854775808.0}"#);
    assert_eq!(Some(&Value::Float(9223372036854775808.0)), result.get("a"));
}
