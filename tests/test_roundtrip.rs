use qs_manager::{Map, Value};

/// macro for testing roundtrip generation and parsing of raw querystrings
///
/// This is a macro so that `insta` generates snapshots with
/// the function name
macro_rules! raw_roundtrip_test {
    (
        $data:expr, @$snapshot:literal
    ) => {
        let data = &$data;

        let serialized = qs_manager::encode_raw(data, None).expect("serialize");
        // snapshot the serialized string for easy introspection
        // and to track changes
        insta::assert_snapshot!(serialized, @$snapshot);

        let deserialized = qs_manager::decode_raw(&serialized, true).expect("deserialize");

        // check we get the same data back
        pretty_assertions::assert_eq!(data, &deserialized);
    };
}

/// macro for testing roundtrip generation and parsing of base64 querystrings
///
/// Both `decode_base64` and `parse_auto` must give the value back
macro_rules! base64_roundtrip_test {
    (
        $data:expr
    ) => {
        let data = &$data;

        for field_name in ["q", "field name", "="] {
            let serialized = qs_manager::encode_base64(data, field_name).expect("serialize");

            let deserialized = qs_manager::decode_base64(&serialized).expect("deserialize");
            pretty_assertions::assert_eq!(data, &deserialized[field_name]);

            let parsed = qs_manager::parse_auto(&serialized).expect("parse_auto");
            pretty_assertions::assert_eq!(data, &parsed[field_name]);
        }
    };
}

fn map<const N: usize>(entries: [(&str, Value); N]) -> Map {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect()
}

fn dec(text: &str) -> Value {
    Value::decimal(text).unwrap()
}

// ========== RAW ==========

#[test]
fn raw_flat_map() {
    raw_roundtrip_test!(
        map([("a", 1.into()), ("b", 2.into())]),
        @"?a=1&b=2"
    );
}

#[test]
fn raw_scalar_types() {
    raw_roundtrip_test!(
        map([
            ("bool_val", true.into()),
            ("false_val", false.into()),
            ("i64_val", i64::MIN.into()),
            ("u128_val", u128::MAX.into()),
            ("decimal_val", dec("-3.14")),
            ("string_val", "Hello, world! 你好世界".into()),
        ]),
        @"?bool_val=true&false_val=false&i64_val=-9223372036854775808&u128_val=340282366920938463463374607431768211455&decimal_val=-3.14&string_val=Hello,%20world!%20%E4%BD%A0%E5%A5%BD%E4%B8%96%E7%95%8C"
    );
}

#[test]
fn raw_decimals_keep_their_digits() {
    raw_roundtrip_test!(
        map([
            ("tenth", dec("0.1")),
            ("long", dec("0.1000000000000000000000000000001")),
            ("scaled", dec("2.500")),
            ("zero", dec("0.0")),
        ]),
        @"?tenth=0.1&long=0.1000000000000000000000000000001&scaled=2.500&zero=0.0"
    );
}

#[test]
fn raw_special_chars() {
    raw_roundtrip_test!(
        map([
            ("space string", "   x".into()),
            ("special_chars", "!@#$%^*()_+-[]{}|;':,.<>?/~`".into()),
        ]),
        @"?space%20string=%20%20%20x&special_chars=!@%23$%25%5E%2A%28%29_+-%5B%5D%7B%7D%7C;%27:,.%3C%3E?/~%60"
    );
}

#[test]
fn raw_scale_survives_exactly() {
    let data = map([("scaled", dec("2.500"))]);
    let serialized = qs_manager::encode_raw(&data, None).unwrap();
    let deserialized = qs_manager::decode_raw(&serialized, true).unwrap();
    assert_eq!(deserialized["scaled"].to_string(), "2.500");
}

#[test]
fn raw_whole_decimal() {
    raw_roundtrip_test!(
        map([("a", dec("14")), ("b", dec("1e5")), ("c", dec("-7.000"))]),
        @"?a=14&b=100000&c=-7.000"
    );
}

#[test]
fn raw_trailing_point() {
    let decoded = qs_manager::decode_raw("?a=14.", true).unwrap();
    assert!(decoded["a"].as_decimal().is_some());

    let serialized = qs_manager::encode_raw(&decoded, None).unwrap();
    assert_eq!(serialized, "?a=14");

    // read back as an integer, which still compares equal
    let back = qs_manager::decode_raw(&serialized, true).unwrap();
    assert!(back["a"].as_integer().is_some());
    pretty_assertions::assert_eq!(decoded, back);
}

// ========== BASE64 ==========

#[test]
fn base64_scalars() {
    base64_roundtrip_test!(Value::from("Hello"));
    base64_roundtrip_test!(Value::from(true));
    base64_roundtrip_test!(Value::from(-42));
    base64_roundtrip_test!(Value::Null);
    base64_roundtrip_test!(dec("0.1"));
    base64_roundtrip_test!(dec("-0.0000000000000000000000000000001"));
    base64_roundtrip_test!(Value::from(u128::MAX));
}

#[test]
fn base64_nested() {
    base64_roundtrip_test!(Value::Object(map([
        ("test", map([("nested", 1.into())]).into()),
        (
            "test2",
            Value::Array(vec![map([("hi", "There".into())]).into(), Value::Null]),
        ),
        ("test3", dec("3.14")),
        ("empty", Value::Object(Map::new())),
        ("empty_list", Value::Array(vec![])),
    ])));
}

#[test]
fn base64_unicode() {
    base64_roundtrip_test!(Value::Object(map([
        ("cheese", "comté".into()),
        ("crab", "🦀".into()),
        ("control", "tab\tnewline\n\u{7f}".into()),
    ])));
}

#[test]
fn base64_far_exponent() {
    base64_roundtrip_test!(dec("1e4096"));
    base64_roundtrip_test!(dec("-25e-4000"));
}

#[test]
fn base64_deep_nesting() {
    let mut value = Value::from(1);
    for depth in 0..32 {
        value = if depth % 2 == 0 {
            Value::Array(vec![value])
        } else {
            Value::Object(map([("level", value)]))
        };
    }
    base64_roundtrip_test!(value);
}
