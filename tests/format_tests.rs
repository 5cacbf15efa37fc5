use sin::{parse, parse_with_options, Kind, ParseOptions, Value};

fn assert_rejected(input: &str) {
    let parsed = parse(input);
    assert!(!parsed.is_ok(), "expected diagnostics for {:?}", input);
}

fn assert_clean(input: &str) -> Value {
    let parsed = parse(input);
    assert!(
        parsed.is_ok(),
        "unexpected diagnostics for {:?}:\n{}",
        input,
        parsed.error_log()
    );
    parsed.value
}

#[test]
fn test_unsigned_bounds() {
    for input in [
        ":Uint8 -1",
        ":Uint8 256",
        ":Uint16 -1",
        ":Uint16 65536",
        ":Uint32 -1",
        ":Uint32 4294967296",
        ":Uint64 -1",
        ":Uint64 18446744073709551616",
    ] {
        assert_rejected(input);
    }

    assert_eq!(assert_clean(":Uint8 255"), Value::Uint8(255));
    assert_eq!(assert_clean(":Uint8 0"), Value::Uint8(0));
    assert_eq!(assert_clean(":Uint16 65535"), Value::Uint16(65535));
    assert_eq!(assert_clean(":Uint32 4294967295"), Value::Uint32(u32::MAX));
    assert_eq!(
        assert_clean(":Uint64 18446744073709551615"),
        Value::Uint64(u64::MAX)
    );
}

#[test]
fn test_signed_bounds() {
    for input in [
        ":Int8 -129",
        ":Int8 128",
        ":Int16 -32769",
        ":Int16 32768",
        ":Int32 -2147483649",
        ":Int32 2147483648",
        ":Int64 -9223372036854775809",
        ":Int64 9223372036854775808",
    ] {
        assert_rejected(input);
    }

    assert_eq!(assert_clean(":Int8 127"), Value::Int8(127));
    assert_eq!(assert_clean(":Int8 -128"), Value::Int8(-128));
    assert_eq!(assert_clean(":Int16 -32768"), Value::Int16(i16::MIN));
    assert_eq!(assert_clean(":Int32 2147483647"), Value::Int32(i32::MAX));
    assert_eq!(
        assert_clean(":Int64 -9223372036854775808"),
        Value::Int64(i64::MIN)
    );
}

#[test]
fn test_bounds_messages() {
    assert_eq!(
        parse(":Uint8 256").error_log(),
        "value '256' out of range for Uint8 at line 1"
    );
    assert_eq!(
        parse(":Int8 x").error_log(),
        "cannot parse 'x' as Int8 at line 1"
    );
    assert!(parse(":Uint16 -1").error_log().contains("unsigned Uint16"));
}

#[test]
fn test_float_range() {
    assert_rejected(":Float 1e40");
    assert_rejected(":Float -1e40");
    assert_rejected(":Double 1e400");
    assert_eq!(
        parse(":Float 1e40").error_log(),
        "value '1e40' out of range for Float at line 1"
    );

    assert_eq!(assert_clean(":Float 3.4e38"), Value::Float(3.4e38));
    assert_eq!(assert_clean(":Double 1e300"), Value::Double(1e300));
    assert!(assert_clean(":Float inf").as_f32().unwrap().is_infinite());
    assert!(assert_clean(":Double -inf").as_f64().unwrap().is_infinite());
}

#[test]
fn test_unknown_type_name() {
    assert_rejected(":Int 2147483648");
    assert_rejected(":String \"a\"");
}

#[test]
fn test_tagged_on_next_line() {
    let value = assert_clean(":Int32\n1");
    assert_eq!(value.kind(), Kind::Int32);
    assert_eq!(value.as_i32().unwrap(), 1);
}

#[test]
fn test_objects() {
    assert_eq!(assert_clean(": {\n}\n").kind(), Kind::Object);

    let value = assert_clean(": {\n\t.element:{}}");
    assert_eq!(value["element"], Value::object());

    let value = assert_clean(": {\n\t.element:Int8 -33}");
    assert_eq!(value["element"].kind(), Kind::Int8);
    assert_eq!(value["element"].as_i8().unwrap(), -33);
}

#[test]
fn test_bracketed_bare_keys() {
    let input = ": {\n\
                 \x20 .first: {\n\
                 \x20   [second one]: {\n\
                 \x20     [third one]: Int16\n\
                 \x20     12345\n\
                 \x20     [fourth one]: Int8\n\
                 \x20     0\n\
                 \x20   }\n\
                 \x20 }\n\
                 }\n\n\n";
    let value = assert_clean(input);
    assert_eq!(value["first"].kind(), Kind::Object);
    assert_eq!(
        value["first"]["second one"]["third one"].as_i16().unwrap(),
        12345
    );
    assert_eq!(value["first"]["second one"]["fourth one"].as_i8().unwrap(), 0);
}

#[test]
fn test_quoted_keys() {
    let input = ": {\n [ \" var 1 \" ] : -3\n[\"var 2\"]: true   \n   [ \"var \\\" 3\" ] : \"abc\"\n}\n";
    let value = assert_clean(input);
    assert_eq!(value[" var 1 "].as_i64().unwrap(), -3);
    assert!(value["var 2"].as_bool().unwrap());
    assert_eq!(value["var \" 3"].as_str().unwrap(), "abc");
}

#[test]
fn test_key_quoting_round_trip() {
    let mut value = Value::new();
    value["var \" 3"] = Value::from("abc");
    value["with space"] = Value::from(1u8);
    value["plain"] = Value::from(true);

    let text = value.to_string();
    assert!(text.contains("[\"var \\\" 3\"]: \"abc\"\n"));
    assert!(text.contains("[\"with space\"]: Uint8\n"));
    assert!(text.contains(".plain: true\n"));

    let back = assert_clean(&text);
    assert_eq!(back, value);
    let keys: Vec<&String> = back.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["var \" 3", "with space", "plain"]);
}

#[test]
fn test_arrays() {
    let input = " :[\n  [0]: Int32\n  1\n  [1]: Int32\n  2\n  [2]: Int32\n  3\n  [3]: Int32\n  4\n]";
    let value = assert_clean(input);
    assert_eq!(value.kind(), Kind::Array);
    assert_eq!(value[2].as_i32().unwrap(), 3);

    assert_eq!(assert_clean(":[]"), Value::array());
}

#[test]
fn test_sparse_out_of_order_indices() {
    let value = assert_clean(": [\n    [20]: \"123\"\n    [3] : \"456\"\n    [0] : \"789\"\n]");
    assert_eq!(value.as_array().unwrap().len(), 21);
    assert_eq!(value[20].as_str().unwrap(), "123");
    assert_eq!(value[3].as_str().unwrap(), "456");
    assert_eq!(value[0].as_str().unwrap(), "789");
    assert_eq!(value[1], Value::object());
}

#[test]
fn test_nested_mix() {
    let input = " :\n[\n  [1] : {\n      [one]: {\n         .a : Int8 3 \n         .b : [\n           [1] : Int16 2\n           [4] : Int32 7\n         ]\n      }\n  }\n  [3]: Int8 4\n]";
    let value = assert_clean(input);
    assert_eq!(value[1]["one"]["a"].as_i8().unwrap(), 3);
    assert_eq!(value[1]["one"]["b"][4].as_i32().unwrap(), 7);
    assert_eq!(value[3].as_i8().unwrap(), 4);
}

#[test]
fn test_end_to_end_example() {
    let value = assert_clean(":{\n .a: Int8 3\n .b: [\n [1]: Int16 2\n [4]: Int32 7\n ]\n}");
    assert_eq!(value["a"].as_i8().unwrap(), 3);
    assert_eq!(value["b"][4].as_i32().unwrap(), 7);
    assert_eq!(value["b"][1].as_i16().unwrap(), 2);
    for index in [0, 2, 3] {
        assert_eq!(value["b"][index], Value::object());
    }
}

#[test]
fn test_booleans() {
    assert!(!assert_clean(":false").as_bool().unwrap());
    assert!(assert_clean(":Bool true").as_bool().unwrap());
    assert_rejected(":Bool 1");

    let value = assert_clean(":{\n.bool1: Bool false\n.number: Double 1.23e+5\n.bool2: true\n}");
    assert!(!value["bool1"].as_bool().unwrap());
    assert!(value["bool2"].as_bool().unwrap());
    assert!((value["number"].as_f64().unwrap() - 123000.0).abs() < 1e-6);
}

#[test]
fn test_untagged_inference() {
    let value = assert_clean(":-7467839     ");
    assert_eq!(value, Value::Int64(-7467839));

    let value = assert_clean(":-7467839e+2     ");
    assert_eq!(value.kind(), Kind::Double);
    assert!((value.as_f64().unwrap() + 746783900.0).abs() < 1e-7);

    assert_eq!(assert_clean(":123").kind(), Kind::Int64);
    assert_eq!(assert_clean(":123.456").kind(), Kind::Double);
    assert_eq!(assert_clean(":true").kind(), Kind::Bool);
    assert_eq!(
        assert_clean(":9223372036854775808"),
        Value::Uint64(9223372036854775808)
    );
    assert_eq!(assert_clean(":NaN").kind(), Kind::Double);
}

#[test]
fn test_untagged_trailing_garbage() {
    assert_rejected(": [\n   [1] : 123extra_input\n  ]\n");
    assert_rejected(": [\n   [1] : 123.456extra\n  ]\n");

    let value = assert_clean(": [\n   [1] : 123\n  ]\n");
    assert_eq!(value[1], Value::Int64(123));

    let value = assert_clean(": [\n   [1] : 123.456\n  ]\n");
    assert!((value[1].as_f64().unwrap() - 123.456).abs() < 1e-9);
}

#[test]
fn test_malformed_index() {
    assert_rejected(": [\n   [0extra_input] : true\n  ]\n");
    assert_rejected(": [ [-1]: true ]");
    assert_rejected(": [ [abc]: true ]");
}

#[test]
fn test_huge_index_is_rejected_without_allocating() {
    for input in [
        ": [ [18446744073709551614]: 1 ]",
        ": [ [18446744073709551615]: 1 ]",
        ": [ [4000000000000]: 1 ]",
        ": [ [1234567890123456789012345]: 1 ]",
    ] {
        let parsed = parse(input);
        assert_eq!(parsed.errors.len(), 1, "{:?}", input);
        assert_eq!(parsed.value, Value::array());
    }

    let parsed = parse(": [ [0]: true [4000000000000]: 1 [1]: false ]");
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.value.as_array().unwrap().len(), 2);
    assert_eq!(parsed.value[1], Value::Bool(false));
}

#[test]
fn test_index_limit_boundary() {
    let limit = ParseOptions::DEFAULT_MAX_ARRAY_INDEX;
    let value = assert_clean(&format!(": [ [{}]: 1 ]", limit));
    assert_eq!(value.as_array().unwrap().len(), limit + 1);
    assert_eq!(value[limit], Value::Int64(1));

    assert_eq!(
        parse(&format!(": [ [{}]: 1 ]", limit + 1)).error_log(),
        format!("array index {} exceeds the limit of {} at line 1", limit + 1, limit)
    );

    let options = ParseOptions::new().with_max_array_index(3);
    assert!(parse_with_options(": [ [3]: 1 ]", &options).is_ok());
    let parsed = parse_with_options(": [ [4]: 1 ]", &options);
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.value, Value::array());
}

#[test]
fn test_deep_nesting_is_reported() {
    let depth = ParseOptions::DEFAULT_MAX_DEPTH * 40;
    let input = format!(": {}1{}", "[ [0]: ".repeat(depth), " ]".repeat(depth));
    let parsed = parse(&input);
    assert_eq!(parsed.errors.len(), 1);
    assert!(parsed.error_log().contains("nesting deeper than"));

    let unclosed = ": ".to_string() + &"{ .a: ".repeat(depth);
    assert!(!parse(&unclosed).is_ok());
}

#[test]
fn test_quoted_strings() {
    assert_eq!(
        assert_clean(": \"simple string\"     ").as_str().unwrap(),
        "simple string"
    );
    assert_eq!(
        assert_clean(": \"\\nstring\twith\\\\escaped\\\"symbols\"")
            .as_str()
            .unwrap(),
        "\nstring\twith\\escaped\"symbols"
    );
    assert_rejected(": \"unterminated");
    assert_rejected(": \"line\nbreak\"");
}

#[test]
fn test_backtick_strings() {
    assert_eq!(
        assert_clean(": `simple string`     ").as_str().unwrap(),
        "simple string"
    );
    assert_eq!(
        assert_clean(": `\\nstring\\twith\\\\escaped\\`symbols`")
            .as_str()
            .unwrap(),
        "\\nstring\\twith\\escaped`symbols"
    );
    assert_eq!(assert_clean(": `ab\\`c`\n").as_str().unwrap(), "ab`c");
}

#[test]
fn test_backtick_line_break_stripping() {
    let value = assert_clean(": `\nabc\nc\\\\d\nef\\`gh\n`");
    assert_eq!(value.as_str().unwrap(), "abc\nc\\d\nef`gh");

    // Only one break is removed on each side.
    let value = assert_clean(": `\n\nabc\n\n`");
    assert_eq!(value.as_str().unwrap(), "\nabc\n");
}

#[test]
fn test_missing_root_colon() {
    let parsed = parse("{ }");
    assert_eq!(parsed.error_log().lines().next(), Some("':' expected but '{' found at line 1"));
}

#[test]
fn test_empty_input() {
    let parsed = parse("");
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.value, Value::object());

    let parsed = parse(":");
    assert_eq!(
        parsed.error_log(),
        "value expected but end of input found at line 1"
    );
}

#[test]
fn test_unclosed_containers_keep_partial_tree() {
    let parsed = parse(": {\n .a: 1\n .b: [ [0]: 2");
    assert!(!parsed.is_ok());
    assert_eq!(parsed.value["a"], Value::Int64(1));
    assert_eq!(parsed.value["b"][0], Value::Int64(2));
}

#[test]
fn test_reports_every_problem() {
    let parsed = parse(": {\n .a: Uint8 256\n .b: Int8 200\n .c: 3\n}");
    assert_eq!(parsed.errors.len(), 2);
    assert_eq!(parsed.errors[0].line, 2);
    assert_eq!(parsed.errors[1].line, 3);
    assert_eq!(parsed.value["c"], Value::Int64(3));
}

#[test]
fn test_render_parse_fixed_point() {
    let input = ": {\n .s: `multi\nline`\n .f: Float 0.1\n .d: 2.5e10\n .u: Uint64 7\n .e: [ [2]: {} ]\n}";
    let first = assert_clean(input).to_string();
    let second = assert_clean(&first).to_string();
    assert_eq!(first, second);
}
