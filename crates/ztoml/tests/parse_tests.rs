//! End-to-end parsing scenarios

use ztoml::{parse_str, to_json, Datetime, ErrorKind, Key, KeyKind, Value};

#[test]
fn test_single_key_value() {
    let root = parse_str("key = \"value\"").unwrap();
    let key = root.get("key").unwrap();
    assert_eq!(key.kind(), KeyKind::KeyLeaf);
    assert_eq!(key.as_str(), Some("value"));
    assert_eq!(
        to_json(&root),
        "{\"key\": {\"type\": \"string\", \"value\": \"value\"}}"
    );
}

#[test]
fn test_table_header_chain() {
    let root = parse_str("[a.b]\nk = 1\n").unwrap();
    let a = root.get("a").unwrap();
    assert_eq!(a.kind(), KeyKind::TableBranch);
    let b = a.get("b").unwrap();
    assert_eq!(b.kind(), KeyKind::TableLeaf);
    let k = b.get("k").unwrap();
    assert_eq!(k.kind(), KeyKind::KeyLeaf);
    assert_eq!(k.as_integer(), Some(1));
}

#[test]
fn test_array_of_tables() {
    let root = parse_str("[[fruits]]\nname = \"apple\"\n[[fruits]]\nname = \"banana\"\n").unwrap();
    let fruits = root.get("fruits").unwrap();
    assert_eq!(fruits.kind(), KeyKind::ArrayTable);
    assert_eq!(fruits.elements().len(), 2);
    assert_eq!(
        fruits.elements()[0].get("name").and_then(Key::as_str),
        Some("apple")
    );
    assert_eq!(
        fruits.elements()[1].get("name").and_then(Key::as_str),
        Some("banana")
    );
}

#[test]
fn test_hex_integer() {
    let root = parse_str("x = 0xDEAD_BEEF\n").unwrap();
    assert_eq!(root.get("x").and_then(Key::as_integer), Some(3735928559));
}

#[test]
fn test_offset_datetime_preserves_offset() {
    let root = parse_str("d = 1979-05-27T07:32:00-08:00\n").unwrap();
    let d = root.get("d").unwrap();
    let dt = match d.value() {
        Some(Value::OffsetDatetime(dt)) => dt,
        other => panic!("expected offset datetime, got {other:?}"),
    };
    assert_eq!(dt.date.year(), 1979);
    assert_eq!(u8::from(dt.date.month()), 5);
    assert_eq!(dt.date.day(), 27);
    assert_eq!(dt.time.hour(), 7);
    assert_eq!(dt.time.minute(), 32);
    assert_eq!(dt.time.second(), 0);
    assert_eq!(dt.offset_minutes(), -480);
    assert_eq!(dt.to_string(), "1979-05-27T07:32:00-08:00");
}

#[test]
fn test_redefining_value_as_table() {
    let err = parse_str("a = 1\n[a]\nb = 2\n").unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::DuplicateKey {
            key: "a".to_string()
        }
    );
    assert_eq!(err.pos().line, 2);
}

#[test]
fn test_all_datetime_shapes() {
    let root = parse_str(concat!(
        "odt1 = 1979-05-27T07:32:00Z\n",
        "odt2 = 1979-05-27T00:32:00-07:00\n",
        "odt3 = 1979-05-27T00:32:00.999999-07:00\n",
        "ldt1 = 1979-05-27T07:32:00\n",
        "ldt2 = 1979-05-27T00:32:00.999999\n",
        "ld1 = 1979-05-27\n",
        "lt1 = 07:32:00\n",
        "lt2 = 00:32:00.999999\n",
    ))
    .unwrap();
    assert!(matches!(
        root.get("odt1").unwrap().value(),
        Some(Value::OffsetDatetime(dt)) if dt.zulu
    ));
    assert!(matches!(
        root.get("odt2").unwrap().value(),
        Some(Value::OffsetDatetime(dt)) if dt.offset_minutes() == -420
    ));
    assert!(matches!(
        root.get("odt3").unwrap().value(),
        Some(Value::OffsetDatetime(dt)) if dt.frac.is_some()
    ));
    assert!(matches!(
        root.get("ldt1").unwrap().value(),
        Some(Value::LocalDatetime(_))
    ));
    assert!(matches!(
        root.get("ldt2").unwrap().value(),
        Some(Value::LocalDatetime(dt)) if dt.frac.is_some()
    ));
    assert!(matches!(
        root.get("ld1").unwrap().value(),
        Some(Value::LocalDate(_))
    ));
    assert!(matches!(
        root.get("lt1").unwrap().value(),
        Some(Value::LocalTime(_))
    ));
    assert!(matches!(
        root.get("lt2").unwrap().value(),
        Some(Value::LocalTime(t)) if t.frac.is_some()
    ));
}

#[test]
fn test_datetime_accessor() {
    let root = parse_str("d = 1979-05-27T07:32:00-08:00\nt = 07:32:00\nn = 1\n").unwrap();

    let d = root.get("d").unwrap().as_datetime().unwrap();
    assert!(matches!(d, Datetime::Offset(_)));
    assert_eq!(d.to_string(), "1979-05-27T07:32:00-08:00");

    let t = root.get("t").unwrap().as_datetime().unwrap();
    assert!(matches!(t, Datetime::Time(_)));

    let n = root.get("n").unwrap();
    assert!(n.as_datetime().is_none());
    let err = n.expect_datetime().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Cast { expected: "datetime" }));
    assert_eq!(n.expect_integer().unwrap(), 1);
}

#[test]
fn test_dotted_keys_build_branches() {
    let root = parse_str("physical.color = \"orange\"\nphysical.shape = \"round\"\n").unwrap();
    let physical = root.get("physical").unwrap();
    assert_eq!(physical.kind(), KeyKind::KeyBranch);
    assert_eq!(physical.get("color").and_then(Key::as_str), Some("orange"));
    assert_eq!(physical.get("shape").and_then(Key::as_str), Some("round"));
}

#[test]
fn test_inline_table_folds_into_leaf() {
    let root = parse_str("point = { x = 1, y = 2 }\n").unwrap();
    let point = root.get("point").unwrap();
    assert_eq!(point.kind(), KeyKind::InlineTableLeaf);
    assert!(point.value().is_none());
    assert_eq!(point.get("x").and_then(Key::as_integer), Some(1));
    assert_eq!(point.get("y").and_then(Key::as_integer), Some(2));
}

#[test]
fn test_inline_table_leaf_rejects_redefinition() {
    assert!(parse_str("p = { x = 1 }\np.y = 2\n").is_err());
    assert!(parse_str("p = { x = 1 }\n[p]\n").is_err());
}

#[test]
fn test_redefinition_matrix() {
    // KeyLeaf rejects everything
    assert!(parse_str("a = 1\na = 2\n").is_err());
    assert!(parse_str("a = 1\na.b = 2\n").is_err());
    assert!(parse_str("a = 1\n[a.b]\n").is_err());
    assert!(parse_str("a = 1\n[[a]]\n").is_err());

    // double table header
    assert!(parse_str("[a]\n[a]\n").is_err());

    // sub-table first, parent header later is fine
    let root = parse_str("[a.b]\nx = 1\n[a]\ny = 2\n").unwrap();
    assert_eq!(
        root.get("a").and_then(|a| a.get("y")).and_then(Key::as_integer),
        Some(2)
    );

    // dotted keys may be extended by a later header through the branch
    assert!(parse_str("b.c = 1\n[b.e]\nx = 2\n").is_ok());

    // a table defined through dotted keys cannot be reopened as a header leaf
    assert!(parse_str("[fruit]\napple.color = \"red\"\n[fruit.apple]\n").is_err());

    // array tables accept sub-table headers
    assert!(parse_str("[[t]]\nx = 1\n[t.s]\ny = 2\n").is_ok());

    // but not a plain header with the same name
    assert!(parse_str("[[t]]\n[t]\n").is_err());
    assert!(parse_str("[t]\n[[t]]\n").is_err());
}

#[test]
fn test_dotted_extension_of_header_table_rejected() {
    let err = parse_str("[a.b]\nx = 1\n[a]\nb.c = 2\n").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::DuplicateKey { key } if key == "b"));
}

#[test]
fn test_sub_tables_under_array_table_element() {
    let root = parse_str(concat!(
        "[[fruit]]\n",
        "name = \"apple\"\n",
        "[fruit.physical]\n",
        "color = \"red\"\n",
        "[[fruit]]\n",
        "name = \"banana\"\n",
    ))
    .unwrap();
    let fruit = root.get("fruit").unwrap();
    assert_eq!(fruit.elements().len(), 2);
    let physical = fruit.elements()[0].get("physical").unwrap();
    assert_eq!(physical.get("color").and_then(Key::as_str), Some("red"));
    assert!(fruit.elements()[1].get("physical").is_none());
}

#[test]
fn test_quoted_and_mixed_keys() {
    let root = parse_str("\"127.0.0.1\" = \"value\"\nsite.\"google.com\" = true\n").unwrap();
    assert_eq!(root.get("127.0.0.1").and_then(Key::as_str), Some("value"));
    assert_eq!(
        root.get("site")
            .and_then(|s| s.get("google.com"))
            .and_then(Key::as_bool),
        Some(true)
    );
}

#[test]
fn test_key_lookup_sentinels() {
    let root = parse_str("a = 1\n").unwrap();
    assert!(root.get("missing").is_none());
    let err = root.require("missing").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::KeyNotFound { key } if key == "missing"));
    // wrong-type accessors answer None instead of failing
    let a = root.get("a").unwrap();
    assert_eq!(a.as_str(), None);
    assert_eq!(a.as_integer(), Some(1));
}

#[test]
fn test_no_partial_tree_on_error() {
    assert!(parse_str("good = 1\nbad = \n").is_err());
    assert!(parse_str("good = 1\nbad\n").is_err());
}

#[test]
fn test_error_positions() {
    let err = parse_str("a = 1\nb = ?\n").unwrap_err();
    assert_eq!(err.pos().line, 2);

    let err = parse_str("x = \"unterminated").unwrap_err();
    assert_eq!(err.pos().line, 1);
}

#[test]
fn test_parse_twice_is_deterministic() {
    let doc = concat!(
        "title = \"demo\"\n",
        "[server]\n",
        "ports = [8001, 8002]\n",
        "[server.limits]\n",
        "cpu = 1.5\n",
        "[[accounts]]\n",
        "name = \"a\"\n",
        "[[accounts]]\n",
        "name = \"b\"\n",
    );
    let first = parse_str(doc).unwrap();
    let second = parse_str(doc).unwrap();
    assert_eq!(first, second);
    assert_eq!(to_json(&first), to_json(&second));
}

#[test]
fn test_key_paths_in_insertion_order() {
    let root = parse_str("b = 1\na = 2\n[z]\nq = 3\n[c]\nd = 4\n").unwrap();
    let order: Vec<&str> = root.children().map(Key::id).collect();
    assert_eq!(order, vec!["b", "a", "z", "c"]);
}

#[test]
fn test_utf8_strings_survive() {
    let root = parse_str("s = \"日本語 κείμενο émoji 😀\"\n").unwrap();
    let text = root.get("s").and_then(Key::as_str).unwrap();
    assert_eq!(text, "日本語 κείμενο émoji 😀");
    assert!(std::str::from_utf8(text.as_bytes()).is_ok());
}

#[test]
fn test_whole_document() {
    let root = parse_str(concat!(
        "# This is a TOML document\n",
        "title = \"TOML Example\"\n",
        "\n",
        "[owner]\n",
        "name = \"Tom Preston-Werner\"\n",
        "dob = 1979-05-27T07:32:00-08:00\n",
        "\n",
        "[database]\n",
        "enabled = true\n",
        "ports = [ 8000, 8001, 8002 ]\n",
        "data = [ [\"delta\", \"phi\"], [3.14] ]\n",
        "temp_targets = { cpu = 79.5, case = 72.0 }\n",
        "\n",
        "[servers]\n",
        "\n",
        "[servers.alpha]\n",
        "ip = \"10.0.0.1\"\n",
        "role = \"frontend\"\n",
        "\n",
        "[servers.beta]\n",
        "ip = \"10.0.0.2\"\n",
        "role = \"backend\"\n",
    ))
    .unwrap();

    assert_eq!(root.get("title").and_then(Key::as_str), Some("TOML Example"));
    let database = root.get("database").unwrap();
    assert_eq!(database.get("enabled").and_then(Key::as_bool), Some(true));
    assert_eq!(
        database.get("ports").and_then(Key::as_array).map(<[Value]>::len),
        Some(3)
    );
    let targets = database.get("temp_targets").unwrap();
    assert_eq!(targets.get("cpu").and_then(Key::as_float), Some(79.5));
    let alpha = root.get("servers").and_then(|s| s.get("alpha")).unwrap();
    assert_eq!(alpha.get("role").and_then(Key::as_str), Some("frontend"));
}
