use jpu_core::{Path, Seg, parse};

fn fruits_name() -> Path {
    Path::root().key("fruits").index(0).key("name")
}

#[test]
fn root_only_expressions_are_empty() {
    assert!(parse("$").is_empty());
    assert!(parse("${}").is_empty());
    assert!(parse("").is_empty());
    assert!(parse("   $  ").is_empty());
}

#[test]
fn bracket_dotted_and_wrapped_forms_agree() {
    let expected = fruits_name();
    assert_eq!(parse(r#"$["fruits"][0]["name"]"#), expected);
    assert_eq!(parse(r#"${["fruits"][0]["name"]}"#), expected);
    assert_eq!(parse("$.fruits[0].name"), expected);
    assert_eq!(parse("  $.fruits[0].name\n"), expected);
}

#[test]
fn wrapper_is_stripped_once() {
    assert_eq!(parse(r#"${["a"][1]}"#), Path::root().key("a").index(1));
}

#[test]
fn quoted_keys_are_taken_verbatim() {
    let p = parse(r#"$["first name"]["a.b"]["[x]"]"#);
    assert_eq!(
        p.segments(),
        &[
            Seg::Key("first name".into()),
            Seg::Key("a.b".into()),
            Seg::Key("[x]".into())
        ]
    );
    // Bracketed digits inside quotes stay a key.
    assert_eq!(parse(r#"$["0"]"#).segments(), &[Seg::Key("0".into())]);
    // Non-ASCII keys survive byte slicing.
    assert_eq!(parse(r#"$["häagen"].x"#), Path::root().key("häagen").key("x"));
}

#[test]
fn dotted_identifiers_allow_dollar_and_underscore() {
    assert_eq!(parse("$.$class._id.a1"), Path::root().key("$class").key("_id").key("a1"));
}

#[test]
fn unrecognized_fragments_are_skipped() {
    // negative index, empty key, unterminated bracket, stray chars
    assert_eq!(parse("$[-1].a"), Path::root().key("a"));
    assert_eq!(parse(r#"$[""].a"#), Path::root().key("a"));
    assert_eq!(parse("$.a[1"), Path::root().key("a"));
    assert_eq!(parse("$ .a ~ [2]"), Path::root().key("a").index(2));
    assert_eq!(parse("$[abc]"), Path::root());
    // dotted identifiers stop at characters outside the identifier set
    assert_eq!(parse("$.a-b"), Path::root().key("a"));
}

#[test]
fn overflowing_index_contributes_nothing() {
    assert_eq!(parse("$[99999999999999999999999].a"), Path::root().key("a"));
}

#[test]
fn display_renders_canonical_bracket_form() {
    assert_eq!(fruits_name().to_string(), r#"$["fruits"][0]["name"]"#);
    assert_eq!(Path::root().to_string(), "$");
    let p: Path = "$.a.b[3]".parse().unwrap();
    assert_eq!(parse(&p.to_string()), p);
}

#[test]
fn parent_and_last() {
    let p = fruits_name();
    assert_eq!(p.last(), Some(&Seg::Key("name".into())));
    assert_eq!(p.parent(), Some(Path::root().key("fruits").index(0)));
    assert_eq!(Path::root().parent(), None);
}

#[test]
fn array_index_accepts_only_canonical_decimal_keys() {
    assert_eq!(Seg::Index(4).array_index(), Some(4));
    assert_eq!(Seg::from("12").array_index(), Some(12));
    assert_eq!(Seg::from("0").array_index(), Some(0));
    assert_eq!(Seg::from("01").array_index(), None);
    assert_eq!(Seg::from("name").array_index(), None);
    assert_eq!(Seg::Index(7).object_key(), "7");
}
