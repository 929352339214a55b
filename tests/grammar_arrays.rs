use rstest::rstest;
use serde_json::{json, Value};

fn parse(input: &str) -> Value {
    archieml::parse(input).into_value()
}

#[rstest]
#[case("[list]\n* a\n* b\n[]", json!({"list": ["a", "b"]}))]
#[case("[list]\n  *   a  \n*b", json!({"list": ["a", "b"]}))]
#[case("[list]\n[]", json!({"list": []}))]
#[case("[list]\n* key: value", json!({"list": ["key: value"]}))]
#[case("[a.b]\n* x", json!({"a": {"b": ["x"]}}))]
#[case("* outside", json!({}))]
fn simple_lists(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(parse(input), expected);
}

#[rstest]
fn duplicate_first_key_starts_element() {
    assert_eq!(
        parse("[rows]\nkey: A\nkey: B"),
        json!({"rows": [{"key": "A"}, {"key": "B"}]})
    );
}

#[rstest]
fn rows_split_on_first_key_only() {
    assert_eq!(
        parse("[rows]\nname: a\nage: 1\nname: b\nage: 2\n[]"),
        json!({"rows": [{"name": "a", "age": "1"}, {"name": "b", "age": "2"}]})
    );
    assert_eq!(
        parse("[rows]\na: 1\nb: 2\nb: 3\na: 4"),
        json!({"rows": [{"a": "1", "b": "3"}, {"a": "4"}]})
    );
}

#[rstest]
fn dotted_first_key_splits_rows() {
    assert_eq!(
        parse("[rows]\na.b: 1\na.b: 2"),
        json!({"rows": [{"a": {"b": "1"}}, {"a": {"b": "2"}}]})
    );
}

#[rstest]
fn simple_lists_drop_keys() {
    assert_eq!(
        parse("[list]\n* a\nkey: v\n* b"),
        json!({"list": ["a", "b"]})
    );
}

#[rstest]
fn complex_lists_drop_bullets() {
    assert_eq!(
        parse("[rows]\nk: a\n* b\nk: c"),
        json!({"rows": [{"k": "a"}, {"k": "c"}]})
    );
}

#[rstest]
fn redeclaring_replaces_list() {
    assert_eq!(parse("[list]\n* a\n[]\n[list]\n* b"), json!({"list": ["b"]}));
}

#[rstest]
fn nested_list_inside_element() {
    let input = "[outer]\nname: a\n[.inner]\n* x\n* y\n[]\nname: b\n[]";
    assert_eq!(
        parse(input),
        json!({"outer": [{"name": "a", "inner": ["x", "y"]}, {"name": "b"}]})
    );
}

#[rstest]
fn nested_list_as_first_key() {
    let input = "[outer]\n[.inner]\n* x\n[]\n[.inner]\n* y\n[]";
    assert_eq!(
        parse(input),
        json!({"outer": [{"inner": ["x"]}, {"inner": ["y"]}]})
    );
}

#[rstest]
fn nested_mapping_inside_element() {
    let input = "[rows]\nname: a\n{.meta}\nk: v\n[]\nage: 1";
    assert_eq!(
        parse(input),
        json!({"rows": [{"name": "a", "meta": {"k": "v"}, "age": "1"}]})
    );
}

#[rstest]
fn nested_modifier_at_root() {
    assert_eq!(parse("[.list]\n* a"), json!({"list": ["a"]}));
}

#[rstest]
fn root_declaration_closes_nested_lists() {
    let input = "[outer]\nname: a\n[.inner]\n* x\n[other]\n* y";
    assert_eq!(
        parse(input),
        json!({"outer": [{"name": "a", "inner": ["x"]}], "other": ["y"]})
    );
}
