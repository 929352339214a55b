use archieml::ParseOptions;
use rstest::rstest;
use serde_json::{json, Value};

fn parse_with_comments(input: &str) -> Value {
    let options = ParseOptions::new().with_comments(true);
    archieml::parse_with_options(input, &options).into_value()
}

#[rstest]
#[case("key: value [note] value", "value  value")]
#[case("key: [note]value", "value")]
#[case("key: value [note]", "value")]
#[case("key: [[literal]]", "[literal]")]
#[case("key: a [[b]] c [d] e", "a [b] c  e")]
#[case("key: unclosed [bracket", "unclosed [bracket")]
fn inline_comments(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse_with_comments(input), json!({ "key": expected }));
}

#[rstest]
fn comments_are_kept_by_default() {
    assert_eq!(
        archieml::parse("key: value [note]").into_value(),
        json!({"key": "value [note]"})
    );
}

#[rstest]
fn multiline_comments() {
    assert_eq!(
        parse_with_comments("key: a\nb [note]\nc\n:end"),
        json!({"key": "a\nb \nc"})
    );
}

#[rstest]
fn escaped_comment_at_line_start_is_removed() {
    assert_eq!(
        parse_with_comments("key: a\n\\[note]b\n:end"),
        json!({"key": "a\nb"})
    );
}

#[rstest]
fn comments_inside_list_values() {
    assert_eq!(
        parse_with_comments("[list]\n* one [x]\n* [[two]]"),
        json!({"list": ["one", "[two]"]})
    );
}
