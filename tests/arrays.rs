use rstest::rstest;
use serde_json::{json, Value};

fn decode(input: &str) -> Value {
    peml::loads(input).unwrap_or_else(|err| panic!("decode failed: {err}"))
}

#[rstest]
#[case("[tags]\n* red\n* blue\n", json!({"tags": ["red", "blue"]}))]
#[case("[tags]\n*red\n   *   blue  ", json!({"tags": ["red", "blue"]}))]
#[case("[tags]\n* red\n  still red\n* blue", json!({"tags": ["red\n  still red", "blue"]}))]
#[case("[tags]\n* a\nkey: v", json!({"tags": ["a\nkey: v"]}))]
#[case("[tags]\n* a\n\n* b\n\n", json!({"tags": ["a", "b"]}))]
#[case("[tags]\n", json!({"tags": []}))]
#[case("[t]\n* a\n[t]\n* b", json!({"t": ["b"]}))]
#[case("* outside\n", json!({}))]
fn simple_arrays(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode(input), expected);
}

#[rstest]
#[case(
    "[items]\nname: a\nname: b\n",
    json!({"items": [{"name": "a"}, {"name": "b"}]})
)]
#[case(
    "[items]\nname: a\nage: 1\nname: b\nage: 2",
    json!({"items": [{"name": "a", "age": "1"}, {"name": "b", "age": "2"}]})
)]
#[case(
    "[items]\nname: a\nage: 1\nage: 2",
    json!({"items": [{"name": "a", "age": "2"}]})
)]
#[case(
    "[items]\nname: a\n* not an element",
    json!({"items": [{"name": "a\n* not an element"}]})
)]
#[case(
    "[items]\nid: 1\nmeta.kind: x\nid: 2",
    json!({"items": [{"id": "1", "meta": {"kind": "x"}}, {"id": "2"}]})
)]
fn complex_arrays(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode(input), expected);
}

#[rstest]
fn nested_scopes_take_part_in_first_key_check() {
    let input = "\
[rows]
[.cells]
* 1
[]
[.cells]
* 2
[]
";
    assert_eq!(
        decode(input),
        json!({"rows": [{"cells": ["1"]}, {"cells": ["2"]}]})
    );
}

#[rstest]
fn nested_array_inside_complex_element() {
    let input = "\
[items]
name: a
[.tags]
* x
* y
[]
color: red
name: b
";
    assert_eq!(
        decode(input),
        json!({"items": [
            {"name": "a", "tags": ["x", "y"], "color": "red"},
            {"name": "b"}
        ]})
    );
}

#[rstest]
#[case(
    "[+blocks]\ntext: hello\nimage: pic.png\n",
    json!({"blocks": [
        {"type": "text", "value": "hello"},
        {"type": "image", "value": "pic.png"}
    ]})
)]
#[case(
    "[+blocks]\ntext: a\ntext: b",
    json!({"blocks": [
        {"type": "text", "value": "a"},
        {"type": "text", "value": "b"}
    ]})
)]
#[case(
    "[+blocks]\nJust prose\n\ncode: x = 1",
    json!({"blocks": [
        {"type": "text", "value": "Just prose"},
        {"type": "code", "value": "x = 1"}
    ]})
)]
#[case(
    "[+blocks]\nsource.path: a.rs",
    json!({"blocks": [{"type": "source.path", "value": "a.rs"}]})
)]
#[case(
    "[+blocks]\n* star stays text",
    json!({"blocks": [{"type": "text", "value": "* star stays text"}]})
)]
#[case(
    "[+blocks]\ncode: line one\n  line two\n",
    json!({"blocks": [
        {"type": "code", "value": "line one"},
        {"type": "text", "value": "line two"}
    ]})
)]
#[case(
    "[+blocks]\ncode:'''\n  line one\n  line two\n'''\n",
    json!({"blocks": [{"type": "code", "value": "  line one\n  line two"}]})
)]
fn freeform_arrays(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode(input), expected);
}

#[rstest]
fn freeform_nested_scopes_become_typed_elements() {
    let input = "\
[+blocks]
text: intro
[.list]
* a
[]
{.meta}
author: me
{}
";
    assert_eq!(
        decode(input),
        json!({"blocks": [
            {"type": "text", "value": "intro"},
            {"type": "list", "value": ["a"]},
            {"type": "meta", "value": {"author": "me"}}
        ]})
    );
}

#[rstest]
fn rerooting_leaves_freeform_rules_behind() {
    let input = "[+blocks]\ntext: a\n[plain]\nname: b\n";
    assert_eq!(
        decode(input),
        json!({
            "blocks": [{"type": "text", "value": "a"}],
            "plain": [{"name": "b"}]
        })
    );
}
