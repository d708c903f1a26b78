use rstest::rstest;
use serde_json::{json, Value};

fn decode(input: &str) -> Value {
    peml::loads(input).unwrap_or_else(|err| panic!("decode failed: {err}"))
}

#[rstest]
#[case("key: a\n:end\ntrailing text\nnext: b", json!({"key": "a", "next": "b"}))]
#[case("key: a\n  more\n:end\n  lost", json!({"key": "a\n  more"}))]
#[case("key: a\n:END of story\nb", json!({"key": "a"}))]
#[case("key: a\n: end\nb", json!({"key": "a"}))]
#[case("[tags]\n* a\n:end\n  not part of a\n* b", json!({"tags": ["a", "b"]}))]
fn end_directive(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode(input), expected);
}

#[rstest]
#[case(
    "key: a\n:skip\nhidden: x\n:endskip\nshown: y",
    json!({"key": "a", "shown": "y"})
)]
#[case(
    "key: a\n  kept\n:skip\n  dropped\n:endskip",
    json!({"key": "a\n  kept"})
)]
#[case(":skip\n[list]\n* a\n:endskip\nk: v", json!({"k": "v"}))]
#[case(":skip\n:skip\nx: 1\n:endskip\ny: 2", json!({"y": "2"}))]
#[case(":skip\nx: 1\n:end\nz: 3\n:endskip\ny: 2", json!({"y": "2"}))]
#[case(":Skip\n:bogus\n:ENDSKIP\nk: v", json!({"k": "v"}))]
#[case(":skip\nnever: closed", json!({}))]
fn skip_regions(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode(input), expected);
}

#[rstest]
fn stray_endskip_discards_pending_text() {
    let input = "k: a\n  more\n:endskip\n  lost\nnext: b";
    assert_eq!(decode(input), json!({"k": "a", "next": "b"}));
}

#[rstest]
#[case(":ignore\nk: v", json!({}))]
#[case("k: a\n  more\n:ignore\nk2: b", json!({"k": "a\n  more"}))]
#[case(":skip\n:ignore\n:endskip\nk: v", json!({}))]
#[case("k: v\n:ignore\n[]\n:bogus\nbody:'''", json!({"k": "v"}))]
fn ignore_stops_reading(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode(input), expected);
}

#[rstest]
fn ignore_stops_line_iteration() {
    let lines = ["a: 1", ":ignore", "b: 2"];
    assert_eq!(peml::load(lines).expect("load"), json!({"a": "1"}));
}
