use std::io::{self, BufReader, Read};

use peml::constants::MAX_DEPTH;
use peml::ErrorKind;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("a: 1\nbody:\"\"\"\ntext", ErrorKind::UnterminatedQuote, 2)]
#[case("[items]\nname: a\ncontent:~~~\n~~~~", ErrorKind::UnterminatedQuote, 3)]
#[case("[]", ErrorKind::UnbalancedScopeClose, 1)]
#[case("{a}\n{}\n{}", ErrorKind::UnbalancedScopeClose, 3)]
#[case("k: v\n[tags]\n* a\n[]\n[]", ErrorKind::UnbalancedScopeClose, 5)]
#[case(":endless", ErrorKind::UnknownDirective, 1)]
#[case("k: v\n:bogus words", ErrorKind::UnknownDirective, 2)]
#[case(":end2\nk: v", ErrorKind::UnknownDirective, 1)]
#[case("k: v\n:skip-this", ErrorKind::UnknownDirective, 2)]
fn parse_errors_carry_kind_and_line(
    #[case] input: &str,
    #[case] kind: ErrorKind,
    #[case] line: usize,
) {
    let err = peml::loads(input).expect_err("expected a parse error");
    assert_eq!(err.kind(), kind);
    assert_eq!(err.location.map(|loc| loc.line), Some(line));
    assert!(err.to_string().ends_with(&format!(" at line {line}")));
}

#[rstest]
fn scope_depth_is_limited() {
    let mut lines = vec!["{a}"];
    lines.extend(std::iter::repeat("{.a}").take(MAX_DEPTH));
    let err = peml::load(lines).expect_err("expected depth error");
    assert_eq!(err.kind(), ErrorKind::DepthLimit);
    assert_eq!(err.location.map(|loc| loc.line), Some(MAX_DEPTH + 1));

    let mut lines = vec!["{a}"];
    lines.extend(std::iter::repeat("{.a}").take(MAX_DEPTH - 1));
    assert!(peml::load(lines).is_ok());
}

#[rstest]
fn dotted_scope_name_depth_is_limited() {
    let name = vec!["s"; MAX_DEPTH + 2].join(".");
    let err = peml::loads(&format!("{{{name}}}")).expect_err("expected depth error");
    assert_eq!(err.kind(), ErrorKind::DepthLimit);
}

#[rstest]
fn stacked_dotted_scopes_hit_the_tree_depth_limit() {
    let name = vec!["k"; MAX_DEPTH - 1].join(".");
    let mut input = String::from("{root}\n");
    for _ in 0..60 {
        input.push_str(&format!("{{.{name}}}\n"));
    }
    input.push_str("leaf: v\n");

    let err = peml::loads(&input).expect_err("expected depth error");
    assert_eq!(err.kind(), ErrorKind::DepthLimit);
    assert_eq!(err.location.map(|loc| loc.line), Some(3));
}

#[rstest]
fn keys_under_a_full_depth_scope_hit_the_limit() {
    let mut lines = vec!["{a}".to_string()];
    lines.extend((1..MAX_DEPTH).map(|_| "{.a}".to_string()));
    lines.push("k: v".to_string());
    let err = peml::load(&lines).expect_err("expected depth error");
    assert_eq!(err.kind(), ErrorKind::DepthLimit);
    assert_eq!(err.location.map(|loc| loc.line), Some(MAX_DEPTH + 1));
}

#[rstest]
#[case("bad key: x")]
#[case("[not closed")]
#[case(": lonely colon")]
#[case(":-)")]
fn permissive_fallbacks_are_not_errors(#[case] input: &str) {
    assert_eq!(peml::loads(input).expect("permissive input"), json!({}));
}

#[rstest]
fn validate_reports_first_error() {
    assert!(peml::validate_str("k: v\n{meta}\n{}").is_ok());
    let err = peml::validate_str("k: v\n{}\n{}").expect_err("expected error");
    assert_eq!(err.kind(), ErrorKind::UnbalancedScopeClose);
    assert_eq!(err.location.map(|loc| loc.line), Some(2));
}

#[rstest]
fn deserialize_mismatch_is_reported() {
    let err = peml::from_str::<Vec<String>>("k: v").expect_err("expected error");
    assert_eq!(err.kind(), ErrorKind::Deserialize);
    assert!(err.location.is_none());
}

#[rstest]
fn invalid_utf8_is_reported() {
    let err = peml::from_slice::<serde_json::Value>(b"k: \xff").expect_err("expected error");
    assert_eq!(err.kind(), ErrorKind::Utf8);
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
    }
}

#[rstest]
fn reader_failures_surface_as_io_errors() {
    let err = peml::load_reader(BufReader::new(FailingReader)).expect_err("expected io error");
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.message.contains("disk on fire"));
}
