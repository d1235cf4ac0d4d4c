//! Response Tests
//!
//! Tests for status parsing and error classification.

use rrdcached::protocol::{classify_error, Response};
use rrdcached::RrdError;

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_success() {
    let resp = Response::parse("0 RRD created successfully (/tmp/foo.rrd)").unwrap();
    assert_eq!(resp.status, 0);
    assert_eq!(resp.message, "RRD created successfully (/tmp/foo.rrd)");
    assert!(resp.is_success());
    assert!(resp.into_result().is_ok());
}

#[test]
fn test_parse_trims_trailing_newline() {
    let resp = Response::parse("0 errors, enqueued 4 value(s).\n").unwrap();
    assert_eq!(resp.raw, "0 errors, enqueued 4 value(s).");
    assert_eq!(resp.message, "errors, enqueued 4 value(s).");
}

#[test]
fn test_parse_multi_line() {
    let raw = "2 updates pending\n1438354679:10:20\n1438354680:90:80\n";
    let resp = Response::parse(raw).unwrap();

    assert_eq!(resp.status, 2);
    assert_eq!(resp.message, "updates pending");
    assert_eq!(resp.raw.lines().count(), 3);
    assert_eq!(
        resp.lines().collect::<Vec<_>>(),
        vec!["1438354679:10:20", "1438354680:90:80"]
    );
}

#[test]
fn test_positive_status_is_not_an_error() {
    let resp = Response::parse("4 updates pending").unwrap();
    assert_eq!(resp.into_result().unwrap().status, 4);
}

#[test]
fn test_parse_status_only() {
    let resp = Response::parse("0\n").unwrap();
    assert_eq!(resp.status, 0);
    assert_eq!(resp.message, "");
}

#[test]
fn test_unparseable_status_is_malformed() {
    for raw in ["garbage here", "", "\n", "one two"] {
        let err = Response::parse(raw).unwrap_err();
        assert!(matches!(err, RrdError::MalformedResponse(_)), "{:?}", raw);
    }
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_unknown_command() {
    let err = Response::parse("-1 Unknown command: FIRST")
        .unwrap()
        .into_result()
        .unwrap_err();
    match err {
        RrdError::UnknownCommand(msg) => assert_eq!(msg, "Unknown command: FIRST"),
        other => panic!("Expected UnknownCommand, got {:?}", other),
    }
}

#[test]
fn test_file_not_found() {
    let err = Response::parse("-1 No such file: /tmp/foo.rrd")
        .unwrap()
        .into_result()
        .unwrap_err();
    assert!(matches!(err, RrdError::FileNotFound(_)));
    assert_eq!(err.daemon_message(), Some("No such file: /tmp/foo.rrd"));
    assert!(!err.is_connection());
}

#[test]
fn test_unrecognized_argument_extracts_token() {
    let err = Response::parse("-1 Error while creating rrd (can't parse argument '-O')")
        .unwrap()
        .into_result()
        .unwrap_err();
    assert!(matches!(err, RrdError::UnrecognizedArgument { .. }));
    assert_eq!(err.bad_argument(), Some("-O"));
}

#[test]
fn test_unrecognized_argument_without_token() {
    let err = classify_error("can't parse argument");
    assert!(matches!(
        err,
        RrdError::UnrecognizedArgument { argument: None, .. }
    ));
    assert_eq!(err.bad_argument(), None);
}

#[test]
fn test_generic_protocol_error() {
    let err = classify_error("Cannot read/write file: Permission denied");
    match err {
        RrdError::Protocol(msg) => assert_eq!(msg, "Cannot read/write file: Permission denied"),
        other => panic!("Expected Protocol, got {:?}", other),
    }
}

#[test]
fn test_other_negative_status_is_error() {
    let err = Response::parse("-5 something odd").unwrap().into_result().unwrap_err();
    assert!(matches!(err, RrdError::Protocol(_)));
}

#[test]
fn test_prefix_match_is_anchored() {
    // "No such file" in the middle is not a file-not-found error
    let err = classify_error("error: No such file or directory");
    assert!(matches!(err, RrdError::Protocol(_)));
}

#[test]
fn test_bad_argument_only_for_unrecognized_argument() {
    assert_eq!(classify_error("Unknown command: X").bad_argument(), None);
}
