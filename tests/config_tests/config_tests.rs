//! Tests for Config
//!
//! These tests verify:
//! - Daemon address parsing (unix and TCP forms)
//! - Builder defaults and overrides
//! - Reading the address from the environment

use std::path::PathBuf;
use std::sync::Mutex;

use rrdcached::config::{Config, Target, ADDRESS_ENV, DEFAULT_PORT, DEFAULT_SOCKET};
use rrdcached::protocol::MAX_RESPONSE_SIZE;
use rrdcached::RrdError;

/// Serializes tests that touch the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

// =============================================================================
// Address Parsing Tests
// =============================================================================

#[test]
fn test_parse_unix_prefix() {
    assert_eq!(
        Target::parse("unix:/var/run/rrdcached.sock").unwrap(),
        Target::Unix(PathBuf::from("/var/run/rrdcached.sock"))
    );
}

#[test]
fn test_parse_absolute_path() {
    assert_eq!(
        Target::parse("/tmp/rrdcached.sock").unwrap(),
        Target::unix("/tmp/rrdcached.sock")
    );
}

#[test]
fn test_parse_relative_path() {
    assert_eq!(
        Target::parse("./rrdcached.sock").unwrap(),
        Target::unix("./rrdcached.sock")
    );
    assert_eq!(
        Target::parse("run/rrdcached.sock").unwrap(),
        Target::unix("run/rrdcached.sock")
    );
    assert_eq!(
        Target::parse("unix:run/rrdcached.sock").unwrap(),
        Target::unix("run/rrdcached.sock")
    );
}

#[test]
fn test_parse_host_and_port() {
    assert_eq!(
        Target::parse("127.0.0.1:4242").unwrap(),
        Target::tcp("127.0.0.1", 4242)
    );
}

#[test]
fn test_parse_bare_host_uses_default_port() {
    assert_eq!(
        Target::parse("rrd.example.com").unwrap(),
        Target::tcp("rrd.example.com", DEFAULT_PORT)
    );
}

#[test]
fn test_parse_ipv6() {
    assert_eq!(Target::parse("[::1]:4242").unwrap(), Target::tcp("::1", 4242));
    assert_eq!(Target::parse("[::1]").unwrap(), Target::tcp("::1", DEFAULT_PORT));
    assert_eq!(Target::parse("::1").unwrap(), Target::tcp("::1", DEFAULT_PORT));
}

#[test]
fn test_parse_rejects_bad_addresses() {
    for address in ["", "   ", "unix:", "host:notaport", "host:70000", ":42", "[::1", "[::1]x"] {
        let err = Target::parse(address).unwrap_err();
        assert!(matches!(err, RrdError::Config(_)), "{:?}", address);
    }
}

#[test]
fn test_display_round_trips() {
    for address in ["unix:/tmp/a.sock", "localhost:42217", "[::1]:9000"] {
        let target = Target::parse(address).unwrap();
        assert_eq!(target.to_string(), address);
        assert_eq!(Target::parse(&target.to_string()).unwrap(), target);
    }
}

// =============================================================================
// Builder Tests
// =============================================================================

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.target, Target::unix(DEFAULT_SOCKET));
    assert_eq!(config.read_timeout_ms, 0);
    assert_eq!(config.write_timeout_ms, 0);
    assert_eq!(config.connect_timeout_ms, 0);
    assert_eq!(config.max_response_size, MAX_RESPONSE_SIZE);
}

#[test]
fn test_builder_overrides() {
    let config = Config::builder()
        .tcp("10.0.0.1", 1234)
        .read_timeout_ms(500)
        .write_timeout_ms(600)
        .connect_timeout_ms(700)
        .max_response_size(4096)
        .build();

    assert_eq!(config.target, Target::tcp("10.0.0.1", 1234));
    assert_eq!(config.read_timeout_ms, 500);
    assert_eq!(config.write_timeout_ms, 600);
    assert_eq!(config.connect_timeout_ms, 700);
    assert_eq!(config.max_response_size, 4096);
}

#[test]
fn test_builder_unix_socket() {
    let config = Config::builder().unix_socket("/run/rrd.sock").build();
    assert_eq!(config.target, Target::unix("/run/rrd.sock"));
}

#[test]
fn test_new_keeps_other_defaults() {
    let config = Config::new(Target::tcp("localhost", 1));
    assert_eq!(config.target, Target::tcp("localhost", 1));
    assert_eq!(config.max_response_size, Config::default().max_response_size);
}

// =============================================================================
// Environment Tests
// =============================================================================

#[test]
fn test_from_env_unset_uses_default_socket() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var(ADDRESS_ENV);

    let config = Config::from_env().unwrap();
    assert_eq!(config.target, Target::unix(DEFAULT_SOCKET));
    assert_eq!(config.max_response_size, MAX_RESPONSE_SIZE);
}

#[test]
fn test_from_env_parses_address() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    std::env::set_var(ADDRESS_ENV, "rrd.example.com:4242");
    let tcp = Config::from_env();
    std::env::set_var(ADDRESS_ENV, "./rrdcached.sock");
    let unix = Config::from_env();
    std::env::set_var(ADDRESS_ENV, "host:notaport");
    let bad = Config::from_env();
    std::env::remove_var(ADDRESS_ENV);

    assert_eq!(tcp.unwrap().target, Target::tcp("rrd.example.com", 4242));
    assert_eq!(unix.unwrap().target, Target::unix("./rrdcached.sock"));
    assert!(matches!(bad, Err(RrdError::Config(_))));
}
