#![allow(non_snake_case)]

use super::*;

#[test]
fn default_directive___counts_verbose_flags() {
    assert_eq!(default_directive(0), "warn");
    assert_eq!(default_directive(1), "info");
    assert_eq!(default_directive(2), "debug");
    assert_eq!(default_directive(3), "trace");
    assert_eq!(default_directive(9), "trace");
}

#[test]
fn default_directive___parses_as_filter() {
    for verbosity in 0..4 {
        assert!(EnvFilter::try_new(default_directive(verbosity)).is_ok());
    }
}

#[test]
fn init___twice___does_not_panic() {
    init(0);
    init(2);
}
