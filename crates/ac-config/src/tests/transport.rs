use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Transport
// =========================================================================

#[test]
#[serial]
fn given_non_http_endpoint_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _endpoint = EnvGuard::set("AC_TRANSPORT_ENDPOINT", "ftp://example.org/api");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_timeout_zero_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _timeout = EnvGuard::set("AC_TRANSPORT_TIMEOUT_SECS", "0");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_timeout_over_max_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _timeout = EnvGuard::set("AC_TRANSPORT_TIMEOUT_SECS", "301");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_https_endpoint_and_max_timeout_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _endpoint = EnvGuard::set("AC_TRANSPORT_ENDPOINT", "https://events.example/api");
    let _timeout = EnvGuard::set("AC_TRANSPORT_TIMEOUT_SECS", "300");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
}
