use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Session
// =========================================================================

#[test]
#[serial]
fn given_empty_scoped_fields_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _fields = EnvGuard::set("AC_SESSION_ACTOR_SCOPED_FIELDS", "");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_duplicate_scoped_fields_when_validate_then_error_names_field() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _fields = EnvGuard::set("AC_SESSION_ACTOR_SCOPED_FIELDS", "inbox,inbox");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    assert_that!(result.unwrap_err().to_string(), contains_substring("inbox"));
}

#[test]
#[serial]
fn given_current_actor_field_in_scoped_fields_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _fields = EnvGuard::set("AC_SESSION_ACTOR_SCOPED_FIELDS", "currentActor,inbox");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_empty_current_actor_field_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _field = EnvGuard::set("AC_SESSION_CURRENT_ACTOR_FIELD", "  ");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_refetch_enabled_without_root_fields_when_validate_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[session]\nrefetch_root_fields = []\n",
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_refetch_disabled_without_root_fields_when_validate_then_ok() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[session]\nrefetch_enabled = false\nrefetch_root_fields = []\n",
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
}
