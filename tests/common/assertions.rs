//! Custom assertion macros
//!
//! Shorthand for the result and gate-decision checks the integration tests
//! repeat.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a result is an error, optionally of a given shape
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        assert!($result.is_err(), "Expected Err, got Ok");
    };
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that the gate sent the user to the login route, replacing history
#[macro_export]
macro_rules! assert_redirects_to_login {
    ($decision:expr) => {
        match $decision {
            socialfeed::client::GateDecision::Redirect { to, replace } => {
                assert_eq!(to, "/login");
                assert!(replace, "redirect must replace the refused route");
            }
            other => panic!("Expected redirect to /login, got {:?}", other),
        }
    };
}
