//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Scanner tests (token boundaries and positions)
//! - Grammar validation tests
//! - Macro entity tests
//! - Library tests

#[cfg(test)]
mod library_tests;
#[cfg(test)]
mod validator_tests;
