// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::core::scanner::DELAY_SCAN_CEILING;
use crate::core::validator::{validate, ValidationError};

#[test]
fn test_plain_strings_always_validate() {
    assert!(validate("abc").is_ok());
    assert!(validate("0123456789").is_ok());
    assert!(validate("hello world").is_ok());
    assert!(validate("<>").is_ok());
    assert!(validate("<<>>").is_ok()); // shift legality is not a grammar concern
    assert!(validate(" ").is_ok());
}

#[test]
fn test_wire_format_examples() {
    assert!(validate("aab").is_ok());
    assert!(validate("a$50$a").is_ok());
    assert!(validate("<a>").is_ok());
    assert!(validate("\\E").is_ok());
    assert!(validate("\\W").is_ok());
}

#[test]
fn test_special_sequences_validate() {
    assert!(validate("\\W\\E\\\\").is_ok());
    assert!(validate("a\\Eb").is_ok());
}

#[test]
fn test_unmapped_special_fails_with_position() {
    let err = validate("\\X").unwrap_err();
    assert!(matches!(err, ValidationError::UnknownSpecialKey { mnemonic: 'X', .. }));
    assert_eq!(err.position(), Some(2));
}

#[test]
fn test_trailing_backslash_fails_with_its_own_position() {
    let err = validate("ab\\").unwrap_err();
    assert!(matches!(err, ValidationError::DanglingSpecialMarker { .. }));
    assert_eq!(err.position(), Some(3));
}

#[test]
fn test_empty_definition_is_a_distinct_error() {
    let err = validate("").unwrap_err();
    assert_eq!(err, ValidationError::Empty);
    assert_eq!(err.position(), None);
}

#[test]
fn test_well_formed_delays_validate() {
    assert!(validate("$0$").is_ok());
    assert!(validate("$1000$").is_ok());
    assert!(validate("a$100$b").is_ok());
}

#[test]
fn test_signed_delays_validate() {
    // The grammar only requires the body to parse as a base-10 integer.
    assert!(validate("$-5$").is_ok());
    assert!(validate("$+25$").is_ok());
}

#[test]
fn test_malformed_delays_fail() {
    assert!(validate("$").is_err());
    assert!(validate("$50").is_err());
    assert!(validate("$$").is_err());
    assert!(validate("$5a$").is_err());
    assert!(validate("$ 5$").is_err());
}

#[test]
fn test_delay_error_cites_the_opening_marker() {
    let err = validate("ab$5x$").unwrap_err();
    assert_eq!(err.position(), Some(3));
}

#[test]
fn test_scan_ceiling_rejects_even_when_terminator_exists() {
    let definition = format!("${}$", "9".repeat(DELAY_SCAN_CEILING + 1));
    let err = validate(&definition).unwrap_err();
    assert!(matches!(err, ValidationError::UnterminatedDelay { .. }));
}

#[test]
fn test_unsupported_characters_fail_with_position() {
    let err = validate("ab!").unwrap_err();
    assert!(matches!(err, ValidationError::UnsupportedChar { character: '!', .. }));
    assert_eq!(err.position(), Some(3));

    assert!(validate("ABC").is_err()); // uppercase letters are not plain
    assert!(validate("a,b").is_err()); // commas never appear in valid definitions
    assert!(validate("a\tb").is_err());
}

#[test]
fn test_first_error_wins() {
    // Both the '!' and the dangling backslash are wrong; only the first is
    // reported.
    let err = validate("a!c\\").unwrap_err();
    assert_eq!(err.position(), Some(2));
}
