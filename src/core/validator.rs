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

//! Definition-string grammar validation
//!
//! Accepts or rejects a raw definition before it is stored or replayed.
//! Validation is a pure function over the input string: one scan, first
//! error wins, nothing accumulated. Shift legality is not a grammar
//! concern: the markers are plain characters here and only the replay
//! interpreter tracks their state.

use thiserror::Error;

use crate::core::scanner;

/// Grammar errors, each citing the offending 1-based character position
/// where one is determinable.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    /// Empty or missing definition. Distinct from grammar errors.
    #[error("macro definition is empty")]
    Empty,

    /// Backslash followed by a character the special-key table does not
    /// resolve. The position is the unresolved character's.
    #[error("character at position {position} is an invalid special character")]
    UnknownSpecialKey { mnemonic: char, position: usize },

    /// Backslash at the end of the string, with no character after it.
    #[error("special marker at position {position} is missing a key character")]
    DanglingSpecialMarker { position: usize },

    /// Delay body does not parse as a base-10 integer.
    #[error("delay amount near position {position} is invalid")]
    BadDelay { position: usize },

    /// Closing delay marker never found, or the scan ceiling was hit first.
    #[error("delay starting at position {position} has no closing marker")]
    UnterminatedDelay { position: usize },

    /// Character that is neither plain nor the start of a special or delay
    /// sequence.
    #[error("character '{character}' at position {position} is unsupported")]
    UnsupportedChar { character: char, position: usize },
}

impl ValidationError {
    /// The 1-based character position the error refers to, when one exists.
    pub fn position(&self) -> Option<usize> {
        match self {
            ValidationError::Empty => None,
            ValidationError::UnknownSpecialKey { position, .. }
            | ValidationError::DanglingSpecialMarker { position }
            | ValidationError::BadDelay { position }
            | ValidationError::UnterminatedDelay { position }
            | ValidationError::UnsupportedChar { position, .. } => Some(*position),
        }
    }
}

/// Validates a raw definition string against the macro grammar.
///
/// # Example
///
/// ```
/// use macro_replay::core::validator::validate;
///
/// assert!(validate("abc <de>$100$\\E").is_ok());
/// assert!(validate("ABC").is_err());
/// ```
pub fn validate(definition: &str) -> Result<(), ValidationError> {
    scanner::tokenize(definition).map(|_| ())
}
