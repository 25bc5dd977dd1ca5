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

//! src/core/types.rs
//!
//! Core type definitions for macro management
//!
//! This module defines the fundamental types used throughout the application:
//! - `LogicalKey`: backend-independent key identities
//! - The special-key table mapping one-character mnemonics to logical keys
//! - `Macro`: a named, validated definition string
//!
//! A `Macro` can only be built through `Macro::new`, which runs the grammar
//! validator. Any `Macro` that exists therefore holds a valid definition for
//! its whole lifetime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::core::validator::{self, ValidationError};

/// A key identity independent of any injection backend.
///
/// Letters and digits are carried as `Char` with the uppercase codepoint:
/// the key-code space is keyed by the uppercase letter identity even when
/// shift is not requested.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum LogicalKey {
    /// Super/Windows/Meta key
    Meta,
    /// Enter/Return key
    Enter,
    /// Literal backslash key
    Backslash,
    /// Space bar
    Space,
    /// Letter or digit key, identified by its uppercase codepoint
    Char(char),
}

impl fmt::Display for LogicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalKey::Meta => write!(f, "META"),
            LogicalKey::Enter => write!(f, "ENTER"),
            LogicalKey::Backslash => write!(f, "BACKSLASH"),
            LogicalKey::Space => write!(f, "SPACE"),
            LogicalKey::Char(c) => write!(f, "{}", c),
        }
    }
}

/// Special-key table: one-character mnemonic → logical key.
///
/// The set is fixed at build time. Every mnemonic the escape grammar accepts
/// must appear here; absence is a normal "not found" consumed by the scanner.
const SPECIAL_KEYS: &[(char, LogicalKey)] = &[
    ('W', LogicalKey::Meta),
    ('E', LogicalKey::Enter),
    ('\\', LogicalKey::Backslash),
];

/// Resolves a special-key mnemonic against the table.
pub fn resolve_special(mnemonic: char) -> Option<LogicalKey> {
    SPECIAL_KEYS
        .iter()
        .find(|(m, _)| *m == mnemonic)
        .map(|(_, key)| *key)
}

/// Errors raised when constructing a [`Macro`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MacroError {
    /// Macro name missing at construction time.
    #[error("macro name must not be empty")]
    EmptyName,

    /// Macro definition missing at construction time.
    #[error("macro definition must not be empty")]
    EmptyDefinition,

    /// Definition failed grammar validation.
    #[error(transparent)]
    InvalidDefinition(#[from] ValidationError),
}

/// A named keyboard macro.
///
/// The definition string is validated on construction and immutable after,
/// so holding a `Macro` is proof the definition satisfies the grammar.
///
/// # Identity
/// Two macros are the same entity if and only if their names match; the
/// definition is not part of identity. "Switch active macro by name" and
/// duplicate detection both rely on this. Uniqueness across a collection is
/// enforced by [`MacroLibrary`](crate::core::library::MacroLibrary), not
/// here.
#[derive(Clone, Debug, Serialize)]
pub struct Macro {
    /// Name chosen by the caller, never empty
    name: String,

    /// The raw textual program, guaranteed valid by construction
    definition: String,
}

impl Macro {
    /// Builds a macro from a name and a raw definition string.
    ///
    /// Construction is atomic: either a fully valid `Macro` is returned or
    /// nothing is.
    ///
    /// # Errors
    ///
    /// Returns `MacroError::EmptyName` or `MacroError::EmptyDefinition` for
    /// blank input, and `MacroError::InvalidDefinition` when the definition
    /// fails the grammar.
    ///
    /// # Example
    ///
    /// ```
    /// use macro_replay::core::types::Macro;
    ///
    /// let greet = Macro::new("greet", "<hi>$250$\\E")?;
    /// assert_eq!(greet.name(), "greet");
    /// # Ok::<(), macro_replay::core::types::MacroError>(())
    /// ```
    pub fn new(name: &str, definition: &str) -> Result<Self, MacroError> {
        if name.is_empty() {
            return Err(MacroError::EmptyName);
        }
        if definition.is_empty() {
            return Err(MacroError::EmptyDefinition);
        }

        validator::validate(definition)?;

        Ok(Self {
            name: name.to_string(),
            definition: definition.to_string(),
        })
    }

    /// The macro's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validated definition string.
    pub fn definition(&self) -> &str {
        &self.definition
    }
}

impl PartialEq for Macro {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Macro {}

impl Hash for Macro {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Macro {
    /// Canonical one-line form used by the save file: `NAME,DEFINITION`.
    ///
    /// Commas are not escaped; a name containing one corrupts round-tripping
    /// (known format limitation).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.name, self.definition)
    }
}
