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

//! Name-keyed macro collection
//!
//! Macros are identified by name alone, so the library is where uniqueness
//! is enforced: `insert` rejects a name that is already present. Data loaded
//! in bulk from a save file is accepted as-is and duplicate names are
//! flagged for the caller to report instead.
//!
//! Insertion order is preserved so a library saved and reloaded keeps its
//! line order.

use thiserror::Error;

use crate::core::types::Macro;

/// Errors raised by library operations.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum LibraryError {
    /// Insert would create a second macro with the same name.
    #[error("a macro named '{0}' already exists")]
    DuplicateName(String),

    /// Lookup or removal target does not exist.
    #[error("no macro named '{0}'")]
    UnknownName(String),
}

/// An ordered collection of macros keyed by name.
#[derive(Debug, Default)]
pub struct MacroLibrary {
    macros: Vec<Macro>,
}

impl MacroLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self { macros: Vec::new() }
    }

    /// Wraps macros loaded in bulk, keeping whatever the source held.
    ///
    /// Duplicate names are not rejected here; use [`duplicate_names`] to
    /// surface them.
    ///
    /// [`duplicate_names`]: MacroLibrary::duplicate_names
    pub fn from_macros(macros: Vec<Macro>) -> Self {
        Self { macros }
    }

    /// Adds a macro, rejecting a duplicate name.
    pub fn insert(&mut self, macro_: Macro) -> Result<(), LibraryError> {
        if self.get(macro_.name()).is_some() {
            return Err(LibraryError::DuplicateName(macro_.name().to_string()));
        }
        self.macros.push(macro_);
        Ok(())
    }

    /// Looks a macro up by name. First match wins.
    pub fn get(&self, name: &str) -> Option<&Macro> {
        self.macros.iter().find(|m| m.name() == name)
    }

    /// Removes every macro with the given name.
    pub fn remove(&mut self, name: &str) -> Result<(), LibraryError> {
        let before = self.macros.len();
        self.macros.retain(|m| m.name() != name);

        if self.macros.len() == before {
            return Err(LibraryError::UnknownName(name.to_string()));
        }
        Ok(())
    }

    /// Names used by more than one macro, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut duplicates = Vec::new();

        for (i, macro_) in self.macros.iter().enumerate() {
            let seen_before = self.macros[..i].iter().any(|m| m == macro_);
            let already_reported = duplicates.iter().any(|d| d == macro_.name());
            if seen_before && !already_reported {
                duplicates.push(macro_.name().to_string());
            }
        }

        duplicates
    }

    /// All macros in insertion order.
    pub fn macros(&self) -> &[Macro] {
        &self.macros
    }

    /// Number of macros held, duplicates included.
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Tells if the library holds no macros.
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}
