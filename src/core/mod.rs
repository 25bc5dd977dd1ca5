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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the fundamental data structures and algorithms for
//! macro management, including:
//! - Type definitions for logical keys and macros
//! - The definition-string scanner and grammar validator
//! - The name-keyed macro library with duplicate detection
//!
//! All business logic is isolated from I/O and injection concerns to enable
//! comprehensive unit testing without touching the OS input layer.

pub mod library;
pub mod scanner;
pub mod types;
pub mod validator;

pub use library::{LibraryError, MacroLibrary};
pub use types::*;
pub use validator::{validate, ValidationError};

#[cfg(test)]
mod tests;
