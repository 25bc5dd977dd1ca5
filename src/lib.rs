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

//! Keyboard Macro Manager
//!
//! A keyboard macro manager with a compact definition language, strict
//! validation, file persistence, and OS-level replay.
//!
//! # The definition language
//!
//! A macro is a short string of keystroke instructions:
//!
//! - Digits `0`-`9`, lowercase letters `a`-`z`, and spaces are pressed as
//!   written (`aab` presses a, a, b)
//! - `<` holds shift and `>` releases it; the state is sticky across every
//!   token in between (`<a>` presses shift+a)
//! - `\` plus a mnemonic presses a named key: `\E` Enter, `\W` the
//!   Windows/Meta key, `\\` a literal backslash
//! - `$N$` pauses the replay for N milliseconds (`a$50$a` presses a, waits
//!   50 ms, presses a again)
//!
//! # Features
//!
//! - **Strict Validation:** Malformed definitions are rejected with the
//!   offending character position before they are stored or run
//! - **Validated Entities:** A [`Macro`](crate::core::types::Macro) cannot
//!   exist without a grammatically valid definition
//! - **Name-Keyed Library:** Duplicate detection and switch-by-name lookup
//! - **Safe Persistence:** Atomic file writes with timestamped backups
//! - **Fire-and-Forget Replay:** Runs execute on their own thread; embedded
//!   delays never stall the caller
//! - **Dry Runs:** Replay into a printing sink instead of the OS injector
//!
//! # Architecture
//!
//! - **`core`:** Business logic (types, scanner, validator, library)
//! - **`store`:** Save-file operations (reading, writing, backups)
//! - **`replay`:** Interpreter and key-action sinks
//!
//! # Examples
//!
//! ## Validating and building a macro
//!
//! ```
//! use macro_replay::core::types::Macro;
//!
//! let greet = Macro::new("greet", "<hi>$250$\\E")?;
//! assert_eq!(greet.to_string(), "greet,<hi>$250$\\E");
//! # Ok::<(), macro_replay::core::types::MacroError>(())
//! ```
//!
//! ## Replaying against the OS input layer
//!
//! ```no_run
//! use macro_replay::core::types::Macro;
//! use macro_replay::replay::{self, EnigoSink};
//!
//! let greet = Macro::new("greet", "hi\\E")?;
//!
//! // Returns immediately; the run proceeds on its own thread, which opens
//! // the injection backend itself.
//! let handle = replay::spawn(&greet, EnigoSink::new);
//! # handle.join().ok();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Persisting a library
//!
//! ```no_run
//! use macro_replay::core::types::Macro;
//! use macro_replay::store::MacroStore;
//! use std::path::PathBuf;
//!
//! let store = MacroStore::open(PathBuf::from("macros.txt"))?;
//! store.save(&[Macro::new("greet", "hi\\E")?])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod replay;
pub mod store;

// Re-export commonly used types for convenience
pub use crate::core::{LogicalKey, Macro, MacroError, MacroLibrary};
