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

//! Key-action sinks
//!
//! The interpreter walks a definition and pushes key actions into a sink.
//! `EnigoSink` injects real events through the OS input layer; `TraceSink`
//! prints the actions instead, for dry runs. Everything the replay does to
//! the outside world goes through this trait.

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use std::time::Duration;
use thiserror::Error;

use crate::core::types::LogicalKey;

/// Errors raised by a sink while performing an action.
#[derive(Debug, Error)]
pub enum SinkError {
    /// No injection backend could be opened on this system.
    #[error("key injection unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected an injected event.
    #[error("key injection failed: {0}")]
    Injection(String),
}

/// Receives the ordered key actions produced by a replay.
pub trait KeySink {
    /// Presses and releases a key.
    fn tap(&mut self, key: LogicalKey) -> Result<(), SinkError>;

    /// Presses and releases a key while shift is held.
    fn tap_with_shift(&mut self, key: LogicalKey) -> Result<(), SinkError>;

    /// Pauses the run for the given duration.
    fn wait(&mut self, duration: Duration) -> Result<(), SinkError>;
}

/// Injects real input events through the OS input layer.
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    /// Opens the platform injection backend.
    pub fn new() -> Result<Self, SinkError> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| SinkError::Unavailable(e.to_string()))?;

        Ok(Self { enigo })
    }

    fn press(&mut self, key: Key, direction: Direction) -> Result<(), SinkError> {
        self.enigo
            .key(key, direction)
            .map_err(|e| SinkError::Injection(e.to_string()))
    }
}

/// Maps a logical key onto the injection backend's key space.
///
/// Letter keys are carried as uppercase identities but injected through
/// their unshifted codepoint; whether shift is held is the caller's call.
fn backend_key(key: LogicalKey) -> Key {
    match key {
        LogicalKey::Meta => Key::Meta,
        LogicalKey::Enter => Key::Return,
        LogicalKey::Backslash => Key::Unicode('\\'),
        LogicalKey::Space => Key::Space,
        LogicalKey::Char(c) => Key::Unicode(c.to_ascii_lowercase()),
    }
}

impl KeySink for EnigoSink {
    fn tap(&mut self, key: LogicalKey) -> Result<(), SinkError> {
        self.press(backend_key(key), Direction::Click)
    }

    fn tap_with_shift(&mut self, key: LogicalKey) -> Result<(), SinkError> {
        self.press(Key::Shift, Direction::Press)?;
        let tapped = self.press(backend_key(key), Direction::Click);
        // Release shift even when the tap itself failed.
        let released = self.press(Key::Shift, Direction::Release);

        tapped.and(released)
    }

    fn wait(&mut self, duration: Duration) -> Result<(), SinkError> {
        std::thread::sleep(duration);
        Ok(())
    }
}

/// Prints each action to stdout instead of injecting it. Dry-run mode.
pub struct TraceSink;

impl KeySink for TraceSink {
    fn tap(&mut self, key: LogicalKey) -> Result<(), SinkError> {
        println!("tap {}", key);
        Ok(())
    }

    fn tap_with_shift(&mut self, key: LogicalKey) -> Result<(), SinkError> {
        println!("tap SHIFT+{}", key);
        Ok(())
    }

    fn wait(&mut self, duration: Duration) -> Result<(), SinkError> {
        println!("wait {}ms", duration.as_millis());
        Ok(())
    }
}
