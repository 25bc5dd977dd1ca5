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

//! Macro replay
//!
//! Walks a definition string front to back and feeds the resulting key
//! actions into a [`KeySink`], tracking one sticky shift flag across the
//! whole run. The flag flips on the `<`/`>` markers and persists across
//! every other token, delays and specials included.
//!
//! Runs are dispatched fire-and-forget via [`spawn`]: the caller is never
//! blocked by the timed pauses embedded in a definition. Nothing guards two
//! concurrently started runs from racing on the shared OS input layer
//! (known hazard, left to the caller).

pub mod sink;

pub use sink::{EnigoSink, KeySink, SinkError, TraceSink};

use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

use crate::core::scanner::{self, Token};
use crate::core::types::{LogicalKey, Macro};
use crate::core::validator::ValidationError;

/// Errors that abort a replay. None of them is retried.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The definition no longer scans. Macros are validated on
    /// construction, so hitting this means an invariant was broken
    /// upstream; it is surfaced loudly, never swallowed.
    #[error("definition failed to scan mid-run: {0}")]
    BrokenDefinition(#[from] ValidationError),

    /// A delay parsed as a negative number and cannot be slept.
    #[error("delay of {millis} ms at position {position} cannot be applied")]
    NegativeDelay { millis: i64, position: usize },

    /// The sink failed to perform an action.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Replays a definition into the given sink, front to back.
///
/// The definition is expected to have been validated at macro construction;
/// this pass re-derives the same token boundaries. Shift starts disabled.
///
/// # Example
///
/// ```
/// use macro_replay::core::types::Macro;
/// use macro_replay::replay::{self, TraceSink};
///
/// let demo = Macro::new("demo", "a$50$b")?;
/// replay::run(demo.definition(), &mut TraceSink)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn run(definition: &str, sink: &mut dyn KeySink) -> Result<(), ReplayError> {
    let tokens = scanner::tokenize(definition)?;
    let mut shift_active = false;

    for (position, token) in tokens {
        match token {
            Token::ShiftOn => shift_active = true,
            Token::ShiftOff => shift_active = false,
            Token::Delay(millis) => {
                let ms = u64::try_from(millis)
                    .map_err(|_| ReplayError::NegativeDelay { millis, position })?;
                sink.wait(Duration::from_millis(ms))?;
            }
            // Shift state does not affect the space bar.
            Token::Space => sink.tap(LogicalKey::Space)?,
            Token::Special(key) => tap(sink, key, shift_active)?,
            Token::Key(c) => tap(sink, LogicalKey::Char(c.to_ascii_uppercase()), shift_active)?,
        }
    }

    Ok(())
}

fn tap(sink: &mut dyn KeySink, key: LogicalKey, shift_active: bool) -> Result<(), ReplayError> {
    if shift_active {
        sink.tap_with_shift(key)?;
    } else {
        sink.tap(key)?;
    }

    Ok(())
}

/// Starts a replay on its own thread and returns immediately.
///
/// The sink is opened by the factory on the replay thread itself, since
/// injection backends are generally tied to the thread that opened them.
/// The caller does not wait for the run; the delays inside the definition
/// only stall the replay thread. An aborted run is reported on stderr
/// (there is no caller left to hand the error to) and never retried.
/// Dropping the handle is fine; joining it is only needed when the process
/// would otherwise exit before the run finishes.
pub fn spawn<S, F>(macro_: &Macro, make_sink: F) -> JoinHandle<()>
where
    S: KeySink,
    F: FnOnce() -> Result<S, SinkError> + Send + 'static,
{
    let name = macro_.name().to_string();
    let definition = macro_.definition().to_string();

    thread::spawn(move || {
        let result = match make_sink() {
            Ok(mut sink) => run(&definition, &mut sink),
            Err(e) => Err(ReplayError::Sink(e)),
        };

        if let Err(e) = result {
            eprintln!("✗ replay of '{}' aborted: {}", name, e);
        }
    })
}
