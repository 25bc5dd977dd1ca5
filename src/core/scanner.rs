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

//! Definition-string scanner
//!
//! Splits a definition into tokens in a single left-to-right, char-class
//! driven pass with no backtracking. Both the grammar validator and the
//! replay interpreter go through this scan, so the token boundaries the
//! validator accepted are exactly the ones the interpreter replays.
//!
//! Positions are 1-based character positions, reported with every token and
//! carried inside every scan error.

use crate::core::types::{resolve_special, LogicalKey};
use crate::core::validator::ValidationError;

/// Enables the sticky shift state.
pub const SHIFT_ON: char = '<';
/// Disables the sticky shift state.
pub const SHIFT_OFF: char = '>';
/// Marks the start of a two-character special-key sequence.
pub const SPECIAL_MARKER: char = '\\';
/// Delimits a delay sequence on both sides.
pub const DELAY_MARKER: char = '$';

/// Longest run of characters the scanner will cross while looking for a
/// closing delay marker before treating the sequence as malformed, even if
/// a closing marker exists further out. Historical bound, kept literal for
/// behavioural compatibility; it guarantees termination on adversarial
/// input.
pub const DELAY_SCAN_CEILING: usize = 10_000;

/// One token of a definition string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token {
    /// Lowercase letter or digit, as written
    Key(char),
    /// Literal space
    Space,
    /// Shift-enable marker
    ShiftOn,
    /// Shift-disable marker
    ShiftOff,
    /// Resolved special-key sequence
    Special(LogicalKey),
    /// Delay in milliseconds, as parsed (the grammar accepts signs)
    Delay(i64),
}

/// Tells if a character is valid standalone, regardless of position or
/// modifier state: digit, lowercase letter, shift marker, or space.
pub fn is_plain_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase() || c == SHIFT_ON || c == SHIFT_OFF || c == ' '
}

/// Scans a definition into `(position, token)` pairs.
///
/// Stops at the first structural error. The position of a token is the
/// 1-based position of its first character; multi-character tokens advance
/// the scan by their full width.
pub fn tokenize(definition: &str) -> Result<Vec<(usize, Token)>, ValidationError> {
    if definition.is_empty() {
        return Err(ValidationError::Empty);
    }

    let chars: Vec<char> = definition.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let position = i + 1;
        let c = chars[i];

        if c == SPECIAL_MARKER {
            match chars.get(i + 1) {
                None => return Err(ValidationError::DanglingSpecialMarker { position }),
                Some(&mnemonic) => match resolve_special(mnemonic) {
                    Some(key) => {
                        tokens.push((position, Token::Special(key)));
                        i += 2;
                    }
                    None => {
                        return Err(ValidationError::UnknownSpecialKey {
                            mnemonic,
                            position: position + 1,
                        });
                    }
                },
            }
        } else if c == DELAY_MARKER {
            let (token, width) = scan_delay(&chars, i)?;
            tokens.push((position, token));
            i += width;
        } else if c == ' ' {
            tokens.push((position, Token::Space));
            i += 1;
        } else if c == SHIFT_ON {
            tokens.push((position, Token::ShiftOn));
            i += 1;
        } else if c == SHIFT_OFF {
            tokens.push((position, Token::ShiftOff));
            i += 1;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            tokens.push((position, Token::Key(c)));
            i += 1;
        } else {
            return Err(ValidationError::UnsupportedChar { character: c, position });
        }
    }

    Ok(tokens)
}

/// Scans a delay sequence starting at the opening marker.
///
/// Returns the token and the full width of the sequence including both
/// markers.
fn scan_delay(chars: &[char], start: usize) -> Result<(Token, usize), ValidationError> {
    let position = start + 1;
    let mut end = start + 1;
    let mut scanned = 0;

    loop {
        match chars.get(end) {
            Some(&DELAY_MARKER) => break,
            Some(_) => {
                end += 1;
                scanned += 1;
                if scanned > DELAY_SCAN_CEILING {
                    return Err(ValidationError::UnterminatedDelay { position });
                }
            }
            None => return Err(ValidationError::UnterminatedDelay { position }),
        }
    }

    let body: String = chars[start + 1..end].iter().collect();
    let millis = body
        .parse::<i64>()
        .map_err(|_| ValidationError::BadDelay { position })?;

    Ok((Token::Delay(millis), end - start + 1))
}
