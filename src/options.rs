// Copyright 2023 Datafuse Labs.
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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use crate::error::Error;

/// Nesting depth accepted by the parser when no other limit is configured.
pub const DEFAULT_DEPTH_LIMIT: i32 = 100;

/// A single parser or formatter switch.
///
/// Only the first four flags change parsing. The remaining ones are carried
/// so that an option string shared with a formatter round-trips unchanged.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonOption {
    /// Accept `NaN`/`Infinity` literals and numbers that overflow to infinity.
    EnableInfNaN = 1 << 0,
    /// Accept a `,` right before `]` or `}`.
    AllowTrailingCommas = 1 << 1,
    /// Let parsed strings borrow from the input buffer.
    ReferenceInput = 1 << 2,
    /// Reject documents that repeat a key inside one object.
    UniqueKeys = 1 << 3,
    PrettyFormatting = 1 << 4,
    EscapeUnicode = 1 << 5,
    DisallowLossOfPrecision = 1 << 6,
    TryIntegerForFloat = 1 << 7,
    BreakOnError = 1 << 8,
}

// Letter order here is the canonical order used by `Display`.
const FLAG_LETTERS: [(char, JsonOption); 9] = [
    ('R', JsonOption::ReferenceInput),
    ('C', JsonOption::AllowTrailingCommas),
    ('K', JsonOption::UniqueKeys),
    ('N', JsonOption::EnableInfNaN),
    ('P', JsonOption::PrettyFormatting),
    ('U', JsonOption::EscapeUnicode),
    ('L', JsonOption::DisallowLossOfPrecision),
    ('I', JsonOption::TryIntegerForFloat),
    ('E', JsonOption::BreakOnError),
];

impl JsonOption {
    pub fn from_letter(c: char) -> Option<JsonOption> {
        FLAG_LETTERS
            .iter()
            .find(|(letter, _)| *letter == c)
            .map(|(_, option)| *option)
    }

    pub fn letter(self) -> char {
        FLAG_LETTERS
            .iter()
            .find(|(_, option)| *option == self)
            .map(|(letter, _)| *letter)
            .unwrap_or('?')
    }

    #[inline]
    fn bit(self) -> u32 {
        self as u32
    }
}

/// Parser configuration: a flag set plus a nesting depth limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsonOptions {
    flags: u32,
    pub depth_limit: i32,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            flags: 0,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl JsonOptions {
    pub fn new() -> JsonOptions {
        Self::default()
    }

    /// Builds options from a flag string such as `"RC"`.
    ///
    /// # Panics
    ///
    /// Panics on a letter that maps to no flag. Use the `FromStr` impl when
    /// the string comes from outside the program.
    pub fn parse(flags: &str) -> JsonOptions {
        match flags.parse() {
            Ok(options) => options,
            Err(err) => panic!("invalid json options {flags:?}: {err}"),
        }
    }

    #[must_use]
    pub fn with(mut self, option: JsonOption) -> JsonOptions {
        self.flags |= option.bit();
        self
    }

    #[must_use]
    pub fn without(mut self, option: JsonOption) -> JsonOptions {
        self.flags &= !option.bit();
        self
    }

    #[must_use]
    pub fn with_depth_limit(mut self, depth_limit: i32) -> JsonOptions {
        self.depth_limit = depth_limit;
        self
    }

    pub fn set(&mut self, option: JsonOption, enabled: bool) {
        if enabled {
            self.flags |= option.bit();
        } else {
            self.flags &= !option.bit();
        }
    }

    #[inline]
    pub fn contains(&self, option: JsonOption) -> bool {
        self.flags & option.bit() != 0
    }

    pub fn bits(&self) -> u32 {
        self.flags
    }
}

impl FromStr for JsonOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = JsonOptions::default();
        for c in s.chars() {
            match JsonOption::from_letter(c) {
                Some(option) => options.set(option, true),
                None => return Err(Error::InvalidOption(c)),
            }
        }
        Ok(options)
    }
}

impl Display for JsonOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (letter, option) in FLAG_LETTERS.iter() {
            if self.contains(*option) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}
