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

use nom::bytes::complete::take_till;
use nom::character::complete::char;
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use nom::IResult;
use nom::Parser;

use crate::constants::KEY_PATH_SEPARATOR;

/// A dotted path into nested objects, such as `a.b.c`.
///
/// The separator cannot be escaped, so every `.` splits. Empty segments are
/// kept and address the empty key.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct KeyPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> KeyPath<'a> {
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Splits off the leaf key from the keys of the objects leading to it.
    pub fn split_last(&self) -> (&'a str, &[&'a str]) {
        match self.segments.split_last() {
            Some((last, parents)) => (*last, parents),
            None => ("", &[]),
        }
    }
}

impl Display for KeyPath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{KEY_PATH_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Parsing the input string to a key path.
pub fn parse_key_path(input: &str) -> KeyPath<'_> {
    match all_consuming(segments).parse(input) {
        Ok((_, segments)) => KeyPath { segments },
        // every input splits, so this only guards the combinator contract
        Err(_) => KeyPath {
            segments: vec![input],
        },
    }
}

fn segments(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(
        char(KEY_PATH_SEPARATOR),
        take_till(|c: char| c == KEY_PATH_SEPARATOR),
    )
    .parse(input)
}
