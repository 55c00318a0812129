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

use core::fmt::Display;
use std::fmt::Formatter;

use crate::value::JsonType;

/// The kind of problem found in the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParseErrorCode {
    SyntaxError,
    UnexpectedDataAfterRoot,
    TooMuchNesting,
    TrailingComma,
    UnquotedObjectKey,
    InvalidEscape,
}

impl Display for ParseErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorCode::SyntaxError => f.write_str("syntax error"),
            ParseErrorCode::UnexpectedDataAfterRoot => {
                f.write_str("unexpected data after root value")
            }
            ParseErrorCode::TooMuchNesting => f.write_str("too much nesting"),
            ParseErrorCode::TrailingComma => f.write_str("trailing comma"),
            ParseErrorCode::UnquotedObjectKey => f.write_str("object key must be a quoted string"),
            ParseErrorCode::InvalidEscape => f.write_str("invalid escape sequence"),
        }
    }
}

/// A parse failure located in the input.
///
/// `line` and `column` are 1-based. The column counts bytes from the start
/// of the line, so a multi-byte character advances it by its encoded length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsonError {
    pub code: ParseErrorCode,
    pub line: u32,
    pub column: u32,
}

impl JsonError {
    pub fn new(code: ParseErrorCode, line: u32, column: u32) -> JsonError {
        Self { code, line, column }
    }
}

impl Display for JsonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, line {}, column {}", self.code, self.line, self.column)
    }
}

impl std::error::Error for JsonError {}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The document is not valid JSON under the active options.
    Parse(JsonError),
    /// The document parsed, but its root is not of the requested type.
    UnexpectedRootType { expected: JsonType, found: JsonType },
    /// A letter in an option string that maps to no flag.
    InvalidOption(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "{err}"),
            Error::UnexpectedRootType { expected, found } => {
                write!(f, "expected {expected} as root value, found {found}")
            }
            Error::InvalidOption(c) => write!(f, "unrecognized option flag '{c}'"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<JsonError> for Error {
    fn from(err: JsonError) -> Self {
        Error::Parse(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
