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

//! `jsonkit` is a `JSON` value model with a hand-written recursive-descent parser. It provides a small, strict and easy-to-use API for reading and editing `JSON` documents.
//!
//! ## Features
//!
//! - Strict by default: RFC 8259 `JSON`, with exact `line`/`column` positions for the first error.
//! - Controlled extensions: `//` and `/* */` comments, `\xHH` escapes, and opt-in trailing commas and `NaN`/`Infinity` literals.
//! - Zero-copy strings: with [`JsonOption::ReferenceInput`], string literals without escapes borrow the input buffer.
//! - Bounded nesting: documents nested deeper than [`JsonOptions::depth_limit`] are rejected before the call stack can overflow.
//!
//! ## Value model
//!
//! A [`JsonValue`] is exactly one of `Null`, `Boolean`, `Integer`, `Double`, `String`, `Array` or `Object`.
//! [`JsonArray`] and [`JsonObject`] are the payloads of the last two variants. Objects keep their keys sorted,
//! so iteration, equality and hashing do not depend on insertion order.
//!
//! Integers that fit in 32 bits parse as `Integer`; all other numbers parse as `Double`.
//!
//! ## Options
//!
//! [`JsonOptions`] can be written as a string of flag letters:
//!
//! | Letter | Flag |
//! |---|---|
//! | `R` | `ReferenceInput` |
//! | `C` | `AllowTrailingCommas` |
//! | `K` | `UniqueKeys` |
//! | `N` | `EnableInfNaN` |
//! | `P` | `PrettyFormatting` |
//! | `U` | `EscapeUnicode` |
//! | `L` | `DisallowLossOfPrecision` |
//! | `I` | `TryIntegerForFloat` |
//! | `E` | `BreakOnError` |
//!
//! #### An example
//!
//! ```
//! use jsonkit::JsonObject;
//! use jsonkit::JsonOptions;
//!
//! let input = br#"{"server": {"port": 8080, /* default */ "hosts": ["a", "b",]}}"#;
//! let options = JsonOptions::parse("C");
//! let mut object = JsonObject::parse(input, options).unwrap();
//!
//! assert_eq!(object.try_get_as_with_path::<u16>("server.port"), Some(8080));
//! object.set_with_path("server.tls.enabled", true);
//! assert_eq!(
//!     object.to_string(),
//!     r#"{"server":{"hosts":["a","b"],"port":8080,"tls":{"enabled":true}}}"#
//! );
//! ```

#![allow(clippy::uninlined_format_args)]

mod array;
mod builder;
mod cast;
mod constants;
mod error;
mod from;
pub mod keypath;
mod object;
mod options;
mod parser;
mod ser;
mod util;
mod value;

pub use array::JsonArray;
pub use builder::JsonStringBuilder;
pub use cast::JsonCast;
pub use error::Error;
pub use error::JsonError;
pub use error::ParseErrorCode;
pub use error::Result;
#[allow(unused_imports)]
pub use from::*;
pub use object::EmptyHandling;
pub use object::JsonObject;
pub use options::JsonOption;
pub use options::JsonOptions;
pub use options::DEFAULT_DEPTH_LIMIT;
pub use parser::parse_value;
pub use parser::parse_value_with_options;
pub use parser::JsonParser;
pub use value::JsonType;
pub use value::JsonValue;
