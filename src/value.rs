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

use std::borrow::Cow;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::mem::discriminant;

use ordered_float::OrderedFloat;

use crate::cast::JsonCast;
use crate::constants::*;
use crate::error::Result;
use crate::options::JsonOptions;
use crate::parser::parse_value_with_options;
use crate::util::write_escaped_str;
use crate::JsonArray;
use crate::JsonObject;

/// The tag of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    Array,
    Object,
}

impl Display for JsonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JsonType::Null => TYPE_NULL,
            JsonType::Boolean => TYPE_BOOLEAN,
            JsonType::Integer => TYPE_INTEGER,
            JsonType::Double => TYPE_DOUBLE,
            JsonType::String => TYPE_STRING,
            JsonType::Array => TYPE_ARRAY,
            JsonType::Object => TYPE_OBJECT,
        };
        f.write_str(name)
    }
}

/// A JSON value.
///
/// Strings are `Cow::Borrowed` only when the value was parsed with
/// [`JsonOption::ReferenceInput`](crate::JsonOption::ReferenceInput), in
/// which case `'a` is the lifetime of the parsed buffer. Use
/// [`JsonValue::into_owned`] to detach a tree from its input.
///
/// `Integer` and `Double` are distinct tags: `Integer(1)` is not equal to
/// `Double(1.0)`. Doubles compare by [`OrderedFloat`] rules, so every NaN is
/// equal to itself and `Eq`/`Hash` hold for all values.
#[derive(Clone, Default)]
pub enum JsonValue<'a> {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(Cow<'a, str>),
    Array(JsonArray<'a>),
    Object(JsonObject<'a>),
}

impl Eq for JsonValue<'_> {}

impl PartialEq for JsonValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Boolean(v1), JsonValue::Boolean(v2)) => v1 == v2,
            (JsonValue::Integer(v1), JsonValue::Integer(v2)) => v1 == v2,
            (JsonValue::Double(v1), JsonValue::Double(v2)) => {
                OrderedFloat(*v1) == OrderedFloat(*v2)
            }
            (JsonValue::String(v1), JsonValue::String(v2)) => v1 == v2,
            (JsonValue::Array(arr1), JsonValue::Array(arr2)) => arr1 == arr2,
            (JsonValue::Object(obj1), JsonValue::Object(obj2)) => obj1 == obj2,
            (_, _) => false,
        }
    }
}

impl Hash for JsonValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
        match self {
            JsonValue::Null => {}
            JsonValue::Boolean(v) => v.hash(state),
            JsonValue::Integer(v) => v.hash(state),
            JsonValue::Double(v) => OrderedFloat(*v).hash(state),
            JsonValue::String(v) => v.hash(state),
            JsonValue::Array(arr) => arr.hash(state),
            JsonValue::Object(obj) => obj.hash(state),
        }
    }
}

impl Debug for JsonValue<'_> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        match *self {
            JsonValue::Null => formatter.debug_tuple("Null").finish(),
            JsonValue::Boolean(v) => formatter.debug_tuple("Boolean").field(&v).finish(),
            JsonValue::Integer(v) => formatter.debug_tuple("Integer").field(&v).finish(),
            JsonValue::Double(v) => formatter.debug_tuple("Double").field(&v).finish(),
            JsonValue::String(ref v) => formatter.debug_tuple("String").field(v).finish(),
            JsonValue::Array(ref v) => {
                formatter.write_str("Array(")?;
                Debug::fmt(v, formatter)?;
                formatter.write_str(")")
            }
            JsonValue::Object(ref v) => {
                formatter.write_str("Object(")?;
                Debug::fmt(v, formatter)?;
                formatter.write_str(")")
            }
        }
    }
}

/// Compact JSON text, without whitespace.
///
/// The parser reads integers only within the 32-bit range, so an `Integer`
/// built outside that range, such as `Integer(3_000_000_000)`, prints as
/// `3000000000` but parses back as `Double(3000000000.0)`.
impl Display for JsonValue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonValue::Null => write!(f, "null"),
            JsonValue::Boolean(v) => {
                if *v {
                    write!(f, "true")
                } else {
                    write!(f, "false")
                }
            }
            JsonValue::Integer(v) => {
                let mut buffer = itoa::Buffer::new();
                f.write_str(buffer.format(*v))
            }
            JsonValue::Double(v) => {
                if v.is_nan() {
                    f.write_str("NaN")
                } else if v.is_infinite() {
                    f.write_str(if *v > 0.0 { "Infinity" } else { "-Infinity" })
                } else {
                    let mut buffer = ryu::Buffer::new();
                    f.write_str(buffer.format_finite(*v))
                }
            }
            JsonValue::String(ref v) => write_escaped_str(f, v),
            JsonValue::Array(ref vs) => Display::fmt(vs, f),
            JsonValue::Object(ref vs) => Display::fmt(vs, f),
        }
    }
}

impl<'a> JsonValue<'a> {
    /// An empty `Array` value.
    pub fn new_array() -> JsonValue<'a> {
        JsonValue::Array(JsonArray::new())
    }

    /// An empty `Object` value.
    pub fn new_object() -> JsonValue<'a> {
        JsonValue::Object(JsonObject::new())
    }

    /// Parses a complete document.
    pub fn parse(input: &'a [u8], options: JsonOptions) -> Result<JsonValue<'a>> {
        parse_value_with_options(input, options)
    }

    pub fn json_type(&self) -> JsonType {
        match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Boolean(_) => JsonType::Boolean,
            JsonValue::Integer(_) => JsonType::Integer,
            JsonValue::Double(_) => JsonType::Double,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_v))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, JsonValue::Integer(_v))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, JsonValue::Double(_v))
    }

    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_double()
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_v))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_v))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_v))
    }

    /// Whether this is a string borrowing the parsed input.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, JsonValue::String(Cow::Borrowed(_)))
    }

    /// Checked conversion to `T`. See [`JsonCast`] for the rules.
    pub fn try_cast_to<'v, T: JsonCast<'v>>(&'v self) -> Option<T> {
        T::cast_from(self)
    }

    /// Converts to `i64` without loss: `Integer` always succeeds, `Double`
    /// only when finite, integral and within range.
    pub fn to_integer_lossless(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(n) => Some(*n),
            JsonValue::Double(d) => {
                // i64::MAX as f64 rounds up to 2^63, which is already out of range.
                if d.is_finite() && d.fract() == 0.0 && *d >= i64::MIN as f64 && *d < i64::MAX as f64
                {
                    Some(*d as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn try_as_array(&self) -> Option<&JsonArray<'a>> {
        match self {
            JsonValue::Array(ref array) => Some(array),
            _ => None,
        }
    }

    pub fn try_as_array_mut(&mut self) -> Option<&mut JsonArray<'a>> {
        match self {
            JsonValue::Array(ref mut array) => Some(array),
            _ => None,
        }
    }

    pub fn try_as_object(&self) -> Option<&JsonObject<'a>> {
        match self {
            JsonValue::Object(ref obj) => Some(obj),
            _ => None,
        }
    }

    pub fn try_as_object_mut(&mut self) -> Option<&mut JsonObject<'a>> {
        match self {
            JsonValue::Object(ref mut obj) => Some(obj),
            _ => None,
        }
    }

    /// # Panics
    ///
    /// Panics unless the value is a `Boolean`.
    #[track_caller]
    pub fn as_bool(&self) -> bool {
        match self {
            JsonValue::Boolean(v) => *v,
            _ => self.type_mismatch(JsonType::Boolean),
        }
    }

    /// # Panics
    ///
    /// Panics unless the value is an `Integer`.
    #[track_caller]
    pub fn as_integer(&self) -> i64 {
        match self {
            JsonValue::Integer(v) => *v,
            _ => self.type_mismatch(JsonType::Integer),
        }
    }

    /// Reads a number as `f64`, widening an `Integer`.
    ///
    /// # Panics
    ///
    /// Panics unless the value is an `Integer` or a `Double`.
    #[track_caller]
    pub fn as_double(&self) -> f64 {
        match self {
            JsonValue::Integer(v) => *v as f64,
            JsonValue::Double(v) => *v,
            _ => self.type_mismatch(JsonType::Double),
        }
    }

    /// # Panics
    ///
    /// Panics unless the value is a `String`.
    #[track_caller]
    pub fn as_string(&self) -> &str {
        match self {
            JsonValue::String(v) => v.as_ref(),
            _ => self.type_mismatch(JsonType::String),
        }
    }

    /// # Panics
    ///
    /// Panics unless the value is an `Array`.
    #[track_caller]
    pub fn as_array(&self) -> &JsonArray<'a> {
        match self {
            JsonValue::Array(v) => v,
            _ => self.type_mismatch(JsonType::Array),
        }
    }

    /// # Panics
    ///
    /// Panics unless the value is an `Array`.
    #[track_caller]
    pub fn as_array_mut(&mut self) -> &mut JsonArray<'a> {
        let found = self.json_type();
        match self {
            JsonValue::Array(v) => v,
            _ => type_mismatch(JsonType::Array, found),
        }
    }

    /// # Panics
    ///
    /// Panics unless the value is an `Object`.
    #[track_caller]
    pub fn as_object(&self) -> &JsonObject<'a> {
        match self {
            JsonValue::Object(v) => v,
            _ => self.type_mismatch(JsonType::Object),
        }
    }

    /// # Panics
    ///
    /// Panics unless the value is an `Object`.
    #[track_caller]
    pub fn as_object_mut(&mut self) -> &mut JsonObject<'a> {
        let found = self.json_type();
        match self {
            JsonValue::Object(v) => v,
            _ => type_mismatch(JsonType::Object, found),
        }
    }

    /// Converts every borrowed string into an owned one.
    pub fn into_owned(self) -> JsonValue<'static> {
        match self {
            JsonValue::Null => JsonValue::Null,
            JsonValue::Boolean(v) => JsonValue::Boolean(v),
            JsonValue::Integer(v) => JsonValue::Integer(v),
            JsonValue::Double(v) => JsonValue::Double(v),
            JsonValue::String(v) => JsonValue::String(Cow::Owned(v.into_owned())),
            JsonValue::Array(v) => JsonValue::Array(v.into_owned()),
            JsonValue::Object(v) => JsonValue::Object(v.into_owned()),
        }
    }

    #[track_caller]
    fn type_mismatch(&self, expected: JsonType) -> ! {
        type_mismatch(expected, self.json_type())
    }
}

#[cold]
#[track_caller]
fn type_mismatch(expected: JsonType, found: JsonType) -> ! {
    panic!("json value type mismatch: expected {expected}, found {found}")
}
