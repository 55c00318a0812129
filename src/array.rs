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

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Index;
use std::ops::IndexMut;

use crate::cast::JsonCast;
use crate::error::Error;
use crate::error::Result;
use crate::options::JsonOptions;
use crate::parser::parse_value_with_options;
use crate::value::JsonType;
use crate::value::JsonValue;
use crate::JsonObject;

/// The `Array` case of [`JsonValue`]: an ordered sequence of values.
///
/// Elements may repeat and may have different types.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonArray<'a> {
    values: Vec<JsonValue<'a>>,
}

impl Debug for JsonArray<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

impl Display for JsonArray<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl<'a> JsonArray<'a> {
    pub fn new() -> JsonArray<'a> {
        Self { values: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> JsonArray<'a> {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Parses `input` and requires the root to be an array.
    pub fn parse(input: &'a [u8], options: JsonOptions) -> Result<JsonArray<'a>> {
        match parse_value_with_options(input, options)? {
            JsonValue::Array(array) => Ok(array),
            other => Err(Error::UnexpectedRootType {
                expected: JsonType::Array,
                found: other.json_type(),
            }),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Same as [`JsonArray::len`].
    #[inline]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Makes room for at least `capacity` elements in total.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.values.capacity() {
            self.values.reserve(capacity - self.values.len());
        }
    }

    /// Whether adding `additional` elements would reallocate.
    pub fn will_grow(&self, additional: usize) -> bool {
        self.values.len() + additional > self.values.capacity()
    }

    pub fn shrink_to_fit(&mut self) {
        self.values.shrink_to_fit();
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[track_caller]
    pub fn get(&self, index: usize) -> &JsonValue<'a> {
        match self.values.get(index) {
            Some(value) => value,
            None => out_of_range(index, self.values.len()),
        }
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[track_caller]
    pub fn get_mut(&mut self, index: usize) -> &mut JsonValue<'a> {
        let len = self.values.len();
        match self.values.get_mut(index) {
            Some(value) => value,
            None => out_of_range(index, len),
        }
    }

    pub fn try_get(&self, index: usize) -> Option<&JsonValue<'a>> {
        self.values.get(index)
    }

    pub fn try_get_mut(&mut self, index: usize) -> Option<&mut JsonValue<'a>> {
        self.values.get_mut(index)
    }

    /// Checked cast of the element at `index`.
    pub fn try_get_as<'v, T: JsonCast<'v>>(&'v self, index: usize) -> Option<T> {
        self.values.get(index).and_then(|v| v.try_cast_to())
    }

    pub fn try_get_array(&self, index: usize) -> Option<&JsonArray<'a>> {
        self.values.get(index).and_then(|v| v.try_as_array())
    }

    pub fn try_get_object(&self, index: usize) -> Option<&JsonObject<'a>> {
        self.values.get(index).and_then(|v| v.try_as_object())
    }

    /// Stores `value` at `index`.
    ///
    /// Overwrites an existing element, appends when `index == len()`, and
    /// otherwise fills the gap up to `index` with `Null` before appending.
    pub fn set(&mut self, index: usize, value: impl Into<JsonValue<'a>>) {
        let value = value.into();
        let len = self.values.len();
        if index < len {
            self.values[index] = value;
            return;
        }
        if index > len {
            self.values.reserve(index + 1 - len);
            self.values.resize(index, JsonValue::Null);
        }
        self.values.push(value);
    }

    pub fn add(&mut self, value: impl Into<JsonValue<'a>>) {
        self.values.push(value.into());
    }

    pub fn remove_last(&mut self) -> Option<JsonValue<'a>> {
        self.values.pop()
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[track_caller]
    pub fn remove_at(&mut self, index: usize) -> JsonValue<'a> {
        if index >= self.values.len() {
            out_of_range(index, self.values.len());
        }
        self.values.remove(index)
    }

    /// Removes `count` elements starting at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the range runs past the end of the array.
    #[track_caller]
    pub fn remove_range(&mut self, index: usize, count: usize) {
        let end = index.saturating_add(count);
        if end > self.values.len() {
            out_of_range(end.saturating_sub(1), self.values.len());
        }
        self.values.drain(index..end);
    }

    pub fn contains(&self, value: &JsonValue<'a>) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JsonValue<'a>> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, JsonValue<'a>> {
        self.values.iter_mut()
    }

    pub fn as_slice(&self) -> &[JsonValue<'a>] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<JsonValue<'a>> {
        self.values
    }

    pub fn into_owned(self) -> JsonArray<'static> {
        JsonArray {
            values: self.values.into_iter().map(JsonValue::into_owned).collect(),
        }
    }
}

#[cold]
#[track_caller]
fn out_of_range(index: usize, len: usize) -> ! {
    panic!("index {index} out of range for json array of size {len}")
}

impl<'a> Index<usize> for JsonArray<'a> {
    type Output = JsonValue<'a>;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl IndexMut<usize> for JsonArray<'_> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<'a> From<Vec<JsonValue<'a>>> for JsonArray<'a> {
    fn from(values: Vec<JsonValue<'a>>) -> Self {
        Self { values }
    }
}

impl<'a> FromIterator<JsonValue<'a>> for JsonArray<'a> {
    fn from_iter<I: IntoIterator<Item = JsonValue<'a>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> Extend<JsonValue<'a>> for JsonArray<'a> {
    fn extend<I: IntoIterator<Item = JsonValue<'a>>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl<'a> IntoIterator for JsonArray<'a> {
    type Item = JsonValue<'a>;
    type IntoIter = std::vec::IntoIter<JsonValue<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s JsonArray<'a> {
    type Item = &'s JsonValue<'a>;
    type IntoIter = std::slice::Iter<'s, JsonValue<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
