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

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Index;
use std::ops::IndexMut;

use crate::cast::JsonCast;
use crate::error::Error;
use crate::error::Result;
use crate::keypath::parse_key_path;
use crate::options::JsonOptions;
use crate::parser::parse_value_with_options;
use crate::util::write_escaped_str;
use crate::value::JsonType;
use crate::value::JsonValue;
use crate::JsonArray;

/// What [`JsonObject::try_remove_with_path`] does with objects left empty
/// after the removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyHandling {
    LeaveEmpty,
    EraseEmpty,
}

/// The `Object` case of [`JsonValue`]: values keyed by unique strings.
///
/// Keys are kept sorted, which makes lookups logarithmic and iteration,
/// equality and hashing independent of insertion order.
///
/// Methods with a `_with_path` suffix take a dotted path such as `a.b.c`
/// and walk nested objects. A key that itself contains `.` is reachable
/// only through the plain methods.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonObject<'a> {
    map: BTreeMap<String, JsonValue<'a>>,
}

impl Debug for JsonObject<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl Display for JsonObject<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write_escaped_str(f, k)?;
            write!(f, ":{v}")?;
        }
        write!(f, "}}")
    }
}

impl<'a> JsonObject<'a> {
    pub fn new() -> JsonObject<'a> {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Parses `input` and requires the root to be an object.
    pub fn parse(input: &'a [u8], options: JsonOptions) -> Result<JsonObject<'a>> {
        match parse_value_with_options(input, options)? {
            JsonValue::Object(obj) => Ok(obj),
            other => Err(Error::UnexpectedRootType {
                expected: JsonType::Object,
                found: other.json_type(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// # Panics
    ///
    /// Panics if `key` is absent.
    #[track_caller]
    pub fn get(&self, key: &str) -> &JsonValue<'a> {
        match self.map.get(key) {
            Some(value) => value,
            None => missing_key(key),
        }
    }

    /// # Panics
    ///
    /// Panics if `key` is absent.
    #[track_caller]
    pub fn get_mut(&mut self, key: &str) -> &mut JsonValue<'a> {
        match self.map.get_mut(key) {
            Some(value) => value,
            None => missing_key(key),
        }
    }

    pub fn try_get(&self, key: &str) -> Option<&JsonValue<'a>> {
        self.map.get(key)
    }

    pub fn try_get_mut(&mut self, key: &str) -> Option<&mut JsonValue<'a>> {
        self.map.get_mut(key)
    }

    pub fn try_get_as<'v, T: JsonCast<'v>>(&'v self, key: &str) -> Option<T> {
        self.map.get(key).and_then(|v| v.try_cast_to())
    }

    pub fn try_get_array(&self, key: &str) -> Option<&JsonArray<'a>> {
        self.map.get(key).and_then(|v| v.try_as_array())
    }

    pub fn try_get_object(&self, key: &str) -> Option<&JsonObject<'a>> {
        self.map.get(key).and_then(|v| v.try_as_object())
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue<'a>>,
    ) -> Option<JsonValue<'a>> {
        self.map.insert(key.into(), value.into())
    }

    pub fn try_remove(&mut self, key: &str) -> Option<JsonValue<'a>> {
        self.map.remove(key)
    }

    /// # Panics
    ///
    /// Panics if any segment of `path` is absent or an intermediate value is
    /// not an object.
    #[track_caller]
    pub fn get_with_path(&self, path: &str) -> &JsonValue<'a> {
        match self.try_get_with_path(path) {
            Some(value) => value,
            None => missing_key(path),
        }
    }

    /// # Panics
    ///
    /// Same conditions as [`JsonObject::get_with_path`].
    #[track_caller]
    pub fn get_mut_with_path(&mut self, path: &str) -> &mut JsonValue<'a> {
        match self.try_get_mut_with_path(path) {
            Some(value) => value,
            None => missing_key(path),
        }
    }

    pub fn try_get_with_path(&self, path: &str) -> Option<&JsonValue<'a>> {
        let key_path = parse_key_path(path);
        let (last, parents) = key_path.split_last();
        let mut current = self;
        for segment in parents {
            current = current.map.get(*segment)?.try_as_object()?;
        }
        current.map.get(last)
    }

    pub fn try_get_mut_with_path(&mut self, path: &str) -> Option<&mut JsonValue<'a>> {
        let key_path = parse_key_path(path);
        let (last, parents) = key_path.split_last();
        let mut current = self;
        for segment in parents {
            current = current.map.get_mut(*segment)?.try_as_object_mut()?;
        }
        current.map.get_mut(last)
    }

    pub fn try_get_as_with_path<'v, T: JsonCast<'v>>(&'v self, path: &str) -> Option<T> {
        self.try_get_with_path(path).and_then(|v| v.try_cast_to())
    }

    pub fn try_get_array_with_path(&self, path: &str) -> Option<&JsonArray<'a>> {
        self.try_get_with_path(path).and_then(|v| v.try_as_array())
    }

    pub fn try_get_object_with_path(&self, path: &str) -> Option<&JsonObject<'a>> {
        self.try_get_with_path(path).and_then(|v| v.try_as_object())
    }

    /// Stores `value` at the dotted `path`.
    ///
    /// Missing intermediate keys get empty objects. An intermediate value
    /// that exists but is not an object is replaced by an empty object.
    pub fn set_with_path(&mut self, path: &str, value: impl Into<JsonValue<'a>>) {
        let key_path = parse_key_path(path);
        let (last, parents) = key_path.split_last();
        let mut current = self;
        for segment in parents {
            let entry = current
                .map
                .entry((*segment).to_string())
                .or_insert_with(JsonValue::new_object);
            current = coerce_object(entry);
        }
        current.map.insert(last.to_string(), value.into());
    }

    /// Removes the value at the dotted `path`.
    ///
    /// With [`EmptyHandling::EraseEmpty`], intermediate objects that become
    /// empty are removed as well, innermost first. This object itself is
    /// never removed.
    pub fn try_remove_with_path(
        &mut self,
        path: &str,
        empty_handling: EmptyHandling,
    ) -> Option<JsonValue<'a>> {
        let key_path = parse_key_path(path);
        remove_path(self, key_path.segments(), empty_handling)
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, JsonValue<'a>> {
        self.map.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, String, JsonValue<'a>> {
        self.map.values()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, JsonValue<'a>> {
        self.map.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, JsonValue<'a>> {
        self.map.iter_mut()
    }

    pub fn into_owned(self) -> JsonObject<'static> {
        JsonObject {
            map: self
                .map
                .into_iter()
                .map(|(k, v)| (k, v.into_owned()))
                .collect(),
        }
    }
}

fn coerce_object<'v, 'a>(value: &'v mut JsonValue<'a>) -> &'v mut JsonObject<'a> {
    if !value.is_object() {
        *value = JsonValue::new_object();
    }
    value.as_object_mut()
}

fn remove_path<'a>(
    obj: &mut JsonObject<'a>,
    segments: &[&str],
    empty_handling: EmptyHandling,
) -> Option<JsonValue<'a>> {
    match segments {
        [] => None,
        [leaf] => obj.map.remove(*leaf),
        [head, rest @ ..] => {
            let child = obj.map.get_mut(*head)?.try_as_object_mut()?;
            let removed = remove_path(child, rest, empty_handling)?;
            if empty_handling == EmptyHandling::EraseEmpty && child.is_empty() {
                obj.map.remove(*head);
            }
            Some(removed)
        }
    }
}

#[cold]
#[track_caller]
fn missing_key(key: &str) -> ! {
    panic!("key {key:?} not found in json object")
}

impl<'a> Index<&str> for JsonObject<'a> {
    type Output = JsonValue<'a>;

    #[track_caller]
    fn index(&self, key: &str) -> &Self::Output {
        self.get(key)
    }
}

impl IndexMut<&str> for JsonObject<'_> {
    #[track_caller]
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        self.get_mut(key)
    }
}

impl<'a> From<BTreeMap<String, JsonValue<'a>>> for JsonObject<'a> {
    fn from(map: BTreeMap<String, JsonValue<'a>>) -> Self {
        Self { map }
    }
}

impl<'a, K: Into<String>> FromIterator<(K, JsonValue<'a>)> for JsonObject<'a> {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue<'a>)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for JsonObject<'a> {
    type Item = (String, JsonValue<'a>);
    type IntoIter = btree_map::IntoIter<String, JsonValue<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s JsonObject<'a> {
    type Item = (&'s String, &'s JsonValue<'a>);
    type IntoIter = btree_map::Iter<'s, String, JsonValue<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
