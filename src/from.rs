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

use core::iter::FromIterator;
use std::borrow::Cow;

use ordered_float::OrderedFloat;
use serde_json::Map as SerdeMap;
use serde_json::Number as SerdeNumber;
use serde_json::Value as SerdeValue;

use crate::value::JsonValue;
use crate::JsonArray;
use crate::JsonObject;

macro_rules! from_signed_integer {
    ($($ty:ident)*) => {
        $(
            impl<'a> From<$ty> for JsonValue<'a> {
                fn from(n: $ty) -> Self {
                    JsonValue::Integer(n as i64)
                }
            }
        )*
    };
}

macro_rules! from_unsigned_integer {
    ($($ty:ident)*) => {
        $(
            impl<'a> From<$ty> for JsonValue<'a> {
                fn from(n: $ty) -> Self {
                    JsonValue::Integer(n as i64)
                }
            }
        )*
    };
}

macro_rules! from_wide_unsigned_integer {
    ($($ty:ident)*) => {
        $(
            impl<'a> From<$ty> for JsonValue<'a> {
                fn from(n: $ty) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => JsonValue::Integer(n),
                        Err(_) => JsonValue::Double(n as f64),
                    }
                }
            }
        )*
    };
}

macro_rules! from_float {
    ($($ty:ident)*) => {
        $(
            impl<'a> From<$ty> for JsonValue<'a> {
                fn from(n: $ty) -> Self {
                    JsonValue::Double(n as f64)
                }
            }
        )*
    };
}

from_signed_integer! {
    i8 i16 i32 i64 isize
}

from_unsigned_integer! {
    u8 u16 u32
}

from_wide_unsigned_integer! {
    u64 usize
}

from_float! {
    f32 f64
}

impl From<OrderedFloat<f32>> for JsonValue<'_> {
    fn from(f: OrderedFloat<f32>) -> Self {
        JsonValue::Double(f.0 as f64)
    }
}

impl From<OrderedFloat<f64>> for JsonValue<'_> {
    fn from(f: OrderedFloat<f64>) -> Self {
        JsonValue::Double(f.0)
    }
}

impl From<bool> for JsonValue<'_> {
    fn from(f: bool) -> Self {
        JsonValue::Boolean(f)
    }
}

impl From<String> for JsonValue<'_> {
    fn from(f: String) -> Self {
        JsonValue::String(f.into())
    }
}

impl<'a> From<&'a str> for JsonValue<'a> {
    fn from(f: &'a str) -> Self {
        JsonValue::String(Cow::from(f))
    }
}

impl<'a> From<Cow<'a, str>> for JsonValue<'a> {
    fn from(f: Cow<'a, str>) -> Self {
        JsonValue::String(f)
    }
}

impl<'a> From<JsonArray<'a>> for JsonValue<'a> {
    fn from(a: JsonArray<'a>) -> Self {
        JsonValue::Array(a)
    }
}

impl<'a> From<JsonObject<'a>> for JsonValue<'a> {
    fn from(o: JsonObject<'a>) -> Self {
        JsonValue::Object(o)
    }
}

impl<'a, T: Into<JsonValue<'a>>> From<Vec<T>> for JsonValue<'a> {
    fn from(f: Vec<T>) -> Self {
        JsonValue::Array(f.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Clone + Into<JsonValue<'a>>> From<&'a [T]> for JsonValue<'a> {
    fn from(f: &'a [T]) -> Self {
        JsonValue::Array(f.iter().cloned().map(Into::into).collect())
    }
}

impl<'a, T: Into<JsonValue<'a>>> FromIterator<T> for JsonValue<'a> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a, K: Into<String>, V: Into<JsonValue<'a>>> FromIterator<(K, V)> for JsonValue<'a> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        JsonValue::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<()> for JsonValue<'_> {
    fn from((): ()) -> Self {
        JsonValue::Null
    }
}

impl<'a, T: Into<JsonValue<'a>>> From<Option<T>> for JsonValue<'a> {
    fn from(f: Option<T>) -> Self {
        match f {
            Some(v) => v.into(),
            None => JsonValue::Null,
        }
    }
}

impl From<&SerdeValue> for JsonValue<'static> {
    fn from(value: &SerdeValue) -> Self {
        match value {
            SerdeValue::Null => JsonValue::Null,
            SerdeValue::Bool(v) => JsonValue::Boolean(*v),
            SerdeValue::Number(v) => {
                if let Some(n) = v.as_i64() {
                    JsonValue::Integer(n)
                } else if let Some(n) = v.as_f64() {
                    JsonValue::Double(n)
                } else {
                    JsonValue::Null
                }
            }
            SerdeValue::String(v) => JsonValue::String(Cow::Owned(v.clone())),
            SerdeValue::Array(arr) => {
                let mut array = JsonArray::with_capacity(arr.len());
                for val in arr {
                    array.add(JsonValue::from(val));
                }
                JsonValue::Array(array)
            }
            SerdeValue::Object(obj) => {
                let mut object = JsonObject::new();
                for (k, v) in obj.iter() {
                    object.set(k.as_str(), JsonValue::from(v));
                }
                JsonValue::Object(object)
            }
        }
    }
}

impl From<SerdeValue> for JsonValue<'static> {
    fn from(value: SerdeValue) -> Self {
        (&value).into()
    }
}

impl From<&JsonValue<'_>> for SerdeValue {
    fn from(value: &JsonValue<'_>) -> Self {
        match value {
            JsonValue::Null => SerdeValue::Null,
            JsonValue::Boolean(v) => SerdeValue::Bool(*v),
            JsonValue::Integer(n) => SerdeValue::Number((*n).into()),
            JsonValue::Double(d) => match SerdeNumber::from_f64(*d) {
                Some(n) => SerdeValue::Number(n),
                // NaN and Infinity have no serde_json representation
                None => SerdeValue::Null,
            },
            JsonValue::String(v) => SerdeValue::String(v.to_string()),
            JsonValue::Array(arr) => {
                let mut vals: Vec<SerdeValue> = Vec::with_capacity(arr.len());
                for val in arr {
                    vals.push(val.into());
                }
                SerdeValue::Array(vals)
            }
            JsonValue::Object(obj) => {
                let mut map = SerdeMap::new();
                for (k, v) in obj.iter() {
                    map.insert(k.clone(), v.into());
                }
                SerdeValue::Object(map)
            }
        }
    }
}

impl From<JsonValue<'_>> for SerdeValue {
    fn from(value: JsonValue<'_>) -> Self {
        (&value).into()
    }
}
