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

use num_traits::cast::NumCast;

use crate::value::JsonValue;

/// Types a [`JsonValue`] can be checked-cast into with
/// [`JsonValue::try_cast_to`].
///
/// - integer types accept only the `Integer` tag, and only values in range;
/// - `f32`/`f64` accept both `Integer` and `Double`;
/// - `bool` accepts `Boolean`;
/// - `&str` and `String` accept `String`.
pub trait JsonCast<'v>: Sized {
    fn cast_from(value: &'v JsonValue<'_>) -> Option<Self>;
}

macro_rules! cast_integer {
    ($($ty:ident)*) => {
        $(
            impl<'v> JsonCast<'v> for $ty {
                #[inline]
                fn cast_from(value: &'v JsonValue<'_>) -> Option<Self> {
                    match value {
                        JsonValue::Integer(n) => <$ty as NumCast>::from(*n),
                        _ => None,
                    }
                }
            }
        )*
    };
}

cast_integer! {
    i8 i16 i32 i64 i128 isize
    u8 u16 u32 u64 u128 usize
}

impl<'v> JsonCast<'v> for f64 {
    fn cast_from(value: &'v JsonValue<'_>) -> Option<Self> {
        match value {
            JsonValue::Integer(n) => Some(*n as f64),
            JsonValue::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl<'v> JsonCast<'v> for f32 {
    fn cast_from(value: &'v JsonValue<'_>) -> Option<Self> {
        f64::cast_from(value).map(|d| d as f32)
    }
}

impl<'v> JsonCast<'v> for bool {
    fn cast_from(value: &'v JsonValue<'_>) -> Option<Self> {
        match value {
            JsonValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl<'v> JsonCast<'v> for &'v str {
    fn cast_from(value: &'v JsonValue<'_>) -> Option<Self> {
        match value {
            JsonValue::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }
}

impl<'v> JsonCast<'v> for String {
    fn cast_from(value: &'v JsonValue<'_>) -> Option<Self> {
        <&'v str as JsonCast<'v>>::cast_from(value).map(str::to_owned)
    }
}
