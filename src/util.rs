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

use std::fmt::Write;

use super::constants::*;

#[allow(clippy::zero_prefixed_literal)]
static HEX: [u8; 256] = {
    const __: u8 = 255; // not a hex digit
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 0
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
        00, 01, 02, 03, 04, 05, 06, 07, 08, 09, __, __, __, __, __, __, // 3
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 5
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 6
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
    ]
};

#[inline]
pub(crate) fn decode_hex_val(val: u8) -> Option<u16> {
    let n = HEX[val as usize] as u16;
    if n == 255 {
        None
    } else {
        Some(n)
    }
}

/// Decodes a run of hex digits, or returns the offset of the first byte
/// that is not a hex digit.
#[inline]
pub(crate) fn decode_hex_escape(numbers: &[u8]) -> Result<u16, usize> {
    let mut n = 0;
    for (i, number) in numbers.iter().enumerate() {
        match decode_hex_val(*number) {
            Some(hex) => n = (n << 4) + hex,
            None => return Err(i),
        }
    }
    Ok(n)
}

/// Maps the letter after a backslash to the byte it stands for.
/// `u` and `x` take operands and are handled by the caller.
#[inline]
pub(crate) fn decode_simple_escape(byte: u8) -> Option<u8> {
    match byte {
        b'\\' => Some(BS),
        b'"' => Some(QU),
        b'/' => Some(SD),
        b'b' => Some(BB),
        b'f' => Some(FF),
        b'n' => Some(NN),
        b'r' => Some(RR),
        b't' => Some(TT),
        b'v' => Some(VT),
        _ => None,
    }
}

#[inline]
pub(crate) fn is_lead_surrogate(n: u16) -> bool {
    (0xD800..=0xDBFF).contains(&n)
}

#[inline]
pub(crate) fn is_trail_surrogate(n: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&n)
}

#[inline]
pub(crate) fn combine_surrogates(lead: u16, trail: u16) -> u32 {
    ((((lead - 0xD800) as u32) << 10) | (trail - 0xDC00) as u32) + 0x1_0000
}

/// Writes `s` as a quoted JSON string literal.
pub(crate) fn write_escaped_str<W: Write>(w: &mut W, s: &str) -> std::fmt::Result {
    w.write_char('"')?;
    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escaped = match b {
            QU => "\\\"",
            BS => "\\\\",
            NN => "\\n",
            RR => "\\r",
            TT => "\\t",
            BB => "\\b",
            FF => "\\f",
            0x00..=0x1F => "",
            _ => continue,
        };
        if start < i {
            w.write_str(&s[start..i])?;
        }
        if escaped.is_empty() {
            write!(w, "\\u{:04x}", b)?;
        } else {
            w.write_str(escaped)?;
        }
        start = i + 1;
    }
    if start < bytes.len() {
        w.write_str(&s[start..])?;
    }
    w.write_char('"')
}
