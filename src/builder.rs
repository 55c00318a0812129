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
use std::str::Utf8Error;

const MIN_CAPACITY: usize = 8;
const SLACK: usize = 4;

enum Repr {
    Borrowed { start: usize, len: usize },
    Owned(Vec<u8>),
}

/// Accumulates the bytes of a string literal while the parser scans it.
///
/// A builder starts out borrowing a span of the input. As long as the
/// literal contains no escapes the span is extended in place and nothing is
/// copied. The first escape switches the builder to an owned buffer that
/// holds the span scanned so far, after which bytes are appended by copy.
pub struct JsonStringBuilder<'a> {
    input: &'a [u8],
    repr: Repr,
}

impl<'a> JsonStringBuilder<'a> {
    /// Creates an empty builder borrowing `input` from offset `start`.
    pub fn new(input: &'a [u8], start: usize) -> JsonStringBuilder<'a> {
        debug_assert!(start <= input.len());
        Self {
            input,
            repr: Repr::Borrowed { start, len: 0 },
        }
    }

    #[cfg(test)]
    fn owned() -> JsonStringBuilder<'a> {
        Self {
            input: &[],
            repr: Repr::Owned(Vec::new()),
        }
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self.repr, Repr::Borrowed { .. })
    }

    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Borrowed { len, .. } => *len,
            Repr::Owned(buf) => buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity of the owned buffer. A borrowing builder has none.
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Borrowed { .. } => 0,
            Repr::Owned(buf) => buf.capacity(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.repr {
            Repr::Borrowed { start, len } => &self.input[*start..*start + *len],
            Repr::Owned(buf) => buf,
        }
    }

    /// Extends the borrowed span by `extra_len` bytes of input.
    ///
    /// # Panics
    ///
    /// Panics if the builder already owns its buffer, or if the span would
    /// run past the end of the input.
    #[inline]
    pub fn append_in_place(&mut self, extra_len: usize) {
        match &mut self.repr {
            Repr::Borrowed { start, len } => {
                assert!(
                    *start + *len + extra_len <= self.input.len(),
                    "borrowed span runs past the end of the input"
                );
                *len += extra_len;
            }
            Repr::Owned(_) => panic!("append_in_place on an owned string builder"),
        }
    }

    /// Switches to owned mode, copying the borrowed span. No-op when the
    /// builder already owns its buffer.
    pub fn convert(&mut self) {
        if let Repr::Borrowed { start, len } = self.repr {
            let capacity = grow_capacity(0, len + SLACK);
            let mut buf = Vec::with_capacity(capacity);
            buf.extend_from_slice(&self.input[start..start + len]);
            self.repr = Repr::Owned(buf);
        }
    }

    #[inline]
    pub fn append(&mut self, byte: u8) {
        self.owned_buf(1).push(byte);
    }

    pub fn append_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        let encoded = c.encode_utf8(&mut tmp);
        self.append_string(encoded.as_bytes());
    }

    pub fn append_string(&mut self, span: &[u8]) {
        self.owned_buf(span.len()).extend_from_slice(span);
    }

    /// Ensures room for `additional` more bytes, converting to owned mode
    /// first if needed.
    fn owned_buf(&mut self, additional: usize) -> &mut Vec<u8> {
        self.convert();
        let Repr::Owned(buf) = &mut self.repr else {
            unreachable!("builder is owned after convert")
        };
        let required = buf.len() + additional;
        if required > buf.capacity() {
            let capacity = grow_capacity(buf.len(), required);
            buf.reserve_exact(capacity - buf.len());
        }
        buf
    }

    /// Produces the accumulated string. A builder still in borrowed mode
    /// yields a slice of the input.
    pub fn finish(self) -> Result<Cow<'a, str>, Utf8Error> {
        match self.repr {
            Repr::Borrowed { start, len } => {
                std::str::from_utf8(&self.input[start..start + len]).map(Cow::Borrowed)
            }
            Repr::Owned(buf) => String::from_utf8(buf)
                .map(Cow::Owned)
                .map_err(|err| err.utf8_error()),
        }
    }
}

#[inline]
fn grow_capacity(current_len: usize, requested_len: usize) -> usize {
    (current_len * 2).max(requested_len).max(MIN_CAPACITY)
}
