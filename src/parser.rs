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

use super::builder::JsonStringBuilder;
use super::constants::*;
use super::error::JsonError;
use super::error::ParseErrorCode;
use super::error::Result;
use super::options::JsonOption;
use super::options::JsonOptions;
use super::util::combine_surrogates;
use super::util::decode_hex_escape;
use super::util::decode_simple_escape;
use super::util::is_lead_surrogate;
use super::util::is_trail_surrogate;
use super::value::JsonValue;
use crate::JsonArray;
use crate::JsonObject;

type ScanResult<T> = std::result::Result<T, JsonError>;

/// Parses JSON text with the default options.
pub fn parse_value(buf: &[u8]) -> Result<JsonValue<'_>> {
    parse_value_with_options(buf, JsonOptions::default())
}

/// Parses JSON text with the given options.
pub fn parse_value_with_options(buf: &[u8], options: JsonOptions) -> Result<JsonValue<'_>> {
    let mut parser = JsonParser::new(options);
    Ok(parser.parse(buf)?)
}

/// A recursive-descent JSON parser.
///
/// Besides RFC 8259 JSON the parser accepts `//` and `/* */` comments and
/// `\xHH` escapes. Trailing commas, `NaN`/`Infinity` and borrowed strings are
/// enabled through [`JsonOptions`].
///
/// Parsing stops at the first error. Nesting deeper than
/// [`JsonOptions::depth_limit`] fails with
/// [`ParseErrorCode::TooMuchNesting`] before the call stack can run out.
#[derive(Debug, Clone)]
pub struct JsonParser {
    options: JsonOptions,
    error: Option<JsonError>,
}

impl JsonParser {
    pub fn new(options: JsonOptions) -> JsonParser {
        Self {
            options,
            error: None,
        }
    }

    pub fn options(&self) -> JsonOptions {
        self.options
    }

    /// Parses one complete document.
    ///
    /// With [`JsonOption::ReferenceInput`] the returned strings may borrow
    /// `input`; otherwise the value owns all of its data, although its type
    /// still carries the lifetime of `input`.
    pub fn parse<'a>(&mut self, input: &'a [u8]) -> std::result::Result<JsonValue<'a>, JsonError> {
        self.error = None;
        let mut scanner = Scanner::new(input, self.options);
        scanner.parse_root().inspect_err(|err| {
            self.error = Some(*err);
        })
    }

    /// The error of the last failed [`JsonParser::parse`], if any.
    pub fn error(&self) -> Option<&JsonError> {
        self.error.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    String,
    Number,
    True,
    False,
    Null,
    Comma,
    Colon,
    Eof,
    Invalid,
}

struct Scanner<'a> {
    buf: &'a [u8],
    idx: usize,
    line_start: usize,
    line_number: u32,
    stack_depth: i32,
    options: JsonOptions,
}

impl<'a> Scanner<'a> {
    fn new(buf: &'a [u8], options: JsonOptions) -> Scanner<'a> {
        Self {
            buf,
            idx: 0,
            line_start: 0,
            line_number: 1,
            stack_depth: 0,
            options,
        }
    }

    fn parse_root(&mut self) -> ScanResult<JsonValue<'a>> {
        let value = self.parse_value()?;
        self.eat_whitespace_and_comments()?;
        if self.idx < self.buf.len() {
            return Err(self.report_error(ParseErrorCode::UnexpectedDataAfterRoot, 0));
        }
        Ok(value)
    }

    #[inline]
    fn peek_token(&self) -> Token {
        match self.buf.get(self.idx) {
            None => Token::Eof,
            Some(b'{') => Token::ObjectStart,
            Some(b'}') => Token::ObjectEnd,
            Some(b'[') => Token::ArrayStart,
            Some(b']') => Token::ArrayEnd,
            Some(b'"') => Token::String,
            Some(b'-' | b'0'..=b'9') => Token::Number,
            Some(b'N' | b'I' | b'i') if self.options.contains(JsonOption::EnableInfNaN) => {
                Token::Number
            }
            Some(b't') => Token::True,
            Some(b'f') => Token::False,
            Some(b'n') => Token::Null,
            Some(b',') => Token::Comma,
            Some(b':') => Token::Colon,
            Some(_) => Token::Invalid,
        }
    }

    /// Builds an error at the current position, shifted by `column_adjust`
    /// bytes on the current line.
    fn report_error(&self, code: ParseErrorCode, column_adjust: isize) -> JsonError {
        let column = (self.idx - self.line_start) as isize + 1 + column_adjust;
        let column = u32::try_from(column.max(1)).unwrap_or(u32::MAX);
        JsonError::new(code, self.line_number, column)
    }

    /// Builds an error at `pos`, which must lie on the current line.
    fn error_at(&self, code: ParseErrorCode, pos: usize) -> JsonError {
        self.report_error(code, pos as isize - self.idx as isize)
    }

    #[inline]
    fn newline(&mut self) {
        self.line_number += 1;
        self.line_start = self.idx;
    }

    fn eat_whitespace_and_comments(&mut self) -> ScanResult<()> {
        while let Some(&c) = self.buf.get(self.idx) {
            match c {
                b' ' | b'\t' | b'\r' => self.idx += 1,
                b'\n' => {
                    self.idx += 1;
                    self.newline();
                }
                b'/' => self.eat_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn eat_comment(&mut self) -> ScanResult<()> {
        match self.buf.get(self.idx + 1) {
            Some(b'/') => {
                self.idx += 2;
                // the newline itself is left to the whitespace loop
                while let Some(&c) = self.buf.get(self.idx) {
                    if c == b'\n' {
                        break;
                    }
                    self.idx += 1;
                }
                Ok(())
            }
            Some(b'*') => {
                self.idx += 2;
                loop {
                    match self.buf.get(self.idx) {
                        None => return Err(self.report_error(ParseErrorCode::SyntaxError, 0)),
                        Some(b'*') if self.buf.get(self.idx + 1) == Some(&b'/') => {
                            self.idx += 2;
                            return Ok(());
                        }
                        Some(b'\n') => {
                            self.idx += 1;
                            self.newline();
                        }
                        Some(_) => self.idx += 1,
                    }
                }
            }
            _ => Err(self.report_error(ParseErrorCode::SyntaxError, 0)),
        }
    }

    fn parse_value(&mut self) -> ScanResult<JsonValue<'a>> {
        self.eat_whitespace_and_comments()?;
        match self.peek_token() {
            Token::ObjectStart => self.parse_object().map(JsonValue::Object),
            Token::ArrayStart => self.parse_array().map(JsonValue::Array),
            Token::String => self.consume_string().map(JsonValue::String),
            Token::Number => self.consume_number(),
            Token::True => self.consume_literal(LIT_TRUE, JsonValue::Boolean(true)),
            Token::False => self.consume_literal(LIT_FALSE, JsonValue::Boolean(false)),
            Token::Null => self.consume_literal(LIT_NULL, JsonValue::Null),
            _ => Err(self.report_error(ParseErrorCode::SyntaxError, 0)),
        }
    }

    fn enter_nesting(&mut self) -> ScanResult<()> {
        self.stack_depth += 1;
        if self.stack_depth > self.options.depth_limit {
            return Err(self.report_error(ParseErrorCode::TooMuchNesting, 0));
        }
        Ok(())
    }

    fn parse_array(&mut self) -> ScanResult<JsonArray<'a>> {
        self.enter_nesting()?;
        self.idx += 1;

        let mut array = JsonArray::new();
        self.eat_whitespace_and_comments()?;
        if self.peek_token() == Token::ArrayEnd {
            self.idx += 1;
            self.stack_depth -= 1;
            return Ok(array);
        }

        loop {
            let value = self.parse_value()?;
            array.add(value);

            self.eat_whitespace_and_comments()?;
            match self.peek_token() {
                Token::ArrayEnd => {
                    self.idx += 1;
                    break;
                }
                Token::Comma => {
                    self.idx += 1;
                    self.eat_whitespace_and_comments()?;
                    if self.peek_token() == Token::ArrayEnd {
                        self.check_trailing_comma()?;
                        self.idx += 1;
                        break;
                    }
                }
                _ => return Err(self.report_error(ParseErrorCode::SyntaxError, 0)),
            }
        }

        self.stack_depth -= 1;
        Ok(array)
    }

    fn parse_object(&mut self) -> ScanResult<JsonObject<'a>> {
        self.enter_nesting()?;
        self.idx += 1;

        let mut object = JsonObject::new();
        self.eat_whitespace_and_comments()?;
        if self.peek_token() == Token::ObjectEnd {
            self.idx += 1;
            self.stack_depth -= 1;
            return Ok(object);
        }

        loop {
            match self.peek_token() {
                Token::String => {}
                Token::Eof => return Err(self.report_error(ParseErrorCode::SyntaxError, 0)),
                _ => return Err(self.report_error(ParseErrorCode::UnquotedObjectKey, 0)),
            }
            let key_start = self.idx;
            let key = self.consume_string()?.into_owned();
            if self.options.contains(JsonOption::UniqueKeys) && object.contains_key(&key) {
                // a string literal never spans lines
                return Err(self.error_at(ParseErrorCode::SyntaxError, key_start));
            }

            self.eat_whitespace_and_comments()?;
            if self.peek_token() != Token::Colon {
                return Err(self.report_error(ParseErrorCode::SyntaxError, 0));
            }
            self.idx += 1;

            let value = self.parse_value()?;
            object.set(key, value);

            self.eat_whitespace_and_comments()?;
            match self.peek_token() {
                Token::ObjectEnd => {
                    self.idx += 1;
                    break;
                }
                Token::Comma => {
                    self.idx += 1;
                    self.eat_whitespace_and_comments()?;
                    if self.peek_token() == Token::ObjectEnd {
                        self.check_trailing_comma()?;
                        self.idx += 1;
                        break;
                    }
                }
                _ => return Err(self.report_error(ParseErrorCode::SyntaxError, 0)),
            }
        }

        self.stack_depth -= 1;
        Ok(object)
    }

    fn check_trailing_comma(&self) -> ScanResult<()> {
        if self.options.contains(JsonOption::AllowTrailingCommas) {
            Ok(())
        } else {
            Err(self.report_error(ParseErrorCode::TrailingComma, 0))
        }
    }

    /// Scans a string literal starting at its opening quote.
    ///
    /// Runs of plain bytes extend the builder's borrowed span. The first
    /// escape moves the builder to owned mode.
    fn consume_string(&mut self) -> ScanResult<Cow<'a, str>> {
        self.idx += 1;
        let mut builder = JsonStringBuilder::new(self.buf, self.idx);
        let mut run_start = self.idx;

        loop {
            let Some(&c) = self.buf.get(self.idx) else {
                return Err(self.report_error(ParseErrorCode::SyntaxError, 0));
            };
            match c {
                QU => break,
                BS => {
                    self.flush_run(&mut builder, run_start)?;
                    self.consume_escape(&mut builder)?;
                    run_start = self.idx;
                }
                0x00..=0x1F => return Err(self.report_error(ParseErrorCode::SyntaxError, 0)),
                _ => self.idx += 1,
            }
        }
        self.flush_run(&mut builder, run_start)?;

        // only bytes decoded from `\x` escapes can be invalid here
        let s = builder
            .finish()
            .map_err(|_| self.report_error(ParseErrorCode::InvalidEscape, 0))?;
        self.idx += 1;

        if self.options.contains(JsonOption::ReferenceInput) {
            Ok(s)
        } else {
            Ok(Cow::Owned(s.into_owned()))
        }
    }

    /// Hands the unescaped bytes `buf[run_start..idx]` to the builder.
    fn flush_run(
        &self,
        builder: &mut JsonStringBuilder<'a>,
        run_start: usize,
    ) -> ScanResult<()> {
        let run = &self.buf[run_start..self.idx];
        if run.is_empty() {
            return Ok(());
        }
        if let Err(err) = std::str::from_utf8(run) {
            return Err(self.error_at(
                ParseErrorCode::SyntaxError,
                run_start + err.valid_up_to(),
            ));
        }
        if builder.is_borrowed() {
            builder.append_in_place(run.len());
        } else {
            builder.append_string(run);
        }
        Ok(())
    }

    fn consume_escape(&mut self, builder: &mut JsonStringBuilder<'a>) -> ScanResult<()> {
        builder.convert();
        let escape_start = self.idx;
        self.idx += 1;

        let Some(&letter) = self.buf.get(self.idx) else {
            return Err(self.report_error(ParseErrorCode::InvalidEscape, 0));
        };
        match letter {
            b'u' => {
                self.idx += 1;
                let unit = self.consume_hex(UNICODE_LEN)?;
                let code_point = if is_lead_surrogate(unit) {
                    let trail_start = self.idx;
                    if self.buf.get(self.idx) != Some(&BS) || self.buf.get(self.idx + 1) != Some(&b'u')
                    {
                        return Err(self.error_at(ParseErrorCode::InvalidEscape, escape_start));
                    }
                    self.idx += 2;
                    let trail = self.consume_hex(UNICODE_LEN)?;
                    if !is_trail_surrogate(trail) {
                        return Err(self.error_at(ParseErrorCode::InvalidEscape, trail_start));
                    }
                    combine_surrogates(unit, trail)
                } else {
                    unit as u32
                };
                match char::from_u32(code_point) {
                    Some(c) => builder.append_char(c),
                    // a lone trail surrogate
                    None => return Err(self.error_at(ParseErrorCode::InvalidEscape, escape_start)),
                }
            }
            b'x' => {
                self.idx += 1;
                let byte = self.consume_hex(HEX_BYTE_LEN)?;
                builder.append(byte as u8);
            }
            _ => match decode_simple_escape(letter) {
                Some(byte) => {
                    self.idx += 1;
                    builder.append(byte);
                }
                None => return Err(self.error_at(ParseErrorCode::InvalidEscape, escape_start)),
            },
        }
        Ok(())
    }

    fn consume_hex(&mut self, len: usize) -> ScanResult<u16> {
        let end = (self.idx + len).min(self.buf.len());
        match decode_hex_escape(&self.buf[self.idx..end]) {
            Err(offset) => Err(self.error_at(ParseErrorCode::InvalidEscape, self.idx + offset)),
            Ok(_) if end - self.idx < len => Err(self.error_at(ParseErrorCode::InvalidEscape, end)),
            Ok(n) => {
                self.idx = end;
                Ok(n)
            }
        }
    }

    /// Scans `-? int frac? exp?`. Integers that fit in 32 bits become
    /// `Integer`, every other number becomes `Double`.
    fn consume_number(&mut self) -> ScanResult<JsonValue<'a>> {
        let start = self.idx;
        let negative = self.buf[start] == b'-';
        if negative {
            self.idx += 1;
        }

        if self.options.contains(JsonOption::EnableInfNaN) {
            if let Some(value) = self.consume_special_double(negative)? {
                return Ok(value);
            }
        }

        match self.buf.get(self.idx) {
            Some(b'0') => self.idx += 1,
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => return Err(self.report_error(ParseErrorCode::SyntaxError, 0)),
        }

        let mut is_integer = true;
        if self.buf.get(self.idx) == Some(&b'.') {
            self.idx += 1;
            if self.skip_digits() == 0 {
                return Err(self.report_error(ParseErrorCode::SyntaxError, 0));
            }
            is_integer = false;
        }
        if matches!(self.buf.get(self.idx), Some(b'e' | b'E')) {
            self.idx += 1;
            if matches!(self.buf.get(self.idx), Some(b'+' | b'-')) {
                self.idx += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.report_error(ParseErrorCode::SyntaxError, 0));
            }
            is_integer = false;
        }
        self.expect_delimiter()?;

        let text = &self.buf[start..self.idx];
        if is_integer {
            if let Some(n) = parse_native_integer(text) {
                return Ok(JsonValue::Integer(n as i64));
            }
        }
        let value = fast_float2::parse::<f64, _>(text)
            .map_err(|_| self.error_at(ParseErrorCode::SyntaxError, start))?;
        if !value.is_finite() && !self.options.contains(JsonOption::EnableInfNaN) {
            return Err(self.error_at(ParseErrorCode::SyntaxError, start));
        }
        Ok(JsonValue::Double(value))
    }

    fn consume_special_double(&mut self, negative: bool) -> ScanResult<Option<JsonValue<'a>>> {
        let rest = &self.buf[self.idx..];
        let (len, value) = if !negative && rest.starts_with(LIT_NAN) {
            (LIT_NAN.len(), f64::NAN)
        } else if rest.starts_with(LIT_INFINITY) {
            (LIT_INFINITY.len(), f64::INFINITY)
        } else if rest.starts_with(LIT_INF) {
            (LIT_INF.len(), f64::INFINITY)
        } else {
            return Ok(None);
        };
        self.idx += len;
        self.expect_delimiter()?;
        Ok(Some(JsonValue::Double(if negative { -value } else { value })))
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.idx;
        while matches!(self.buf.get(self.idx), Some(c) if c.is_ascii_digit()) {
            self.idx += 1;
        }
        self.idx - start
    }

    /// Numbers and literals must end at a delimiter, so `043`, `0x43` and
    /// `truex` fail at the first byte past the token.
    fn expect_delimiter(&self) -> ScanResult<()> {
        match self.buf.get(self.idx) {
            Some(c) if c.is_ascii_alphanumeric() || *c == b'.' => {
                Err(self.report_error(ParseErrorCode::SyntaxError, 0))
            }
            _ => Ok(()),
        }
    }

    fn consume_literal(&mut self, literal: &[u8], value: JsonValue<'a>) -> ScanResult<JsonValue<'a>> {
        for expected in literal {
            if self.buf.get(self.idx) != Some(expected) {
                return Err(self.report_error(ParseErrorCode::SyntaxError, 0));
            }
            self.idx += 1;
        }
        self.expect_delimiter()?;
        Ok(value)
    }
}

/// Reads `-?digits` as an `i32`, or `None` when it does not fit.
fn parse_native_integer(text: &[u8]) -> Option<i32> {
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };
    let mut n: i64 = 0;
    for d in digits {
        n = n.checked_mul(10)?.checked_add((d - b'0') as i64)?;
    }
    i32::try_from(if negative { -n } else { n }).ok()
}
