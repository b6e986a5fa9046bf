//! Parse JSON text into a `Value`.

use crate::error::{Error, ErrorCode, Result};
use crate::map::Map;
use crate::scratch::{Mark, Scratch};
use crate::value::Value;
use core::{cmp, str};

/// Parses a string of JSON text into a [`Value`].
///
/// The entire input must be consumed: a single JSON value, optionally
/// surrounded by whitespace, and nothing else. Errors carry the line and
/// column at which parsing gave up.
///
/// ```
/// let value = nanojson::from_str("[null, true, 3.5]")?;
/// assert_eq!(value[2], 3.5);
/// # Ok::<(), nanojson::Error>(())
/// ```
pub fn from_str(s: &str) -> Result<Value> {
    let mut parser = Parser::new(s.as_bytes());
    parser.parse_whitespace();
    let value = parser.parse_value()?;
    parser.parse_whitespace();
    if parser.peek().is_some() {
        return Err(parser.peek_error(ErrorCode::TrailingCharacters));
    }
    Ok(value)
}

/// How deeply nested arrays and objects may be before parsing gives up with
/// `ErrorCode::RecursionLimitExceeded`. Each level of nesting costs a stack
/// frame, so the limit is what keeps adversarial input like `[[[[...` from
/// overflowing the stack.
const MAX_DEPTH: u8 = 128;

struct Parser<'a> {
    slice: &'a [u8],
    /// Index of the *next* byte that will be examined.
    index: usize,
    scratch: Scratch,
    remaining_depth: u8,
}

impl<'a> Parser<'a> {
    fn new(slice: &'a [u8]) -> Self {
        Parser {
            slice,
            index: 0,
            scratch: Scratch::new(),
            remaining_depth: MAX_DEPTH,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.slice.get(self.index).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn parse_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.index += 1;
        }
    }

    /// Error at the current position, for use after `next` has consumed
    /// past the offending byte or when the input ran out.
    #[cold]
    fn error(&self, code: ErrorCode) -> Error {
        let position = self.position_of_index(self.index);
        Error::syntax(code, position.line, position.column)
    }

    /// Error at the byte `peek` is looking at. The peeked byte has not been
    /// consumed, so it sits one past the current index; cap at the input
    /// length in case the most recent call was `next` on the last byte.
    #[cold]
    fn peek_error(&self, code: ErrorCode) -> Error {
        let position = self.position_of_index(cmp::min(self.slice.len(), self.index + 1));
        Error::syntax(code, position.line, position.column)
    }

    fn position_of_index(&self, index: usize) -> Position {
        let start_of_line = match memchr::memrchr(b'\n', &self.slice[..index]) {
            Some(position) => position + 1,
            None => 0,
        };
        Position {
            line: 1 + memchr::memchr_iter(b'\n', &self.slice[..start_of_line]).count(),
            column: index - start_of_line,
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            Some(b'n') => {
                self.index += 1;
                self.parse_ident(b"ull")?;
                Ok(Value::Null)
            }
            Some(b't') => {
                self.index += 1;
                self.parse_ident(b"rue")?;
                Ok(Value::Bool(true))
            }
            Some(b'f') => {
                self.index += 1;
                self.parse_ident(b"alse")?;
                Ok(Value::Bool(false))
            }
            Some(b'"') => {
                self.index += 1;
                self.parse_string().map(Value::String)
            }
            Some(b'[') => {
                self.index += 1;
                self.parse_array()
            }
            Some(b'{') => {
                self.index += 1;
                self.parse_object()
            }
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.peek_error(ErrorCode::InvalidValue)),
            None => Err(self.error(ErrorCode::ExpectedSomeValue)),
        }
    }

    /// Consumes the tail of a keyword whose first byte has already been
    /// matched. `nul`, `truf`, and other near misses are invalid values,
    /// not unknown identifiers.
    fn parse_ident(&mut self, ident: &[u8]) -> Result<()> {
        for expected in ident {
            match self.next() {
                Some(next) if next == *expected => {}
                _ => return Err(self.error(ErrorCode::InvalidValue)),
            }
        }
        Ok(())
    }

    /// Validates the number grammar over the raw bytes, then lets the
    /// standard library convert the vetted slice. The grammar is strict
    /// JSON: no leading `+`, no leading zeros, no bare `.5` or `1.`, no
    /// hex, no `inf`/`nan` keywords.
    fn parse_number(&mut self) -> Result<Value> {
        let start = self.index;

        if self.peek() == Some(b'-') {
            self.index += 1;
        }

        match self.peek() {
            Some(b'0') => {
                self.index += 1;
            }
            Some(b'1'..=b'9') => {
                self.index += 1;
                while let Some(b'0'..=b'9') = self.peek() {
                    self.index += 1;
                }
            }
            _ => return Err(self.peek_error(ErrorCode::InvalidValue)),
        }

        if self.peek() == Some(b'.') {
            self.index += 1;
            match self.peek() {
                Some(b'0'..=b'9') => {
                    while let Some(b'0'..=b'9') = self.peek() {
                        self.index += 1;
                    }
                }
                _ => return Err(self.peek_error(ErrorCode::InvalidValue)),
            }
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.index += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.index += 1;
            }
            match self.peek() {
                Some(b'0'..=b'9') => {
                    while let Some(b'0'..=b'9') = self.peek() {
                        self.index += 1;
                    }
                }
                _ => return Err(self.peek_error(ErrorCode::InvalidValue)),
            }
        }

        // The slice is ASCII digits, sign, dot, and exponent only, and it
        // matched the grammar above, so from_str cannot fail. It can
        // overflow to infinity though, e.g. "1e309".
        let literal = unsafe { str::from_utf8_unchecked(&self.slice[start..self.index]) };
        match literal.parse::<f64>() {
            Ok(float) if float.is_finite() => Ok(Value::Number(float)),
            _ => Err(self.error(ErrorCode::NumberOutOfRange)),
        }
    }

    /// Parses the body of a string whose opening quote has already been
    /// consumed.
    ///
    /// Runs of plain bytes are copied straight out of the input; the
    /// scratch buffer only gets involved once an escape shows up. Escaped
    /// segments accumulate above `mark`, and the finished string always
    /// leaves the scratch as it was found so sibling strings can reuse it.
    fn parse_string(&mut self) -> Result<String> {
        let mark = self.scratch.mark();
        match self.parse_string_bytes(mark) {
            Ok(string) => Ok(string),
            Err(err) => {
                // No partial bytes may survive into the next string.
                self.scratch.rewind(mark);
                Err(err)
            }
        }
    }

    fn parse_string_bytes(&mut self, mark: Mark) -> Result<String> {
        let mut start = self.index;

        loop {
            while self.index < self.slice.len() && !NEEDS_ATTENTION[self.slice[self.index] as usize]
            {
                self.index += 1;
            }
            match self.peek() {
                Some(b'"') => {
                    let string = if self.scratch.len() == mark {
                        // No escapes: the input bytes between the quotes
                        // came from a &str, so they are already UTF-8.
                        unsafe { str::from_utf8_unchecked(&self.slice[start..self.index]) }
                            .to_owned()
                    } else {
                        self.scratch.extend_from_slice(&self.slice[start..self.index]);
                        let string =
                            unsafe { str::from_utf8_unchecked(self.scratch.since(mark)) }
                                .to_owned();
                        self.scratch.rewind(mark);
                        string
                    };
                    self.index += 1;
                    return Ok(string);
                }
                Some(b'\\') => {
                    self.scratch.extend_from_slice(&self.slice[start..self.index]);
                    self.index += 1;
                    self.parse_escape()?;
                    start = self.index;
                }
                Some(_) => {
                    // A raw control character (0x00..0x20) must be escaped.
                    return Err(self.peek_error(ErrorCode::ControlCharacterWhileParsingString));
                }
                None => {
                    return Err(self.error(ErrorCode::EofWhileParsingString));
                }
            }
        }
    }

    /// Handles the byte after a `\`, pushing the decoded bytes onto the
    /// scratch buffer.
    fn parse_escape(&mut self) -> Result<()> {
        let ch = match self.next() {
            Some(ch) => ch,
            None => return Err(self.error(ErrorCode::EofWhileParsingString)),
        };

        match ch {
            b'"' => self.scratch.push(b'"'),
            b'\\' => self.scratch.push(b'\\'),
            b'/' => self.scratch.push(b'/'),
            b'b' => self.scratch.push(b'\x08'),
            b'f' => self.scratch.push(b'\x0c'),
            b'n' => self.scratch.push(b'\n'),
            b'r' => self.scratch.push(b'\r'),
            b't' => self.scratch.push(b'\t'),
            b'u' => return self.parse_unicode_escape(),
            _ => return Err(self.error(ErrorCode::InvalidEscape)),
        }
        Ok(())
    }

    /// Decodes a `\uXXXX` escape, pairing surrogates. Both halves of a
    /// surrogate pair must be written as hex escapes; an unpaired half in
    /// either position is rejected so the decoded string stays valid UTF-8.
    fn parse_unicode_escape(&mut self) -> Result<()> {
        let high = self.decode_hex_escape()?;

        let code_point = match high {
            0xDC00..=0xDFFF => {
                return Err(self.error(ErrorCode::InvalidUnicodeSurrogate));
            }
            0xD800..=0xDBFF => {
                if self.next() != Some(b'\\') || self.next() != Some(b'u') {
                    return Err(self.error(ErrorCode::InvalidUnicodeSurrogate));
                }
                let low = self.decode_hex_escape()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error(ErrorCode::InvalidUnicodeSurrogate));
                }
                0x1_0000 + (((high - 0xD800) as u32) << 10 | (low - 0xDC00) as u32)
            }
            _ => high as u32,
        };

        self.scratch.push_code_point(code_point);
        Ok(())
    }

    fn decode_hex_escape(&mut self) -> Result<u16> {
        if self.index + 4 > self.slice.len() {
            self.index = self.slice.len();
            return Err(self.error(ErrorCode::InvalidUnicodeHexEscape));
        }

        let a = self.slice[self.index];
        let b = self.slice[self.index + 1];
        let c = self.slice[self.index + 2];
        let d = self.slice[self.index + 3];
        match decode_four_hex_digits(a, b, c, d) {
            Some(val) => {
                self.index += 4;
                Ok(val)
            }
            None => Err(self.error(ErrorCode::InvalidUnicodeHexEscape)),
        }
    }

    /// Parses the elements of an array whose `[` has already been consumed.
    ///
    /// Elements accumulate in a local `Vec`; if any element fails, the
    /// vector drops the completed prefix on unwind and nothing leaks.
    fn parse_array(&mut self) -> Result<Value> {
        self.remaining_depth -= 1;
        if self.remaining_depth == 0 {
            return Err(self.error(ErrorCode::RecursionLimitExceeded));
        }

        let mut vec = Vec::new();
        self.parse_whitespace();
        if self.peek() == Some(b']') {
            self.index += 1;
            self.remaining_depth += 1;
            return Ok(Value::Array(vec));
        }

        loop {
            vec.push(self.parse_value()?);
            self.parse_whitespace();
            match self.next() {
                Some(b',') => self.parse_whitespace(),
                Some(b']') => {
                    self.remaining_depth += 1;
                    return Ok(Value::Array(vec));
                }
                _ => return Err(self.error(ErrorCode::ExpectedListCommaOrEnd)),
            }
        }
    }

    /// Parses the members of an object whose `{` has already been consumed.
    ///
    /// Members go into the map in source order, and a repeated key is kept
    /// as a distinct member rather than overwriting the first.
    fn parse_object(&mut self) -> Result<Value> {
        self.remaining_depth -= 1;
        if self.remaining_depth == 0 {
            return Err(self.error(ErrorCode::RecursionLimitExceeded));
        }

        let mut members = Vec::new();
        self.parse_whitespace();
        if self.peek() == Some(b'}') {
            self.index += 1;
            self.remaining_depth += 1;
            return Ok(Value::Object(Map::from(members)));
        }

        loop {
            if self.next() != Some(b'"') {
                return Err(self.error(ErrorCode::ExpectedObjectKey));
            }
            let key = self.parse_string()?;
            self.parse_whitespace();
            if self.next() != Some(b':') {
                return Err(self.error(ErrorCode::ExpectedColon));
            }
            self.parse_whitespace();
            let value = self.parse_value()?;
            members.push((key, value));
            self.parse_whitespace();
            match self.next() {
                Some(b',') => self.parse_whitespace(),
                Some(b'}') => {
                    self.remaining_depth += 1;
                    return Ok(Value::Object(Map::from(members)));
                }
                _ => return Err(self.error(ErrorCode::ExpectedObjectCommaOrEnd)),
            }
        }
    }
}

struct Position {
    line: usize,
    column: usize,
}

// Bytes at which the inner string-scanning loop must stop: the closing
// quote, the escape introducer, and the control characters JSON forbids in
// raw form.
static NEEDS_ATTENTION: [bool; 256] = {
    const CT: bool = true; // control character \x00..=\x1F
    const QU: bool = true; // quote \x22
    const BS: bool = true; // backslash \x5C
    const __: bool = false; // allow unescaped
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 0
        CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 1
        __, __, QU, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
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

const fn decode_hex_val_slow(val: u8) -> Option<u8> {
    match val {
        b'0'..=b'9' => Some(val - b'0'),
        b'a'..=b'f' => Some(val - b'a' + 10),
        b'A'..=b'F' => Some(val - b'A' + 10),
        _ => None,
    }
}

const fn build_hex_table(shift: usize) -> [i16; 256] {
    let mut table = [0; 256];
    let mut ch = 0;
    while ch < 256 {
        table[ch] = match decode_hex_val_slow(ch as u8) {
            Some(val) => (val as i16) << shift,
            None => -1,
        };
        ch += 1;
    }
    table
}

static HEX0: [i16; 256] = build_hex_table(0);
static HEX1: [i16; 256] = build_hex_table(4);

/// Fast hex decode of four digits at once. If any of the four digits was a
/// non-hex byte, its table entry is -1 and the sign bit of the combined
/// value is set; a single comparison catches all four.
fn decode_four_hex_digits(a: u8, b: u8, c: u8, d: u8) -> Option<u16> {
    let a = HEX1[a as usize] as i32;
    let b = HEX0[b as usize] as i32;
    let c = HEX1[c as usize] as i32;
    let d = HEX0[d as usize] as i32;

    let codepoint = ((a | b) << 8) | c | d;

    if codepoint >= 0 {
        Some(codepoint as u16)
    } else {
        None
    }
}
