//! Serialize a `Value` into JSON text.
//!
//! Serialization is infallible: every `Value` has a textual form, writing
//! goes into a growable buffer, and non-finite numbers degrade to `null`
//! rather than erroring.

use crate::value::Value;

/// Serialize the given value as a String of JSON.
///
/// The output is compact: no whitespace between tokens. Parsing the output
/// back yields a structurally equal value.
pub fn to_string(value: &Value) -> String {
    let mut out = Vec::with_capacity(128);
    format_value(value, &mut out, &mut CompactFormatter);
    // Only UTF-8 fragments and ASCII syntax bytes were written.
    unsafe { String::from_utf8_unchecked(out) }
}

/// Serialize the given value as a JSON byte vector.
pub fn to_vec(value: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(128);
    format_value(value, &mut out, &mut CompactFormatter);
    out
}

/// Serialize the given value as a pretty-printed String of JSON, indented
/// with two spaces.
pub fn to_string_pretty(value: &Value) -> String {
    let mut out = Vec::with_capacity(128);
    format_value(value, &mut out, &mut PrettyFormatter::new());
    // Only UTF-8 fragments and ASCII syntax bytes were written.
    unsafe { String::from_utf8_unchecked(out) }
}

/// Serialize the given value as a pretty-printed JSON byte vector.
pub fn to_vec_pretty(value: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(128);
    format_value(value, &mut out, &mut PrettyFormatter::new());
    out
}

fn format_value<F: Formatter>(value: &Value, out: &mut Vec<u8>, formatter: &mut F) {
    match value {
        Value::Null => formatter.write_null(out),
        Value::Bool(b) => formatter.write_bool(out, *b),
        Value::Number(n) => formatter.write_f64(out, *n),
        Value::String(s) => format_escaped_str(out, formatter, s),
        Value::Array(vec) => {
            formatter.begin_array(out);
            let mut first = true;
            for element in vec {
                formatter.begin_array_value(out, first);
                format_value(element, out, formatter);
                formatter.end_array_value(out);
                first = false;
            }
            formatter.end_array(out);
        }
        Value::Object(map) => {
            formatter.begin_object(out);
            let mut first = true;
            for (key, member) in map {
                formatter.begin_object_key(out, first);
                format_escaped_str(out, formatter, key);
                formatter.begin_object_value(out);
                format_value(member, out, formatter);
                formatter.end_object_value(out);
                first = false;
            }
            formatter.end_object(out);
        }
    }
}

/// This trait abstracts away serializing the JSON control characters, which
/// allows the user to optionally pretty print the JSON output.
pub trait Formatter {
    /// Writes a `null` value to the output.
    fn write_null(&mut self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"null");
    }

    /// Writes a `true` or `false` value to the output.
    fn write_bool(&mut self, out: &mut Vec<u8>, value: bool) {
        let s = if value {
            b"true" as &[u8]
        } else {
            b"false" as &[u8]
        };
        out.extend_from_slice(s);
    }

    /// Writes a floating point number to the output.
    ///
    /// Integers that survived the round trip through f64 print without a
    /// fraction, so `123` stays `123` rather than becoming `123.0`. The
    /// exceptions are negative zero, which needs the float formatter to
    /// keep its sign, and non-finite values, which have no JSON spelling
    /// and print as `null`.
    fn write_f64(&mut self, out: &mut Vec<u8>, value: f64) {
        if !value.is_finite() {
            out.extend_from_slice(b"null");
        } else if value == value.trunc()
            && value.abs() < 9_007_199_254_740_992.0
            && !(value == 0.0 && value.is_sign_negative())
        {
            let mut buffer = itoa::Buffer::new();
            out.extend_from_slice(buffer.format(value as i64).as_bytes());
        } else {
            let mut buffer = zmij::Buffer::new();
            out.extend_from_slice(buffer.format_finite(value).as_bytes());
        }
    }

    /// Called before each series of `write_string_fragment` and
    /// `write_char_escape`. Writes a `"` to the output.
    fn begin_string(&mut self, out: &mut Vec<u8>) {
        out.push(b'"');
    }

    /// Called after each series of `write_string_fragment` and
    /// `write_char_escape`. Writes a `"` to the output.
    fn end_string(&mut self, out: &mut Vec<u8>) {
        out.push(b'"');
    }

    /// Writes a string fragment that doesn't need any escaping to the
    /// output.
    fn write_string_fragment(&mut self, out: &mut Vec<u8>, fragment: &str) {
        out.extend_from_slice(fragment.as_bytes());
    }

    /// Writes a character escape code to the output.
    fn write_char_escape(&mut self, out: &mut Vec<u8>, char_escape: CharEscape) {
        use self::CharEscape::*;

        let s = match char_escape {
            Quote => b"\\\"" as &[u8],
            ReverseSolidus => b"\\\\",
            Backspace => b"\\b",
            FormFeed => b"\\f",
            LineFeed => b"\\n",
            CarriageReturn => b"\\r",
            Tab => b"\\t",
            AsciiControl(byte) => {
                static HEX_DIGITS: [u8; 16] = *b"0123456789ABCDEF";
                let bytes = &[
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX_DIGITS[(byte >> 4) as usize],
                    HEX_DIGITS[(byte & 0xF) as usize],
                ];
                out.extend_from_slice(bytes);
                return;
            }
        };

        out.extend_from_slice(s);
    }

    /// Called before every array. Writes a `[` to the output.
    fn begin_array(&mut self, out: &mut Vec<u8>) {
        out.push(b'[');
    }

    /// Called after every array. Writes a `]` to the output.
    fn end_array(&mut self, out: &mut Vec<u8>) {
        out.push(b']');
    }

    /// Called before every array value. Writes a `,` if needed to the
    /// output.
    fn begin_array_value(&mut self, out: &mut Vec<u8>, first: bool) {
        if !first {
            out.push(b',');
        }
    }

    /// Called after every array value.
    fn end_array_value(&mut self, _out: &mut Vec<u8>) {}

    /// Called before every object. Writes a `{` to the output.
    fn begin_object(&mut self, out: &mut Vec<u8>) {
        out.push(b'{');
    }

    /// Called after every object. Writes a `}` to the output.
    fn end_object(&mut self, out: &mut Vec<u8>) {
        out.push(b'}');
    }

    /// Called before every object key.
    fn begin_object_key(&mut self, out: &mut Vec<u8>, first: bool) {
        if !first {
            out.push(b',');
        }
    }

    /// Called before every object value. A `:` should be written to the
    /// output here, along with any whitespace around it.
    fn begin_object_value(&mut self, out: &mut Vec<u8>) {
        out.push(b':');
    }

    /// Called after every object value.
    fn end_object_value(&mut self, _out: &mut Vec<u8>) {}
}

/// This structure compacts a JSON value with no extra whitespace.
#[derive(Clone, Debug)]
pub struct CompactFormatter;

impl Formatter for CompactFormatter {}

/// This structure pretty prints a JSON value to make it human readable.
#[derive(Clone, Debug)]
pub struct PrettyFormatter<'a> {
    current_indent: usize,
    has_value: bool,
    indent: &'a [u8],
}

impl<'a> PrettyFormatter<'a> {
    /// Construct a pretty printer formatter that defaults to using two
    /// spaces for indentation.
    pub fn new() -> Self {
        PrettyFormatter::with_indent(b"  ")
    }

    /// Construct a pretty printer formatter that uses the `indent` string
    /// for indentation.
    pub fn with_indent(indent: &'a [u8]) -> Self {
        PrettyFormatter {
            current_indent: 0,
            has_value: false,
            indent,
        }
    }
}

impl<'a> Default for PrettyFormatter<'a> {
    fn default() -> Self {
        PrettyFormatter::new()
    }
}

impl<'a> Formatter for PrettyFormatter<'a> {
    fn begin_array(&mut self, out: &mut Vec<u8>) {
        self.current_indent += 1;
        self.has_value = false;
        out.push(b'[');
    }

    fn end_array(&mut self, out: &mut Vec<u8>) {
        self.current_indent -= 1;
        if self.has_value {
            out.push(b'\n');
            indent(out, self.current_indent, self.indent);
        }
        out.push(b']');
    }

    fn begin_array_value(&mut self, out: &mut Vec<u8>, first: bool) {
        if !first {
            out.push(b',');
        }
        out.push(b'\n');
        indent(out, self.current_indent, self.indent);
    }

    fn end_array_value(&mut self, _out: &mut Vec<u8>) {
        self.has_value = true;
    }

    fn begin_object(&mut self, out: &mut Vec<u8>) {
        self.current_indent += 1;
        self.has_value = false;
        out.push(b'{');
    }

    fn end_object(&mut self, out: &mut Vec<u8>) {
        self.current_indent -= 1;
        if self.has_value {
            out.push(b'\n');
            indent(out, self.current_indent, self.indent);
        }
        out.push(b'}');
    }

    fn begin_object_key(&mut self, out: &mut Vec<u8>, first: bool) {
        if !first {
            out.push(b',');
        }
        out.push(b'\n');
        indent(out, self.current_indent, self.indent);
    }

    fn begin_object_value(&mut self, out: &mut Vec<u8>) {
        out.extend_from_slice(b": ");
    }

    fn end_object_value(&mut self, _out: &mut Vec<u8>) {
        self.has_value = true;
    }
}

fn indent(out: &mut Vec<u8>, n: usize, s: &[u8]) {
    for _ in 0..n {
        out.extend_from_slice(s);
    }
}

/// Represents a character escape code in a type-safe manner.
pub enum CharEscape {
    /// An escaped quote `"`
    Quote,
    /// An escaped reverse solidus `\`
    ReverseSolidus,
    /// An escaped backspace character (usually escaped as `\b`)
    Backspace,
    /// An escaped form feed character (usually escaped as `\f`)
    FormFeed,
    /// An escaped line feed character (usually escaped as `\n`)
    LineFeed,
    /// An escaped carriage return character (usually escaped as `\r`)
    CarriageReturn,
    /// An escaped tab character (usually escaped as `\t`)
    Tab,
    /// An escaped ASCII plane control character (usually escaped as
    /// `\u00XX` where `XX` are two hex characters)
    AsciiControl(u8),
}

impl CharEscape {
    #[inline]
    fn from_escape_table(escape: u8, byte: u8) -> CharEscape {
        match escape {
            self::BB => CharEscape::Backspace,
            self::TT => CharEscape::Tab,
            self::NN => CharEscape::LineFeed,
            self::FF => CharEscape::FormFeed,
            self::RR => CharEscape::CarriageReturn,
            self::QU => CharEscape::Quote,
            self::BS => CharEscape::ReverseSolidus,
            self::UU => CharEscape::AsciiControl(byte),
            _ => unreachable!(),
        }
    }
}

fn format_escaped_str<F: Formatter>(out: &mut Vec<u8>, formatter: &mut F, value: &str) {
    formatter.begin_string(out);

    let bytes = value.as_bytes();
    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let escape = ESCAPE[byte as usize];
        if escape == 0 {
            continue;
        }

        if start < i {
            formatter.write_string_fragment(out, &value[start..i]);
        }

        let char_escape = CharEscape::from_escape_table(escape, byte);
        formatter.write_char_escape(out, char_escape);

        start = i + 1;
    }

    if start < bytes.len() {
        formatter.write_string_fragment(out, &value[start..]);
    }

    formatter.end_string(out);
}

const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const FF: u8 = b'f'; // \x0C
const RR: u8 = b'r'; // \x0D
const QU: u8 = b'"'; // \x22
const BS: u8 = b'\\'; // \x5C
const UU: u8 = b'u'; // \x00...\x1F except the ones above
const __: u8 = 0;

// Lookup table of escape sequences. A value of b'x' at index i means that
// byte i is escaped as "\x" in JSON. A value of 0 means that byte i is not
// escaped.
static ESCAPE: [u8; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    UU, UU, UU, UU, UU, UU, UU, UU, BB, TT, NN, UU, FF, RR, UU, UU, // 0
    UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, // 1
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
];
