//! When parsing JSON goes wrong.

use core::fmt::{self, Debug, Display};
use core::result;
use std::error;

/// This type represents all possible errors that can occur when parsing JSON
/// text.
pub struct Error {
    /// This `Box` allows us to keep the size of `Error` as small as possible.
    /// A larger `Error` type was substantially slower due to all the functions
    /// that pass around `Result<T, Error>`.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `nanojson::Error`.
pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// One-based line number at which the error was detected.
    ///
    /// Characters in the first line of the input (before the first newline
    /// character) are in line 1.
    pub fn line(&self) -> usize {
        self.err.line
    }

    /// One-based column number at which the error was detected.
    ///
    /// The first character in the input and any characters immediately
    /// following a newline character are in column 1.
    pub fn column(&self) -> usize {
        self.err.column
    }

    /// Specifies the cause of this error.
    ///
    /// Useful when precise error handling is required, for example to react
    /// differently to a truncated document than to a malformed one.
    pub fn code(&self) -> ErrorCode {
        self.err.code
    }
}

struct ErrorImpl {
    code: ErrorCode,
    line: usize,
    column: usize,
}

/// The closed set of parse failures. Exactly one code identifies the first
/// failure found during a single left-to-right scan of the input.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Ran out of input where a JSON value was required.
    ExpectedSomeValue,

    /// Malformed literal or number, or a byte that cannot start a value.
    InvalidValue,

    /// JSON has non-whitespace trailing characters after the root value.
    TrailingCharacters,

    /// Numeric literal overflows the range of a double.
    NumberOutOfRange,

    /// Reached end of input before the closing quotation mark of a string.
    EofWhileParsingString,

    /// Backslash followed by a byte that does not begin a recognized escape.
    InvalidEscape,

    /// Raw control character (below 0x20) found inside a string.
    ControlCharacterWhileParsingString,

    /// `\u` not followed by exactly four hexadecimal digits.
    InvalidUnicodeHexEscape,

    /// Unpaired surrogate, or a pair whose second half is not a low
    /// surrogate.
    InvalidUnicodeSurrogate,

    /// Expected this character to be either a `','` or a `']'`.
    ExpectedListCommaOrEnd,

    /// Object member did not start with a `"`-delimited key.
    ExpectedObjectKey,

    /// Expected this character to be a `':'`.
    ExpectedColon,

    /// Expected this character to be either a `','` or a `'}'`.
    ExpectedObjectCommaOrEnd,

    /// Encountered nesting of JSON arrays and objects more than 128 layers
    /// deep.
    RecursionLimitExceeded,
}

impl Error {
    #[cold]
    pub(crate) fn syntax(code: ErrorCode, line: usize, column: usize) -> Self {
        Error {
            err: Box::new(ErrorImpl { code, line, column }),
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorCode::ExpectedSomeValue => f.write_str("expected value"),
            ErrorCode::InvalidValue => f.write_str("invalid value"),
            ErrorCode::TrailingCharacters => f.write_str("trailing characters"),
            ErrorCode::NumberOutOfRange => f.write_str("number out of range"),
            ErrorCode::EofWhileParsingString => f.write_str("EOF while parsing a string"),
            ErrorCode::InvalidEscape => f.write_str("invalid escape"),
            ErrorCode::ControlCharacterWhileParsingString => {
                f.write_str("control character (\\u0000-\\u001F) found while parsing a string")
            }
            ErrorCode::InvalidUnicodeHexEscape => f.write_str("invalid unicode hex escape"),
            ErrorCode::InvalidUnicodeSurrogate => f.write_str("invalid unicode surrogate"),
            ErrorCode::ExpectedListCommaOrEnd => f.write_str("expected `,` or `]`"),
            ErrorCode::ExpectedObjectKey => f.write_str("key must be a string"),
            ErrorCode::ExpectedColon => f.write_str("expected `:`"),
            ErrorCode::ExpectedObjectCommaOrEnd => f.write_str("expected `,` or `}`"),
            ErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at line {} column {}",
            self.code, self.line, self.column
        )
    }
}

// Remove two layers of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Error({:?}, line: {}, column: {})",
            self.err.code.to_string(),
            self.err.line,
            self.err.column
        )
    }
}
