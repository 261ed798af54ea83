pub mod de;
pub mod io;

use bytes::Bytes;
use snafu::prelude::*;

#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("incomplete bencode data"))]
    Incomplete,

    #[snafu(display("unexpected {production} prefix character: '{}'", prefix.escape_ascii()))]
    Prefix {
        prefix: u8,
        production: &'static str,
    },

    #[snafu(display("byte string size limit exceeded: {size}"))]
    ByteStringSizeExceeded { size: usize },

    // BEP 3 specifies that integers have unlimited precision, but we do not support this for
    // practical reasons.
    #[snafu(display("integer buffer overflow: {buffer:?}"))]
    IntegerBufferOverflow { buffer: Bytes },
    #[snafu(display("invalid integer: {integer:?}"))]
    Integer { integer: Bytes },
    #[snafu(display("{int_type_name} overflow: {integer:?}"))]
    IntegerOverflow {
        int_type_name: &'static str,
        integer: Bytes,
    },

    #[snafu(display("nesting depth limit exceeded: {depth}"))]
    NestingTooDeep { depth: usize },

    #[snafu(display("trailing data: {size} bytes"))]
    TrailingData { size: usize },

    //
    // Strict Bencode errors.
    //
    #[snafu(display("expect strict byte string length: {length:?}"))]
    StrictLength { length: Bytes },
    #[snafu(display("expect strictly increasing dictionary keys: {last_key:?} >= {key:?}"))]
    StrictDictionaryKey { last_key: Bytes, key: Bytes },
}

/// Coarse classification of decode failures.
///
/// Several `Error` variants can share one kind; for example, an integer that overflows `i64` and
/// an integer with a leading zero are both `MalformedInteger`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    UnexpectedEndOfInput,
    MalformedTag,
    MalformedInteger,
    NestingTooDeep,
    ByteStringSizeExceeded,
    TrailingData,
    StrictDictionaryKey,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Incomplete => ErrorKind::UnexpectedEndOfInput,
            Self::Prefix { .. } => ErrorKind::MalformedTag,
            Self::ByteStringSizeExceeded { .. } => ErrorKind::ByteStringSizeExceeded,
            Self::IntegerBufferOverflow { .. }
            | Self::Integer { .. }
            | Self::IntegerOverflow { .. }
            | Self::StrictLength { .. } => ErrorKind::MalformedInteger,
            Self::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            Self::TrailingData { .. } => ErrorKind::TrailingData,
            Self::StrictDictionaryKey { .. } => ErrorKind::StrictDictionaryKey,
        }
    }
}

impl self::de::Error for Error {
    fn kind(&self) -> ErrorKind {
        Error::kind(self)
    }
}
