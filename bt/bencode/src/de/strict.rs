use std::any;
use std::str;

use bytes::Bytes;
use snafu::prelude::*;

use crate::error::{Error, IntegerSnafu, StrictDictionaryKeySnafu, StrictLengthSnafu};
use crate::int::Int;

/// Checks that differ between strict and non-strict decoding.
///
/// Integer values are always held to the canonical form (no leading zeros, no negative zero)
/// because a non-canonical integer has no unique interpretation.  Byte string lengths and
/// dictionary key order are only checked in strict mode.
pub(crate) trait Strictness {
    fn ensure_length(length: &[u8]) -> Result<(), Error>;

    fn ensure_dictionary_key(last_key: &Bytes, key: &Bytes) -> Result<(), Error>;
}

pub(crate) struct Strict;

impl Strictness for Strict {
    fn ensure_length(length: &[u8]) -> Result<(), Error> {
        ensure!(
            lazy_regex::regex_is_match!(r"(?x-u) ^ (?: 0 | [1-9] \d* ) $ "B, length),
            StrictLengthSnafu {
                length: Bytes::copy_from_slice(length),
            },
        );
        Ok(())
    }

    fn ensure_dictionary_key(last_key: &Bytes, key: &Bytes) -> Result<(), Error> {
        ensure!(
            last_key < key,
            StrictDictionaryKeySnafu {
                last_key: last_key.clone(),
                key: key.clone(),
            },
        );
        Ok(())
    }
}

pub(crate) struct NonStrict;

impl Strictness for NonStrict {
    fn ensure_length(_length: &[u8]) -> Result<(), Error> {
        Ok(())
    }

    fn ensure_dictionary_key(_last_key: &Bytes, _key: &Bytes) -> Result<(), Error> {
        Ok(())
    }
}

pub(crate) fn ensure_integer(integer: &[u8]) -> Result<(), Error> {
    ensure!(
        lazy_regex::regex_is_match!(r#"(?x-u) ^ (?: 0 | -? [1-9] \d* ) $ "#B, integer),
        IntegerSnafu {
            integer: Bytes::copy_from_slice(integer),
        },
    );
    Ok(())
}

/// Parses a string of ASCII digits, optionally preceded by a minus sign.
///
/// The caller is responsible for checking the form of `integer`; only range is checked here.
pub(crate) fn parse_integer<I>(integer: &[u8]) -> Result<I, Error>
where
    I: Int,
{
    str::from_utf8(integer)
        .ok()
        .and_then(|integer| integer.parse::<I>().ok())
        .ok_or_else(|| Error::IntegerOverflow {
            int_type_name: any::type_name::<I>(),
            integer: Bytes::copy_from_slice(integer),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_integer() {
        for testdata in [b"0".as_slice(), b"1", b"23456789", b"-1", b"-9876543210"] {
            assert_eq!(super::ensure_integer(testdata), Ok(()));
        }

        for testdata in [
            b"".as_slice(),
            b"-",
            b" ",
            b"\x00",
            b" 1",
            b"1 ",
            b"1,0",
            b"- 1",
            b"00",
            b"-0",
            b"01",
            b"-02",
        ] {
            assert!(matches!(
                super::ensure_integer(testdata),
                Err(Error::Integer { .. }),
            ));
        }
    }

    #[test]
    fn ensure_length() {
        for testdata in [b"0".as_slice(), b"1", b"23456789"] {
            assert_eq!(Strict::ensure_length(testdata), Ok(()));
            assert_eq!(NonStrict::ensure_length(testdata), Ok(()));
        }

        for testdata in [b"00".as_slice(), b"01", b"0002"] {
            assert!(matches!(
                Strict::ensure_length(testdata),
                Err(Error::StrictLength { .. }),
            ));
            assert_eq!(NonStrict::ensure_length(testdata), Ok(()));
        }
    }

    #[test]
    fn parse_integer() {
        assert_eq!(super::parse_integer(b"0"), Ok(0i64));
        assert_eq!(super::parse_integer(b"123"), Ok(123i64));
        assert_eq!(super::parse_integer(b"-123"), Ok(-123i64));
        assert_eq!(super::parse_integer(b"0042"), Ok(42usize));
        assert_eq!(
            super::parse_integer(b"9223372036854775807"),
            Ok(i64::MAX),
        );
        assert_eq!(
            super::parse_integer(b"-9223372036854775808"),
            Ok(i64::MIN),
        );

        assert!(matches!(
            super::parse_integer::<i64>(b"9223372036854775808"),
            Err(Error::IntegerOverflow { .. }),
        ));
        assert!(matches!(
            super::parse_integer::<i64>(b"-9223372036854775809"),
            Err(Error::IntegerOverflow { .. }),
        ));
        assert!(matches!(
            super::parse_integer::<usize>(b"-1"),
            Err(Error::IntegerOverflow { .. }),
        ));
        assert!(matches!(
            super::parse_integer::<usize>(b"99999999999999999999999"),
            Err(Error::IntegerOverflow { .. }),
        ));
    }

    #[test]
    fn ensure_dictionary_key() {
        let key0 = Bytes::from_static(b"aaa");
        let key1 = Bytes::from_static(b"bb");

        assert_eq!(Strict::ensure_dictionary_key(&key0, &key1), Ok(()));
        assert_eq!(NonStrict::ensure_dictionary_key(&key0, &key1), Ok(()));

        assert!(matches!(
            Strict::ensure_dictionary_key(&key1, &key0),
            Err(Error::StrictDictionaryKey { .. }),
        ));
        assert_eq!(NonStrict::ensure_dictionary_key(&key1, &key0), Ok(()));

        assert!(matches!(
            Strict::ensure_dictionary_key(&key0, &key0),
            Err(Error::StrictDictionaryKey { .. }),
        ));
        assert_eq!(NonStrict::ensure_dictionary_key(&key0, &key0), Ok(()));
    }
}
