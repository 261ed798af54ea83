pub(crate) mod strict;

use std::io;
use std::marker::PhantomData;

use bytes::{Buf, Bytes};
use snafu::prelude::*;

use crate::cursor::{BYTE_STRING_SIZE_LIMIT, Cursor, Source};
use crate::error::io::Error as IoError;
use crate::error::{
    self, Error, IntegerSnafu, NestingTooDeepSnafu, PrefixSnafu, TrailingDataSnafu,
};
use crate::int::INTEGER_BUF_SIZE;
use crate::value::{Dictionary, Integer, List, Value};

use self::strict::{NonStrict, Strict, Strictness};

pub const DEFAULT_MAX_DEPTH: usize = 256;

pub fn from_buf<B>(buf: B) -> Result<Value, Error>
where
    B: Buf,
{
    DecodeOptions::new().decode_value(buf)
}

pub fn from_buf_dictionary<B>(buf: B) -> Result<Dictionary, Error>
where
    B: Buf,
{
    DecodeOptions::new().decode_dictionary(buf)
}

/// Decodes a value that spans the entire slice.
pub fn from_slice(mut slice: &[u8]) -> Result<Value, Error> {
    let value = from_buf(&mut slice)?;
    ensure!(
        slice.is_empty(),
        TrailingDataSnafu { size: slice.len() },
    );
    Ok(value)
}

pub fn from_reader<R>(reader: R) -> Result<Value, IoError>
where
    R: io::Read,
{
    DecodeOptions::new().decode_value(reader)
}

pub fn from_reader_dictionary<R>(reader: R) -> Result<Dictionary, IoError>
where
    R: io::Read,
{
    DecodeOptions::new().decode_dictionary(reader)
}

/// Decoder settings.
///
/// Strict mode requires canonical Bencode: dictionary keys must be strictly increasing, and byte
/// string lengths must not have leading zeros.  In non-strict mode, duplicate dictionary keys are
/// accepted, and the last one wins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodeOptions {
    max_depth: usize,
    byte_string_size_limit: usize,
    strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            byte_string_size_limit: BYTE_STRING_SIZE_LIMIT,
            strict: false,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn byte_string_size_limit(mut self, byte_string_size_limit: usize) -> Self {
        self.byte_string_size_limit = byte_string_size_limit;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn decode_value<R, E>(&self, source: R) -> Result<Value, E>
    where
        R: Source<E>,
        E: error::de::Error,
    {
        if self.strict {
            run(self.decoder::<_, _, Strict>(source), Decoder::decode_value)
        } else {
            run(self.decoder::<_, _, NonStrict>(source), Decoder::decode_value)
        }
    }

    pub fn decode_dictionary<R, E>(&self, source: R) -> Result<Dictionary, E>
    where
        R: Source<E>,
        E: error::de::Error,
    {
        if self.strict {
            run(self.decoder::<_, _, Strict>(source), Decoder::decode_dictionary)
        } else {
            run(
                self.decoder::<_, _, NonStrict>(source),
                Decoder::decode_dictionary,
            )
        }
    }

    fn decoder<R, E, S>(&self, source: R) -> Decoder<R, E, S> {
        Decoder::new(
            Cursor::with_limit(source, self.byte_string_size_limit),
            self.max_depth,
        )
    }
}

fn run<R, E, S, T>(
    mut decoder: Decoder<R, E, S>,
    decode: fn(&mut Decoder<R, E, S>) -> Result<T, E>,
) -> Result<T, E>
where
    R: Source<E>,
    E: error::de::Error,
    S: Strictness,
{
    decode(&mut decoder).inspect_err(|error| {
        tracing::debug!(position = decoder.cursor.position(), %error, "bencode decode error");
    })
}

/// Recursive-descent Bencode decoder.
///
/// Each `decode_*` method consumes exactly one production, including its prefix character.  On
/// error, the input is left at an unspecified position and should be discarded.
pub(crate) struct Decoder<R, E, S> {
    cursor: Cursor<R, E>,
    depth: usize,
    max_depth: usize,
    _phantom: PhantomData<S>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Token {
    ByteString,
    Integer,
    List,
    Dictionary,
}

impl Token {
    fn new(prefix: u8, production: &'static str) -> Result<Self, Error> {
        match prefix {
            b'0'..=b'9' => Ok(Self::ByteString),
            b'i' => Ok(Self::Integer),
            b'l' => Ok(Self::List),
            b'd' => Ok(Self::Dictionary),
            _ => Err(Error::Prefix { prefix, production }),
        }
    }
}

impl<R, E, S> Decoder<R, E, S> {
    pub(crate) fn new(cursor: Cursor<R, E>, max_depth: usize) -> Self {
        Self {
            cursor,
            depth: 0,
            max_depth,
            _phantom: PhantomData,
        }
    }
}

impl<R, E, S> Decoder<R, E, S>
where
    R: Source<E>,
    E: error::de::Error,
    S: Strictness,
{
    pub(crate) fn decode_value(&mut self) -> Result<Value, E> {
        let token = self.peek_token("value")?;
        self.decode_token(token)
    }

    pub(crate) fn decode_byte_string(&mut self) -> Result<Bytes, E> {
        let mut buf = [0u8; INTEGER_BUF_SIZE];
        let end = self.cursor.read_digits(&mut buf, 0)?;
        let prefix = self.cursor.read_u8()?;
        ensure!(
            end > 0,
            IntegerSnafu {
                integer: Bytes::copy_from_slice(&[prefix]),
            },
        );
        ensure!(
            prefix == b':',
            PrefixSnafu {
                prefix,
                production: "byte string",
            },
        );
        let length = &buf[..end];
        S::ensure_length(length)?;
        self.cursor.read_bytes(strict::parse_integer(length)?)
    }

    pub(crate) fn decode_integer(&mut self) -> Result<Integer, E> {
        self.expect_prefix(b'i', "integer")?;

        let mut buf = [0u8; INTEGER_BUF_SIZE];
        let mut offset = 0;
        if self.cursor.peek_u8()? == b'-' {
            buf[0] = self.cursor.read_u8()?;
            offset = 1;
        }
        let end = self.cursor.read_digits(&mut buf, offset)?;
        let integer = &buf[..end];

        let suffix = self.cursor.read_u8()?;
        ensure!(
            suffix == b'e',
            IntegerSnafu {
                integer: Bytes::from([integer, &[suffix][..]].concat()),
            },
        );

        strict::ensure_integer(integer)?;
        Ok(strict::parse_integer(integer)?)
    }

    pub(crate) fn decode_list(&mut self) -> Result<List, E> {
        self.expect_prefix(b'l', "list")?;
        self.enter()?;
        let mut list = List::new();
        while let Some(token) = self.read_item_token("list item")? {
            list.push(self.decode_token(token)?);
        }
        self.leave();
        Ok(list)
    }

    pub(crate) fn decode_dictionary(&mut self) -> Result<Dictionary, E> {
        self.expect_prefix(b'd', "dictionary")?;
        self.enter()?;
        let mut dict = Dictionary::new();
        let mut last_key: Option<Bytes> = None;
        while let Some(token) = self.read_item_token("dictionary key")? {
            // BEP 3 restricts dictionary keys to byte strings.
            ensure!(
                token == Token::ByteString,
                PrefixSnafu {
                    prefix: self.cursor.peek_u8()?,
                    production: "dictionary key",
                },
            );
            let key = self.decode_byte_string()?;
            if let Some(last_key) = last_key.as_ref() {
                S::ensure_dictionary_key(last_key, &key)?;
            }

            let token = self.peek_token("dictionary value")?;
            let value = self.decode_token(token)?;

            if dict.insert(key.clone(), value).is_some() {
                tracing::debug!(key = ?key, "duplicate dictionary key");
            }
            last_key = Some(key);
        }
        self.leave();
        Ok(dict)
    }

    fn decode_token(&mut self, token: Token) -> Result<Value, E> {
        Ok(match token {
            Token::ByteString => Value::ByteString(self.decode_byte_string()?),
            Token::Integer => Value::Integer(self.decode_integer()?),
            Token::List => Value::List(self.decode_list()?),
            Token::Dictionary => Value::Dictionary(self.decode_dictionary()?),
        })
    }

    fn peek_token(&mut self, production: &'static str) -> Result<Token, E> {
        Ok(Token::new(self.cursor.peek_u8()?, production)?)
    }

    /// Peeks the token of the next list item or dictionary key, or consumes the `e` suffix.
    fn read_item_token(&mut self, production: &'static str) -> Result<Option<Token>, E> {
        match self.cursor.read_u8()? {
            b'e' => Ok(None),
            prefix => {
                self.cursor.unread_u8();
                Ok(Some(Token::new(prefix, production)?))
            }
        }
    }

    fn expect_prefix(&mut self, expect: u8, production: &'static str) -> Result<(), E> {
        let prefix = self.cursor.read_u8()?;
        ensure!(prefix == expect, PrefixSnafu { prefix, production });
        Ok(())
    }

    fn enter(&mut self) -> Result<(), E> {
        self.depth += 1;
        ensure!(
            self.depth <= self.max_depth,
            NestingTooDeepSnafu { depth: self.depth },
        );
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
