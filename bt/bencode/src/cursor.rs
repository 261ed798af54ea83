use std::io::{self, ErrorKind};
use std::marker::PhantomData;

use bytes::{Buf, Bytes, BytesMut};
use snafu::prelude::*;

use crate::error::io::Error as IoError;
use crate::error::{
    self, ByteStringSizeExceededSnafu, Error, IncompleteSnafu, IntegerBufferOverflowSnafu,
};

/// Byte source underlying a `Cursor`.
///
/// It is implemented for in-memory buffers (`bytes::Buf`) and for `std::io::Read`.  The two
/// implementations differ in their error types: reading from memory cannot fail except by running
/// out of data, whereas reading from a stream may also fail with an I/O error.
pub trait Source<E> {
    fn read_u8(&mut self) -> Result<u8, E>;

    fn read_bytes(&mut self, size: usize) -> Result<Bytes, E>;
}

impl<B> Source<Error> for B
where
    B: Buf,
{
    fn read_u8(&mut self) -> Result<u8, Error> {
        self.try_get_u8().map_err(|_| Error::Incomplete)
    }

    fn read_bytes(&mut self, size: usize) -> Result<Bytes, Error> {
        // It is important to do the check before actually allocating the buffer.
        ensure!(size <= self.remaining(), IncompleteSnafu);
        Ok(self.copy_to_bytes(size))
    }
}

impl<R> Source<IoError> for R
where
    R: io::Read,
{
    fn read_u8(&mut self) -> Result<u8, IoError> {
        let mut buf = [0u8];
        self.read_exact(&mut buf).map_err(to_io_error)?;
        Ok(buf[0])
    }

    fn read_bytes(&mut self, size: usize) -> Result<Bytes, IoError> {
        let mut buf = BytesMut::zeroed(size);
        self.read_exact(&mut buf).map_err(to_io_error)?;
        Ok(buf.freeze())
    }
}

fn to_io_error(source: io::Error) -> IoError {
    if source.kind() == ErrorKind::UnexpectedEof {
        IoError::Bencode {
            source: Error::Incomplete,
        }
    } else {
        IoError::Io { source }
    }
}

// TODO: What limit value should we use?
pub(crate) const BYTE_STRING_SIZE_LIMIT: usize = 64 * 1024 * 1024; // 64 MB

/// Sequential byte reader with one byte of lookahead.
///
/// Bencode is parsable with a single byte of lookahead (the prefix character that selects the
/// production), and so `Cursor` supports exactly one level of `unread_u8`.
#[derive(Debug)]
pub struct Cursor<R, E> {
    source: R,
    // The most recently read byte, which is what `unread_u8` pushes back.
    last: Option<u8>,
    pushback: Option<u8>,
    position: usize,
    byte_string_size_limit: usize,
    _phantom: PhantomData<E>,
}

impl<R, E> Cursor<R, E> {
    pub fn new(source: R) -> Self {
        Self::with_limit(source, BYTE_STRING_SIZE_LIMIT)
    }

    pub fn with_limit(source: R, byte_string_size_limit: usize) -> Self {
        Self {
            source,
            last: None,
            pushback: None,
            position: 0,
            byte_string_size_limit,
            _phantom: PhantomData,
        }
    }

    /// Number of bytes consumed so far, not counting a pushed-back byte.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    /// Restores the most recently read byte.
    ///
    /// # Panics
    ///
    /// It panics when there is no byte to restore, including when it is called twice in a row.
    pub fn unread_u8(&mut self) {
        let b = self.last.take();
        assert!(b.is_some() && self.pushback.is_none());
        self.pushback = b;
        self.position -= 1;
    }
}

impl<R, E> Cursor<R, E>
where
    R: Source<E>,
    E: error::de::Error,
{
    pub fn read_u8(&mut self) -> Result<u8, E> {
        let b = match self.pushback.take() {
            Some(b) => b,
            None => self.source.read_u8()?,
        };
        self.last = Some(b);
        self.position += 1;
        Ok(b)
    }

    pub fn peek_u8(&mut self) -> Result<u8, E> {
        let b = self.read_u8()?;
        self.unread_u8();
        Ok(b)
    }

    pub fn read_bytes(&mut self, size: usize) -> Result<Bytes, E> {
        ensure!(
            size <= self.byte_string_size_limit,
            ByteStringSizeExceededSnafu { size },
        );
        let bytes = match (size, self.pushback.take()) {
            (0, pushback) => {
                self.pushback = pushback;
                Bytes::new()
            }
            (_, None) => self.source.read_bytes(size)?,
            (_, Some(b)) => {
                let mut bytes = BytesMut::with_capacity(size);
                bytes.extend_from_slice(&[b]);
                bytes.extend_from_slice(&self.source.read_bytes(size - 1)?);
                bytes.freeze()
            }
        };
        if let Some(b) = bytes.last() {
            self.last = Some(*b);
        }
        self.position += size;
        Ok(bytes)
    }

    /// Reads ASCII digits into `buf[offset..]` and returns the end of the digits.
    ///
    /// The first non-digit byte is pushed back.
    pub fn read_digits(&mut self, buf: &mut [u8], offset: usize) -> Result<usize, E> {
        let mut end = offset;
        loop {
            let b = self.read_u8()?;
            if !b.is_ascii_digit() {
                self.unread_u8();
                return Ok(end);
            }
            ensure!(
                end < buf.len(),
                IntegerBufferOverflowSnafu {
                    buffer: Bytes::copy_from_slice(buf),
                },
            );
            buf[end] = b;
            end += 1;
        }
    }
}
