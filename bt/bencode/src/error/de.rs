use std::fmt;

use super::ErrorKind;

/// Error type produced by a decoder over a particular kind of byte source.
pub trait Error: fmt::Debug + fmt::Display + From<super::Error> {
    fn kind(&self) -> ErrorKind;

    fn is_incomplete(&self) -> bool {
        self.kind() == ErrorKind::UnexpectedEndOfInput
    }
}
