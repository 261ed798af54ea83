use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

pub(crate) trait Int: Copy + fmt::Display + FromStr<Err = ParseIntError> + Sized {}

// `i64` for integer values and `usize` for byte string lengths.
impl Int for i64 {}
impl Int for usize {}

// Larger than enough for `i64` and `usize`.
pub(crate) const INTEGER_BUF_SIZE: usize = 32;
