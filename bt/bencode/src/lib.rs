pub mod cursor;
pub mod error;
pub mod value;

mod de;
mod int;
mod json;

#[cfg(test)]
mod testing;

//
// Implementer's Notes:
//
// * Bencode is specified in BEP 3.
//
// * The decoder is a recursive-descent parser with one byte of lookahead.  Every production is
//   selected by its prefix character:
//
//   | Prefix  | Production                   |
//   |---------|------------------------------|
//   | 0-9     | byte string `<len>:<bytes>`  |
//   | i       | integer `i<digits>e`         |
//   | l       | list `l<values>e`            |
//   | d       | dictionary `d<pairs>e`       |
//
// * The interface is split into pure-memory and I/O functions, with one error type for each group.
//   Reading from memory fails only on malformed or incomplete input.
//
// * Nesting depth is bounded so that untrusted input cannot exhaust the stack.
//

pub use crate::de::{
    DEFAULT_MAX_DEPTH, DecodeOptions, from_buf, from_buf_dictionary, from_reader,
    from_reader_dictionary, from_slice,
};

pub use crate::value::{Dictionary, Integer, List, Value};

pub use crate::json::Json;
