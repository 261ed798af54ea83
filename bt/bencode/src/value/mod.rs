use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

#[derive(Clone, Eq, Hash, PartialEq)]
pub enum Value {
    ByteString(Bytes),
    Integer(Integer),
    List(List),
    Dictionary(Dictionary),
}

// BEP 3 specifies integers as having unlimited precision.  For practical reasons, we restrict them
// to 64 bits instead of fully complying with BEP 3.
pub type Integer = i64;

pub type List = Vec<Value>;

// Use `BTreeMap` because BEP 3 requires dictionary keys to be sorted.
pub type Dictionary = BTreeMap<Bytes, Value>;

struct EscapeAscii<'a>(&'a [u8]);

impl fmt::Debug for EscapeAscii<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

struct DebugDictionary<'a>(&'a Dictionary);

impl fmt::Debug for DebugDictionary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (EscapeAscii(k), v)))
            .finish()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByteString(bytes) => f
                .debug_tuple("ByteString")
                .field(&EscapeAscii(bytes))
                .finish(),
            Self::Integer(integer) => f.debug_tuple("Integer").field(integer).finish(),
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
            Self::Dictionary(dict) => f
                .debug_tuple("Dictionary")
                .field(&DebugDictionary(dict))
                .finish(),
        }
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Self::ByteString(bytes)
    }
}

impl From<&'static [u8]> for Value {
    fn from(bytes: &'static [u8]) -> Self {
        Self::ByteString(Bytes::from_static(bytes))
    }
}

impl From<Integer> for Value {
    fn from(integer: Integer) -> Self {
        Self::Integer(integer)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Self::Dictionary(dict)
    }
}

impl TryFrom<Value> for Bytes {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::ByteString(bytes) => Ok(bytes),
            _ => Err(value),
        }
    }
}

impl TryFrom<Value> for Integer {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(integer) => Ok(integer),
            _ => Err(value),
        }
    }
}

impl TryFrom<Value> for List {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(list) => Ok(list),
            _ => Err(value),
        }
    }
}

impl TryFrom<Value> for Dictionary {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Dictionary(dict) => Ok(dict),
            _ => Err(value),
        }
    }
}

impl Value {
    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ByteString(_) => "byte string",
            Self::Integer(_) => "integer",
            Self::List(_) => "list",
            Self::Dictionary(_) => "dictionary",
        }
    }

    pub fn as_byte_string(&self) -> Option<&[u8]> {
        match self {
            Self::ByteString(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Self::Integer(integer) => Some(*integer),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Self::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Looks up `key` when `self` is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&Self> {
        self.as_dictionary()?.get(key)
    }
}
