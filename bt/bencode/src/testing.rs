use std::sync::LazyLock;

use bytes::Bytes;

use crate::value::{Integer, Value};

pub(crate) fn vb(bytes: &[u8]) -> Value {
    Value::ByteString(Bytes::copy_from_slice(bytes))
}

pub(crate) fn vi(integer: Integer) -> Value {
    Value::Integer(integer)
}

pub(crate) fn vl<const N: usize>(items: [Value; N]) -> Value {
    Value::List(items.into())
}

pub(crate) fn vd<const N: usize>(items: [(&[u8], Value); N]) -> Value {
    Value::Dictionary(
        items
            .into_iter()
            .map(|(k, v)| (Bytes::copy_from_slice(k), v))
            .collect(),
    )
}

// JSON test data that can be unambiguously converted from Bencode.
pub(crate) static JSON: LazyLock<serde_json::Value> = LazyLock::new(|| {
    serde_json::json!({
        "byte_string": "\\x80",
        "string": "hello world",
        "int": -1,
        "seq": [2, "foo"],
        "map": {"x": 3, "y": "bar"},
    })
});

pub(crate) static BENCODE: LazyLock<Value> = LazyLock::new(|| {
    vd([
        (b"byte_string", vb(b"\x80")),
        (b"string", vb(b"hello world")),
        (b"int", vi(-1)),
        (b"seq", vl([vi(2), vb(b"foo")])),
        (b"map", vd([(b"x", vi(3)), (b"y", vb(b"bar"))])),
    ])
});
