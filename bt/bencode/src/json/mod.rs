mod ser_impl;

//
// TODO: Escaping binary data makes it difficult to convert the result back to Bencode.  How can
// we represent binary data in JSON that is also convertible?
//

/// Adapter that converts byte strings to UTF-8 strings right before sending them to `serde_json`.
///
/// ```
/// # use bt_bencode::{Json, Value};
/// let bencode = Value::List(vec![Value::Integer(1), Value::from(b"x".as_slice())]);
/// assert_eq!(
///     serde_json::to_value(&Json(&bencode)).unwrap(),
///     serde_json::json!([1, "x"]),
/// );
/// ```
///
/// Note that when a byte string is not UTF-8 encoded, it produces an escaped string instead of
/// returning an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Json<V>(pub V);
