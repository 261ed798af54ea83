use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::{Dictionary, Value};

use super::Json;

impl Serialize for Json<&Value> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Value::ByteString(bytes) => SerializeBytes(bytes).serialize(serializer),
            Value::Integer(integer) => serializer.serialize_i64(*integer),
            Value::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(&Self(element))?;
                }
                seq.end()
            }
            Value::Dictionary(dict) => Json(dict).serialize(serializer),
        }
    }
}

impl Serialize for Json<&Dictionary> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(&SerializeBytes(k), &Json(v))?;
        }
        map.end()
    }
}

struct SerializeBytes<'a>(&'a [u8]);

impl Serialize for SerializeBytes<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match std::str::from_utf8(self.0) {
            Ok(string) => serializer.serialize_str(string),
            Err(_) => serializer.collect_str(&self.0.escape_ascii()),
        }
    }
}
