use std::fmt;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use snafu::prelude::*;

use bt_bencode::{Dictionary, Value};

#[derive(Debug, Snafu)]
pub(crate) enum Error {
    #[snafu(display("'info' value in metainfo dictionary has unexpected type: {type_name}"))]
    InfoType { type_name: &'static str },
    #[snafu(display("'files' value in metainfo dictionary has unexpected type: {type_name}"))]
    FilesType { type_name: &'static str },
    #[snafu(display("item in 'files' list has unexpected type: {type_name}"))]
    FileType { type_name: &'static str },
    #[snafu(display("file in 'files' list has a path of unexpected type: {type_name}"))]
    PathType { type_name: &'static str },
    #[snafu(display("torrent creation date has unexpected type: {type_name}"))]
    CreationDateType { type_name: &'static str },
    #[snafu(display("torrent creation date is out of range: {creation_date}"))]
    CreationDateRange { creation_date: i64 },
    #[snafu(display("write error: {source}"))]
    Write { source: io::Error },
}

const UNEXPECTED: &str = "[unexpected value type]";
const MISSING: &str = "missing";

// SHA-1 digest size.
const PIECE_HASH_SIZE: usize = 20;

/// Renders the well-known fields of a metainfo dictionary as human-readable text.
///
/// Top-level keys are rendered in dictionary order.  Unknown top-level keys are reported through
/// `tracing` and otherwise skipped.
pub(crate) fn render<W>(writer: W, metainfo: &Dictionary) -> Result<(), Error>
where
    W: Write,
{
    let mut renderer = Renderer { writer };
    for (key, value) in metainfo {
        renderer.render_entry(key, value)?;
    }
    renderer.writer.write_all(b"\n").context(WriteSnafu)
}

struct Renderer<W> {
    writer: W,
}

impl<W> Renderer<W>
where
    W: Write,
{
    fn render_entry(&mut self, key: &[u8], value: &Value) -> Result<(), Error> {
        match key {
            b"announce" => self.field("tracker URL", ExpectByteString(Some(value))),
            b"info" => self.render_info(value),
            b"created by" => self.field("created with", Text(value)),
            b"creation date" => {
                let creation_date = value.as_integer().context(CreationDateTypeSnafu {
                    type_name: value.type_name(),
                })?;
                let creation_date = DateTime::<Utc>::from_timestamp(creation_date, 0)
                    .context(CreationDateRangeSnafu { creation_date })?;
                self.field("creation date", creation_date)
            }
            b"comment" => self.field("comment", Text(value)),
            b"encoding" => self.field("encoding", Text(value)),
            b"announce-list" => self.field("announce list", Text(value)),
            b"url-list" => self.field("URL list", Text(value)),
            b"errors" => self.field("errors", Text(value)),
            b"err_callback" => self.field("error callback", Text(value)),
            b"log_callback" => self.field("log callback", Text(value)),
            b"httpseeds" => self.field("HTTP seeds", Text(value)),
            _ => {
                tracing::warn!(
                    key = %key.escape_ascii(),
                    "encountered additional top-level dictionary key"
                );
                Ok(())
            }
        }
    }

    fn render_info(&mut self, info: &Value) -> Result<(), Error> {
        let info = info.as_dictionary().context(InfoTypeSnafu {
            type_name: info.type_name(),
        })?;
        for (key, value) in info {
            match &key[..] {
                b"length" => self.field("file length", ExpectInteger(Some(value)))?,
                b"files" => self.render_files(value)?,
                b"name" => self.field("name", Text(value))?,
                b"piece length" => self.field("piece length", ExpectInteger(Some(value)))?,
                b"pieces" => match value.as_byte_string() {
                    Some(pieces) => self.field("pieces", pieces.len() / PIECE_HASH_SIZE)?,
                    None => self.field("pieces", UNEXPECTED)?,
                },
                _ => tracing::debug!(key = %key.escape_ascii(), "skip info dictionary key"),
            }
        }
        Ok(())
    }

    fn render_files(&mut self, files: &Value) -> Result<(), Error> {
        let files = files.as_list().context(FilesTypeSnafu {
            type_name: files.type_name(),
        })?;
        for file in files {
            let file = file.as_dictionary().context(FileTypeSnafu {
                type_name: file.type_name(),
            })?;
            let path = file.get(b"path".as_slice());
            let path = path.and_then(Value::as_list).context(PathTypeSnafu {
                type_name: path.map_or(MISSING, Value::type_name),
            })?;
            write!(
                self.writer,
                "\n\t{}\n\tfile size:\t\t{}\n",
                Path(path),
                ExpectInteger(file.get(b"length".as_slice())),
            )
            .context(WriteSnafu)?;
        }
        Ok(())
    }

    fn field<T>(&mut self, label: &str, value: T) -> Result<(), Error>
    where
        T: fmt::Display,
    {
        write!(self.writer, "\n{label}:\t\t{value}\n").context(WriteSnafu)
    }
}

/// Formats a value as text, converting byte strings lossily.
///
/// Lists are formatted as `[a b c]` and dictionaries as `map[k:v ...]`.
struct Text<'a>(&'a Value);

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::ByteString(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Value::Integer(integer) => write!(f, "{integer}"),
            Value::List(list) => {
                f.write_str("[")?;
                for (i, element) in list.iter().enumerate() {
                    if i != 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", Text(element))?;
                }
                f.write_str("]")
            }
            Value::Dictionary(dict) => {
                f.write_str("map[")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i != 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", String::from_utf8_lossy(key), Text(value))?;
                }
                f.write_str("]")
            }
        }
    }
}

struct Path<'a>(&'a [Value]);

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", Text(component))?;
        }
        Ok(())
    }
}

struct ExpectByteString<'a>(Option<&'a Value>);

impl fmt::Display for ExpectByteString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.and_then(Value::as_byte_string) {
            Some(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            None => f.write_str(UNEXPECTED),
        }
    }
}

struct ExpectInteger<'a>(Option<&'a Value>);

impl fmt::Display for ExpectInteger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.and_then(Value::as_integer) {
            Some(integer) => write!(f, "{integer}"),
            None => f.write_str(UNEXPECTED),
        }
    }
}
