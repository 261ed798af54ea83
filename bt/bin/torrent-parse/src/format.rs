use std::io::Write;

use clap::ValueEnum;

use bt_bencode::{Dictionary, Json};

use crate::Error;
use crate::render;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum Format {
    #[default]
    Text,
    Debug,
    Json,
}

impl Format {
    pub(crate) fn write<W>(self, mut writer: W, metainfo: &Dictionary) -> Result<(), Error>
    where
        W: Write,
    {
        match self {
            Self::Text => render::render(writer, metainfo)?,
            Self::Debug => writeln!(writer, "{metainfo:#?}")?,
            Self::Json => {
                serde_json::to_writer(&mut writer, &Json(metainfo))?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}
