mod format;
mod render;
mod tracing_config;

use std::error;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bt_bencode::error::io::Error as IoError;
use bt_bencode::{DEFAULT_MAX_DEPTH, DecodeOptions, Dictionary};

use crate::format::Format;
use crate::tracing_config::TracingConfig;

#[derive(Debug, Parser)]
#[command(version, about = "Print the contents of a torrent metainfo file")]
struct TorrentParse {
    #[command(flatten, next_display_order = 100)]
    tracing: TracingConfig,

    #[arg(long, value_enum, default_value_t, help = "Output format")]
    format: Format,
    #[arg(long, help = "Reject non-canonical Bencode")]
    strict: bool,
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, help = "Maximum nesting depth")]
    max_depth: usize,

    #[arg(help = "Metainfo file (default: standard input)")]
    metainfo: Option<PathBuf>,
}

type Error = Box<dyn error::Error>;

impl TorrentParse {
    fn execute(&self) -> Result<(), Error> {
        let metainfo = self.decode(self.open()?)?;

        // Nothing is written to stdout unless the whole output is rendered.
        let mut output = Vec::new();
        self.format.write(&mut output, &metainfo)?;
        io::stdout().write_all(&output)?;
        Ok(())
    }

    fn open(&self) -> Result<Box<dyn Read>, Error> {
        let reader: Box<dyn Read> = match &self.metainfo {
            Some(path) => {
                tracing::debug!(path = %path.display(), "open metainfo");
                Box::new(
                    File::open(path).map_err(|error| format!("{}: {error}", path.display()))?,
                )
            }
            None => Box::new(io::stdin()),
        };
        Ok(reader)
    }

    fn decode<R>(&self, reader: R) -> Result<Dictionary, IoError>
    where
        R: Read,
    {
        DecodeOptions::new()
            .max_depth(self.max_depth)
            .strict(self.strict)
            .decode_dictionary::<_, IoError>(BufReader::new(reader))
    }
}

fn report<W>(mut writer: W, error: &Error)
where
    W: Write,
{
    // Nothing more can be done if stderr is broken.
    let _ = writeln!(writer, "torrent-parse: {error}");
}

fn main() -> ExitCode {
    let torrent_parse = TorrentParse::parse();
    torrent_parse.tracing.init();
    match torrent_parse.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(io::stderr(), &error);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::CommandFactory;

    use bt_bencode::error::ErrorKind;

    use super::*;

    const TESTDATA: &[u8] = b"d8:announce8:http://x4:infod6:lengthi7eee";

    #[test]
    fn command() {
        TorrentParse::command().debug_assert();
    }

    #[test]
    fn parse() {
        let torrent_parse = TorrentParse::try_parse_from(["torrent-parse"]).unwrap();
        assert_eq!(torrent_parse.metainfo, None);
        assert_eq!(torrent_parse.format, Format::Text);
        assert!(!torrent_parse.strict);
        assert_eq!(torrent_parse.max_depth, DEFAULT_MAX_DEPTH);

        let torrent_parse = TorrentParse::try_parse_from([
            "torrent-parse",
            "--format",
            "json",
            "--strict",
            "--max-depth",
            "8",
            "-vv",
            "a.torrent",
        ])
        .unwrap();
        assert_eq!(torrent_parse.metainfo, Some(PathBuf::from("a.torrent")));
        assert_eq!(torrent_parse.format, Format::Json);
        assert!(torrent_parse.strict);
        assert_eq!(torrent_parse.max_depth, 8);

        assert!(TorrentParse::try_parse_from(["torrent-parse", "a", "b"]).is_err());
        assert!(TorrentParse::try_parse_from(["torrent-parse", "--format", "yaml"]).is_err());
    }

    #[test]
    fn open() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TESTDATA).unwrap();
        file.flush().unwrap();

        let torrent_parse = TorrentParse::try_parse_from([
            OsStr::new("torrent-parse"),
            file.path().as_os_str(),
        ])
        .unwrap();
        let metainfo = torrent_parse.decode(torrent_parse.open().unwrap()).unwrap();
        assert_eq!(metainfo.len(), 2);

        let mut output = Vec::new();
        torrent_parse.format.write(&mut output, &metainfo).unwrap();
        assert_eq!(
            output,
            b"\ntracker URL:\t\thttp://x\n\nfile length:\t\t7\n\n",
        );
    }

    #[test]
    fn open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-file");
        let torrent_parse =
            TorrentParse::try_parse_from([OsStr::new("torrent-parse"), path.as_os_str()]).unwrap();
        let error = torrent_parse.open().err().unwrap();
        assert!(error.to_string().starts_with(&path.display().to_string()));
    }

    #[test]
    fn report() {
        fn test(error: Error, expect: &str) {
            let mut output = Vec::new();
            super::report(&mut output, &error);
            assert_eq!(String::from_utf8(output).unwrap(), expect);
        }

        let torrent_parse = TorrentParse::try_parse_from(["torrent-parse"]).unwrap();
        test(
            torrent_parse.decode(b"d1:a".as_slice()).unwrap_err().into(),
            "torrent-parse: bencode error: incomplete bencode data\n",
        );

        let torrent_parse =
            TorrentParse::try_parse_from(["torrent-parse", "--max-depth", "1"]).unwrap();
        test(
            torrent_parse.decode(b"d1:alee".as_slice()).unwrap_err().into(),
            "torrent-parse: bencode error: nesting depth limit exceeded: 2\n",
        );

        test(
            "a.torrent: No such file".into(),
            "torrent-parse: a.torrent: No such file\n",
        );
    }

    #[test]
    fn decode() {
        let torrent_parse = TorrentParse::try_parse_from(["torrent-parse"]).unwrap();
        assert!(torrent_parse.decode(TESTDATA).is_ok());
        assert!(
            torrent_parse
                .decode(&TESTDATA[..TESTDATA.len() - 1])
                .is_err_and(|error| error.kind() == ErrorKind::UnexpectedEndOfInput)
        );
        assert!(
            torrent_parse
                .decode(b"li1ee".as_slice())
                .is_err_and(|error| error.kind() == ErrorKind::MalformedTag)
        );

        let torrent_parse =
            TorrentParse::try_parse_from(["torrent-parse", "--strict"]).unwrap();
        assert!(
            torrent_parse
                .decode(b"d1:bi1e1:ai2ee".as_slice())
                .is_err_and(|error| error.kind() == ErrorKind::StrictDictionaryKey)
        );

        let torrent_parse =
            TorrentParse::try_parse_from(["torrent-parse", "--max-depth", "1"]).unwrap();
        assert!(
            torrent_parse
                .decode(b"d1:ald1:bi1eeee".as_slice())
                .is_err_and(|error| error.kind() == ErrorKind::NestingTooDeep)
        );
    }
}
