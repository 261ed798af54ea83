use std::io;

use snafu::prelude::*;

use super::ErrorKind;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("bencode error: {source}"))]
    Bencode { source: super::Error },
    #[snafu(display("bencode io error: {source}"))]
    Io { source: io::Error },
}

impl From<super::Error> for Error {
    fn from(source: super::Error) -> Self {
        Self::Bencode { source }
    }
}

impl super::de::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Bencode { source } => source.kind(),
            Self::Io { .. } => ErrorKind::Io,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        super::de::Error::kind(self)
    }

    pub fn to_bencode(&self) -> Option<&super::Error> {
        match self {
            Self::Bencode { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Error as BencodeError;
    use super::*;

    #[test]
    fn kind() {
        let error = Error::from(BencodeError::Incomplete);
        assert_eq!(error.kind(), ErrorKind::UnexpectedEndOfInput);
        assert_eq!(error.to_bencode(), Some(&BencodeError::Incomplete));

        let error = Error::Io {
            source: io::Error::other("broken pipe"),
        };
        assert_eq!(error.kind(), ErrorKind::Io);
        assert_eq!(error.to_bencode(), None);
        assert_eq!(error.to_string(), "bencode io error: broken pipe");
    }
}
