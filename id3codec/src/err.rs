use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, ErrorKind};

/// Errors raised while reading a tag or one of its frames.
///
/// Only the tag header errors and [`IoError`](ParseError::IoError) ever reach a caller of
/// [`Tag::parse`](crate::id3v2::Tag::parse). Frame-level errors are absorbed by the scanner
/// and counted in its [`ScanReport`](crate::id3v2::ScanReport).
#[derive(Debug)]
pub enum ParseError {
    /// The data does not start with the `ID3` magic.
    TagNotFound,
    /// The major version byte is not 2, 3 or 4.
    TagVersionNotFound,
    /// The tag size field is missing or not synch-safe.
    TagSizeNotFound,
    /// Frame boundary arithmetic overflowed or ran past the available data.
    CorruptedFile,
    /// A frame payload could not be interpreted.
    MalformedData,
    IoError(io::Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::TagNotFound => write![f, "no ID3v2 tag found"],
            Self::TagVersionNotFound => write![f, "unrecognized ID3v2 version"],
            Self::TagSizeNotFound => write![f, "malformed ID3v2 tag size"],
            Self::CorruptedFile => write![f, "frame data is truncated or corrupted"],
            Self::MalformedData => write![f, "malformed frame data"],
            Self::IoError(err) => write![f, "{}", err],
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        // Stream underreads mean that a length field lied to us.
        match err.kind() {
            ErrorKind::UnexpectedEof => Self::CorruptedFile,
            _ => Self::IoError(err),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while rendering a tag. Any of these aborts the whole write.
#[derive(Debug)]
pub enum SaveError {
    /// A frame cannot be expressed in the tag's version.
    UnsupportedTagVersion,
    /// Text cannot be represented in the chosen encoding.
    StringEncodingError,
    /// A frame or tag could not be built, such as a picture with no image data or a
    /// payload too large for its size field.
    EncodingError,
    IoError(io::Error),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::UnsupportedTagVersion => write![f, "frame is not supported by this ID3v2 version"],
            Self::StringEncodingError => write![f, "text cannot be represented in this encoding"],
            Self::EncodingError => write![f, "frame could not be encoded"],
            Self::IoError(err) => write![f, "{}", err],
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

pub type SaveResult<T> = Result<T, SaveError>;
