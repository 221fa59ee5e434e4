use crate::core::io::BufStream;
use crate::err::ParseResult;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// An ISO-639-2 language code, as used by comment and lyrics frames.
///
/// Codes read from a file are kept byte-for-byte, even when they are not valid ISO-639-2
/// codes, so that they are written back unchanged.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Language([u8; 3]);

impl Language {
    pub fn new(code: &[u8; 3]) -> Result<Self, InvalidLangError> {
        // ISO-639-2 language codes are always alphabetic ASCII chars.
        if !code.iter().all(u8::is_ascii_alphabetic) {
            return Err(InvalidLangError(*code));
        }

        Ok(Self(code.map(|ch| ch.to_ascii_lowercase())))
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        Ok(Self(stream.read_array()?))
    }

    pub fn code(&self) -> &[u8; 3] {
        &self.0
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", String::from_utf8_lossy(&self.0)]
    }
}

impl Default for Language {
    fn default() -> Self {
        Self(*b"eng")
    }
}

#[derive(Debug)]
pub struct InvalidLangError([u8; 3]);

impl Display for InvalidLangError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{:?} is not an ISO-639-2 language code", String::from_utf8_lossy(&self.0)]
    }
}

impl Error for InvalidLangError {}
