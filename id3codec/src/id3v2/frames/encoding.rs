use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult};
use crate::id3v2::tag::Version;
use crate::string::Encoding;
use log::{info, warn};

const FLAG_LATIN1: u8 = 0x00;
const FLAG_UTF16: u8 = 0x01;
const FLAG_UTF16BE: u8 = 0x02;
const FLAG_UTF8: u8 = 0x03;

/// Read an encoding byte. ID3v2.4 encodings found in older tags are accepted as-is, since
/// plenty of taggers write them anyway.
pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Encoding> {
    match stream.read_u8()? {
        FLAG_LATIN1 => Ok(Encoding::Latin1),
        FLAG_UTF16 => Ok(Encoding::Utf16),
        FLAG_UTF16BE => Ok(Encoding::Utf16Be),
        FLAG_UTF8 => Ok(Encoding::Utf8),
        enc => {
            warn!(target: "id3v2", "unrecognized encoding {}", enc);
            Err(ParseError::MalformedData)
        }
    }
}

/// Map an encoding to the closest one that `version` supports.
pub(crate) fn check(enc: Encoding, version: Version) -> Encoding {
    match enc {
        Encoding::Utf16Be | Encoding::Utf8 if version < Version::V24 => {
            info!(target: "id3v2", "mapping unsupported ID3v2.4 encoding {:?} to Utf16", enc);
            Encoding::Utf16
        }

        _ => enc,
    }
}

pub(crate) fn render(enc: Encoding) -> u8 {
    match enc {
        Encoding::Latin1 => FLAG_LATIN1,
        Encoding::Utf16 => FLAG_UTF16,
        Encoding::Utf16Be => FLAG_UTF16BE,
        Encoding::Utf8 => FLAG_UTF8,
    }
}
