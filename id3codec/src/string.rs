//! Tag string handling.

use crate::core::io::BufStream;
use crate::err::{SaveError, SaveResult};
use log::warn;

/// The text encodings an ID3v2 frame can declare.
///
/// [`Utf16Be`](Encoding::Utf16Be) and [`Utf8`](Encoding::Utf8) only exist in ID3v2.4 and are
/// written as [`Utf16`](Encoding::Utf16) in older tags.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Encoding {
    /// ISO-8859-1. Text containing characters above U+00FF cannot be written in it.
    Latin1,
    /// UTF-16 with a BOM. Always written little-endian with a `0xFF 0xFE` BOM.
    Utf16,
    /// UTF-16BE with no BOM.
    Utf16Be,
    /// UTF-8.
    Utf8,
}

impl Encoding {
    /// Length of the NUL terminator in this encoding.
    pub fn nul_size(&self) -> usize {
        match self {
            Self::Utf8 | Self::Latin1 => 1,
            Self::Utf16 | Self::Utf16Be => 2,
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::Utf8
    }
}

/// Consumes the rest of the stream and decodes it.
pub(crate) fn read(encoding: Encoding, stream: &mut BufStream) -> String {
    decode(encoding, stream.take_rest())
}

/// Consumes the stream up to and including a NUL terminator and decodes everything
/// before it. A missing terminator consumes the rest of the stream.
pub(crate) fn read_terminated(encoding: Encoding, stream: &mut BufStream) -> String {
    let data = match encoding.nul_size() {
        1 => stream.search(&[0]),
        _ => stream.search(&[0, 0]),
    };

    decode(encoding, data)
}

pub(crate) fn render(encoding: Encoding, string: &str) -> SaveResult<Vec<u8>> {
    match encoding {
        Encoding::Latin1 => encode_latin1(string),
        Encoding::Utf16 => Ok(encode_utf16(string)),
        Encoding::Utf16Be => Ok(encode_utf16be(string)),
        Encoding::Utf8 => Ok(string.as_bytes().to_vec()),
    }
}

pub(crate) fn render_terminated(encoding: Encoding, string: &str) -> SaveResult<Vec<u8>> {
    let mut result = render(encoding, string)?;
    result.resize(result.len() + encoding.nul_size(), 0);
    Ok(result)
}

fn decode(encoding: Encoding, data: &[u8]) -> String {
    // Plenty of taggers NUL-terminate strings that are not supposed to be terminated.
    let data = match encoding.nul_size() {
        1 => data.strip_suffix(&[0]).unwrap_or(data),
        // UTF-16 terminators sit on a code unit boundary. An odd length means a stray NUL
        // was appended after the last code unit.
        _ if data.len() % 2 == 0 => data.strip_suffix(&[0, 0]).unwrap_or(data),
        _ => data.strip_suffix(&[0]).unwrap_or(data),
    };

    match encoding {
        Encoding::Latin1 => decode_latin1(data),
        Encoding::Utf16 => decode_utf16(data),
        Encoding::Utf16Be => decode_utf16be(data),
        Encoding::Utf8 => String::from_utf8_lossy(data).to_string(),
    }
}

fn decode_latin1(data: &[u8]) -> String {
    // Latin-1 bytes are exactly the first 256 unicode code points.
    data.iter().map(|&byte| char::from(byte)).collect()
}

fn decode_utf16(data: &[u8]) -> String {
    if data.len() < 2 {
        return String::new();
    }

    match (data[0], data[1]) {
        (0xFF, 0xFE) => decode_utf16le(&data[2..]),
        (0xFE, 0xFF) => decode_utf16be(&data[2..]),
        _ => {
            warn!(target: "id3v2", "could not determine UTF-16 BOM, defaulting to UTF-16BE");
            decode_utf16be(data)
        }
    }
}

fn decode_utf16be(data: &[u8]) -> String {
    String::from_utf16_lossy(
        &data
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>(),
    )
}

fn decode_utf16le(data: &[u8]) -> String {
    String::from_utf16_lossy(
        &data
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>(),
    )
}

fn encode_latin1(string: &str) -> SaveResult<Vec<u8>> {
    string
        .chars()
        .map(|ch| match u32::from(ch) {
            cp if cp <= 0xFF => Ok(cp as u8),
            _ => {
                warn!(target: "id3v2", "{:?} cannot be represented in Latin-1", ch);
                Err(SaveError::StringEncodingError)
            }
        })
        .collect()
}

fn encode_utf16(string: &str) -> Vec<u8> {
    let mut result = vec![0xFF, 0xFE];
    result.extend(string.encode_utf16().flat_map(|cp| cp.to_le_bytes().to_vec()));
    result
}

fn encode_utf16be(string: &str) -> Vec<u8> {
    string
        .encode_utf16()
        .flat_map(|cp| cp.to_be_bytes().to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STR_LATIN1: &str = "Café Olé";
    const STR_UNICODE: &str = "Ωmega 𝄞";

    const DATA_LATIN1: &[u8] = b"Caf\xE9 Ol\xE9";
    const DATA_UTF16: &[u8] = b"\xFF\xFE\xA9\x03\x6d\x00\x65\x00\x67\x00\x61\x00\x20\x00\x34\xD8\x1E\xDD";
    const DATA_UTF16BE: &[u8] = b"\x03\xA9\x00\x6d\x00\x65\x00\x67\x00\x61\x00\x20\xD8\x34\xDD\x1E";
    const DATA_UTF8: &[u8] = b"\xCE\xA9mega \xF0\x9D\x84\x9E";

    #[test]
    fn parse_strings() {
        assert_eq!(decode(Encoding::Latin1, DATA_LATIN1), STR_LATIN1);
        assert_eq!(decode(Encoding::Utf16, DATA_UTF16), STR_UNICODE);
        assert_eq!(decode(Encoding::Utf16Be, DATA_UTF16BE), STR_UNICODE);
        assert_eq!(decode(Encoding::Utf8, DATA_UTF8), STR_UNICODE);
    }

    #[test]
    fn parse_utf16_big_endian_bom() {
        let mut data = vec![0xFE, 0xFF];
        data.extend(DATA_UTF16BE);

        assert_eq!(decode(Encoding::Utf16, &data), STR_UNICODE);
    }

    #[test]
    fn parse_strips_stray_terminator() {
        assert_eq!(decode(Encoding::Latin1, b"Title\0"), "Title");
        assert_eq!(decode(Encoding::Utf16Be, b"\x00\x41\x00\x00"), "A");
    }

    #[test]
    fn parse_keeps_unaligned_code_units() {
        let mut stream = BufStream::new(b"\xFF\xFE\x41\x00\x00");
        assert_eq!(read(Encoding::Utf16, &mut stream), "A");

        assert_eq!(decode(Encoding::Utf16Be, b"\x00\x41\x00"), "A");
        assert_eq!(decode(Encoding::Utf16, b"\xFF\xFE\x41\x00\x00\x00"), "A");
    }

    #[test]
    fn render_strings() {
        assert_eq!(render(Encoding::Latin1, STR_LATIN1).unwrap(), DATA_LATIN1);
        assert_eq!(render(Encoding::Utf16, STR_UNICODE).unwrap(), DATA_UTF16);
        assert_eq!(render(Encoding::Utf16Be, STR_UNICODE).unwrap(), DATA_UTF16BE);
        assert_eq!(render(Encoding::Utf8, STR_UNICODE).unwrap(), DATA_UTF8);
    }

    #[test]
    fn render_latin1_rejects_unicode() {
        assert!(matches!(
            render(Encoding::Latin1, STR_UNICODE),
            Err(SaveError::StringEncodingError)
        ));
    }

    #[test]
    fn render_terminators() {
        assert_eq!(render_terminated(Encoding::Latin1, "a").unwrap(), b"a\0");
        assert_eq!(render_terminated(Encoding::Utf16Be, "a").unwrap(), b"\x00a\x00\x00");
        assert_eq!(render_terminated(Encoding::Utf16, "").unwrap(), b"\xFF\xFE\x00\x00");
    }

    #[test]
    fn read_terminated_strings() {
        let mut stream = BufStream::new(b"\xFF\xFE\x61\x00\x00\x00rest");
        assert_eq!(read_terminated(Encoding::Utf16, &mut stream), "a");
        assert_eq!(read(Encoding::Latin1, &mut stream), "rest");
    }
}
