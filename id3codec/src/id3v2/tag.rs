use crate::err::{ParseError, ParseResult, SaveError, SaveResult};
use crate::id3v2::syncdata;
use log::warn;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

pub(crate) const ID_HEADER: &[u8] = b"ID3";

/// Length of the tag header that precedes the frame region.
pub const HEADER_LEN: usize = 10;

/// An ID3v2 major version.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Version {
    /// ID3v2.2
    V22 = 2,
    /// ID3v2.3
    V23 = 3,
    /// ID3v2.4
    V24 = 4,
}

impl Version {
    pub(crate) fn parse(major: u8) -> ParseResult<Self> {
        match major {
            2 => Ok(Self::V22),
            3 => Ok(Self::V23),
            4 => Ok(Self::V24),
            _ => Err(ParseError::TagVersionNotFound),
        }
    }

    pub fn major(&self) -> u8 {
        *self as u8
    }

    /// Length of a frame header in this version.
    pub fn frame_header_len(&self) -> usize {
        match self {
            Self::V22 => 6,
            _ => 10,
        }
    }

    /// Length of a frame identifier in this version.
    pub fn id_len(&self) -> usize {
        match self {
            Self::V22 => 3,
            _ => 4,
        }
    }

    /// Offset of the size field within a frame header.
    pub(crate) fn size_offset(&self) -> usize {
        self.id_len()
    }

    /// Width of the size field within a frame header.
    pub(crate) fn size_len(&self) -> usize {
        match self {
            Self::V22 => 3,
            _ => 4,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "ID3v2.{}", self.major()]
    }
}

/// The 10-byte header at the start of every tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TagHeader {
    version: Version,
    tag_size: usize,
}

impl TagHeader {
    pub(crate) fn parse(raw: [u8; HEADER_LEN]) -> ParseResult<Self> {
        if &raw[0..3] != ID_HEADER {
            return Err(ParseError::TagNotFound);
        }

        // The revision byte and the flags are not interpreted.
        let version = Version::parse(raw[3])?;

        let size_bytes = [raw[6], raw[7], raw[8], raw[9]];

        if !syncdata::is_sync_safe(&size_bytes) {
            return Err(ParseError::TagSizeNotFound);
        }

        Ok(Self {
            version,
            tag_size: syncdata::to_u28(size_bytes) as usize,
        })
    }

    pub(crate) fn with_version(version: Version) -> Self {
        Self {
            version,
            tag_size: 0,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Length of the frame region, excluding this header.
    pub fn size(&self) -> usize {
        self.tag_size
    }

    pub(crate) fn render(&self) -> SaveResult<[u8; HEADER_LEN]> {
        let size = u32::try_from(self.tag_size)
            .ok()
            .and_then(syncdata::from_u28)
            .ok_or_else(|| {
                warn!(target: "id3v2", "tag size {}b exceeds the ID3v2 maximum of 256mb", self.tag_size);
                SaveError::EncodingError
            })?;

        let mut raw = [0; HEADER_LEN];
        raw[0..3].copy_from_slice(ID_HEADER);
        raw[3] = self.version.major();
        raw[6..10].copy_from_slice(&size);

        Ok(raw)
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        self.tag_size = size;
    }
}
