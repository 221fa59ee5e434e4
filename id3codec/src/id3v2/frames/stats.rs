use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult, SaveResult};
use crate::id3v2::frames::{self, Frame, FrameId, FrameKind};
use crate::id3v2::tag::Version;
use crate::string::{self, Encoding};
use log::warn;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PopularimeterFrame {
    pub email: String,
    pub rating: u8,
    pub plays: u32,
}

impl PopularimeterFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let email = string::read_terminated(Encoding::Latin1, stream);

        // Both the rating and the play counter are optional.
        let rating = stream.read_u8().unwrap_or(0);
        let plays = read_counter(stream.take_rest());

        Ok(Self {
            email,
            rating,
            plays,
        })
    }
}

impl Frame for PopularimeterFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::Popularimeter
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(b"POPM")
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        frames::require_v23(b"POPM", version)?;

        let mut result = string::render_terminated(Encoding::Latin1, &self.email)?;
        result.push(self.rating);
        result.extend(&self.plays.to_be_bytes());

        Ok(result)
    }
}

impl Display for PopularimeterFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}/255", self.rating]?;

        if self.plays > 0 {
            write![f, ", {} plays", self.plays]?;
        }

        if !self.email.is_empty() {
            write![f, " [{}]", self.email]?;
        }

        Ok(())
    }
}

id_enum! {
    /// Frames that hold a single unsigned integer.
    pub enum UIntType {
        PlayCounter = (b"PCNT", None, "Play counter"),
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UIntFrame {
    uint_type: UIntType,
    pub value: u32,
}

impl UIntFrame {
    pub fn new(uint_type: UIntType, value: u32) -> Self {
        Self { uint_type, value }
    }

    pub(crate) fn parse(id: FrameId, stream: &mut BufStream) -> ParseResult<Self> {
        let uint_type = UIntType::from_id(id.as_bytes()).ok_or(ParseError::MalformedData)?;
        let data = stream.take_rest();

        if data.len() < 4 {
            warn!(target: "id3v2", "{} counter is only {} bytes long", id, data.len());
            return Err(ParseError::MalformedData);
        }

        Ok(Self {
            uint_type,
            value: read_counter(data),
        })
    }

    pub fn uint_type(&self) -> UIntType {
        self.uint_type
    }
}

impl Frame for UIntFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::UInt(self.uint_type)
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(self.uint_type.id())
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        frames::require_v23(self.uint_type.id(), version)?;
        Ok(self.value.to_be_bytes().to_vec())
    }
}

impl Display for UIntFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.value]
    }
}

/// Counters can be arbitrarily long. Anything past 32 bits saturates.
fn read_counter(data: &[u8]) -> u32 {
    let value = data
        .iter()
        .try_fold(0u64, |acc, &byte| acc.checked_mul(256).map(|acc| acc | u64::from(byte)))
        .unwrap_or(u64::MAX);

    u32::try_from(value).unwrap_or(u32::MAX)
}
