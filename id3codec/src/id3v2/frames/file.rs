use crate::core::io::BufStream;
use crate::err::{ParseResult, SaveError, SaveResult};
use crate::id3v2::frames::{self, encoding, Frame, FrameId, FrameKind};
use crate::id3v2::tag::Version;
use crate::string::{self, Encoding};
use log::warn;
use std::fmt::{self, Display, Formatter};

/// An attached picture. The image itself is an opaque blob described by its MIME type.
///
/// The picture type is part of the frame identity, so it can only be set on creation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PictureFrame {
    picture_type: PictureType,
    pub encoding: Encoding,
    pub mime: String,
    pub desc: String,
    pub data: Vec<u8>,
}

impl PictureFrame {
    pub fn new(picture_type: PictureType) -> Self {
        Self {
            picture_type,
            encoding: Encoding::default(),
            mime: String::new(),
            desc: String::new(),
            data: Vec::new(),
        }
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let mime = string::read_terminated(Encoding::Latin1, stream);
        let picture_type = PictureType::parse(stream.read_u8()?);
        let desc = string::read_terminated(encoding, stream);
        let data = stream.take_rest().to_vec();

        Ok(Self {
            picture_type,
            encoding,
            mime,
            desc,
            data,
        })
    }

    pub fn picture_type(&self) -> PictureType {
        self.picture_type
    }
}

impl Frame for PictureFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::Picture(self.picture_type)
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(b"APIC")
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        frames::require_v23(b"APIC", version)?;

        if self.data.is_empty() {
            warn!(target: "id3v2", "{:?} picture has no image data", self.picture_type);
            return Err(SaveError::EncodingError);
        }

        let encoding = encoding::check(self.encoding, version);

        let mut result = vec![encoding::render(encoding)];
        result.extend(string::render_terminated(Encoding::Latin1, &self.mime)?);
        result.push(self.picture_type as u8);
        result.extend(string::render_terminated(encoding, &self.desc)?);
        result.extend(&self.data);

        Ok(result)
    }
}

impl Display for PictureFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} ", self.mime]?;

        if !self.desc.is_empty() {
            write![f, "\"{}\" ", self.desc]?;
        }

        write![f, "[{:?}]", self.picture_type]
    }
}

byte_enum! {
    pub enum PictureType {
        Other = 0x00,
        FileIcon = 0x01,
        OtherFileIcon = 0x02,
        FrontCover = 0x03,
        BackCover = 0x04,
        LeafletPage = 0x05,
        Media = 0x06,
        LeadArtist = 0x07,
        Artist = 0x08,
        Conductor = 0x09,
        Band = 0x0A,
        Composer = 0x0B,
        Writer = 0x0C,
        RecordingLocation = 0x0D,
        DuringRecording = 0x0E,
        DuringPerformance = 0x0F,
        MovieScreenCapture = 0x10,
        ColoredFish = 0x11,
        Illustration = 0x12,
        BandLogo = 0x13,
        PublisherLogo = 0x14,
    };
    PictureType::Other
}

impl Default for PictureType {
    fn default() -> Self {
        PictureType::Other
    }
}
