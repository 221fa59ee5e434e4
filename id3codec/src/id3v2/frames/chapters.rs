use crate::core::io::BufStream;
use crate::err::{ParseResult, SaveError, SaveResult};
use crate::id3v2::frames::{self, Frame, FrameId, FrameKind};
use crate::id3v2::stream::FrameStream;
use crate::id3v2::tag::Version;
use crate::string::{self, Encoding};
use log::warn;
use std::fmt::{self, Display, Formatter};

/// Byte offsets equal to this are not set.
const NO_OFFSET: u32 = u32::MAX;

#[derive(Clone, Debug, Default)]
pub struct ChapterFrame {
    pub element_id: String,
    /// Start of the chapter, in milliseconds.
    pub start_time: u32,
    /// End of the chapter, in milliseconds.
    pub end_time: u32,
    pub start_offset: Option<u32>,
    pub end_offset: Option<u32>,
    pub frames: Vec<Box<dyn Frame>>,
}

impl ChapterFrame {
    pub fn new<S: Into<String>>(element_id: S) -> Self {
        Self {
            element_id: element_id.into(),
            ..Self::default()
        }
    }

    pub(crate) fn parse(version: Version, stream: &mut BufStream) -> ParseResult<Self> {
        let element_id = string::read_terminated(Encoding::Latin1, stream);

        let start_time = stream.read_u32()?;
        let end_time = stream.read_u32()?;
        let start_offset = read_offset(stream)?;
        let end_offset = read_offset(stream)?;

        let frames = read_frames("chapter", &element_id, version, stream);

        Ok(Self {
            element_id,
            start_time,
            end_time,
            start_offset,
            end_offset,
            frames,
        })
    }
}

impl Frame for ChapterFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::Chapter
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(b"CHAP")
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        frames::require_v23(b"CHAP", version)?;

        let mut result = string::render_terminated(Encoding::Latin1, &self.element_id)?;
        result.extend(&self.start_time.to_be_bytes());
        result.extend(&self.end_time.to_be_bytes());
        result.extend(&self.start_offset.unwrap_or(NO_OFFSET).to_be_bytes());
        result.extend(&self.end_offset.unwrap_or(NO_OFFSET).to_be_bytes());
        result.extend(frames::render_all(version, self.frames.iter().map(|frame| &**frame))?);

        Ok(result)
    }
}

impl Display for ChapterFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![
            f,
            "{} [Start: {}, End: {}]",
            self.element_id, self.start_time, self.end_time
        ]?;

        fmt_sub_frames(f, &self.frames)
    }
}

#[derive(Clone, Debug, Default)]
pub struct TableOfContentsFrame {
    pub element_id: String,
    pub flags: TocFlags,
    pub elements: Vec<String>,
    pub frames: Vec<Box<dyn Frame>>,
}

impl TableOfContentsFrame {
    pub fn new<S: Into<String>>(element_id: S) -> Self {
        Self {
            element_id: element_id.into(),
            ..Self::default()
        }
    }

    pub(crate) fn parse(version: Version, stream: &mut BufStream) -> ParseResult<Self> {
        let element_id = string::read_terminated(Encoding::Latin1, stream);

        let flags = stream.read_u8()?;
        let flags = TocFlags {
            top_level: flags & 0x2 != 0,
            ordered: flags & 0x1 != 0,
        };

        let mut elements: Vec<String> = Vec::new();
        let entry_count = stream.read_u8()?;

        for _ in 0..entry_count {
            if stream.is_empty() {
                // The entry count may be inaccurate, so we also ensure that we
                // don't overread the data.
                break;
            }

            elements.push(string::read_terminated(Encoding::Latin1, stream));
        }

        let frames = read_frames("table of contents", &element_id, version, stream);

        Ok(Self {
            element_id,
            flags,
            elements,
            frames,
        })
    }
}

impl Frame for TableOfContentsFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::TableOfContents
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(b"CTOC")
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        frames::require_v23(b"CTOC", version)?;

        if self.elements.len() > u8::MAX as usize {
            warn!(target: "id3v2", "table of contents has {} entries, the maximum is 255", self.elements.len());
            return Err(SaveError::EncodingError);
        }

        let mut result = string::render_terminated(Encoding::Latin1, &self.element_id)?;
        result.push(self.flags.to_byte());
        result.push(self.elements.len() as u8);

        for element in &self.elements {
            result.extend(string::render_terminated(Encoding::Latin1, element)?);
        }

        result.extend(frames::render_all(version, self.frames.iter().map(|frame| &**frame))?);

        Ok(result)
    }
}

impl Display for TableOfContentsFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.element_id]?;

        if !self.elements.is_empty() {
            write![f, ", Elements:"]?;

            for entry in &self.elements {
                write![f, " {}", entry]?;
            }
        }

        fmt_sub_frames(f, &self.frames)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TocFlags {
    pub top_level: bool,
    pub ordered: bool,
}

impl TocFlags {
    fn to_byte(self) -> u8 {
        u8::from(self.top_level) << 1 | u8::from(self.ordered)
    }
}

/// Read the embedded frames that make up the rest of a CHAP or CTOC frame.
fn read_frames(
    owner: &str,
    element_id: &str,
    version: Version,
    stream: &mut BufStream,
) -> Vec<Box<dyn Frame>> {
    let mut sub = FrameStream::new(stream.take_rest(), version);
    let frames = sub.by_ref().collect();
    let report = sub.report();

    if !report.is_lossless() {
        warn!(
            target: "id3v2",
            "{} {} lost {} embedded frames and {}b of frame data",
            owner, element_id, report.frames_skipped, report.bytes_dropped
        );
    }

    frames
}

fn read_offset(stream: &mut BufStream) -> ParseResult<Option<u32>> {
    Ok(Some(stream.read_u32()?).filter(|&offset| offset != NO_OFFSET))
}

fn fmt_sub_frames(f: &mut Formatter, frames: &[Box<dyn Frame>]) -> fmt::Result {
    if !frames.is_empty() {
        write![f, ", Sub-Frames:"]?;

        for frame in frames {
            write![f, " {}", frame.id()]?;
        }
    }

    Ok(())
}
