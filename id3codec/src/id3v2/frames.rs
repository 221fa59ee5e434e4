//! Frame parsing and implementations.
//!
//! An ID3v2 tag is made up of chunks of data called frames. Every frame has a short header
//! holding its identifier and size, followed by a payload whose layout depends on the
//! identifier.
//!
//! Frames are represented as trait objects, since their payloads share almost nothing.
//! Each frame also reports a [`FrameKind`](FrameKind), which is the identity a
//! [`Tag`](crate::id3v2::Tag) uses to keep at most one frame of every kind.

pub mod bin;
pub mod chapters;
pub mod comments;
mod encoding;
pub mod file;
pub mod lang;
pub mod lyrics;
pub mod stats;
pub mod text;
pub mod url;

pub use bin::RawFrame;
pub use chapters::{ChapterFrame, TableOfContentsFrame, TocFlags};
pub use comments::CommentsFrame;
pub use file::{PictureFrame, PictureType};
pub use lang::Language;
pub use lyrics::TranscriptionFrame;
pub use stats::{PopularimeterFrame, UIntFrame, UIntType};
pub use text::{StringFrame, StringType, UserTextFrame};
pub use url::{UrlFrame, UrlType, UserUrlFrame};

use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult, SaveError, SaveResult};
use crate::id3v2::tag::Version;
use crate::id3v2::{compat, syncdata};

use dyn_clone::DynClone;
use log::{info, warn};
use std::any::Any;
use std::convert::TryFrom;
use std::fmt::{self, Debug, Display, Formatter};
use std::str;

pub trait Frame: Display + Debug + AsAny + DynClone {
    /// The identity of this frame within a tag.
    fn kind(&self) -> FrameKind;

    /// The identifier this frame is written with. Frames read from an ID3v2.2 tag report
    /// their ID3v2.3 identifier when one exists.
    fn id(&self) -> FrameId;

    /// Render the payload of this frame, without the frame header.
    fn render(&self, version: Version) -> SaveResult<Vec<u8>>;
}

impl dyn Frame {
    pub fn is<T: Frame>(&self) -> bool {
        self.as_any(Sealed(())).is::<T>()
    }

    pub fn downcast<T: Frame>(&self) -> Option<&T> {
        self.as_any(Sealed(())).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Frame>(&mut self) -> Option<&mut T> {
        self.as_any_mut(Sealed(())).downcast_mut::<T>()
    }
}

pub trait AsAny: Any {
    fn as_any(&self, _: Sealed) -> &dyn Any;
    fn as_any_mut(&mut self, _: Sealed) -> &mut dyn Any;
}

impl<T: Frame> AsAny for T {
    fn as_any(&self, _: Sealed) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self, _: Sealed) -> &mut dyn Any {
        self
    }
}

dyn_clone::clone_trait_object!(Frame);

/// A token for calling internal methods.
///
/// [`AsAny`](AsAny) has to be public for [`Frame`](Frame) to be implemented outside of this
/// crate, but its methods should only be called here. The only constructor of this struct
/// is private to this module.
pub struct Sealed(());

/// A 3 or 4 character frame identifier made of uppercase ASCII letters and digits.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FrameId {
    inner: [u8; 4],
    len: usize,
}

impl FrameId {
    pub(crate) const fn from_static(id: &[u8; 4]) -> Self {
        Self { inner: *id, len: 4 }
    }

    pub fn parse(id: &[u8]) -> ParseResult<Self> {
        if !(3..=4).contains(&id.len()) {
            return Err(ParseError::MalformedData);
        }

        if !id.iter().all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit()) {
            return Err(ParseError::MalformedData);
        }

        let mut inner = [0; 4];
        inner[..id.len()].copy_from_slice(id);

        Ok(Self {
            inner,
            len: id.len(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // Identifiers are always ASCII.
        str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a 3 character ID3v2.2 identifier.
    pub fn is_legacy(&self) -> bool {
        self.len == 3
    }
}

impl Display for FrameId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.as_str()]
    }
}

impl Debug for FrameId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "FrameId({})", self.as_str()]
    }
}

impl PartialEq<[u8; 4]> for FrameId {
    fn eq(&self, other: &[u8; 4]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8; 4]> for FrameId {
    fn eq(&self, other: &&[u8; 4]) -> bool {
        self == *other
    }
}

/// The identity of a frame. A tag never holds two frames of the same kind.
///
/// Pictures are told apart by their [`PictureType`](PictureType), so a tag can hold a front
/// cover and a back cover at once. Raw frames carry a token that is unique to every raw
/// frame ever created, so they never collide with anything.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FrameKind {
    Chapter,
    Comment,
    Picture(PictureType),
    Popularimeter,
    Raw { id: FrameId, token: u64 },
    String(StringType),
    TableOfContents,
    Transcription,
    UInt(UIntType),
    Url(UrlType),
    UserUrl,
    UserDefinedText,
}

// --------
// Frame dispatch. Everything below works on a single frame whose boundaries have already
// been resolved by the scanner, so a failure here only ever loses this one frame.
// --------

/// Parse a complete frame, header included. `data` must span exactly one frame.
pub(crate) fn parse(version: Version, data: &[u8]) -> ParseResult<Box<dyn Frame>> {
    let header_len = version.frame_header_len();

    if data.len() < header_len {
        return Err(ParseError::CorruptedFile);
    }

    let id = FrameId::parse(&data[..version.id_len()])?;
    let mut stream = BufStream::new(&data[header_len..]);

    decode(version, id, &mut stream)
}

/// Decode a frame payload according to its identifier. Unrecognized identifiers become
/// a [`RawFrame`](RawFrame).
pub(crate) fn decode(
    version: Version,
    id: FrameId,
    stream: &mut BufStream,
) -> ParseResult<Box<dyn Frame>> {
    // ID3v2.2 frames are matched against their ID3v2.3 equivalents, but only when the frame
    // could be written back as ID3v2.2 again. Everything else stays raw.
    let canonical = if id.is_legacy() {
        match compat::upgrade(id) {
            Some(canonical) => canonical,
            None => return Ok(Box::new(RawFrame::parse(id, stream))),
        }
    } else {
        id
    };

    let frame: Box<dyn Frame> = match canonical.as_bytes() {
        // User-defined text information frame [Frames 4.2.6]
        b"TXXX" => Box::new(UserTextFrame::parse(stream)?),

        // User-defined URL link frame [Frames 4.3.2]
        b"WXXX" => Box::new(UserUrlFrame::parse(stream)?),

        // Comments [Frames 4.10]
        b"COMM" => Box::new(CommentsFrame::parse(stream)?),

        // Unsynchronised lyrics/text transcription [Frames 4.8]
        b"USLT" => Box::new(TranscriptionFrame::parse(stream)?),

        // Attached picture [Frames 4.14]
        b"APIC" => Box::new(PictureFrame::parse(stream)?),

        // Popularimeter [Frames 4.17]
        b"POPM" => Box::new(PopularimeterFrame::parse(stream)?),

        // Chapter Frame [ID3v2 Chapter Frame Addendum 3.1]
        b"CHAP" => Box::new(ChapterFrame::parse(version, stream)?),

        // Table of Contents Frame [ID3v2 Chapter Frame Addendum 3.2]
        b"CTOC" => Box::new(TableOfContentsFrame::parse(version, stream)?),

        // Text information frames [Frames 4.2]
        id if StringType::from_id(id).is_some() => {
            Box::new(StringFrame::parse(canonical, stream)?)
        }

        // URL link frames [Frames 4.3]
        id if UrlType::from_id(id).is_some() => Box::new(UrlFrame::parse(canonical, stream)?),

        // Play counter [Frames 4.16]
        id if UIntType::from_id(id).is_some() => Box::new(UIntFrame::parse(canonical, stream)?),

        // No idea, keep it verbatim
        _ => Box::new(RawFrame::parse(id, stream)),
    };

    Ok(frame)
}

/// Render a frame with its header. Returns `None` if the frame has no payload, since a
/// frame with a size of zero cannot be read back.
pub(crate) fn render(version: Version, frame: &dyn Frame) -> SaveResult<Option<Vec<u8>>> {
    let id = resolve_id(version, frame.id())?;
    let payload = frame.render(version)?;

    if payload.is_empty() {
        info!(target: "id3v2", "dropping frame {} with no payload", id);
        return Ok(None);
    }

    let mut data = Vec::with_capacity(version.frame_header_len() + payload.len());
    data.extend_from_slice(id.as_bytes());

    match version {
        Version::V22 => {
            // ID3v2.2 sizes are 3-byte big-endian integers.
            if payload.len() > 0x00FF_FFFF {
                warn!(target: "id3v2", "frame size {}b exceeds the maximum ID3v2.2 frame size of 16mb", payload.len());
                return Err(SaveError::EncodingError);
            }

            data.extend_from_slice(&(payload.len() as u32).to_be_bytes()[1..]);
        }

        Version::V23 => {
            let size = u32::try_from(payload.len()).map_err(|_| {
                warn!(target: "id3v2", "frame size {}b exceeds the maximum ID3v2.3 frame size of 4gb", payload.len());
                SaveError::EncodingError
            })?;

            data.extend_from_slice(&size.to_be_bytes());
        }

        Version::V24 => {
            // ID3v2.4 frame sizes are syncsafe, meaning they can only be 256mb.
            let size = u32::try_from(payload.len())
                .ok()
                .and_then(syncdata::from_u28)
                .ok_or_else(|| {
                    warn!(target: "id3v2", "frame size {}b exceeds the maximum ID3v2.4 frame size of 256mb", payload.len());
                    SaveError::EncodingError
                })?;

            data.extend_from_slice(&size);
        }
    }

    // Flags are never written.
    if version != Version::V22 {
        data.extend_from_slice(&[0, 0]);
    }

    data.extend(payload);

    Ok(Some(data))
}

/// Render a sequence of frames back to back.
pub(crate) fn render_all<'a, I>(version: Version, frames: I) -> SaveResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a dyn Frame>,
{
    let mut data = Vec::new();

    for frame in frames {
        if let Some(frame_data) = render(version, frame)? {
            data.extend(frame_data);
        }
    }

    Ok(data)
}

fn resolve_id(version: Version, id: FrameId) -> SaveResult<FrameId> {
    if id.len() == version.id_len() {
        return Ok(id);
    }

    let resolved = match version {
        Version::V22 => compat::downgrade(id),
        _ => None,
    };

    resolved.ok_or_else(|| {
        warn!(target: "id3v2", "frame {} cannot be written to an {} tag", id, version);
        SaveError::UnsupportedTagVersion
    })
}

/// Reject versions older than ID3v2.3 for frames that ID3v2.2 cannot express.
pub(crate) fn require_v23(id: &[u8; 4], version: Version) -> SaveResult<()> {
    if version < Version::V23 {
        warn!(
            target: "id3v2",
            "{} frames cannot be written to an {} tag",
            str::from_utf8(id).unwrap_or_default(),
            version
        );

        return Err(SaveError::UnsupportedTagVersion);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[macro_export]
    macro_rules! make_frame {
        ($dty:ty, $data:expr, $dest:ident) => {
            crate::make_frame!($dty, $data, crate::id3v2::Version::V24, $dest)
        };

        ($dty:ty, $data:expr, $ver:expr, $dest:ident) => {
            let parsed = crate::id3v2::frames::parse($ver, $data).unwrap();

            // Stupid hack to assign the downcasted value to a variable that can then be used.
            let $dest = parsed.downcast::<$dty>().unwrap();
        };
    }

    #[macro_export]
    macro_rules! assert_render {
        ($frame:expr, $data:expr) => {
            crate::assert_render!($frame, crate::id3v2::Version::V24, $data)
        };

        ($frame:expr, $ver:expr, $data:expr) => {
            assert_eq!(
                crate::id3v2::frames::render($ver, &$frame).unwrap().unwrap(),
                &$data[..]
            )
        };
    }

    #[test]
    fn parse_frame_ids() {
        assert_eq!(FrameId::parse(b"TIT2").unwrap(), b"TIT2");
        assert!(FrameId::parse(b"TT2").unwrap().is_legacy());
        assert!(FrameId::parse(b"tit2").is_err());
        assert!(FrameId::parse(b"TI T").is_err());
        assert!(FrameId::parse(b"TI").is_err());
        assert!(FrameId::parse(b"TIT22").is_err());
    }

    #[test]
    fn parse_unknown_frame_as_raw() {
        let data = b"XTST\x00\x00\x00\x03\x00\x00\x01\x02\x03";
        make_frame!(RawFrame, data, frame);

        assert_eq!(frame.id(), b"XTST");
        assert_eq!(frame.data, b"\x01\x02\x03");
    }

    #[test]
    fn render_v23_header_with_plain_size() {
        let frame = RawFrame::new(FrameId::from_static(b"XTST"), vec![0x16; 0x80]);
        let data = render(Version::V23, &frame).unwrap().unwrap();

        assert_eq!(&data[..10], b"XTST\x00\x00\x00\x80\x00\x00");
        assert_eq!(data.len(), 10 + 0x80);
    }

    #[test]
    fn render_v24_header_with_sync_safe_size() {
        let frame = RawFrame::new(FrameId::from_static(b"XTST"), vec![0x16; 0x80]);
        let data = render(Version::V24, &frame).unwrap().unwrap();

        assert_eq!(&data[..10], b"XTST\x00\x00\x01\x00\x00\x00");
    }

    #[test]
    fn render_v22_header() {
        let frame = StringFrame::new(StringType::Title, "Hi");
        let data = render(Version::V22, &frame).unwrap().unwrap();

        // UTF-8 is mapped to UTF-16 in ID3v2.2
        assert_eq!(
            data,
            b"TT2\x00\x00\x09\x01\xFF\xFE\x48\x00\x69\x00\x00\x00"
        );
    }

    #[test]
    fn render_drops_empty_frames() {
        let frame = UrlFrame::new(UrlType::ArtistWebpage, "");
        assert!(render(Version::V24, &frame).unwrap().is_none());
    }

    #[test]
    fn render_rejects_mismatched_raw_ids() {
        let legacy = RawFrame::new(FrameId::parse(b"XYZ").unwrap(), vec![1]);
        let modern = RawFrame::new(FrameId::from_static(b"XTST"), vec![1]);

        assert!(matches!(
            render(Version::V24, &legacy),
            Err(SaveError::UnsupportedTagVersion)
        ));
        assert!(matches!(
            render(Version::V22, &modern),
            Err(SaveError::UnsupportedTagVersion)
        ));
        assert!(render(Version::V22, &legacy).unwrap().is_some());
    }

    #[test]
    fn downcast_frames() {
        let frame: Box<dyn Frame> = Box::new(StringFrame::new(StringType::Title, "Title"));

        assert!(frame.is::<StringFrame>());
        assert!(frame.downcast::<UrlFrame>().is_none());
        assert_eq!(frame.downcast::<StringFrame>().unwrap().text, "Title");
        assert_eq!(frame.kind(), FrameKind::String(StringType::Title));
    }
}
