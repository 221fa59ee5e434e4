//! ID3v2 tag reading and writing.
//!
//! A [`Tag`](Tag) is an ordered collection of frames plus the version it is written in.
//! Reading a tag never fails because of a bad frame. Frames that cannot be decoded are
//! skipped, and what was lost is described by the [`ScanReport`](ScanReport) returned
//! alongside the tag.

pub mod collections;
mod compat;
mod fields;
pub mod frames;
pub mod stream;
pub mod syncdata;
pub mod tag;

pub use collections::FrameMap;
pub use fields::Track;
pub use frames::{Frame, FrameId, FrameKind};
pub use stream::{FrameSize, FrameStream, ScanReport, SizeStrategy};
pub use tag::{TagHeader, Version};

use crate::err::{ParseError, ParseResult, SaveError, SaveResult};
use log::warn;
use std::convert::TryInto;

#[cfg(feature = "file")]
use log::info;
#[cfg(feature = "file")]
use std::fs::{self, File};
#[cfg(feature = "file")]
use std::io::Read;
#[cfg(feature = "file")]
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Tag {
    version: Version,
    pub frames: FrameMap,
}

impl Tag {
    /// Create a tag from a list of frames.
    ///
    /// # Panics
    ///
    /// Panics if two of the frames share a [`FrameKind`](FrameKind).
    pub fn new(version: Version, frames: Vec<Box<dyn Frame>>) -> Self {
        let mut map = FrameMap::new();

        for frame in frames {
            let kind = frame.kind();
            let old = map.store(kind, Some(frame));

            assert!(old.is_none(), "tag has more than one frame of kind {:?}", kind);
        }

        Self {
            version,
            frames: map,
        }
    }

    pub fn empty(version: Version) -> Self {
        Self {
            version,
            frames: FrameMap::new(),
        }
    }

    /// Read a tag from the start of `data`.
    pub fn parse(data: &[u8]) -> ParseResult<TagProperties> {
        let header = parse_header(data)?;
        let declared_end = tag::HEADER_LEN + header.size();

        if data.len() < declared_end {
            warn!(
                target: "id3v2",
                "tag declares {}b but only {}b are available",
                header.size(),
                data.len() - tag::HEADER_LEN
            );
        }

        let body = &data[tag::HEADER_LEN..declared_end.min(data.len())];

        Ok(scan(header.version(), body))
    }

    /// Read the tag at the start of the file at `path`. Only the tag region is read.
    #[cfg(feature = "file")]
    pub fn read<P: AsRef<Path>>(path: P) -> ParseResult<TagProperties> {
        let mut file = File::open(path)?;

        let mut head = Vec::with_capacity(tag::HEADER_LEN);
        file.by_ref()
            .take(tag::HEADER_LEN as u64)
            .read_to_end(&mut head)?;

        let header = parse_header(&head)?;

        let mut body = Vec::with_capacity(header.size());
        file.take(header.size() as u64).read_to_end(&mut body)?;

        if body.len() < header.size() {
            warn!(
                target: "id3v2",
                "tag declares {}b but the file ends after {}b",
                header.size(),
                body.len()
            );
        }

        Ok(scan(header.version(), &body))
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Change the version this tag is written in. Frames that the new version cannot
    /// express will make [`render`](Tag::render) fail.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Render this tag, header included.
    pub fn render(&self, options: &SaveOptions) -> SaveResult<Vec<u8>> {
        let frames = frames::render_all(self.version, self.frames.values())?;

        let size = frames
            .len()
            .checked_add(options.padding)
            .ok_or(SaveError::EncodingError)?;

        let mut header = TagHeader::with_version(self.version);
        header.set_size(size);

        let mut data = Vec::with_capacity(tag::HEADER_LEN + size);
        data.extend_from_slice(&header.render()?);
        data.extend(frames);
        data.resize(tag::HEADER_LEN + size, 0);

        Ok(data)
    }

    /// Write this tag followed by the audio of `src` into `dest`.
    ///
    /// Any tag at the start of `src` is replaced. `src` and `dest` can be the same file.
    /// The tag is rendered before anything is read or written, so a frame that cannot be
    /// rendered leaves `dest` untouched.
    #[cfg(feature = "file")]
    pub fn write<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        src: P,
        dest: Q,
        options: &SaveOptions,
    ) -> SaveResult<()> {
        let tag = self.render(options)?;
        let data = fs::read(src)?;

        let audio_start = match parse_header(&data) {
            Ok(header) => (tag::HEADER_LEN + header.size()).min(data.len()),
            Err(_) => 0,
        };

        info!(
            target: "id3v2",
            "writing {}b tag over {}b of old tag data",
            tag.len(),
            audio_start
        );

        let mut output = tag;
        output.extend_from_slice(&data[audio_start..]);

        fs::write(dest, output)?;

        Ok(())
    }
}

/// The result of reading a tag.
#[derive(Debug, Clone)]
pub struct TagProperties {
    pub tag: Tag,
    /// Offset of the tag header. Tags are only read from the start of a file.
    pub start: u64,
    /// Offset just past the tag region, where the audio begins.
    pub end: u64,
    /// What the frame scan had to drop.
    pub report: ScanReport,
}

#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Zero bytes appended after the frames.
    pub padding: usize,
}

fn parse_header(data: &[u8]) -> ParseResult<TagHeader> {
    if !data.starts_with(tag::ID_HEADER) {
        return Err(ParseError::TagNotFound);
    }

    match data.get(3) {
        Some(&major) => Version::parse(major)?,
        None => return Err(ParseError::TagVersionNotFound),
    };

    let raw: [u8; tag::HEADER_LEN] = data
        .get(..tag::HEADER_LEN)
        .and_then(|raw| raw.try_into().ok())
        .ok_or(ParseError::TagSizeNotFound)?;

    TagHeader::parse(raw)
}

fn scan(version: Version, body: &[u8]) -> TagProperties {
    let mut stream = FrameStream::new(body, version);
    let frames: Vec<Box<dyn Frame>> = stream.by_ref().collect();
    let report = stream.report();

    if !report.is_lossless() {
        warn!(
            target: "id3v2",
            "skipped {} frames and dropped {}b while reading the tag",
            report.frames_skipped,
            report.bytes_dropped
        );
    }

    TagProperties {
        tag: Tag::new(version, frames),
        start: 0,
        end: (tag::HEADER_LEN + body.len()) as u64,
        report,
    }
}
