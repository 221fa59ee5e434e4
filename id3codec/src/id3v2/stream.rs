//! Frame boundary scanning.
//!
//! A frame region is a run of frames followed by optional zero padding. The scanner
//! walks it one frame at a time, and gives up on the rest of the region as soon as a
//! frame boundary cannot be trusted. A frame whose boundaries are fine but whose content
//! cannot be decoded only loses that frame.

use crate::err::{ParseError, ParseResult};
use crate::id3v2::frames::{self, Frame, FrameId, FrameKind, RawFrame};
use crate::id3v2::syncdata;
use crate::id3v2::tag::Version;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::convert::TryFrom;

/// How the size field of a frame header is interpreted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SizeStrategy {
    /// Read the size as synch-safe if its bytes allow it, and as a plain integer
    /// otherwise. Plenty of ID3v2.4 taggers write plain sizes by mistake.
    SyncSafeFirst,
    /// Always read the size as a plain big-endian integer.
    PlainOnly,
}

impl SizeStrategy {
    pub fn for_version(version: Version) -> Self {
        match version {
            Version::V24 => Self::SyncSafeFirst,
            _ => Self::PlainOnly,
        }
    }
}

/// The resolved length of a frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameSize {
    /// Length of the whole frame, header included.
    pub size: usize,
    /// Whether the size field was read as synch-safe.
    pub sync_safe: bool,
}

impl FrameSize {
    /// Resolve the size of the frame whose header starts at `pos`.
    ///
    /// A synch-safe reading is only a guess: a plain size whose bytes all have their top
    /// bit clear reads as a different synch-safe size, and there is no way to tell the
    /// two apart from the header alone.
    pub fn resolve(
        data: &[u8],
        pos: usize,
        version: Version,
        strategy: SizeStrategy,
    ) -> ParseResult<Self> {
        let header_len = version.frame_header_len();

        let header = pos
            .checked_add(header_len)
            .and_then(|end| data.get(pos..end))
            .ok_or(ParseError::CorruptedFile)?;

        let offset = version.size_offset();
        let field = &header[offset..offset + version.size_len()];
        let plain = field.iter().fold(0u32, |acc, &byte| acc << 8 | u32::from(byte));

        let (payload_size, sync_safe) = match strategy {
            SizeStrategy::SyncSafeFirst => {
                match <[u8; 4]>::try_from(field)
                    .ok()
                    .filter(syncdata::is_sync_safe)
                {
                    Some(raw) => (syncdata::to_u28(raw), true),
                    None => {
                        info!(target: "id3v2", "frame size {:02x?} is not synch-safe, reading it as a plain integer", field);
                        (plain, false)
                    }
                }
            }

            SizeStrategy::PlainOnly => (plain, false),
        };

        if payload_size == 0 {
            return Err(ParseError::CorruptedFile);
        }

        let size = usize::try_from(payload_size)
            .ok()
            .and_then(|size| size.checked_add(header_len))
            .ok_or(ParseError::CorruptedFile)?;

        Ok(Self { size, sync_safe })
    }
}

/// Counters describing what a scan had to leave behind.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScanReport {
    /// Frames that were skipped because their content could not be decoded.
    pub frames_skipped: usize,
    /// Bytes left unscanned because a frame boundary could not be trusted.
    pub bytes_dropped: usize,
}

impl ScanReport {
    pub fn is_lossless(&self) -> bool {
        self.frames_skipped == 0 && self.bytes_dropped == 0
    }
}

/// An iterator over the frames of a frame region.
///
/// The iterator never yields two frames of the same [`FrameKind`](FrameKind). A frame
/// whose kind was already yielded is demoted to a [`RawFrame`](RawFrame) holding its
/// payload, so it still survives a round trip.
pub struct FrameStream<'a> {
    data: &'a [u8],
    pos: usize,
    version: Version,
    strategy: SizeStrategy,
    done: bool,
    seen: HashSet<FrameKind>,
    report: ScanReport,
}

impl<'a> FrameStream<'a> {
    pub fn new(data: &'a [u8], version: Version) -> Self {
        Self::with_strategy(data, version, SizeStrategy::for_version(version))
    }

    pub fn with_strategy(data: &'a [u8], version: Version, strategy: SizeStrategy) -> Self {
        Self {
            data,
            pos: 0,
            version,
            strategy,
            done: false,
            seen: HashSet::new(),
            report: ScanReport::default(),
        }
    }

    /// What the scan has dropped so far.
    pub fn report(&self) -> ScanReport {
        self.report
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    fn stop(&mut self) {
        self.report.bytes_dropped = self.data.len() - self.pos;
        self.done = true;
    }

    fn demote(&mut self, frame_data: &[u8]) -> Option<Box<dyn Frame>> {
        let id = FrameId::parse(&frame_data[..self.version.id_len()]).ok()?;
        let payload = frame_data[self.version.frame_header_len()..].to_vec();

        info!(target: "id3v2", "keeping duplicate frame {} as a raw frame", id);

        Some(Box::new(RawFrame::new(id, payload)))
    }
}

impl<'a> Iterator for FrameStream<'a> {
    type Item = Box<dyn Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done && self.pos < self.data.len() {
            // Padding is always zeroes, and no frame identifier can start with one.
            if self.data[self.pos] == 0 {
                debug!(target: "id3v2", "found {}b of padding", self.data.len() - self.pos);
                self.done = true;
                break;
            }

            let frame_size = match FrameSize::resolve(self.data, self.pos, self.version, self.strategy) {
                Ok(frame_size) => frame_size,
                Err(_) => {
                    warn!(target: "id3v2", "could not resolve the size of the frame at {}, dropping the rest of the tag", self.pos);
                    self.stop();
                    break;
                }
            };

            let end = self.pos + frame_size.size;

            if end > self.data.len() {
                warn!(target: "id3v2", "frame at {} overreads the tag by {}b, dropping the rest of the tag", self.pos, end - self.data.len());
                self.stop();
                break;
            }

            let frame_data = &self.data[self.pos..end];
            self.pos = end;

            debug!(
                target: "id3v2",
                "found frame {} of {}b ({})",
                String::from_utf8_lossy(&frame_data[..self.version.id_len()]),
                frame_size.size,
                if frame_size.sync_safe { "synch-safe" } else { "plain" }
            );

            match frames::parse(self.version, frame_data) {
                Ok(frame) => {
                    if self.seen.insert(frame.kind()) {
                        return Some(frame);
                    }

                    if let Some(raw) = self.demote(frame_data) {
                        return Some(raw);
                    }
                }

                Err(err) => {
                    warn!(
                        target: "id3v2",
                        "skipping frame {}: {}",
                        String::from_utf8_lossy(&frame_data[..self.version.id_len()]),
                        err
                    );

                    self.report.frames_skipped += 1;
                }
            }
        }

        None
    }
}
