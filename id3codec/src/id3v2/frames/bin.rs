use crate::core::io::BufStream;
use crate::err::SaveResult;
use crate::id3v2::frames::{Frame, FrameId, FrameKind};
use crate::id3v2::tag::Version;
use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

fn next_token() -> u64 {
    NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)
}

/// A frame that is kept as opaque bytes.
///
/// Unrecognized frames and frames that could not be typed are stored this way, and are
/// written back exactly as they were read. Every raw frame gets a unique token, so any
/// number of them can live in a tag, even with the same identifier.
#[derive(Clone, Debug)]
pub struct RawFrame {
    id: FrameId,
    token: u64,
    pub data: Vec<u8>,
}

impl RawFrame {
    pub fn new(id: FrameId, data: Vec<u8>) -> Self {
        Self {
            id,
            token: next_token(),
            data,
        }
    }

    pub(crate) fn parse(id: FrameId, stream: &mut BufStream) -> Self {
        Self::new(id, stream.take_rest().to_vec())
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

impl Frame for RawFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::Raw {
            id: self.id,
            token: self.token,
        }
    }

    fn id(&self) -> FrameId {
        self.id
    }

    fn render(&self, _: Version) -> SaveResult<Vec<u8>> {
        Ok(self.data.clone())
    }
}

impl Display for RawFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for byte in self.data.iter().take(64) {
            write![f, "{:02x}", byte]?;
        }

        if self.data.len() > 64 {
            write![f, "..."]?;
        }

        Ok(())
    }
}
