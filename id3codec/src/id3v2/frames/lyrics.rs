use crate::core::io::BufStream;
use crate::err::{ParseResult, SaveResult};
use crate::id3v2::frames::{encoding, Frame, FrameId, FrameKind, Language};
use crate::id3v2::tag::Version;
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

/// Unsynchronized lyrics or a text transcription.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TranscriptionFrame {
    pub encoding: Encoding,
    pub lang: Language,
    pub desc: String,
    pub lyrics: String,
}

impl TranscriptionFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let lang = Language::parse(stream)?;
        let desc = string::read_terminated(encoding, stream);
        let lyrics = string::read(encoding, stream);

        Ok(Self {
            encoding,
            lang,
            desc,
            lyrics,
        })
    }
}

impl Frame for TranscriptionFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::Transcription
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(b"USLT")
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        let encoding = encoding::check(self.encoding, version);

        let mut result = vec![encoding::render(encoding)];
        result.extend(self.lang.code());
        result.extend(string::render_terminated(encoding, &self.desc)?);
        result.extend(string::render(encoding, &self.lyrics)?);

        Ok(result)
    }
}

impl Display for TranscriptionFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.lyrics]
    }
}
