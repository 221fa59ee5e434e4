use crate::core::io::BufStream;
use crate::err::{ParseResult, SaveResult};
use crate::id3v2::frames::{encoding, Frame, FrameId, FrameKind, Language};
use crate::id3v2::tag::Version;
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentsFrame {
    pub encoding: Encoding,
    pub lang: Language,
    pub desc: String,
    pub text: String,
}

impl CommentsFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let lang = Language::parse(stream)?;
        let desc = string::read_terminated(encoding, stream);
        let text = string::read(encoding, stream);

        Ok(Self {
            encoding,
            lang,
            desc,
            text,
        })
    }
}

impl Frame for CommentsFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::Comment
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(b"COMM")
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        let encoding = encoding::check(self.encoding, version);

        let mut result = vec![encoding::render(encoding)];
        result.extend(self.lang.code());
        result.extend(string::render_terminated(encoding, &self.desc)?);
        result.extend(string::render(encoding, &self.text)?);

        Ok(result)
    }
}

impl Display for CommentsFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.text]
    }
}
