use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult, SaveResult};
use crate::id3v2::frames::{encoding, Frame, FrameId, FrameKind};
use crate::id3v2::tag::Version;
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

id_enum! {
    /// The URL link frames.
    pub enum UrlType {
        CommercialInfo = (b"WCOM", Some(b"WCM"), "Commercial information"),
        CopyrightInfo = (b"WCOP", Some(b"WCP"), "Copyright/Legal information"),
        AudioFileWebpage = (b"WOAF", Some(b"WAF"), "Official audio file webpage"),
        ArtistWebpage = (b"WOAR", Some(b"WAR"), "Official artist/performer webpage"),
        AudioSourceWebpage = (b"WOAS", Some(b"WAS"), "Official audio source webpage"),
        RadioStationWebpage = (b"WORS", None, "Official Internet radio station homepage"),
        Payment = (b"WPAY", None, "Payment"),
        PublisherWebpage = (b"WPUB", Some(b"WPB"), "Publishers official webpage"),
    }
}

/// A URL link frame. URLs are always Latin-1.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UrlFrame {
    url_type: UrlType,
    pub url: String,
}

impl UrlFrame {
    pub fn new<S: Into<String>>(url_type: UrlType, url: S) -> Self {
        Self {
            url_type,
            url: url.into(),
        }
    }

    pub(crate) fn parse(id: FrameId, stream: &mut BufStream) -> ParseResult<Self> {
        let url_type = UrlType::from_id(id.as_bytes()).ok_or(ParseError::MalformedData)?;
        let url = string::read(Encoding::Latin1, stream);

        Ok(Self { url_type, url })
    }

    pub fn url_type(&self) -> UrlType {
        self.url_type
    }
}

impl Frame for UrlFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::Url(self.url_type)
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(self.url_type.id())
    }

    fn render(&self, _: Version) -> SaveResult<Vec<u8>> {
        string::render(Encoding::Latin1, &self.url)
    }
}

impl Display for UrlFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.url]
    }
}

/// A user-defined URL frame. The description follows the declared encoding, the URL is
/// always Latin-1.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserUrlFrame {
    pub encoding: Encoding,
    pub desc: String,
    pub url: String,
}

impl UserUrlFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let desc = string::read_terminated(encoding, stream);
        let url = string::read(Encoding::Latin1, stream);

        Ok(Self {
            encoding,
            desc,
            url,
        })
    }
}

impl Frame for UserUrlFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::UserUrl
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(b"WXXX")
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        let encoding = encoding::check(self.encoding, version);

        let mut result = vec![encoding::render(encoding)];
        result.extend(string::render_terminated(encoding, &self.desc)?);
        result.extend(string::render(Encoding::Latin1, &self.url)?);

        Ok(result)
    }
}

impl Display for UserUrlFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}: {}", self.desc, self.url]
    }
}
