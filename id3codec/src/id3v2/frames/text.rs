use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult, SaveResult};
use crate::id3v2::frames::{self, encoding, Frame, FrameId, FrameKind};
use crate::id3v2::tag::Version;
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

id_enum! {
    /// The text information frames.
    pub enum StringType {
        AlbumTitle = (b"TALB", Some(b"TAL"), "Album/Movie/Show title"),
        BeatsPerMinute = (b"TBPM", Some(b"TBP"), "BPM"),
        Compilation = (b"TCMP", None, "iTunes Compilation Flag"),
        Composer = (b"TCOM", Some(b"TCM"), "Composer"),
        ContentType = (b"TCON", Some(b"TCO"), "Content type"),
        Copyright = (b"TCOP", Some(b"TCR"), "Copyright message"),
        Date = (b"TDAT", Some(b"TDA"), "Date"),
        EncodingTime = (b"TDEN", None, "Encoding time"),
        PlaylistDelay = (b"TDLY", Some(b"TDY"), "Playlist delay"),
        OriginalReleaseTime = (b"TDOR", None, "Original release time"),
        RecordingTime = (b"TDRC", None, "Recording time"),
        ReleaseTime = (b"TDRL", None, "Release time"),
        TaggingTime = (b"TDTG", None, "Tagging time"),
        EncodedBy = (b"TENC", Some(b"TEN"), "Encoded by"),
        Lyricist = (b"TEXT", Some(b"TXT"), "Lyricist/Text writer"),
        FileType = (b"TFLT", Some(b"TFT"), "File type"),
        Time = (b"TIME", Some(b"TIM"), "Time"),
        ContentGroup = (b"TIT1", Some(b"TT1"), "Content group description"),
        Title = (b"TIT2", Some(b"TT2"), "Title/songname/content description"),
        Subtitle = (b"TIT3", Some(b"TT3"), "Subtitle/Description refinement"),
        InitialKey = (b"TKEY", Some(b"TKE"), "Initial key"),
        Languages = (b"TLAN", Some(b"TLA"), "Language(s)"),
        Length = (b"TLEN", Some(b"TLE"), "Length"),
        MediaType = (b"TMED", Some(b"TMT"), "Media type"),
        Mood = (b"TMOO", None, "Mood"),
        OriginalAlbum = (b"TOAL", Some(b"TOT"), "Original album/movie/show title"),
        OriginalFilename = (b"TOFN", Some(b"TOF"), "Original filename"),
        OriginalLyricist = (b"TOLY", Some(b"TOL"), "Original lyricist(s)/text writer(s)"),
        OriginalArtist = (b"TOPE", Some(b"TOA"), "Original artist(s)/performer(s)"),
        OriginalReleaseYear = (b"TORY", Some(b"TOR"), "Original release year"),
        FileOwner = (b"TOWN", None, "File owner/licensee"),
        LeadArtist = (b"TPE1", Some(b"TP1"), "Lead performer(s)/Soloist(s)"),
        Band = (b"TPE2", Some(b"TP2"), "Band/orchestra/accompaniment"),
        Conductor = (b"TPE3", Some(b"TP3"), "Conductor/performer refinement"),
        RemixedBy = (b"TPE4", Some(b"TP4"), "Interpreted, remixed, or otherwise modified by"),
        PartOfSet = (b"TPOS", Some(b"TPA"), "Part of a set"),
        ProducedNotice = (b"TPRO", None, "Produced notice"),
        Publisher = (b"TPUB", Some(b"TPB"), "Publisher"),
        Track = (b"TRCK", Some(b"TRK"), "Track number/Position in set"),
        RecordingDates = (b"TRDA", Some(b"TRD"), "Recording dates"),
        RadioStationName = (b"TRSN", None, "Internet radio station name"),
        RadioStationOwner = (b"TRSO", None, "Internet radio station owner"),
        Size = (b"TSIZ", Some(b"TSI"), "Size"),
        AlbumSortOrder = (b"TSOA", None, "Album sort order"),
        PerformerSortOrder = (b"TSOP", None, "Performer sort order"),
        TitleSortOrder = (b"TSOT", None, "Title sort order"),
        Isrc = (b"TSRC", Some(b"TRC"), "ISRC (international standard recording code)"),
        EncoderSettings = (b"TSSE", Some(b"TSS"), "Software/Hardware and settings used for encoding"),
        SetSubtitle = (b"TSST", None, "Set subtitle"),
        Year = (b"TYER", Some(b"TYE"), "Year"),
    }
}

/// A text information frame holding a single string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StringFrame {
    string_type: StringType,
    pub encoding: Encoding,
    pub text: String,
}

impl StringFrame {
    pub fn new<S: Into<String>>(string_type: StringType, text: S) -> Self {
        Self::with_encoding(string_type, Encoding::default(), text)
    }

    pub fn with_encoding<S: Into<String>>(
        string_type: StringType,
        encoding: Encoding,
        text: S,
    ) -> Self {
        Self {
            string_type,
            encoding,
            text: text.into(),
        }
    }

    pub(crate) fn parse(id: FrameId, stream: &mut BufStream) -> ParseResult<Self> {
        let string_type = StringType::from_id(id.as_bytes()).ok_or(ParseError::MalformedData)?;
        let encoding = encoding::parse(stream)?;
        let text = string::read(encoding, stream);

        Ok(Self {
            string_type,
            encoding,
            text,
        })
    }

    pub fn string_type(&self) -> StringType {
        self.string_type
    }
}

impl Frame for StringFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::String(self.string_type)
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(self.string_type.id())
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        let encoding = encoding::check(self.encoding, version);

        let mut result = vec![encoding::render(encoding)];
        result.extend(string::render_terminated(encoding, &self.text)?);

        Ok(result)
    }
}

impl Display for StringFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.text]
    }
}

/// A user-defined text frame, pairing a description with a string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserTextFrame {
    pub encoding: Encoding,
    pub desc: String,
    pub text: String,
}

impl UserTextFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let desc = string::read_terminated(encoding, stream);
        let text = string::read(encoding, stream);

        Ok(Self {
            encoding,
            desc,
            text,
        })
    }
}

impl Frame for UserTextFrame {
    fn kind(&self) -> FrameKind {
        FrameKind::UserDefinedText
    }

    fn id(&self) -> FrameId {
        FrameId::from_static(b"TXXX")
    }

    fn render(&self, version: Version) -> SaveResult<Vec<u8>> {
        frames::require_v23(b"TXXX", version)?;

        let encoding = encoding::check(self.encoding, version);

        let mut result = vec![encoding::render(encoding)];
        result.extend(string::render_terminated(encoding, &self.desc)?);
        result.extend(string::render(encoding, &self.text)?);

        Ok(result)
    }
}

impl Display for UserTextFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}: {}", self.desc, self.text]
    }
}
