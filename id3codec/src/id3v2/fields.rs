//! Shortcuts for the fields most tags are read for.
//!
//! Every setter takes an `Option`, where `None` removes the underlying frame.

use crate::id3v2::frames::{
    CommentsFrame, Frame, FrameKind, Language, PictureFrame, PictureType, PopularimeterFrame,
    StringFrame, StringType, TranscriptionFrame, UIntFrame, UIntType,
};
use crate::id3v2::{Tag, Version};
use crate::rating::{FiveStarRating, PopularimeterRating};
use crate::string::Encoding;
use std::fmt::{self, Display, Formatter};

/// Owner written into popularimeter frames created by this crate.
const RATING_EMAIL: &str = "id3codec";

macro_rules! string_field {
    ($get:ident, $set:ident, $ty:expr) => {
        pub fn $get(&self) -> Option<&str> {
            self.string($ty)
        }

        pub fn $set(&mut self, text: Option<&str>) {
            self.set_string($ty, text)
        }
    };
}

/// Text fields that hold a plain number. Text that is not a number reads as `None`.
macro_rules! number_field {
    ($get:ident, $set:ident, $ty:expr) => {
        pub fn $get(&self) -> Option<u32> {
            self.string($ty).and_then(|text| text.trim().parse().ok())
        }

        pub fn $set(&mut self, value: Option<u32>) {
            let text = value.map(|value| value.to_string());
            self.set_string($ty, text.as_deref())
        }
    };
}

impl Tag {
    string_field!(title, set_title, StringType::Title);
    string_field!(subtitle, set_subtitle, StringType::Subtitle);
    string_field!(artist, set_artist, StringType::LeadArtist);
    string_field!(album, set_album, StringType::AlbumTitle);
    string_field!(album_artist, set_album_artist, StringType::Band);
    string_field!(genre, set_genre, StringType::ContentType);
    string_field!(initial_key, set_initial_key, StringType::InitialKey);

    number_field!(beats_per_minute, set_beats_per_minute, StringType::BeatsPerMinute);
    number_field!(recording_year, set_recording_year, StringType::Year);
    number_field!(original_release_year, set_original_release_year, StringType::OriginalReleaseYear);

    pub fn string(&self, string_type: StringType) -> Option<&str> {
        self.frames
            .get_as::<StringFrame>(&FrameKind::String(string_type))
            .map(|frame| frame.text.as_str())
    }

    pub fn set_string(&mut self, string_type: StringType, text: Option<&str>) {
        let encoding = self.default_encoding();
        let frame = text.map(|text| {
            Box::new(StringFrame::with_encoding(string_type, encoding, text)) as Box<dyn Frame>
        });

        self.frames.store(FrameKind::String(string_type), frame);
    }

    pub fn comment(&self) -> Option<&str> {
        self.frames
            .get_as::<CommentsFrame>(&FrameKind::Comment)
            .map(|frame| frame.text.as_str())
    }

    pub fn set_comment(&mut self, text: Option<&str>) {
        let encoding = self.default_encoding();
        let frame = text.map(|text| {
            Box::new(CommentsFrame {
                encoding,
                lang: Language::default(),
                desc: String::new(),
                text: text.to_string(),
            }) as Box<dyn Frame>
        });

        self.frames.store(FrameKind::Comment, frame);
    }

    pub fn lyrics(&self) -> Option<&str> {
        self.frames
            .get_as::<TranscriptionFrame>(&FrameKind::Transcription)
            .map(|frame| frame.lyrics.as_str())
    }

    pub fn set_lyrics(&mut self, lyrics: Option<&str>) {
        let encoding = self.default_encoding();
        let frame = lyrics.map(|lyrics| {
            Box::new(TranscriptionFrame {
                encoding,
                lang: Language::default(),
                desc: String::new(),
                lyrics: lyrics.to_string(),
            }) as Box<dyn Frame>
        });

        self.frames.store(FrameKind::Transcription, frame);
    }

    pub fn play_count(&self) -> Option<u32> {
        self.frames
            .get_as::<UIntFrame>(&FrameKind::UInt(UIntType::PlayCounter))
            .map(|frame| frame.value)
    }

    pub fn set_play_count(&mut self, count: Option<u32>) {
        let frame = count.map(|count| {
            Box::new(UIntFrame::new(UIntType::PlayCounter, count)) as Box<dyn Frame>
        });

        self.frames
            .store(FrameKind::UInt(UIntType::PlayCounter), frame);
    }

    pub fn rating(&self) -> Option<FiveStarRating> {
        self.frames
            .get_as::<PopularimeterFrame>(&FrameKind::Popularimeter)
            .map(|frame| PopularimeterRating(frame.rating).into())
    }

    /// Set the rating. An existing popularimeter keeps its owner and play count.
    pub fn set_rating(&mut self, rating: Option<FiveStarRating>) {
        let frame = rating.map(|rating| {
            let mut frame = self
                .frames
                .get_as::<PopularimeterFrame>(&FrameKind::Popularimeter)
                .cloned()
                .unwrap_or_else(|| PopularimeterFrame {
                    email: RATING_EMAIL.to_string(),
                    ..PopularimeterFrame::default()
                });

            frame.rating = PopularimeterRating::from(rating).0;

            Box::new(frame) as Box<dyn Frame>
        });

        self.frames.store(FrameKind::Popularimeter, frame);
    }

    pub fn track(&self) -> Option<Track> {
        self.string(StringType::Track).map(Track::parse)
    }

    pub fn set_track(&mut self, track: Option<Track>) {
        let text = track.map(|track| track.to_string());
        self.set_string(StringType::Track, text.as_deref());
    }

    pub fn picture(&self, picture_type: PictureType) -> Option<&PictureFrame> {
        self.frames.picture(picture_type)
    }

    /// Every picture in this tag, in order.
    pub fn pictures(&self) -> impl Iterator<Item = &PictureFrame> + '_ {
        self.frames.pictures()
    }

    /// Set the picture of `picture_type` to an image of the given MIME type.
    pub fn set_picture(&mut self, picture_type: PictureType, image: Option<(&str, Vec<u8>)>) {
        let encoding = self.default_encoding();
        let frame = image.map(|(mime, data)| {
            let mut frame = PictureFrame::new(picture_type);
            frame.encoding = encoding;
            frame.mime = mime.to_string();
            frame.data = data;

            Box::new(frame) as Box<dyn Frame>
        });

        self.frames.store(FrameKind::Picture(picture_type), frame);
    }

    fn default_encoding(&self) -> Encoding {
        match self.version {
            Version::V24 => Encoding::Utf8,
            _ => Encoding::Utf16,
        }
    }
}

/// A track position, as stored in a `TRCK` frame.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Track {
    pub position: u32,
    pub total: Option<u32>,
}

impl Track {
    /// Parse a "position" or "position/total" string. A position that is not a number
    /// becomes 0, and a total that is not a number is dropped.
    pub fn parse(text: &str) -> Self {
        let mut parts = text.splitn(2, '/');

        let position = parts
            .next()
            .and_then(|position| position.trim().parse().ok())
            .unwrap_or(0);

        let total = parts.next().and_then(|total| total.trim().parse().ok());

        Self { position, total }
    }
}

impl Display for Track {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.position]?;

        if let Some(total) = self.total {
            write![f, "/{}", total]?;
        }

        Ok(())
    }
}
