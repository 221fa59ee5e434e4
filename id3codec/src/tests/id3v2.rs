mod tag {
    use crate::err::{ParseError, SaveError};
    use crate::id3v2::frames::{
        self, ChapterFrame, FrameId, FrameKind, PictureFrame, PictureType, RawFrame, StringFrame,
        StringType, UIntType,
    };
    use crate::id3v2::{SaveOptions, Tag, Version};
    use crate::rating::FiveStarRating;
    use crate::string::Encoding;

    fn sample(version: Version) -> Tag {
        let mut tag = Tag::empty(version);

        tag.set_title(Some("Sweet Dreams"));
        tag.set_artist(Some("Frank Zappa"));
        tag.set_comment(Some("Recorded live"));
        tag.set_rating(Some(FiveStarRating::new(4)));
        tag.set_picture(PictureType::FrontCover, Some(("image/png", vec![0x89, 0x50])));
        tag.set_picture(PictureType::BackCover, Some(("image/png", vec![0x42])));
        tag.frames.insert(RawFrame::new(
            FrameId::parse(b"XTST").unwrap(),
            vec![0x16, 0x16, 0x16],
        ));

        tag
    }

    fn reparse(tag: &Tag) -> Tag {
        let data = tag.render(&SaveOptions::default()).unwrap();
        let props = Tag::parse(&data).unwrap();

        assert!(props.report.is_lossless());
        assert_eq!(props.end as usize, data.len());

        props.tag
    }

    #[test]
    fn round_trip_v4() {
        let tag = sample(Version::V24);
        let data = tag.render(&SaveOptions::default()).unwrap();
        let parsed = reparse(&tag);

        assert_eq!(parsed.version(), Version::V24);
        assert_eq!(parsed.frames.len(), 7);
        assert_eq!(parsed.title(), Some("Sweet Dreams"));
        assert_eq!(parsed.artist(), Some("Frank Zappa"));
        assert_eq!(parsed.comment(), Some("Recorded live"));
        assert_eq!(parsed.rating(), Some(FiveStarRating::new(4)));
        assert_eq!(
            parsed.picture(PictureType::FrontCover).unwrap().data,
            &[0x89, 0x50]
        );

        assert_eq!(parsed.render(&SaveOptions::default()).unwrap(), data);
    }

    #[test]
    fn round_trip_v3() {
        let tag = sample(Version::V23);
        let data = tag.render(&SaveOptions::default()).unwrap();
        let parsed = reparse(&tag);

        assert_eq!(parsed.version(), Version::V23);
        assert_eq!(parsed.title(), Some("Sweet Dreams"));

        let title = parsed
            .frames
            .get_as::<StringFrame>(&FrameKind::String(StringType::Title))
            .unwrap();

        assert_eq!(title.encoding, Encoding::Utf16);
        assert_eq!(parsed.render(&SaveOptions::default()).unwrap(), data);
    }

    #[test]
    fn edits_leave_other_frames_alone() {
        let before = reparse(&sample(Version::V24));
        let mut after = before.clone();

        after.set_title(Some("Peaches en Regalia"));
        let after = reparse(&after);

        assert_eq!(after.title(), Some("Peaches en Regalia"));
        assert_eq!(before.frames.len(), after.frames.len());

        for (old, new) in before.frames.values().zip(after.frames.values()) {
            assert_eq!(old.id(), new.id());

            if new.kind() == FrameKind::String(StringType::Title) {
                continue;
            }

            assert_eq!(
                frames::render(Version::V24, old).unwrap(),
                frames::render(Version::V24, new).unwrap()
            );
        }
    }

    #[test]
    fn count_plays() {
        let mut tag = reparse(&sample(Version::V24));
        assert_eq!(tag.play_count(), None);

        let before = tag.frames.len();

        for expected in 1..=2 {
            let count = tag.play_count().unwrap_or(0);
            tag.set_play_count(Some(count + 1));
            tag = reparse(&tag);

            assert_eq!(tag.play_count(), Some(expected));
            assert_eq!(tag.frames.len(), before + 1);
        }

        assert!(tag
            .frames
            .contains(&FrameKind::UInt(UIntType::PlayCounter)));
    }

    #[test]
    fn replace_and_revert_pictures() {
        let original = sample(Version::V24);
        let data = original.render(&SaveOptions::default()).unwrap();

        let back_cover = |tag: &Tag| {
            let picture = tag.picture(PictureType::BackCover).unwrap();
            frames::render(Version::V24, picture).unwrap()
        };

        let mut tag = reparse(&original);
        let back_before = back_cover(&tag);

        tag.set_picture(PictureType::FrontCover, Some(("image/jpeg", vec![0xFF, 0xD8])));
        tag = reparse(&tag);

        let picture = tag.picture(PictureType::FrontCover).unwrap();
        assert_eq!(picture.mime, "image/jpeg");
        assert_eq!(picture.data, &[0xFF, 0xD8]);
        assert_eq!(tag.pictures().count(), 2);
        assert_eq!(back_cover(&tag), back_before);

        tag.set_picture(PictureType::FrontCover, Some(("image/png", vec![0x89, 0x50])));
        assert_eq!(tag.render(&SaveOptions::default()).unwrap(), data);
    }

    #[test]
    fn keep_chapters() {
        let mut chapter = ChapterFrame::new("chp0");
        chapter.end_time = 16_000;
        chapter
            .frames
            .push(Box::new(StringFrame::new(StringType::Title, "Intro")));

        let mut tag = Tag::empty(Version::V24);
        tag.frames.insert(chapter);

        let tag = reparse(&tag);
        let chapter = tag.frames.get_as::<ChapterFrame>(&FrameKind::Chapter).unwrap();

        assert_eq!(chapter.element_id, "chp0");
        assert_eq!(chapter.end_time, 16_000);
        assert_eq!(chapter.frames[0].to_string(), "Intro");
    }

    #[test]
    fn keep_unknown_frames_verbatim() {
        let data = b"ID3\x04\x00\x00\x00\x00\x00\x1C\
                     XTST\x00\x00\x00\x04\x00\x00\x01\x02\x03\x04\
                     TIT2\x00\x00\x00\x04\x00\x00\x03Hi\x00";

        let props = Tag::parse(data).unwrap();
        let raw = props.tag.frames.values().next().unwrap();

        assert!(raw.is::<RawFrame>());
        assert_eq!(props.tag.title(), Some("Hi"));
        assert_eq!(props.tag.render(&SaveOptions::default()).unwrap(), &data[..]);
    }

    #[test]
    fn keep_duplicate_frames() {
        let data = b"ID3\x04\x00\x00\x00\x00\x00\x1C\
                     TIT2\x00\x00\x00\x04\x00\x00\x03Hi\x00\
                     TIT2\x00\x00\x00\x04\x00\x00\x03Yo\x00";

        let props = Tag::parse(data).unwrap();

        assert_eq!(props.tag.frames.len(), 2);
        assert_eq!(props.tag.title(), Some("Hi"));
        assert!(props.report.is_lossless());
        assert_eq!(props.tag.render(&SaveOptions::default()).unwrap(), &data[..]);
    }

    #[test]
    fn drop_frames_past_a_bad_boundary() {
        let data = b"ID3\x04\x00\x00\x00\x00\x00\x1A\
                     TIT2\x00\x00\x00\x03\x00\x00\x00Hi\
                     TPE1\x00\x00\x00\x30\x00\x00\x00Yo";

        let props = Tag::parse(data).unwrap();

        assert_eq!(props.tag.title(), Some("Hi"));
        assert_eq!(props.tag.artist(), None);
        assert_eq!(props.report.bytes_dropped, 13);
        assert_eq!(props.report.frames_skipped, 0);
    }

    #[test]
    fn read_truncated_tags() {
        let data = b"ID3\x04\x00\x00\x00\x00\x00\x40\
                     TIT2\x00\x00\x00\x03\x00\x00\x00Hi";

        let props = Tag::parse(data).unwrap();

        assert_eq!(props.tag.title(), Some("Hi"));
        assert_eq!(props.end, 23);
        assert!(props.report.is_lossless());
    }

    #[test]
    fn round_trip_v2() {
        let data = b"ID3\x02\x00\x00\x00\x00\x00\x12\
                     TT2\x00\x00\x04\x00Hi\x00\
                     PIC\x00\x00\x02\x16\x16";

        let props = Tag::parse(data).unwrap();
        let tag = props.tag;

        assert_eq!(tag.version(), Version::V22);
        assert_eq!(tag.title(), Some("Hi"));

        let pic = tag.frames.values().nth(1).unwrap();
        assert!(pic.is::<RawFrame>());
        assert_eq!(pic.id().as_bytes(), b"PIC");

        assert_eq!(tag.render(&SaveOptions::default()).unwrap(), &data[..]);
    }

    #[test]
    fn reject_frames_a_version_cannot_hold() {
        let data = b"ID3\x02\x00\x00\x00\x00\x00\x12\
                     TT2\x00\x00\x04\x00Hi\x00\
                     PIC\x00\x00\x02\x16\x16";

        let mut tag = Tag::parse(data).unwrap().tag;
        tag.set_version(Version::V24);

        assert!(matches!(
            tag.render(&SaveOptions::default()),
            Err(SaveError::UnsupportedTagVersion)
        ));

        let mut tag = sample(Version::V24);
        tag.set_version(Version::V22);

        assert!(matches!(
            tag.render(&SaveOptions::default()),
            Err(SaveError::UnsupportedTagVersion)
        ));
    }

    #[test]
    fn downgrade_text_encodings() {
        let mut tag = Tag::empty(Version::V24);
        tag.set_title(Some("Ｆｕｌｌｗｉｄｔｈ"));
        tag.set_version(Version::V23);

        let tag = reparse(&tag);
        let title = tag
            .frames
            .get_as::<StringFrame>(&FrameKind::String(StringType::Title))
            .unwrap();

        assert_eq!(title.text, "Ｆｕｌｌｗｉｄｔｈ");
        assert_eq!(title.encoding, Encoding::Utf16);
    }

    #[test]
    fn write_padding() {
        let mut tag = Tag::empty(Version::V24);
        tag.set_title(Some("Hi"));

        let data = tag.render(&SaveOptions { padding: 64 }).unwrap();

        assert_eq!(data.len(), 10 + 14 + 64);
        assert!(data[24..].iter().all(|&byte| byte == 0));

        let props = Tag::parse(&data).unwrap();

        assert!(props.report.is_lossless());
        assert_eq!(props.end as usize, data.len());
        assert_eq!(props.tag.frames.len(), 1);
    }

    #[test]
    fn reject_bad_headers() {
        assert!(matches!(Tag::parse(b""), Err(ParseError::TagNotFound)));
        assert!(matches!(
            Tag::parse(b"TAG\x04\x00\x00\x00\x00\x00\x00"),
            Err(ParseError::TagNotFound)
        ));
        assert!(matches!(
            Tag::parse(b"ID3"),
            Err(ParseError::TagVersionNotFound)
        ));
        assert!(matches!(
            Tag::parse(b"ID3\x07\x00\x00\x00\x00\x00\x00"),
            Err(ParseError::TagVersionNotFound)
        ));
        assert!(matches!(
            Tag::parse(b"ID3\x04\x00"),
            Err(ParseError::TagSizeNotFound)
        ));
        assert!(matches!(
            Tag::parse(b"ID3\x04\x00\x00\x00\x00\x00\x80"),
            Err(ParseError::TagSizeNotFound)
        ));
    }

    #[test]
    fn reject_empty_pictures() {
        let mut tag = Tag::empty(Version::V24);
        tag.frames.insert(PictureFrame::new(PictureType::FrontCover));

        assert!(matches!(
            tag.render(&SaveOptions::default()),
            Err(SaveError::EncodingError)
        ));
    }
}

#[cfg(feature = "file")]
mod file {
    use crate::err::SaveError;
    use crate::id3v2::frames::{PictureFrame, PictureType};
    use crate::id3v2::{SaveOptions, Tag, Version};
    use std::fs;

    const AUDIO: &[u8] = b"\xFF\xFB\x90\x64\x16\x16\x16\x16";

    #[test]
    fn replace_tags_in_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.mp3");

        let mut old = Tag::empty(Version::V23);
        old.set_title(Some("Old"));

        let mut data = old.render(&SaveOptions { padding: 32 }).unwrap();
        data.extend_from_slice(AUDIO);
        fs::write(&path, &data).unwrap();

        let mut tag = Tag::read(&path).unwrap().tag;
        assert_eq!(tag.title(), Some("Old"));

        tag.set_title(Some("New"));
        tag.write(&path, &path, &SaveOptions::default()).unwrap();

        let props = Tag::read(&path).unwrap();
        assert_eq!(props.tag.title(), Some("New"));

        let written = fs::read(&path).unwrap();
        assert_eq!(&written[props.end as usize..], AUDIO);
    }

    #[test]
    fn add_tags_to_untagged_files() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.mp3");
        let dest = dir.path().join("dest.mp3");

        fs::write(&src, AUDIO).unwrap();

        let mut tag = Tag::empty(Version::V24);
        tag.set_album(Some("Hot Rats"));
        tag.write(&src, &dest, &SaveOptions::default()).unwrap();

        let props = Tag::read(&dest).unwrap();
        assert_eq!(props.tag.album(), Some("Hot Rats"));
        assert_eq!(&fs::read(&dest).unwrap()[props.end as usize..], AUDIO);
        assert_eq!(fs::read(&src).unwrap(), AUDIO);
    }

    #[test]
    fn failed_writes_leave_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.mp3");
        let dest = dir.path().join("dest.mp3");

        fs::write(&src, AUDIO).unwrap();

        let mut tag = Tag::empty(Version::V24);
        tag.frames.insert(PictureFrame::new(PictureType::FrontCover));

        assert!(matches!(
            tag.write(&src, &dest, &SaveOptions::default()),
            Err(SaveError::EncodingError)
        ));
        assert!(!dest.exists());
        assert_eq!(fs::read(&src).unwrap(), AUDIO);
    }
}
