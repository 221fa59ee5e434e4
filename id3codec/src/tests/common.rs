mod stream {
    use crate::core::io::BufStream;
    use crate::err::ParseError;

    #[test]
    fn underreads_become_corruption() {
        let mut stream = BufStream::new(b"\xAB\xCD");

        let err: ParseError = stream.read_u32().unwrap_err().into();
        assert!(matches!(err, ParseError::CorruptedFile));

        // A failed read leaves the cursor alone.
        assert_eq!(stream.remaining(), 2);
    }
}

mod syncdata {
    use crate::id3v2::syncdata;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sync_safe_values_survive(value in 0..=syncdata::MAX) {
            let raw = syncdata::from_u28(value).unwrap();

            prop_assert!(syncdata::is_sync_safe(&raw));
            prop_assert_eq!(syncdata::to_u28(raw), value);
        }

        #[test]
        fn oversized_values_are_rejected(value in (syncdata::MAX + 1)..=u32::MAX) {
            prop_assert!(syncdata::from_u28(value).is_none());
        }
    }
}

mod string {
    use crate::core::io::BufStream;
    use crate::string::{self, Encoding};
    use proptest::prelude::*;

    const ENCODINGS: &[Encoding] = &[Encoding::Utf16, Encoding::Utf16Be, Encoding::Utf8];

    proptest! {
        #[test]
        fn unicode_text_survives(text in "[^\\x00]*", enc in 0..ENCODINGS.len()) {
            let enc = ENCODINGS[enc];
            let mut data = string::render_terminated(enc, &text).unwrap();
            data.extend_from_slice(b"\x16\x16");

            let mut stream = BufStream::new(&data);

            prop_assert_eq!(string::read_terminated(enc, &mut stream), text);
            prop_assert_eq!(stream.take_rest(), b"\x16\x16");
        }

        #[test]
        fn latin1_text_survives(text in "[\\x01-\\xFF]*") {
            let data = string::render(Encoding::Latin1, &text).unwrap();
            let mut stream = BufStream::new(&data);

            prop_assert_eq!(string::read(Encoding::Latin1, &mut stream), text);
        }
    }

    #[test]
    fn latin1_rejects_wide_text() {
        assert!(string::render(Encoding::Latin1, "Ｆｕｌｌｗｉｄｔｈ").is_err());
    }
}

mod scan {
    use crate::id3v2::Tag;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn arbitrary_bodies_never_panic(body in prop::collection::vec(any::<u8>(), 0..512), major in 2u8..=4) {
            let mut data = vec![b'I', b'D', b'3', major, 0, 0, 0, 0, 0x04, 0x00];
            data.extend(body);

            let props = Tag::parse(&data).unwrap();
            prop_assert!(props.end as usize <= data.len());
        }
    }
}
