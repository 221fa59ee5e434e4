#![no_main]

use id3codec::id3v2::{SaveOptions, Tag};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Tags are read straight from memory, so there is no need to go through a file.
    let props = match Tag::parse(data) {
        Ok(props) => props,
        Err(_) => return,
    };

    // Whatever was read has to survive being written and read again.
    if let Ok(rendered) = props.tag.render(&SaveOptions::default()) {
        assert!(Tag::parse(&rendered).is_ok());
    }
});
