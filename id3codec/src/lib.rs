//! ID3v2 frame reading and writing.
//!
//! id3codec reads the ID3v2 tag at the start of an MP3 file into an ordered, queryable
//! collection of typed frames, and renders that collection back into tag bytes.
//! Unknown frames are kept verbatim, so a tag that is read and written without changes
//! keeps every frame it had.

#![forbid(unsafe_code)]

#[macro_use]
mod core;

pub mod err;
pub mod id3v2;
pub mod rating;
pub mod string;

pub use err::{ParseError, ParseResult, SaveError, SaveResult};

#[cfg(test)]
mod tests;
