mod common;
mod id3v2;
