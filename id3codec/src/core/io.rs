use std::error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, ErrorKind};

/// A bounds-checked cursor over a borrowed frame payload.
///
/// Every read either consumes exactly what it asked for or fails without moving the
/// cursor, which lets codecs use `?` on truncated payloads.
pub struct BufStream<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> BufStream<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    /// Fill `buf` from the stream, failing if the stream is too short to fill it.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        if self.remaining() < buf.len() {
            return Err(stream_error(StreamError::Underread));
        }

        buf.copy_from_slice(&self.src[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();

        Ok(())
    }

    pub fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut arr = [0; N];
        self.read_exact(&mut arr)?;
        Ok(arr)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        if self.is_empty() {
            return Err(stream_error(StreamError::EndOfStream));
        }

        self.pos += 1;

        Ok(self.src[self.pos - 1])
    }

    /// Read a big-endian u32.
    pub fn read_u32(&mut self) -> io::Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Consume the stream up to and including `needle`, returning the data before it.
    ///
    /// The search only considers positions aligned to the needle length from the current
    /// position, which is what UTF-16 terminators need. If the needle never appears, the
    /// rest of the stream is returned.
    pub fn search(&mut self, needle: &[u8]) -> &'a [u8] {
        let start = self.pos;
        let mut begin = self.pos;
        let mut end = self.pos + needle.len();

        while end <= self.src.len() {
            if &self.src[begin..end] == needle {
                self.pos = end;
                return &self.src[start..begin];
            }

            begin += needle.len();
            end += needle.len();
        }

        self.take_rest()
    }

    /// Consume the rest of the stream.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let rest = &self.src[self.pos..];
        self.pos = self.src.len();
        rest
    }

    pub fn len(&self) -> usize {
        self.src.len()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.len() - self.pos()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

#[derive(Debug)]
pub enum StreamError {
    EndOfStream,
    Underread,
}

impl Display for StreamError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::EndOfStream => write![f, "end of stream"],
            Self::Underread => write![f, "not enough data left in stream"],
        }
    }
}

impl error::Error for StreamError {}

#[inline(always)]
fn stream_error(err: StreamError) -> io::Error {
    io::Error::new(ErrorKind::UnexpectedEof, err)
}
