use std::io::{ErrorKind, Read, Result as IoResult};

/// Size of the read-ahead buffer used when no explicit capacity is requested.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Single-byte reader over a fixed-size read-ahead buffer.
///
/// Once the underlying reader reports end-of-stream, the `ByteReader` never
/// consults it again and keeps returning `None`.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    buffer: Box<[u8]>,
    len: usize,
    position: usize,
    exhausted: bool,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, DEFAULT_BUFFER_SIZE)
    }

    /// A zero capacity is bumped to one byte.
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            buffer: vec![0u8; capacity.max(1)].into_boxed_slice(),
            len: 0,
            position: 0,
            exhausted: false,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the next byte, or `None` at end-of-stream.
    #[inline]
    pub fn next(&mut self) -> IoResult<Option<u8>> {
        if self.position >= self.len && !self.refill()? {
            return Ok(None);
        }

        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(Some(byte))
    }

    /// Consumes bytes up to and including the next `\n`.
    pub fn skip_line(&mut self) -> IoResult<()> {
        while let Some(byte) = self.next()? {
            if byte == b'\n' {
                break;
            }
        }

        Ok(())
    }

    fn refill(&mut self) -> IoResult<bool> {
        if self.exhausted {
            return Ok(false);
        }

        loop {
            match self.inner.read(&mut self.buffer) {
                Ok(0) => {
                    self.exhausted = true;
                    self.len = 0;
                    self.position = 0;
                    return Ok(false);
                }
                Ok(n) => {
                    self.len = n;
                    self.position = 0;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}
