use tracing::trace;

use crate::de::error::ParseError;
use crate::de::source::ByteSource;

/// Represents an ongoing parse over a borrowed byte source.
pub struct Parser<'a, S: ?Sized> {
    source: &'a mut S,
    offset: usize,
}

impl<'a, S> Parser<'a, S>
where
    S: ByteSource + ?Sized,
{
    pub const fn new(source: &'a mut S) -> Self {
        Self { source, offset: 0 }
    }

    /// The number of bytes consumed so far.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Return the next `N` bytes as one field group.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - The source fails while being read.
    /// - Fewer than `N` bytes are available.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ParseError> {
        let mut buf = [0; N];
        let received = self
            .source
            .read_available(&mut buf)
            .map_err(|err| ParseError::ReadFailure { source: err })?;

        trace!(offset = self.offset, expected = N, received, "read field group");
        self.offset += received;

        if received < N {
            return Err(ParseError::TruncatedStream {
                expected: N,
                received,
            });
        }

        Ok(buf)
    }
}
