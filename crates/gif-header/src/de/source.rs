use std::io::{self, ErrorKind, Read};

/// Anything the header can be read from.
///
/// Implemented for every [`Read`], so files, sockets, and in-memory buffers
/// (`&[u8]`, [`io::Cursor`]) can all be passed directly.
pub trait ByteSource {
    /// Fill as much of `buf` as the source allows and return how many bytes were written.
    ///
    /// A return value smaller than `buf.len()` means the source is exhausted.
    ///
    /// # Errors
    ///
    /// This function returns an error if the underlying source fails for any reason other
    /// than running out of data.
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<R> ByteSource for R
where
    R: Read + ?Sized,
{
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;

        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }

        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out a single byte per call, interrupting every other call.
    struct Trickle<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }

            let Some((first, rest)) = self.data.split_first() else {
                return Ok(0);
            };

            if buf.is_empty() {
                return Ok(0);
            }

            buf[0] = *first;
            self.data = rest;
            Ok(1)
        }
    }

    #[test]
    fn fills_across_short_reads() {
        let mut source = Trickle {
            data: b"GIF89a",
            interrupt: false,
        };
        let mut buf = [0; 6];

        assert_eq!(source.read_available(&mut buf).unwrap(), 6);
        assert_eq!(&buf, b"GIF89a");
    }

    #[test]
    fn reports_partial_fill_on_exhaustion() {
        let mut source: &[u8] = b"GIF";
        let mut buf = [0; 6];

        assert_eq!(source.read_available(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"GIF");
    }
}
