//! Decode the GIF header and logical screen descriptor.
//!
//! ```
//! let data = b"GIF89a\x40\x01\xF0\x00\xF7\x00\x00";
//! let (header, screen) = gif_header::de::from_bytes(data).unwrap();
//!
//! assert_eq!(header.version(), gif_header::de::Version::GIF89A);
//! assert_eq!((screen.width(), screen.height()), (320, 240));
//! ```

mod error;
mod header;
mod parser;
mod screen;
mod source;

pub use error::{ErrorKind, InvalidVersion, ParseError};
pub use header::{GifHeader, SIGNATURE, Version, VersionAllowList};
pub use screen::{PackedFields, ScreenDescriptor};
pub use source::ByteSource;
use tracing::debug;

use crate::de::parser::Parser;

/// Reads the fixed-size records at the start of a GIF stream.
///
/// A parser holds no state between calls, so one instance can be shared freely
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct HeaderParser {
    versions: VersionAllowList,
}

impl HeaderParser {
    /// Create a parser accepting the default versions (`87a` and `89a`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser accepting only the versions in `versions`.
    #[must_use]
    pub const fn with_versions(versions: VersionAllowList) -> Self {
        Self { versions }
    }

    /// The versions this parser accepts.
    #[must_use]
    pub const fn versions(&self) -> &VersionAllowList {
        &self.versions
    }

    /// Read and validate the 6 byte header.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - The source fails while being read.
    /// - Fewer than 6 bytes are available.
    /// - The signature is not `GIF`.
    /// - The version is not in the allow-list.
    pub fn read_header<S>(&self, source: &mut S) -> Result<GifHeader, ParseError>
    where
        S: ByteSource + ?Sized,
    {
        let mut parser = Parser::new(source);
        self.parse_header(&mut parser)
    }

    /// Read and decode the 7 byte logical screen descriptor.
    ///
    /// The source should be positioned directly after the header.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - The source fails while being read.
    /// - Fewer than 7 bytes are available.
    pub fn read_screen_descriptor<S>(&self, source: &mut S) -> Result<ScreenDescriptor, ParseError>
    where
        S: ByteSource + ?Sized,
    {
        let mut parser = Parser::new(source);
        parse_screen_descriptor(&mut parser)
    }

    /// Read the header followed by the logical screen descriptor.
    ///
    /// The source should be positioned at the start of the stream. Nothing past the
    /// descriptor is consumed.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - The source fails while being read.
    /// - The stream is shorter than 13 bytes.
    /// - The signature is not `GIF`.
    /// - The version is not in the allow-list.
    pub fn parse<S>(&self, source: &mut S) -> Result<(GifHeader, ScreenDescriptor), ParseError>
    where
        S: ByteSource + ?Sized,
    {
        let mut parser = Parser::new(source);
        let header = self.parse_header(&mut parser)?;
        let screen = parse_screen_descriptor(&mut parser)?;

        debug!(bytes = parser.offset(), "parsed GIF header and screen descriptor");
        Ok((header, screen))
    }

    fn parse_header<S>(&self, parser: &mut Parser<'_, S>) -> Result<GifHeader, ParseError>
    where
        S: ByteSource + ?Sized,
    {
        let bytes: [u8; GifHeader::SIZE] = parser.read_array()?;
        let [s0, s1, s2, v0, v1, v2] = bytes;

        let signature = [s0, s1, s2];
        if signature != SIGNATURE {
            return Err(ParseError::BadSignature { actual: signature });
        }

        let version = Version::from_bytes([v0, v1, v2]);
        debug!("version: {version}");

        if !self.versions.contains(version) {
            return Err(ParseError::UnsupportedVersion {
                actual: *version.as_bytes(),
            });
        }

        Ok(GifHeader::new(version))
    }
}

fn parse_screen_descriptor<S>(parser: &mut Parser<'_, S>) -> Result<ScreenDescriptor, ParseError>
where
    S: ByteSource + ?Sized,
{
    let bytes: [u8; ScreenDescriptor::SIZE] = parser.read_array()?;
    let screen = ScreenDescriptor::from_bytes(bytes);

    debug!(
        width = screen.width(),
        height = screen.height(),
        packed_fields = screen.packed_fields().bits(),
        "decoded logical screen descriptor"
    );

    Ok(screen)
}

/// Read and validate the header using the default allow-list.
///
/// See [`HeaderParser::read_header`].
///
/// # Errors
///
/// See [`HeaderParser::read_header`].
pub fn read_header<S>(source: &mut S) -> Result<GifHeader, ParseError>
where
    S: ByteSource + ?Sized,
{
    HeaderParser::new().read_header(source)
}

/// Read and decode the logical screen descriptor.
///
/// # Errors
///
/// See [`HeaderParser::read_screen_descriptor`].
pub fn read_screen_descriptor<S>(source: &mut S) -> Result<ScreenDescriptor, ParseError>
where
    S: ByteSource + ?Sized,
{
    HeaderParser::new().read_screen_descriptor(source)
}

/// Read the header and logical screen descriptor using the default allow-list.
///
/// # Errors
///
/// See [`HeaderParser::parse`].
pub fn parse<S>(source: &mut S) -> Result<(GifHeader, ScreenDescriptor), ParseError>
where
    S: ByteSource + ?Sized,
{
    HeaderParser::new().parse(source)
}

/// Decode the start of an in-memory GIF.
///
/// # Errors
///
/// See [`HeaderParser::parse`].
pub fn from_bytes(mut data: &[u8]) -> Result<(GifHeader, ScreenDescriptor), ParseError> {
    parse(&mut data)
}
