use std::fmt;
use std::str::FromStr;

use crate::de::error::InvalidVersion;

/// The first three bytes of every GIF stream.
pub const SIGNATURE: [u8; 3] = *b"GIF";

/// A three byte version tag, such as `89a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version([u8; 3]);

impl Version {
    /// The original 1987 revision.
    pub const GIF87A: Self = Self(*b"87a");
    /// The 1989 revision, which added extension blocks.
    pub const GIF89A: Self = Self(*b"89a");

    /// Create a version tag from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the tag.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| InvalidVersion::new(s))?;

        if !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return Err(InvalidVersion::new(s));
        }

        Ok(Self(bytes))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        String::from_utf8_lossy(&self.0).fmt(f)
    }
}

/// The set of versions the parser accepts.
///
/// Defaults to [`Version::GIF87A`] and [`Version::GIF89A`]. New revisions can be
/// allowed here without touching any parsing code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionAllowList {
    versions: Vec<Version>,
}

impl Default for VersionAllowList {
    fn default() -> Self {
        Self {
            versions: vec![Version::GIF87A, Version::GIF89A],
        }
    }
}

impl FromIterator<Version> for VersionAllowList {
    fn from_iter<I: IntoIterator<Item = Version>>(iter: I) -> Self {
        let mut list = Self {
            versions: Vec::new(),
        };
        list.extend(iter);
        list
    }
}

impl Extend<Version> for VersionAllowList {
    fn extend<I: IntoIterator<Item = Version>>(&mut self, iter: I) {
        for version in iter {
            if !self.contains(version) {
                self.versions.push(version);
            }
        }
    }
}

impl VersionAllowList {
    /// Whether `version` is accepted.
    #[must_use]
    pub fn contains(&self, version: Version) -> bool {
        self.versions.contains(&version)
    }

    /// Every accepted version, in insertion order.
    #[must_use]
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }
}

/// Represents the 6 byte header at the start of a GIF stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifHeader {
    signature: [u8; 3],
    version: Version,
}

impl GifHeader {
    /// Length of the header in bytes.
    pub const SIZE: usize = 6;

    pub(crate) const fn new(version: Version) -> Self {
        Self {
            signature: SIGNATURE,
            version,
        }
    }

    /// The file signature (always `GIF`).
    #[must_use]
    pub const fn signature(&self) -> &[u8; 3] {
        &self.signature
    }

    /// The version tag following the signature.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Encode the header back into its on-disk form.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; Self::SIZE] {
        let [s0, s1, s2] = self.signature;
        let [v0, v1, v2] = self.version.0;
        [s0, s1, s2, v0, v1, v2]
    }
}
