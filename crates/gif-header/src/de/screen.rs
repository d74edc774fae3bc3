use bitflags::bitflags;

bitflags! {
    /// The packed fields byte of the logical screen descriptor.
    ///
    /// Every bit pattern is valid. The multi-bit masks are extracted with the
    /// accessor methods rather than tested with [`Self::contains`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PackedFields: u8 {
        /// A global color table follows the descriptor.
        const GLOBAL_COLOR_TABLE = 0b1000_0000;
        /// Bits 6-4: color resolution.
        const COLOR_RESOLUTION = 0b0111_0000;
        /// The global color table is sorted by decreasing importance.
        const SORTED = 0b0000_1000;
        /// Bits 2-0: global color table size exponent.
        const GLOBAL_COLOR_TABLE_SIZE = 0b0000_0111;
    }
}

impl PackedFields {
    /// Whether a global color table follows the descriptor.
    #[must_use]
    pub const fn has_global_color_table(self) -> bool {
        self.contains(Self::GLOBAL_COLOR_TABLE)
    }

    /// The raw 3-bit color resolution value.
    #[must_use]
    pub const fn color_resolution(self) -> u8 {
        (self.bits() & Self::COLOR_RESOLUTION.bits()) >> 4
    }

    /// Whether the global color table is sorted.
    #[must_use]
    pub const fn is_sorted(self) -> bool {
        self.contains(Self::SORTED)
    }

    /// The raw 3-bit global color table size exponent.
    #[must_use]
    pub const fn global_color_table_size(self) -> u8 {
        self.bits() & Self::GLOBAL_COLOR_TABLE_SIZE.bits()
    }
}

/// Represents the logical screen descriptor that follows the GIF header.
///
/// <https://www.w3.org/Graphics/GIF/spec-gif89a.txt> (section 18)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDescriptor {
    width: u16,
    height: u16,
    packed_fields: PackedFields,
    background_color_index: u8,
    pixel_aspect_ratio: u8,
}

impl ScreenDescriptor {
    /// Length of the descriptor in bytes.
    pub const SIZE: usize = 7;

    /// Decode a descriptor from its on-disk form.
    ///
    /// Multi-byte integers in GIF are little-endian.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        let [w0, w1, h0, h1, packed, background, aspect] = bytes;

        Self {
            width: u16::from_le_bytes([w0, w1]),
            height: u16::from_le_bytes([h0, h1]),
            packed_fields: PackedFields::from_bits_retain(packed),
            background_color_index: background,
            pixel_aspect_ratio: aspect,
        }
    }

    /// Encode the descriptor back into its on-disk form.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; Self::SIZE] {
        let [w0, w1] = self.width.to_le_bytes();
        let [h0, h1] = self.height.to_le_bytes();

        [
            w0,
            w1,
            h0,
            h1,
            self.packed_fields.bits(),
            self.background_color_index,
            self.pixel_aspect_ratio,
        ]
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bit flags.
    #[must_use]
    pub const fn packed_fields(&self) -> PackedFields {
        self.packed_fields
    }

    /// The raw background color index.
    ///
    /// Only meaningful when a global color table is present; see
    /// [`Self::background_color`].
    #[must_use]
    pub const fn background_color_index(&self) -> u8 {
        self.background_color_index
    }

    /// The raw pixel aspect ratio byte. Zero means no aspect ratio is given.
    #[must_use]
    pub const fn pixel_aspect_ratio(&self) -> u8 {
        self.pixel_aspect_ratio
    }

    /// Whether the pixel aspect ratio byte carries any information.
    #[must_use]
    pub const fn has_pixel_aspect_ratio(&self) -> bool {
        self.pixel_aspect_ratio != 0
    }

    /// Whether a global color table follows the descriptor.
    #[must_use]
    pub const fn has_global_color_table(&self) -> bool {
        self.packed_fields.has_global_color_table()
    }

    /// Bits per primary color available to the original image (1 to 8).
    #[must_use]
    pub const fn bits_per_primary(&self) -> u8 {
        self.packed_fields.color_resolution() + 1
    }

    /// Number of entries in the global color table, if one is present.
    #[must_use]
    pub const fn global_color_table_len(&self) -> Option<usize> {
        if self.has_global_color_table() {
            Some(1 << (self.packed_fields.global_color_table_size() + 1))
        } else {
            None
        }
    }

    /// Size of the global color table in bytes (three per RGB entry), if one is present.
    #[must_use]
    pub const fn global_color_table_byte_len(&self) -> Option<usize> {
        match self.global_color_table_len() {
            Some(len) => Some(len * 3),
            None => None,
        }
    }

    /// The background color index, if there is a global color table for it to index.
    #[must_use]
    pub const fn background_color(&self) -> Option<u8> {
        if self.has_global_color_table() {
            Some(self.background_color_index)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_fields_worked_example() {
        // 1 011 0 101
        let packed = PackedFields::from_bits_retain(0b1011_0101);

        assert_eq!(
            (
                packed.has_global_color_table(),
                packed.color_resolution(),
                packed.is_sorted(),
                packed.global_color_table_size(),
            ),
            (true, 3, false, 5)
        );

        let screen = ScreenDescriptor::from_bytes([0, 0, 0, 0, 0xB5, 0, 0]);
        assert_eq!(screen.bits_per_primary(), 4);
        assert_eq!(screen.global_color_table_len(), Some(64));
        assert_eq!(screen.global_color_table_byte_len(), Some(192));
    }

    #[test]
    fn packed_fields_extremes() {
        let all = PackedFields::from_bits_retain(0xFF);
        assert!(all.has_global_color_table());
        assert_eq!(all.color_resolution(), 7);
        assert!(all.is_sorted());
        assert_eq!(all.global_color_table_size(), 7);

        let none = PackedFields::from_bits_retain(0x00);
        assert!(!none.has_global_color_table());
        assert_eq!(none.color_resolution(), 0);
        assert!(!none.is_sorted());
        assert_eq!(none.global_color_table_size(), 0);
    }

    #[test]
    fn little_endian_dimensions() {
        let screen = ScreenDescriptor::from_bytes([0x34, 0x12, 0x01, 0x80, 0, 0, 0]);

        assert_eq!(screen.width(), 0x1234);
        assert_eq!(screen.height(), 0x8001);
    }

    #[test]
    fn largest_color_table() {
        let screen = ScreenDescriptor::from_bytes([0, 0, 0, 0, 0b1000_0111, 0, 0]);

        assert_eq!(screen.global_color_table_len(), Some(256));
        assert_eq!(screen.global_color_table_byte_len(), Some(768));
    }

    #[test]
    fn background_requires_color_table() {
        let without = ScreenDescriptor::from_bytes([1, 0, 1, 0, 0b0111_0111, 9, 0]);
        assert_eq!(without.background_color_index(), 9);
        assert_eq!(without.background_color(), None);
        assert_eq!(without.global_color_table_len(), None);

        let with = ScreenDescriptor::from_bytes([1, 0, 1, 0, 0b1000_0000, 9, 0]);
        assert_eq!(with.background_color(), Some(9));
        assert_eq!(with.global_color_table_len(), Some(2));
    }

    #[test]
    fn pixel_aspect_ratio() {
        assert!(!ScreenDescriptor::from_bytes([0; 7]).has_pixel_aspect_ratio());

        let screen = ScreenDescriptor::from_bytes([0, 0, 0, 0, 0, 0, 49]);
        assert!(screen.has_pixel_aspect_ratio());
        assert_eq!(screen.pixel_aspect_ratio(), 49);
    }

    #[test]
    fn to_bytes_preserves_input() {
        let bytes = [0x40, 0x01, 0xF0, 0x00, 0xF7, 0x00, 0x00];
        assert_eq!(ScreenDescriptor::from_bytes(bytes).to_bytes(), bytes);
    }
}
