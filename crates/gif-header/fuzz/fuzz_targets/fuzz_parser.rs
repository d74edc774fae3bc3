#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((header, screen)) = gif_header::de::from_bytes(data) {
        assert_eq!(&header.to_bytes()[..], &data[..6]);
        assert_eq!(&screen.to_bytes()[..], &data[6..13]);
    }
});
