#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use zenbmpio::{BmpOptions, Limits, RowPadding};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    // Both codecs and both padding rules must never panic
    for padding in [RowPadding::Canonical, RowPadding::PixelUnits] {
        let options = BmpOptions::default()
            .with_limits(limits.clone())
            .with_padding(padding);
        let _ = zenbmpio::decode_grey(&mut Cursor::new(data), &options, enough::Unstoppable);
        let _ = zenbmpio::decode_rgb(&mut Cursor::new(data), &options, enough::Unstoppable);
    }
    let _ = zenbmpio::BitmapHeader::parse(data);
});
