#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use zenbmpio::*;

fuzz_target!(|data: &[u8]| {
    let options = BmpOptions::default().with_limits(Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    });

    // If we can decode it, re-encoding against the same file must keep its
    // header bytes and decode back to identical pixels
    for layout in [PixelLayout::Gray8, PixelLayout::Rgba8] {
        let decoded = match layout {
            PixelLayout::Gray8 => decode_grey(&mut Cursor::new(data), &options, Unstoppable),
            _ => decode_rgb(&mut Cursor::new(data), &options, Unstoppable),
        };
        let Ok(decoded) = decoded else { continue };

        let mut out = Vec::new();
        let encoded = match layout {
            PixelLayout::Gray8 => encode_grey(
                decoded.pixels(), decoded.height, decoded.width,
                &mut Cursor::new(data), &mut out, &options, Unstoppable,
            ),
            _ => encode_rgb(
                decoded.pixels(), decoded.height, decoded.width,
                &mut Cursor::new(data), &mut out, &options, Unstoppable,
            ),
        };
        encoded.expect("decodable file must re-encode against itself");

        let offset = BitmapHeader::parse(data).unwrap().data_offset as usize;
        assert_eq!(&out[..offset], &data[..offset], "header bytes changed");

        let decoded2 = match layout {
            PixelLayout::Gray8 => decode_grey(&mut Cursor::new(&out), &options, Unstoppable),
            _ => decode_rgb(&mut Cursor::new(&out), &options, Unstoppable),
        }
        .expect("re-encoded data failed to decode");
        assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
    }
});
