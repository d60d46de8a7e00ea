// cargo fuzz run decode corpus/decode -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use gifkit::Decoder;

fuzz_target!(|data: &[u8]| {
    let _ = Decoder::new(Cursor::new(data)).decode();
    let _ = Decoder::new(Cursor::new(data)).strict(true).decode();
});
