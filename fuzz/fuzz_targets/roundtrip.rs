#![no_main]
use libfuzzer_sys::fuzz_target;
use lzw12::{decode, encode};

fuzz_target!(|data: &[u8]| {
    let mut encoder = encode::Encoder::new();
    let mut buffer = Vec::with_capacity(data.len() * 3 / 2 + 3);
    let result = encoder.encode(data, &mut buffer);
    assert!(result.status.is_ok(), "{:?}", result.status);

    let mut decoder = decode::Decoder::new();
    let mut compare = vec![];
    let result = decoder.decode(buffer.as_slice(), &mut compare);
    assert!(result.status.is_ok(), "{:?}", result.status);
    assert!(data == &*compare);
});
