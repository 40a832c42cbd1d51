#![no_main]
use libfuzzer_sys::fuzz_target;
use lzw12::decode;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the decoder, only degrade.
    let mut decoder = decode::Decoder::new();
    let mut out = vec![];
    let result = decoder.decode(data, &mut out);
    assert!(result.status.is_ok(), "{:?}", result.status);
});
