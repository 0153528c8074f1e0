#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive canonicalize → reencode → encode → decode
    let Ok(record) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };
    let image = canonicalize(&record);

    for order in [RowOrder::BottomUp, RowOrder::TopDown] {
        let Ok(encoded) = encode_bmp(&reencode(image.clone()), order, enough::Unstoppable) else {
            panic!("re-encoding a decoded image failed");
        };
        let Ok(decoded) = decode_bmp(&encoded, enough::Unstoppable) else {
            panic!("re-encoded data failed to decode");
        };
        assert_eq!(canonicalize(&decoded), image, "roundtrip pixel mismatch");
    }
});
