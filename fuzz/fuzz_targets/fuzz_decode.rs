#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Headers and full decode must never panic
    let _ = zenraster::probe_bmp(data);
    let Ok(record) = zenraster::decode_bmp(data, enough::Unstoppable) else {
        return;
    };
    let _ = zenraster::canonicalize(&record);
});
