#![no_main]
use libfuzzer_sys::fuzz_target;
use lmu_rotate::config::DecodeOptions;
use lmu_rotate::lcf::{HeaderKind, Object};
use lmu_rotate::lmu::Map;
use lmu_rotate::rotate::Rotation;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must only ever produce errors.
    let _ = Object::decode(data, 0, HeaderKind::LengthPrefixed);
    let _ = Map::decode(data, &DecodeOptions::strict());

    // Lenient maps can be missing anything; rotating them must still not panic.
    if let Ok(map) = Map::decode(data, &DecodeOptions::lenient()) {
        for rotation in Rotation::ALL {
            let _ = map.rotated(rotation);
        }
    }
});
