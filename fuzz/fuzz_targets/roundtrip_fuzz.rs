#![no_main]
use libfuzzer_sys::fuzz_target;
use lmu_rotate::lmu::Map;
use lmu_rotate::rotate::Rotation;

fn assert_stable(map: &Map) {
    let bytes = map.to_bytes();
    assert_eq!(bytes.len(), map.size());
    let reparsed = Map::from_bytes(&bytes).expect("encoded map must decode");
    assert_eq!(reparsed.to_bytes(), bytes);
}

fuzz_target!(|data: &[u8]| {
    let Ok(map) = Map::from_bytes(data) else {
        return;
    };
    assert_stable(&map);

    for rotation in Rotation::ALL {
        if let Ok((turned, report)) = map.rotated(rotation) {
            assert_eq!(turned.events().len(), map.events().len());
            assert!(report.pages <= turned.events().iter().map(|e| e.pages().len()).sum());
            assert_stable(&turned);
        }
    }
});
