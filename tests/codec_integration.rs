use lmu_rotate::config::DecodeOptions;
use lmu_rotate::lcf::{DataItem, HeaderKind, LcfError, Object, vlq};
use lmu_rotate::lmu::{Map, event, map, page};
use lmu_rotate::rotate::Rotation;

fn item(id: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![id];
    out.extend_from_slice(&vlq::encode(payload.len() as u64));
    out.extend_from_slice(payload);
    out
}

fn tiles(count: usize, code: u16) -> Vec<u8> {
    std::iter::repeat_n(code.to_le_bytes(), count).flatten().collect()
}

fn page_bytes(index: u8, facing: Option<u8>) -> Vec<u8> {
    let mut out = vec![index];
    out.extend(item(0x02, &[0x00]));
    out.extend(item(0x15, b"hero"));
    out.extend(item(0x16, &[0x03]));
    if let Some(f) = facing {
        out.extend(item(0x17, &[f]));
    }
    out.extend(item(0x1F, &[0x01]));
    out.extend(item(0x33, &[0x04]));
    out.extend(item(0x34, &[0x00, 0x00, 0x00, 0x00]));
    out.push(0x00);
    out
}

fn event_layer(events: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = vlq::encode(events.len() as u64);
    for e in events {
        payload.extend_from_slice(e);
    }
    item(0x51, &payload)
}

fn event_bytes(index: u8, x: u8, y: u8, pages: &[Vec<u8>]) -> Vec<u8> {
    let mut page_list = vec![pages.len() as u8];
    for p in pages {
        page_list.extend_from_slice(p);
    }
    let mut out = vec![index];
    out.extend(item(0x01, b"EV0001"));
    if x > 0 {
        out.extend(item(0x02, &[x]));
    }
    if y > 0 {
        out.extend(item(0x03, &[y]));
    }
    out.extend(item(0x05, &page_list));
    out.push(0x00);
    out
}

/// A 20x15 map laid out byte by byte, as the editor writes it.
fn editor_map(events: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![0x0A];
    out.extend_from_slice(b"LcfMapUnit");
    out.extend(item(0x01, &[0x01]));
    out.extend(item(0x0B, &[0x00]));
    out.extend(item(0x1F, &[0x01]));
    out.extend(item(0x20, b"sky"));
    out.extend(item(0x47, &tiles(300, 5000)));
    out.extend(item(0x48, &tiles(300, 10000)));
    out.extend(event_layer(events));
    out.extend(item(0x5B, &[0x07]));
    out.push(0x00);
    out
}

#[test]
fn editor_map_decodes_and_reencodes_exactly() {
    let bytes = editor_map(&[event_bytes(1, 5, 2, &[page_bytes(1, Some(1))])]);
    let map = Map::from_bytes(&bytes).unwrap();

    assert_eq!((map.width().unwrap(), map.height().unwrap()), (20, 15));
    assert_eq!(map.lower_layer().unwrap(), vec![5000; 300]);
    assert_eq!(map.object().get(0x20).unwrap().as_string(), "sky");
    assert_eq!(map.object().get(map::SAVE_COUNT).unwrap().as_integer().unwrap(), 7);

    let event = &map.events()[0];
    assert_eq!(event.name(), "Event 1");
    assert_eq!(event.title().as_deref(), Some("EV0001"));
    assert_eq!((event.x().unwrap(), event.y().unwrap()), (5, 2));
    assert_eq!(event.pages()[0].facing().unwrap(), Some(1));
    assert_eq!(
        event.pages()[0].object().get(page::CHARSET_NAME).unwrap().as_string(),
        "hero"
    );

    assert_eq!(map.size(), bytes.len());
    assert_eq!(map.to_bytes(), bytes);
}

#[test]
fn layer_length_uses_multibyte_vlq() {
    let bytes = editor_map(&[]);
    let (object, _) = Object::decode(&bytes, 0, HeaderKind::LengthPrefixed).unwrap();
    let lower = object.get(map::LOWER_LAYER).unwrap();
    assert_eq!(lower.len(), 600);
    assert_eq!(&lower.to_bytes()[..3], &[0x47, 0x84, 0x58]);
}

#[test]
fn unknown_items_and_odd_lengths_survive() {
    let mut bytes = editor_map(&[]);
    // Insert item 0x60 with its 1-byte payload length written as `80 01`,
    // just before the map terminator.
    let terminator = bytes.pop().unwrap();
    bytes.extend_from_slice(&[0x60, 0x80, 0x01, 0xAB, terminator]);

    let mut map = Map::from_bytes(&bytes).unwrap();
    assert_eq!(map.to_bytes(), bytes);

    map.rotate(Rotation::Deg180).unwrap();
    let rotated = map.to_bytes();
    assert!(
        rotated.windows(4).any(|w| w == [0x60, 0x80, 0x01, 0xAB]),
        "untouched item lost its original encoding"
    );
}

#[test]
fn every_truncation_is_an_error() {
    let bytes = editor_map(&[event_bytes(1, 5, 2, &[page_bytes(1, Some(1))])]);
    // Dropping only the final terminator leaves a complete map.
    for len in 0..bytes.len() - 1 {
        assert!(Map::from_bytes(&bytes[..len]).is_err(), "prefix of {len} bytes decoded");
    }
}

#[test]
fn map_may_end_without_terminator() {
    let mut bytes = editor_map(&[event_bytes(1, 5, 2, &[page_bytes(1, Some(1))])]);
    assert_eq!(bytes.pop(), Some(0x00));

    let mut map = Map::from_bytes(&bytes).unwrap();
    assert!(!map.object().is_terminated());
    assert_eq!(map.events()[0].pages()[0].facing().unwrap(), Some(1));
    assert_eq!(map.size(), bytes.len());
    assert_eq!(map.to_bytes(), bytes);

    // Rotation keeps the shape; the events inside stay terminated.
    map.rotate(Rotation::Deg180).unwrap();
    let rotated = map.to_bytes();
    assert_ne!(rotated.last(), Some(&0x00));
    let reparsed = Map::from_bytes(&rotated).unwrap();
    assert_eq!((reparsed.events()[0].x().unwrap(), reparsed.events()[0].y().unwrap()), (14, 12));
    assert_eq!(reparsed.to_bytes(), rotated);
}

#[test]
fn object_array_count_mismatch_is_structural() {
    let one_event = event_bytes(1, 0, 0, &[page_bytes(1, Some(0))]);
    let mut layer_payload = vec![0x01];
    layer_payload.extend_from_slice(&one_event);
    layer_payload.extend_from_slice(&one_event);

    let mut bytes = vec![0x0A];
    bytes.extend_from_slice(b"LcfMapUnit");
    bytes.extend(item(0x0B, &[0x00]));
    bytes.extend(item(0x47, &tiles(300, 0)));
    bytes.extend(item(0x48, &tiles(300, 0)));
    bytes.extend(item(0x51, &layer_payload));
    bytes.extend(item(0x5B, &[0x00]));
    bytes.push(0x00);

    let err = Map::from_bytes(&bytes).unwrap_err();
    assert_eq!(
        err,
        LcfError::StructuralParse {
            context: "Map".into(),
            id: map::EVENT_LAYER,
            count: 1,
            consumed: 1 + one_event.len(),
            expected: 1 + 2 * one_event.len(),
        }
    );
}

#[test]
fn lenient_decode_tolerates_missing_facing() {
    let bytes = editor_map(&[event_bytes(
        1,
        4,
        4,
        &[page_bytes(1, None), page_bytes(2, Some(3))],
    )]);
    assert!(matches!(
        Map::from_bytes(&bytes),
        Err(LcfError::MissingRequiredField { ref context, .. }) if context == "Event 1 / Page 1"
    ));

    let mut map = Map::decode(&bytes, &DecodeOptions::lenient()).unwrap();
    let report = map.rotate(Rotation::Deg90).unwrap();
    assert_eq!(report.pages, 1);
    let pages = map.events()[0].pages();
    assert_eq!(pages[0].facing().unwrap(), None);
    assert_eq!(pages[1].facing().unwrap(), Some(0));
}

#[test]
fn generic_object_tree_roundtrips() {
    let bytes = editor_map(&[event_bytes(2, 0, 9, &[page_bytes(1, Some(2))])]);
    let (object, consumed) = Object::decode(&bytes, 0, HeaderKind::LengthPrefixed).unwrap();
    assert_eq!(consumed, bytes.len());

    let events = object
        .get(map::EVENT_LAYER)
        .unwrap()
        .as_object_array("map")
        .unwrap();
    assert_eq!(events[0].index().unwrap(), 2);
    assert!(!events[0].contains(event::X));
    let pages = events[0]
        .get(event::PAGES)
        .unwrap()
        .as_object_array("Event 2")
        .unwrap();
    assert_eq!(pages.len(), 1);

    let rebuilt = DataItem::from_objects(map::EVENT_LAYER, &events);
    assert_eq!(&rebuilt, object.get(map::EVENT_LAYER).unwrap());
    assert_eq!(object.to_bytes(), bytes);
}
