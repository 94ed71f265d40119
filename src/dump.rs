// Human-readable dumps of raw bytes and of decoded objects.
//
// Hex rows hold 32 bytes split into groups of 8:
//
//   0A 4C 63 66 4D 61 70 55 | 6E 69 74 0B 01 00 47 82 | ...
//
// Object dumps print the object's name, its header, then each item as
// `[0xID] Label` followed by the item's encoded bytes.

use std::fmt::{self, Write};

use crate::lcf::Object;
use crate::lmu::Map;
use crate::lmu::labels::{ObjectKind, label_or_unknown};

/// Bytes per hex dump row.
pub const ROW_LEN: usize = 32;
/// Bytes per group within a row.
pub const GROUP_LEN: usize = 8;

/// Write `data` as hex rows, one line per row.
pub fn write_hex(out: &mut impl Write, data: &[u8]) -> fmt::Result {
    for row in data.chunks(ROW_LEN) {
        for (col, byte) in row.iter().enumerate() {
            if col > 0 {
                out.write_char(' ')?;
                if col % GROUP_LEN == 0 {
                    out.write_str("| ")?;
                }
            }
            write!(out, "{byte:02X}")?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3 + data.len() / GROUP_LEN * 2);
    // Writing to a String cannot fail.
    let _ = write_hex(&mut out, data);
    out
}

/// Write a labelled dump of `object`.
pub fn write_object(
    out: &mut impl Write,
    name: &str,
    kind: ObjectKind,
    object: &Object,
) -> fmt::Result {
    writeln!(out, "{name}")?;
    writeln!(out, "Header")?;
    write_hex(out, object.header())?;
    for item in object.items() {
        writeln!(out, "[{:#04X}] {}", item.id(), label_or_unknown(kind, item.id()))?;
        write_hex(out, item.to_bytes())?;
    }
    Ok(())
}

pub fn object_dump(name: &str, kind: ObjectKind, object: &Object) -> String {
    let mut out = String::new();
    let _ = write_object(&mut out, name, kind, object);
    out
}

/// Dump a map and, with `events`, every event and page after it.
pub fn map_dump(map: &Map, events: bool) -> String {
    let mut out = String::new();
    let _ = write_map(&mut out, map, events);
    out
}

fn write_map(out: &mut impl Write, map: &Map, events: bool) -> fmt::Result {
    write_object(out, map.name(), ObjectKind::Map, map.object())?;
    if !events {
        return Ok(());
    }
    for event in map.events() {
        out.write_char('\n')?;
        write_object(out, event.name(), ObjectKind::Event, event.object())?;
        for page in event.pages() {
            out.write_char('\n')?;
            write_object(out, page.name(), ObjectKind::Page, page.object())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcf::DataItem;
    use crate::lmu::{EventSpec, MapBuilder};

    #[test]
    fn rows_and_groups() {
        let data: Vec<u8> = (0..40).collect();
        let dump = hex_dump(&data);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00 01 02 03 04 05 06 07 | 08 09"));
        assert!(lines[0].ends_with("| 18 19 1A 1B 1C 1D 1E 1F"));
        assert_eq!(lines[1], "20 21 22 23 24 25 26 27");
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert_eq!(hex_dump(&[]), "");
    }

    #[test]
    fn object_items_are_labelled() {
        let mut object = Object::with_index(1);
        object.insert(DataItem::from_integer(0x17, 2));
        object.insert(DataItem::from_integer(0x70, 1));
        let dump = object_dump("Event 1 / Page 1", ObjectKind::Page, &object);
        assert_eq!(
            dump,
            "Event 1 / Page 1\nHeader\n01\n[0x17] Facing\n17 01 02\n[0x70] Unknown\n70 01 01\n"
        );
    }

    #[test]
    fn map_dump_includes_events_on_request() {
        let map = MapBuilder::new(20, 15)
            .event(EventSpec::new(1, 1).with_pages(&[0, 1]))
            .build()
            .unwrap();
        let short = map_dump(&map, false);
        assert!(short.contains("[0x47] Lower layer data"));
        assert!(!short.contains("Event 1"));

        let full = map_dump(&map, true);
        assert!(full.contains("\nEvent 1\n"));
        assert!(full.contains("Event 1 / Page 2"));
        assert!(full.contains("[0x34] Script data"));
    }
}
