// Display names for the item ids of each object kind, as shown by the dump.
// Ids without an entry print as "Unknown".

/// Which table to look an id up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Map,
    Event,
    Page,
}

const MAP_LABELS: &[(u8, &str)] = &[
    (0x00, "Header"),
    (0x01, "Chipset"),
    (0x02, "Map width"),
    (0x03, "Map height"),
    (0x0B, "Scroll type"),
    (0x1F, "Parallax background enabled"),
    (0x20, "Parallax background selection"),
    (0x21, "Parallax background horizontal loop"),
    (0x22, "Parallax background vertical loop"),
    (0x23, "Parallax background horizontal scroll enabled"),
    (0x24, "Parallax background horizontal scroll speed"),
    (0x25, "Parallax background vertical scroll enabled"),
    (0x26, "Parallax background vertical scroll speed"),
    (0x47, "Lower layer data"),
    (0x48, "Upper layer data"),
    (0x51, "Event layer data"),
    (0x5B, "Save count"),
];

const EVENT_LABELS: &[(u8, &str)] = &[
    (0x01, "Event name"),
    (0x02, "X position"),
    (0x03, "Y position"),
    (0x05, "Page data"),
];

const PAGE_LABELS: &[(u8, &str)] = &[
    (0x02, "Conditions"),
    (0x15, "Charset name"),
    (0x16, "Charset selection index"),
    (0x17, "Facing"),
    (0x19, "Undetermined"),
    (0x1F, "Undetermined"),
    (0x20, "Undetermined"),
    (0x21, "Undetermined"),
    (0x23, "Undetermined"),
    (0x24, "Undetermined"),
    (0x29, "Undetermined"),
    (0x33, "Undetermined"),
    (0x34, "Script data"),
];

impl ObjectKind {
    fn table(self) -> &'static [(u8, &'static str)] {
        match self {
            ObjectKind::Map => MAP_LABELS,
            ObjectKind::Event => EVENT_LABELS,
            ObjectKind::Page => PAGE_LABELS,
        }
    }
}

/// Label for item `id`, if the kind has one.
pub fn label(kind: ObjectKind, id: u8) -> Option<&'static str> {
    let table = kind.table();
    table
        .binary_search_by_key(&id, |&(k, _)| k)
        .ok()
        .map(|i| table[i].1)
}

/// Label for item `id`, or `"Unknown"`.
pub fn label_or_unknown(kind: ObjectKind, id: u8) -> &'static str {
    label(kind, id).unwrap_or("Unknown")
}
