// LCF binary object format, as written by RPG Maker 2000.
//
// Every file is one object: a header, then tagged data items, then a `00`
// terminator. Items may themselves hold counted arrays of sub-objects, so the
// format nests arbitrarily.
//
// # Modules
//
// - `vlq`    — Variable-length integers (base-128, big-endian)
// - `item`   — `[id][length][payload]` records and their typed views
// - `object` — Object header/body decoding, validation, re-encoding
// - `error`  — Error type shared by the codec and the map views

pub mod error;
pub mod item;
pub mod object;
pub mod vlq;

pub use error::{LcfError, Result};
pub use item::DataItem;
pub use object::{HeaderKind, OBJECT_TERMINATOR, Object};
