// Typed views over the LCF objects that make up an RPG Maker 2000 map unit.
//
// A view takes ownership of a generic `Object` and reads its items on demand.
// Setters replace the underlying item, and parents rebuild their object-array
// item whenever their children change, so encoding a view always reflects its
// current state.
//
// # Modules
//
// - `map`     — The map unit: dimensions, tile layers, event layer
// - `event`   — Events: position and pages
// - `page`    — Event pages: facing
// - `labels`  — Human-readable names for known item ids
// - `builder` — Assemble a map in code

pub mod builder;
pub mod event;
pub mod labels;
pub mod map;
pub mod page;

pub use builder::{EventSpec, MapBuilder};
pub use event::Event;
pub use map::Map;
pub use page::EventPage;

use log::warn;

use crate::config::ValidationPolicy;
use crate::lcf::{DataItem, LcfError, Object, Result};

/// Apply `policy` to the required-id check of `object`.
pub(crate) fn check_required(
    object: &Object,
    required: &[u8],
    context: &str,
    policy: ValidationPolicy,
) -> Result<()> {
    let missing = object.missing_ids(required);
    if missing.is_empty() {
        return Ok(());
    }
    match policy {
        ValidationPolicy::Strict => Err(LcfError::MissingRequiredField {
            context: context.to_string(),
            missing,
        }),
        ValidationPolicy::Lenient => {
            object.validate(required, context);
            Ok(())
        }
    }
}

/// Read integer item `id`, or `default` when it is absent.
pub(crate) fn read_u32(object: &Object, id: u8, default: u32, context: &str) -> Result<u32> {
    let Some(item) = object.get(id) else {
        return Ok(default);
    };
    let value = item.as_integer()?;
    u32::try_from(value).map_err(|_| LcfError::ValueOutOfRange {
        context: context.to_string(),
        id,
        value,
    })
}

/// Replace integer item `id` with `value`. The editor leaves fields at their
/// default value out of the file, so nothing is stored when `value == default`.
pub(crate) fn write_u32(object: &mut Object, id: u8, value: u32, default: u32) {
    object.remove(id);
    if value != default {
        object.insert(DataItem::from_integer(id, u64::from(value)));
    }
}

/// Error for an item that an operation needs but the object lacks.
pub(crate) fn missing(context: &str, id: u8) -> LcfError {
    warn!("{context}: item {id:#04X} is required here but absent");
    LcfError::MissingRequiredField {
        context: context.to_string(),
        missing: vec![id],
    }
}
