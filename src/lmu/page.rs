// Event pages. Only the facing is interpreted; every other item (conditions,
// graphics, movement, the event script) is carried through untouched.

use log::warn;

use crate::config::ValidationPolicy;
use crate::lcf::{DataItem, Object, Result};
use crate::rotate::Rotation;

pub const CONDITIONS: u8 = 0x02;
pub const CHARSET_NAME: u8 = 0x15;
pub const CHARSET_INDEX: u8 = 0x16;
pub const FACING: u8 = 0x17;
pub const SCRIPT_LENGTH: u8 = 0x33;
pub const SCRIPT: u8 = 0x34;

pub const REQUIRED_IDS: [u8; 4] = [CONDITIONS, FACING, SCRIPT_LENGTH, SCRIPT];

/// Number of distinct facings; one per quarter turn.
pub const FACINGS: u64 = 4;

/// One page of an [`Event`](super::Event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPage {
    object: Object,
    name: String,
}

impl EventPage {
    /// Reinterpret a decoded sub-object as an event page.
    pub fn from_object(object: Object, name: String, policy: ValidationPolicy) -> Result<Self> {
        super::check_required(&object, &REQUIRED_IDS, &name, policy)?;
        Ok(Self { object, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored facing, or `None` when the page has no facing item.
    pub fn facing(&self) -> Result<Option<u64>> {
        self.object.get(FACING).map(DataItem::as_integer).transpose()
    }

    pub fn set_facing(&mut self, facing: u64) {
        self.object.insert(DataItem::from_integer(FACING, facing));
    }

    /// Turn the page's facing clockwise by `rotation`. Returns `false` when
    /// the page has no facing to turn.
    pub fn rotate(&mut self, rotation: Rotation) -> Result<bool> {
        let Some(facing) = self.facing()? else {
            warn!("{}: no facing item; left unrotated", self.name);
            return Ok(false);
        };
        if facing >= FACINGS {
            warn!("{}: facing {facing} out of range; reduced mod {FACINGS}", self.name);
        }
        self.set_facing((facing % FACINGS + rotation.steps() as u64) % FACINGS);
        Ok(true)
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn into_object(self) -> Object {
        self.object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcf::LcfError;

    fn page(facing: Option<u64>) -> Object {
        let mut object = Object::with_index(1);
        object.insert(DataItem::from_bytes(CONDITIONS, &[0x00]));
        if let Some(f) = facing {
            object.insert(DataItem::from_integer(FACING, f));
        }
        object.insert(DataItem::from_integer(SCRIPT_LENGTH, 1));
        object.insert(DataItem::from_bytes(SCRIPT, &[0x00]));
        object
    }

    #[test]
    fn facing_turns_clockwise() {
        let mut p = EventPage::from_object(page(Some(2)), "p".into(), ValidationPolicy::Strict)
            .unwrap();
        assert!(p.rotate(Rotation::Deg90).unwrap());
        assert_eq!(p.facing().unwrap(), Some(3));
        p.rotate(Rotation::Deg180).unwrap();
        assert_eq!(p.facing().unwrap(), Some(1));
        p.rotate(Rotation::Deg270).unwrap();
        assert_eq!(p.facing().unwrap(), Some(0));
    }

    #[test]
    fn zero_facing_is_still_stored() {
        let mut p = EventPage::from_object(page(Some(3)), "p".into(), ValidationPolicy::Strict)
            .unwrap();
        p.rotate(Rotation::Deg90).unwrap();
        assert_eq!(p.object().get(FACING).unwrap().as_bytes(), &[0x00]);
    }

    #[test]
    fn out_of_range_facing_wraps() {
        let mut p = EventPage::from_object(page(Some(u64::MAX)), "p".into(), ValidationPolicy::Strict)
            .unwrap();
        p.rotate(Rotation::Deg90).unwrap();
        assert_eq!(p.facing().unwrap(), Some(0));

        p.set_facing(7);
        p.rotate(Rotation::Deg180).unwrap();
        assert_eq!(p.facing().unwrap(), Some(1));
    }

    #[test]
    fn strict_rejects_missing_facing() {
        let err = EventPage::from_object(page(None), "Event 1 / Page 1".into(), ValidationPolicy::Strict)
            .unwrap_err();
        assert_eq!(
            err,
            LcfError::MissingRequiredField {
                context: "Event 1 / Page 1".into(),
                missing: vec![FACING],
            }
        );
    }

    #[test]
    fn lenient_page_without_facing_is_left_alone() {
        let mut p = EventPage::from_object(page(None), "p".into(), ValidationPolicy::Lenient)
            .unwrap();
        let before = p.object().to_bytes();
        assert!(!p.rotate(Rotation::Deg90).unwrap());
        assert_eq!(p.object().to_bytes(), before);
    }
}
