// Assemble a map unit in code, without a source file.
//
// The result carries every required item, so it decodes under the strict
// policy and can be rotated like a map loaded from disk.

use crate::config::ValidationPolicy;
use crate::lcf::{DataItem, LcfError, Object, Result};

use super::map::{self, Map};
use super::{event, page};

/// Upper-layer code the editor uses for an empty cell.
pub const EMPTY_UPPER_TILE: u16 = 10000;

/// Script of a page with no commands: a single end-of-list command.
const EMPTY_SCRIPT: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

/// An event to place with [`MapBuilder::event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSpec {
    pub x: u32,
    pub y: u32,
    pub name: String,
    /// One facing per page.
    pub facings: Vec<u64>,
}

impl EventSpec {
    /// A nameless event with one page facing up.
    pub fn new(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            name: String::new(),
            facings: vec![0],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_pages(mut self, facings: &[u64]) -> Self {
        self.facings = facings.to_vec();
        self
    }

    fn to_object(&self, index: u64) -> Object {
        let pages: Vec<Object> = self
            .facings
            .iter()
            .enumerate()
            .map(|(i, &facing)| {
                let mut p = Object::with_index(i as u64 + 1);
                p.insert(DataItem::from_bytes(page::CONDITIONS, &[0x00]));
                p.insert(DataItem::from_integer(page::FACING, facing));
                p.insert(DataItem::from_integer(
                    page::SCRIPT_LENGTH,
                    EMPTY_SCRIPT.len() as u64,
                ));
                p.insert(DataItem::from_bytes(page::SCRIPT, &EMPTY_SCRIPT));
                p
            })
            .collect();

        let mut object = Object::with_index(index);
        if !self.name.is_empty() {
            object.insert(DataItem::from_text(event::NAME, &self.name));
        }
        super::write_u32(&mut object, event::X, self.x, 0);
        super::write_u32(&mut object, event::Y, self.y, 0);
        object.insert(DataItem::from_objects(event::PAGES, &pages));
        object
    }
}

/// Builder for a [`Map`].
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    width: u32,
    height: u32,
    chipset: Option<u32>,
    lower: Option<Vec<u16>>,
    upper: Option<Vec<u16>>,
    events: Vec<EventSpec>,
}

impl MapBuilder {
    /// A `width × height` map with blank layers and no events.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn chipset(mut self, chipset: u32) -> Self {
        self.chipset = Some(chipset);
        self
    }

    pub fn lower_layer(mut self, tiles: Vec<u16>) -> Self {
        self.lower = Some(tiles);
        self
    }

    pub fn upper_layer(mut self, tiles: Vec<u16>) -> Self {
        self.upper = Some(tiles);
        self
    }

    pub fn event(mut self, event: EventSpec) -> Self {
        self.events.push(event);
        self
    }

    pub fn build(self) -> Result<Map> {
        let cells = (self.width as usize) * (self.height as usize);
        let lower = self.lower.unwrap_or_else(|| vec![0; cells]);
        let upper = self.upper.unwrap_or_else(|| vec![EMPTY_UPPER_TILE; cells]);
        for (id, layer) in [(map::LOWER_LAYER, &lower), (map::UPPER_LAYER, &upper)] {
            if layer.len() != cells {
                return Err(LcfError::LayerSizeMismatch {
                    id,
                    expected: cells * 2,
                    actual: layer.len() * 2,
                });
            }
        }

        let mut events = Vec::with_capacity(self.events.len());
        for (i, spec) in self.events.iter().enumerate() {
            let index = i as u64 + 1;
            if spec.x >= self.width || spec.y >= self.height {
                return Err(LcfError::EventOutOfBounds {
                    context: format!("Event {index}"),
                    x: spec.x,
                    y: spec.y,
                    width: self.width,
                    height: self.height,
                });
            }
            events.push(spec.to_object(index));
        }

        let mut object = Object::with_signature(map::SIGNATURE);
        if let Some(chipset) = self.chipset {
            object.insert(DataItem::from_integer(map::CHIPSET, u64::from(chipset)));
        }
        super::write_u32(&mut object, map::WIDTH, self.width, map::DEFAULT_WIDTH);
        super::write_u32(&mut object, map::HEIGHT, self.height, map::DEFAULT_HEIGHT);
        object.insert(DataItem::from_integer(map::SCROLL_TYPE, 0));
        object.insert(DataItem::from_u16_array(map::LOWER_LAYER, &lower));
        object.insert(DataItem::from_u16_array(map::UPPER_LAYER, &upper));
        object.insert(DataItem::from_objects(map::EVENT_LAYER, &events));
        object.insert(DataItem::from_integer(map::SAVE_COUNT, 0));

        Map::from_object(object, ValidationPolicy::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_strictly_valid_map() {
        let map = MapBuilder::new(25, 18)
            .chipset(2)
            .event(EventSpec::new(0, 0).with_name("Door"))
            .event(EventSpec::new(24, 17).with_pages(&[1, 2, 3]))
            .build()
            .unwrap();
        assert_eq!((map.width().unwrap(), map.height().unwrap()), (25, 18));
        assert_eq!(map.upper_layer().unwrap(), vec![EMPTY_UPPER_TILE; 450]);
        assert_eq!(map.events().len(), 2);
        assert_eq!(map.events()[0].title().as_deref(), Some("Door"));
        assert_eq!(map.events()[1].name(), "Event 2");
        assert_eq!(map.events()[1].pages().len(), 3);

        let bytes = map.to_bytes();
        assert_eq!(&bytes[..11], b"\x0ALcfMapUnit");
        assert_eq!(Map::from_bytes(&bytes).unwrap(), map);
    }

    #[test]
    fn event_outside_map_is_rejected() {
        let err = MapBuilder::new(20, 15)
            .event(EventSpec::new(20, 0))
            .build()
            .unwrap_err();
        assert!(matches!(err, LcfError::EventOutOfBounds { x: 20, .. }));
    }

    #[test]
    fn wrong_layer_length_is_rejected() {
        let err = MapBuilder::new(20, 15)
            .lower_layer(vec![0; 10])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            LcfError::LayerSizeMismatch {
                id: map::LOWER_LAYER,
                expected: 600,
                actual: 20,
            }
        );
    }
}
