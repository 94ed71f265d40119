// The map unit: the top-level object of an `.lmu` file.

use log::{debug, warn};

use crate::config::{DecodeOptions, ValidationPolicy};
use crate::lcf::{DataItem, HeaderKind, LcfError, Object, Result};
use crate::rotate::{self, RotateReport, Rotation};

use super::event::Event;

/// Signature carried in the header of every map unit.
pub const SIGNATURE: &[u8] = b"LcfMapUnit";

pub const CHIPSET: u8 = 0x01;
pub const WIDTH: u8 = 0x02;
pub const HEIGHT: u8 = 0x03;
pub const SCROLL_TYPE: u8 = 0x0B;
pub const LOWER_LAYER: u8 = 0x47;
pub const UPPER_LAYER: u8 = 0x48;
pub const EVENT_LAYER: u8 = 0x51;
pub const SAVE_COUNT: u8 = 0x5B;

pub const DEFAULT_WIDTH: u32 = 20;
pub const DEFAULT_HEIGHT: u32 = 15;

pub const REQUIRED_IDS: [u8; 5] = [SCROLL_TYPE, LOWER_LAYER, UPPER_LAYER, EVENT_LAYER, SAVE_COUNT];

/// A decoded map unit with its events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    object: Object,
    name: String,
    events: Vec<Event>,
}

impl Map {
    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Decode a complete map unit.
    pub fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        let (object, consumed) = Object::decode(bytes, 0, HeaderKind::LengthPrefixed)?;
        if consumed < bytes.len() {
            let len = bytes.len() - consumed;
            match options.policy {
                ValidationPolicy::Strict => {
                    return Err(LcfError::TrailingBytes {
                        offset: consumed,
                        len,
                    });
                }
                ValidationPolicy::Lenient => {
                    warn!("ignoring {len} trailing bytes after the map at offset {consumed}");
                }
            }
        }
        Self::from_object(object, options.policy)
    }

    /// Decode with the default (strict) options.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes, &DecodeOptions::default())
    }

    /// Reinterpret a decoded top-level object as a map, decoding its events.
    pub fn from_object(object: Object, policy: ValidationPolicy) -> Result<Self> {
        let name = String::from("Map");
        if !object.header().ends_with(SIGNATURE) {
            warn!("{name}: header does not carry the LcfMapUnit signature");
        }
        super::check_required(&object, &REQUIRED_IDS, &name, policy)?;

        let events = match object.get(EVENT_LAYER) {
            Some(item) => item
                .as_object_array(&name)?
                .into_iter()
                .map(|event| Event::from_object(event, policy))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        debug!("{name}: {} items, {} events", object.item_count(), events.len());

        Ok(Self {
            object,
            name,
            events,
        })
    }

    /// Name used in log lines and errors. Defaults to `Map`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // -----------------------------------------------------------------------
    // Dimensions
    // -----------------------------------------------------------------------

    pub fn width(&self) -> Result<u32> {
        super::read_u32(&self.object, WIDTH, DEFAULT_WIDTH, &self.name)
    }

    pub fn height(&self) -> Result<u32> {
        super::read_u32(&self.object, HEIGHT, DEFAULT_HEIGHT, &self.name)
    }

    /// Set the width. The default width is left out of the object.
    pub fn set_width(&mut self, width: u32) {
        super::write_u32(&mut self.object, WIDTH, width, DEFAULT_WIDTH);
    }

    /// Set the height. The default height is left out of the object.
    pub fn set_height(&mut self, height: u32) {
        super::write_u32(&mut self.object, HEIGHT, height, DEFAULT_HEIGHT);
    }

    /// Change the recorded dimensions. Tile layers are not touched.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }

    /// Number of cells in each tile layer.
    pub fn cell_count(&self) -> Result<usize> {
        let width = self.width()?;
        let height = self.height()?;
        (width as usize)
            .checked_mul(height as usize)
            .filter(|cells| cells.checked_mul(2).is_some())
            .ok_or_else(|| LcfError::ValueOutOfRange {
                context: self.name.clone(),
                id: HEIGHT,
                value: u64::from(height),
            })
    }

    // -----------------------------------------------------------------------
    // Tile layers
    // -----------------------------------------------------------------------

    pub fn lower_layer(&self) -> Result<Vec<u16>> {
        self.layer(LOWER_LAYER)
    }

    pub fn upper_layer(&self) -> Result<Vec<u16>> {
        self.layer(UPPER_LAYER)
    }

    pub fn set_lower_layer(&mut self, tiles: &[u16]) -> Result<()> {
        self.set_layer(LOWER_LAYER, tiles)
    }

    pub fn set_upper_layer(&mut self, tiles: &[u16]) -> Result<()> {
        self.set_layer(UPPER_LAYER, tiles)
    }

    fn layer(&self, id: u8) -> Result<Vec<u16>> {
        let item = self
            .object
            .get(id)
            .ok_or_else(|| super::missing(&self.name, id))?;
        let expected = self.cell_count()? * 2;
        if item.len() != expected {
            return Err(LcfError::LayerSizeMismatch {
                id,
                expected,
                actual: item.len(),
            });
        }
        Ok(item.as_u16_array())
    }

    fn set_layer(&mut self, id: u8, tiles: &[u16]) -> Result<()> {
        let expected = self.cell_count()? * 2;
        if tiles.len() * 2 != expected {
            return Err(LcfError::LayerSizeMismatch {
                id,
                expected,
                actual: tiles.len() * 2,
            });
        }
        self.object.insert(DataItem::from_u16_array(id, tiles));
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Run `f` over the events, then rebuild the event layer.
    pub fn update_events<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut [Event]) -> Result<T>,
    {
        let out = f(&mut self.events);
        if !self.events.is_empty() || self.object.contains(EVENT_LAYER) {
            self.object.insert(DataItem::from_objects(
                EVENT_LAYER,
                self.events.iter().map(Event::object),
            ));
        }
        out
    }

    // -----------------------------------------------------------------------
    // Rotation
    // -----------------------------------------------------------------------

    /// Rotate the map clockwise in place. On error the map is left as it was.
    pub fn rotate(&mut self, rotation: Rotation) -> Result<RotateReport> {
        let (rotated, report) = self.rotated(rotation)?;
        *self = rotated;
        Ok(report)
    }

    /// A rotated copy of the map.
    pub fn rotated(&self, rotation: Rotation) -> Result<(Map, RotateReport)> {
        let mut map = self.clone();
        let report = rotate::apply(&mut map, rotation)?;
        Ok((map, report))
    }

    pub fn rotate_clockwise(&mut self) -> Result<RotateReport> {
        self.rotate(Rotation::Deg90)
    }

    pub fn rotate_180(&mut self) -> Result<RotateReport> {
        self.rotate(Rotation::Deg180)
    }

    pub fn rotate_counterclockwise(&mut self) -> Result<RotateReport> {
        self.rotate(Rotation::Deg270)
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    pub fn size(&self) -> usize {
        self.object.size()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.object.to_bytes()
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn into_object(self) -> Object {
        self.object
    }
}
