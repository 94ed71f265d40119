// Map events: a position on the grid and a list of pages.

use crate::config::ValidationPolicy;
use crate::lcf::{DataItem, Object, Result};
use crate::rotate::Rotation;

use super::page::EventPage;

pub const NAME: u8 = 0x01;
pub const X: u8 = 0x02;
pub const Y: u8 = 0x03;
pub const PAGES: u8 = 0x05;

pub const REQUIRED_IDS: [u8; 1] = [PAGES];

/// An event on the map's event layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    object: Object,
    name: String,
    pages: Vec<EventPage>,
}

impl Event {
    /// Reinterpret a decoded sub-object as an event, decoding its pages.
    ///
    /// The event is named `Event <index>` after its header, and its pages
    /// `Event <index> / Page <n>` counting from 1.
    pub fn from_object(object: Object, policy: ValidationPolicy) -> Result<Self> {
        let name = format!("Event {}", object.index()?);
        super::check_required(&object, &REQUIRED_IDS, &name, policy)?;

        let pages = match object.get(PAGES) {
            Some(item) => item
                .as_object_array(&name)?
                .into_iter()
                .enumerate()
                .map(|(i, page)| {
                    EventPage::from_object(page, format!("{name} / Page {}", i + 1), policy)
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            object,
            name,
            pages,
        })
    }

    /// `Event <index>`, used to label log lines and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name given to the event in the editor, if any.
    pub fn title(&self) -> Option<String> {
        self.object.get(NAME).map(DataItem::as_string)
    }

    pub fn x(&self) -> Result<u32> {
        super::read_u32(&self.object, X, 0, &self.name)
    }

    pub fn y(&self) -> Result<u32> {
        super::read_u32(&self.object, Y, 0, &self.name)
    }

    /// Move the event. A coordinate of 0 is left out of the object.
    pub fn set_position(&mut self, x: u32, y: u32) {
        super::write_u32(&mut self.object, X, x, 0);
        super::write_u32(&mut self.object, Y, y, 0);
    }

    pub fn pages(&self) -> &[EventPage] {
        &self.pages
    }

    /// Run `f` over the pages, then rebuild the page list item.
    pub fn update_pages<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut [EventPage]) -> Result<T>,
    {
        let out = f(&mut self.pages);
        self.rebuild_pages();
        out
    }

    /// Turn the facing of every page clockwise. Returns how many pages had a
    /// facing to turn.
    pub fn rotate_facing(&mut self, rotation: Rotation) -> Result<usize> {
        self.update_pages(|pages| {
            let mut turned = 0;
            for page in pages.iter_mut() {
                if page.rotate(rotation)? {
                    turned += 1;
                }
            }
            Ok(turned)
        })
    }

    fn rebuild_pages(&mut self) {
        // An event decoded leniently without a page list keeps having none.
        if self.pages.is_empty() && !self.object.contains(PAGES) {
            return;
        }
        self.object.insert(DataItem::from_objects(
            PAGES,
            self.pages.iter().map(EventPage::object),
        ));
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn into_object(self) -> Object {
        self.object
    }
}
