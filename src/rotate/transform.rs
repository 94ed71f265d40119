// Rotating a whole map: dimensions, both tile layers, event positions and
// page facings, in one pass.

use log::{debug, info, warn};

use crate::lcf::{LcfError, Result};
use crate::lmu::Map;

use super::grid::{remap, remap_with, rotate_position, rotated_dimensions};
use super::rotation::Rotation;
use super::tiles::{TileCode, TileComponent, rotate_code};

/// A lower-layer cell whose code had a part missing from the rotation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAnomaly {
    /// Cell index in the source layer.
    pub index: usize,
    pub code: u16,
    pub component: TileComponent,
}

/// What a rotation did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotateReport {
    pub rotation: Rotation,
    /// Cells per layer.
    pub tiles: usize,
    pub events: usize,
    /// Pages whose facing was turned.
    pub pages: usize,
    /// One entry per unknown part, so a cell can appear twice.
    pub anomalies: Vec<TileAnomaly>,
}

impl RotateReport {
    /// Number of distinct cells with at least one anomaly.
    pub fn unknown_tiles(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for anomaly in &self.anomalies {
            if last != Some(anomaly.index) {
                count += 1;
                last = Some(anomaly.index);
            }
        }
        count
    }
}

/// Rotate `map` clockwise in place.
///
/// Stops at the first error, which may leave `map` partly rotated; use
/// [`Map::rotate`] or [`Map::rotated`] to keep the input intact.
pub fn apply(map: &mut Map, rotation: Rotation) -> Result<RotateReport> {
    let mut report = RotateReport {
        rotation,
        events: map.events().len(),
        ..RotateReport::default()
    };
    if rotation == Rotation::Deg0 {
        report.tiles = map.cell_count()?;
        return Ok(report);
    }

    let width = map.width()?;
    let height = map.height()?;
    let lower = map.lower_layer()?;
    let upper = map.upper_layer()?;
    report.tiles = lower.len();

    // Work out every new event position before touching the map.
    let mut positions = Vec::with_capacity(map.events().len());
    for event in map.events() {
        let (x, y) = (event.x()?, event.y()?);
        let moved = rotate_position(x, y, width, height, rotation).ok_or_else(|| {
            LcfError::EventOutOfBounds {
                context: event.name().to_string(),
                x,
                y,
                width,
                height,
            }
        })?;
        positions.push(moved);
    }

    let (w, h) = (width as usize, height as usize);
    let mut anomalies = Vec::new();
    let new_lower = remap_with(&lower, w, h, rotation, |index, code| {
        let rotated = rotate_code(code, rotation);
        for component in rotated.unknown.components() {
            anomalies.push(TileAnomaly {
                index,
                code,
                component,
            });
        }
        rotated.code
    });
    let new_upper = remap(&upper, w, h, rotation);

    for anomaly in &anomalies {
        let tile = TileCode::decompose(anomaly.code);
        warn!(
            "{}: unknown {} at tile {}: {} + {} + {} ({:02X} {:02X})",
            map.name(),
            match anomaly.component {
                TileComponent::Subtile => "subtile offset",
                TileComponent::Pattern => "rotation offset",
            },
            anomaly.index,
            tile.family,
            tile.subtile,
            tile.pattern,
            anomaly.code & 0xFF,
            anomaly.code >> 8,
        );
    }
    report.anomalies = anomalies;

    let (new_width, new_height) = rotated_dimensions(width, height, rotation);
    map.resize(new_width, new_height);
    map.set_lower_layer(&new_lower)?;
    map.set_upper_layer(&new_upper)?;

    report.pages = map.update_events(|events| {
        let mut pages = 0;
        for (event, &(x, y)) in events.iter_mut().zip(&positions) {
            event.set_position(x, y);
            pages += event.rotate_facing(rotation)?;
        }
        Ok(pages)
    })?;

    debug!(
        "{}: {width}x{height} -> {new_width}x{new_height}",
        map.name()
    );
    info!(
        "{}: rotated {rotation}: {} tiles, {} events, {} pages, {} unknown tile codes",
        map.name(),
        report.tiles,
        report.events,
        report.pages,
        report.unknown_tiles()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lmu::{EventSpec, MapBuilder, map};

    fn sample(width: u32, height: u32) -> Map {
        let cells = (width * height) as usize;
        MapBuilder::new(width, height)
            .lower_layer((0..cells).map(|i| 4000 + (i % 47) as u16).collect())
            .upper_layer((0..cells).map(|i| 10000 + i as u16).collect())
            .event(EventSpec::new(3, 1).with_pages(&[2, 1]))
            .event(EventSpec::new(0, 0))
            .build()
            .unwrap()
    }

    #[test]
    fn zero_degrees_leaves_bytes_alone() {
        let mut m = sample(20, 15);
        let before = m.to_bytes();
        let report = apply(&mut m, Rotation::Deg0).unwrap();
        assert_eq!(m.to_bytes(), before);
        assert_eq!(report.tiles, 300);
        assert_eq!(report.pages, 0);
    }

    #[test]
    fn quarter_turn_moves_everything() {
        let mut m = sample(10, 8);
        let report = apply(&mut m, Rotation::Deg90).unwrap();
        assert_eq!((m.width().unwrap(), m.height().unwrap()), (8, 10));
        assert_eq!(report.tiles, 80);
        assert_eq!(report.events, 2);
        assert_eq!(report.pages, 3);
        assert!(report.anomalies.is_empty());

        let event = &m.events()[0];
        assert_eq!((event.x().unwrap(), event.y().unwrap()), (6, 3));
        assert_eq!(event.pages()[0].facing().unwrap(), Some(3));
        assert_eq!(event.pages()[1].facing().unwrap(), Some(2));

        // Upper cell (0, 0) lands at (H-1, 0) = (7, 0).
        assert_eq!(m.upper_layer().unwrap()[7], 10000);
    }

    #[test]
    fn width_default_swap_stores_both() {
        let mut m = sample(20, 15);
        apply(&mut m, Rotation::Deg90).unwrap();
        assert_eq!(m.object().get(map::WIDTH).unwrap().as_integer().unwrap(), 15);
        assert_eq!(m.object().get(map::HEIGHT).unwrap().as_integer().unwrap(), 20);
    }

    #[test]
    fn four_quarter_turns_restore_the_map() {
        let original = sample(12, 9);
        let mut m = original.clone();
        for _ in 0..4 {
            apply(&mut m, Rotation::Deg90).unwrap();
        }
        assert_eq!(m.to_bytes(), original.to_bytes());
    }

    #[test]
    fn unknown_codes_are_reported_and_kept() {
        let mut lower = vec![0u16; 300];
        lower[5] = 4000 + 48; // pattern past the table
        lower[6] = 800 + 3; // water subtile 800 has no entry
        lower[7] = 850 + 49; // neither part has an entry
        let mut m = MapBuilder::new(20, 15).lower_layer(lower).build().unwrap();
        let report = apply(&mut m, Rotation::Deg180).unwrap();
        assert_eq!(
            report.anomalies,
            vec![
                TileAnomaly {
                    index: 5,
                    code: 4048,
                    component: TileComponent::Pattern,
                },
                TileAnomaly {
                    index: 6,
                    code: 803,
                    component: TileComponent::Subtile,
                },
                TileAnomaly {
                    index: 7,
                    code: 899,
                    component: TileComponent::Subtile,
                },
                TileAnomaly {
                    index: 7,
                    code: 899,
                    component: TileComponent::Pattern,
                },
            ]
        );
        assert_eq!(report.unknown_tiles(), 3);
        let lower = m.lower_layer().unwrap();
        assert_eq!(lower[299 - 5], 4048);
        // Subtile kept, pattern 3 rotated 180° to 0x0C.
        assert_eq!(lower[299 - 6], 800 + 0x0C);
        assert_eq!(lower[299 - 7], 899);
    }

    #[test]
    fn event_outside_the_map_is_an_error() {
        let mut m = sample(20, 15);
        m.update_events(|events| {
            events[1].set_position(25, 0);
            Ok(())
        })
        .unwrap();
        let err = apply(&mut m, Rotation::Deg270).unwrap_err();
        assert_eq!(
            err,
            LcfError::EventOutOfBounds {
                context: "Event 2".into(),
                x: 25,
                y: 0,
                width: 20,
                height: 15,
            }
        );
    }
}
