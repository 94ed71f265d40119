// Lower-layer tile codes and how they change under rotation.
//
// A lower-layer code is the sum of three parts:
//
//   code = family + subtile + pattern
//
// - `family` is the greatest entry of `FAMILY_MILESTONES` not above the code.
//   It selects the tile set: the three water families (0, 1000, 2000), the
//   animated tiles (3000, 3050, 3100), the autotiles (4000..4550 in steps of
//   50), and the plain lower chips which all fall under the last milestone.
// - `subtile` is a multiple of 50 that, for the water families, selects which
//   edges are drawn as shore. Outside the water families it passes through.
// - `pattern` (0..=46) selects the autotile edge/corner shape.
//
// Rotating a tile rotates the subtile and the pattern through the tables
// below; the family never changes. Codes in the last family are not tiled
// and pass through untouched.

use super::rotation::Rotation;

/// Base offsets of the tile families, ascending.
pub const FAMILY_MILESTONES: [u16; 18] = [
    0x0000, 0x03E8, 0x07D0, 0x0BB8, 0x0BEA, 0x0C1C, 0x0FA0, 0x0FD2, 0x1004, 0x1036, 0x1068,
    0x109A, 0x10CC, 0x10FE, 0x1130, 0x1162, 0x1194, 0x11C6,
];

/// Families below this offset carry a water subtile.
pub const WATER_FAMILY_LIMIT: u16 = 3000;

/// Width of one subtile step and of the pattern range.
pub const SUBTILE_STRIDE: u16 = 50;

/// Water subtile offsets. Columns are 0°, 90°, 180° and 270°.
pub const SUBTILE_ROTATIONS: [[u16; 4]; 10] = [
    [0x0000, 0x0000, 0x0000, 0x0000],
    [0x0032, 0x0064, 0x0190, 0x00C8],
    [0x0064, 0x0190, 0x00C8, 0x0032],
    [0x0190, 0x00C8, 0x0032, 0x0064],
    [0x00C8, 0x0032, 0x0064, 0x0190],
    [0x0096, 0x01F4, 0x0258, 0x00FA],
    [0x01F4, 0x0258, 0x00FA, 0x0096],
    [0x0258, 0x00FA, 0x0096, 0x01F4],
    [0x00FA, 0x0096, 0x01F4, 0x0258],
    [0x02EE, 0x02EE, 0x02EE, 0x02EE],
];

/// Autotile edge/corner patterns, indexed by pattern offset. Columns are 0°,
/// 90°, 180° and 270°.
pub const PATTERN_ROTATIONS: [[u16; 4]; 47] = [
    [0x00, 0x00, 0x00, 0x00],
    [0x01, 0x02, 0x04, 0x08],
    [0x02, 0x04, 0x08, 0x01],
    [0x03, 0x06, 0x0C, 0x09],
    [0x04, 0x08, 0x01, 0x02],
    [0x05, 0x0A, 0x05, 0x0A],
    [0x06, 0x0C, 0x09, 0x03],
    [0x07, 0x0E, 0x0D, 0x0B],
    [0x08, 0x01, 0x02, 0x04],
    [0x09, 0x03, 0x06, 0x0C],
    [0x0A, 0x05, 0x0A, 0x05],
    [0x0B, 0x07, 0x0E, 0x0D],
    [0x0C, 0x09, 0x03, 0x06],
    [0x0D, 0x0B, 0x07, 0x0E],
    [0x0E, 0x0D, 0x0B, 0x07],
    [0x0F, 0x0F, 0x0F, 0x0F],
    [0x10, 0x14, 0x18, 0x1C],
    [0x11, 0x15, 0x19, 0x1D],
    [0x12, 0x16, 0x1A, 0x1E],
    [0x13, 0x17, 0x1B, 0x1F],
    [0x14, 0x18, 0x1C, 0x10],
    [0x15, 0x19, 0x1D, 0x11],
    [0x16, 0x1A, 0x1E, 0x12],
    [0x17, 0x1B, 0x1F, 0x13],
    [0x18, 0x1C, 0x10, 0x14],
    [0x19, 0x1D, 0x11, 0x16],
    [0x1A, 0x1E, 0x12, 0x15],
    [0x1B, 0x1F, 0x13, 0x17],
    [0x1C, 0x10, 0x14, 0x18],
    [0x1D, 0x11, 0x15, 0x1A],
    [0x1E, 0x12, 0x16, 0x19],
    [0x1F, 0x13, 0x17, 0x1B],
    [0x20, 0x21, 0x20, 0x21],
    [0x21, 0x20, 0x21, 0x20],
    [0x22, 0x24, 0x26, 0x28],
    [0x23, 0x25, 0x27, 0x29],
    [0x24, 0x26, 0x28, 0x22],
    [0x25, 0x27, 0x29, 0x23],
    [0x26, 0x28, 0x22, 0x24],
    [0x27, 0x29, 0x23, 0x25],
    [0x28, 0x22, 0x24, 0x26],
    [0x29, 0x23, 0x25, 0x27],
    [0x2A, 0x2D, 0x2C, 0x2B],
    [0x2B, 0x2A, 0x2D, 0x2C],
    [0x2C, 0x2B, 0x2A, 0x2D],
    [0x2D, 0x2C, 0x2B, 0x2A],
    [0x2E, 0x2E, 0x2E, 0x2E],
];

/// Which part of a tile code could not be rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileComponent {
    Subtile,
    Pattern,
}

/// A lower-layer code split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCode {
    pub family: u16,
    pub subtile: u16,
    pub pattern: u16,
}

impl TileCode {
    pub fn decompose(code: u16) -> Self {
        let family = family_offset(code);
        let subtile = code - family - code % SUBTILE_STRIDE;
        Self {
            family,
            subtile,
            pattern: code - family - subtile,
        }
    }

    pub fn code(self) -> u16 {
        self.family + self.subtile + self.pattern
    }

    /// Plain chips in the last family have no orientation.
    pub fn is_fixed(self) -> bool {
        self.family == FAMILY_MILESTONES[FAMILY_MILESTONES.len() - 1]
    }
}

/// Greatest milestone not above `code`.
pub fn family_offset(code: u16) -> u16 {
    let idx = FAMILY_MILESTONES.partition_point(|&m| m <= code);
    // FAMILY_MILESTONES[0] is 0, so idx >= 1.
    FAMILY_MILESTONES[idx - 1]
}

/// Look `value` up in the 0° column of `table` and return its entry for
/// `rotation`.
fn lookup<const N: usize>(table: &[[u16; 4]; N], value: u16, rotation: Rotation) -> Option<u16> {
    table
        .iter()
        .find(|row| row[0] == value)
        .map(|row| row[rotation.steps()])
}

/// Parts of a tile code that had no table entry and were kept as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnknownParts {
    pub subtile: bool,
    pub pattern: bool,
}

impl UnknownParts {
    pub fn is_empty(self) -> bool {
        !self.subtile && !self.pattern
    }

    /// The unknown parts, subtile first.
    pub fn components(self) -> impl Iterator<Item = TileComponent> {
        [
            (self.subtile, TileComponent::Subtile),
            (self.pattern, TileComponent::Pattern),
        ]
        .into_iter()
        .filter_map(|(set, component)| set.then_some(component))
    }
}

/// Result of rotating one tile code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatedTile {
    pub code: u16,
    pub unknown: UnknownParts,
}

/// Rotate a lower-layer tile code.
///
/// A subtile or pattern missing from its table is left unrotated and reported
/// through `RotatedTile::unknown`; the other part is still rotated.
pub fn rotate_code(code: u16, rotation: Rotation) -> RotatedTile {
    let tile = TileCode::decompose(code);
    let mut unknown = UnknownParts::default();

    let subtile = if tile.family < WATER_FAMILY_LIMIT {
        lookup(&SUBTILE_ROTATIONS, tile.subtile, rotation).unwrap_or_else(|| {
            unknown.subtile = true;
            tile.subtile
        })
    } else {
        tile.subtile
    };

    if tile.is_fixed() {
        return RotatedTile { code, unknown };
    }

    let pattern = match PATTERN_ROTATIONS.get(usize::from(tile.pattern)) {
        Some(row) => row[rotation.steps()],
        None => {
            unknown.pattern = true;
            tile.pattern
        }
    };

    RotatedTile {
        code: tile.family + subtile + pattern,
        unknown,
    }
}
