// Clockwise rotation of a decoded map.
//
// # Modules
//
// - `rotation`  — The four quarter-turn angles
// - `grid`      — Index and coordinate remapping for row-major grids
// - `tiles`     — Tile code families and their rotation tables
// - `transform` — Rotating a whole map

pub mod grid;
pub mod rotation;
pub mod tiles;
pub mod transform;

pub use rotation::{ParseRotationError, Rotation};
pub use tiles::{RotatedTile, TileCode, TileComponent, UnknownParts, rotate_code};
pub use transform::{RotateReport, TileAnomaly, apply};
