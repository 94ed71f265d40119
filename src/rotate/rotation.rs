// Clockwise quarter-turn rotations.

use std::fmt;
use std::str::FromStr;

/// A clockwise rotation in 90° steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Number of clockwise quarter turns (0..=3). Also the column used in the
    /// tile rotation tables.
    pub fn steps(self) -> usize {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Rotation for `steps` quarter turns, taken modulo 4.
    pub fn from_steps(steps: usize) -> Self {
        Self::ALL[steps % 4]
    }

    pub fn degrees(self) -> u32 {
        self.steps() as u32 * 90
    }

    /// Parse a whole number of degrees. Only multiples of 90 are accepted;
    /// 360 and above wrap around.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(Self::from_steps((degrees / 90) as usize))
    }

    /// Apply `self`, then `next`.
    pub fn then(self, next: Rotation) -> Self {
        Self::from_steps(self.steps() + next.steps())
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        Self::from_steps(4 - self.steps())
    }

    /// Whether the rotation exchanges width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Error returned when a string is not a supported angle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported rotation '{0}': expected 0, 90, 180 or 270")]
pub struct ParseRotationError(String);

impl FromStr for Rotation {
    type Err = ParseRotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('°');
        match trimmed.to_ascii_lowercase().as_str() {
            "cw" | "clockwise" => return Ok(Rotation::Deg90),
            "ccw" | "counterclockwise" => return Ok(Rotation::Deg270),
            _ => {}
        }
        trimmed
            .parse::<u32>()
            .ok()
            .filter(|d| *d < 360)
            .and_then(Rotation::from_degrees)
            .ok_or_else(|| ParseRotationError(s.to_string()))
    }
}
