//! lmu-rotate: RPG Maker 2000 map units (`.lmu`) in Rust.
//!
//! The crate provides:
//! - A byte-exact codec for the LCF object format (`lcf`)
//! - Typed views over maps, events and event pages (`lmu`)
//! - Clockwise map rotation, tiles and events included (`rotate`)
//! - Labelled hex dumps (`dump`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```no_run
//! use lmu_rotate::lmu::Map;
//! use lmu_rotate::rotate::Rotation;
//!
//! let bytes = std::fs::read("Map0001.lmu").unwrap();
//! let mut map = Map::from_bytes(&bytes).unwrap();
//! let report = map.rotate(Rotation::Deg90).unwrap();
//! assert!(report.anomalies.is_empty());
//! std::fs::write("Map0001.rotated.lmu", map.to_bytes()).unwrap();
//! ```

pub mod config;
pub mod dump;
pub mod io;
pub mod lcf;
pub mod lmu;
pub mod rotate;

#[cfg(feature = "cli")]
pub mod cli;
