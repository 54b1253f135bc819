//! Hex world simulation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod biomes;
pub mod cell;
pub mod climate;
pub mod coastline;
pub mod erosion;
pub mod error;
pub mod geomorphometry;
pub mod geophase;
pub mod habitability;
pub mod hexgrid;
pub mod params;
pub mod plates;
pub mod sea_level;
pub mod seeds;
pub mod world;

pub use biomes::BiomeCatalog;
pub use error::{Result, WorldError};
pub use geophase::{EraReport, GeoPhase, Stage};
pub use hexgrid::{Direction, HexGrid};
pub use params::{WorldParams, WorldPreset};
pub use seeds::WorldSeeds;
pub use world::{GenesisReport, World, WorldState};
