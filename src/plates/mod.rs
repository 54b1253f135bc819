//! Tectonic plates: generation by randomized flood fill and the magma tick
//! that moves altitude along each plate's vector.

pub mod generation;
pub mod magma;
pub mod types;

pub use generation::{generate_plate, generate_plates};
pub use magma::{magma_impact, MagmaStats};
pub use types::{PlateId, TectonicPlate, MAX_PLATES};
