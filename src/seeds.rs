//! Seed management for world generation
//!
//! Each random subsystem gets its own seed derived from a master seed, so
//! changing how many numbers one subsystem draws never shifts the others.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeds for the random parts of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Plate seeds, directions, intensities and flood fill order
    pub tectonics: u64,
    /// Initial altitude noise
    pub altitude: u64,
    /// Arctic pole choice
    pub climate: u64,
    /// Plates added by hand after genesis
    pub edits: u64,
}

impl WorldSeeds {
    /// Derive every sub-seed from `master`.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            tectonics: derive_seed(master, "tectonics"),
            altitude: derive_seed(master, "altitude"),
            climate: derive_seed(master, "climate"),
            edits: derive_seed(master, "edits"),
        }
    }

    pub fn tectonics_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.tectonics)
    }

    pub fn altitude_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.altitude)
    }

    pub fn climate_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.climate)
    }

    pub fn edits_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.edits)
    }
}

impl Default for WorldSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Derive a sub-seed from a master seed and a system name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for WorldSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorldSeeds {{ master: {}, tectonics: {}, altitude: {}, climate: {}, edits: {} }}",
            self.master, self.tectonics, self.altitude, self.climate, self.edits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = WorldSeeds::from_master(12345);
        let seeds2 = WorldSeeds::from_master(12345);
        assert_eq!(seeds1, seeds2);
        assert_eq!(
            seeds1.tectonics_rng().gen::<u64>(),
            seeds2.tectonics_rng().gen::<u64>()
        );
    }

    #[test]
    fn test_different_systems_get_different_seeds() {
        let seeds = WorldSeeds::from_master(12345);
        assert_ne!(seeds.tectonics, seeds.altitude);
        assert_ne!(seeds.altitude, seeds.climate);
        assert_ne!(seeds.climate, seeds.edits);
    }
}
