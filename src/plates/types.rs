use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Maximum number of plates a world may carry (ids 'A' through 'X').
pub const MAX_PLATES: usize = 24;

/// Intensity bounds for a freshly generated plate (inclusive).
pub const MIN_PLATE_INTENSITY: u32 = 25;
pub const MAX_PLATE_INTENSITY: u32 = 100;

/// Unique identifier for a tectonic plate, issued sequentially from 'A'.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlateId(pub u8);

impl PlateId {
    /// Id for the `n`th plate in the registry.
    pub fn nth(n: usize) -> Self {
        PlateId(n as u8)
    }

    pub fn letter(&self) -> char {
        (b'A' + self.0) as char
    }
}

impl std::fmt::Display for PlateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A tectonic plate. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct TectonicPlate {
    pub id: PlateId,
    /// Degrees, always a multiple of 60
    pub direction: f32,
    pub intensity: f32,
    /// Upper bound on the number of hexes the flood fill may claim
    pub max_size: usize,
}

impl TectonicPlate {
    /// Roll a plate with a random 60° direction, intensity in [25, 100] and a
    /// max size in `[min_size, 3 * min_size)`.
    pub fn random(id: PlateId, min_size: usize, rng: &mut ChaCha8Rng) -> Self {
        let min_size = min_size.max(1);
        Self {
            id,
            direction: 60.0 * rng.gen_range(0..6) as f32,
            intensity: rng.gen_range(MIN_PLATE_INTENSITY..=MAX_PLATE_INTENSITY) as f32,
            max_size: rng.gen_range(min_size..min_size * 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_plate_letters() {
        assert_eq!(PlateId::nth(0).letter(), 'A');
        assert_eq!(PlateId::nth(23).to_string(), "X");
    }

    #[test]
    fn test_random_plate_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for i in 0..200 {
            let plate = TectonicPlate::random(PlateId::nth(i % MAX_PLATES), 10, &mut rng);
            assert_eq!(plate.direction % 60.0, 0.0);
            assert!(plate.direction < 360.0);
            assert!((25.0..=100.0).contains(&plate.intensity));
            assert!((10..30).contains(&plate.max_size));
        }
    }

    #[test]
    fn test_zero_min_size_is_guarded() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let plate = TectonicPlate::random(PlateId::nth(0), 0, &mut rng);
        assert!((1..3).contains(&plate.max_size));
    }
}
