//! Error taxonomy for world genesis and the geological pipeline.
//!
//! Per-cell arithmetic never fails; only global setup problems surface here.

use thiserror::Error;

/// Errors raised while building or advancing a world.
#[derive(Error, Debug)]
pub enum WorldError {
    /// Plate generation could not find an unclaimed seed cell.
    #[error("no unclaimed cell left for a new plate after {attempts} attempts")]
    ExhaustedGrid { attempts: usize },

    /// Every plate letter is already issued.
    #[error("plate registry is full ({limit} plates)")]
    PlateLimit { limit: usize },

    /// The biome catalog cannot serve a required classification.
    #[error("invalid biome catalog: {0}")]
    InvalidBiomeCatalog(String),

    /// A cell is missing neighbours in a context that needs full connectivity.
    #[error("cell ({x}, {y}) is missing {missing} neighbour(s)")]
    DegenerateTopology { x: usize, y: usize, missing: usize },

    #[error("invalid grid dimensions {width}x{height} (need width >= 3, height >= 1)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("coordinates ({x}, {y}) are outside the grid")]
    OutOfBounds { x: usize, y: usize },

    #[error("failed to parse biome catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("failed to read biome catalog: {0}")]
    CatalogIo(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WorldError>;
