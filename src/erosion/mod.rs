//! Erosion stages
//!
//! Two complementary processes reshape the terrain every era:
//! - **Slump**: diffusive, gravity-driven smoothing between adjacent hexes
//! - **River flow**: rainfall drainage, confluence merging and channel erosion

pub mod rivers;
pub mod slump;

pub use rivers::{river_flow, RiverFlowParams};
pub use slump::{slump, SLUMP_RATE};

/// Statistics from a river flow invocation (summed over its rounds)
#[derive(Clone, Debug, Default)]
pub struct ErosionStats {
    /// Total material eroded (in altitude units)
    pub total_eroded: f64,
    /// Total material deposited downstream
    pub total_deposited: f64,
    /// Maximum erosion at any single cell in any round
    pub max_erosion: f32,
    /// Cells with a drainage target after the last round
    pub drained_cells: usize,
    /// Tributaries merged into a larger river
    pub confluences: usize,
    /// Rounds executed
    pub rounds: usize,
}

impl ErosionStats {
    /// Fold one round's numbers into the running totals.
    pub fn absorb(&mut self, round: &ErosionStats) {
        self.total_eroded += round.total_eroded;
        self.total_deposited += round.total_deposited;
        self.max_erosion = self.max_erosion.max(round.max_erosion);
        self.drained_cells = round.drained_cells;
        self.confluences += round.confluences;
        self.rounds += 1;
    }
}
