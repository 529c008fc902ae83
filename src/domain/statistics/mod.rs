//! Statistics invariants:
//!
//! 1. Launch counters only grow, except on explicit reset
//! 2. Each launch adds exactly one to `total_games` and to its system's counter
//! 3. Library distribution is derived from the library, never stored
//! 4. Launch distribution and library distribution are separate aggregates

pub mod entity;
pub use entity::{LibraryDistribution, Stats, PLAY_TIME_PER_LAUNCH_HOURS};
