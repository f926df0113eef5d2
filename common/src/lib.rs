pub mod board;
pub mod solver;
pub mod stack;

pub use board::{Board, Move, Peg};
pub use stack::{Disk, PegStack};

/// The board always has exactly three pegs.
pub const NR_PEGS: usize = 3;

/// Disk count of the standard game.
pub const DEFAULT_NR_DISKS: u8 = 8;

/// Upper bound on the disk count. The solver explores the graph of board
/// configurations, which has 3^n nodes, so n has to stay small. Anything
/// beyond this bound needs a different algorithm, not a bigger queue.
pub const MAX_NR_DISKS: u8 = 10;
