use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{Board, Move, Peg};

/// Canonical identity of a board configuration, packed into a `u32`:
/// two bits per disk holding the index of the peg that disk sits on.
///
/// Within a legal peg the disks are forced into size order, so the
/// per-disk peg assignment determines the whole board. Two boards with
/// the same per-peg contents always compare equal here, regardless of
/// how they were reached.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct Position(u32);

impl Position {
    fn from_board(board: &Board) -> Self {
        let mut packed = 0u32;
        for peg in Peg::all() {
            for disk in board.disks_on(peg) {
                packed |= (peg.index() as u32) << (2 * (disk.0 - 1));
            }
        }
        Position(packed)
    }

    fn peg_of(self, disk_size: u8) -> usize {
        ((self.0 >> (2 * (disk_size - 1))) & 0b11) as usize
    }

    /// Smallest disk size on the peg, i.e. its top disk.
    fn top_disk(self, peg: Peg, nr_disks: u8) -> Option<u8> {
        (1..=nr_disks).find(|&size| self.peg_of(size) == peg.index())
    }

    /// Relocate one disk. The caller has already established that `disk_size`
    /// is the top of its peg and that the destination accepts it.
    fn with_disk_on(self, disk_size: u8, peg: Peg) -> Self {
        let shift = 2 * (disk_size - 1) as u32;
        Position((self.0 & !(0b11 << shift)) | ((peg.index() as u32) << shift))
    }

    fn is_solved(self, nr_disks: u8) -> bool {
        (1..=nr_disks).all(|size| self.peg_of(size) == Peg::GOAL.index())
    }
}

pub enum SolveResult {
    /// A shortest legal move sequence into the solved configuration. Empty
    /// iff the board was already solved.
    Solved(Vec<Move>),
    /// No sequence of legal moves reaches the solved configuration. Not
    /// reachable from boards built through the public API, but the search
    /// doesn't assume that.
    Unsolvable,
}

/// Breadth-first search from the board's current configuration to the
/// solved one (every disk on [`Peg::GOAL`]).
///
/// Nodes are [`Position`]s, edges are single legal moves, enumerated with
/// ascending source peg and then ascending destination peg; together with
/// the level order of the search this makes the result a shortest solution
/// with a deterministic tie-break.
pub fn find_move_sequence(board: &Board) -> SolveResult {
    let nr_disks = board.nr_disks();
    let start = Position::from_board(board);
    if start.is_solved(nr_disks) {
        return SolveResult::Solved(vec![]);
    }

    let mut queue = VecDeque::from([start]);
    let mut visited = FxHashSet::from_iter([start]);
    // how each position was first reached, for walking the path back out
    let mut parents: FxHashMap<Position, (Position, Move)> = FxHashMap::default();

    while let Some(pos) = queue.pop_front() {
        for src in Peg::all() {
            let Some(disk) = pos.top_disk(src, nr_disks) else {
                continue;
            };
            for dst in Peg::all() {
                if src == dst {
                    continue;
                }
                match pos.top_disk(dst, nr_disks) {
                    Some(top) if top < disk => continue,
                    _ => {}
                }

                let next = pos.with_disk_on(disk, dst);
                if !visited.insert(next) {
                    continue;
                }
                parents.insert(next, (pos, Move { src, dst }));

                if next.is_solved(nr_disks) {
                    log::debug!("solved after exploring {} configurations", visited.len());
                    return SolveResult::Solved(walk_back(start, next, &parents));
                }
                queue.push_back(next);
            }
        }
    }

    log::debug!(
        "exhausted all {} reachable configurations without solving",
        visited.len()
    );
    SolveResult::Unsolvable
}

fn walk_back(
    start: Position,
    goal: Position,
    parents: &FxHashMap<Position, (Position, Move)>,
) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut pos = goal;
    while pos != start {
        let (prev, mv) = parents[&pos];
        moves.push(mv);
        pos = prev;
    }
    moves.reverse();
    moves
}
