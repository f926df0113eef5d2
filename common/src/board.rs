use std::fmt;

use crate::stack::{Disk, PegStack};
use crate::{MAX_NR_DISKS, NR_PEGS};

/// One of the three peg positions.
///
/// Invariant: can only represent valid indices (0..=2).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Peg(u8);

impl Peg {
    pub const fn new(index: u8) -> Option<Self> {
        if index < NR_PEGS as u8 {
            Some(Peg(index))
        } else {
            None
        }
    }

    /// The peg all disks start on.
    pub const START: Peg = Peg(0);
    /// The peg all disks have to end up on.
    pub const GOAL: Peg = Peg(2);

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn all() -> [Peg; NR_PEGS] {
        [Peg(0), Peg(1), Peg(2)]
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single-disk move between two pegs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    pub src: Peg,
    pub dst: Peg,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

/// The full game state: three pegs, a fixed disk count and a move counter.
///
/// Invariant: the disks across all three pegs are always exactly
/// {1..=nr_disks}, each once. Disks only ever relocate, through
/// [`attempt_move`](Self::attempt_move) and [`undo_move`](Self::undo_move).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    pegs: [PegStack; NR_PEGS],
    nr_disks: u8,
    move_count: u32,
}

impl Board {
    /// A board in the canonical start configuration: all disks on peg 0,
    /// largest at the bottom.
    ///
    /// Panics if `nr_disks` is outside `1..=MAX_NR_DISKS`.
    pub fn new(nr_disks: u8) -> Self {
        assert!(
            (1..=MAX_NR_DISKS).contains(&nr_disks),
            "nr_disks must be in 1..={MAX_NR_DISKS}, got {nr_disks}"
        );

        let mut board = Board {
            pegs: Default::default(),
            nr_disks,
            move_count: 0,
        };
        board.reset();
        board
    }

    /// Build a board in an arbitrary configuration, given the disk sizes on
    /// each peg from bottom to top.
    ///
    /// Panics if the layout violates a board invariant: a size outside
    /// `1..=nr_disks`, a duplicate or missing disk, or a stack that is not
    /// strictly decreasing towards the top. Misassembled boards are
    /// programming errors, not runtime conditions.
    pub fn from_layout(nr_disks: u8, layout: [&[u8]; NR_PEGS]) -> Self {
        assert!(
            (1..=MAX_NR_DISKS).contains(&nr_disks),
            "nr_disks must be in 1..={MAX_NR_DISKS}, got {nr_disks}"
        );

        let mut pegs: [PegStack; NR_PEGS] = Default::default();
        let mut seen = [false; MAX_NR_DISKS as usize + 1];

        for (peg, sizes) in pegs.iter_mut().zip(layout) {
            for &size in sizes {
                assert!(
                    (1..=nr_disks).contains(&size),
                    "disk size {size} outside 1..={nr_disks}"
                );
                assert!(!seen[size as usize], "duplicate disk of size {size}");
                seen[size as usize] = true;
                assert!(peg.push(Disk(size)), "disks on a peg must shrink upwards");
            }
        }
        let placed: usize = pegs.iter().map(PegStack::len).sum();
        assert_eq!(placed, nr_disks as usize, "layout must place every disk");

        Board {
            pegs,
            nr_disks,
            move_count: 0,
        }
    }

    /// Try to move the top disk of `src` onto `dst`.
    ///
    /// Fails without mutating anything if `src == dst`, `src` is empty, or
    /// the disk would land on a smaller one. On success the move counter
    /// goes up by one.
    pub fn attempt_move(&mut self, src: Peg, dst: Peg) -> bool {
        if src == dst {
            return false;
        }
        let Some(disk) = self.pegs[src.index()].pop() else {
            return false;
        };
        if !self.pegs[dst.index()].push(disk) {
            // Put the disk back where it came from. Its own old position is
            // always a legal push, so this cannot be observed as a change.
            let restored = self.pegs[src.index()].push(disk);
            debug_assert!(restored);
            return false;
        }
        self.move_count += 1;
        true
    }

    /// Reverse a previously applied move: the top disk of `mv.dst` goes back
    /// onto `mv.src` and the move counter goes down by one.
    ///
    /// Fails without mutating anything if the board no longer matches, i.e.
    /// the reverse relocation is not itself legal.
    pub fn undo_move(&mut self, mv: Move) -> bool {
        if mv.src == mv.dst {
            return false;
        }
        let Some(disk) = self.pegs[mv.dst.index()].pop() else {
            return false;
        };
        if !self.pegs[mv.src.index()].push(disk) {
            let restored = self.pegs[mv.dst.index()].push(disk);
            debug_assert!(restored);
            return false;
        }
        self.move_count = self.move_count.saturating_sub(1);
        true
    }

    /// Back to the canonical start configuration, move counter zeroed.
    pub fn reset(&mut self) {
        for peg in &mut self.pegs {
            peg.clear();
        }
        for size in (1..=self.nr_disks).rev() {
            let pushed = self.pegs[Peg::START.index()].push(Disk(size));
            debug_assert!(pushed);
        }
        self.move_count = 0;
    }

    /// Solved iff the goal peg holds every disk. The ordering on the peg is
    /// then automatic, the stack invariant leaves only one arrangement.
    pub fn is_solved(&self) -> bool {
        self.pegs[Peg::GOAL.index()].len() == self.nr_disks as usize
    }

    pub fn top_disk(&self, peg: Peg) -> Option<Disk> {
        self.pegs[peg.index()].peek()
    }

    pub fn size_of(&self, peg: Peg) -> usize {
        self.pegs[peg.index()].len()
    }

    pub fn is_empty(&self, peg: Peg) -> bool {
        self.pegs[peg.index()].is_empty()
    }

    /// Disks on the given peg, bottom to top.
    pub fn disks_on(&self, peg: Peg) -> &[Disk] {
        self.pegs[peg.index()].disks()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn nr_disks(&self) -> u8 {
        self.nr_disks
    }
}
