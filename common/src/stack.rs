use std::fmt;

/// A single disk, identified by its size. Sizes are unique within a game,
/// 1..=nr_disks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Disk(pub u8);

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The stack of disks on one peg, bottom of the peg at index 0.
///
/// Invariant: disk sizes are strictly decreasing from bottom to top. The
/// only mutations are [`push`](Self::push), [`pop`](Self::pop) and
/// [`clear`](Self::clear), and `push` refuses anything that would break
/// the ordering, so the invariant holds at every observable instant.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct PegStack {
    disks: Vec<Disk>,
}

impl PegStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a disk on top of the stack. This is the single legality gate of
    /// the whole game: it succeeds iff the stack is empty or the disk is
    /// strictly smaller than the current top. On failure the stack is
    /// unchanged and `false` is returned.
    pub fn push(&mut self, disk: Disk) -> bool {
        match self.peek() {
            Some(top) if disk >= top => false,
            _ => {
                self.disks.push(disk);
                true
            }
        }
    }

    /// Remove and return the top disk, or `None` on an empty stack.
    pub fn pop(&mut self) -> Option<Disk> {
        self.disks.pop()
    }

    /// Read the top disk without removing it.
    pub fn peek(&self) -> Option<Disk> {
        self.disks.last().copied()
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Empty the stack. Only used when a game is reset.
    pub fn clear(&mut self) {
        self.disks.clear();
    }

    /// All disks on the peg, bottom to top.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }
}
