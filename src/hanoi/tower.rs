use std::fmt;

use glam::Vec2;

use super::disk::{Disk, DISK_HEIGHT};
use super::layout::Layout;

/// Identity of one of the three towers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Peg {
    A,
    B,
    C,
}

impl Peg {
    pub const ALL: [Peg; 3] = [Peg::A, Peg::B, Peg::C];

    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Top-left corner of a disk of `width` resting on `anchor` with
/// `occupancy` disks beneath it.
pub fn resting_position(anchor: Vec2, width: f32, occupancy: usize) -> Vec2 {
    Vec2::new(
        anchor.x - width / 2.0,
        anchor.y - (occupancy + 1) as f32 * DISK_HEIGHT,
    )
}

/// A peg and the disks stacked on it, bottom first.
#[derive(Clone, Debug)]
pub struct Tower {
    peg: Peg,
    anchor: Vec2,
    disks: Vec<Disk>,
}

impl Tower {
    pub fn new(peg: Peg, anchor: Vec2) -> Self {
        Self {
            peg,
            anchor,
            disks: Vec::new(),
        }
    }

    pub fn peg(&self) -> Peg {
        self.peg
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Moves the grounding point. Disks already stacked keep their
    /// positions until they are pushed again.
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor;
    }

    /// Grounds `disk` on top of the stack and takes ownership of it.
    pub fn push(&mut self, mut disk: Disk) {
        disk.position = self.next_resting_position(disk.width());
        self.disks.push(disk);
    }

    pub fn pop(&mut self) -> Option<Disk> {
        self.disks.pop()
    }

    pub fn top(&self) -> Option<&Disk> {
        self.disks.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Disk> {
        self.disks.last_mut()
    }

    /// Where a disk of `width` would land if pushed now.
    pub fn next_resting_position(&self, width: f32) -> Vec2 {
        resting_position(self.anchor, width, self.disks.len())
    }

    /// Stacked disks, bottom first.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    pub fn clear(&mut self) {
        self.disks.clear();
    }
}

/// The three towers of the puzzle.
#[derive(Clone, Debug)]
pub struct Board {
    towers: [Tower; 3],
}

impl Board {
    /// A board with every disk stacked on tower A.
    pub fn new(layout: &Layout) -> Self {
        let mut board = Self {
            towers: Peg::ALL.map(|peg| Tower::new(peg, layout.anchor(peg))),
        };
        board.reset(layout);
        board
    }

    /// Re-anchors the towers for `layout` and rebuilds the full initial
    /// stack of `layout.disk_count` disks on tower A, widest first.
    pub fn reset(&mut self, layout: &Layout) {
        for tower in &mut self.towers {
            tower.set_anchor(layout.anchor(tower.peg()));
            tower.clear();
        }
        let source = &mut self.towers[Peg::A.index()];
        for index in 0..layout.disk_count as usize {
            source.push(Disk::for_set(index, layout.disk_count, layout.width));
        }
    }

    pub fn tower(&self, peg: Peg) -> &Tower {
        &self.towers[peg.index()]
    }

    pub fn tower_mut(&mut self, peg: Peg) -> &mut Tower {
        &mut self.towers[peg.index()]
    }

    /// Mutable access to two distinct towers at once.
    /// Returns `None` when `first == second`.
    pub fn pair_mut(&mut self, first: Peg, second: Peg) -> Option<(&mut Tower, &mut Tower)> {
        let (i, j) = (first.index(), second.index());
        if i == j {
            return None;
        }
        let (low, high) = self.towers.split_at_mut(i.max(j));
        let (a, b) = (&mut low[i.min(j)], &mut high[0]);
        Some(if i < j { (a, b) } else { (b, a) })
    }

    pub fn towers(&self) -> &[Tower; 3] {
        &self.towers
    }

    #[cfg(test)]
    pub fn disk_count(&self) -> usize {
        self.towers.iter().map(Tower::len).sum()
    }
}
