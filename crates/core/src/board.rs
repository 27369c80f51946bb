//! Board module - the grid of placed blocks
//!
//! The board is a `width x height` grid of block handles stored in a flat,
//! row-major vector, together with the arena that owns the blocks.
//! Coordinates: (x, y) where x grows left to right and y grows **bottom to
//! top**; `y = 0` is the floor.
//!
//! This module holds the placement and query primitives. The resolution
//! cascade that runs after a mino settles lives in [`crate::cascade`].

use crate::block::{Block, BlockArena, BlockId};
use crate::mino::Mino;
use crate::rng::Randomizer;
use crate::snapshot::{BoardSnapshot, CellView};
use crate::types::{BlockKind, Direction, Pos, VisualEvent};

#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<BlockId>>,
    blocks: BlockArena,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            blocks: BlockArena::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    /// Get cell at `pos`
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<Option<BlockId>> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Handle of the block at `pos`, if any
    pub fn block_id(&self, pos: Pos) -> Option<BlockId> {
        self.get(pos).flatten()
    }

    pub fn block(&self, pos: Pos) -> Option<&Block> {
        self.block_id(pos).and_then(|id| self.blocks.get(id))
    }

    pub fn block_mut(&mut self, pos: Pos) -> Option<&mut Block> {
        let id = self.block_id(pos)?;
        self.blocks.get_mut(id)
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Check if a mino cell may sit at `pos`
    ///
    /// Inside the side walls, on or above the floor, and not on a placed block.
    /// There is no ceiling: cells above the board are always open.
    pub fn is_open(&self, pos: Pos) -> bool {
        if pos.x < 0 || pos.x as usize >= self.width || pos.y < 0 {
            return false;
        }
        !self.is_occupied(pos)
    }

    pub fn blocks(&self) -> &BlockArena {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut BlockArena {
        &mut self.blocks
    }

    /// Put a new block into an empty in-bounds cell
    pub fn place_block(&mut self, pos: Pos, block: Block) -> Option<BlockId> {
        let idx = self.index(pos)?;
        if self.cells[idx].is_some() {
            return None;
        }
        let id = self.blocks.insert(block);
        self.cells[idx] = Some(id);
        Some(id)
    }

    /// Take a handle out of the grid without destroying the block
    pub(crate) fn take(&mut self, pos: Pos) -> Option<BlockId> {
        let idx = self.index(pos)?;
        self.cells[idx].take()
    }

    /// Store a handle in an in-bounds cell
    pub(crate) fn put(&mut self, pos: Pos, id: BlockId) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = Some(id);
                true
            }
            None => false,
        }
    }

    /// Move the occupant of `from` into empty `to`
    pub(crate) fn move_block(&mut self, from: Pos, to: Pos) -> bool {
        if !self.in_bounds(to) || self.is_occupied(to) {
            return false;
        }
        match self.take(from) {
            Some(id) => self.put(to, id),
            None => false,
        }
    }

    /// Remove and destroy the block at `pos`
    pub fn remove_block(&mut self, pos: Pos) -> Option<Block> {
        let id = self.take(pos)?;
        self.blocks.remove(id)
    }

    /// Link the blocks at two adjacent cells
    pub fn link_cells(&mut self, a: Pos, b: Pos) -> bool {
        if !a.is_adjacent(b) {
            return false;
        }
        match (self.block_id(a), self.block_id(b)) {
            (Some(ia), Some(ib)) => self.blocks.link(ia, ib),
            _ => false,
        }
    }

    /// Check whether `mino` fits with its origin at `anchor`
    pub fn can_place(&self, mino: &Mino, anchor: Pos) -> bool {
        mino.cells_at(anchor).all(|(pos, _)| self.is_open(pos))
    }

    /// Settle a mino into the grid
    ///
    /// Blocks move from the mino to the board. Cells above the top row have no
    /// storage; those blocks are destroyed. Returns the number of cells stored.
    pub fn put_mino(&mut self, mino: Mino, events: &mut Vec<VisualEvent>) -> usize {
        let mut stored = 0;
        for (pos, id) in mino.absolute_cells() {
            let free = self.index(pos).filter(|&idx| self.cells[idx].is_none());
            match free {
                Some(idx) => {
                    self.cells[idx] = Some(id);
                    let kind = self.blocks.get(id).map(Block::kind);
                    if let Some(kind) = kind {
                        events.push(VisualEvent::BlockPlaced { cell: pos, kind });
                    }
                    stored += 1;
                }
                None => {
                    log::debug!("mino cell {:?} has no room on the board, dropping it", pos);
                    self.blocks.remove(id);
                }
            }
        }
        stored
    }

    /// Discard a mino that never reached the grid
    pub fn discard_mino(&mut self, mino: Mino) {
        for &(_, id) in mino.cells() {
            self.blocks.remove(id);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Indices of all complete rows, highest first
    pub fn complete_rows(&self) -> Vec<usize> {
        (0..self.height).rev().filter(|&y| self.is_row_full(y)).collect()
    }

    /// Top-most row containing a strata block
    pub fn highest_strata(&self) -> Option<usize> {
        (0..self.height).rev().find(|&y| {
            (0..self.width).any(|x| {
                self.block(Pos::new(x as i32, y as i32))
                    .is_some_and(|b| b.is_strata)
            })
        })
    }

    /// True if any placed block carries a summon
    pub fn has_summon(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .any(|&id| self.blocks.get(id).is_some_and(|b| b.summon.is_some()))
    }

    /// Fill row `y` with strata, leaving one random cell empty
    pub fn fill_strata_row(
        &mut self,
        y: usize,
        rng: &mut impl Randomizer,
        events: &mut Vec<VisualEvent>,
    ) {
        let hole = rng.next_range(self.width as u32) as usize;
        for x in 0..self.width {
            if x == hole {
                continue;
            }
            let pos = Pos::new(x as i32, y as i32);
            if self.place_block(pos, Block::strata()).is_some() {
                events.push(VisualEvent::BlockPlaced {
                    cell: pos,
                    kind: BlockKind::Strata,
                });
            }
        }
    }

    /// Directions in which the block at `pos` is linked to its grid neighbour
    pub fn link_mask(&self, pos: Pos) -> u8 {
        let Some(block) = self.block(pos) else {
            return 0;
        };
        Direction::ALL
            .iter()
            .filter(|dir| {
                self.block_id(pos.step(**dir))
                    .is_some_and(|n| block.is_linked_to(n))
            })
            .fold(0, |mask, dir| mask | dir.bit())
    }

    /// Positions of every occupied cell, bottom row first
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, BlockId)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            c.map(|id| {
                let pos = Pos::new((i % self.width) as i32, (i / self.width) as i32);
                (pos, id)
            })
        })
    }

    /// Link symmetry over every block the board owns
    pub fn links_are_symmetric(&self) -> bool {
        self.blocks.links_are_symmetric()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let cells = (0..self.cells.len())
            .map(|i| {
                let pos = Pos::new((i % self.width) as i32, (i / self.width) as i32);
                self.block(pos).map(|b| CellView {
                    kind: b.kind(),
                    summon: b.summon,
                    links: self.link_mask(pos),
                })
            })
            .collect();
        BoardSnapshot {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.blocks.clear();
    }
}
