//! Block module - cell occupants and the link graph
//!
//! Blocks live in a [`BlockArena`] and are addressed by [`BlockId`] handles.
//! Links between blocks are stored as handles on both sides, so the relation is
//! symmetric by construction: every mutation goes through the arena, which
//! updates both partners.
//!
//! A handle stays valid until the block is removed; the arena may reuse the
//! slot afterwards, so callers must drop their copies of removed ids (the board
//! does this by clearing the grid cell in the same step).

use arrayvec::ArrayVec;

use crate::types::{BlockKind, SummonId};

/// Orthogonal linking caps a block at four partners
pub const MAX_LINKS: usize = 4;

/// Stable handle to a block in a [`BlockArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u32);

impl BlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Logical state of a single cell occupant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub is_strata: bool,
    pub is_route: bool,
    pub summon: Option<SummonId>,
    links: ArrayVec<BlockId, MAX_LINKS>,
}

impl Block {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn strata() -> Self {
        Self {
            is_strata: true,
            ..Self::default()
        }
    }

    pub fn route() -> Self {
        Self {
            is_route: true,
            ..Self::default()
        }
    }

    pub fn with_summon(id: SummonId) -> Self {
        Self {
            summon: Some(id),
            ..Self::default()
        }
    }

    pub fn links(&self) -> &[BlockId] {
        &self.links
    }

    pub fn is_linked_to(&self, other: BlockId) -> bool {
        self.links.contains(&other)
    }

    /// Still connected to (part of) the mino it came from
    pub fn is_part_of_cluster(&self) -> bool {
        !self.links.is_empty()
    }

    /// Outward appearance; a summon outranks the route and strata flags
    pub fn kind(&self) -> BlockKind {
        if self.summon.is_some() {
            BlockKind::Summon
        } else if self.is_route {
            BlockKind::Route
        } else if self.is_strata {
            BlockKind::Strata
        } else {
            BlockKind::Plain
        }
    }
}

/// Owner of every block in a session, placed or still falling
#[derive(Debug, Clone, Default)]
pub struct BlockArena {
    slots: Vec<Option<Block>>,
    free: Vec<u32>,
    live: usize,
    next_summon: u32,
}

impl BlockArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live blocks
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn insert(&mut self, block: Block) -> BlockId {
        self.live += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(block);
                BlockId(slot)
            }
            None => {
                self.slots.push(Some(block));
                BlockId((self.slots.len() - 1) as u32)
            }
        }
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.slots.get(id.index()).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.slots.get_mut(id.index()).and_then(|s| s.as_mut())
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Allocate a fresh summon id
    pub fn new_summon(&mut self) -> SummonId {
        let id = SummonId(self.next_summon);
        self.next_summon = self.next_summon.wrapping_add(1);
        id
    }

    /// Link two blocks
    ///
    /// Returns false if either block is missing, they are the same block, they
    /// are already linked, or one side has no room left.
    pub fn link(&mut self, a: BlockId, b: BlockId) -> bool {
        if a == b {
            return false;
        }
        let room = |blk: &Block| {
            blk.links.len() < MAX_LINKS && !blk.links.contains(&a) && !blk.links.contains(&b)
        };
        match (self.get(a), self.get(b)) {
            (Some(ba), Some(bb)) if room(ba) && room(bb) => {}
            _ => return false,
        }
        if let Some(ba) = self.get_mut(a) {
            ba.links.push(b);
        }
        if let Some(bb) = self.get_mut(b) {
            bb.links.push(a);
        }
        true
    }

    pub fn is_linked(&self, a: BlockId, b: BlockId) -> bool {
        self.get(a).is_some_and(|blk| blk.is_linked_to(b))
    }

    /// Detach a block from every partner
    pub fn unlink_all(&mut self, id: BlockId) {
        let partners = match self.get_mut(id) {
            Some(block) => std::mem::take(&mut block.links),
            None => return,
        };
        for partner in partners {
            if let Some(p) = self.get_mut(partner) {
                p.links.retain(|l| *l != id);
            }
        }
    }

    /// Destroy a block, unlinking it first
    pub fn remove(&mut self, id: BlockId) -> Option<Block> {
        if !self.contains(id) {
            return None;
        }
        self.unlink_all(id);
        let block = self.slots.get_mut(id.index()).and_then(Option::take);
        if block.is_some() {
            self.live -= 1;
            self.free.push(id.0);
        }
        block
    }

    /// Iterate live blocks
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|b| (BlockId(i as u32), b)))
    }

    /// True if every link has a matching back-link to a live block
    pub fn links_are_symmetric(&self) -> bool {
        self.iter().all(|(id, block)| {
            block
                .links
                .iter()
                .all(|&partner| self.is_linked(partner, id))
        })
    }

    /// Remove every block; summon ids keep counting
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}
