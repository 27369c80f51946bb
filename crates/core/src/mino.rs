//! Mino module - the active falling piece
//!
//! A mino owns four freshly created blocks (held in the board's arena) keyed by
//! their offset from the piece origin. Blocks that touch inside the shape are
//! linked at spawn, which is what keeps a settled piece hanging together until
//! a line break or a summon shatters it.

use crate::block::{Block, BlockArena, BlockId};
use crate::rng::Randomizer;
use crate::shapes::shape_def;
use crate::types::{Pos, ShapeType, UnitKind};

/// One cell of a mino: offset from the origin and the block sitting there
pub type MinoCell = (Pos, BlockId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mino {
    shape: ShapeType,
    unit: UnitKind,
    anchor: Pos,
    cells: [MinoCell; 4],
}

impl Mino {
    /// Build a new piece at `anchor`
    ///
    /// Creates the blocks, links every orthogonally adjacent pair, then applies
    /// the unit marking: `Route` turns one random two-unit pair into route
    /// blocks, `Summon` puts a new summon on one random one-unit cell.
    pub fn spawn(
        shape: ShapeType,
        unit: UnitKind,
        anchor: Pos,
        arena: &mut BlockArena,
        rng: &mut impl Randomizer,
    ) -> Self {
        let def = shape_def(shape);
        let cells = def.offsets.map(|offset| (offset, arena.insert(Block::plain())));

        for (i, &(a_off, a_id)) in cells.iter().enumerate() {
            for &(b_off, b_id) in &cells[i + 1..] {
                if a_off.is_adjacent(b_off) {
                    arena.link(a_id, b_id);
                }
            }
        }

        match unit {
            UnitKind::Default => {}
            UnitKind::Route => {
                if let Some((a, b)) = rng.pick(def.two_unit) {
                    for idx in [a, b] {
                        if let Some(block) = arena.get_mut(cells[idx].1) {
                            block.is_route = true;
                        }
                    }
                }
            }
            UnitKind::Summon => {
                if let Some(idx) = rng.pick(def.one_unit) {
                    let summon = arena.new_summon();
                    if let Some(block) = arena.get_mut(cells[idx].1) {
                        block.summon = Some(summon);
                    }
                }
            }
        }

        Self {
            shape,
            unit,
            anchor,
            cells,
        }
    }

    pub fn shape(&self) -> ShapeType {
        self.shape
    }

    pub fn unit(&self) -> UnitKind {
        self.unit
    }

    pub fn anchor(&self) -> Pos {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Pos) {
        self.anchor = anchor;
    }

    /// Offset/block pairs relative to the origin
    pub fn cells(&self) -> &[MinoCell; 4] {
        &self.cells
    }

    pub fn offsets(&self) -> [Pos; 4] {
        self.cells.map(|(offset, _)| offset)
    }

    /// Absolute cells if the origin were at `anchor`
    pub fn cells_at(&self, anchor: Pos) -> impl Iterator<Item = (Pos, BlockId)> + '_ {
        self.cells.iter().map(move |&(offset, id)| (anchor + offset, id))
    }

    /// Absolute cells at the current anchor
    pub fn absolute_cells(&self) -> [(Pos, BlockId); 4] {
        let anchor = self.anchor;
        self.cells.map(|(offset, id)| (anchor + offset, id))
    }

    /// Quarter turn about the origin
    ///
    /// Only the offsets change; the blocks (and their links) stay the same.
    /// Legality is the caller's business.
    pub fn rotate(&mut self) {
        for cell in &mut self.cells {
            cell.0 = cell.0.rotated();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::types::BlockKind;

    fn spawn(shape: ShapeType, unit: UnitKind, seed: u32) -> (Mino, BlockArena) {
        let mut arena = BlockArena::new();
        let mut rng = SimpleRng::new(seed);
        let mino = Mino::spawn(shape, unit, Pos::new(5, 14), &mut arena, &mut rng);
        (mino, arena)
    }

    #[test]
    fn test_spawn_links_adjacent_cells_only() {
        let (mino, arena) = spawn(ShapeType::B, UnitKind::Default, 1);
        let cells = mino.cells();
        for &(a_off, a) in cells {
            for &(b_off, b) in cells {
                if a == b {
                    continue;
                }
                assert_eq!(arena.is_linked(a, b), a_off.is_adjacent(b_off));
            }
        }
        assert!(arena.links_are_symmetric());
    }

    #[test]
    fn test_t_shape_center_links_three() {
        let (mino, arena) = spawn(ShapeType::E, UnitKind::Default, 1);
        let (_, center) = mino.cells()[0];
        assert_eq!(arena.get(center).unwrap().links().len(), 3);
    }

    #[test]
    fn test_default_unit_marks_nothing() {
        let (mino, arena) = spawn(ShapeType::A, UnitKind::Default, 1);
        for &(_, id) in mino.cells() {
            assert_eq!(arena.get(id).unwrap().kind(), BlockKind::Plain);
        }
    }

    #[test]
    fn test_route_unit_marks_adjacent_pair() {
        for seed in 1..20 {
            let (mino, arena) = spawn(ShapeType::C1, UnitKind::Route, seed);
            let routes: Vec<Pos> = mino
                .cells()
                .iter()
                .filter(|(_, id)| arena.get(*id).unwrap().is_route)
                .map(|(off, _)| *off)
                .collect();
            assert_eq!(routes.len(), 2);
            assert!(routes[0].is_adjacent(routes[1]));
        }
    }

    #[test]
    fn test_summon_unit_marks_one_cell() {
        for seed in 1..20 {
            let (mino, arena) = spawn(ShapeType::E, UnitKind::Summon, seed);
            let summons: Vec<usize> = mino
                .cells()
                .iter()
                .enumerate()
                .filter(|(_, (_, id))| arena.get(*id).unwrap().summon.is_some())
                .map(|(i, _)| i)
                .collect();
            assert_eq!(summons.len(), 1);
            assert!(shape_def(ShapeType::E).one_unit.contains(&summons[0]));
        }
    }

    #[test]
    fn test_rotate_relabels_offsets() {
        let (mut mino, _arena) = spawn(ShapeType::A, UnitKind::Default, 1);
        let before = *mino.cells();
        mino.rotate();
        for (old, new) in before.iter().zip(mino.cells().iter()) {
            assert_eq!(new.1, old.1);
            assert_eq!(new.0, Pos::new(old.0.y, -old.0.x));
        }
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for shape in ShapeType::ALL {
            let (mut mino, _arena) = spawn(shape, UnitKind::Default, 1);
            let original = mino.offsets();
            for _ in 0..4 {
                mino.rotate();
            }
            assert_eq!(mino.offsets(), original, "{:?}", shape);
        }
    }

    #[test]
    fn test_absolute_cells_follow_anchor() {
        let (mut mino, _arena) = spawn(ShapeType::B, UnitKind::Default, 1);
        mino.set_anchor(Pos::new(2, 3));
        let abs: Vec<Pos> = mino.absolute_cells().iter().map(|(p, _)| *p).collect();
        assert_eq!(
            abs,
            vec![Pos::new(2, 3), Pos::new(2, 4), Pos::new(3, 3), Pos::new(3, 4)]
        );
    }
}
