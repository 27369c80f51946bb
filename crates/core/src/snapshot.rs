use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockArena};
use crate::mino::Mino;
use crate::types::{BlockKind, Direction, Pos, ShapeType, SummonId, UnitKind};

/// What a presentation layer needs to draw one occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellView {
    pub kind: BlockKind,
    pub summon: Option<SummonId>,
    /// [`crate::types::Direction::bit`] mask of linked orthogonal neighbours
    pub links: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, bottom row first
    pub cells: Vec<Option<CellView>>,
}

impl BoardSnapshot {
    pub fn get(&self, x: usize, y: usize) -> Option<CellView> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinoSnapshot {
    pub shape: ShapeType,
    pub unit: UnitKind,
    pub anchor: Pos,
    /// Absolute cell positions
    pub cells: Vec<(Pos, CellView)>,
}

impl MinoSnapshot {
    /// Capture a falling mino whose blocks live in `blocks`
    pub fn capture(mino: &Mino, blocks: &BlockArena) -> Self {
        let cells = mino
            .cells()
            .iter()
            .map(|&(offset, id)| {
                let links = Direction::ALL
                    .iter()
                    .filter(|dir| {
                        let neighbour = offset + dir.offset();
                        mino.cells()
                            .iter()
                            .any(|&(o, other)| o == neighbour && blocks.is_linked(id, other))
                    })
                    .fold(0, |mask, dir| mask | dir.bit());
                let block = blocks.get(id);
                let view = CellView {
                    kind: block.map_or(BlockKind::Plain, Block::kind),
                    summon: block.and_then(|b| b.summon),
                    links,
                };
                (mino.anchor() + offset, view)
            })
            .collect();

        Self {
            shape: mino.shape(),
            unit: mino.unit(),
            anchor: mino.anchor(),
            cells,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub board: BoardSnapshot,
    pub active: Option<MinoSnapshot>,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl SessionSnapshot {
    /// Kind of whatever occupies `(x, y)`, active mino first
    pub fn kind_at(&self, x: usize, y: usize) -> Option<BlockKind> {
        let pos = Pos::new(x as i32, y as i32);
        self.active
            .as_ref()
            .and_then(|m| m.cells.iter().find(|(p, _)| *p == pos))
            .map(|(_, v)| v.kind)
            .or_else(|| self.board.get(x, y).map(|v| v.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::rng::SimpleRng;

    #[test]
    fn test_mino_snapshot_links() {
        let mut board = Board::new(10, 17);
        let mut rng = SimpleRng::new(1);
        let mino = Mino::spawn(
            ShapeType::E,
            UnitKind::Default,
            Pos::new(4, 10),
            board.blocks_mut(),
            &mut rng,
        );
        let snap = MinoSnapshot::capture(&mino, board.blocks());

        assert_eq!(snap.cells.len(), 4);
        let (pos, center) = snap.cells[0];
        assert_eq!(pos, Pos::new(4, 10));
        assert_eq!(
            center.links,
            Direction::Left.bit() | Direction::Right.bit() | Direction::Up.bit()
        );
        let (_, top) = snap.cells[3];
        assert_eq!(top.links, Direction::Down.bit());
    }

    #[test]
    fn test_kind_at_prefers_active() {
        let mut board = Board::new(4, 4);
        board.place_block(Pos::new(0, 0), Block::strata());
        let snap = SessionSnapshot {
            board: board.snapshot(),
            active: Some(MinoSnapshot {
                shape: ShapeType::B,
                unit: UnitKind::Default,
                anchor: Pos::new(2, 2),
                cells: vec![(
                    Pos::new(2, 2),
                    CellView {
                        kind: BlockKind::Route,
                        summon: None,
                        links: 0,
                    },
                )],
            }),
            episode_id: 0,
            piece_id: 1,
        };

        assert_eq!(snap.kind_at(0, 0), Some(BlockKind::Strata));
        assert_eq!(snap.kind_at(2, 2), Some(BlockKind::Route));
        assert_eq!(snap.kind_at(3, 3), None);
        assert_eq!(snap.board.occupied_count(), 1);
    }
}
