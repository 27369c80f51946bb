//! Shapes module - the mino shape catalog
//!
//! Every shape is four offsets relative to the piece origin, origin first.
//! Alongside the offsets each shape lists which of its cells may carry a
//! special unit:
//!
//! - **one-unit** indices: cells that may host a lone summon
//! - **two-unit** index pairs: orthogonally adjacent cells that may become a
//!   two-cell route run

use crate::types::{Pos, ShapeType};

/// Offsets of a single shape, origin first
pub type ShapeOffsets = [Pos; 4];

/// Static description of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub offsets: ShapeOffsets,
    pub one_unit: &'static [usize],
    pub two_unit: &'static [(usize, usize)],
}

const fn p(x: i32, y: i32) -> Pos {
    Pos::new(x, y)
}

/// Long bar
const SHAPE_A: ShapeDef = ShapeDef {
    offsets: [p(0, 0), p(-1, 0), p(1, 0), p(2, 0)],
    one_unit: &[1, 3],
    two_unit: &[(1, 0), (0, 2), (2, 3)],
};

/// Square
const SHAPE_B: ShapeDef = ShapeDef {
    offsets: [p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
    one_unit: &[0, 1, 2, 3],
    two_unit: &[(0, 2), (1, 3), (0, 1), (2, 3)],
};

/// S-shape
const SHAPE_C1: ShapeDef = ShapeDef {
    offsets: [p(0, 0), p(-1, 0), p(0, 1), p(1, 1)],
    one_unit: &[1, 3],
    two_unit: &[(1, 0), (2, 3)],
};

/// S-shape, mirrored
const SHAPE_C2: ShapeDef = ShapeDef {
    offsets: [p(0, 0), p(-1, 1), p(0, 1), p(1, 0)],
    one_unit: &[1, 3],
    two_unit: &[(1, 2), (0, 3)],
};

/// L-shape
const SHAPE_D1: ShapeDef = ShapeDef {
    offsets: [p(0, 0), p(-1, 0), p(1, 0), p(1, 1)],
    one_unit: &[1, 3],
    two_unit: &[(1, 0), (2, 3)],
};

/// L-shape, mirrored
const SHAPE_D2: ShapeDef = ShapeDef {
    offsets: [p(0, 0), p(-1, 1), p(-1, 0), p(1, 0)],
    one_unit: &[1, 3],
    two_unit: &[(1, 2), (0, 3)],
};

/// T-shape
const SHAPE_E: ShapeDef = ShapeDef {
    offsets: [p(0, 0), p(-1, 0), p(1, 0), p(0, 1)],
    one_unit: &[1, 2, 3],
    two_unit: &[(1, 0), (0, 2)],
};

/// Look up the catalog entry for a shape
pub fn shape_def(shape: ShapeType) -> &'static ShapeDef {
    match shape {
        ShapeType::A => &SHAPE_A,
        ShapeType::B => &SHAPE_B,
        ShapeType::C1 => &SHAPE_C1,
        ShapeType::C2 => &SHAPE_C2,
        ShapeType::D1 => &SHAPE_D1,
        ShapeType::D2 => &SHAPE_D2,
        ShapeType::E => &SHAPE_E,
    }
}

/// Get the spawn-orientation offsets for a shape
pub fn get_shape(shape: ShapeType) -> ShapeOffsets {
    shape_def(shape).offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_origin_first() {
        for shape in ShapeType::ALL {
            assert_eq!(get_shape(shape)[0], Pos::ZERO, "{:?}", shape);
        }
    }

    #[test]
    fn test_offsets_are_distinct() {
        for shape in ShapeType::ALL {
            let offsets = get_shape(shape);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(offsets[i], offsets[j], "{:?}", shape);
                }
            }
        }
    }

    #[test]
    fn test_shapes_are_connected() {
        // Each cell touches at least one other cell of the piece.
        for shape in ShapeType::ALL {
            let offsets = get_shape(shape);
            for (i, a) in offsets.iter().enumerate() {
                let touches = offsets
                    .iter()
                    .enumerate()
                    .any(|(j, b)| i != j && a.is_adjacent(*b));
                assert!(touches, "{:?} cell {} is isolated", shape, i);
            }
        }
    }

    #[test]
    fn test_two_unit_pairs_are_adjacent() {
        for shape in ShapeType::ALL {
            let def = shape_def(shape);
            assert!(!def.two_unit.is_empty());
            for &(a, b) in def.two_unit {
                assert!(
                    def.offsets[a].is_adjacent(def.offsets[b]),
                    "{:?} pair ({}, {}) is not adjacent",
                    shape,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_one_unit_indices_in_range() {
        for shape in ShapeType::ALL {
            let def = shape_def(shape);
            assert!(!def.one_unit.is_empty());
            assert!(def.one_unit.iter().all(|&i| i < 4));
        }
    }

    #[test]
    fn test_square_offsets() {
        assert_eq!(
            get_shape(ShapeType::B),
            [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );
    }
}
