//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond lookups, so they can be
//! used from the core, from a presentation layer, or from tests.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 17 rows (indexed 0-16, **bottom to top**)
//! - **Spawn anchor**: (5, 14)
//!
//! Rows are indexed from the floor: `y = 0` is the bottom row. Pieces may extend
//! above the visible area; the board only stores cells with `y < height`.
//!
//! # Strata
//!
//! The strata layer is kept exposed up to [`MIN_HEIGHT_STRATA`]: once the
//! top-most strata row sinks below it the board scrolls and new strata rows are
//! synthesized at the bottom.
//!
//! # Examples
//!
//! ```
//! use digris_types::{Direction, Intent, Pos, ShapeType, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let origin = Pos::new(5, 14);
//! assert_eq!(origin + Direction::Down.offset(), Pos::new(5, 13));
//!
//! assert_eq!(ShapeType::from_str("c1"), Some(ShapeType::C1));
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 17);
//! ```

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (17 rows)
pub const BOARD_HEIGHT: usize = 17;

/// Anchor at which every new mino spawns
pub const SPAWN_ANCHOR: Pos = Pos::new(5, 14);

/// Strata surface level kept exposed by scrolling
pub const MIN_HEIGHT_STRATA: usize = 4;

/// Strata rows laid down when a session starts
///
/// With the default this puts the strata surface exactly at
/// [`MIN_HEIGHT_STRATA`].
pub const INITIAL_STRATA_ROWS: usize = MIN_HEIGHT_STRATA + 1;

/// A board-space (or mino-relative) cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const ZERO: Pos = Pos { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring position in the given direction
    pub fn step(self, dir: Direction) -> Self {
        self + dir.offset()
    }

    /// Quarter turn about the origin: `(x, y) -> (y, -x)`
    pub fn rotated(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// True if `other` is one orthogonal step away
    pub fn is_adjacent(self, other: Pos) -> bool {
        let d = other - self;
        d.x.abs() + d.y.abs() == 1
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Self::Output {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Self::Output {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The four orthogonal directions
///
/// `Up` points toward larger `y` (away from the floor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit offset for this direction
    pub const fn offset(self) -> Pos {
        match self {
            Direction::Up => Pos::new(0, 1),
            Direction::Right => Pos::new(1, 0),
            Direction::Down => Pos::new(0, -1),
            Direction::Left => Pos::new(-1, 0),
        }
    }

    /// Bit used for this direction in link masks
    pub const fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Right => 0b0010,
            Direction::Down => 0b0100,
            Direction::Left => 0b1000,
        }
    }

    /// Direction of a unit offset, if it is one
    pub fn from_offset(offset: Pos) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }
}

/// The seven mino shapes
///
/// - **A**: long bar
/// - **B**: 2x2 square
/// - **C1** / **C2**: S-shape and its mirror
/// - **D1** / **D2**: L-shape and its mirror
/// - **E**: T-shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    A,
    B,
    C1,
    C2,
    D1,
    D2,
    E,
}

impl ShapeType {
    pub const ALL: [ShapeType; 7] = [
        ShapeType::A,
        ShapeType::B,
        ShapeType::C1,
        ShapeType::C2,
        ShapeType::D1,
        ShapeType::D2,
        ShapeType::E,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use digris_types::ShapeType;
    ///
    /// assert_eq!(ShapeType::from_str("a"), Some(ShapeType::A));
    /// assert_eq!(ShapeType::from_str("D2"), Some(ShapeType::D2));
    /// assert_eq!(ShapeType::from_str("z"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "a" => Some(ShapeType::A),
            "b" => Some(ShapeType::B),
            "c1" => Some(ShapeType::C1),
            "c2" => Some(ShapeType::C2),
            "d1" => Some(ShapeType::D1),
            "d2" => Some(ShapeType::D2),
            "e" => Some(ShapeType::E),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::A => "a",
            ShapeType::B => "b",
            ShapeType::C1 => "c1",
            ShapeType::C2 => "c2",
            ShapeType::D1 => "d1",
            ShapeType::D2 => "d2",
            ShapeType::E => "e",
        }
    }
}

/// Special unit carried by a freshly spawned mino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Plain blocks only
    Default,
    /// Two adjacent cells become route blocks
    Route,
    /// One cell carries a summon
    Summon,
}

impl UnitKind {
    pub const ALL: [UnitKind; 3] = [UnitKind::Default, UnitKind::Route, UnitKind::Summon];
}

/// Identifier of a summon token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SummonId(pub u32);

/// What a block looks like from the outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Plain,
    Strata,
    Route,
    Summon,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Plain => "plain",
            BlockKind::Strata => "strata",
            BlockKind::Route => "route",
            BlockKind::Summon => "summon",
        }
    }
}

/// Player intents
///
/// Each intent maps 1:1 to a board operation. Input layers translate their own
/// device events into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Move the mino one column left
    MoveLeft,
    /// Move the mino one column right
    MoveRight,
    /// Move the mino one row down, locking it if it cannot move
    SoftDrop,
    /// Drop the mino as far as it goes and lock it
    HardDrop,
    /// Quarter turn, retried through all four orientations
    Rotate,
    /// Reset the session
    Restart,
}

impl Intent {
    /// Parse intent from string
    ///
    /// # Examples
    ///
    /// ```
    /// use digris_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("ROTATE"), Some(Intent::Rotate));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            "rotate" => Some(Intent::Rotate),
            "restart" => Some(Intent::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
            Intent::Rotate => "rotate",
            Intent::Restart => "restart",
        }
    }
}

/// Discrete change reported by the engine to a presentation layer
///
/// Events are emitted in the order the engine applied them. They carry no
/// timing: a renderer may animate them however it likes, or ignore them and
/// resync from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualEvent {
    /// A block now occupies `cell` (settled mino cell or synthesized strata)
    BlockPlaced { cell: Pos, kind: BlockKind },
    /// The block at `cell` was broken or consumed
    BlockCleared { cell: Pos },
    /// A block slid down its column
    BlockDropped { from: Pos, to: Pos },
    /// Board content moved up by `rows` to expose new strata
    BoardScrolled { rows: usize },
    /// A summon walked onto a route cell
    SummonMoved { id: SummonId, from: Pos, to: Pos },
    /// A summon left the board
    SummonRemoved { id: SummonId },
    /// The session started over, after a top-out or a restart
    GameOverReset,
}
