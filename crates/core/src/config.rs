//! Engine configuration
//!
//! Everything tunable about a session lives in [`EngineConfig`]. A config is
//! checked once, when the session is built; a session never runs with an
//! invalid one.

use thiserror::Error;

use crate::shapes::get_shape;
use crate::types::{
    Pos, ShapeType, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_STRATA_ROWS, MIN_HEIGHT_STRATA,
    SPAWN_ANCHOR,
};

/// When the strata scroll may run
///
/// `DeferWhileSummoned` is the classic Digris rule; `Always` keeps the strata
/// surface at its minimum even with a summon in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollGate {
    /// Scroll whenever the strata surface sinks too low. Anything pushed off
    /// the top, summons included, is removed with explicit events.
    #[default]
    Always,
    /// Hold the scroll while a summon is on the board.
    DeferWhileSummoned,
}

impl ScrollGate {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "always" => Some(ScrollGate::Always),
            "defer" | "defer_while_summoned" => Some(ScrollGate::DeferWhileSummoned),
            _ => None,
        }
    }
}

/// Rules the cascade needs for the strata scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRules {
    pub min_height_strata: usize,
    pub gate: ScrollGate,
}

impl Default for ScrollRules {
    fn default() -> Self {
        Self {
            min_height_strata: MIN_HEIGHT_STRATA,
            gate: ScrollGate::Always,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[error("shape pool is empty")]
    EmptyShapePool,
    #[error("spawn anchor {anchor:?} is outside a {width}x{height} board")]
    SpawnOutOfBounds {
        anchor: Pos,
        width: usize,
        height: usize,
    },
    #[error("strata minimum {min} must be below board height {height}")]
    StrataMinimumTooHigh { min: usize, height: usize },
    #[error("{rows} initial strata rows would bury the spawn row {spawn_row}")]
    InitialStrataTooDeep { rows: usize, spawn_row: i32 },
    #[error("shape {shape:?} does not fit at spawn anchor {anchor:?} on a board {width} wide")]
    ShapeDoesNotFit {
        shape: ShapeType,
        anchor: Pos,
        width: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub spawn_anchor: Pos,
    pub min_height_strata: usize,
    pub initial_strata_rows: usize,
    /// Shapes drawn (uniformly) for new minos
    pub shape_pool: Vec<ShapeType>,
    pub scroll_gate: ScrollGate,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            spawn_anchor: SPAWN_ANCHOR,
            min_height_strata: MIN_HEIGHT_STRATA,
            initial_strata_rows: INITIAL_STRATA_ROWS,
            shape_pool: ShapeType::ALL.to_vec(),
            scroll_gate: ScrollGate::Always,
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden from `DIGRIS_*` environment variables
    ///
    /// - `DIGRIS_SEED`: RNG seed
    /// - `DIGRIS_WIDTH` / `DIGRIS_HEIGHT`: board size
    /// - `DIGRIS_SCROLL_GATE`: `always` or `defer`
    ///
    /// Unparseable values fall back to the default. The result still has to
    /// pass [`EngineConfig::validate`].
    pub fn from_env() -> Self {
        use std::env;

        let mut config = Self::default();

        if let Some(seed) = env::var("DIGRIS_SEED").ok().and_then(|s| s.parse().ok()) {
            config.seed = seed;
        }
        if let Some(width) = env::var("DIGRIS_WIDTH").ok().and_then(|s| s.parse().ok()) {
            config.width = width;
            config.spawn_anchor.x = (width / 2) as i32;
        }
        if let Some(height) = env::var("DIGRIS_HEIGHT").ok().and_then(|s| s.parse::<usize>().ok()) {
            config.height = height;
            config.spawn_anchor.y = height.saturating_sub(3) as i32;
        }
        if let Some(gate) = env::var("DIGRIS_SCROLL_GATE")
            .ok()
            .and_then(|s| ScrollGate::from_str(s.trim()))
        {
            config.scroll_gate = gate;
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.shape_pool.is_empty() {
            return Err(ConfigError::EmptyShapePool);
        }
        let anchor = self.spawn_anchor;
        if anchor.x < 0
            || anchor.y < 0
            || anchor.x as usize >= self.width
            || anchor.y as usize >= self.height
        {
            return Err(ConfigError::SpawnOutOfBounds {
                anchor,
                width: self.width,
                height: self.height,
            });
        }
        if self.min_height_strata >= self.height {
            return Err(ConfigError::StrataMinimumTooHigh {
                min: self.min_height_strata,
                height: self.height,
            });
        }
        if self.initial_strata_rows as i32 > anchor.y {
            return Err(ConfigError::InitialStrataTooDeep {
                rows: self.initial_strata_rows,
                spawn_row: anchor.y,
            });
        }
        // Every pool shape must be able to spawn on a fresh board, or the
        // session would top out on the first unlucky draw.
        for &shape in &self.shape_pool {
            let fits = get_shape(shape).iter().all(|&offset| {
                let cell = anchor + offset;
                cell.x >= 0 && (cell.x as usize) < self.width && cell.y >= 0
            });
            if !fits {
                return Err(ConfigError::ShapeDoesNotFit {
                    shape,
                    anchor,
                    width: self.width,
                });
            }
        }
        Ok(())
    }

    pub fn scroll_rules(&self) -> ScrollRules {
        ScrollRules {
            min_height_strata: self.min_height_strata,
            gate: self.scroll_gate,
        }
    }
}
