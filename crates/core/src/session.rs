//! Session module - one running game
//!
//! The session owns the board, the falling mino, the random source and the
//! event buffer. Intents are applied one at a time and synchronously: an
//! intent that settles the mino runs the whole cascade before it returns.

use crate::board::Board;
use crate::cascade::CascadeReport;
use crate::config::{ConfigError, EngineConfig};
use crate::mino::Mino;
use crate::rng::{Randomizer, SimpleRng};
use crate::snapshot::{MinoSnapshot, SessionSnapshot};
use crate::types::{Direction, Intent, Pos, ShapeType, UnitKind, VisualEvent};

/// Result of applying one intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Illegal or not applicable; nothing changed
    Ignored,
    Moved,
    Rotated,
    /// The mino settled, the cascade ran and a new mino spawned
    Settled(CascadeReport),
    /// The next mino could not spawn; the session started a new episode
    TopOut,
    Restarted,
}

#[derive(Debug, Clone)]
pub struct Session<R: Randomizer = SimpleRng> {
    config: EngineConfig,
    board: Board,
    active: Option<Mino>,
    rng: R,
    events: Vec<VisualEvent>,
    /// Monotonic episode id (increments on every reset).
    episode_id: u32,
    /// Minos spawned in this episode.
    piece_id: u32,
    started: bool,
}

impl Session<SimpleRng> {
    /// Create a session seeded from `config.seed`
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let rng = SimpleRng::new(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Randomizer> Session<R> {
    /// Create a session with an explicit random source
    ///
    /// The board starts with `initial_strata_rows` of strata; no mino is
    /// falling until [`Session::start`].
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Self {
            board: Board::new(config.width, config.height),
            config,
            active: None,
            rng,
            events: Vec::new(),
            episode_id: 0,
            piece_id: 0,
            started: false,
        };
        session.lay_strata();
        Ok(session)
    }

    fn lay_strata(&mut self) {
        for y in 0..self.config.initial_strata_rows {
            self.board.fill_strata_row(y, &mut self.rng, &mut self.events);
        }
    }

    /// Start the session and spawn the first mino
    ///
    /// Returns whether a mino is falling afterwards. A validated config always
    /// spawns on a fresh board; false means the spawn cells were occupied.
    pub fn start(&mut self) -> bool {
        if self.started {
            return self.active.is_some();
        }
        self.started = true;
        log::info!("episode {} started", self.episode_id);
        if !self.spawn_next() {
            log::warn!("episode {} could not spawn its first mino", self.episode_id);
            return false;
        }
        true
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&Mino> {
        self.active.as_ref()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<VisualEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.snapshot(),
            active: self
                .active
                .as_ref()
                .map(|mino| MinoSnapshot::capture(mino, self.board.blocks())),
            episode_id: self.episode_id,
            piece_id: self.piece_id,
        }
    }

    /// Apply an intent
    pub fn apply(&mut self, intent: Intent) -> StepOutcome {
        log::trace!("intent {}", intent.as_str());

        if intent == Intent::Restart {
            self.reset();
            return if self.start() {
                StepOutcome::Restarted
            } else {
                StepOutcome::TopOut
            };
        }
        if self.active.is_none() {
            return StepOutcome::Ignored;
        }

        match intent {
            Intent::MoveLeft => self.shift(Direction::Left),
            Intent::MoveRight => self.shift(Direction::Right),
            Intent::SoftDrop => match self.shift(Direction::Down) {
                StepOutcome::Moved => StepOutcome::Moved,
                _ => self.settle(),
            },
            Intent::HardDrop => self.hard_drop(),
            Intent::Rotate => {
                if self.rotate() {
                    StepOutcome::Rotated
                } else {
                    StepOutcome::Ignored
                }
            }
            Intent::Restart => StepOutcome::Restarted,
        }
    }

    fn shift(&mut self, dir: Direction) -> StepOutcome {
        if self.try_move(dir.offset()) {
            StepOutcome::Moved
        } else {
            StepOutcome::Ignored
        }
    }

    /// Try to move the active mino by `delta`
    pub(crate) fn try_move(&mut self, delta: Pos) -> bool {
        let Some(mino) = self.active.as_mut() else {
            return false;
        };
        let target = mino.anchor() + delta;
        if self.board.can_place(mino, target) {
            mino.set_anchor(target);
            return true;
        }
        false
    }

    /// Quarter-turn the active mino, turning further while the result is
    /// blocked
    ///
    /// Four turns bring the mino back to where it started, so a mino with no
    /// legal orientation ends up unchanged and this returns false.
    pub(crate) fn rotate(&mut self) -> bool {
        let Some(mino) = self.active.as_mut() else {
            return false;
        };
        for turn in 1..=4 {
            mino.rotate();
            if self.board.can_place(mino, mino.anchor()) {
                return turn < 4;
            }
        }
        false
    }

    /// Drop the active mino as far as it goes and settle it
    pub(crate) fn hard_drop(&mut self) -> StepOutcome {
        let Some(mino) = self.active.as_mut() else {
            return StepOutcome::Ignored;
        };

        let mut anchor = mino.anchor();
        for _ in 0..self.board.height() {
            let next = anchor.step(Direction::Down);
            if !self.board.can_place(mino, next) {
                break;
            }
            anchor = next;
        }
        mino.set_anchor(anchor);

        self.settle()
    }

    /// Move the active mino into the grid, resolve, and spawn the next one
    pub fn settle(&mut self) -> StepOutcome {
        let Some(mino) = self.active.take() else {
            return StepOutcome::Ignored;
        };

        self.board.put_mino(mino, &mut self.events);
        let report = self
            .board
            .resolve(self.config.scroll_rules(), &mut self.rng, &mut self.events);
        if !report.is_quiet() {
            log::debug!("cascade: {:?}", report);
        }

        if self.spawn_next() {
            StepOutcome::Settled(report)
        } else {
            log::info!(
                "episode {} topped out after {} minos",
                self.episode_id,
                self.piece_id
            );
            self.reset();
            self.start();
            StepOutcome::TopOut
        }
    }

    /// Spawn a random mino from the configured pool
    fn spawn_next(&mut self) -> bool {
        let Some(shape) = self.rng.pick(self.config.shape_pool.as_slice()) else {
            return false;
        };
        let unit = self.rng.pick(&UnitKind::ALL).unwrap_or(UnitKind::Default);
        self.spawn(shape, unit)
    }

    /// Spawn a specific mino at the spawn anchor, replacing any active one
    ///
    /// Returns false (and leaves no active mino) if the spawn cells are
    /// blocked.
    pub fn spawn(&mut self, shape: ShapeType, unit: UnitKind) -> bool {
        if let Some(old) = self.active.take() {
            self.board.discard_mino(old);
        }

        let mino = Mino::spawn(
            shape,
            unit,
            self.config.spawn_anchor,
            self.board.blocks_mut(),
            &mut self.rng,
        );
        if !self.board.can_place(&mino, mino.anchor()) {
            self.board.discard_mino(mino);
            return false;
        }

        self.active = Some(mino);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Start a new episode on a fresh board
    ///
    /// The random source keeps running, so episodes differ. Call
    /// [`Session::start`] afterwards to spawn the first mino.
    pub fn reset(&mut self) {
        self.events.push(VisualEvent::GameOverReset);
        self.board.clear();
        self.active = None;
        self.started = false;
        self.piece_id = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.lay_strata();
    }
}
