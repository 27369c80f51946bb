//! Cascade module - resolution after a mino settles
//!
//! One pass of the cascade is:
//!
//! 1. collect complete rows (highest first)
//! 2. break them: unlink, drop strata status, destroy summons
//! 3. walk every summon along route cells
//! 4. let unlinked blocks fall
//! 5. erase the complete rows and compact the columns above
//!
//! Passes repeat until nothing changes. The strata scroll then runs; if it
//! moved the board the passes start over. Rows found in a pass stay pinned
//! (no gravity, no traversal) until step 5 removes them.

use crate::board::Board;
use crate::config::{ScrollGate, ScrollRules};
use crate::rng::Randomizer;
use crate::types::{Direction, Pos, VisualEvent};

/// Summons try their neighbours in this order, first match wins
const SUMMON_PREFERENCE: [Direction; 3] = [Direction::Right, Direction::Left, Direction::Down];

/// What a full cascade did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub passes: usize,
    pub lines_cleared: usize,
    pub blocks_dropped: usize,
    pub summons_consumed: usize,
    pub rows_scrolled: usize,
}

impl CascadeReport {
    /// True if the cascade left the board untouched
    pub fn is_quiet(&self) -> bool {
        self.lines_cleared == 0
            && self.blocks_dropped == 0
            && self.summons_consumed == 0
            && self.rows_scrolled == 0
    }
}

fn is_pending(rows: &[usize], pos: Pos) -> bool {
    pos.y >= 0 && rows.contains(&(pos.y as usize))
}

impl Board {
    /// Upper bound on cascade passes for this board
    pub fn pass_cap(&self) -> usize {
        4 * self.height() + 4
    }

    /// Run the cascade to a fixed point
    pub fn resolve(
        &mut self,
        rules: ScrollRules,
        rng: &mut impl Randomizer,
        events: &mut Vec<VisualEvent>,
    ) -> CascadeReport {
        let mut report = CascadeReport::default();
        let cap = self.pass_cap();

        loop {
            if report.passes >= cap {
                log::warn!("cascade hit the pass cap ({}), stopping", cap);
                break;
            }
            report.passes += 1;

            let rows = self.complete_rows();
            if !rows.is_empty() {
                log::debug!("pass {}: complete rows {:?}", report.passes, rows);
                self.break_rows(&rows, events);
            }

            let consumed = self.traverse_summons(&rows, events);
            let dropped = self.drop_single_blocks(&rows, events);
            report.summons_consumed += consumed;
            report.blocks_dropped += dropped;
            if dropped > 0 {
                log::debug!("pass {}: {} blocks fell", report.passes, dropped);
            }

            if !rows.is_empty() {
                report.blocks_dropped += self.erase_align_lines(&rows, events);
                report.lines_cleared += rows.len();
            }

            if !rows.is_empty() || dropped > 0 || consumed > 0 {
                continue;
            }

            let scrolled = self.scroll_strata(rules, rng, events);
            if scrolled == 0 {
                break;
            }
            report.rows_scrolled += scrolled;
        }

        debug_assert!(self.links_are_symmetric());
        report
    }

    /// Break every block in `rows`
    ///
    /// Blocks stay in place (they are removed by [`Board::erase_align_lines`])
    /// but lose their links and strata status. Summons in these rows are
    /// destroyed.
    pub fn break_rows(&mut self, rows: &[usize], events: &mut Vec<VisualEvent>) {
        for &y in rows {
            for x in 0..self.width() {
                let pos = Pos::new(x as i32, y as i32);
                let Some(id) = self.block_id(pos) else {
                    continue;
                };
                self.blocks_mut().unlink_all(id);
                let summon = self.block_mut(pos).and_then(|block| {
                    block.is_strata = false;
                    block.summon.take()
                });
                events.push(VisualEvent::BlockCleared { cell: pos });
                if let Some(id) = summon {
                    events.push(VisualEvent::SummonRemoved { id });
                }
            }
        }
    }

    /// Walk every summon on the board, bottom-up and left to right
    ///
    /// Blocks in `pending` rows cannot be walked onto. Returns the number of
    /// summons consumed.
    pub fn traverse_summons(&mut self, pending: &[usize], events: &mut Vec<VisualEvent>) -> usize {
        let starts: Vec<_> = self
            .occupied()
            .filter_map(|(pos, id)| {
                let summon = self.blocks().get(id)?.summon?;
                Some((pos, id, summon))
            })
            .collect();

        let mut consumed = 0;
        for (pos, id, summon) in starts {
            // An earlier walk may have destroyed this host.
            let intact = self.block_id(pos) == Some(id)
                && self.block(pos).and_then(|b| b.summon) == Some(summon);
            if intact && self.walk_summon(pos, pending, events) {
                consumed += 1;
            }
        }
        consumed
    }

    /// Walk the summon at `start` until it runs out of route
    ///
    /// Returns true if the summon took at least one step (and was therefore
    /// consumed). A summon with nowhere to go is left as it is.
    pub fn walk_summon(
        &mut self,
        start: Pos,
        pending: &[usize],
        events: &mut Vec<VisualEvent>,
    ) -> bool {
        let Some(summon) = self.block(start).and_then(|b| b.summon) else {
            return false;
        };

        let mut current = start;
        let mut steps = 0;
        while let Some(next) = self.next_route_cell(current, pending) {
            if let Some(block) = self.block_mut(current) {
                block.summon = None;
            }
            if let Some(block) = self.block_mut(next) {
                block.summon = Some(summon);
            }
            events.push(VisualEvent::SummonMoved {
                id: summon,
                from: current,
                to: next,
            });
            self.destroy_cell(current, events);
            self.shatter(current);
            current = next;
            steps += 1;
        }

        if steps == 0 {
            return false;
        }

        self.destroy_cell(current, events);
        self.shatter(current);
        events.push(VisualEvent::SummonRemoved { id: summon });
        log::debug!("summon {:?} walked {} steps to {:?}", summon, steps, current);
        true
    }

    fn next_route_cell(&self, from: Pos, pending: &[usize]) -> Option<Pos> {
        SUMMON_PREFERENCE.iter().map(|&dir| from.step(dir)).find(|&pos| {
            !is_pending(pending, pos)
                && self
                    .block(pos)
                    .is_some_and(|b| b.is_route && b.summon.is_none())
        })
    }

    fn destroy_cell(&mut self, pos: Pos, events: &mut Vec<VisualEvent>) {
        if self.remove_block(pos).is_some() {
            events.push(VisualEvent::BlockCleared { cell: pos });
        }
    }

    /// Cut the neighbours of `center` loose, except route and summon blocks
    fn shatter(&mut self, center: Pos) {
        for dir in Direction::ALL {
            let pos = center.step(dir);
            let Some(id) = self.block_id(pos) else {
                continue;
            };
            let keep = self
                .blocks()
                .get(id)
                .is_some_and(|b| b.is_route || b.summon.is_some());
            if !keep {
                self.blocks_mut().unlink_all(id);
            }
        }
    }

    /// Let every loose block fall as far as it can
    ///
    /// A block falls if it is not strata and has no links. Columns are handled
    /// bottom-up so stacks settle in one call. Blocks in `pinned` rows do not
    /// move. Returns the number of blocks that moved.
    pub fn drop_single_blocks(&mut self, pinned: &[usize], events: &mut Vec<VisualEvent>) -> usize {
        let mut moved = 0;
        for x in 0..self.width() as i32 {
            for y in 1..self.height() as i32 {
                let from = Pos::new(x, y);
                if is_pending(pinned, from) {
                    continue;
                }
                let loose = self
                    .block(from)
                    .is_some_and(|b| !b.is_strata && !b.is_part_of_cluster());
                if !loose {
                    continue;
                }

                let mut to = from;
                while to.y > 0 && !self.is_occupied(to.step(Direction::Down)) {
                    to = to.step(Direction::Down);
                }
                if to != from && self.move_block(from, to) {
                    events.push(VisualEvent::BlockDropped { from, to });
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Remove `rows` and slide everything above each one down a row
    ///
    /// Rows are handled highest first so lower indices stay valid. Returns
    /// the number of blocks shifted.
    pub fn erase_align_lines(&mut self, rows: &[usize], events: &mut Vec<VisualEvent>) -> usize {
        let mut rows = rows.to_vec();
        rows.sort_unstable_by(|a, b| b.cmp(a));
        rows.dedup();

        let mut shifted = 0;
        for y in rows {
            for x in 0..self.width() as i32 {
                self.remove_block(Pos::new(x, y as i32));
            }
            for above in (y + 1)..self.height() {
                for x in 0..self.width() as i32 {
                    let from = Pos::new(x, above as i32);
                    let to = Pos::new(x, above as i32 - 1);
                    if self.move_block(from, to) {
                        events.push(VisualEvent::BlockDropped { from, to });
                        shifted += 1;
                    }
                }
            }
        }
        shifted
    }

    /// Keep the strata surface at or above the configured minimum
    ///
    /// When the top-most strata row sits below the minimum, the whole board
    /// moves up by the difference and fresh strata rows fill the bottom.
    /// Blocks pushed past the top are destroyed. Returns the number of rows
    /// scrolled; 0 means nothing happened.
    pub fn scroll_strata(
        &mut self,
        rules: ScrollRules,
        rng: &mut impl Randomizer,
        events: &mut Vec<VisualEvent>,
    ) -> usize {
        let Some(surface) = self.highest_strata() else {
            return 0;
        };
        if surface >= rules.min_height_strata {
            return 0;
        }
        if rules.gate == ScrollGate::DeferWhileSummoned && self.has_summon() {
            log::debug!("strata scroll deferred, a summon is on the board");
            return 0;
        }

        let height = self.height();
        let diff = (rules.min_height_strata - surface).min(height);
        log::debug!("strata surface at {}, scrolling {} rows", surface, diff);

        for y in (height - diff)..height {
            for x in 0..self.width() as i32 {
                let pos = Pos::new(x, y as i32);
                if let Some(block) = self.remove_block(pos) {
                    events.push(VisualEvent::BlockCleared { cell: pos });
                    if let Some(id) = block.summon {
                        events.push(VisualEvent::SummonRemoved { id });
                    }
                }
            }
        }

        for y in (0..height - diff).rev() {
            for x in 0..self.width() as i32 {
                self.move_block(Pos::new(x, y as i32), Pos::new(x, (y + diff) as i32));
            }
        }

        events.push(VisualEvent::BoardScrolled { rows: diff });
        for y in 0..diff {
            self.fill_strata_row(y, rng, events);
        }
        diff
    }
}
