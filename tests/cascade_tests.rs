//! Cascade tests - multi-phase resolution on hand-built boards

use digris::core::{Block, Board, Mino, Randomizer, ScrollRules, SimpleRng};
use digris::types::{Pos, ShapeType, UnitKind, VisualEvent};

fn rules() -> ScrollRules {
    ScrollRules::default()
}

#[test]
fn test_filling_last_cell_clears_row_in_same_pass() {
    let mut board = Board::new(10, 17);
    let mut rng = SimpleRng::new(1);
    for x in 0..9 {
        board.place_block(Pos::new(x, 0), Block::plain());
    }
    board.place_block(Pos::new(0, 1), Block::plain());
    board.place_block(Pos::new(1, 1), Block::plain());
    board.link_cells(Pos::new(0, 1), Pos::new(1, 1));

    // Vertical bar filling (9, 0)..(9, 3).
    let mut bar = Mino::spawn(
        ShapeType::A,
        UnitKind::Default,
        Pos::new(9, 2),
        board.blocks_mut(),
        &mut rng,
    );
    bar.rotate();
    assert!(board.can_place(&bar, Pos::new(9, 2)));

    let mut events = Vec::new();
    board.put_mino(bar, &mut events);
    events.clear();
    let report = board.resolve(rules(), &mut rng, &mut events);

    assert_eq!(report.lines_cleared, 1);
    assert!(report.passes <= board.height());

    // The first ten events break row 0, before anything moves.
    for (x, event) in events.iter().take(10).enumerate() {
        assert_eq!(
            *event,
            VisualEvent::BlockCleared {
                cell: Pos::new(x as i32, 0)
            }
        );
    }

    // Everything above row 0 moved down by exactly one.
    assert!(board.is_occupied(Pos::new(0, 0)));
    assert!(board.is_occupied(Pos::new(1, 0)));
    for y in 0..3 {
        assert!(board.is_occupied(Pos::new(9, y)), "(9, {})", y);
    }
    assert!(!board.is_occupied(Pos::new(9, 3)));
    assert_eq!(board.blocks().len(), 5);
    assert!(board.links_are_symmetric());
}

#[test]
fn test_summon_walk_frees_neighbours_to_fall() {
    let mut board = Board::new(10, 17);
    let mut rng = SimpleRng::new(1);
    let summon = board.blocks_mut().new_summon();
    board.place_block(Pos::new(2, 0), Block::with_summon(summon));
    board.place_block(Pos::new(3, 0), Block::route());
    board.place_block(Pos::new(4, 0), Block::route());
    board.link_cells(Pos::new(3, 0), Pos::new(4, 0));
    board.place_block(Pos::new(3, 1), Block::plain());
    board.place_block(Pos::new(3, 2), Block::plain());
    board.link_cells(Pos::new(3, 1), Pos::new(3, 2));

    let mut events = Vec::new();
    let report = board.resolve(rules(), &mut rng, &mut events);

    assert_eq!(report.summons_consumed, 1);
    assert_eq!(report.blocks_dropped, 2);
    assert!(events.contains(&VisualEvent::SummonRemoved { id: summon }));
    assert!(board.is_occupied(Pos::new(3, 0)));
    assert!(board.is_occupied(Pos::new(3, 1)));
    assert!(!board.is_occupied(Pos::new(3, 2)));
    assert!(!board.is_occupied(Pos::new(2, 0)));
    assert!(!board.is_occupied(Pos::new(4, 0)));
}

#[test]
fn test_summon_prefers_right_over_down() {
    let mut board = Board::new(10, 17);
    let summon = board.blocks_mut().new_summon();
    board.place_block(Pos::new(5, 5), Block::with_summon(summon));
    board.place_block(Pos::new(6, 5), Block::route());
    board.place_block(Pos::new(5, 4), Block::route());

    let mut events = Vec::new();
    board.traverse_summons(&[], &mut events);

    assert_eq!(
        events[0],
        VisualEvent::SummonMoved {
            id: summon,
            from: Pos::new(5, 5),
            to: Pos::new(6, 5)
        }
    );
    assert!(board.is_occupied(Pos::new(5, 4)));
}

#[test]
fn test_summon_prefers_left_over_down() {
    let mut board = Board::new(10, 17);
    let summon = board.blocks_mut().new_summon();
    board.place_block(Pos::new(5, 5), Block::with_summon(summon));
    board.place_block(Pos::new(4, 5), Block::route());
    board.place_block(Pos::new(5, 4), Block::route());

    let mut events = Vec::new();
    board.traverse_summons(&[], &mut events);

    assert_eq!(
        events[0],
        VisualEvent::SummonMoved {
            id: summon,
            from: Pos::new(5, 5),
            to: Pos::new(4, 5)
        }
    );
    assert!(board.is_occupied(Pos::new(5, 4)));
    assert!(!events.iter().any(|e| matches!(
        e,
        VisualEvent::SummonMoved { to, .. } if *to == Pos::new(5, 4)
    )));
}

#[test]
fn test_high_strata_surface_does_not_scroll() {
    let mut board = Board::new(10, 17);
    let mut rng = SimpleRng::new(1);
    for x in 0..9 {
        board.place_block(Pos::new(x, 10), Block::strata());
    }

    let mut events = Vec::new();
    let report = board.resolve(rules(), &mut rng, &mut events);
    assert_eq!(report.rows_scrolled, 0);
    assert!(events.is_empty());
    assert_eq!(board.highest_strata(), Some(10));
}

#[test]
fn test_low_strata_surface_scrolls_up_to_minimum() {
    let mut board = Board::new(10, 17);
    let mut rng = SimpleRng::new(4);
    for x in 1..10 {
        board.place_block(Pos::new(x, 0), Block::strata());
    }

    let mut events = Vec::new();
    let report = board.resolve(rules(), &mut rng, &mut events);
    assert_eq!(report.rows_scrolled, 4);
    assert_eq!(board.highest_strata(), Some(4));
    assert!(events.contains(&VisualEvent::BoardScrolled { rows: 4 }));
}

#[test]
fn test_random_boards_settle_to_fixed_point() {
    let mut rng = SimpleRng::new(2024);
    for _ in 0..50 {
        let mut board = Board::new(6, 12);
        for y in 0..12 {
            for x in 0..6 {
                let block = match rng.next_range(6) {
                    0 => Block::strata(),
                    1 => Block::route(),
                    2 | 3 => Block::plain(),
                    _ => continue,
                };
                board.place_block(Pos::new(x, y), block);
            }
        }
        for y in 0..12 {
            for x in 0..5 {
                if rng.next_range(2) == 0 {
                    board.link_cells(Pos::new(x, y), Pos::new(x + 1, y));
                }
            }
        }
        let summon = board.blocks_mut().new_summon();
        if let Some(block) = board.block_mut(Pos::new(2, 11)) {
            block.summon = Some(summon);
        }

        let mut events = Vec::new();
        let report = board.resolve(rules(), &mut rng, &mut events);

        assert!(report.passes <= board.pass_cap());
        assert!(board.links_are_symmetric());
        assert!(board.complete_rows().is_empty());
        let mut again = Vec::new();
        assert_eq!(board.drop_single_blocks(&[], &mut again), 0);
        if let Some(surface) = board.highest_strata() {
            assert!(surface >= 4);
        }
    }
}
