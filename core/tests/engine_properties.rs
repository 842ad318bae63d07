use std::collections::{BTreeSet, VecDeque};

use minefield_core::*;

const CONFIGS: [(Coord, Coord, CellCount); 6] = [
    (2, 2, 1),
    (2, 2, 3),
    (5, 5, 7),
    (8, 8, 10),
    (16, 30, 99),
    (70, 70, 600),
];

fn seeded_engine(config: GameConfig, seed: u64) -> MinefieldEngine {
    let mut engine = MinefieldEngine::new();
    engine
        .new_game(config, &mut RandomMinefieldGenerator::new(seed))
        .unwrap();
    engine
}

fn all_coords((rows, columns): Coord2) -> impl Iterator<Item = Coord2> {
    (1..=rows).flat_map(move |row| (1..=columns).map(move |col| (row, col)))
}

fn brute_force_count(layout: &MineLayout, (row, col): Coord2) -> u8 {
    let (rows, columns) = layout.size();
    let mut count = 0;
    for r in row.saturating_sub(1).max(1)..=(row + 1).min(rows) {
        for c in col.saturating_sub(1).max(1)..=(col + 1).min(columns) {
            if (r, c) != (row, col) && layout.contains_mine((r, c)) {
                count += 1;
            }
        }
    }
    count
}

/// Zero cells connected to `origin` plus the numbered cells bordering them, never crossing flags.
fn expected_cascade(engine: &MinefieldEngine, origin: Coord2) -> BTreeSet<Coord2> {
    let layout = engine.mine_layout();
    let mut opened = BTreeSet::from([origin]);
    let mut queue = VecDeque::from([origin]);

    while let Some(coords) = queue.pop_front() {
        if layout.adjacent_mine_count(coords) != 0 {
            continue;
        }
        for next in layout.iter_neighbors(coords) {
            if engine.cell_state(next).unwrap() == CellState::Hidden && opened.insert(next) {
                queue.push_back(next);
            }
        }
    }
    opened
}

#[test]
fn generation_places_exact_mine_count() {
    for (rows, columns, mines) in CONFIGS {
        for seed in 0..10 {
            let engine = seeded_engine(GameConfig::new(rows, columns, mines).unwrap(), seed);
            let layout = engine.mine_layout();

            let placed = all_coords(layout.size())
                .filter(|&coords| layout.contains_mine(coords))
                .count();
            assert_eq!(placed, usize::from(mines));
            assert_eq!(
                all_coords(layout.size()).count() - placed,
                usize::from(rows) * usize::from(columns) - usize::from(mines)
            );
        }
    }
}

#[test]
fn neighbor_counts_match_brute_force() {
    for (rows, columns, mines) in CONFIGS {
        for seed in 0..5 {
            let engine = seeded_engine(GameConfig::new(rows, columns, mines).unwrap(), seed);
            let layout = engine.mine_layout();

            for coords in all_coords(layout.size()) {
                assert_eq!(
                    layout.adjacent_mine_count(coords),
                    brute_force_count(layout, coords),
                    "mismatch at {coords:?}"
                );
            }
        }
    }
}

#[test]
fn cascade_opens_exactly_the_connected_region() {
    let config = GameConfig::new(16, 30, 60).unwrap();
    for seed in 0..20 {
        let mut engine = seeded_engine(config, seed);
        let layout = engine.mine_layout().clone();

        // sprinkle a few flags on safe cells so the cascade has to route around them
        for coords in all_coords(layout.size())
            .filter(|&coords| !layout.contains_mine(coords))
            .step_by(37)
        {
            engine.toggle_flag(coords).unwrap();
        }

        let Some(origin) = all_coords(layout.size()).find(|&coords| {
            !layout.contains_mine(coords)
                && layout.adjacent_mine_count(coords) == 0
                && engine.cell_state(coords).unwrap() == CellState::Hidden
        }) else {
            continue;
        };

        let expected = expected_cascade(&engine, origin);
        let before = engine.revealed_count();
        let updates = engine.reveal(origin).unwrap();

        let opened: BTreeSet<_> = all_coords(layout.size())
            .filter(|&coords| engine.cell_state(coords).unwrap() == CellState::Revealed)
            .collect();
        assert_eq!(opened, expected, "seed {seed}");
        assert_eq!(
            usize::from(engine.revealed_count() - before),
            expected.len()
        );
        assert!(opened.iter().all(|&coords| !layout.contains_mine(coords)));

        if engine.status() == GameStatus::Active {
            assert_eq!(updates.len(), expected.len());
        }
        let flags_on_board = engine
            .board()
            .iter()
            .filter(|update| update.tile == Tile::Flagged)
            .count();
        assert_eq!(usize::from(engine.flagged_count()), flags_on_board);
    }
}

#[test]
fn revealing_all_safe_cells_wins_exactly_once() {
    for seed in 0..10 {
        let mut engine = seeded_engine(GameConfig::new(8, 8, 10).unwrap(), seed);
        let layout = engine.mine_layout().clone();

        for coords in all_coords(layout.size()).filter(|&c| !layout.contains_mine(c)) {
            let before = engine.revealed_count();
            let was_hidden = engine.cell_state(coords).unwrap() == CellState::Hidden;
            let updates = engine.reveal(coords).unwrap();

            if !was_hidden {
                assert!(updates.is_empty());
                assert_eq!(engine.revealed_count(), before);
                continue;
            }
            assert!(engine.revealed_count() > before);

            if engine.revealed_count() == layout.safe_cell_count() {
                assert_eq!(engine.status(), GameStatus::Won);
            } else {
                assert_eq!(engine.status(), GameStatus::Active);
            }
        }

        assert_eq!(engine.status(), GameStatus::Won);
        for mine in layout.mine_coords() {
            assert_eq!(engine.tile_at(mine), Ok(Tile::MineExposed));
        }
    }
}

#[test]
fn loss_is_terminal() {
    for seed in 0..10 {
        let mut engine = seeded_engine(GameConfig::new(5, 5, 7).unwrap(), seed);
        let layout = engine.mine_layout().clone();
        let mine = layout.mine_coords()[0];

        let updates = engine.reveal(mine).unwrap();
        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(updates[0], CellUpdate::new(mine, Tile::Mine));
        assert_eq!(updates.len(), 25);

        let finished = engine.clone();
        for coords in all_coords(layout.size()) {
            assert!(engine.reveal(coords).unwrap().is_empty());
            engine.toggle_flag(coords).unwrap();
        }
        assert_eq!(engine, finished);
    }
}

#[test]
fn revealing_a_safe_cell_on_5x5_counts_up() {
    let mut engine = seeded_engine(GameConfig::new(5, 5, 7).unwrap(), 3);
    let layout = engine.mine_layout().clone();
    let safe = all_coords(layout.size())
        .find(|&coords| !layout.contains_mine(coords))
        .unwrap();

    engine.reveal(safe).unwrap();

    assert!(engine.revealed_count() > 0);
    assert_eq!(layout.safe_cell_count(), 18);
}

#[test]
fn full_board_cascade_does_not_overflow_the_stack() {
    let layout = MineLayout::from_mine_coords((70, 70), &[(70, 70)]).unwrap();
    let mut engine = MinefieldEngine::from_layout(layout, WinRule::RevealAllSafe).unwrap();

    let updates = engine.reveal((1, 1)).unwrap();

    assert_eq!(engine.status(), GameStatus::Won);
    assert_eq!(engine.revealed_count(), 4899);
    assert_eq!(updates.len(), 4900);
    assert_eq!(updates.last(), Some(&CellUpdate::new((70, 70), Tile::MineExposed)));
}

#[test]
fn engine_snapshot_survives_json() {
    let mut engine = seeded_engine(GameConfig::new(8, 8, 10).unwrap(), 11);
    engine.toggle_flag((1, 1)).unwrap();

    let json = serde_json::to_string(&engine).unwrap();
    let restored: MinefieldEngine = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, engine);
    assert_eq!(restored.tile_at((1, 1)), Ok(Tile::Flagged));
}
