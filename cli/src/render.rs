use std::fmt::Write;

use minefield_core::{GameStatus, MinefieldEngine, Tile};

/// One character per display category.
///
/// Unflagged mines look different after a win (missed) than after a loss.
pub fn glyph(tile: Tile, status: GameStatus) -> char {
    match tile {
        Tile::Hidden => '#',
        Tile::Flagged => 'F',
        Tile::Empty => '.',
        Tile::Danger(count) => char::from(b'0' + count.min(8)),
        Tile::Mine => '*',
        Tile::MineExposed if status == GameStatus::Won => 'o',
        Tile::MineExposed => 'x',
        Tile::FlagIncorrect => '!',
        Tile::FlagCorrect => '+',
    }
}

/// Board with a column ruler on top and row numbers on the left.
pub fn render_board(engine: &MinefieldEngine) -> String {
    let (rows, columns) = engine.size();
    let status = engine.status();
    let mut out = String::new();

    out.push_str("   ");
    for col in 1..=columns {
        out.push(char::from(b'0' + col % 10));
    }
    out.push('\n');

    for update in engine.board() {
        let (row, col) = update.coords;
        if col == 1 {
            let _ = write!(out, "{row:>2} ");
        }
        out.push(glyph(update.tile, status));
        if col == columns {
            out.push('\n');
        }
    }

    let _ = write!(
        out,
        "{}x{}, mines left: {}, revealed: {}",
        rows,
        columns,
        engine.mines_left(),
        engine.revealed_count()
    );
    out
}
