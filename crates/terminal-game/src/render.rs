use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use grid_engine::Grid;

use crate::game::{Game, GameState};
use crate::save::SaveData;
use crate::texts::Texts;

/// Top-left corner of the grid on screen, (column, row).
const GRID_POS: (i32, i32) = (13, 4);
/// On-screen footprint of one cell, (columns, rows).
const CELL_SIZE: (i32, i32) = (6, 2);

/// Draw one full frame: grid, labels and any state banner. Everything is
/// clipped against the current terminal size; drawing outside the visible
/// area is a silent no-op, so tiny terminals degrade instead of failing.
pub fn draw(out: &mut impl Write, game: &Game, save: &SaveData, texts: &Texts) -> io::Result<()> {
    let bounds = terminal::size()?;
    queue!(out, Clear(ClearType::All))?;

    draw_grid(out, &game.grid, texts, bounds)?;

    let grid_cols = game.grid.width() as i32 * CELL_SIZE.0;
    let label_x = GRID_POS.0 + grid_cols + 5;
    let label = |text: &str, value: u64| format!("{}{}", text, value);
    print_clipped(
        out,
        label_x,
        GRID_POS.1 + 1,
        &label(&texts.tile_highscore, save.tile_highscore),
        bounds,
        None,
    )?;
    print_clipped(
        out,
        label_x,
        GRID_POS.1 + 3,
        &label(&texts.highscore, save.highscore),
        bounds,
        None,
    )?;
    print_clipped(
        out,
        label_x,
        GRID_POS.1 + 5,
        &label(&texts.score, game.score),
        bounds,
        None,
    )?;

    let centered = |s: &str| GRID_POS.0 + (grid_cols - s.chars().count() as i32) / 2 - 2;
    print_clipped(out, centered(&texts.info), 1, &texts.info, bounds, None)?;

    let banner_y = GRID_POS.1 + game.grid.height() as i32 * CELL_SIZE.1 + 1;
    match game.state {
        GameState::Lost => {
            print_clipped(
                out,
                centered(&texts.death),
                banner_y,
                &texts.death,
                bounds,
                None,
            )?;
        }
        GameState::Won => {
            for (i, line) in texts.win.iter().enumerate() {
                print_clipped(out, centered(line), banner_y + i as i32, line, bounds, None)?;
            }
        }
        GameState::Active | GameState::Endless => {}
    }

    out.flush()
}

fn draw_grid(
    out: &mut impl Write,
    grid: &Grid,
    texts: &Texts,
    bounds: (u16, u16),
) -> io::Result<()> {
    let cell_width = CELL_SIZE.0 as usize;
    for (x, y, value) in grid.cells() {
        let text = if value > 0 {
            format!("{:<cell_width$}", value)
        } else {
            format!("{:<cell_width$}", texts.empty_tile)
        };
        print_clipped(
            out,
            GRID_POS.0 + x as i32 * CELL_SIZE.0,
            GRID_POS.1 + y as i32 * CELL_SIZE.1,
            &text,
            bounds,
            Some(tile_color(value)),
        )?;
    }
    Ok(())
}

/// Foreground color for a tile, derived from `log2(value)` and clamped to
/// the basic 8-color palette.
fn tile_color(value: u64) -> Color {
    if value == 0 {
        return Color::Reset;
    }
    Color::AnsiValue(value.trailing_zeros().min(7) as u8)
}

/// Queue `text` at `(x, y)`. Negative coordinates are clamped to the edge;
/// anything past the visible area is dropped. Never errors on position.
fn print_clipped(
    out: &mut impl Write,
    x: i32,
    y: i32,
    text: &str,
    bounds: (u16, u16),
    color: Option<Color>,
) -> io::Result<()> {
    let (cols, rows) = (bounds.0 as i32, bounds.1 as i32);
    let x = x.max(0);
    let y = y.max(0);
    if y >= rows || x >= cols || text.is_empty() {
        return Ok(());
    }
    let visible: String = text.chars().take((cols - x) as usize).collect();
    if let Some(color) = color {
        queue!(
            out,
            MoveTo(x as u16, y as u16),
            SetForegroundColor(color),
            Print(visible),
            ResetColor
        )
    } else {
        queue!(out, MoveTo(x as u16, y as u16), Print(visible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_draws_are_no_ops() {
        let bounds = (80, 24);
        let mut buf = Vec::new();
        print_clipped(&mut buf, 0, 24, "below the screen", bounds, None).unwrap();
        assert!(buf.is_empty());
        print_clipped(&mut buf, 80, 0, "past the right edge", bounds, None).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn negative_coordinates_clamp_to_the_edge() {
        let bounds = (80, 24);
        let mut buf = Vec::new();
        print_clipped(&mut buf, -5, -5, "hello", bounds, None).unwrap();
        assert!(!buf.is_empty());
    }

    #[test]
    fn text_is_truncated_at_the_right_edge() {
        let bounds = (10, 24);
        let mut clipped = Vec::new();
        print_clipped(&mut clipped, 8, 0, "abcdef", bounds, None).unwrap();
        let mut full = Vec::new();
        print_clipped(&mut full, 8, 0, "ab", bounds, None).unwrap();
        assert_eq!(clipped, full);
    }

    #[test]
    fn tile_colors_clamp_to_the_basic_palette() {
        assert_eq!(tile_color(0), Color::Reset);
        assert_eq!(tile_color(2), Color::AnsiValue(1));
        assert_eq!(tile_color(8), Color::AnsiValue(3));
        assert_eq!(tile_color(1 << 20), Color::AnsiValue(7));
    }
}
