use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use grid_engine::Move;

/// A decoded player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Shift(Move),
    Reset,
    ToggleEndless,
    Quit,
}

/// Map a raw key event to a command. WASD, vi keys and the arrow keys all
/// move; `r` resets, `c` toggles endless mode, `q`/`Esc`/`Ctrl-C` quit.
/// Key releases and unmapped keys decode to `None`.
pub fn decode(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('w') | KeyCode::Char('k') | KeyCode::Up => Some(Command::Shift(Move::Up)),
        KeyCode::Char('s') | KeyCode::Char('j') | KeyCode::Down => Some(Command::Shift(Move::Down)),
        KeyCode::Char('a') | KeyCode::Char('h') | KeyCode::Left => Some(Command::Shift(Move::Left)),
        KeyCode::Char('d') | KeyCode::Char('l') | KeyCode::Right => {
            Some(Command::Shift(Move::Right))
        }
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('c') => Some(Command::ToggleEndless),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
