mod game;
mod input;
mod render;
mod save;
mod texts;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::Env;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use game::Game;
use input::Command;
use save::SaveData;
use texts::Texts;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal sliding-tile merge puzzle")]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 4)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 4)]
    height: usize,

    /// Path to the persistent highscore record
    #[arg(long, value_name = "FILE", default_value = "save.json")]
    save: PathBuf,

    /// Path to the display-string resource
    #[arg(long, value_name = "FILE", default_value = "texts.json")]
    texts: PathBuf,

    /// Log filter, e.g. "info", "debug" (diagnostics go to stderr)
    #[arg(long, default_value = "warn")]
    log: String,
}

/// Restores the terminal on drop, so a panic or early return never leaves
/// the user's shell in raw mode.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)
            .context("entering alternate screen")?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log)).init();

    let texts = Texts::load(&args.texts)?;
    let mut save_data = SaveData::load_or_init(&args.save)?;
    let mut rng = StdRng::from_entropy();
    let mut game = Game::new(args.width, args.height, &mut rng)?;

    {
        let _guard = TerminalGuard::enter()?;
        run(&mut game, &mut save_data, &texts, &args.save, &mut rng)?;
    }

    // final stats land on the regular screen after the alternate screen is gone
    println!("{}", texts.stats);
    println!(" - {}{}", texts.score, game.score);
    println!(" - {}{}", texts.highscore, save_data.highscore);
    println!(" - {}{}", texts.tile_highscore, save_data.tile_highscore);
    Ok(())
}

fn run<R: Rng + ?Sized>(
    game: &mut Game,
    save_data: &mut SaveData,
    texts: &Texts,
    save_path: &Path,
    rng: &mut R,
) -> Result<()> {
    let mut out = io::stdout();
    loop {
        render::draw(&mut out, game, save_data, texts)?;

        let Event::Key(key) = event::read().context("reading input")? else {
            continue;
        };
        let Some(cmd) = input::decode(key) else {
            continue;
        };
        match cmd {
            Command::Shift(dir) => {
                if game.apply_move(dir, rng)? {
                    debug!("moved {:?}, score {}", dir, game.score);
                }
            }
            Command::Reset => game.reset(rng)?,
            Command::ToggleEndless => game.toggle_endless(),
            Command::Quit => return Ok(()),
        }
        game.update_state();
        save_data.update_records(save_path, game.score, game.grid.highest_tile())?;
    }
}
