use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use minefield_core::{
    Board, CellCount, Coord, GameConfig, Graphics, Outcome, RejectionSampler, RevealRule,
    ScreenCoord, ScreenPos, TILE_SIZE,
};

use canvas::TextCanvas;
use command::{Command, MouseButton};

mod canvas;
mod command;
mod logger;

/// Tiles of empty screen kept around the board on each side.
const MARGIN_TILES: ScreenCoord = 2;

#[derive(Parser, Debug)]
#[command(version, about = "Minefield in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in tiles
    #[arg(long, default_value_t = GameConfig::REFERENCE_SIZE.0)]
    width: Coord,

    /// Board height in tiles
    #[arg(long, default_value_t = GameConfig::REFERENCE_SIZE.1)]
    height: Coord,

    /// How many mines to hide
    #[arg(short, long, default_value_t = GameConfig::REFERENCE_MINES)]
    mines: CellCount,

    /// Force a seed for the first game instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keep flooding through connected empty tiles instead of stopping after one ring
    #[arg(long)]
    cascade: bool,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let reveal_rule = if self.cascade {
            RevealRule::Cascade
        } else {
            RevealRule::OneLevel
        };
        let config = GameConfig::new((self.width, self.height), self.mines)
            .context("invalid board settings")?;
        Ok(config.with_reveal_rule(reveal_rule))
    }
}

struct Session {
    config: GameConfig,
    board: Board,
    canvas: TextCanvas,
    games: u32,
}

impl Session {
    fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let (width, height) = config.size;
        let screen_width = (ScreenCoord::from(width) + 2 * MARGIN_TILES) * TILE_SIZE;
        let screen_height = (ScreenCoord::from(height) + 2 * MARGIN_TILES) * TILE_SIZE;
        let canvas = TextCanvas::new(screen_width, screen_height);
        let board = Self::new_board(config, (screen_width / 2, screen_height / 2), seed)?;
        Ok(Self {
            config,
            board,
            canvas,
            games: 1,
        })
    }

    fn new_board(config: GameConfig, center: ScreenPos, seed: Option<u64>) -> Result<Board> {
        let generator = seed.map_or_else(RejectionSampler::from_entropy, RejectionSampler::new);
        log::info!("New game, seed {}", generator.seed());
        Ok(Board::with_generator(generator, config, center)?)
    }

    fn restart(&mut self) -> Result<()> {
        let (width, height) = self.canvas_size();
        self.board = Self::new_board(self.config, (width / 2, height / 2), None)?;
        self.games += 1;
        Ok(())
    }

    fn canvas_size(&self) -> (ScreenCoord, ScreenCoord) {
        self.canvas.screen_size()
    }

    fn redraw(&mut self, out: &mut impl Write) -> Result<()> {
        self.canvas.clear();
        self.board.draw(&mut self.canvas);
        let status = match self.board.outcome() {
            Outcome::Undecided => format!(
                "game {}, mines left: {}",
                self.games,
                self.board.mines_left()
            ),
            Outcome::Won => format!("game {}: every mine flagged, you win", self.games),
            Outcome::Lost => format!("game {}: boom, you lose", self.games),
        };
        write!(out, "{}{}\n> ", self.canvas.render(), status)?;
        out.flush()?;
        Ok(())
    }

    /// Returns `false` once the player wants to quit.
    fn handle(&mut self, command: Command) -> Result<bool> {
        let click = match command {
            Command::Quit => return Ok(false),
            Command::Help => {
                println!("{}", command::HELP);
                return Ok(true);
            }
            Command::NewGame => {
                self.restart()?;
                return Ok(true);
            }
            Command::Reveal(coords) => {
                command::click_on_tile(&self.board, coords, MouseButton::Left)?
            }
            Command::Flag(coords) => {
                command::click_on_tile(&self.board, coords, MouseButton::Right)?
            }
            Command::Click(click) => click,
        };

        let before = self.board.outcome();
        let outcome = command::dispatch(&mut self.board, click);
        if !outcome.has_update() {
            log::debug!("{:?} changed nothing", command);
        }
        let after = self.board.outcome();
        if before != after {
            log::info!("Game {} ended: {:?}", self.games, after);
        }
        Ok(true)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose.log_level_filter())?;
    log::debug!("args: {:?}", args);

    let config = args.game_config()?;
    let mut session = Session::new(config, args.seed)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    println!("{}", command::HELP);
    session.redraw(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("could not read input")?;
        if line.trim().is_empty() {
            session.redraw(&mut stdout)?;
            continue;
        }
        match Command::parse(&line).and_then(|command| session.handle(command)) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                log::warn!("{:#}", err);
                writeln!(stdout, "error: {err:#}")?;
            }
        }
        session.redraw(&mut stdout)?;
    }

    Ok(())
}
