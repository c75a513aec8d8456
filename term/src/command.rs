use anyhow::{Context, Result, anyhow, bail};
use minefield_core::{
    Board, Coord, Coord2, FlagOutcome, RevealOutcome, ScreenCoord, ScreenPos, TILE_SIZE,
};

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum MouseButton {
    Left,
    Right,
}

/// A raw device click, what a windowing layer would hand over.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Click {
    pub pos: ScreenPos,
    pub button: MouseButton,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Click(Click),
    NewGame,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  r X Y          reveal the tile at column X, row Y
  f X Y          flag or unflag the tile at column X, row Y
  c PX PY l|r    raw left/right click at pixel PX, PY
  n              new game
  h              this help
  q              quit";

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("r" | "reveal", [x, y]) => Command::Reveal(parse_coords(x, y)?),
            ("f" | "flag", [x, y]) => Command::Flag(parse_coords(x, y)?),
            ("c" | "click", [x, y, button]) => Command::Click(Click {
                pos: (parse_pixel(x)?, parse_pixel(y)?),
                button: match *button {
                    "l" | "left" => MouseButton::Left,
                    "r" | "right" => MouseButton::Right,
                    other => bail!("unknown mouse button {other:?}"),
                },
            }),
            ("n" | "new", []) => Command::NewGame,
            ("h" | "help" | "?", []) => Command::Help,
            ("q" | "quit", []) => Command::Quit,
            (verb, args) => {
                return Err(anyhow!(
                    "cannot understand {verb:?} with {} arguments",
                    args.len()
                ));
            }
        };
        Ok(command)
    }
}

fn parse_coords(x: &str, y: &str) -> Result<Coord2> {
    let x: Coord = x.parse().with_context(|| format!("bad column {x:?}"))?;
    let y: Coord = y.parse().with_context(|| format!("bad row {y:?}"))?;
    Ok((x, y))
}

fn parse_pixel(value: &str) -> Result<ScreenCoord> {
    value.parse().with_context(|| format!("bad pixel coordinate {value:?}"))
}

/// Click that lands in the middle of the tile at `coords`.
pub(crate) fn click_on_tile(board: &Board, coords: Coord2, button: MouseButton) -> Result<Click> {
    board.validate_coords(coords)?;
    let (x, y) = board.geometry().grid_to_screen(coords);
    Ok(Click {
        pos: (x + TILE_SIZE / 2, y + TILE_SIZE / 2),
        button,
    })
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum ClickOutcome {
    Reveal(RevealOutcome),
    Flag(FlagOutcome),
}

impl ClickOutcome {
    pub(crate) fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Flag(outcome) => outcome.has_update(),
        }
    }
}

/// Left click reveals, right click flags.
pub(crate) fn dispatch(board: &mut Board, click: Click) -> ClickOutcome {
    log::trace!("{:?} click at {:?}", click.button, click.pos);
    match click.button {
        MouseButton::Left => ClickOutcome::Reveal(board.on_reveal_click(click.pos)),
        MouseButton::Right => ClickOutcome::Flag(board.on_flag_click(click.pos)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::{MineLayout, Outcome, RevealRule};

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("r 3 4").unwrap(), Command::Reveal((3, 4)));
        assert_eq!(Command::parse("  flag 0 9 ").unwrap(), Command::Flag((0, 9)));
        assert_eq!(
            Command::parse("c -5 120 r").unwrap(),
            Command::Click(Click {
                pos: (-5, 120),
                button: MouseButton::Right
            })
        );
        assert_eq!(Command::parse("n").unwrap(), Command::NewGame);
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("r 3").is_err());
        assert!(Command::parse("r 3 -1").is_err());
        assert!(Command::parse("r 300 1").is_err());
        assert!(Command::parse("c 1 1 middle").is_err());
        assert!(Command::parse("jump").is_err());
    }

    #[test]
    fn clicks_go_to_the_right_entry_point() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 1)]).unwrap();
        let mut board = Board::from_layout(&layout, RevealRule::OneLevel, (100, 100));

        let flag = click_on_tile(&board, (1, 1), MouseButton::Right).unwrap();
        assert_eq!(dispatch(&mut board, flag), ClickOutcome::Flag(FlagOutcome::Won));
        assert_eq!(board.outcome(), Outcome::Won);

        let reveal = click_on_tile(&board, (0, 0), MouseButton::Left).unwrap();
        let outcome = dispatch(&mut board, reveal);
        assert_eq!(outcome, ClickOutcome::Reveal(RevealOutcome::NoChange));
        assert!(!outcome.has_update());
    }

    #[test]
    fn click_on_tile_checks_coords() {
        let layout = MineLayout::from_mine_coords((2, 2), &[]).unwrap();
        let board = Board::from_layout(&layout, RevealRule::OneLevel, (100, 100));
        assert!(click_on_tile(&board, (2, 0), MouseButton::Left).is_err());
    }
}
