use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a tile.
///
/// Valid transitions:
/// - Hidden -> Revealed
/// - Hidden -> Flagged
/// - Flagged -> Hidden
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// One cell of the board.
///
/// Transitions that break the state machine are programmer errors and panic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    state: TileState,
    has_mine: bool,
    adjacent_mines: Option<u8>,
}

impl Tile {
    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state == TileState::Hidden
    }

    pub fn is_revealed(&self) -> bool {
        self.state == TileState::Revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.state == TileState::Flagged
    }

    pub fn has_mine(&self) -> bool {
        self.has_mine
    }

    /// Number of mines among the up-to-8 neighbours.
    ///
    /// # Panics
    ///
    /// If called before the board finished setting the count.
    pub fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mines
            .expect("adjacent mine count is set during board setup")
    }

    pub fn has_no_adjacent_mines(&self) -> bool {
        self.adjacent_mine_count() == 0
    }

    pub fn reveal(&mut self) {
        assert_eq!(
            self.state,
            TileState::Hidden,
            "only hidden tiles can be revealed"
        );
        self.state = TileState::Revealed;
    }

    pub fn toggle_flag(&mut self) {
        use TileState::*;
        self.state = match self.state {
            Hidden => Flagged,
            Flagged => Hidden,
            Revealed => panic!("revealed tiles cannot be flagged"),
        };
    }

    pub(crate) fn spawn_mine(&mut self) {
        assert!(!self.has_mine, "tile already holds a mine");
        self.has_mine = true;
    }

    pub(crate) fn set_adjacent_mine_count(&mut self, count: u8) {
        assert!(count <= 8, "a tile has at most 8 neighbours, got {count}");
        assert!(
            self.adjacent_mines.is_none(),
            "adjacent mine count is written once"
        );
        self.adjacent_mines = Some(count);
    }

    /// How this tile should be drawn given the overall game outcome.
    ///
    /// Mines and wrong flags only show once the game is lost.
    pub fn directive(&self, outcome: Outcome) -> DrawDirective {
        use DrawDirective::*;

        let lost = outcome == Outcome::Lost;
        match self.state {
            TileState::Hidden if lost && self.has_mine => Mine,
            TileState::Hidden => Button,
            TileState::Flagged if lost && self.has_mine => FlaggedMine,
            TileState::Flagged if lost => CrossedFlag,
            TileState::Flagged => Flag,
            TileState::Revealed if self.has_mine => RedMine,
            TileState::Revealed => Number(self.adjacent_mine_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(has_mine: bool, count: u8) -> Tile {
        let mut tile = Tile::default();
        if has_mine {
            tile.spawn_mine();
        }
        tile.set_adjacent_mine_count(count);
        tile
    }

    #[test]
    fn starts_hidden_without_count() {
        let tile = Tile::default();
        assert!(tile.is_hidden());
        assert!(!tile.has_mine());
        assert_eq!(tile.adjacent_mines, None);
    }

    #[test]
    fn flag_toggles_back_to_hidden() {
        let mut tile = tile(false, 1);
        tile.toggle_flag();
        assert!(tile.is_flagged());
        tile.toggle_flag();
        assert!(tile.is_hidden());
    }

    #[test]
    fn reveal_is_terminal() {
        let mut tile = tile(false, 3);
        tile.reveal();
        assert!(tile.is_revealed());
        assert_eq!(tile.adjacent_mine_count(), 3);
    }

    #[test]
    #[should_panic(expected = "only hidden tiles can be revealed")]
    fn reveal_flagged_panics() {
        let mut tile = tile(false, 0);
        tile.toggle_flag();
        tile.reveal();
    }

    #[test]
    #[should_panic(expected = "only hidden tiles can be revealed")]
    fn reveal_twice_panics() {
        let mut tile = tile(false, 0);
        tile.reveal();
        tile.reveal();
    }

    #[test]
    #[should_panic(expected = "revealed tiles cannot be flagged")]
    fn flag_revealed_panics() {
        let mut tile = tile(false, 0);
        tile.reveal();
        tile.toggle_flag();
    }

    #[test]
    #[should_panic(expected = "at most 8 neighbours")]
    fn count_out_of_range_panics() {
        Tile::default().set_adjacent_mine_count(9);
    }

    #[test]
    #[should_panic(expected = "written once")]
    fn count_written_twice_panics() {
        tile(false, 2).set_adjacent_mine_count(2);
    }

    #[test]
    #[should_panic(expected = "already holds a mine")]
    fn double_mine_panics() {
        tile(true, 0).spawn_mine();
    }

    #[test]
    fn hidden_directives() {
        assert_eq!(tile(false, 2).directive(Outcome::Undecided), DrawDirective::Button);
        assert_eq!(tile(true, 2).directive(Outcome::Undecided), DrawDirective::Button);
        assert_eq!(tile(true, 2).directive(Outcome::Won), DrawDirective::Button);
        assert_eq!(tile(true, 2).directive(Outcome::Lost), DrawDirective::Mine);
        assert_eq!(tile(false, 2).directive(Outcome::Lost), DrawDirective::Button);
    }

    #[test]
    fn flagged_directives() {
        let mut mined = tile(true, 0);
        mined.toggle_flag();
        let mut safe = tile(false, 0);
        safe.toggle_flag();

        assert_eq!(mined.directive(Outcome::Undecided), DrawDirective::Flag);
        assert_eq!(safe.directive(Outcome::Won), DrawDirective::Flag);
        assert_eq!(mined.directive(Outcome::Lost), DrawDirective::FlaggedMine);
        assert_eq!(safe.directive(Outcome::Lost), DrawDirective::CrossedFlag);
    }

    #[test]
    fn revealed_directives() {
        let mut mined = tile(true, 1);
        mined.reveal();
        let mut safe = tile(false, 4);
        safe.reveal();

        assert_eq!(mined.directive(Outcome::Lost), DrawDirective::RedMine);
        assert_eq!(safe.directive(Outcome::Undecided), DrawDirective::Number(4));
        assert_eq!(safe.directive(Outcome::Lost), DrawDirective::Number(4));
    }
}
