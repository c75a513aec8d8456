use std::collections::{HashSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Undecided -> Won
/// - Undecided -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Undecided,
    Won,
    Lost,
}

impl Outcome {
    /// Once decided no more moves are accepted
    pub const fn is_decided(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from first click to win or loss.
///
/// Built once per game; start a new game by building a new board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
    geometry: BoardGeometry,
    reveal_rule: RevealRule,
    total_mines: CellCount,
    correctly_flagged_count: CellCount,
    flagged_count: CellCount,
    outcome: Outcome,
}

impl Board {
    /// Board with randomly placed mines, centered on `center`.
    pub fn new(config: GameConfig, center: ScreenPos) -> Result<Self> {
        Self::with_generator(RejectionSampler::from_entropy(), config, center)
    }

    pub fn with_generator<G: MinefieldGenerator>(
        generator: G,
        config: GameConfig,
        center: ScreenPos,
    ) -> Result<Self> {
        let layout = generator.generate(config)?;
        Ok(Self::from_layout(&layout, config.reveal_rule, center))
    }

    pub fn from_layout(layout: &MineLayout, reveal_rule: RevealRule, center: ScreenPos) -> Self {
        let size = layout.size();
        let geometry = BoardGeometry::from_center(center, size);
        let mut board = Self {
            tiles: Array2::default(nd_shape(size)),
            geometry,
            reveal_rule,
            total_mines: layout.mine_count(),
            correctly_flagged_count: 0,
            flagged_count: 0,
            outcome: Outcome::Undecided,
        };

        for pos in geometry.iter_grid() {
            if layout.contains_mine(pos) {
                board.tiles[pos.to_nd_index()].spawn_mine();
            }
        }

        for pos in geometry.iter_grid() {
            let count = board.count_adjacent_mines(pos);
            board.tiles[pos.to_nd_index()].set_adjacent_mine_count(count);
        }

        log::debug!(
            "New {}x{} board with {} mines at {:?}",
            size.0,
            size.1,
            board.total_mines,
            geometry.rect()
        );
        board
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_decided()
    }

    pub fn size(&self) -> Coord2 {
        self.geometry.size()
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn rect(&self) -> ScreenRect {
        self.geometry.rect()
    }

    pub fn reveal_rule(&self) -> RevealRule {
        self.reveal_rule
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn correctly_flagged_count(&self) -> CellCount {
        self.correctly_flagged_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative with too many flags
    pub fn mines_left(&self) -> isize {
        (self.total_mines as isize) - (self.flagged_count as isize)
    }

    pub fn is_on_board(&self, screen_pos: ScreenPos) -> bool {
        self.geometry.contains(screen_pos)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.geometry.contains_grid(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    /// Tile at a row-major index, see [`BoardGeometry::grid_to_index`].
    pub fn tile_by_index(&self, index: usize) -> Tile {
        self.tiles[self.geometry.index_to_grid(index).to_nd_index()]
    }

    pub fn iter_tiles(&self) -> impl Iterator<Item = (Coord2, &Tile)> {
        self.geometry
            .iter_grid()
            .map(|pos| (pos, &self.tiles[pos.to_nd_index()]))
    }

    pub fn directive_at(&self, coords: Coord2) -> Result<DrawDirective> {
        Ok(self.tile_at(coords)?.directive(self.outcome))
    }

    /// Reveal the tile under `screen_pos`.
    ///
    /// Clicks off the board or after the game ended do nothing.
    pub fn on_reveal_click(&mut self, screen_pos: ScreenPos) -> RevealOutcome {
        if self.outcome.is_decided() {
            return RevealOutcome::NoChange;
        }
        let Some(coords) = self.geometry.screen_to_grid(screen_pos) else {
            log::trace!("Reveal click at {:?} is off the board", screen_pos);
            return RevealOutcome::NoChange;
        };
        self.reveal_tile(coords)
    }

    /// Toggle the flag of the tile under `screen_pos`.
    ///
    /// Clicks off the board, on revealed tiles or after the game ended do nothing.
    pub fn on_flag_click(&mut self, screen_pos: ScreenPos) -> FlagOutcome {
        if self.outcome.is_decided() {
            return FlagOutcome::NoChange;
        }
        let Some(coords) = self.geometry.screen_to_grid(screen_pos) else {
            log::trace!("Flag click at {:?} is off the board", screen_pos);
            return FlagOutcome::NoChange;
        };
        self.flag_tile(coords)
    }

    /// Same as [`Board::on_reveal_click`], addressed by grid coordinates.
    pub fn reveal_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.outcome.is_decided() {
            return Ok(RevealOutcome::NoChange);
        }
        Ok(self.reveal_tile(coords))
    }

    /// Same as [`Board::on_flag_click`], addressed by grid coordinates.
    pub fn toggle_flag_at(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.outcome.is_decided() {
            return Ok(FlagOutcome::NoChange);
        }
        Ok(self.flag_tile(coords))
    }

    pub fn draw<G: Graphics + ?Sized>(&self, gfx: &mut G) {
        let rect = self.geometry.rect();
        gfx.draw_rect(rect.expanded(BORDER_WIDTH), self.outcome.border_color());
        gfx.draw_rect(rect, Color::BASE);

        for pos in self.geometry.iter_grid() {
            self.tiles[pos.to_nd_index()]
                .directive(self.outcome)
                .render(self.geometry.grid_to_screen(pos), &mut *gfx);
        }
    }

    fn reveal_tile(&mut self, coords: Coord2) -> RevealOutcome {
        let tile = &mut self.tiles[coords.to_nd_index()];
        if !tile.is_hidden() {
            return RevealOutcome::NoChange;
        }

        tile.reveal();
        if tile.has_mine() {
            log::debug!("Revealed mine at {:?}, game lost", coords);
            self.outcome = Outcome::Lost;
            return RevealOutcome::HitMine;
        }

        let count = tile.adjacent_mine_count();
        log::debug!("Revealed tile at {:?}, mine count: {}", coords, count);
        if count == 0 {
            match self.reveal_rule {
                RevealRule::OneLevel => self.reveal_neighbors(coords),
                RevealRule::Cascade => self.flood_reveal(coords),
            }
        }
        RevealOutcome::Revealed
    }

    /// Reveal the hidden neighbours of `coords` without spreading any further.
    fn reveal_neighbors(&mut self, coords: Coord2) {
        for pos in self.tiles.iter_neighbors(coords) {
            let tile = &mut self.tiles[pos.to_nd_index()];
            if tile.is_hidden() {
                tile.reveal();
                log::trace!("Neighbor revealed at {:?}", pos);
            }
        }
    }

    /// Breadth-first reveal through every connected tile without adjacent mines,
    /// flags stop the flood.
    fn flood_reveal(&mut self, coords: Coord2) {
        let mut visited = HashSet::from([coords]);
        let mut to_visit: VecDeque<_> = self
            .tiles
            .iter_neighbors(coords)
            .filter(|&pos| self.tiles[pos.to_nd_index()].is_hidden())
            .collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            coords,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let tile = &mut self.tiles[visit_coords.to_nd_index()];
            if !tile.is_hidden() {
                log::trace!("Skipping tile at {:?}", visit_coords);
                continue;
            }

            tile.reveal();
            log::trace!(
                "Flood revealed tile at {:?}, mine count: {}",
                visit_coords,
                tile.adjacent_mine_count()
            );

            if tile.has_no_adjacent_mines() {
                to_visit.extend(
                    self.tiles
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.tiles[pos.to_nd_index()].is_hidden())
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn flag_tile(&mut self, coords: Coord2) -> FlagOutcome {
        let tile = &mut self.tiles[coords.to_nd_index()];
        if tile.is_revealed() {
            return FlagOutcome::NoChange;
        }

        tile.toggle_flag();
        let flagged = tile.is_flagged();
        let has_mine = tile.has_mine();

        if flagged {
            self.flagged_count += 1;
            if has_mine {
                self.correctly_flagged_count += 1;
            }
        } else {
            self.flagged_count -= 1;
            if has_mine {
                self.correctly_flagged_count -= 1;
            }
        }
        log::debug!(
            "{} tile at {:?}, correct flags: {}/{}",
            if flagged { "Flagged" } else { "Unflagged" },
            coords,
            self.correctly_flagged_count,
            self.total_mines
        );

        if self.total_mines > 0 && self.flags_match_mines() {
            log::debug!("Every mine flagged, game won");
            self.outcome = Outcome::Won;
            FlagOutcome::Won
        } else {
            FlagOutcome::Changed
        }
    }

    /// Whether the flags sit exactly on the mines, checked against the tiles rather
    /// than the counters.
    fn flags_match_mines(&self) -> bool {
        self.tiles
            .iter()
            .all(|tile| tile.is_flagged() == tile.has_mine())
    }

    fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.tiles
            .iter_neighbors(coords)
            .filter(|&pos| self.tiles[pos.to_nd_index()].has_mine())
            .count() as u8
    }
}
