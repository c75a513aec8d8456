use minefield_core::{Color, Graphics, ScreenCoord, ScreenPos, ScreenRect, TILE_SIZE};
use ndarray::Array2;

const BUTTON: char = '#';
const MINE: char = '*';
const RED_MINE: char = 'X';
const FLAG: char = 'F';
const CROSS: char = '/';
const WRONG_FLAG: char = 'x';
const BLANK: char = '.';

/// Character grid standing in for a screen, one cell per tile-sized block of pixels.
pub(crate) struct TextCanvas {
    screen: (ScreenCoord, ScreenCoord),
    cells: Array2<char>,
    border: Option<Color>,
}

impl TextCanvas {
    pub(crate) fn new(width: ScreenCoord, height: ScreenCoord) -> Self {
        let rows = (height / TILE_SIZE) as usize;
        let cols = (width / TILE_SIZE) as usize;
        Self {
            screen: (width, height),
            cells: Array2::from_elem([rows, cols], ' '),
            border: None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(' ');
        self.border = None;
    }

    /// Color of the first rectangle drawn since the last clear, the board draws its border first.
    pub(crate) fn border(&self) -> Option<Color> {
        self.border
    }

    pub(crate) fn cell(&self, (x, y): ScreenPos) -> char {
        self.cells[Self::cell_index((x, y))]
    }

    fn cell_index((x, y): ScreenPos) -> [usize; 2] {
        [(y / TILE_SIZE) as usize, (x / TILE_SIZE) as usize]
    }

    fn put(&mut self, pos: ScreenPos, glyph: char) {
        self.cells[Self::cell_index(pos)] = glyph;
    }

    /// Rows of the canvas that hold something, trailing blanks trimmed.
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        for row in self.cells.rows() {
            let line: String = row.iter().collect();
            let line = line.trim_end();
            if !line.is_empty() {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

impl Graphics for TextCanvas {
    fn screen_size(&self) -> (ScreenCoord, ScreenCoord) {
        self.screen
    }

    fn draw_rect(&mut self, _rect: ScreenRect, color: Color) {
        self.border.get_or_insert(color);
    }

    fn draw_button(&mut self, pos: ScreenPos) {
        self.put(pos, BUTTON);
    }

    fn draw_mine_icon(&mut self, pos: ScreenPos) {
        self.put(pos, MINE);
    }

    fn draw_red_mine_icon(&mut self, pos: ScreenPos) {
        self.put(pos, RED_MINE);
    }

    fn draw_flag_icon(&mut self, pos: ScreenPos) {
        let glyph = if self.cell(pos) == CROSS { WRONG_FLAG } else { FLAG };
        self.put(pos, glyph);
    }

    fn draw_cross_icon(&mut self, pos: ScreenPos) {
        self.put(pos, CROSS);
    }

    fn draw_number_glyph(&mut self, pos: ScreenPos, count: u8) {
        let glyph = match count {
            0 => BLANK,
            n => char::from(b'0' + n),
        };
        self.put(pos, glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::*;

    #[test]
    fn renders_board_glyphs() {
        let layout = MineLayout::from_mine_coords((3, 1), &[(2, 0)]).unwrap();
        let mut board = Board::from_layout(&layout, RevealRule::OneLevel, (48, 24));
        board.reveal_at((0, 0)).unwrap();

        let mut canvas = TextCanvas::new(96, 48);
        board.draw(&mut canvas);

        assert_eq!(canvas.border(), Some(Color::YELLOW));
        assert_eq!(canvas.render(), " .1#\n");
    }

    #[test]
    fn wrong_flag_after_loss() {
        let layout = MineLayout::from_mine_coords((3, 1), &[(0, 0), (2, 0)]).unwrap();
        let mut board = Board::from_layout(&layout, RevealRule::OneLevel, (48, 24));
        board.toggle_flag_at((1, 0)).unwrap();
        board.toggle_flag_at((2, 0)).unwrap();
        board.reveal_at((0, 0)).unwrap();

        let mut canvas = TextCanvas::new(96, 48);
        board.draw(&mut canvas);

        assert_eq!(canvas.border(), Some(Color::RED));
        assert_eq!(canvas.render(), " XxF\n");
    }

    #[test]
    fn clear_resets_everything() {
        let mut canvas = TextCanvas::new(32, 32);
        canvas.draw_button((16, 16));
        canvas.draw_rect(ScreenRect::new(0, 0, 32, 32), Color::GREEN);
        canvas.clear();
        assert_eq!(canvas.render(), "");
        assert_eq!(canvas.border(), None);
    }
}
