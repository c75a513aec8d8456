use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Background behind the tiles.
    pub const BASE: Self = Self::rgb(192, 192, 192);
}

/// Sprite and rectangle primitives the board draws itself with.
///
/// Every sprite is [`TILE_SIZE`] pixels square, positioned by its top-left corner.
pub trait Graphics {
    /// Drawable area in pixels, `(width, height)`.
    fn screen_size(&self) -> (ScreenCoord, ScreenCoord);

    fn draw_rect(&mut self, rect: ScreenRect, color: Color);

    fn draw_button(&mut self, pos: ScreenPos);

    fn draw_mine_icon(&mut self, pos: ScreenPos);

    fn draw_red_mine_icon(&mut self, pos: ScreenPos);

    fn draw_flag_icon(&mut self, pos: ScreenPos);

    fn draw_cross_icon(&mut self, pos: ScreenPos);

    /// `count` is 0..=8, where 0 is a blank revealed tile.
    fn draw_number_glyph(&mut self, pos: ScreenPos, count: u8);
}

/// What a single tile looks like, independent of how it gets drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawDirective {
    Button,
    Mine,
    Flag,
    /// Flag over a mine icon, once the game is lost.
    FlaggedMine,
    /// Flag over a cross, a wrong guess shown once the game is lost.
    CrossedFlag,
    RedMine,
    Number(u8),
}

impl DrawDirective {
    pub fn render<G: Graphics + ?Sized>(self, pos: ScreenPos, gfx: &mut G) {
        use DrawDirective::*;

        let (screen_width, screen_height) = gfx.screen_size();
        let (x, y) = pos;
        assert!(
            x >= 0 && y >= 0 && x + TILE_SIZE <= screen_width && y + TILE_SIZE <= screen_height,
            "tile at {pos:?} does not fit a {screen_width}x{screen_height} screen"
        );

        match self {
            Button => gfx.draw_button(pos),
            Mine => gfx.draw_mine_icon(pos),
            Flag => gfx.draw_flag_icon(pos),
            FlaggedMine => {
                gfx.draw_mine_icon(pos);
                gfx.draw_flag_icon(pos);
            }
            CrossedFlag => {
                gfx.draw_cross_icon(pos);
                gfx.draw_flag_icon(pos);
            }
            RedMine => gfx.draw_red_mine_icon(pos),
            Number(count) => gfx.draw_number_glyph(pos, count),
        }
    }
}

impl Outcome {
    pub const fn border_color(self) -> Color {
        match self {
            Outcome::Undecided => Color::YELLOW,
            Outcome::Won => Color::GREEN,
            Outcome::Lost => Color::RED,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn flag_is_drawn_on_top() {
        let mut gfx = Recorder::new(64, 64);
        DrawDirective::FlaggedMine.render((0, 0), &mut gfx);
        DrawDirective::CrossedFlag.render((16, 0), &mut gfx);
        assert_eq!(
            gfx.calls,
            vec![
                Call::Mine((0, 0)),
                Call::Flag((0, 0)),
                Call::Cross((16, 0)),
                Call::Flag((16, 0)),
            ]
        );
    }

    #[test]
    fn single_layer_directives() {
        let mut gfx = Recorder::new(64, 64);
        DrawDirective::Button.render((0, 0), &mut gfx);
        DrawDirective::RedMine.render((0, 16), &mut gfx);
        DrawDirective::Number(0).render((48, 48), &mut gfx);
        assert_eq!(
            gfx.calls,
            vec![
                Call::Button((0, 0)),
                Call::RedMine((0, 16)),
                Call::Number((48, 48), 0),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn tile_past_screen_edge_panics() {
        let mut gfx = Recorder::new(64, 64);
        DrawDirective::Button.render((49, 0), &mut gfx);
    }

    #[test]
    fn border_colors() {
        assert_eq!(Outcome::Undecided.border_color(), Color::YELLOW);
        assert_eq!(Outcome::Won.border_color(), Color::GREEN);
        assert_eq!(Outcome::Lost.border_color(), Color::RED);
    }
}
