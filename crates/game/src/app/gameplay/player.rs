use tank_engine::{Graphics, InputState, Key, Point, Rect, Texture};

use crate::app::assets::Assets;

const TANK_TEXTURE: &str = "res/tank.png";
const TANK_SIZE: i32 = 60;
const START_HEALTH: u8 = 100;
const SPAWN: Point = Point::new(100, 100);

/// The player's tank. Moves one pixel per tick for each held arrow key.
#[derive(Debug)]
pub(crate) struct Player {
    x: i32,
    y: i32,
    /// Degrees, clockwise.
    heading: f64,
    health: u8,
    texture: Texture,
}

impl Player {
    pub(crate) fn create(gfx: &mut dyn Graphics, assets: &mut Assets) -> Self {
        let texture =
            assets.load_or_placeholder(gfx, TANK_TEXTURE, TANK_SIZE as u32, TANK_SIZE as u32);
        Self {
            x: SPAWN.x,
            y: SPAWN.y,
            heading: 0.0,
            health: START_HEALTH,
            texture,
        }
    }

    pub(crate) fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub(crate) fn health(&self) -> u8 {
        self.health
    }

    pub(crate) fn move_to(&mut self, point: Point) {
        self.x = point.x;
        self.y = point.y;
    }

    pub(crate) fn tick(&mut self, input: &InputState) {
        if input.is_key_down(Key::Up) {
            self.y -= 1;
        }
        if input.is_key_down(Key::Down) {
            self.y += 1;
        }
        if input.is_key_down(Key::Right) {
            self.x += 1;
        }
        if input.is_key_down(Key::Left) {
            self.x -= 1;
        }
    }

    pub(crate) fn render(&self, gfx: &mut dyn Graphics) {
        gfx.draw_textured_rect(
            &self.texture,
            None,
            Rect::new(self.x, self.y, TANK_SIZE, TANK_SIZE),
            self.heading,
        );
    }

    pub(crate) fn destroy(self, gfx: &mut dyn Graphics) {
        gfx.release(self.texture);
    }
}
