// --- File: ground.rs ---
use crate::constants::*;

/// Scrolling floor made of two tiles laid end to end.
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    pub y: f32,
    pub x1: f32,
    pub x2: f32,
}

impl Ground {
    pub fn new(y: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: GROUND_TILE_WIDTH,
        }
    }

    pub fn y_position(&self) -> f32 {
        self.y
    }

    pub fn integrate(&mut self) {
        self.x1 -= GROUND_VELOCITY;
        self.x2 -= GROUND_VELOCITY;

        // Each tile is checked on its own; a tile that left the screen goes behind the other.
        if self.x1 + GROUND_TILE_WIDTH < 0.0 {
            self.x1 = self.x2 + GROUND_TILE_WIDTH;
        }
        if self.x2 + GROUND_TILE_WIDTH < 0.0 {
            self.x2 = self.x1 + GROUND_TILE_WIDTH;
        }
    }
}

impl Default for Ground {
    fn default() -> Self {
        Self::new(GROUND_Y)
    }
}
