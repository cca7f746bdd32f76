// --- File: android.rs ---
use crate::constants::*;
use crate::mask::Mask;
use crate::sprites;
use glam::Vec2;

/// Vertical displacement `t` ticks after the last impulse at `velocity`.
///
/// Falls are capped at the terminal displacement; any upward displacement is pushed a
/// little further up so jumps start crisply.
pub fn displacement(velocity: f32, t: u32) -> f32 {
    let t = t as f32;
    let mut d = velocity * t + GRAVITY * t * t;
    if d >= TERMINAL_DISPLACEMENT {
        d = TERMINAL_DISPLACEMENT;
    }
    if d < 0.0 {
        d -= RISE_CORRECTION;
    }
    d
}

/// A single flying agent. The world scrolls past it; `x` is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Android {
    position: Vec2,
    velocity: f32,
    tick_count: u32,
    // Animation side channel: selects which collision mask is "on screen".
    frame_ticks: u32,
    frame: usize,
}

impl Android {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: 0.0,
            tick_count: 0,
            frame_ticks: 0,
            frame: 0,
        }
    }

    pub fn jump(&mut self) {
        self.velocity = JUMP_VELOCITY;
        self.tick_count = 0;
    }

    pub fn integrate(&mut self) {
        self.tick_count += 1;
        self.position.y += displacement(self.velocity, self.tick_count);
    }

    /// Advances the wing-flap cycle by one displayed tick: frames 0, 1, 2, 1 for
    /// `ANIMATION_TIME` ticks each, then back to 0. On the tick between the last
    /// frame-1 span and the reset the current frame is held.
    pub fn animate(&mut self) {
        self.frame_ticks += 1;
        let count = self.frame_ticks;
        if count < ANIMATION_TIME {
            self.frame = 0;
        } else if count < ANIMATION_TIME * 2 {
            self.frame = 1;
        } else if count < ANIMATION_TIME * 3 {
            self.frame = 2;
        } else if count < ANIMATION_TIME * 4 {
            self.frame = 1;
        } else if count == ANIMATION_TIME * 4 + 1 {
            self.frame = 0;
            self.frame_ticks = 0;
        }
    }

    /// Collision shape of the currently displayed frame.
    pub fn mask(&self) -> &'static Mask {
        sprites::android_frame(self.frame)
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn height(&self) -> f32 {
        self.mask().height() as f32
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn ticks_since_jump(&self) -> u32 {
        self.tick_count
    }
}

impl Default for Android {
    fn default() -> Self {
        Self::new(ANDROID_START_X, ANDROID_START_Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displacement_after_jump() {
        assert_eq!(displacement(JUMP_VELOCITY, 0), 0.0);
        assert_eq!(displacement(JUMP_VELOCITY, 1), -11.0);
        assert_eq!(displacement(JUMP_VELOCITY, 5), -17.0);
        assert_eq!(displacement(JUMP_VELOCITY, 10), 16.0);
    }

    #[test]
    fn test_free_fall_reaches_terminal_displacement() {
        assert_eq!(displacement(0.0, 1), 1.5);
        assert_eq!(displacement(0.0, 3), 13.5);
        assert_eq!(displacement(0.0, 4), 16.0);
        assert_eq!(displacement(0.0, 40), 16.0);
    }

    #[test]
    fn test_jump_resets_tick_count_and_rises() {
        let mut android = Android::default();
        for _ in 0..3 {
            android.integrate();
        }
        assert_eq!(android.ticks_since_jump(), 3);
        let before = android.y();

        android.jump();
        assert_eq!(android.ticks_since_jump(), 0);
        assert_eq!(android.velocity(), JUMP_VELOCITY);
        android.integrate();
        assert_eq!(android.y(), before - 11.0);
        assert_eq!(android.x(), ANDROID_START_X);
    }

    #[test]
    fn test_animation_cycle() {
        let mut android = Android::default();
        assert_eq!(android.frame(), 0);
        let mut frames = Vec::new();
        for _ in 0..(ANIMATION_TIME * 4 + 2) {
            android.animate();
            frames.push(android.frame());
        }
        let t = ANIMATION_TIME as usize;
        assert!(frames[..t - 1].iter().all(|&f| f == 0));
        assert!(frames[t - 1..2 * t - 1].iter().all(|&f| f == 1));
        assert!(frames[2 * t - 1..3 * t - 1].iter().all(|&f| f == 2));
        assert!(frames[3 * t - 1..4 * t - 1].iter().all(|&f| f == 1));
        // Count 20 holds the last frame, count 21 resets to frame 0.
        assert_eq!(frames[4 * t - 1], 1);
        assert_eq!(frames[4 * t], 0);
        // Cycle restarts: counter 1 again.
        assert_eq!(frames[4 * t + 1], 0);
    }

    #[test]
    fn test_mask_follows_frame() {
        let mut android = Android::default();
        let first = android.mask();
        for _ in 0..ANIMATION_TIME {
            android.animate();
        }
        assert_eq!(android.frame(), 1);
        assert_ne!(android.mask(), first);
        assert_eq!(android.height(), ANDROID_HEIGHT as f32);
    }
}
