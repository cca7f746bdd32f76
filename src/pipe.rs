// --- File: pipe.rs ---
use crate::android::Android;
use crate::constants::*;
use crate::sprites;
use glam::IVec2;
use rand::Rng;

/// A pair of sticks with an opening between them.
///
/// `gap_y` is the random draw: the lower edge of the top stick. The bottom stick
/// starts `PIPE_GAP` below it. Both edges are derived from `gap_y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f32,
    gap_y: i32,
    pub passed: bool,
}

impl Pipe {
    pub fn new<R: Rng + ?Sized>(x: f32, rng: &mut R) -> Self {
        Self::with_gap(x, rng.gen_range(GAP_RANGE_MIN..GAP_RANGE_MAX))
    }

    pub fn with_gap(x: f32, gap_y: i32) -> Self {
        Self {
            x,
            gap_y,
            passed: false,
        }
    }

    pub fn gap_y(&self) -> i32 {
        self.gap_y
    }

    /// y of the top stick's upper edge.
    pub fn top(&self) -> i32 {
        self.gap_y - STICK_HEIGHT as i32
    }

    /// y of the bottom stick's upper edge.
    pub fn bottom(&self) -> i32 {
        self.gap_y + PIPE_GAP
    }

    pub fn width(&self) -> f32 {
        STICK_WIDTH as f32
    }

    /// Right edge.
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width()
    }

    pub fn is_off_screen(&self) -> bool {
        self.trailing_edge() < 0.0
    }

    pub fn integrate(&mut self) {
        self.x -= PIPE_VELOCITY;
    }

    /// Pixel-mask test of the android's current frame against both sticks.
    pub fn collides_with(&self, android: &Android) -> bool {
        let android_mask = android.mask();
        let dx = (self.x - android.x()).round() as i32;
        let android_y = android.y().round_ties_even() as i32;

        let top_offset = IVec2::new(dx, self.top() - android_y);
        let bottom_offset = IVec2::new(dx, self.bottom() - android_y);

        android_mask.overlaps(sprites::stick_bottom(), bottom_offset)
            || android_mask.overlaps(sprites::stick_top(), top_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_gap_draw_in_range_and_edges_derived() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let pipe = Pipe::new(SPAWN_PIPE_X, &mut rng);
            assert!((GAP_RANGE_MIN..GAP_RANGE_MAX).contains(&pipe.gap_y()));
            assert_eq!(
                pipe.bottom() - pipe.top(),
                PIPE_GAP + STICK_HEIGHT as i32
            );
            assert!(!pipe.passed);
        }
    }

    #[test]
    fn test_same_seed_same_course() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(Pipe::new(0.0, &mut a), Pipe::new(0.0, &mut b));
        }
    }

    #[test]
    fn test_integrate_scrolls_left() {
        let mut pipe = Pipe::with_gap(FIRST_PIPE_X, 200);
        pipe.integrate();
        pipe.integrate();
        assert_eq!(pipe.x, FIRST_PIPE_X - 2.0 * PIPE_VELOCITY);
    }

    #[test]
    fn test_off_screen_after_trailing_edge_passes_zero() {
        let pipe = Pipe::with_gap(-(STICK_WIDTH as f32), 200);
        assert!(!pipe.is_off_screen());
        let pipe = Pipe::with_gap(-(STICK_WIDTH as f32) - 1.0, 200);
        assert!(pipe.is_off_screen());
    }

    #[test]
    fn test_android_inside_gap_is_clear() {
        let android = Android::new(ANDROID_START_X, 300.0);
        let pipe = Pipe::with_gap(ANDROID_START_X - 10.0, 250);
        assert!(!pipe.collides_with(&android));
    }

    #[test]
    fn test_android_hits_top_and_bottom_sticks() {
        let pipe = Pipe::with_gap(ANDROID_START_X - 10.0, 250);
        let high = Android::new(ANDROID_START_X, 220.0);
        let low = Android::new(ANDROID_START_X, 430.0);
        assert!(pipe.collides_with(&high));
        assert!(pipe.collides_with(&low));
    }

    #[test]
    fn test_far_pipe_never_collides() {
        let pipe = Pipe::with_gap(FIRST_PIPE_X, 60);
        let android = Android::new(ANDROID_START_X, 10.0);
        assert!(!pipe.collides_with(&android));
    }

    fn android_in_frame(y: f32, frame: usize) -> Android {
        let mut android = Android::new(ANDROID_START_X, y);
        while android.frame() != frame {
            android.animate();
        }
        android
    }

    #[test]
    fn test_collision_depends_on_wing_frame() {
        // Cap of the top stick ends at y = 249; only the raised wing reaches rows 4..8.
        let pipe = Pipe::with_gap(ANDROID_START_X - 10.0, 250);
        for y in [242.0, 245.0] {
            let hits: Vec<bool> = (0..ANDROID_FRAME_COUNT)
                .map(|frame| pipe.collides_with(&android_in_frame(y, frame)))
                .collect();
            assert_eq!(hits, vec![true, false, false], "y = {}", y);
        }
        // One row lower the wing clears the cap in every frame.
        assert!((0..ANDROID_FRAME_COUNT).all(|f| !pipe.collides_with(&android_in_frame(246.0, f))));
        // Deeper overlap reaches the body, which every frame shares.
        assert!((0..ANDROID_FRAME_COUNT).all(|f| pipe.collides_with(&android_in_frame(241.0, f))));
    }

    #[test]
    fn test_identical_geometry_gives_identical_result() {
        let a = Pipe::with_gap(200.0, 400);
        let b = Pipe::with_gap(200.0, 400);
        for y in (0..600).step_by(7) {
            let android = Android::new(ANDROID_START_X, y as f32 + 0.5);
            assert_eq!(a.collides_with(&android), b.collides_with(&android));
        }
    }
}
