// --- File: sprites.rs ---
//! Per-frame collision shapes.
//!
//! The masks are generated from simple shapes instead of image files so the core has
//! no asset or graphics dependency. The android has three distinct frames (wings up,
//! level, down) inside a fixed 68x48 envelope; the stick is a full-width cap on a
//! slightly narrower body, and the top stick is its vertical flip.

use crate::constants::*;
use crate::mask::Mask;
use std::sync::LazyLock;

pub struct SpriteSheet {
    pub android: [Mask; ANDROID_FRAME_COUNT],
    pub stick_top: Mask,
    pub stick_bottom: Mask,
}

static SHEET: LazyLock<SpriteSheet> = LazyLock::new(SpriteSheet::generate);

#[inline]
fn in_ellipse(x: u32, y: u32, center: (f32, f32), radii: (f32, f32)) -> bool {
    let dx = (x as f32 + 0.5 - center.0) / radii.0;
    let dy = (y as f32 + 0.5 - center.1) / radii.1;
    dx * dx + dy * dy <= 1.0
}

// Wing ellipse (center, radii) per frame.
const WINGS: [((f32, f32), (f32, f32)); ANDROID_FRAME_COUNT] = [
    ((18.0, 12.0), (12.0, 8.0)), // up
    ((14.0, 26.0), (13.0, 6.0)), // level
    ((18.0, 40.0), (12.0, 7.0)), // down
];

fn android_frame_mask(frame: usize) -> Mask {
    let (wing_center, wing_radii) = WINGS[frame];
    Mask::from_fn(ANDROID_WIDTH, ANDROID_HEIGHT, |x, y| {
        let body = in_ellipse(x, y, (30.0, 26.0), (26.0, 18.0));
        let beak = (54..66).contains(&x) && (22..32).contains(&y);
        body || beak || in_ellipse(x, y, wing_center, wing_radii)
    })
}

fn stick_mask() -> Mask {
    Mask::from_fn(STICK_WIDTH, STICK_HEIGHT, |x, y| {
        y < STICK_CAP_HEIGHT || (STICK_BODY_INSET..STICK_WIDTH - STICK_BODY_INSET).contains(&x)
    })
}

impl SpriteSheet {
    fn generate() -> Self {
        let stick_bottom = stick_mask();
        let stick_top = stick_bottom.flipped_vertical();
        log::debug!(
            "Generated sprite masks: android {}x{}, stick {}x{}",
            ANDROID_WIDTH,
            ANDROID_HEIGHT,
            STICK_WIDTH,
            STICK_HEIGHT
        );
        Self {
            android: std::array::from_fn(android_frame_mask),
            stick_top,
            stick_bottom,
        }
    }
}

pub fn sheet() -> &'static SpriteSheet {
    &SHEET
}

/// Collision mask for an android animation frame. Frames past the table wrap.
pub fn android_frame(frame: usize) -> &'static Mask {
    &SHEET.android[frame % ANDROID_FRAME_COUNT]
}

pub fn stick_top() -> &'static Mask {
    &SHEET.stick_top
}

pub fn stick_bottom() -> &'static Mask {
    &SHEET.stick_bottom
}
