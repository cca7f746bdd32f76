// --- File: constants.rs ---
// --- Global Simulation Constants ---
// Physics and world geometry are fixed; only run settings live in config.rs.

// --- World Geometry ---
pub const GROUND_Y: f32 = 630.0;
pub const GROUND_TILE_WIDTH: f32 = 672.0; // Floor strip image width (scaled 2x)

pub const ANDROID_START_X: f32 = 230.0;
pub const ANDROID_START_Y: f32 = 350.0;
pub const ANDROID_WIDTH: u32 = 68;
pub const ANDROID_HEIGHT: u32 = 48;

pub const STICK_WIDTH: u32 = 104;
pub const STICK_HEIGHT: u32 = 640;
pub const STICK_CAP_HEIGHT: u32 = 48;
pub const STICK_BODY_INSET: u32 = 4;

pub const FIRST_PIPE_X: f32 = 600.0;
pub const SPAWN_PIPE_X: f32 = 500.0;

// --- Android Physics ---
pub const JUMP_VELOCITY: f32 = -10.5;
pub const GRAVITY: f32 = 1.5;
pub const TERMINAL_DISPLACEMENT: f32 = 16.0;
pub const RISE_CORRECTION: f32 = 2.0; // Subtracted from any upward displacement

// --- Android Animation ---
pub const ANIMATION_TIME: u32 = 5; // Ticks per animation frame
pub const ANDROID_FRAME_COUNT: usize = 3;

// --- Scrolling ---
pub const PIPE_GAP: i32 = 200;
pub const PIPE_VELOCITY: f32 = 5.0;
pub const GROUND_VELOCITY: f32 = 5.0;
pub const GAP_RANGE_MIN: i32 = 50;
pub const GAP_RANGE_MAX: i32 = 450; // Exclusive

// --- Fitness Signals ---
pub const SURVIVAL_BONUS: f64 = 0.1;
pub const PASS_BONUS: f64 = 5.0;
pub const COLLISION_PENALTY: f64 = 1.0;
pub const JUMP_THRESHOLD: f32 = 0.5;

// --- Driver ---
pub const TICKS_PER_SECOND: u32 = 30;
pub const FIXED_TIMESTEP: f64 = 1.0 / TICKS_PER_SECOND as f64;

// --- End of File: constants.rs ---
