//! Gameplay constants and default tuning parameters.

// --- Play area ---

/// Width of the visible play area (pixels).
pub const CANVAS_WIDTH: f32 = 800.0;

/// Height of the visible play area (pixels).
pub const CANVAS_HEIGHT: f32 = 600.0;

/// Top edge of the game area, below the HUD bar.
pub const GAME_AREA_TOP: f32 = 60.0;

/// Height of the game area, leaving room for the tower selection bar.
pub const GAME_AREA_HEIGHT: f32 = 480.0;

// --- Path ---

/// Horizontal inset of the path loop from the canvas edges.
pub const PATH_INSET_X: f32 = 50.0;

/// Vertical inset of the path loop from the game area edges.
pub const PATH_INSET_Y: f32 = 100.0;

// --- Session defaults ---

pub const STARTING_LIVES: u32 = 3;

pub const STARTING_CURRENCY: u32 = 100;

/// Flat currency bonus granted when a wave is cleared.
pub const WAVE_CLEAR_BONUS: u32 = 50;

/// Delay between announcing a wave and its first spawn (ms).
pub const WAVE_ANNOUNCE_DELAY_MS: f64 = 2000.0;

/// Pause between a cleared wave and the next announcement (ms).
pub const WAVE_BREAK_DELAY_MS: f64 = 2000.0;

/// Fraction of the purchase cost refunded on sale.
pub const SELL_REFUND_RATIO: f32 = 0.7;

/// Lifetime of a transient on-screen notice (ms).
pub const NOTICE_LIFETIME_MS: f64 = 1000.0;

// --- Collision ---

/// Pick radius of a placed tower.
pub const TOWER_RADIUS: f32 = 15.0;

/// Hit radius of an enemy at scale 1.0.
pub const ENEMY_BASE_RADIUS: f32 = 15.0;

pub const PROJECTILE_RADIUS: f32 = 5.0;

/// Projectiles further than this outside the canvas are discarded.
pub const PROJECTILE_BOUNDS_MARGIN: f32 = 50.0;

/// Fallback radius for crediting a hit to a tower near the impact point.
pub const DAMAGE_ATTRIBUTION_RADIUS: f32 = 20.0;
