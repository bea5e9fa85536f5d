pub const WORLD_WIDTH: f64 = 10_000.0;
pub const WORLD_HEIGHT: f64 = 10_000.0;
pub const SPAWN_MARGIN: f64 = 500.0;

pub const MAX_FOOD: usize = 500;
pub const HARMFUL_FOOD_CHANCE: f64 = 0.1;
pub const FOOD_PICKUP_RADIUS: f64 = 20.0;

pub const PLAYER_SPEED: f64 = 100.0;
pub const SEGMENT_DISTANCE: f64 = 20.0;
pub const COLLISION_RADIUS: f64 = 15.0;
pub const MIN_INTENT_MAGNITUDE: f64 = 1e-9;
pub const PLAYER_SELF_COLLISION_SKIP: usize = 4;
pub const AI_SELF_COLLISION_SKIP: usize = 8;

pub const BOOST_MULTIPLIER: f64 = 1.5;
pub const BOOST_DURATION_MS: i64 = 2000;

pub const AI_COUNT: usize = 20;
pub const AI_BASE_SPEED: f64 = 80.0;
pub const AI_SPEED_JITTER: f64 = 30.0;
pub const AI_BASE_INTELLIGENCE: f64 = 0.7;
pub const AI_INTELLIGENCE_JITTER: f64 = 0.3;
pub const AI_WANDER_CHANCE_SCALE: f64 = 0.1;
pub const AI_FOOD_SIGHT_RADIUS: f64 = 300.0;
pub const AI_HUNT_RADIUS: f64 = 200.0;
pub const AI_MIN_SEGMENTS: usize = 3;
pub const AI_EXTRA_SEGMENTS_MAX: usize = 10;

pub const PLAYER_RESPAWN_MS: i64 = 3000;
pub const AI_RESPAWN_MS: i64 = 5000;

/// Fixed simulation step. The wall-clock cadence is slightly slower, so
/// simulation time lags real time rather than racing ahead of it.
pub const TICK_MS: i64 = 16;
pub const TICKS_PER_SECOND: u64 = 60;
pub const SUMMARY_LOG_EVERY_TICKS: u64 = 600;

pub const LEADERBOARD_SIZE: usize = 10;
pub const MAX_PLAYERS_DEFAULT: usize = 50;
