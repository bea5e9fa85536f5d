pub mod ai;
pub mod constants;
pub mod entity;
pub mod food;
pub mod math;
pub mod room;
pub mod rules;
pub mod schedule;
pub mod snapshot;
pub mod spatial;
pub mod types;
pub mod world;
