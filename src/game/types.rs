use serde::{Deserialize, Serialize};

pub type EntityId = String;
pub type FoodId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
  Player,
  Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnakeColor {
  pub color: u32,
  pub stroke: u32,
}

/// Tuning knobs rolled once per AI slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
  pub speed: f64,
  pub intelligence: f64,
  pub color: SnakeColor,
}

#[derive(Debug, Clone)]
pub struct Entity {
  pub id: EntityId,
  pub name: String,
  pub kind: EntityKind,
  pub position: Point,
  pub velocity: Point,
  /// `segments[0]` is the head and mirrors `position` after every advance.
  pub segments: Vec<Point>,
  pub score: i64,
  pub alive: bool,
  pub boost_until: Option<i64>,
  pub last_input_at: i64,
  pub ai: Option<AiProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
  Nutritive,
  Harmful,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodItem {
  pub id: FoodId,
  pub x: f64,
  pub y: f64,
  pub kind: FoodKind,
  pub value: i32,
  pub color: u32,
}

impl FoodItem {
  pub fn position(&self) -> Point {
    Point::new(self.x, self.y)
  }
}
