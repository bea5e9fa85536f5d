use super::math::distance;
use super::types::{Entity, FoodItem, Point};
use rand::Rng;

// Every query here is a linear scan. Fine for ~500 food and ~70 snakes; a
// uniform grid keyed by cell is the first thing to reach for past that.

pub trait Located {
  fn location(&self) -> Point;
}

impl Located for FoodItem {
  fn location(&self) -> Point {
    self.position()
  }
}

impl Located for Entity {
  fn location(&self) -> Point {
    self.position
  }
}

pub fn nearest<'a, T, I>(point: Point, candidates: I) -> Option<(&'a T, f64)>
where
  T: Located + 'a,
  I: IntoIterator<Item = &'a T>,
{
  let mut best: Option<(&'a T, f64)> = None;
  for candidate in candidates {
    let dist = distance(point, candidate.location());
    match best {
      Some((_, best_dist)) if dist >= best_dist => {}
      _ => best = Some((candidate, dist)),
    }
  }
  best
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
  pub width: f64,
  pub height: f64,
}

impl Bounds {
  pub fn new(width: f64, height: f64) -> Self {
    Self { width, height }
  }

  pub fn contains(&self, point: Point) -> bool {
    point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
  }

  /// Re-enters from the opposite edge. Only the overshooting axis moves.
  pub fn wrap(&self, point: Point) -> Point {
    let x = if point.x < 0.0 {
      self.width
    } else if point.x > self.width {
      0.0
    } else {
      point.x
    };
    let y = if point.y < 0.0 {
      self.height
    } else if point.y > self.height {
      0.0
    } else {
      point.y
    };
    Point { x, y }
  }

  pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
    Point {
      x: rng.gen::<f64>() * self.width,
      y: rng.gen::<f64>() * self.height,
    }
  }

  pub fn random_spawn_point<R: Rng + ?Sized>(&self, rng: &mut R, margin: f64) -> Point {
    let margin_x = margin.min(self.width / 2.0);
    let margin_y = margin.min(self.height / 2.0);
    Point {
      x: margin_x + rng.gen::<f64>() * (self.width - margin_x * 2.0),
      y: margin_y + rng.gen::<f64>() * (self.height - margin_y * 2.0),
    }
  }
}
