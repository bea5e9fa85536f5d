use super::types::Point;
use rand::Rng;

pub fn length(point: Point) -> f64 {
  (point.x * point.x + point.y * point.y).sqrt()
}

pub fn distance(a: Point, b: Point) -> f64 {
  length(sub(a, b))
}

pub fn sub(a: Point, b: Point) -> Point {
  Point {
    x: a.x - b.x,
    y: a.y - b.y,
  }
}

pub fn add(a: Point, b: Point) -> Point {
  Point {
    x: a.x + b.x,
    y: a.y + b.y,
  }
}

pub fn scale(point: Point, factor: f64) -> Point {
  Point {
    x: point.x * factor,
    y: point.y * factor,
  }
}

pub fn normalize(point: Point) -> Point {
  let len = length(point);
  if !len.is_finite() || len == 0.0 {
    return Point::ZERO;
  }
  Point {
    x: point.x / len,
    y: point.y / len,
  }
}

pub fn is_finite(point: Point) -> bool {
  point.x.is_finite() && point.y.is_finite()
}

pub fn heading(angle: f64) -> Point {
  Point {
    x: angle.cos(),
    y: angle.sin(),
  }
}

pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Point {
  heading(rng.gen::<f64>() * std::f64::consts::PI * 2.0)
}

pub fn within(a: Point, b: Point, radius: f64) -> bool {
  distance(a, b) < radius
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_rejects_degenerate_vectors() {
    assert_eq!(normalize(Point::ZERO), Point::ZERO);
    assert_eq!(normalize(Point::new(f64::NAN, 1.0)), Point::ZERO);
    let unit = normalize(Point::new(3.0, 4.0));
    assert!((unit.x - 0.6).abs() < 1e-12);
    assert!((unit.y - 0.8).abs() < 1e-12);
  }

  #[test]
  fn within_is_strict() {
    let a = Point::new(0.0, 0.0);
    assert!(within(a, Point::new(14.9, 0.0), 15.0));
    assert!(!within(a, Point::new(15.0, 0.0), 15.0));
  }
}
