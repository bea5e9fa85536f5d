use super::constants::{
  AI_EXTRA_SEGMENTS_MAX, AI_MIN_SEGMENTS, BOOST_MULTIPLIER, MIN_INTENT_MAGNITUDE, PLAYER_SPEED,
  SEGMENT_DISTANCE,
};
use super::math::{add, distance, is_finite, length, normalize, random_heading, scale, sub};
use super::types::{AiProfile, Entity, EntityId, EntityKind, Point};
use rand::Rng;

impl Entity {
  /// Players start as a lone head; AI slots get a short random body.
  pub fn spawn<R: Rng + ?Sized>(
    id: EntityId,
    name: String,
    kind: EntityKind,
    profile: Option<AiProfile>,
    position: Point,
    rng: &mut R,
  ) -> Self {
    let mut entity = Entity {
      id,
      name,
      kind,
      position,
      velocity: Point::ZERO,
      segments: vec![position],
      score: 0,
      alive: true,
      boost_until: None,
      last_input_at: 0,
      ai: if kind == EntityKind::Ai { profile } else { None },
    };
    if kind == EntityKind::Ai {
      entity.reset_ai_body(position, rng);
    }
    entity
  }

  pub fn base_speed(&self) -> f64 {
    self.ai.map(|profile| profile.speed).unwrap_or(PLAYER_SPEED)
  }

  pub fn head(&self) -> Point {
    self.segments.first().copied().unwrap_or(self.position)
  }

  /// Rescales any usable vector to the fixed base speed, so clients cannot
  /// buy speed with magnitude. Degenerate input stops the snake.
  pub fn apply_intent(&mut self, desired: Point) {
    let magnitude = length(desired);
    if !is_finite(desired) || !magnitude.is_finite() || magnitude < MIN_INTENT_MAGNITUDE {
      self.velocity = Point::ZERO;
      return;
    }
    self.velocity = scale(desired, self.base_speed() / magnitude);
  }

  pub fn steer_toward(&mut self, target: Point) {
    let direction = normalize(sub(target, self.position));
    if direction == Point::ZERO {
      return;
    }
    self.velocity = scale(direction, self.base_speed());
  }

  pub fn steer_heading(&mut self, direction: Point) {
    self.velocity = scale(normalize(direction), self.base_speed());
  }

  pub fn effective_velocity(&self) -> Point {
    if self.boost_until.is_some() {
      scale(self.velocity, BOOST_MULTIPLIER)
    } else {
      self.velocity
    }
  }

  pub fn grow(&mut self, n: usize) {
    if !self.alive {
      return;
    }
    for _ in 0..n {
      let tail = self.trailing_point();
      self.segments.push(tail);
    }
    self.score += n as i64;
  }

  pub fn shrink(&mut self, n: usize) {
    if !self.alive {
      return;
    }
    let removable = n.min(self.segments.len().saturating_sub(1));
    let keep = self.segments.len() - removable;
    self.segments.truncate(keep);
    self.score = (self.score - removable as i64).max(0);
  }

  pub fn advance(&mut self, dt_seconds: f64) {
    let step = scale(self.effective_velocity(), dt_seconds);
    self.position = add(self.position, step);
    self.relax_body();
  }

  /// Pins the head to `position`, then drags each segment toward the one
  /// ahead until the gap is exactly `SEGMENT_DISTANCE`. Shorter gaps are left
  /// alone.
  pub fn relax_body(&mut self) {
    if self.segments.is_empty() {
      self.segments.push(self.position);
    }
    self.segments[0] = self.position;
    for index in 1..self.segments.len() {
      let ahead = self.segments[index - 1];
      let current = self.segments[index];
      let gap = distance(ahead, current);
      if gap > SEGMENT_DISTANCE {
        let fraction = (gap - SEGMENT_DISTANCE) / gap;
        self.segments[index] = add(current, scale(sub(ahead, current), fraction));
      }
    }
  }

  /// Shifts the whole body rigidly; spacing and heading are untouched.
  pub fn translate(&mut self, offset: Point) {
    self.position = add(self.position, offset);
    for segment in self.segments.iter_mut() {
      *segment = add(*segment, offset);
    }
  }

  /// Returns the score held at the moment of death.
  pub fn eliminate(&mut self) -> i64 {
    let final_score = self.score;
    self.alive = false;
    self.velocity = Point::ZERO;
    self.boost_until = None;
    self.segments.truncate(1);
    final_score
  }

  pub fn respawn_player(&mut self, position: Point) {
    self.position = position;
    self.velocity = Point::ZERO;
    self.segments = vec![position];
    self.score = 0;
    self.alive = true;
    self.boost_until = None;
  }

  pub fn respawn_ai<R: Rng + ?Sized>(&mut self, position: Point, rng: &mut R) {
    self.alive = true;
    self.boost_until = None;
    self.reset_ai_body(position, rng);
  }

  fn reset_ai_body<R: Rng + ?Sized>(&mut self, position: Point, rng: &mut R) {
    let count = AI_MIN_SEGMENTS + rng.gen_range(0..AI_EXTRA_SEGMENTS_MAX);
    self.position = position;
    self.segments = (0..count)
      .map(|index| Point {
        x: position.x - index as f64 * SEGMENT_DISTANCE,
        y: position.y,
      })
      .collect();
    self.score = count as i64 - 1;
    self.steer_heading(random_heading(rng));
  }

  /// Continues the tail's own direction; a lone head grows opposite its
  /// travel, or along -x when standing still.
  fn trailing_point(&self) -> Point {
    let len = self.segments.len();
    let tail = self.segments.last().copied().unwrap_or(self.position);
    let direction = if len >= 2 {
      normalize(sub(tail, self.segments[len - 2]))
    } else {
      normalize(scale(self.velocity, -1.0))
    };
    let direction = if direction == Point::ZERO {
      Point::new(-1.0, 0.0)
    } else {
      direction
    };
    add(tail, scale(direction, SEGMENT_DISTANCE))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::game::types::SnakeColor;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn player_at(x: f64, y: f64) -> Entity {
    let mut rng = StdRng::seed_from_u64(1);
    Entity::spawn(
      "p1".to_string(),
      "Tester".to_string(),
      EntityKind::Player,
      None,
      Point::new(x, y),
      &mut rng,
    )
  }

  fn assert_chain(entity: &Entity) {
    for pair in entity.segments.windows(2) {
      assert!(distance(pair[0], pair[1]) <= SEGMENT_DISTANCE + 1e-9);
    }
  }

  #[test]
  fn player_spawns_as_single_segment() {
    let player = player_at(100.0, 200.0);
    assert_eq!(player.segments, vec![Point::new(100.0, 200.0)]);
    assert_eq!(player.score, 0);
    assert!(player.alive);
    assert!(player.ai.is_none());
  }

  #[test]
  fn ai_spawns_with_profile_body() {
    let mut rng = StdRng::seed_from_u64(3);
    let profile = AiProfile {
      speed: 90.0,
      intelligence: 0.8,
      color: SnakeColor {
        color: 0xff6b6b,
        stroke: 0xff5252,
      },
    };
    let ai = Entity::spawn(
      "ai_0".to_string(),
      "Alpha Snake".to_string(),
      EntityKind::Ai,
      Some(profile),
      Point::new(1000.0, 1000.0),
      &mut rng,
    );
    assert!(ai.segments.len() >= AI_MIN_SEGMENTS);
    assert!(ai.segments.len() < AI_MIN_SEGMENTS + AI_EXTRA_SEGMENTS_MAX);
    assert_eq!(ai.score, ai.segments.len() as i64 - 1);
    assert!((length(ai.velocity) - 90.0).abs() < 1e-9);
    assert_chain(&ai);
  }

  #[test]
  fn intent_is_normalized_to_base_speed() {
    let mut player = player_at(0.0, 0.0);
    player.apply_intent(Point::new(3000.0, 4000.0));
    assert!((length(player.velocity) - PLAYER_SPEED).abs() < 1e-9);
    assert!((player.velocity.x - 60.0).abs() < 1e-9);
    assert!((player.velocity.y - 80.0).abs() < 1e-9);
  }

  #[test]
  fn degenerate_intent_stops_the_snake() {
    let mut player = player_at(0.0, 0.0);
    player.apply_intent(Point::new(1.0, 0.0));
    player.apply_intent(Point::ZERO);
    assert_eq!(player.velocity, Point::ZERO);

    player.apply_intent(Point::new(1.0, 0.0));
    player.apply_intent(Point::new(f64::NAN, 1.0));
    assert_eq!(player.velocity, Point::ZERO);

    player.apply_intent(Point::new(f64::INFINITY, 0.0));
    assert_eq!(player.velocity, Point::ZERO);
  }

  #[test]
  fn grow_appends_at_fixed_spacing() {
    let mut player = player_at(500.0, 500.0);
    player.grow(3);
    assert_eq!(player.segments.len(), 4);
    assert_eq!(player.score, 3);
    for pair in player.segments.windows(2) {
      assert!((distance(pair[0], pair[1]) - SEGMENT_DISTANCE).abs() < 1e-9);
    }
  }

  #[test]
  fn shrink_never_empties_the_body() {
    let mut player = player_at(500.0, 500.0);
    player.shrink(5);
    assert_eq!(player.segments.len(), 1);
    assert_eq!(player.score, 0);

    player.grow(2);
    player.shrink(5);
    assert_eq!(player.segments.len(), 1);
    assert_eq!(player.score, 0);
  }

  #[test]
  fn grow_and_shrink_ignore_dead_entities() {
    let mut player = player_at(500.0, 500.0);
    player.grow(2);
    player.eliminate();
    player.grow(3);
    player.shrink(1);
    assert_eq!(player.segments.len(), 1);
    assert_eq!(player.score, 2);
  }

  #[test]
  fn advance_moves_head_and_keeps_chain_tight() {
    let mut player = player_at(500.0, 500.0);
    player.grow(6);
    player.apply_intent(Point::new(0.0, 1.0));
    for _ in 0..120 {
      player.advance(0.016);
      assert_eq!(player.segments[0], player.position);
      assert_chain(&player);
    }
    assert!(player.position.y > 500.0);
  }

  #[test]
  fn relax_moves_segments_partially() {
    let mut player = player_at(0.0, 0.0);
    player.segments = vec![Point::new(0.0, 0.0), Point::new(-50.0, 0.0)];
    player.relax_body();
    assert!((player.segments[1].x + SEGMENT_DISTANCE).abs() < 1e-9);
  }

  #[test]
  fn boost_scales_integration_only() {
    let mut player = player_at(500.0, 500.0);
    player.apply_intent(Point::new(1.0, 0.0));
    player.boost_until = Some(2000);
    player.advance(1.0);
    assert!((player.position.x - 650.0).abs() < 1e-9);
    assert!((length(player.velocity) - PLAYER_SPEED).abs() < 1e-9);
  }

  #[test]
  fn translate_moves_body_rigidly() {
    let mut player = player_at(100.0, 50.0);
    player.grow(3);
    let before = player.segments.clone();
    player.translate(Point::new(-100.5, 0.0));
    assert_eq!(player.position, Point::new(-0.5, 50.0));
    for (moved, original) in player.segments.iter().zip(&before) {
      assert_eq!(*moved, Point::new(original.x - 100.5, original.y));
    }
    assert_chain(&player);
  }

  #[test]
  fn eliminate_keeps_head_and_reports_score() {
    let mut player = player_at(500.0, 500.0);
    player.grow(4);
    let score = player.eliminate();
    assert_eq!(score, 4);
    assert!(!player.alive);
    assert_eq!(player.segments.len(), 1);
  }
}
