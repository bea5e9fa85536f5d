use super::constants::{
  AI_SELF_COLLISION_SKIP, COLLISION_RADIUS, FOOD_PICKUP_RADIUS, PLAYER_SELF_COLLISION_SKIP,
};
use super::math::within;
use super::spatial::Bounds;
use super::types::{Entity, EntityId, FoodId, FoodItem, FoodKind, Point};

/// Frozen copy of a living snake, taken at the start of a collision phase so
/// every snake in the phase is judged against the same picture.
#[derive(Debug, Clone)]
pub struct Body {
  pub id: EntityId,
  pub segments: Vec<Point>,
}

impl Body {
  pub fn head(&self) -> Option<Point> {
    self.segments.first().copied()
  }
}

pub fn living_bodies<'a, I>(entities: I) -> Vec<Body>
where
  I: IntoIterator<Item = &'a Entity>,
{
  entities
    .into_iter()
    .filter(|entity| entity.alive)
    .map(|entity| Body {
      id: entity.id.clone(),
      segments: entity.segments.clone(),
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cause {
  Boundary,
  SelfCollision,
  Collision { with: EntityId },
  Predation { by: EntityId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
  Survive,
  Eliminate(Cause),
  /// AI only: survives and swallows the named player.
  Devour { prey: EntityId },
}

pub fn out_of_bounds(head: Point, bounds: &Bounds) -> bool {
  !bounds.contains(head)
}

pub fn hits_own_body(segments: &[Point], skip: usize) -> bool {
  let Some(head) = segments.first().copied() else { return false };
  segments
    .iter()
    .skip(skip)
    .any(|segment| within(head, *segment, COLLISION_RADIUS))
}

pub fn hits_body(head: Point, segments: &[Point], from_index: usize) -> bool {
  segments
    .iter()
    .skip(from_index)
    .any(|segment| within(head, *segment, COLLISION_RADIUS))
}

fn heads_touch(head: Point, body: &Body) -> bool {
  body
    .head()
    .map(|other| within(head, other, COLLISION_RADIUS))
    .unwrap_or(false)
}

/// boundary → self → other players → AI (predation first, then bodies).
pub fn judge_player(player: &Entity, bounds: &Bounds, players: &[Body], ai: &[Body]) -> Verdict {
  let head = player.head();

  if out_of_bounds(head, bounds) {
    return Verdict::Eliminate(Cause::Boundary);
  }

  if hits_own_body(&player.segments, PLAYER_SELF_COLLISION_SKIP) {
    return Verdict::Eliminate(Cause::SelfCollision);
  }

  for other in players.iter().filter(|other| other.id != player.id) {
    if hits_body(head, &other.segments, 0) {
      return Verdict::Eliminate(Cause::Collision {
        with: other.id.clone(),
      });
    }
  }

  if let Some(predator) = ai.iter().find(|snake| heads_touch(head, snake)) {
    return Verdict::Eliminate(Cause::Predation {
      by: predator.id.clone(),
    });
  }

  for snake in ai {
    if hits_body(head, &snake.segments, 1) {
      return Verdict::Eliminate(Cause::Collision {
        with: snake.id.clone(),
      });
    }
  }

  Verdict::Survive
}

/// self → players (predation first, then bodies) → other AI. Boundary
/// wrapping happens before this is called.
pub fn judge_ai(ai: &Entity, players: &[Body], others: &[Body]) -> Verdict {
  let head = ai.head();

  if hits_own_body(&ai.segments, AI_SELF_COLLISION_SKIP) {
    return Verdict::Eliminate(Cause::SelfCollision);
  }

  if let Some(prey) = players.iter().find(|player| heads_touch(head, player)) {
    return Verdict::Devour {
      prey: prey.id.clone(),
    };
  }

  for player in players {
    if hits_body(head, &player.segments, 1) {
      return Verdict::Eliminate(Cause::Collision {
        with: player.id.clone(),
      });
    }
  }

  for other in others.iter().filter(|other| other.id != ai.id) {
    if hits_body(head, &other.segments, 0) {
      return Verdict::Eliminate(Cause::Collision {
        with: other.id.clone(),
      });
    }
  }

  Verdict::Survive
}

pub fn food_in_reach(head: Point, food: &[FoodItem]) -> Vec<FoodId> {
  food
    .iter()
    .filter(|item| within(head, item.position(), FOOD_PICKUP_RADIUS))
    .map(|item| item.id)
    .collect()
}

/// One segment per bite either way; the item's value does not scale growth.
pub fn apply_food(entity: &mut Entity, item: &FoodItem) {
  match item.kind {
    FoodKind::Nutritive => entity.grow(1),
    FoodKind::Harmful => entity.shrink(1),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::game::constants::SEGMENT_DISTANCE;
  use crate::game::types::EntityKind;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn snake(id: &str, kind: EntityKind, head: Point, len: usize) -> Entity {
    let mut rng = StdRng::seed_from_u64(5);
    let mut entity = Entity::spawn(id.to_string(), id.to_string(), kind, None, head, &mut rng);
    entity.segments = (0..len)
      .map(|index| Point::new(head.x - index as f64 * SEGMENT_DISTANCE, head.y))
      .collect();
    entity.score = len as i64 - 1;
    entity
  }

  fn bounds() -> Bounds {
    Bounds::new(10_000.0, 10_000.0)
  }

  #[test]
  fn player_outside_bounds_is_eliminated() {
    let player = snake("p1", EntityKind::Player, Point::new(10_001.0, 5_000.0), 1);
    assert_eq!(
      judge_player(&player, &bounds(), &[], &[]),
      Verdict::Eliminate(Cause::Boundary)
    );
  }

  #[test]
  fn self_collision_respects_skip_window() {
    let mut player = snake("p1", EntityKind::Player, Point::new(500.0, 500.0), 6);
    player.segments[0] = player.segments[5];
    player.position = player.segments[5];
    assert_eq!(
      judge_player(&player, &bounds(), &[], &[]),
      Verdict::Eliminate(Cause::SelfCollision)
    );

    let mut player = snake("p1", EntityKind::Player, Point::new(500.0, 500.0), 6);
    player.segments[0] = player.segments[2];
    player.position = player.segments[2];
    assert_eq!(judge_player(&player, &bounds(), &[], &[]), Verdict::Survive);
  }

  #[test]
  fn ai_self_collision_uses_wider_window() {
    let mut ai = snake("ai_0", EntityKind::Ai, Point::new(500.0, 500.0), 10);
    ai.segments[0] = ai.segments[6];
    assert_eq!(judge_ai(&ai, &[], &[]), Verdict::Survive);
    ai.segments[0] = ai.segments[9];
    assert_eq!(judge_ai(&ai, &[], &[]), Verdict::Eliminate(Cause::SelfCollision));
  }

  #[test]
  fn player_hitting_other_player_body_dies() {
    let player = snake("p1", EntityKind::Player, Point::new(500.0, 505.0), 1);
    let other = snake("p2", EntityKind::Player, Point::new(540.0, 500.0), 4);
    let bodies = living_bodies([&player, &other]);
    assert_eq!(
      judge_player(&player, &bounds(), &bodies, &[]),
      Verdict::Eliminate(Cause::Collision {
        with: "p2".to_string()
      })
    );
  }

  #[test]
  fn player_meeting_ai_head_is_preyed_on() {
    let player = snake("p1", EntityKind::Player, Point::new(500.0, 500.0), 3);
    let ai = snake("ai_3", EntityKind::Ai, Point::new(505.0, 500.0), 5);
    let ai_bodies = living_bodies([&ai]);
    assert_eq!(
      judge_player(&player, &bounds(), &[], &ai_bodies),
      Verdict::Eliminate(Cause::Predation {
        by: "ai_3".to_string()
      })
    );
  }

  #[test]
  fn player_hitting_ai_body_dies_without_predation() {
    let player = snake("p1", EntityKind::Player, Point::new(460.0, 505.0), 1);
    let ai = snake("ai_3", EntityKind::Ai, Point::new(500.0, 500.0), 5);
    let ai_bodies = living_bodies([&ai]);
    assert_eq!(
      judge_player(&player, &bounds(), &[], &ai_bodies),
      Verdict::Eliminate(Cause::Collision {
        with: "ai_3".to_string()
      })
    );
  }

  #[test]
  fn ai_devours_player_head_and_dies_on_player_body() {
    let ai = snake("ai_0", EntityKind::Ai, Point::new(500.0, 500.0), 4);
    let player = snake("p1", EntityKind::Player, Point::new(510.0, 500.0), 3);
    let players = living_bodies([&player]);
    assert_eq!(
      judge_ai(&ai, &players, &[]),
      Verdict::Devour {
        prey: "p1".to_string()
      }
    );

    let player = snake("p1", EntityKind::Player, Point::new(540.0, 500.0), 3);
    let players = living_bodies([&player]);
    assert_eq!(
      judge_ai(&ai, &players, &[]),
      Verdict::Eliminate(Cause::Collision {
        with: "p1".to_string()
      })
    );
  }

  #[test]
  fn ai_hitting_other_ai_dies() {
    let ai = snake("ai_0", EntityKind::Ai, Point::new(500.0, 500.0), 4);
    let other = snake("ai_1", EntityKind::Ai, Point::new(530.0, 505.0), 4);
    let others = living_bodies([&ai, &other]);
    assert_eq!(
      judge_ai(&ai, &[], &others),
      Verdict::Eliminate(Cause::Collision {
        with: "ai_1".to_string()
      })
    );
  }

  #[test]
  fn dead_entities_are_not_obstacles() {
    let player = snake("p1", EntityKind::Player, Point::new(500.0, 505.0), 1);
    let mut other = snake("p2", EntityKind::Player, Point::new(500.0, 500.0), 4);
    other.eliminate();
    let bodies = living_bodies([&player, &other]);
    assert_eq!(bodies.len(), 1);
    assert_eq!(judge_player(&player, &bounds(), &bodies, &[]), Verdict::Survive);
  }

  #[test]
  fn food_effects_move_one_segment() {
    let mut player = snake("p1", EntityKind::Player, Point::new(500.0, 500.0), 2);
    let purple = FoodItem {
      id: 1,
      x: 500.0,
      y: 500.0,
      kind: FoodKind::Nutritive,
      value: 3,
      color: 0xaa00ff,
    };
    apply_food(&mut player, &purple);
    assert_eq!(player.segments.len(), 3);
    assert_eq!(player.score, 2);

    let poison = FoodItem {
      kind: FoodKind::Harmful,
      value: -1,
      color: 0xff0000,
      ..purple
    };
    apply_food(&mut player, &poison);
    assert_eq!(player.segments.len(), 2);
    assert_eq!(player.score, 1);

    assert_eq!(food_in_reach(player.head(), &[purple, poison]), vec![1, 1]);
  }
}
