use super::constants::{
  AI_BASE_INTELLIGENCE, AI_BASE_SPEED, AI_FOOD_SIGHT_RADIUS, AI_HUNT_RADIUS,
  AI_INTELLIGENCE_JITTER, AI_SPEED_JITTER, AI_WANDER_CHANCE_SCALE,
};
use super::math::random_heading;
use super::spatial::nearest;
use super::types::{AiProfile, Entity, FoodItem, Point, SnakeColor};
use rand::Rng;

pub const AI_COLORS: [SnakeColor; 20] = [
  SnakeColor { color: 0xff6b6b, stroke: 0xff5252 },
  SnakeColor { color: 0x4ecdc4, stroke: 0x26a69a },
  SnakeColor { color: 0x45b7d1, stroke: 0x2196f3 },
  SnakeColor { color: 0x96ceb4, stroke: 0x4caf50 },
  SnakeColor { color: 0xfeca57, stroke: 0xff9800 },
  SnakeColor { color: 0xff9ff3, stroke: 0xe91e63 },
  SnakeColor { color: 0x54a0ff, stroke: 0x2196f3 },
  SnakeColor { color: 0x5f27cd, stroke: 0x673ab7 },
  SnakeColor { color: 0xff5722, stroke: 0xd84315 },
  SnakeColor { color: 0x795548, stroke: 0x5d4037 },
  SnakeColor { color: 0x607d8b, stroke: 0x455a64 },
  SnakeColor { color: 0xe91e63, stroke: 0xc2185b },
  SnakeColor { color: 0x3f51b5, stroke: 0x303f9f },
  SnakeColor { color: 0x009688, stroke: 0x00695c },
  SnakeColor { color: 0x4caf50, stroke: 0x388e3c },
  SnakeColor { color: 0x8bc34a, stroke: 0x689f38 },
  SnakeColor { color: 0xcddc39, stroke: 0xafb42b },
  SnakeColor { color: 0xffeb3b, stroke: 0xf9a825 },
  SnakeColor { color: 0xffc107, stroke: 0xff8f00 },
  SnakeColor { color: 0xff9800, stroke: 0xf57c00 },
];

pub fn roll_profile<R: Rng + ?Sized>(slot: usize, rng: &mut R) -> AiProfile {
  AiProfile {
    speed: AI_BASE_SPEED + rng.gen::<f64>() * AI_SPEED_JITTER,
    intelligence: AI_BASE_INTELLIGENCE + rng.gen::<f64>() * AI_INTELLIGENCE_JITTER,
    color: AI_COLORS[slot % AI_COLORS.len()],
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
  SeekFood(Point),
  Hunt(Point),
  Wander(Point),
  Hold,
}

/// First matching rule wins: visible food, then a smaller player in range,
/// then an occasional random turn scaled by intelligence. Bigger players are
/// filtered out before the distance check, so a closer bigger player never
/// shadows a smaller one further off.
pub fn decide<'a, R, I>(ai: &Entity, food: &[FoodItem], players: I, rng: &mut R) -> Decision
where
  R: Rng + ?Sized,
  I: IntoIterator<Item = &'a Entity>,
{
  let head = ai.position;

  if let Some((item, dist)) = nearest(head, food) {
    if dist < AI_FOOD_SIGHT_RADIUS {
      return Decision::SeekFood(item.position());
    }
  }

  let prey = players
    .into_iter()
    .filter(|player| player.alive && player.score < ai.score);
  if let Some((player, dist)) = nearest(head, prey) {
    if dist < AI_HUNT_RADIUS {
      return Decision::Hunt(player.position);
    }
  }

  let intelligence = ai.ai.map(|profile| profile.intelligence).unwrap_or(0.0);
  if rng.gen::<f64>() < intelligence * AI_WANDER_CHANCE_SCALE {
    return Decision::Wander(random_heading(rng));
  }

  Decision::Hold
}

pub fn steer(ai: &mut Entity, decision: Decision) {
  match decision {
    Decision::SeekFood(target) | Decision::Hunt(target) => ai.steer_toward(target),
    Decision::Wander(direction) => ai.steer_heading(direction),
    Decision::Hold => {}
  }
}
