use super::constants::LEADERBOARD_SIZE;
use super::types::{Entity, EntityId, FoodItem, Point, SnakeColor};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EntitySnapshot {
  pub id: EntityId,
  pub name: String,
  pub x: f64,
  pub y: f64,
  pub segments: Vec<Point>,
  pub score: i64,
  pub alive: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color: Option<SnakeColor>,
}

impl EntitySnapshot {
  pub fn from_entity(entity: &Entity) -> Self {
    Self {
      id: entity.id.clone(),
      name: entity.name.clone(),
      x: entity.position.x,
      y: entity.position.y,
      segments: if entity.alive {
        entity.segments.clone()
      } else {
        Vec::new()
      },
      score: entity.score,
      alive: entity.alive,
      color: entity.ai.map(|profile| profile.color),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
  pub id: EntityId,
  pub name: String,
  pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldSize {
  pub width: f64,
  pub height: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
  pub players: Vec<EntitySnapshot>,
  /// Absent from the join-time snapshot sent to a single new connection.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ai_snakes: Option<Vec<EntitySnapshot>>,
  pub food: Vec<FoodItem>,
  pub leaderboard: Vec<LeaderboardEntry>,
  pub world_size: WorldSize,
}

/// Top scores across both pools; ties fall back to id so the order is stable
/// from tick to tick.
pub fn rank<'a, I>(entities: I) -> Vec<LeaderboardEntry>
where
  I: IntoIterator<Item = &'a Entity>,
{
  let mut ranked: Vec<&Entity> = entities.into_iter().collect();
  ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
  ranked
    .into_iter()
    .take(LEADERBOARD_SIZE)
    .map(|entity| LeaderboardEntry {
      id: entity.id.clone(),
      name: entity.name.clone(),
      score: entity.score,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::game::types::EntityKind;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn scored(id: &str, score: i64) -> Entity {
    let mut rng = StdRng::seed_from_u64(9);
    let mut entity = Entity::spawn(
      id.to_string(),
      id.to_uppercase(),
      EntityKind::Player,
      None,
      Point::new(10.0, 10.0),
      &mut rng,
    );
    entity.score = score;
    entity
  }

  #[test]
  fn rank_keeps_top_ten_by_score() {
    let entities: Vec<Entity> = (0..15).map(|i| scored(&format!("e{i:02}"), i)).collect();
    let board = rank(&entities);
    assert_eq!(board.len(), LEADERBOARD_SIZE);
    assert_eq!(board[0].id, "e14");
    assert_eq!(board[9].id, "e05");
    assert!(board.windows(2).all(|pair| pair[0].score >= pair[1].score));
  }

  #[test]
  fn rank_breaks_ties_by_id() {
    let entities = vec![scored("b", 3), scored("a", 3), scored("c", 4)];
    let ids: Vec<_> = rank(&entities).into_iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
  }

  #[test]
  fn dead_entities_ship_without_body() {
    let mut entity = scored("p1", 2);
    entity.eliminate();
    let snapshot = EntitySnapshot::from_entity(&entity);
    assert!(!snapshot.alive);
    assert!(snapshot.segments.is_empty());
  }

  #[test]
  fn snapshot_serializes_camel_case_and_omits_missing_ai() {
    let snapshot = GameStateSnapshot {
      players: vec![EntitySnapshot::from_entity(&scored("p1", 0))],
      ai_snakes: None,
      food: Vec::new(),
      leaderboard: Vec::new(),
      world_size: WorldSize {
        width: 100.0,
        height: 50.0,
      },
    };
    let value = serde_json::to_value(&snapshot).expect("json");
    assert!(value.get("aiSnakes").is_none());
    assert_eq!(value["worldSize"]["width"], 100.0);
    assert!(value["players"][0].get("color").is_none());
  }
}
