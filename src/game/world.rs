use super::ai::{decide, roll_profile, steer};
use super::constants::{
  AI_COUNT, AI_RESPAWN_MS, BOOST_DURATION_MS, MAX_FOOD, PLAYER_RESPAWN_MS, SPAWN_MARGIN, TICK_MS,
  WORLD_HEIGHT, WORLD_WIDTH,
};
use super::food::{FoodManager, FoodSwap};
use super::math::sub;
use super::rules::{apply_food, food_in_reach, judge_ai, judge_player, living_bodies, Cause, Verdict};
use super::schedule::{Schedule, ScheduledEvent};
use super::snapshot::{rank, EntitySnapshot, GameStateSnapshot, LeaderboardEntry, WorldSize};
use super::spatial::Bounds;
use super::types::{Entity, EntityId, EntityKind, Point};
use crate::app::time::now_millis;
use crate::shared::names::{ai_name, default_player_name};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
  Move(Point),
  Boost,
  SetName(String),
}

#[derive(Debug)]
struct PendingIntent {
  entity_id: EntityId,
  intent: Intent,
  received_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
  Eliminated {
    id: EntityId,
    kind: EntityKind,
    name: String,
    score: i64,
    cause: Cause,
  },
  Respawned {
    id: EntityId,
    kind: EntityKind,
    position: Point,
  },
  FoodUpdate(FoodSwap),
}

/// Sole owner of the simulation. Snakes live in ordered maps so every phase
/// visits them in the same order on every tick.
#[derive(Debug)]
pub struct World {
  bounds: Bounds,
  players: BTreeMap<EntityId, Entity>,
  ai: BTreeMap<EntityId, Entity>,
  food: FoodManager,
  schedule: Schedule,
  intents: Vec<PendingIntent>,
  leaderboard: Vec<LeaderboardEntry>,
  now: i64,
  ticks: u64,
  rng: StdRng,
}

impl World {
  pub fn new() -> Self {
    Self::populated(StdRng::from_entropy())
  }

  pub fn with_seed(seed: u64) -> Self {
    Self::populated(StdRng::seed_from_u64(seed))
  }

  fn populated(rng: StdRng) -> Self {
    let mut world = Self::empty(rng);
    world.food.fill(&world.bounds, &mut world.rng);
    for slot in 0..AI_COUNT {
      world.spawn_ai(slot);
    }
    world.leaderboard = rank(world.players.values().chain(world.ai.values()));
    world
  }

  fn empty(rng: StdRng) -> Self {
    Self {
      bounds: Bounds::new(WORLD_WIDTH, WORLD_HEIGHT),
      players: BTreeMap::new(),
      ai: BTreeMap::new(),
      food: FoodManager::new(MAX_FOOD),
      schedule: Schedule::new(),
      intents: Vec::new(),
      leaderboard: Vec::new(),
      now: 0,
      ticks: 0,
      rng,
    }
  }

  pub fn ticks(&self) -> u64 {
    self.ticks
  }

  pub fn food(&self) -> &FoodManager {
    &self.food
  }

  pub fn player(&self, id: &str) -> Option<&Entity> {
    self.players.get(id)
  }

  pub fn alive_counts(&self) -> (usize, usize) {
    (
      self.players.values().filter(|player| player.alive).count(),
      self.ai.values().filter(|ai| ai.alive).count(),
    )
  }

  pub fn add_player(&mut self, id: EntityId) -> &Entity {
    let position = self.bounds.random_spawn_point(&mut self.rng, SPAWN_MARGIN);
    let name = default_player_name(&mut self.rng);
    let player = Entity::spawn(
      id.clone(),
      name,
      EntityKind::Player,
      None,
      position,
      &mut self.rng,
    );
    self.players.entry(id).or_insert(player)
  }

  /// Any respawn or boost expiry still queued for `id` turns into a no-op.
  pub fn remove_player(&mut self, id: &str) -> Option<Entity> {
    self.intents.retain(|pending| pending.entity_id != id);
    self.players.remove(id)
  }

  pub fn enqueue_intent(&mut self, id: &str, intent: Intent) {
    if !self.players.contains_key(id) {
      return;
    }
    self.intents.push(PendingIntent {
      entity_id: id.to_string(),
      intent,
      received_at: now_millis(),
    });
  }

  pub fn tick(&mut self) -> Vec<WorldEvent> {
    self.now += TICK_MS;
    self.ticks += 1;
    let dt_seconds = TICK_MS as f64 / 1000.0;
    let mut events = Vec::new();

    self.run_scheduled(&mut events);
    self.apply_intents();

    for player in self.players.values_mut().filter(|player| player.alive) {
      player.advance(dt_seconds);
    }
    self.resolve_players(&mut events);

    for ai in self.ai.values_mut().filter(|ai| ai.alive) {
      let decision = decide(ai, self.food.items(), self.players.values(), &mut self.rng);
      steer(ai, decision);
      ai.advance(dt_seconds);
    }
    self.resolve_ai(&mut events);

    self.leaderboard = rank(self.players.values().chain(self.ai.values()));
    events
  }

  pub fn snapshot(&self, include_ai: bool) -> GameStateSnapshot {
    GameStateSnapshot {
      players: self.players.values().map(EntitySnapshot::from_entity).collect(),
      ai_snakes: include_ai.then(|| self.ai.values().map(EntitySnapshot::from_entity).collect()),
      food: self.food.items().to_vec(),
      leaderboard: self.leaderboard.clone(),
      world_size: WorldSize {
        width: self.bounds.width,
        height: self.bounds.height,
      },
    }
  }

  fn spawn_ai(&mut self, slot: usize) {
    let id = format!("ai_{slot}");
    let profile = roll_profile(slot, &mut self.rng);
    let position = self.bounds.random_spawn_point(&mut self.rng, SPAWN_MARGIN);
    let ai = Entity::spawn(
      id.clone(),
      ai_name(slot),
      EntityKind::Ai,
      Some(profile),
      position,
      &mut self.rng,
    );
    self.ai.insert(id, ai);
  }

  fn run_scheduled(&mut self, events: &mut Vec<WorldEvent>) {
    for event in self.schedule.drain_due(self.now) {
      match event {
        ScheduledEvent::RespawnPlayer(id) => {
          let position = self.bounds.random_spawn_point(&mut self.rng, SPAWN_MARGIN);
          let Some(player) = self.players.get_mut(&id) else { continue };
          if player.alive {
            continue;
          }
          player.respawn_player(position);
          tracing::debug!(player_id = %id, "player respawned");
          events.push(WorldEvent::Respawned {
            id,
            kind: EntityKind::Player,
            position,
          });
        }
        ScheduledEvent::RespawnAi(id) => {
          let position = self.bounds.random_spawn_point(&mut self.rng, SPAWN_MARGIN);
          let Some(ai) = self.ai.get_mut(&id) else { continue };
          if ai.alive {
            continue;
          }
          ai.respawn_ai(position, &mut self.rng);
          tracing::debug!(ai_id = %id, "ai respawned");
          events.push(WorldEvent::Respawned {
            id,
            kind: EntityKind::Ai,
            position,
          });
        }
        ScheduledEvent::BoostExpired { id, deadline } => {
          let Some(player) = self.players.get_mut(&id) else { continue };
          if player.boost_until == Some(deadline) {
            player.boost_until = None;
          }
        }
      }
    }
  }

  fn apply_intents(&mut self) {
    for pending in std::mem::take(&mut self.intents) {
      let Some(player) = self.players.get_mut(&pending.entity_id) else { continue };
      match pending.intent {
        Intent::Move(desired) => {
          player.last_input_at = pending.received_at;
          if player.alive {
            player.apply_intent(desired);
          }
        }
        Intent::Boost => {
          if !player.alive {
            continue;
          }
          // A second boost inside the window only pushes the deadline out.
          let deadline = self.now + BOOST_DURATION_MS;
          player.boost_until = Some(deadline);
          self.schedule.push(
            deadline,
            ScheduledEvent::BoostExpired {
              id: pending.entity_id,
              deadline,
            },
          );
        }
        Intent::SetName(name) => player.name = name,
      }
    }
  }

  fn resolve_players(&mut self, events: &mut Vec<WorldEvent>) {
    let player_bodies = living_bodies(self.players.values());
    let ai_bodies = living_bodies(self.ai.values());
    let verdicts: Vec<(EntityId, Verdict)> = self
      .players
      .values()
      .filter(|player| player.alive)
      .map(|player| {
        let verdict = judge_player(player, &self.bounds, &player_bodies, &ai_bodies);
        (player.id.clone(), verdict)
      })
      .collect();

    for (id, verdict) in verdicts {
      let Verdict::Eliminate(cause) = verdict else { continue };
      if let Cause::Predation { by } = &cause {
        if let Some(ai) = self.ai.get_mut(by) {
          ai.grow(1);
        }
      }
      self.eliminate(&id, EntityKind::Player, cause, events);
    }

    let survivors: Vec<EntityId> = self
      .players
      .values()
      .filter(|player| player.alive)
      .map(|player| player.id.clone())
      .collect();
    for id in survivors {
      self.feed(&id, EntityKind::Player, events);
    }
  }

  fn resolve_ai(&mut self, events: &mut Vec<WorldEvent>) {
    for ai in self.ai.values_mut().filter(|ai| ai.alive) {
      // Whole body moves with the head so it still trails behind.
      let wrapped = self.bounds.wrap(ai.position);
      if wrapped != ai.position {
        ai.translate(sub(wrapped, ai.position));
      }
    }

    let player_bodies = living_bodies(self.players.values());
    let ai_bodies = living_bodies(self.ai.values());
    let verdicts: Vec<(EntityId, Verdict)> = self
      .ai
      .values()
      .filter(|ai| ai.alive)
      .map(|ai| (ai.id.clone(), judge_ai(ai, &player_bodies, &ai_bodies)))
      .collect();

    let mut devoured: HashSet<EntityId> = HashSet::new();
    for (id, verdict) in verdicts {
      match verdict {
        Verdict::Survive => {}
        Verdict::Eliminate(cause) => self.eliminate(&id, EntityKind::Ai, cause, events),
        Verdict::Devour { prey } => {
          // Lowest AI id reaching a player gets it; later ones just survive.
          if !devoured.insert(prey.clone()) {
            continue;
          }
          if let Some(ai) = self.ai.get_mut(&id) {
            ai.grow(1);
          }
          self.eliminate(&prey, EntityKind::Player, Cause::Predation { by: id }, events);
        }
      }
    }

    let survivors: Vec<EntityId> = self
      .ai
      .values()
      .filter(|ai| ai.alive)
      .map(|ai| ai.id.clone())
      .collect();
    for id in survivors {
      self.feed(&id, EntityKind::Ai, events);
    }
  }

  fn eliminate(&mut self, id: &str, kind: EntityKind, cause: Cause, events: &mut Vec<WorldEvent>) {
    let (pool, delay, respawn) = match kind {
      EntityKind::Player => (
        &mut self.players,
        PLAYER_RESPAWN_MS,
        ScheduledEvent::RespawnPlayer(id.to_string()),
      ),
      EntityKind::Ai => (
        &mut self.ai,
        AI_RESPAWN_MS,
        ScheduledEvent::RespawnAi(id.to_string()),
      ),
    };
    let Some(entity) = pool.get_mut(id) else { return };
    if !entity.alive {
      return;
    }
    let score = entity.eliminate();
    tracing::debug!(entity_id = id, ?kind, score, ?cause, "snake eliminated");
    events.push(WorldEvent::Eliminated {
      id: id.to_string(),
      kind,
      name: entity.name.clone(),
      score,
      cause,
    });
    self.schedule.push(self.now + delay, respawn);
  }

  fn feed(&mut self, id: &str, kind: EntityKind, events: &mut Vec<WorldEvent>) {
    let pool = match kind {
      EntityKind::Player => &mut self.players,
      EntityKind::Ai => &mut self.ai,
    };
    let Some(entity) = pool.get_mut(id) else { return };
    if !entity.alive {
      return;
    }
    for food_id in food_in_reach(entity.head(), self.food.items()) {
      let Some(swap) = self.food.consume(food_id, &self.bounds, &mut self.rng) else { continue };
      apply_food(entity, &swap.removed);
      events.push(WorldEvent::FoodUpdate(swap));
    }
  }
}

impl Default for World {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
impl World {
  /// No AI and no food, so scenarios only contain what the test puts there.
  pub(crate) fn bare(seed: u64) -> Self {
    Self::empty(StdRng::seed_from_u64(seed))
  }

  pub(crate) fn now(&self) -> i64 {
    self.now
  }

  pub(crate) fn leaderboard(&self) -> &[LeaderboardEntry] {
    &self.leaderboard
  }

  pub(crate) fn ai(&self, id: &str) -> Option<&Entity> {
    self.ai.get(id)
  }

  pub(crate) fn player_count(&self) -> usize {
    self.players.len()
  }

  pub(crate) fn insert(&mut self, entity: Entity) {
    match entity.kind {
      EntityKind::Player => self.players.insert(entity.id.clone(), entity),
      EntityKind::Ai => self.ai.insert(entity.id.clone(), entity),
    };
  }

  pub(crate) fn food_mut(&mut self) -> &mut FoodManager {
    &mut self.food
  }

  pub(crate) fn scheduled(&self) -> usize {
    self.schedule.len()
  }
}
