use super::constants::{SUMMARY_LOG_EVERY_TICKS, TICKS_PER_SECOND};
use super::types::EntityKind;
use super::world::{Intent, World, WorldEvent};
use crate::protocol::{self, ClientMessage, ServerMessage};
use crate::reward::{RewardEvent, RewardSink};
use session::{SessionEntry, ViewRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use uuid::Uuid;

mod session;

/// The one arena. The tick loop and every connection handler take the same
/// lock, so intents and ticks never interleave mid-step.
pub struct Room {
  state: Mutex<RoomState>,
  running: AtomicBool,
  rewards: Arc<dyn RewardSink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RoomStats {
  connections: usize,
  alive_players: usize,
  alive_ai: usize,
  food: usize,
}

#[derive(Debug)]
struct RoomState {
  sessions: HashMap<String, SessionEntry>,
  world: World,
  max_players: usize,
}

impl Room {
  pub fn new(rewards: Arc<dyn RewardSink>, max_players: usize) -> Self {
    Self::with_world(World::new(), rewards, max_players)
  }

  pub(crate) fn with_world(world: World, rewards: Arc<dyn RewardSink>, max_players: usize) -> Self {
    Self {
      state: Mutex::new(RoomState {
        sessions: HashMap::new(),
        world,
        max_players,
      }),
      running: AtomicBool::new(false),
      rewards,
    }
  }

  /// Spawns a snake for the connection and sends it the current world
  /// straight away. Returns the session id, which doubles as the player id.
  pub async fn add_session(&self, sender: UnboundedSender<String>) -> String {
    let session_id = Uuid::new_v4().to_string();
    let mut state = self.state.lock().await;
    if state.sessions.len() >= state.max_players {
      // Advisory only; the session is still admitted.
      tracing::warn!(
        connections = state.sessions.len(),
        max_players = state.max_players,
        "connection count above configured maximum"
      );
    }

    let head = state.world.add_player(session_id.clone()).position;
    let entry = SessionEntry {
      sender,
      player_id: session_id.clone(),
      view: ViewRecord::centered_on(head),
    };
    let snapshot = state.world.snapshot(false);
    if let Some(payload) = protocol::encode_server_message(&ServerMessage::GameState(&snapshot)) {
      entry.send(payload);
    }
    state.sessions.insert(session_id.clone(), entry);
    tracing::info!(session_id = %session_id, "player connected");
    session_id
  }

  pub async fn remove_session(&self, session_id: &str) {
    let mut state = self.state.lock().await;
    state.disconnect_session(session_id, self.rewards.as_ref());
  }

  pub async fn handle_text_message(&self, session_id: &str, text: &str) {
    let Some(message) = protocol::decode_client_message(text) else {
      tracing::trace!(session_id, "ignoring unreadable client frame");
      return;
    };
    let intent = match message {
      ClientMessage::Move { velocity } => Intent::Move(velocity),
      ClientMessage::Boost => Intent::Boost,
      ClientMessage::SetName { name } => Intent::SetName(name),
    };
    let mut state = self.state.lock().await;
    let Some(player_id) = state.session_player_id(session_id) else { return };
    state.world.enqueue_intent(&player_id, intent);
  }

  /// Starts the fixed-rate loop once; later calls are no-ops. A slow tick
  /// pushes the next one back instead of bunching ticks up.
  pub fn ensure_loop(self: &Arc<Self>) {
    if self
      .running
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      return;
    }

    let room = Arc::clone(self);
    tokio::spawn(async move {
      let period = std::time::Duration::from_micros(1_000_000 / TICKS_PER_SECOND);
      let mut interval = tokio::time::interval(period);
      interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
      loop {
        interval.tick().await;
        room.tick_once().await;
      }
    });
  }

  pub(crate) async fn tick_once(&self) {
    let mut state = self.state.lock().await;
    state.tick(self.rewards.as_ref());
  }
}

impl RoomState {
  fn stats(&self) -> RoomStats {
    let (alive_players, alive_ai) = self.world.alive_counts();
    RoomStats {
      connections: self.sessions.len(),
      alive_players,
      alive_ai,
      food: self.world.food().len(),
    }
  }

  fn session_player_id(&self, session_id: &str) -> Option<String> {
    self
      .sessions
      .get(session_id)
      .map(|entry| entry.player_id.clone())
  }

  fn disconnect_session(&mut self, session_id: &str, rewards: &dyn RewardSink) {
    let Some(entry) = self.sessions.remove(session_id) else { return };
    if let Some(player) = self.world.remove_player(&entry.player_id) {
      rewards.record(RewardEvent::SessionEnded {
        player_id: player.id.clone(),
        name: player.name.clone(),
        score: player.score,
      });
    }
    tracing::info!(session_id, "player disconnected");
  }

  fn tick(&mut self, rewards: &dyn RewardSink) {
    let events = self.world.tick();
    let mut stale = Vec::new();
    for event in events {
      self.dispatch(event, rewards, &mut stale);
    }
    self.retarget_views();
    self.broadcast_state(&mut stale);

    stale.sort();
    stale.dedup();
    for session_id in stale {
      self.disconnect_session(&session_id, rewards);
    }

    if self.world.ticks() % SUMMARY_LOG_EVERY_TICKS == 0 {
      let stats = self.stats();
      tracing::debug!(
        tick = self.world.ticks(),
        connections = stats.connections,
        alive_players = stats.alive_players,
        alive_ai = stats.alive_ai,
        food = stats.food,
        "world summary"
      );
    }
  }

  fn dispatch(&mut self, event: WorldEvent, rewards: &dyn RewardSink, stale: &mut Vec<String>) {
    match event {
      WorldEvent::Eliminated {
        id,
        kind: EntityKind::Player,
        name,
        score,
        ..
      } => {
        self.send_to_player(&id, &ServerMessage::GameOver { score }, stale);
        rewards.record(RewardEvent::Eliminated {
          player_id: id,
          name,
          score,
        });
      }
      WorldEvent::Respawned {
        id,
        kind: EntityKind::Player,
        position,
      } => {
        let message = ServerMessage::Respawn {
          x: position.x,
          y: position.y,
        };
        self.send_to_player(&id, &message, stale);
      }
      WorldEvent::FoodUpdate(swap) => {
        let message = ServerMessage::FoodUpdate {
          removed: swap.removed.id,
          added: swap.added,
        };
        if let Some(payload) = protocol::encode_server_message(&message) {
          self.broadcast(payload, stale);
        }
      }
      WorldEvent::Eliminated { .. } | WorldEvent::Respawned { .. } => {}
    }
  }

  fn send_to_player(&self, player_id: &str, message: &ServerMessage<'_>, stale: &mut Vec<String>) {
    let Some((session_id, entry)) = self
      .sessions
      .iter()
      .find(|(_, entry)| entry.player_id == player_id)
    else {
      return;
    };
    let Some(payload) = protocol::encode_server_message(message) else { return };
    if !entry.send(payload) {
      stale.push(session_id.clone());
    }
  }

  fn broadcast(&self, payload: String, stale: &mut Vec<String>) {
    for (session_id, entry) in &self.sessions {
      if !entry.send(payload.clone()) {
        stale.push(session_id.clone());
      }
    }
  }

  fn retarget_views(&mut self) {
    for entry in self.sessions.values_mut() {
      if let Some(player) = self.world.player(&entry.player_id) {
        if player.alive {
          entry.view.retarget(player.position);
        }
      }
    }
  }

  fn broadcast_state(&self, stale: &mut Vec<String>) {
    if self.sessions.is_empty() {
      return;
    }
    let snapshot = self.world.snapshot(true);
    let Some(payload) = protocol::encode_server_message(&ServerMessage::GameState(&snapshot)) else {
      return;
    };
    self.broadcast(payload, stale);
  }
}
