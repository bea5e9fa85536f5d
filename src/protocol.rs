use crate::game::snapshot::GameStateSnapshot;
use crate::game::types::{FoodId, FoodItem, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EVENT_MOVE: &str = "move";
pub const EVENT_BOOST: &str = "boost";
pub const EVENT_SET_NAME: &str = "setName";

#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
  Move { velocity: Point },
  Boost,
  SetName { name: String },
}

#[derive(Debug, Deserialize)]
struct Envelope {
  #[serde(rename = "type")]
  event: String,
  #[serde(default)]
  data: Value,
}

/// Unknown events and unreadable frames decode to `None`. A `move` always
/// decodes; unusable components come back as NaN so the whole vector is
/// rejected downstream.
pub fn decode_client_message(text: &str) -> Option<ClientMessage> {
  let envelope: Envelope = serde_json::from_str(text).ok()?;
  match envelope.event.as_str() {
    EVENT_MOVE => Some(ClientMessage::Move {
      velocity: Point {
        x: read_number(&envelope.data, "velocityX"),
        y: read_number(&envelope.data, "velocityY"),
      },
    }),
    EVENT_BOOST => Some(ClientMessage::Boost),
    EVENT_SET_NAME => {
      let name = match envelope.data {
        Value::String(name) => name,
        Value::Object(map) => map.get("name")?.as_str()?.to_string(),
        _ => return None,
      };
      Some(ClientMessage::SetName { name })
    }
    _ => None,
  }
}

fn read_number(data: &Value, key: &str) -> f64 {
  data.get(key).and_then(Value::as_f64).unwrap_or(f64::NAN)
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerMessage<'a> {
  GameState(&'a GameStateSnapshot),
  GameOver { score: i64 },
  Respawn { x: f64, y: f64 },
  FoodUpdate { removed: FoodId, added: FoodItem },
}

pub fn encode_server_message(message: &ServerMessage<'_>) -> Option<String> {
  match serde_json::to_string(message) {
    Ok(text) => Some(text),
    Err(error) => {
      tracing::warn!(?error, "failed to encode server message");
      None
    }
  }
}
