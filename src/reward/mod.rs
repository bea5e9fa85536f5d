use crate::shared::signing::{sign_payload, SIGNATURE_HEADER};
use serde::Serialize;

/// What the reward/leaderboard side gets told. Scores are final values at the
/// moment the snake stopped playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RewardEvent {
    Eliminated {
        #[serde(rename = "playerId")]
        player_id: String,
        name: String,
        score: i64,
    },
    SessionEnded {
        #[serde(rename = "playerId")]
        player_id: String,
        name: String,
        score: i64,
    },
}

pub trait RewardSink: Send + Sync {
    fn record(&self, event: RewardEvent);
}

#[derive(Debug, Default)]
pub struct LogRewardSink;

impl RewardSink for LogRewardSink {
    fn record(&self, event: RewardEvent) {
        tracing::info!(?event, "reward event");
    }
}

/// Fire-and-forget POST per event. Delivery failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct WebhookRewardSink {
    client: reqwest::Client,
    endpoint: String,
    secret: Option<String>,
}

impl WebhookRewardSink {
    pub fn new(endpoint: String, secret: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            secret,
        }
    }
}

impl RewardSink for WebhookRewardSink {
    fn record(&self, event: RewardEvent) {
        let body = match serde_json::to_vec(&event) {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(?error, "failed to encode reward event");
                return;
            }
        };
        let signature = match &self.secret {
            Some(secret) => match sign_payload(&body, secret) {
                Ok(signature) => Some(signature),
                Err(error) => {
                    tracing::warn!(?error, "failed to sign reward event");
                    return;
                }
            },
            None => None,
        };

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            let mut request = client
                .post(endpoint.as_str())
                .header("content-type", "application/json")
                .body(body);
            if let Some(signature) = signature {
                request = request.header(SIGNATURE_HEADER, signature);
            }
            match request.send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(
                        status = %response.status(),
                        endpoint = %endpoint,
                        "reward webhook rejected event"
                    );
                }
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(?error, endpoint = %endpoint, "reward webhook failed");
                }
            }
        });
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_events_serialize_with_type_tag() {
        let event = RewardEvent::Eliminated {
            player_id: "p1".to_string(),
            name: "Player7".to_string(),
            score: 12,
        };
        let value = serde_json::to_value(&event).expect("json");
        assert_eq!(value["type"], "eliminated");
        assert_eq!(value["playerId"], "p1");
        assert_eq!(value["score"], 12);

        let ended = RewardEvent::SessionEnded {
            player_id: "p1".to_string(),
            name: "Player7".to_string(),
            score: 3,
        };
        let value = serde_json::to_value(&ended).expect("json");
        assert_eq!(value["type"], "sessionEnded");
    }
}
