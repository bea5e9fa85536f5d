use axum::{
  extract::{State, WebSocketUpgrade},
  http::Method,
  response::IntoResponse,
  routing::get,
  Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod app;
mod game;
mod protocol;
mod reward;
mod shared;
mod transport;

use app::config::ServerConfig;
use game::room::Room;
use reward::{LogRewardSink, RewardSink, WebhookRewardSink};

const ROOT_STATUS: &str = "OopSss Server Running";
const HEALTH_STATUS: &str = "ok";

#[derive(Clone)]
struct AppState {
  room: Arc<Room>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
  status: &'static str,
  timestamp: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = ServerConfig::from_env()?;

  let rewards: Arc<dyn RewardSink> = match config.reward_webhook_url.clone() {
    Some(endpoint) => {
      tracing::info!(endpoint = %endpoint, signed = config.reward_webhook_secret.is_some(), "reward webhook enabled");
      Arc::new(WebhookRewardSink::new(endpoint, config.reward_webhook_secret.clone()))
    }
    None => Arc::new(LogRewardSink),
  };

  let room = Arc::new(Room::new(rewards, config.max_players));
  room.ensure_loop();
  let state = Arc::new(AppState { room });

  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers(Any);

  let app: Router = Router::new()
    .route("/", get(root))
    .route("/health", get(health))
    .route("/api/health", get(health))
    .route("/ws", get(ws_handler))
    .layer(cors)
    .with_state(state);

  let address = format!("0.0.0.0:{}", config.port);
  tracing::info!(max_players = config.max_players, "listening on {address}");

  let listener = tokio::net::TcpListener::bind(&address).await?;
  axum::serve(listener, app).await?;

  Ok(())
}

async fn root() -> Json<HealthResponse> {
  status_body(ROOT_STATUS)
}

async fn health() -> Json<HealthResponse> {
  status_body(HEALTH_STATUS)
}

fn status_body(status: &'static str) -> Json<HealthResponse> {
  Json(HealthResponse {
    status,
    timestamp: chrono::Utc::now().to_rfc3339(),
  })
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let room = Arc::clone(&state.room);
  ws.on_upgrade(move |socket| transport::ws_session::handle_socket(socket, room))
}
