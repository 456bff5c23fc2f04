use crate::steam_api::live_games::LiveGamesRequester;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use dotaware_store::MatchId;
use dotaware_view::{HtmlSnapshot, Node};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub snapshot: HtmlSnapshot,
    pub live_games: Arc<LiveGamesRequester>,
}

/// - `GET /` - latest rendered page
/// - `GET /api/view` - latest view tree as JSON
/// - `GET /api/finished` - recently finished match IDs, most recent first
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/view", get(view))
        .route("/api/finished", get(finished))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.snapshot.html())
}

async fn view(State(state): State<AppState>) -> Json<Node> {
    Json(state.snapshot.view())
}

async fn finished(State(state): State<AppState>) -> Json<Vec<MatchId>> {
    Json(state.live_games.finished().await)
}
