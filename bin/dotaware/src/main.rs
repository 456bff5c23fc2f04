use anyhow::Context as _;
use config::Config;
use dotaware_store::Message;
use dotaware_view::{HtmlSnapshot, LiveView};
use handler::view::ViewHandler;
use server::AppState;
use std::sync::Arc;
use std::time::Duration;
use steam_api::heroes::HeroRequester;
use steam_api::{leagues::LeagueRequester, live_games::LiveGamesRequester, Publish, SteamApi};
use tokio::sync::mpsc::unbounded_channel;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod handler;
mod server;
mod steam_api;
mod tracker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional
    let _ = dotenvy::dotenv();
    setup_tracing_subscriber();

    info!("Loading configuration");
    let config = Config::load(std::env::args().nth(1)).await?;

    info!("Setting up Steam API client");
    let steam_api = Arc::new(SteamApi::new(
        config.steam_base_url.clone(),
        config.steam_api_key.clone(),
    ));

    info!("Starting view handler");
    let (message_tx, message_rx) = unbounded_channel::<Message>();
    let snapshot = HtmlSnapshot::new(config.page_refresh());
    let live_view = LiveView::new(config.view.clone(), snapshot.clone());
    tokio::task::spawn(ViewHandler::new(live_view, message_rx).start());

    info!("Starting requester tasks");
    let league_requester = LeagueRequester::new(
        steam_api.clone(),
        Duration::from_secs(config.league_refresh_secs),
    );
    tokio::task::spawn({
        let message_tx = message_tx.clone();
        async move {
            league_requester.start(message_tx).await;
        }
    });
    let hero_requester = HeroRequester::new(
        steam_api.clone(),
        Duration::from_secs(config.hero_refresh_secs),
        config.hero_language.clone(),
    );
    tokio::task::spawn({
        let message_tx = message_tx.clone();
        async move {
            hero_requester.start(message_tx).await;
        }
    });
    let live_games_requester = Arc::new(LiveGamesRequester::new(
        steam_api.clone(),
        Duration::from_secs(config.iteration_secs),
        config.finished_history,
    ));
    tokio::task::spawn({
        let live_games_requester = live_games_requester.clone();
        async move {
            live_games_requester.start(message_tx).await;
        }
    });

    info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    let app = server::routes().with_state(AppState {
        snapshot,
        live_games: live_games_requester,
    });
    axum::serve(listener, app)
        .await
        .context("Server exited its loop")?;

    Ok(())
}

fn setup_tracing_subscriber() {
    let layer = fmt::layer()
        .pretty()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_thread_ids(false)
        .with_target(false);
    tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::from_default_env())
        .init();
}
