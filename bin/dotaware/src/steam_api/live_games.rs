use super::{Publish, SteamApi, DOTA2_MATCH};
use crate::tracker::GameTracker;
use dotaware_store::message::{
    MatchPayload, PlayerPayload, RosterEntry, Scoreboard, TeamBoard, TeamInfo,
};
use dotaware_store::{LeagueId, MatchId, Message};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
struct LiveLeagueGamesResponse {
    result: LiveLeagueGames,
}

#[derive(Debug, Deserialize)]
struct LiveLeagueGames {
    #[serde(default)]
    games: Vec<LiveGame>,
}

/// One entry of `GetLiveLeagueGames`. Only the fields the store knows about are kept.
#[derive(Debug, Deserialize)]
pub struct LiveGame {
    pub match_id: u64,
    pub league_id: Option<u32>,
    #[serde(default)]
    pub players: Vec<PlayerPayload>,
    pub radiant_team: Option<LiveTeam>,
    pub dire_team: Option<LiveTeam>,
    /// Missing until the game has started.
    pub scoreboard: Option<LiveScoreboard>,
}

#[derive(Debug, Deserialize)]
pub struct LiveTeam {
    pub team_name: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LiveScoreboard {
    pub duration: Option<f64>,
    pub radiant: Option<LiveSide>,
    pub dire: Option<LiveSide>,
}

#[derive(Debug, Deserialize)]
pub struct LiveSide {
    pub score: Option<u32>,
    pub tower_state: Option<u16>,
    pub barracks_state: Option<u8>,
    #[serde(default)]
    pub players: Vec<RosterEntry>,
}

impl LiveGame {
    /// Reshape into the store's snapshot, lifting the duration out of the scoreboard.
    pub fn into_payload(self) -> (MatchId, MatchPayload) {
        let (duration, scoreboard) = match self.scoreboard {
            Some(scoreboard) => (
                scoreboard.duration,
                Some(Scoreboard {
                    radiant: scoreboard.radiant.map(LiveSide::into_board),
                    dire: scoreboard.dire.map(LiveSide::into_board),
                }),
            ),
            None => (None, None),
        };

        let payload = MatchPayload {
            duration,
            scoreboard,
            players: Some(self.players),
            radiant_team: self.radiant_team.map(LiveTeam::into_info),
            dire_team: self.dire_team.map(LiveTeam::into_info),
            league_id: self.league_id.map(LeagueId),
        };
        (MatchId::from(self.match_id), payload)
    }
}

impl LiveTeam {
    fn into_info(self) -> TeamInfo {
        TeamInfo {
            team_name: self.team_name,
            logo_url: self.logo_url,
        }
    }
}

impl LiveSide {
    fn into_board(self) -> TeamBoard {
        TeamBoard {
            score: self.score,
            tower_state: self.tower_state,
            barracks_state: self.barracks_state,
            players: self.players,
        }
    }
}

impl SteamApi {
    /// Calls `GetLiveLeagueGames`, the list of league games in progress.
    pub async fn get_live_league_games(&self) -> anyhow::Result<Vec<LiveGame>> {
        let url = self.build_endpoint(DOTA2_MATCH, "GetLiveLeagueGames", "v1");
        let response: LiveLeagueGamesResponse = self.request(&url, &[]).await?;
        Ok(response.result.games)
    }
}

/// Requester polling live league games and publishing them as games messages.
///
/// This should have its [`Publish::start`] method called within a Tokio task.
#[derive(Debug)]
pub struct LiveGamesRequester {
    steam_api: Arc<SteamApi>,
    interval: Duration,
    tracker: Mutex<GameTracker>,
}

impl LiveGamesRequester {
    pub fn new(steam_api: Arc<SteamApi>, interval: Duration, history: usize) -> Self {
        Self {
            steam_api,
            interval,
            tracker: Mutex::new(GameTracker::new(history)),
        }
    }

    /// Recently finished matches, most recent first.
    pub async fn finished(&self) -> Vec<MatchId> {
        self.tracker.lock().await.finished()
    }
}

impl Publish for LiveGamesRequester {
    async fn fetch(&self) -> anyhow::Result<Message> {
        let games = self.steam_api.get_live_league_games().await?;
        debug!("Fetched {} live league games", games.len());
        let games = games.into_iter().map(LiveGame::into_payload).collect();
        Ok(self.tracker.lock().await.sync(games))
    }

    #[tracing::instrument(skip_all)]
    async fn start(&self, publishing_channel: UnboundedSender<Message>) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let message = match self.fetch().await {
                Ok(message) => message,
                Err(e) => {
                    error!("Failed to fetch live league games: {e:?}");
                    continue;
                }
            };
            if publishing_channel.send(message).is_err() {
                error!("Publishing channel closed, stopping live games requester");
                return;
            }
        }
    }
}
