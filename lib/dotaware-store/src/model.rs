use crate::message::{
    AccountId, HeroId, LeagueId, MatchId, MatchPatch, MatchPayload, PlayerPayload, Scoreboard,
    TeamBoard, TeamInfo,
};
use crate::structures::{BarracksState, TowerState};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Radiant,
    Dire,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub account_id: AccountId,
    pub name: Option<String>,
    pub hero_id: Option<HeroId>,
    pub team: Option<u8>,
}

impl From<PlayerPayload> for Player {
    fn from(value: PlayerPayload) -> Self {
        Self {
            account_id: value.account_id,
            name: value.name,
            hero_id: value.hero_id,
            team: value.team,
        }
    }
}

/// A live match as held by the store.
///
/// Every accessor is total: missing or partially populated data comes back
/// as `None`, zero, or the documented default, never as a panic.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    id: MatchId,
    duration: Option<f64>,
    scoreboard: Option<Scoreboard>,
    players: HashMap<AccountId, Player>,
    radiant_team: Option<TeamInfo>,
    dire_team: Option<TeamInfo>,
    league_id: Option<LeagueId>,
}

impl Match {
    pub fn new(id: MatchId, payload: MatchPayload) -> Self {
        Self {
            players: map_players(&id, payload.players.unwrap_or_default()),
            id,
            duration: payload.duration,
            scoreboard: payload.scoreboard,
            radiant_team: payload.radiant_team,
            dire_team: payload.dire_team,
            league_id: payload.league_id,
        }
    }

    pub fn empty(id: MatchId) -> Self {
        Self::new(id, MatchPayload::default())
    }

    /// Replace every field the patch names, leaving the others untouched.
    pub fn apply(&mut self, patch: MatchPatch) {
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(scoreboard) = patch.scoreboard {
            self.scoreboard = scoreboard;
        }
        if let Some(players) = patch.players {
            self.players = map_players(&self.id, players.unwrap_or_default());
        }
        if let Some(radiant_team) = patch.radiant_team {
            self.radiant_team = radiant_team;
        }
        if let Some(dire_team) = patch.dire_team {
            self.dire_team = dire_team;
        }
        if let Some(league_id) = patch.league_id {
            self.league_id = league_id;
        }
    }

    pub fn id(&self) -> &MatchId {
        &self.id
    }

    pub fn league_id(&self) -> Option<LeagueId> {
        self.league_id
    }

    pub fn players(&self) -> &HashMap<AccountId, Player> {
        &self.players
    }

    /// Elapsed game time in seconds.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn duration_display(&self) -> Option<String> {
        self.duration.map(format_duration)
    }

    /// Player seated at `slot` of the side's roster.
    pub fn player(&self, side: Side, slot: usize) -> Option<&Player> {
        let entry = self.board(side)?.players.get(slot)?;
        self.players.get(&entry.account_id)
    }

    pub fn player_name(&self, side: Side, slot: usize) -> Option<&str> {
        self.player(side, slot)?.name.as_deref()
    }

    /// Hero picked by the player at `slot`. Steam reports `0` before a pick.
    pub fn hero(&self, side: Side, slot: usize) -> Option<HeroId> {
        self.player(side, slot)?
            .hero_id
            .filter(|hero_id| hero_id.0 != 0)
    }

    pub fn num_players(&self, side: Side) -> usize {
        self.board(side).map_or(0, |board| board.players.len())
    }

    pub fn team_name(&self, side: Side) -> Option<&str> {
        self.team(side)?.team_name.as_deref()
    }

    pub fn logo(&self, side: Side) -> Option<&str> {
        self.team(side)?.logo_url.as_deref()
    }

    pub fn score(&self, side: Side) -> Option<u32> {
        self.board(side)?.score
    }

    pub fn towers(&self, side: Side) -> TowerState {
        self.board(side)
            .and_then(|board| board.tower_state)
            .map(TowerState::new)
            .unwrap_or_default()
    }

    pub fn barracks(&self, side: Side) -> BarracksState {
        self.board(side)
            .and_then(|board| board.barracks_state)
            .map(BarracksState::new)
            .unwrap_or_default()
    }

    fn board(&self, side: Side) -> Option<&TeamBoard> {
        let scoreboard = self.scoreboard.as_ref()?;
        match side {
            Side::Radiant => scoreboard.radiant.as_ref(),
            Side::Dire => scoreboard.dire.as_ref(),
        }
    }

    fn team(&self, side: Side) -> Option<&TeamInfo> {
        match side {
            Side::Radiant => self.radiant_team.as_ref(),
            Side::Dire => self.dire_team.as_ref(),
        }
    }
}

/// Key a raw player list by account ID. A repeated account keeps its last entry.
fn map_players(match_id: &MatchId, players: Vec<PlayerPayload>) -> HashMap<AccountId, Player> {
    let mut mapped = HashMap::with_capacity(players.len());
    for player in players {
        let account_id = player.account_id;
        if mapped.insert(account_id, player.into()).is_some() {
            debug!("Match {match_id} lists account {account_id:?} more than once");
        }
    }
    mapped
}

/// Format elapsed seconds as `Xm Ys`, truncating rather than rounding.
pub fn format_duration(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}m {}s", seconds / 60, seconds % 60)
}
