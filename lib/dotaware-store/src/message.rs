use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Identifier of a live match. Steam hands these out as integers, but they
/// travel as JSON object keys so they are kept as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl From<u64> for MatchId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for MatchId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub u16);

/// Everything the transport can deliver to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Full snapshots of newly seen matches plus partial updates of the rest.
    /// Together they name every match that is still live.
    Games {
        #[serde(default)]
        updates: IndexMap<MatchId, MatchPatch>,
        #[serde(default)]
        new_games: IndexMap<MatchId, MatchPayload>,
    },
    Leagues(IndexMap<LeagueId, LeaguePayload>),
    Heroes(IndexMap<HeroId, HeroPayload>),
}

/// Complete match snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoreboard: Option<Scoreboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radiant_team: Option<TeamInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dire_team: Option<TeamInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league_id: Option<LeagueId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radiant: Option<TeamBoard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dire: Option<TeamBoard>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamBoard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tower_state: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barracks_state: Option<u8>,
    #[serde(default)]
    pub players: Vec<RosterEntry>,
}

/// One seat of a team's roster, pointing into the match's player list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub account_id: AccountId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_slot: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPayload {
    pub account_id: AccountId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_id: Option<HeroId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Sparse update of a match. The outer `Option` says whether the field was
/// named at all, the inner one carries an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchPatch {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub scoreboard: Option<Option<Scoreboard>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub players: Option<Option<Vec<PlayerPayload>>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub radiant_team: Option<Option<TeamInfo>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub dire_team: Option<Option<TeamInfo>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub league_id: Option<Option<LeagueId>>,
}

impl MatchPatch {
    /// Patch naming only the top-level fields that differ between two snapshots.
    pub fn diff(old: &MatchPayload, new: &MatchPayload) -> Self {
        fn changed<T: Clone + PartialEq>(old: &Option<T>, new: &Option<T>) -> Option<Option<T>> {
            (old != new).then(|| new.clone())
        }

        Self {
            duration: changed(&old.duration, &new.duration),
            scoreboard: changed(&old.scoreboard, &new.scoreboard),
            players: changed(&old.players, &new.players),
            radiant_team: changed(&old.radiant_team, &new.radiant_team),
            dire_team: changed(&old.dire_team, &new.dire_team),
            league_id: changed(&old.league_id, &new.league_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaguePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leagueid: Option<LeagueId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itemdef: Option<u32>,
}

/// One entry of the hero roster. `localized_name` is only sent when a language is requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<HeroId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
