use crate::message::{LeagueId, LeaguePayload};

/// Prefix Steam puts in front of every league's localization tag.
const NAME_PREFIX: &str = "#DOTA_Item_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub description: Option<String>,
    pub tournament_url: Option<String>,
    pub itemdef: Option<u32>,
}

impl League {
    pub fn new(id: LeagueId, payload: LeaguePayload) -> Self {
        Self {
            id,
            name: sanitize_league_name(&payload.name),
            description: payload.description,
            tournament_url: payload.tournament_url,
            itemdef: payload.itemdef,
        }
    }
}

/// Turn a raw league tag such as `#DOTA_Item_joinDOTA_League_Season_3` into
/// `joinDOTA League Season 3`.
pub fn sanitize_league_name(raw: &str) -> String {
    raw.strip_prefix(NAME_PREFIX).unwrap_or(raw).replace('_', " ")
}
