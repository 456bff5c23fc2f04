use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

pub use error::Error;
pub use hero::{hero_display_name, Hero};
pub use league::{sanitize_league_name, League};
pub use message::{HeroId, LeagueId, MatchId, Message};
pub use model::{format_duration, Match, Side};

pub mod error;
pub mod hero;
pub mod league;
pub mod message;
pub mod model;
pub mod structures;

use message::{HeroPayload, LeaguePayload, MatchPatch, MatchPayload};

/// Owner of every live match, every known league and the hero roster.
///
/// The store is driven by one caller at a time: each message runs to
/// completion before the next is applied.
#[derive(Debug, Default)]
pub struct RecordStore {
    matches: IndexMap<MatchId, Match>,
    leagues: HashMap<LeagueId, League>,
    heroes: HashMap<HeroId, Hero>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON message and apply it. A malformed message leaves the store untouched.
    pub fn apply_json(&mut self, json: &str) -> Result<(), Error> {
        let message = serde_json::from_str(json)?;
        self.apply(message);
        Ok(())
    }

    pub fn apply(&mut self, message: Message) {
        match message {
            Message::Games { updates, new_games } => self.replace_and_update(updates, new_games),
            Message::Leagues(leagues) => self.merge_leagues(leagues),
            Message::Heroes(heroes) => self.merge_heroes(heroes),
        }
    }

    /// Rebuild the live set from one games message.
    ///
    /// New games are built first so that an update naming the same match
    /// lands on the fresh record. Any match this call does not name is
    /// evicted.
    pub fn replace_and_update(
        &mut self,
        updates: IndexMap<MatchId, MatchPatch>,
        new_games: IndexMap<MatchId, MatchPayload>,
    ) {
        let mut previous = std::mem::take(&mut self.matches);
        let mut live = IndexMap::with_capacity(new_games.len() + updates.len());

        for (match_id, payload) in new_games {
            live.insert(match_id.clone(), Match::new(match_id, payload));
        }

        for (match_id, patch) in updates {
            if let Some(game) = live.get_mut(&match_id) {
                game.apply(patch);
                continue;
            }
            let mut game = previous.swap_remove(&match_id).unwrap_or_else(|| {
                warn!("Received an update for unknown match {match_id}, starting from an empty record");
                Match::empty(match_id.clone())
            });
            game.apply(patch);
            live.insert(match_id, game);
        }

        if !previous.is_empty() {
            debug!(
                "Evicting {} matches no longer live: {:?}",
                previous.len(),
                previous.keys().collect::<Vec<_>>()
            );
        }
        self.matches = live;
    }

    /// Create or overwrite leagues. Leagues are never removed here.
    pub fn merge_leagues(&mut self, leagues: IndexMap<LeagueId, LeaguePayload>) {
        debug!("Merging {} leagues", leagues.len());
        for (league_id, payload) in leagues {
            self.leagues.insert(league_id, League::new(league_id, payload));
        }
    }

    /// Create or overwrite heroes. Heroes missing from the roster are kept.
    pub fn merge_heroes(&mut self, heroes: IndexMap<HeroId, HeroPayload>) {
        debug!("Merging {} heroes", heroes.len());
        for (hero_id, payload) in heroes {
            self.heroes.insert(hero_id, Hero::new(hero_id, payload));
        }
    }

    /// Drop every league that no live match points at. Returns how many were removed.
    pub fn retain_referenced_leagues(&mut self) -> usize {
        let referenced: HashSet<LeagueId> =
            self.matches.values().filter_map(Match::league_id).collect();
        let before = self.leagues.len();
        self.leagues.retain(|league_id, _| referenced.contains(league_id));
        before - self.leagues.len()
    }

    pub fn get(&self, match_id: &MatchId) -> Option<&Match> {
        self.matches.get(match_id)
    }

    pub fn league(&self, league_id: LeagueId) -> Option<&League> {
        self.leagues.get(&league_id)
    }

    pub fn hero(&self, hero_id: HeroId) -> Option<&Hero> {
        self.heroes.get(&hero_id)
    }

    pub fn hero_name(&self, hero_id: HeroId) -> Option<&str> {
        self.hero(hero_id).map(|hero| hero.display_name.as_str())
    }

    /// Display name of the league a match belongs to, or `""` when unknown.
    pub fn league_name(&self, game: &Match) -> &str {
        game.league_id()
            .and_then(|league_id| self.leagues.get(&league_id))
            .map_or("", |league| league.name.as_str())
    }

    /// Live match IDs in the order they entered the live set.
    pub fn live_ids(&self) -> impl Iterator<Item = &MatchId> {
        self.matches.keys()
    }

    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn num_leagues(&self) -> usize {
        self.leagues.len()
    }

    pub fn num_heroes(&self) -> usize {
        self.heroes.len()
    }

    /// Live matches, longest running first. Ties keep live-set order, and
    /// absent, negative or non-finite durations count as zero.
    pub fn by_duration(&self) -> Vec<&Match> {
        fn elapsed(game: &Match) -> f64 {
            game.duration()
                .filter(|d| d.is_finite())
                .map_or(0.0, |d| d.max(0.0))
        }

        let mut sorted: Vec<&Match> = self.matches.values().collect();
        // `sort_by` is stable
        sorted.sort_by(|a, b| {
            elapsed(b)
                .partial_cmp(&elapsed(a))
                .unwrap_or(Ordering::Equal)
        });
        sorted
    }

    pub fn ids_by_duration(&self) -> Vec<&MatchId> {
        self.by_duration().into_iter().map(Match::id).collect()
    }
}
