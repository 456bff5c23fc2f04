use circular_queue::CircularQueue;
use dotaware_store::message::{MatchPatch, MatchPayload};
use dotaware_store::{MatchId, Message};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

/// Turns successive full listings of live games into store messages.
///
/// Matches seen for the first time are sent whole, matches seen before are
/// sent as a patch of whatever changed since the previous listing. Matches
/// that drop out of the listing are remembered as finished.
#[derive(Debug)]
pub struct GameTracker {
    active: IndexMap<MatchId, MatchPayload>,
    finished: CircularQueue<MatchId>,
}

impl GameTracker {
    pub fn new(history: usize) -> Self {
        Self {
            active: IndexMap::new(),
            finished: CircularQueue::with_capacity(history.max(1)),
        }
    }

    /// A match listed more than once is taken from its last entry.
    pub fn sync(&mut self, games: Vec<(MatchId, MatchPayload)>) -> Message {
        let mut listing: IndexMap<MatchId, MatchPayload> = IndexMap::with_capacity(games.len());
        for (match_id, payload) in games {
            if listing.insert(match_id.clone(), payload).is_some() {
                warn!("Match {match_id} is listed more than once, keeping the last entry");
            }
        }

        let mut previous = std::mem::take(&mut self.active);
        let mut updates = IndexMap::new();
        let mut new_games = IndexMap::new();

        for (match_id, payload) in listing {
            match previous.swap_remove(&match_id) {
                Some(old) => {
                    updates.insert(match_id.clone(), MatchPatch::diff(&old, &payload));
                }
                None => {
                    new_games.insert(match_id.clone(), payload.clone());
                }
            }
            self.active.insert(match_id, payload);
        }

        for match_id in previous.into_keys() {
            info!("Match {match_id} is no longer live");
            self.finished.push(match_id);
        }
        debug!(
            "Synced {} live games ({} new)",
            self.active.len(),
            new_games.len()
        );

        Message::Games { updates, new_games }
    }

    /// Recently finished matches, most recent first.
    pub fn finished(&self) -> Vec<MatchId> {
        self.finished.iter().cloned().collect()
    }
}
