use super::{Publish, SteamApi, DOTA2_ECON};
use dotaware_store::message::HeroPayload;
use dotaware_store::Message;
use indexmap::IndexMap;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, warn};

#[derive(Debug, Deserialize)]
struct HeroesResponse {
    result: HeroList,
}

#[derive(Debug, Deserialize)]
struct HeroList {
    #[serde(default)]
    heroes: Vec<HeroPayload>,
}

impl SteamApi {
    /// Calls `GetHeroes`, the hero roster with internal names and, given a
    /// `language`, localized names.
    pub async fn get_heroes(&self, language: &str) -> anyhow::Result<Vec<HeroPayload>> {
        let url = self.build_endpoint(DOTA2_ECON, "GetHeroes", "v1");
        let response: HeroesResponse = self.request(&url, &[("language", language)]).await?;
        Ok(response.result.heroes)
    }
}

/// Requester refreshing the hero roster.
///
/// This should have its [`Publish::start`] method called within a Tokio task.
#[derive(Debug)]
pub struct HeroRequester {
    steam_api: Arc<SteamApi>,
    interval: Duration,
    language: String,
}

impl HeroRequester {
    pub fn new(steam_api: Arc<SteamApi>, interval: Duration, language: String) -> Self {
        Self {
            steam_api,
            interval,
            language,
        }
    }
}

impl Publish for HeroRequester {
    async fn fetch(&self) -> anyhow::Result<Message> {
        let roster = self.steam_api.get_heroes(&self.language).await?;
        debug!("Fetched {} heroes", roster.len());

        let mut heroes = IndexMap::with_capacity(roster.len());
        for hero in roster {
            match hero.id {
                Some(hero_id) => {
                    heroes.insert(hero_id, hero);
                }
                None => warn!("Skipping hero without an ID: {:?}", hero.name),
            }
        }
        Ok(Message::Heroes(heroes))
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
                    error!("Failed to fetch hero roster: {e:?}");
                    continue;
                }
            };
            if publishing_channel.send(message).is_err() {
                error!("Publishing channel closed, stopping hero requester");
                return;
            }
        }
    }
}
