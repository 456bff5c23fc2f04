use super::{Publish, SteamApi, DOTA2_MATCH};
use dotaware_store::message::LeaguePayload;
use dotaware_store::Message;
use indexmap::IndexMap;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, warn};

#[derive(Debug, Deserialize)]
struct LeagueListingResponse {
    result: LeagueListing,
}

#[derive(Debug, Deserialize)]
struct LeagueListing {
    #[serde(default)]
    leagues: Vec<LeaguePayload>,
}

impl SteamApi {
    /// Calls `GetLeagueListing`, every league with its name tag and tournament URL.
    pub async fn get_league_listing(&self) -> anyhow::Result<Vec<LeaguePayload>> {
        let url = self.build_endpoint(DOTA2_MATCH, "GetLeagueListing", "v1");
        let response: LeagueListingResponse = self.request(&url, &[]).await?;
        Ok(response.result.leagues)
    }
}

/// Requester refreshing the league listing.
///
/// This should have its [`Publish::start`] method called within a Tokio task.
#[derive(Debug)]
pub struct LeagueRequester {
    steam_api: Arc<SteamApi>,
    interval: Duration,
}

impl LeagueRequester {
    pub fn new(steam_api: Arc<SteamApi>, interval: Duration) -> Self {
        Self {
            steam_api,
            interval,
        }
    }
}

impl Publish for LeagueRequester {
    async fn fetch(&self) -> anyhow::Result<Message> {
        let listing = self.steam_api.get_league_listing().await?;
        debug!("Fetched {} leagues", listing.len());

        let mut leagues = IndexMap::with_capacity(listing.len());
        for league in listing {
            match league.leagueid {
                Some(league_id) => {
                    leagues.insert(league_id, league);
                }
                None => warn!("Skipping league without an ID: {:?}", league.name),
            }
        }
        Ok(Message::Leagues(leagues))
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
                    error!("Failed to fetch league listing: {e:?}");
                    continue;
                }
            };
            if publishing_channel.send(message).is_err() {
                error!("Publishing channel closed, stopping league requester");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotaware_store::LeagueId;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_keys_leagues_by_id() {
        let body = json!({
            "result": {
                "leagues": [
                    {
                        "name": "#DOTA_Item_joinDOTA_League_Season_3",
                        "leagueid": 1803,
                        "description": "#DOTA_Item_Desc_joinDOTA_League_Season_3",
                        "tournament_url": "http://www.joindota.com/",
                        "itemdef": 10541
                    },
                    {"name": "#DOTA_Item_Broken"}
                ]
            }
        });
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/IDOTA2Match_570/GetLeagueListing/v1")
            .match_query(Matcher::UrlEncoded("key".into(), "secret".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let steam_api = Arc::new(SteamApi::new(server.url(), "secret".into()));
        let requester = LeagueRequester::new(steam_api, Duration::from_secs(3600));
        let Message::Leagues(leagues) = requester.fetch().await.unwrap() else {
            panic!("Expected a league message");
        };

        assert_eq!(leagues.len(), 1);
        assert_eq!(leagues[&LeagueId(1803)].itemdef, Some(10541));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_start_publishes_until_channel_closes() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/IDOTA2Match_570/GetLeagueListing/v1")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"result": {"leagues": []}}).to_string())
            .create_async()
            .await;

        let steam_api = Arc::new(SteamApi::new(server.url(), "secret".into()));
        let requester = LeagueRequester::new(steam_api, Duration::from_millis(10));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let task = tokio::spawn(async move { requester.start(tx).await });
        assert_eq!(rx.recv().await, Some(Message::Leagues(IndexMap::new())));
        drop(rx);
        task.await.unwrap();
    }
}
