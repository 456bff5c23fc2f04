use dotaware_store::Message;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

pub mod heroes;
pub mod leagues;
pub mod live_games;

const DOTA2_MATCH: &str = "IDOTA2Match_570";
const DOTA2_ECON: &str = "IEconDOTA2_570";

/// A periodic Steam Web API request whose result is turned into a store [`Message`].
pub trait Publish {
    /// Fetch once and build the message to publish.
    async fn fetch(&self) -> anyhow::Result<Message>;

    /// Loop [`Self::fetch`] on the requester's interval, pushing every message
    /// to the provided publishing channel.
    async fn start(&self, publishing_channel: UnboundedSender<Message>);
}

/// Thin wrapper around the Steam Web API.
pub struct SteamApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for SteamApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SteamApi {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Build the URL of an API method, e.g. `{base}/IDOTA2Match_570/GetLiveLeagueGames/v1`.
    pub fn build_endpoint(&self, interface: &str, method: &str, version: &str) -> String {
        format!(
            "{}/{interface}/{method}/{version}",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Request an endpoint with extra query parameters and decode its JSON body.
    async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        debug!("Requesting {url} {params:?}");
        let response = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
