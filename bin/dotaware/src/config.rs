use anyhow::Context as _;
use dotaware_view::ProjectionOptions;
use serde::Deserialize;
use std::path::Path;
use tokio::fs::read_to_string;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub steam_api_key: String,
    pub steam_base_url: String,
    /// Seconds between two live games requests.
    pub iteration_secs: u64,
    /// Seconds between two league listing requests.
    pub league_refresh_secs: u64,
    /// Seconds between two hero roster requests.
    pub hero_refresh_secs: u64,
    /// Language of the hero names shown in place of hero IDs.
    pub hero_language: String,
    pub listen_addr: String,
    /// Reload interval baked into the served page. `0` disables it.
    pub page_refresh_secs: u64,
    /// How many finished match IDs to remember.
    pub finished_history: usize,
    pub view: ProjectionOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            steam_api_key: String::new(),
            steam_base_url: "http://api.steampowered.com".into(),
            iteration_secs: 10,
            league_refresh_secs: 3600,
            hero_refresh_secs: 86400,
            hero_language: "en".into(),
            listen_addr: "0.0.0.0:8080".into(),
            page_refresh_secs: 10,
            finished_history: 50,
            view: ProjectionOptions::default(),
        }
    }
}

impl Config {
    pub async fn load(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::load_file(path).await?,
            None => Default::default(),
        };

        let config = config.override_from(|key| std::env::var(key).ok())?;
        anyhow::ensure!(
            !config.steam_api_key.is_empty(),
            "Specify the Steam API key with the STEAM_APIKEY environment variable"
        );
        anyhow::ensure!(
            config.iteration_secs > 0
                && config.league_refresh_secs > 0
                && config.hero_refresh_secs > 0,
            "Request intervals must be at least one second"
        );
        Ok(config)
    }

    pub fn page_refresh(&self) -> Option<u64> {
        (self.page_refresh_secs > 0).then_some(self.page_refresh_secs)
    }

    async fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = read_to_string(path).await?;
        Ok(toml::from_str(&contents)?)
    }

    /// Let environment variables take precedence over file values.
    fn override_from(mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        self.steam_api_key = var("STEAM_APIKEY").unwrap_or(self.steam_api_key);
        self.steam_base_url = var("STEAM_BASE_URL").unwrap_or(self.steam_base_url);
        self.listen_addr = var("LISTEN_ADDR").unwrap_or(self.listen_addr);
        if let Some(secs) = var("ITERATION_SECS") {
            self.iteration_secs = secs.parse().context("ITERATION_SECS should be numeric")?;
        }
        if let Some(secs) = var("LEAGUE_REFRESH_SECS") {
            self.league_refresh_secs = secs
                .parse()
                .context("LEAGUE_REFRESH_SECS should be numeric")?;
        }
        if let Some(secs) = var("HERO_REFRESH_SECS") {
            self.hero_refresh_secs = secs
                .parse()
                .context("HERO_REFRESH_SECS should be numeric")?;
        }
        self.hero_language = var("HERO_LANGUAGE").unwrap_or(self.hero_language);
        if let Some(base) = var("HERO_IMAGE_BASE") {
            self.view.hero_image_base = Some(base);
        }
        Ok(self)
    }
}
