use crate::config::Config;
use crate::fetch::ApiClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let api = ApiClient::new(&config)?;
        Ok(Self { config, api })
    }
}
