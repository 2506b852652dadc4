use anyhow::{bail, Context, Result};
use std::future::Future;
use tracing::debug;

use crate::config::Config;
use crate::neuron::NeuronRef;
use crate::record::NeuronRecord;

/// Source of neuron data for the page handler.
pub trait NeuronFetcher {
    fn fetch(&self, neuron: &NeuronRef) -> impl Future<Output = Result<NeuronRecord>> + Send;
}

/// Reads neuron records from the upstream neuron API over HTTP.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    prefix: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.api_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            prefix: config.api_prefix(),
        })
    }

    pub fn url(&self, neuron: &NeuronRef) -> String {
        format!("{}{}", self.prefix, neuron.url_path())
    }
}

impl NeuronFetcher for ApiClient {
    async fn fetch(&self, neuron: &NeuronRef) -> Result<NeuronRecord> {
        let url = self.url(neuron);
        debug!("[neuroviz] Fetching {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        if !resp.status().is_success() {
            bail!("Neuron API returned {} for {}", resp.status(), url);
        }

        resp.json::<NeuronRecord>()
            .await
            .with_context(|| format!("Failed to parse neuron data from {}", url))
    }
}
