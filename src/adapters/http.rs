use crate::adapters::markup;
use crate::config::settings::SelectorSettings;
use crate::domain::model::{CardRef, RawOfferRecord};
use crate::domain::ports::{DetailLoader, DetailView};
use crate::utils::error::{Result, ScanError};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("ctzero-scan/", env!("CARGO_PKG_VERSION"));

pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    tracing::debug!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    tracing::debug!("Response status {} for {}", status, url);

    if !status.is_success() {
        return Err(ScanError::HttpStatusError {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}

/// Opens card detail pages over HTTP.
#[derive(Clone)]
pub struct HttpDetailLoader {
    client: Client,
    selectors: Arc<SelectorSettings>,
}

impl HttpDetailLoader {
    pub fn new(client: Client, selectors: SelectorSettings) -> Self {
        Self {
            client,
            selectors: Arc::new(selectors),
        }
    }
}

#[async_trait]
impl DetailLoader for HttpDetailLoader {
    type View = HttpDetailView;

    async fn open(&self, card: &CardRef) -> Result<HttpDetailView> {
        let url = Url::parse(&card.url)?;
        Ok(HttpDetailView {
            client: self.client.clone(),
            url,
            selectors: self.selectors.clone(),
        })
    }
}

/// A detail page re-read on every query, so rows rendered late are picked up
/// by the next poll.
pub struct HttpDetailView {
    client: Client,
    url: Url,
    selectors: Arc<SelectorSettings>,
}

#[async_trait]
impl DetailView for HttpDetailView {
    async fn offer_rows(&self) -> Result<Vec<RawOfferRecord>> {
        let html = fetch_page(&self.client, self.url.as_str()).await?;
        markup::extract_offer_rows(&html, &self.selectors)
    }

    fn release(self) {
        tracing::trace!("Released detail view {}", self.url);
    }
}
