use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::models::*;
use crate::provider::OnlineStreamingProvider;
use crate::provider::extract;
use crate::provider::models::SourceResponse;
use reqwest::{Client, StatusCode, header};
use std::collections::HashMap;
use urlencoding::encode;

const EPISODE_SERVERS: [&str; 3] = ["default", "vidstreaming", "streamsb"];

struct Page {
    url: String,
    status: StatusCode,
    body: String,
}

impl Page {
    /// An empty extraction on an error page is reported as the status,
    /// otherwise as a plain miss.
    fn require<T>(&self, items: Vec<T>, stage: &'static str) -> Result<Vec<T>> {
        if !items.is_empty() {
            return Ok(items);
        }
        if !self.status.is_success() {
            return Err(ProviderError::Status {
                url: self.url.clone(),
                status: self.status,
            });
        }
        Err(ProviderError::NoMatches { stage })
    }
}

pub struct AniWatchProvider {
    client: Client,
    config: ProviderConfig,
    base_url: String,
}

impl AniWatchProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let user_agent = header::HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ProviderError::Config(format!("user agent: {}", e)))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, user_agent);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Self::with_client(client, config)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ProviderConfig::default())
    }

    /// Uses a caller-supplied client as is; the configured timeout and user
    /// agent are then the client's business.
    pub fn with_client(client: Client, config: ProviderConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ProviderError::Config(format!(
                "base URL must be http(s): {:?}",
                config.base_url
            )));
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Turns a page identifier into a path starting with `/`. An identifier
    /// that already carries this site's origin is cut back to its path.
    pub fn normalize_id(&self, id: &str) -> String {
        let id = id.trim();
        let id = id
            .strip_prefix(self.base_url.as_str())
            .filter(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
            .unwrap_or(id);

        if id.starts_with('/') {
            id.to_string()
        } else {
            format!("/{}", id)
        }
    }

    pub fn request_url(&self, id: &str) -> String {
        format!("{}{}", self.base_url, self.normalize_id(id))
    }

    async fn fetch_page(&self, url: &str) -> Result<Page> {
        log::info!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered with status {}", url, status);
        }

        let body = response.text().await?;
        log::debug!("HTML length: {}", body.len());

        Ok(Page {
            url: url.to_string(),
            status,
            body,
        })
    }

    pub async fn try_search(&self, opts: &SearchOptions) -> Result<Vec<SearchResult>> {
        if opts.dub {
            log::debug!("Dub requested; results are not told apart by sub/dub");
        }

        let url = format!("{}/search?keyword={}", self.base_url, encode(&opts.query));
        let page = self.fetch_page(&url).await?;

        let posters = extract::poster_items(&page.body)?;
        log::debug!("Found potential matches: {}", posters.len());
        let posters = page.require(posters, "search results")?;

        Ok(posters
            .into_iter()
            .map(|poster| SearchResult {
                url: self.request_url(&poster.href),
                id: poster.href,
                title: poster.title,
                sub_or_dub: self.config.default_sub_or_dub,
            })
            .collect())
    }

    pub async fn try_find_episodes(&self, id: &str) -> Result<Vec<EpisodeDetails>> {
        let page = self.fetch_page(&self.request_url(id)).await?;

        let mut items = extract::episode_items(&page.body)?;
        log::debug!("Found episodes: {}", items.len());
        items = page.require(items, "episodes")?;

        // Pages do not always list episodes in order. Stable, so equal
        // numbers keep their page order.
        items.sort_by(|a, b| a.number.total_cmp(&b.number));

        Ok(items
            .into_iter()
            .map(|item| EpisodeDetails {
                url: self.request_url(&item.href),
                id: item.href,
                number: item.number,
                title: format!("Episode {}", item.number),
            })
            .collect())
    }

    /// Every server listed on the episode page, in document order.
    pub async fn resolve_servers(&self, id: &str) -> Result<Vec<ServerInfo>> {
        let episode_id = self.normalize_id(id);
        let page = self.fetch_page(&self.request_url(&episode_id)).await?;

        let items = extract::server_items(&page.body)?;
        log::debug!("Found servers: {}", items.len());
        let items = page.require(items, "servers")?;

        Ok(items
            .into_iter()
            .map(|item| ServerInfo {
                name: item.name,
                extra_data: ServerExtraData {
                    server_id: item.server_id,
                    episode_id: episode_id.clone(),
                },
            })
            .collect())
    }

    /// Asks the AJAX endpoint for the server's link. The episode page must be
    /// sent as `Referer` or the site refuses the call.
    pub async fn resolve_source(&self, extra: &ServerExtraData) -> Result<EpisodeSource> {
        let server_id = extra.server_id.trim();
        if server_id.is_empty() {
            return Err(ProviderError::MissingServerId);
        }

        let url = format!(
            "{}{}",
            self.base_url,
            self.config.source_endpoint.path(server_id)
        );
        let referer = self.request_url(&extra.episode_id);
        log::info!("Source URL: {} (referer {})", url, referer);

        let response = self
            .client
            .get(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(header::REFERER, &referer)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered with status {}", url, status);
        }
        let body = response.text().await?;

        let unusable = |err: ProviderError| {
            if status.is_success() {
                err
            } else {
                ProviderError::Status {
                    url: url.clone(),
                    status,
                }
            }
        };

        let data: SourceResponse =
            serde_json::from_str(&body).map_err(|e| unusable(e.into()))?;
        let link = data
            .link()
            .ok_or_else(|| unusable(ProviderError::MissingLink))?;
        log::debug!("Source data received (type {:?})", data.kind);

        let headers = HashMap::from([("Referer".to_string(), referer)]);

        Ok(EpisodeSource {
            sources: vec![VideoSource::from_link(link)],
            headers,
        })
    }

    /// Single-call shape: picks a server by name (or the first one when no
    /// name or `"default"` is given) and resolves it in the same call.
    ///
    /// When nothing matches, the returned server carries the requested name
    /// and no video sources.
    pub async fn find_episode_server_with_sources(
        &self,
        id: &str,
        server: Option<&str>,
    ) -> EpisodeServer {
        let requested = server
            .map(str::trim)
            .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case("default"));
        log::info!("Finding server {:?} for episode: {}", requested, id);

        let servers = or_empty(self.resolve_servers(id).await, "Find episode server");

        let Some(info) = select_server(&servers, requested) else {
            log::warn!("No server matching {:?} for {}", requested, id);
            return EpisodeServer::placeholder(requested.unwrap_or("default").to_lowercase());
        };

        let source = or_empty(
            self.resolve_source(&info.extra_data).await,
            "Find episode source",
        );

        EpisodeServer {
            server: info.name.clone(),
            headers: source.headers,
            video_sources: source.sources,
        }
    }
}

/// First server whose name matches case-insensitively, or the first in page
/// order when no name is given.
pub fn select_server<'a>(
    servers: &'a [ServerInfo],
    requested: Option<&str>,
) -> Option<&'a ServerInfo> {
    match requested.map(str::trim) {
        None => servers.first(),
        Some(name) => servers.iter().find(|s| s.name.eq_ignore_ascii_case(name)),
    }
}

/// Public-boundary policy: log the cause, hand back the empty shape.
fn or_empty<T: Default>(result: Result<T>, stage: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e @ ProviderError::NoMatches { .. }) => {
            log::warn!("{}: {}", stage, e);
            T::default()
        }
        Err(e) => {
            log::error!("{} error: {}", stage, e);
            T::default()
        }
    }
}

impl OnlineStreamingProvider for AniWatchProvider {
    fn get_settings(&self) -> Settings {
        Settings {
            episode_servers: EPISODE_SERVERS.iter().map(|s| s.to_string()).collect(),
            supports_dub: true,
        }
    }

    async fn search(&self, opts: impl Into<SearchOptions> + Send) -> Vec<SearchResult> {
        let opts = opts.into();
        log::info!("Search query: {}", opts.query);

        let results = or_empty(self.try_search(&opts).await, "Search");
        log::info!("Final results: {}", results.len());
        results
    }

    async fn find_episodes(&self, id: &str) -> Vec<EpisodeDetails> {
        log::info!("Finding episodes for: {}", id);

        let episodes = or_empty(self.try_find_episodes(id).await, "Find episodes");
        log::info!("Final episode count: {}", episodes.len());
        episodes
    }

    async fn find_episode_server(&self, id: &str) -> Vec<ServerInfo> {
        log::info!("Finding servers for episode: {}", id);

        let servers = or_empty(self.resolve_servers(id).await, "Find episode server");
        log::info!("Final server count: {}", servers.len());
        servers
    }

    async fn find_episode_source(
        &self,
        episode_id: &str,
        server: &str,
        extra_data: Option<&ServerExtraData>,
    ) -> EpisodeSource {
        log::info!("Finding source for episode: {} server: {}", episode_id, server);

        let Some(extra) = extra_data else {
            log::error!("Find episode source error: {}", ProviderError::MissingServerId);
            return EpisodeSource::default();
        };

        let extra = if extra.episode_id.trim().is_empty() {
            ServerExtraData {
                server_id: extra.server_id.clone(),
                episode_id: episode_id.to_string(),
            }
        } else {
            extra.clone()
        };

        or_empty(self.resolve_source(&extra).await, "Find episode source")
    }
}
