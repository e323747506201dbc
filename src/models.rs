use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static capability declaration handed to the host.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub episode_servers: Vec<String>,
    pub supports_dub: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubOrDub {
    #[default]
    Sub,
    Dub,
    Both,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SearchOptions {
    pub query: String,
    #[serde(default)]
    pub dub: bool,
}

impl From<&str> for SearchOptions {
    fn from(query: &str) -> Self {
        Self {
            query: query.to_string(),
            dub: false,
        }
    }
}

impl From<String> for SearchOptions {
    fn from(query: String) -> Self {
        Self { query, dub: false }
    }
}

impl From<&String> for SearchOptions {
    fn from(query: &String) -> Self {
        Self::from(query.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Site-relative path, exactly as it appears in the page.
    pub id: String,
    pub title: String,
    pub url: String,
    pub sub_or_dub: SubOrDub,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EpisodeDetails {
    pub id: String,
    pub url: String,
    pub number: f64,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerExtraData {
    pub server_id: String,
    pub episode_id: String,
}

/// One server listed on an episode page. Enough to request its source
/// without fetching the page again.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub name: String,
    pub extra_data: ServerExtraData,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VideoSourceType {
    M3u8,
    Mp4,
}

impl VideoSourceType {
    /// HLS iff the link mentions `.m3u8` anywhere, query string included.
    pub fn classify(link: &str) -> Self {
        if link.contains(".m3u8") {
            Self::M3u8
        } else {
            Self::Mp4
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoSubtitle {
    pub url: String,
    pub language: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    pub url: String,
    #[serde(rename = "isM3U8")]
    pub is_m3u8: bool,
    #[serde(rename = "type")]
    pub kind: VideoSourceType,
    pub quality: String,
    #[serde(default)]
    pub subtitles: Vec<VideoSubtitle>,
}

impl VideoSource {
    pub fn from_link(link: &str) -> Self {
        let kind = VideoSourceType::classify(link);
        Self {
            url: link.to_string(),
            is_m3u8: kind == VideoSourceType::M3u8,
            kind,
            quality: "auto".to_string(),
            subtitles: Vec::new(),
        }
    }
}

/// Result of resolving one server. An empty `sources` list means nothing
/// could be resolved.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct EpisodeSource {
    pub sources: Vec<VideoSource>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Single-call shape: the chosen server together with its resolved sources.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeServer {
    pub server: String,
    pub headers: HashMap<String, String>,
    pub video_sources: Vec<VideoSource>,
}

impl EpisodeServer {
    pub fn placeholder(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            headers: HashMap::new(),
            video_sources: Vec::new(),
        }
    }
}
