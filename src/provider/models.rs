use serde::Deserialize;

/// Body of the AJAX source endpoint. Only `link` matters; it is either a
/// playable stream or an embed page.
#[derive(Debug, Deserialize)]
pub struct SourceResponse {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl SourceResponse {
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// One `film-poster` block from the search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterItem {
    pub href: String,
    pub title: String,
}

/// One `ep-item` entry from a title page.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeItem {
    pub href: String,
    pub number: f64,
}

/// One `server-item` entry from an episode page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerItem {
    pub server_id: String,
    pub name: String,
}
