pub mod aniwatch;
pub mod extract;
pub mod models;

use crate::models::{
    EpisodeDetails, EpisodeSource, SearchOptions, SearchResult, ServerExtraData, ServerInfo,
    Settings,
};
use std::future::Future;

/// The contract a host media browser drives. None of these operations fail:
/// trouble is logged and surfaces as an empty result.
pub trait OnlineStreamingProvider {
    fn get_settings(&self) -> Settings;

    fn search(
        &self,
        opts: impl Into<SearchOptions> + Send,
    ) -> impl Future<Output = Vec<SearchResult>> + Send;

    fn find_episodes(&self, id: &str) -> impl Future<Output = Vec<EpisodeDetails>> + Send;

    fn find_episode_server(&self, id: &str) -> impl Future<Output = Vec<ServerInfo>> + Send;

    fn find_episode_source(
        &self,
        episode_id: &str,
        server: &str,
        extra_data: Option<&ServerExtraData>,
    ) -> impl Future<Output = EpisodeSource> + Send;
}
