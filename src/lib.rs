//! AniWatch online-streaming provider.
//!
//! Resolves an episode in four steps, each callable on its own with the
//! identifier produced by the previous one:
//! search, episode listing, server discovery, and source extraction.
//! The public operations never fail; errors are logged through `log` and
//! come back as empty results. The `try_*`/`resolve_*` methods on
//! [`AniWatchProvider`] expose the underlying [`ProviderError`] instead.

pub mod config;
pub mod error;
pub mod models;
pub mod provider;

pub use config::{ProviderConfig, SourceEndpoint};
pub use error::{ProviderError, Result};
pub use provider::OnlineStreamingProvider;
pub use provider::aniwatch::{AniWatchProvider, select_server};
