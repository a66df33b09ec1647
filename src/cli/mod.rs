//! # CLI Module
//!
//! Command implementations for the `spotmeta` binary. Each command resolves
//! an access token, builds a [`SpotifyClient`] from the environment, runs
//! one or more API operations and renders the result as a table.
//!
//! ## Token resolution
//!
//! 1. `SPOTIFY_ACCESS_TOKEN` (with `SPOTIFY_TOKEN_TYPE`)
//! 2. the token saved with `spotmeta token set`
//!
//! Fatal problems are reported with the `error!` macro, which exits the
//! process.

mod catalog;
mod discover;
mod me;
mod render;
mod token;

pub use catalog::{album, albums, artist, playlist, track, tracks};
pub use discover::{featured, new_releases, search};
pub use me::{me, top};
pub use token::{token_clear, token_set, token_show};

use crate::{
    SpotifyClient, config, error, management::TokenStore, request::AccessToken,
};

async fn resolve_token() -> Option<AccessToken> {
    if let Some(token) = config::spotify_access_token() {
        return Some(AccessToken::with_type(token, config::spotify_token_type()));
    }

    TokenStore::load().await.ok().map(|store| store.access_token())
}

pub(crate) async fn client() -> SpotifyClient {
    let Some(token) = resolve_token().await else {
        error!("No access token. Set SPOTIFY_ACCESS_TOKEN or run spotmeta token set <TOKEN>");
    };

    match SpotifyClient::from_env(token) {
        Ok(client) => client,
        Err(e) => error!("Cannot create client. Err: {}", e),
    }
}
