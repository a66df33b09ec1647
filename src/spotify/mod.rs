//! # Web API endpoints
//!
//! Endpoint wrappers on top of [`SpotifyClient`](crate::client::SpotifyClient).
//! Each submodule adds an `impl SpotifyClient` block for one area of the API.
//! Every operation comes in two forms:
//!
//! - `create_request_for_*` builds the authenticated
//!   [`RequestDescriptor`](crate::request::RequestDescriptor) without sending
//!   it, for callers that want to run it through their own executor.
//! - The plain async method builds, executes, maps and decodes, resolving to
//!   a typed result or an [`Error`](crate::error::Error).
//!
//! ## Areas
//!
//! - [`albums`] - `GET /albums/{id}`, `GET /albums?ids=`, `GET /albums/{id}/tracks`
//! - [`artists`] - artist lookups, discography, top tracks, related artists
//! - [`tracks`] - `GET /tracks/{id}`, `GET /tracks?ids=`
//! - [`playlists`] - playlist lookups and modification
//! - [`users`] - `GET /me`, `GET /users/{id}`
//! - [`personalize`] - `GET /me/top/{type}`
//! - [`browse`] - featured playlists and new releases
//! - [`search`] - `GET /search`
//! - [`follow`] - following artists
//! - [`library`] - saved tracks
//!
//! ## Batch lookups
//!
//! Endpoints taking a list of ids accept a bounded number per request (20
//! albums, 50 artists or tracks, 100 playlist items). The batch operations
//! here accept any number of ids and split them with
//! [`sequential_multiget`](crate::multiget::sequential_multiget): one request
//! at a time, results in input order, first failure aborts.
//!
//! ## Example
//!
//! ```rust,ignore
//! let client = SpotifyClient::new("BQC...")?.with_market("SE");
//! let album = client.album("4aawyAB9vmqN3uQ7FjRGTy").await?;
//! let albums = client.albums(&["4aawyAB9vmqN3uQ7FjRGTy", "0sNOF9WDwhWunNAHPD3Baj"]).await?;
//! ```

pub mod albums;
pub mod artists;
pub mod browse;
pub mod follow;
pub mod library;
pub mod personalize;
pub mod playlists;
pub mod search;
pub mod tracks;
pub mod users;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Unwraps a `json!({...})` literal into its map.
fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Collects ids for an `ids=` parameter, refusing more than one request's worth.
fn id_list<S: AsRef<str>>(ids: &[S], max: usize) -> Result<Vec<&str>> {
    if ids.len() > max {
        return Err(Error::invalid_argument(format!(
            "at most {} ids are allowed per request, got {}",
            max,
            ids.len()
        )));
    }
    Ok(ids.iter().map(AsRef::as_ref).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_enforces_the_limit() {
        assert_eq!(id_list(&["a", "b"], 2).unwrap(), vec!["a", "b"]);
        assert!(id_list(&["a", "b", "c"], 2).is_err());
    }
}
