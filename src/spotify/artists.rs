use serde_json::json;

use crate::{
    client::{SpotifyClient, segment},
    decode::Resource,
    error::Result,
    multiget::sequential_multiget,
    paging::Page,
    request::RequestDescriptor,
    types::{Artist, SimplifiedAlbum, Track},
};

use super::{id_list, object};

/// Maximum number of artist ids accepted by `GET /artists`.
pub const ARTISTS_PER_REQUEST: usize = 50;

impl SpotifyClient {
    pub fn create_request_for_artist(&self, id: &str) -> Result<RequestDescriptor> {
        self.create_get(&format!("artists/{}", segment(id)), None)
    }

    /// Fetches one artist.
    pub async fn artist(&self, id: &str) -> Result<Resource<Artist>> {
        let request = self.create_request_for_artist(id)?;
        self.fetch_entity(request).await
    }

    pub fn create_request_for_artists<S: AsRef<str>>(&self, ids: &[S]) -> Result<RequestDescriptor> {
        let ids = id_list(ids, ARTISTS_PER_REQUEST)?;
        self.create_get("artists", Some(&json!({ "ids": ids })))
    }

    /// Fetches any number of artists, [`ARTISTS_PER_REQUEST`] at a time.
    pub async fn artists<S: AsRef<str> + Clone>(&self, ids: &[S]) -> Result<Vec<Resource<Artist>>> {
        sequential_multiget(ids, ARTISTS_PER_REQUEST, |chunk| async move {
            let request = self.create_request_for_artists(&chunk)?;
            self.fetch_list(request, Some("artists")).await
        })
        .await
    }

    /// `include_groups` is a comma separated subset of
    /// `album,single,appears_on,compilation`; `None` lets the server decide.
    pub fn create_request_for_artist_albums(
        &self,
        id: &str,
        include_groups: Option<&str>,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<RequestDescriptor> {
        let values = self.with_market_value(object(json!({
            "include_groups": include_groups,
            "offset": offset,
            "limit": limit,
        })));
        self.create_get(&format!("artists/{}/albums", segment(id)), Some(&values))
    }

    /// One page of the artist's releases.
    ///
    /// # Arguments
    ///
    /// * `id` - Spotify artist id
    /// * `include_groups` - Comma separated album groups, see
    ///   [`Self::create_request_for_artist_albums`]
    /// * `offset` - Index of the first release to return
    /// * `limit` - Page size; `None` uses the server default
    pub async fn artist_albums(
        &self,
        id: &str,
        include_groups: Option<&str>,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<Resource<SimplifiedAlbum>>> {
        let request = self.create_request_for_artist_albums(id, include_groups, offset, limit)?;
        self.fetch_page(request, None).await
    }

    /// Top tracks need a market; `market` overrides the client's default.
    pub fn create_request_for_artist_top_tracks(
        &self,
        id: &str,
        market: Option<&str>,
    ) -> Result<RequestDescriptor> {
        let values = self.with_market_value(object(json!({ "market": market })));
        self.create_get(&format!("artists/{}/top-tracks", segment(id)), Some(&values))
    }

    pub async fn artist_top_tracks(
        &self,
        id: &str,
        market: Option<&str>,
    ) -> Result<Vec<Resource<Track>>> {
        let request = self.create_request_for_artist_top_tracks(id, market)?;
        self.fetch_list(request, Some("tracks")).await
    }

    pub fn create_request_for_related_artists(&self, id: &str) -> Result<RequestDescriptor> {
        self.create_get(&format!("artists/{}/related-artists", segment(id)), None)
    }

    /// Artists similar to `id`, as judged by the service's listeners.
    pub async fn related_artists(&self, id: &str) -> Result<Vec<Resource<Artist>>> {
        let request = self.create_request_for_related_artists(id)?;
        self.fetch_list(request, Some("artists")).await
    }
}
