use serde_json::json;

use crate::{
    client::{SpotifyClient, segment},
    decode::Resource,
    error::Result,
    multiget::sequential_multiget,
    paging::Page,
    request::RequestDescriptor,
    types::{Album, SimplifiedTrack},
};

use super::{id_list, object};

/// Maximum number of album ids accepted by `GET /albums`.
pub const ALBUMS_PER_REQUEST: usize = 20;

impl SpotifyClient {
    /// Builds `GET /albums/{id}`, with the client's market if one is set.
    pub fn create_request_for_album(&self, id: &str) -> Result<RequestDescriptor> {
        let values = self.with_market_value(object(json!({})));
        self.create_get(&format!("albums/{}", segment(id)), Some(&values))
    }

    /// Fetches one album with its first page of tracks.
    ///
    /// # Arguments
    ///
    /// * `id` - Spotify album id; it is percent-encoded into the path
    ///
    /// # Returns
    ///
    /// A complete [`Album`], or a partial entry when the response lacks
    /// fields the full record needs.
    ///
    /// # Example
    ///
    /// ```
    /// use spotmeta::SpotifyClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> spotmeta::Result<()> {
    ///     let client = SpotifyClient::new("token")?.with_market("SE");
    ///     let album = client.album("4aawyAB9vmqN3uQ7FjRGTy").await?;
    ///     if let Some(album) = album.complete() {
    ///         println!("{} ({})", album.name, album.release_date);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn album(&self, id: &str) -> Result<Resource<Album>> {
        let request = self.create_request_for_album(id)?;
        self.fetch_entity(request).await
    }

    /// Builds a single `GET /albums?ids=` request for at most
    /// [`ALBUMS_PER_REQUEST`] ids.
    pub fn create_request_for_albums<S: AsRef<str>>(&self, ids: &[S]) -> Result<RequestDescriptor> {
        let ids = id_list(ids, ALBUMS_PER_REQUEST)?;
        let values = self.with_market_value(object(json!({ "ids": ids })));
        self.create_get("albums", Some(&values))
    }

    /// Fetches any number of albums, [`ALBUMS_PER_REQUEST`] at a time.
    ///
    /// Unknown ids come back as empty partial entries in their input
    /// position.
    pub async fn albums<S: AsRef<str> + Clone>(&self, ids: &[S]) -> Result<Vec<Resource<Album>>> {
        sequential_multiget(ids, ALBUMS_PER_REQUEST, |chunk| async move {
            let request = self.create_request_for_albums(&chunk)?;
            self.fetch_list(request, Some("albums")).await
        })
        .await
    }

    pub fn create_request_for_album_tracks(
        &self,
        id: &str,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<RequestDescriptor> {
        let values = self.with_market_value(object(json!({ "offset": offset, "limit": limit })));
        self.create_get(&format!("albums/{}/tracks", segment(id)), Some(&values))
    }

    /// One page of an album's tracks, starting at `offset`.
    pub async fn album_tracks(
        &self,
        id: &str,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<Resource<SimplifiedTrack>>> {
        let request = self.create_request_for_album_tracks(id, offset, limit)?;
        self.fetch_page(request, None).await
    }
}
