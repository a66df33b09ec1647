use reqwest::Method;
use serde_json::json;

use crate::{
    client::{SpotifyClient, segment},
    decode::Resource,
    encode,
    error::{Error, Result},
    multiget::sequential_multiget,
    paging::Page,
    request::RequestDescriptor,
    types::{
        AddTracksToPlaylistRequest, ChangePlaylistDetailsRequest, CreatePlaylistRequest, Playlist,
        PlaylistSnapshot, PlaylistTrack, RemoveTracksFromPlaylistRequest, SimplifiedPlaylist,
        TrackUri,
    },
};

use super::object;

/// Maximum number of items added or removed by one playlist request.
pub const PLAYLIST_ITEMS_PER_REQUEST: usize = 100;

impl SpotifyClient {
    pub fn create_request_for_playlist(&self, id: &str) -> Result<RequestDescriptor> {
        let values = self.with_market_value(object(json!({})));
        self.create_get(&format!("playlists/{}", segment(id)), Some(&values))
    }

    /// Fetches a playlist with its first page of items.
    pub async fn playlist(&self, id: &str) -> Result<Resource<Playlist>> {
        let request = self.create_request_for_playlist(id)?;
        self.fetch_entity(request).await
    }

    pub fn create_request_for_playlist_tracks(
        &self,
        id: &str,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<RequestDescriptor> {
        let values = self.with_market_value(object(json!({ "offset": offset, "limit": limit })));
        self.create_get(&format!("playlists/{}/tracks", segment(id)), Some(&values))
    }

    /// One page of a playlist's items.
    ///
    /// # Arguments
    ///
    /// * `id` - Spotify playlist id
    /// * `offset` - Index of the first item to return
    /// * `limit` - Page size; `None` uses the server default
    ///
    /// # Example
    ///
    /// ```
    /// let mut offset = 0;
    /// loop {
    ///     let page = client.playlist_tracks("37i9dQZF1DXcBWIGoYBM5M", offset, None).await?;
    ///     println!("{} items", page.len());
    ///     match page.next_offset() {
    ///         Some(next) => offset = next,
    ///         None => break,
    ///     }
    /// }
    /// ```
    pub async fn playlist_tracks(
        &self,
        id: &str,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<Resource<PlaylistTrack>>> {
        let request = self.create_request_for_playlist_tracks(id, offset, limit)?;
        self.fetch_page(request, None).await
    }

    pub fn create_request_for_user_playlists(
        &self,
        user_id: &str,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<RequestDescriptor> {
        let values = json!({ "offset": offset, "limit": limit });
        self.create_get(&format!("users/{}/playlists", segment(user_id)), Some(&values))
    }

    pub async fn user_playlists(
        &self,
        user_id: &str,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<Resource<SimplifiedPlaylist>>> {
        let request = self.create_request_for_user_playlists(user_id, offset, limit)?;
        self.fetch_page(request, None).await
    }

    pub fn create_request_for_my_playlists(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<RequestDescriptor> {
        let values = json!({ "offset": offset, "limit": limit });
        self.create_get("me/playlists", Some(&values))
    }

    /// Playlists owned or followed by the current user.
    pub async fn my_playlists(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<Resource<SimplifiedPlaylist>>> {
        let request = self.create_request_for_my_playlists(offset, limit)?;
        self.fetch_page(request, None).await
    }

    pub fn create_request_for_create_playlist(
        &self,
        user_id: &str,
        body: &CreatePlaylistRequest,
    ) -> Result<RequestDescriptor> {
        let body = encode::to_values(body)?;
        self.create_json(
            &format!("users/{}/playlists", segment(user_id)),
            Method::POST,
            &body,
        )
    }

    /// Creates a playlist owned by `user_id`, which must be the token's user.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        body: &CreatePlaylistRequest,
    ) -> Result<Resource<Playlist>> {
        let request = self.create_request_for_create_playlist(user_id, body)?;
        self.fetch_entity(request).await
    }

    /// Builds one `POST /playlists/{id}/tracks` for at most
    /// [`PLAYLIST_ITEMS_PER_REQUEST`] URIs. Use [`Self::add_tracks`] for
    /// longer lists.
    pub fn create_request_for_add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: Option<u32>,
    ) -> Result<RequestDescriptor> {
        if uris.len() > PLAYLIST_ITEMS_PER_REQUEST {
            return Err(Error::invalid_argument(format!(
                "at most {} items can be added per request",
                PLAYLIST_ITEMS_PER_REQUEST
            )));
        }
        let body = encode::to_values(&AddTracksToPlaylistRequest {
            uris: uris.to_vec(),
            position,
        })?;
        self.create_json(
            &format!("playlists/{}/tracks", segment(playlist_id)),
            Method::POST,
            &body,
        )
    }

    /// Appends (or inserts at `position`) any number of track URIs.
    ///
    /// Batches keep their relative order; when inserting, each batch is
    /// placed after the previous one. Returns the snapshot after the last
    /// batch.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Playlist to modify
    /// * `uris` - Track or episode URIs such as `spotify:track:...`
    /// * `position` - Zero-based insert position; `None` appends
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error, without sending anything, when
    /// `uris` is empty or a batch position would not fit in a `u32`. The
    /// first failing batch stops the remaining ones.
    ///
    /// # Example
    ///
    /// ```
    /// let uris = vec!["spotify:track:4iV5W9uYEdYUVa79Axb7Rh".to_string()];
    /// let snapshot = client.add_tracks("3cEYpjA9oz9GiPac4AsH4n", &uris, Some(0)).await?;
    /// println!("now at {}", snapshot.snapshot_id);
    /// ```
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: Option<u32>,
    ) -> Result<PlaylistSnapshot> {
        if uris.is_empty() {
            return Err(Error::invalid_argument("no tracks to add"));
        }

        // Every batch but the first starts where the previous one ended.
        let positions = (0..uris.len())
            .step_by(PLAYLIST_ITEMS_PER_REQUEST)
            .map(|skipped| match position {
                Some(at) => u32::try_from(skipped)
                    .ok()
                    .and_then(|skipped| at.checked_add(skipped))
                    .map(Some)
                    .ok_or_else(|| Error::invalid_argument("insert position overflows")),
                None => Ok(None),
            })
            .collect::<Result<Vec<_>>>()?;

        let mut positions = positions.into_iter();
        let snapshots = sequential_multiget(uris, PLAYLIST_ITEMS_PER_REQUEST, |chunk| {
            let at = positions.next().flatten();
            async move {
                let request = self.create_request_for_add_tracks(playlist_id, &chunk, at)?;
                let snapshot: PlaylistSnapshot = self.fetch_value(request).await?;
                Ok(vec![snapshot])
            }
        })
        .await?;

        snapshots
            .into_iter()
            .last()
            .ok_or_else(|| Error::decoding("no snapshot returned"))
    }

    pub fn create_request_for_remove_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        snapshot_id: Option<&str>,
    ) -> Result<RequestDescriptor> {
        if uris.len() > PLAYLIST_ITEMS_PER_REQUEST {
            return Err(Error::invalid_argument(format!(
                "at most {} items can be removed per request",
                PLAYLIST_ITEMS_PER_REQUEST
            )));
        }
        let body = encode::to_values(&RemoveTracksFromPlaylistRequest {
            tracks: uris.iter().map(|uri| TrackUri { uri: uri.clone() }).collect(),
            snapshot_id: snapshot_id.map(str::to_string),
        })?;
        self.create_json(
            &format!("playlists/{}/tracks", segment(playlist_id)),
            Method::DELETE,
            &body,
        )
    }

    /// Removes every occurrence of the given URIs.
    pub async fn remove_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        snapshot_id: Option<&str>,
    ) -> Result<PlaylistSnapshot> {
        let request = self.create_request_for_remove_tracks(playlist_id, uris, snapshot_id)?;
        self.fetch_value(request).await
    }

    pub fn create_request_for_change_details(
        &self,
        playlist_id: &str,
        details: &ChangePlaylistDetailsRequest,
    ) -> Result<RequestDescriptor> {
        let body = encode::to_values(details)?;
        self.create_json(
            &format!("playlists/{}", segment(playlist_id)),
            Method::PUT,
            &body,
        )
    }

    /// Updates name, description or visibility. Unset fields are left alone.
    pub async fn change_details(
        &self,
        playlist_id: &str,
        details: &ChangePlaylistDetailsRequest,
    ) -> Result<()> {
        let request = self.create_request_for_change_details(playlist_id, details)?;
        self.perform(request).await.map(|_| ())
    }
}
