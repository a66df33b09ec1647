use reqwest::Method;
use serde_json::json;

use crate::{
    client::SpotifyClient,
    decode::Resource,
    error::{Error, Result},
    multiget::sequential_multiget,
    paging::Page,
    request::RequestDescriptor,
    types::SavedTrack,
};

use super::{id_list, object};

/// Maximum number of track ids per library request.
pub const LIBRARY_IDS_PER_REQUEST: usize = 50;

impl SpotifyClient {
    pub fn create_request_for_saved_tracks(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<RequestDescriptor> {
        let values = self.with_market_value(object(json!({ "offset": offset, "limit": limit })));
        self.create_get("me/tracks", Some(&values))
    }

    /// Tracks in the current user's library, most recently saved first.
    pub async fn saved_tracks(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<Resource<SavedTrack>>> {
        let request = self.create_request_for_saved_tracks(offset, limit)?;
        self.fetch_page(request, None).await
    }

    pub fn create_request_for_save_tracks<S: AsRef<str>>(&self, ids: &[S]) -> Result<RequestDescriptor> {
        let ids = id_list(ids, LIBRARY_IDS_PER_REQUEST)?;
        self.create_query("me/tracks", Method::PUT, &json!({ "ids": ids }))
    }

    /// Saves tracks to the library in batches; the call succeeds only if
    /// every batch does.
    pub async fn save_tracks<S: AsRef<str> + Clone>(&self, ids: &[S]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::invalid_argument("no tracks to save"));
        }
        sequential_multiget(ids, LIBRARY_IDS_PER_REQUEST, |chunk| async move {
            let request = self.create_request_for_save_tracks(&chunk)?;
            self.perform(request).await.map(|_| Vec::<()>::new())
        })
        .await
        .map(|_| ())
    }

    pub fn create_request_for_remove_saved_tracks<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<RequestDescriptor> {
        let ids = id_list(ids, LIBRARY_IDS_PER_REQUEST)?;
        self.create_query("me/tracks", Method::DELETE, &json!({ "ids": ids }))
    }

    pub async fn remove_saved_tracks<S: AsRef<str> + Clone>(&self, ids: &[S]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::invalid_argument("no tracks to remove"));
        }
        sequential_multiget(ids, LIBRARY_IDS_PER_REQUEST, |chunk| async move {
            let request = self.create_request_for_remove_saved_tracks(&chunk)?;
            self.perform(request).await.map(|_| Vec::<()>::new())
        })
        .await
        .map(|_| ())
    }

    pub fn create_request_for_saved_tracks_contains<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<RequestDescriptor> {
        let ids = id_list(ids, LIBRARY_IDS_PER_REQUEST)?;
        self.create_get("me/tracks/contains", Some(&json!({ "ids": ids })))
    }

    /// Whether each id is in the library, in input order.
    pub async fn saved_tracks_contains<S: AsRef<str> + Clone>(&self, ids: &[S]) -> Result<Vec<bool>> {
        sequential_multiget(ids, LIBRARY_IDS_PER_REQUEST, |chunk| async move {
            let request = self.create_request_for_saved_tracks_contains(&chunk)?;
            self.fetch_value::<Vec<bool>>(request).await
        })
        .await
    }
}
