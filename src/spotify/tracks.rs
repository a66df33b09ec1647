use serde_json::json;

use crate::{
    client::{SpotifyClient, segment},
    decode::Resource,
    error::Result,
    multiget::sequential_multiget,
    request::RequestDescriptor,
    types::Track,
};

use super::{id_list, object};

/// Maximum number of track ids accepted by `GET /tracks`.
pub const TRACKS_PER_REQUEST: usize = 50;

impl SpotifyClient {
    pub fn create_request_for_track(&self, id: &str) -> Result<RequestDescriptor> {
        let values = self.with_market_value(object(json!({})));
        self.create_get(&format!("tracks/{}", segment(id)), Some(&values))
    }

    /// Fetches one track.
    pub async fn track(&self, id: &str) -> Result<Resource<Track>> {
        let request = self.create_request_for_track(id)?;
        self.fetch_entity(request).await
    }

    pub fn create_request_for_tracks<S: AsRef<str>>(&self, ids: &[S]) -> Result<RequestDescriptor> {
        let ids = id_list(ids, TRACKS_PER_REQUEST)?;
        let values = self.with_market_value(object(json!({ "ids": ids })));
        self.create_get("tracks", Some(&values))
    }

    /// Fetches any number of tracks, [`TRACKS_PER_REQUEST`] at a time.
    pub async fn tracks<S: AsRef<str> + Clone>(&self, ids: &[S]) -> Result<Vec<Resource<Track>>> {
        sequential_multiget(ids, TRACKS_PER_REQUEST, |chunk| async move {
            let request = self.create_request_for_tracks(&chunk)?;
            self.fetch_list(request, Some("tracks")).await
        })
        .await
    }
}
