use reqwest::Method;
use serde_json::json;

use crate::{
    client::SpotifyClient,
    decode::Resource,
    error::{Error, Result},
    multiget::sequential_multiget,
    paging::Page,
    request::RequestDescriptor,
    types::Artist,
};

use super::id_list;

/// Maximum number of artist ids per follow request.
pub const FOLLOW_IDS_PER_REQUEST: usize = 50;

impl SpotifyClient {
    pub fn create_request_for_follow_artists<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<RequestDescriptor> {
        let ids = id_list(ids, FOLLOW_IDS_PER_REQUEST)?;
        self.create_query("me/following", Method::PUT, &json!({ "type": "artist", "ids": ids }))
    }

    /// Follows artists for the current user.
    ///
    /// # Arguments
    ///
    /// * `ids` - Artist ids; longer lists are sent in several requests
    pub async fn follow_artists<S: AsRef<str> + Clone>(&self, ids: &[S]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::invalid_argument("no artists to follow"));
        }
        sequential_multiget(ids, FOLLOW_IDS_PER_REQUEST, |chunk| async move {
            let request = self.create_request_for_follow_artists(&chunk)?;
            self.perform(request).await.map(|_| Vec::<()>::new())
        })
        .await
        .map(|_| ())
    }

    pub fn create_request_for_unfollow_artists<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<RequestDescriptor> {
        let ids = id_list(ids, FOLLOW_IDS_PER_REQUEST)?;
        self.create_query(
            "me/following",
            Method::DELETE,
            &json!({ "type": "artist", "ids": ids }),
        )
    }

    pub async fn unfollow_artists<S: AsRef<str> + Clone>(&self, ids: &[S]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::invalid_argument("no artists to unfollow"));
        }
        sequential_multiget(ids, FOLLOW_IDS_PER_REQUEST, |chunk| async move {
            let request = self.create_request_for_unfollow_artists(&chunk)?;
            self.perform(request).await.map(|_| Vec::<()>::new())
        })
        .await
        .map(|_| ())
    }

    pub fn create_request_for_is_following_artists<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<RequestDescriptor> {
        let ids = id_list(ids, FOLLOW_IDS_PER_REQUEST)?;
        self.create_get(
            "me/following/contains",
            Some(&json!({ "type": "artist", "ids": ids })),
        )
    }

    /// One flag per id, in input order.
    pub async fn is_following_artists<S: AsRef<str> + Clone>(&self, ids: &[S]) -> Result<Vec<bool>> {
        sequential_multiget(ids, FOLLOW_IDS_PER_REQUEST, |chunk| async move {
            let request = self.create_request_for_is_following_artists(&chunk)?;
            self.fetch_value::<Vec<bool>>(request).await
        })
        .await
    }

    pub fn create_request_for_followed_artists(
        &self,
        after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<RequestDescriptor> {
        let values = json!({ "type": "artist", "after": after, "limit": limit });
        self.create_get("me/following", Some(&values))
    }

    /// Followed artists come as a cursor page; pass the previous page's
    /// [`Page::after_cursor`] as `after` to continue.
    pub async fn followed_artists(
        &self,
        after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Page<Resource<Artist>>> {
        let request = self.create_request_for_followed_artists(after, limit)?;
        self.fetch_page(request, Some("artists")).await
    }
}
