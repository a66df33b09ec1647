use serde_json::json;

use crate::{
    client::SpotifyClient,
    decode::{self, Resource},
    error::Result,
    paging::Page,
    request::RequestDescriptor,
    types::{FeaturedPlaylists, SimplifiedAlbum},
};

impl SpotifyClient {
    pub fn create_request_for_featured_playlists(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<RequestDescriptor> {
        let values = json!({ "offset": offset, "limit": limit, "country": self.market() });
        self.create_get("browse/featured-playlists", Some(&values))
    }

    /// Editorially featured playlists together with the localized message
    /// shown above them. Uses the client's market as the country.
    ///
    /// # Arguments
    ///
    /// * `offset` - Index of the first playlist to return
    /// * `limit` - Page size; `None` uses the server default
    pub async fn featured_playlists(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<FeaturedPlaylists> {
        let request = self.create_request_for_featured_playlists(offset, limit)?;
        let value = self.perform(request).await?;
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string);
        let playlists = decode::page_from_value(value, Some("playlists"))?;
        Ok(FeaturedPlaylists { message, playlists })
    }

    pub fn create_request_for_new_releases(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<RequestDescriptor> {
        let values = json!({ "offset": offset, "limit": limit, "country": self.market() });
        self.create_get("browse/new-releases", Some(&values))
    }

    /// Newly released albums, newest first.
    pub async fn new_releases(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<Resource<SimplifiedAlbum>>> {
        let request = self.create_request_for_new_releases(offset, limit)?;
        self.fetch_page(request, Some("albums")).await
    }
}
