use std::fmt;

use serde_json::json;

use crate::{
    client::SpotifyClient,
    decode::{self, Decoded, Entity, ObjectKind, Shape},
    error::{Error, Result},
    paging::Page,
    request::RequestDescriptor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Album,
    Artist,
    Playlist,
    Track,
}

impl SearchType {
    /// Member of the response holding the result page, e.g. `"albums"`.
    pub fn root_key(self) -> &'static str {
        match self {
            SearchType::Album => "albums",
            SearchType::Artist => "artists",
            SearchType::Playlist => "playlists",
            SearchType::Track => "tracks",
        }
    }

    fn kind(self) -> ObjectKind {
        match self {
            SearchType::Album => ObjectKind::SimplifiedAlbum,
            SearchType::Artist => ObjectKind::Artist,
            SearchType::Playlist => ObjectKind::SimplifiedPlaylist,
            SearchType::Track => ObjectKind::Track,
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchType::Album => "album",
            SearchType::Artist => "artist",
            SearchType::Playlist => "playlist",
            SearchType::Track => "track",
        };
        write!(f, "{}", s)
    }
}

impl SpotifyClient {
    pub fn create_request_for_search(
        &self,
        query: &str,
        search_type: SearchType,
        offset: u32,
        market: Option<&str>,
    ) -> Result<RequestDescriptor> {
        if query.trim().is_empty() {
            return Err(Error::invalid_argument("search query must not be empty"));
        }
        let values = json!({
            "q": query,
            "type": search_type.to_string(),
            "offset": offset,
            "market": market.or(self.market()),
        });
        self.create_get("search", Some(&values))
    }

    /// Searches the catalog for one object type.
    ///
    /// Items are decoded into the [`Entity`] variant matching `search_type`.
    ///
    /// # Arguments
    ///
    /// * `query` - Search text, including field filters such as `artist:`
    /// * `search_type` - Which object type to search for
    /// * `offset` - Index of the first result to return
    /// * `market` - Market to search in; `None` falls back to the client's
    ///
    /// # Errors
    ///
    /// An empty or blank `query` is rejected before any request is sent.
    ///
    /// # Example
    ///
    /// ```
    /// use spotmeta::{Entity, spotify::search::SearchType};
    ///
    /// let page = client.search("tove lo", SearchType::Artist, 0, None).await?;
    /// for entity in &page.items {
    ///     if let Entity::Artist(artist) = entity {
    ///         println!("{:?}", artist.complete().map(|a| &a.name));
    ///     }
    /// }
    /// ```
    pub async fn search(
        &self,
        query: &str,
        search_type: SearchType,
        offset: u32,
        market: Option<&str>,
    ) -> Result<Page<Entity>> {
        let request = self.create_request_for_search(query, search_type, offset, market)?;
        let value = self.perform(request).await?;
        let shape = Shape::Page(search_type.kind(), Some(search_type.root_key()));
        match decode::decode_value(value, shape)? {
            Decoded::Page(page) => Ok(page),
            _ => Err(Error::decoding("expected a listing page")),
        }
    }
}
