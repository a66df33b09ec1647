use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{decode::Resource, paging::Page};

/// Common accessors for catalog and user objects.
pub trait SpotifyObject {
    fn id(&self) -> &str;
    fn uri(&self) -> &str;
    fn name(&self) -> &str;
}

macro_rules! spotify_object {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SpotifyObject for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn uri(&self) -> &str {
                    &self.uri
                }

                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

spotify_object!(
    SimplifiedArtist,
    Artist,
    SimplifiedAlbum,
    Album,
    SimplifiedTrack,
    Track,
    SimplifiedPlaylist,
    Playlist,
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Followers {
    pub href: Option<String>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: Option<String>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: Option<String>,
    pub genres: Vec<String>,
    pub popularity: u32,
    pub followers: Followers,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub album_type: String,
    pub release_date: Option<String>,
    pub release_date_precision: Option<String>,
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub available_markets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub album_type: String,
    pub label: Option<String>,
    pub release_date: String,
    pub release_date_precision: String,
    pub popularity: u32,
    pub total_tracks: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    pub artists: Vec<SimplifiedArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_ids: HashMap<String, String>,
    pub tracks: Page<Resource<SimplifiedTrack>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub explicit: bool,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    pub explicit: bool,
    pub popularity: u32,
    pub track_number: u32,
    pub disc_number: u32,
    pub preview_url: Option<String>,
    pub artists: Vec<SimplifiedArtist>,
    pub album: Resource<SimplifiedAlbum>,
    #[serde(default)]
    pub external_ids: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrack {
    pub added_at: DateTime<Utc>,
    pub track: Resource<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub added_at: Option<DateTime<Utc>>,
    pub added_by: Option<Resource<User>>,
    #[serde(default)]
    pub is_local: bool,
    pub track: Resource<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracksRef {
    pub href: Option<String>,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub owner: Resource<User>,
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    pub snapshot_id: String,
    pub tracks: TracksRef,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub description: Option<String>,
    pub owner: Resource<User>,
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    pub snapshot_id: String,
    pub followers: Followers,
    #[serde(default)]
    pub images: Vec<Image>,
    pub tracks: Page<Resource<PlaylistTrack>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSnapshot {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub uri: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl SpotifyObject for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

/// Body of a create-playlist request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub public: bool,
    pub collaborative: bool,
}

/// Body of a change-playlist-details request; unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangePlaylistDetailsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborative: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistRequest {
    pub uris: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksFromPlaylistRequest {
    pub tracks: Vec<TrackUri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
}

/// Featured playlists come with an editorial message alongside the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedPlaylists {
    pub message: Option<String>,
    pub playlists: Page<Resource<SimplifiedPlaylist>>,
}

/// Access token as persisted by [`crate::management::TokenStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub token_type: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub date: String,
    pub name: String,
    pub artists: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub genres: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub number: String,
    pub name: String,
    pub artists: String,
    pub length: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub owner: String,
    pub tracks: String,
    pub id: String,
}
