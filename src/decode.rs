//! JSON decoding dispatcher.
//!
//! Responses are decoded into [`Resource`] values: a fully decoded record, or
//! a [`PartialObject`] stub when the JSON lacks fields the record needs. The
//! Web API routinely embeds abbreviated objects (a track inside a playlist
//! listing, an owner inside a playlist), so incomplete data is never an
//! error. Only invalid JSON, or a top-level value of the wrong type, fails.
//!
//! Callers that know the result type statically use [`decode_entity`],
//! [`decode_page`] and [`decode_list`]. [`decode`] is the dynamic form, driven
//! by a [`Shape`] tag.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    paging::Page,
    types::{
        Album, Artist, Playlist, PlaylistTrack, SavedTrack, SimplifiedAlbum, SimplifiedPlaylist,
        SimplifiedTrack, SpotifyObject, Track, User,
    },
};

/// The identifying fields of an object that could not be fully decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialObject {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub uri: Option<String>,
    pub name: Option<String>,
    pub href: Option<String>,
}

impl PartialObject {
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            kind: field("type"),
            id: field("id"),
            uri: field("uri"),
            name: field("name").or_else(|| field("display_name")),
            href: field("href"),
        }
    }
}

/// A decoded object, complete or reduced to a reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resource<T> {
    Complete(T),
    Partial(PartialObject),
}

impl<T: DeserializeOwned> Resource<T> {
    /// Decodes `value` as `T`, degrading to a partial stub on any mismatch.
    pub fn from_value(value: Value) -> Self {
        match T::deserialize(&value) {
            Ok(complete) => Resource::Complete(complete),
            Err(_) => Resource::Partial(PartialObject::from_value(&value)),
        }
    }
}

impl<T> Resource<T> {
    pub fn is_complete(&self) -> bool {
        matches!(self, Resource::Complete(_))
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Resource::Partial(_))
    }

    pub fn complete(&self) -> Option<&T> {
        match self {
            Resource::Complete(t) => Some(t),
            Resource::Partial(_) => None,
        }
    }

    pub fn into_complete(self) -> Option<T> {
        match self {
            Resource::Complete(t) => Some(t),
            Resource::Partial(_) => None,
        }
    }

    pub fn partial(&self) -> Option<&PartialObject> {
        match self {
            Resource::Complete(_) => None,
            Resource::Partial(p) => Some(p),
        }
    }
}

impl<T: SpotifyObject> Resource<T> {
    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::Complete(t) => Some(t.id()),
            Resource::Partial(p) => p.id.as_deref(),
        }
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            Resource::Complete(t) => Some(t.uri()),
            Resource::Partial(p) => p.uri.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Resource::Complete(t) => Some(t.name()),
            Resource::Partial(p) => p.name.as_deref(),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Resource<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Resource::from_value(value))
    }
}

/// Object types the dispatcher knows how to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Album,
    SimplifiedAlbum,
    Artist,
    Track,
    SimplifiedTrack,
    Playlist,
    SimplifiedPlaylist,
    PlaylistTrack,
    SavedTrack,
    User,
}

/// Expected layout of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One object at the top level.
    Entity(ObjectKind),
    /// A listing page, optionally wrapped in a root key such as `"albums"`.
    Page(ObjectKind, Option<&'static str>),
    /// A bare array, optionally wrapped in a root key.
    List(ObjectKind, Option<&'static str>),
}

/// An object decoded by [`decode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Album(Resource<Album>),
    SimplifiedAlbum(Resource<SimplifiedAlbum>),
    Artist(Resource<Artist>),
    Track(Resource<Track>),
    SimplifiedTrack(Resource<SimplifiedTrack>),
    Playlist(Resource<Playlist>),
    SimplifiedPlaylist(Resource<SimplifiedPlaylist>),
    PlaylistTrack(Resource<PlaylistTrack>),
    SavedTrack(Resource<SavedTrack>),
    User(Resource<User>),
}

impl Entity {
    pub fn is_partial(&self) -> bool {
        match self {
            Entity::Album(r) => r.is_partial(),
            Entity::SimplifiedAlbum(r) => r.is_partial(),
            Entity::Artist(r) => r.is_partial(),
            Entity::Track(r) => r.is_partial(),
            Entity::SimplifiedTrack(r) => r.is_partial(),
            Entity::Playlist(r) => r.is_partial(),
            Entity::SimplifiedPlaylist(r) => r.is_partial(),
            Entity::PlaylistTrack(r) => r.is_partial(),
            Entity::SavedTrack(r) => r.is_partial(),
            Entity::User(r) => r.is_partial(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Entity(Entity),
    Page(Page<Entity>),
    List(Vec<Entity>),
}

impl ObjectKind {
    fn constructor(self) -> fn(Value) -> Entity {
        match self {
            ObjectKind::Album => |v| Entity::Album(Resource::from_value(v)),
            ObjectKind::SimplifiedAlbum => |v| Entity::SimplifiedAlbum(Resource::from_value(v)),
            ObjectKind::Artist => |v| Entity::Artist(Resource::from_value(v)),
            ObjectKind::Track => |v| Entity::Track(Resource::from_value(v)),
            ObjectKind::SimplifiedTrack => |v| Entity::SimplifiedTrack(Resource::from_value(v)),
            ObjectKind::Playlist => |v| Entity::Playlist(Resource::from_value(v)),
            ObjectKind::SimplifiedPlaylist => {
                |v| Entity::SimplifiedPlaylist(Resource::from_value(v))
            }
            ObjectKind::PlaylistTrack => |v| Entity::PlaylistTrack(Resource::from_value(v)),
            ObjectKind::SavedTrack => |v| Entity::SavedTrack(Resource::from_value(v)),
            ObjectKind::User => |v| Entity::User(Resource::from_value(v)),
        }
    }
}

/// Decodes a response body according to `shape`.
pub fn decode(bytes: &[u8], shape: Shape) -> Result<Decoded> {
    let value = parse(bytes)?;
    decode_value(value, shape)
}

pub fn decode_value(value: Value, shape: Shape) -> Result<Decoded> {
    match shape {
        Shape::Entity(kind) => {
            let object = expect_object(value)?;
            Ok(Decoded::Entity(kind.constructor()(object)))
        }
        Shape::Page(kind, root_key) => {
            let listing = expect_object(unwrap_root(value, root_key, || Value::Object(Map::new()))?)?;
            Ok(Decoded::Page(Page::from_value(&listing, kind.constructor())))
        }
        Shape::List(kind, root_key) => {
            let items = expect_array(unwrap_root(value, root_key, || Value::Array(Vec::new()))?)?;
            Ok(Decoded::List(
                items.into_iter().map(kind.constructor()).collect(),
            ))
        }
    }
}

pub fn decode_entity<T: DeserializeOwned>(bytes: &[u8]) -> Result<Resource<T>> {
    entity_from_value(parse(bytes)?)
}

pub fn decode_page<T: DeserializeOwned>(
    bytes: &[u8],
    root_key: Option<&str>,
) -> Result<Page<Resource<T>>> {
    page_from_value(parse(bytes)?, root_key)
}

pub fn decode_list<T: DeserializeOwned>(
    bytes: &[u8],
    root_key: Option<&str>,
) -> Result<Vec<Resource<T>>> {
    list_from_value(parse(bytes)?, root_key)
}

pub fn entity_from_value<T: DeserializeOwned>(value: Value) -> Result<Resource<T>> {
    Ok(Resource::from_value(expect_object(value)?))
}

pub fn page_from_value<T: DeserializeOwned>(
    value: Value,
    root_key: Option<&str>,
) -> Result<Page<Resource<T>>> {
    let listing = expect_object(unwrap_root(value, root_key, || Value::Object(Map::new()))?)?;
    Ok(Page::from_value(&listing, Resource::from_value))
}

pub fn list_from_value<T: DeserializeOwned>(
    value: Value,
    root_key: Option<&str>,
) -> Result<Vec<Resource<T>>> {
    let items = expect_array(unwrap_root(value, root_key, || Value::Array(Vec::new()))?)?;
    Ok(items.into_iter().map(Resource::from_value).collect())
}

/// Strict decoding for plain values (for example the boolean arrays returned
/// by "contains" endpoints) where no partial form exists.
pub fn value_as<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::decoding(format!("unexpected response: {}", e)))
}

fn parse(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| Error::decoding(format!("malformed response: {}", e)))
}

/// A missing or null root member yields `empty()`; only a non-object body
/// is an error.
fn unwrap_root(
    value: Value,
    root_key: Option<&str>,
    empty: impl FnOnce() -> Value,
) -> Result<Value> {
    let Some(key) = root_key else {
        return Ok(value);
    };

    match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Null) | None => Ok(empty()),
            Some(inner) => Ok(inner),
        },
        _ => Err(Error::decoding("expected a JSON object")),
    }
}

fn expect_object(value: Value) -> Result<Value> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(Error::decoding("expected a JSON object"))
    }
}

fn expect_array(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(Error::decoding("expected a JSON array")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn simplified_artist() -> Value {
        json!({
            "id": "4NHQUGzhtTLFvgF5SZesLK",
            "name": "Tove Lo",
            "uri": "spotify:artist:4NHQUGzhtTLFvgF5SZesLK",
            "href": "https://api.spotify.com/v1/artists/4NHQUGzhtTLFvgF5SZesLK",
        })
    }

    #[test]
    fn listing_with_remaining_items_has_more() {
        let body = json!({
            "items": [simplified_artist(), simplified_artist(), simplified_artist()],
            "offset": 0,
            "limit": 3,
            "total": 10,
        });
        let page: Page<Resource<crate::types::SimplifiedArtist>> =
            decode_page(body.to_string().as_bytes(), None).unwrap();
        assert_eq!(page.len(), 3);
        assert!(page.has_more());
        assert!(page.items.iter().all(Resource::is_complete));
    }

    #[test]
    fn listing_with_every_item_has_no_more() {
        let body = json!({
            "items": [simplified_artist(), simplified_artist(), simplified_artist()],
            "offset": 0,
            "limit": 3,
            "total": 3,
        });
        let page: Page<Resource<crate::types::SimplifiedArtist>> =
            decode_page(body.to_string().as_bytes(), None).unwrap();
        assert!(!page.has_more());
    }

    #[test]
    fn incomplete_object_degrades_to_partial() {
        let body = json!({ "id": "abc", "type": "album", "uri": "spotify:album:abc" });
        let album: Resource<Album> = decode_entity(body.to_string().as_bytes()).unwrap();
        let partial = album.partial().unwrap();
        assert_eq!(partial.id.as_deref(), Some("abc"));
        assert_eq!(partial.kind.as_deref(), Some("album"));
        assert_eq!(album.uri(), Some("spotify:album:abc"));
    }

    #[test]
    fn null_list_entries_become_empty_partials() {
        let body = json!({ "artists": [simplified_artist(), null] });
        let list: Vec<Resource<crate::types::SimplifiedArtist>> =
            decode_list(body.to_string().as_bytes(), Some("artists")).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[0].is_complete());
        assert_eq!(list[1].partial(), Some(&PartialObject::default()));
    }

    #[test]
    fn syntax_errors_are_hard_failures() {
        let err = decode(b"{\"items\": [", Shape::Page(ObjectKind::Track, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn wrong_top_level_type_fails() {
        let err = decode(b"[1, 2]", Shape::Entity(ObjectKind::Album)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
        let err = decode(b"{}", Shape::List(ObjectKind::Album, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn missing_root_member_decodes_empty() {
        let decoded = decode(b"{}", Shape::Page(ObjectKind::Track, Some("tracks"))).unwrap();
        assert_eq!(decoded, Decoded::Page(Page::empty()));

        let decoded = decode(
            br#"{"other": 1}"#,
            Shape::List(ObjectKind::Artist, Some("artists")),
        )
        .unwrap();
        assert_eq!(decoded, Decoded::List(vec![]));

        let page: Page<Resource<crate::types::SimplifiedAlbum>> =
            decode_page(br#"{"albums": null}"#, Some("albums")).unwrap();
        assert!(page.is_empty());
        assert!(!page.has_more());

        let err = decode(b"[]", Shape::List(ObjectKind::Artist, Some("artists"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn dispatch_builds_the_requested_kind() {
        let body = json!({ "tracks": { "items": [{ "id": "t1" }], "total": 1 } });
        let decoded = decode(
            body.to_string().as_bytes(),
            Shape::Page(ObjectKind::Track, Some("tracks")),
        )
        .unwrap();
        let Decoded::Page(page) = decoded else {
            panic!("expected a page");
        };
        assert_eq!(page.len(), 1);
        assert!(matches!(&page.items[0], Entity::Track(r) if r.is_partial()));
        assert!(!page.has_more());
    }

    #[test]
    fn empty_object_still_decodes() {
        let decoded = decode(b"{}", Shape::Page(ObjectKind::SimplifiedAlbum, None)).unwrap();
        assert_eq!(decoded, Decoded::Page(Page::empty()));

        let decoded = decode(b"{}", Shape::Entity(ObjectKind::User)).unwrap();
        assert!(matches!(decoded, Decoded::Entity(Entity::User(Resource::Partial(_)))));
    }
}
