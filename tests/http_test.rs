use httpmock::prelude::*;
use serde_json::json;
use spotmeta::{
    Executor, SpotifyClient,
    error::ErrorKind,
    types::{ChangePlaylistDetailsRequest, CreatePlaylistRequest},
};

fn client_for(server: &MockServer) -> SpotifyClient {
    SpotifyClient::with_executor(Executor::http(), &server.url("/v1"), "tok").unwrap()
}

#[tokio::test]
async fn album_lookup_sends_token_and_market() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/albums/abc")
                .header("authorization", "Bearer tok")
                .query_param("market", "SE");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "id": "abc",
                    "name": "Abc",
                    "uri": "spotify:album:abc",
                    "album_type": "album",
                    "release_date": "1999",
                    "release_date_precision": "year",
                    "popularity": 10,
                    "total_tracks": 0,
                    "artists": [],
                    "tracks": { "items": [], "total": 0 }
                }));
        })
        .await;

    let album = client_for(&server).with_market("SE").album("abc").await.unwrap();
    m.assert_async().await;
    assert_eq!(album.complete().map(|a| a.release_date.as_str()), Some("1999"));
}

#[tokio::test]
async fn batch_lookup_joins_ids() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/tracks").query_param("ids", "t1,t2");
            then.status(200).json_body(json!({ "tracks": [null, null] }));
        })
        .await;

    let tracks = client_for(&server).tracks(&["t1", "t2"]).await.unwrap();
    m.assert_async().await;
    assert_eq!(tracks.len(), 2);
    assert!(tracks.iter().all(|t| t.is_partial()));
}

#[tokio::test]
async fn create_playlist_posts_json() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/users/u1/playlists")
                .header("content-type", "application/json")
                .json_body(json!({
                    "name": "Mix",
                    "public": false,
                    "collaborative": false
                }));
            then.status(201).json_body(json!({ "id": "pl1", "name": "Mix", "type": "playlist" }));
        })
        .await;

    let body = CreatePlaylistRequest {
        name: "Mix".into(),
        description: None,
        public: false,
        collaborative: false,
    };
    let playlist = client_for(&server).create_playlist("u1", &body).await.unwrap();
    m.assert_async().await;
    assert_eq!(playlist.partial().and_then(|p| p.id.as_deref()), Some("pl1"));
}

#[tokio::test]
async fn change_details_accepts_an_empty_response() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/v1/playlists/pl1")
                .json_body(json!({ "name": "Renamed" }));
            then.status(200);
        })
        .await;

    let details = ChangePlaylistDetailsRequest {
        name: Some("Renamed".into()),
        ..Default::default()
    };
    client_for(&server).change_details("pl1", &details).await.unwrap();
    m.assert_async().await;
}

#[tokio::test]
async fn error_bodies_are_mapped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/artists/missing");
            then.status(404)
                .json_body(json!({ "error": { "status": 404, "message": "non existing id" } }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/me");
            then.status(503).body("<html>down</html>");
        })
        .await;

    let client = client_for(&server);

    let err = client.artist("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.code(), 404);
    assert_eq!(err.message(), "non existing id");

    let err = client.me().await.unwrap_err();
    assert_eq!(err.code(), 503);
    assert_eq!(err.message(), "HTTP 503 Service Unavailable");
}

#[tokio::test]
async fn followed_artists_use_cursor_pages() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/me/following")
                .query_param("type", "artist")
                .query_param("after", "cursor1");
            then.status(200).json_body(json!({
                "artists": {
                    "items": [],
                    "limit": 20,
                    "next": null,
                    "cursors": { "after": null }
                }
            }));
        })
        .await;

    let page = client_for(&server)
        .followed_artists(Some("cursor1"), None)
        .await
        .unwrap();
    m.assert_async().await;
    assert!(page.is_empty());
    assert!(!page.has_more());
    assert_eq!(page.after_cursor(), None);
}

#[tokio::test]
async fn unreachable_servers_are_transport_errors() {
    let client =
        SpotifyClient::with_executor(Executor::http(), "http://127.0.0.1:1/v1", "tok").unwrap();
    let err = client.me().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
