use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    decode::{Entity, Resource},
    types::{
        AlbumTableRow, Artist, ArtistTableRow, PlaylistTableRow, SimplifiedAlbum,
        SimplifiedArtist, SimplifiedPlaylist, SimplifiedTrack, Track, TrackTableRow,
    },
};

const UNAVAILABLE: &str = "(unavailable)";

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub fn print_table<R: tabled::Tabled>(rows: Vec<R>) {
    println!("{}", Table::new(rows));
}

fn artist_names(artists: &[SimplifiedArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn length(duration_ms: u64) -> String {
    let secs = duration_ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn partial_name<T>(resource: &Resource<T>) -> String {
    resource
        .partial()
        .and_then(|p| p.name.clone())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

fn partial_id<T>(resource: &Resource<T>) -> String {
    resource
        .partial()
        .and_then(|p| p.id.clone())
        .unwrap_or_default()
}

pub fn album_row(album: &SimplifiedAlbum) -> AlbumTableRow {
    AlbumTableRow {
        date: album.release_date.clone().unwrap_or_default(),
        name: album.name.clone(),
        artists: artist_names(&album.artists),
        id: album.id.clone(),
    }
}

pub fn album_resource_row<T>(resource: &Resource<T>, complete: impl Fn(&T) -> AlbumTableRow) -> AlbumTableRow {
    match resource {
        Resource::Complete(album) => complete(album),
        Resource::Partial(_) => AlbumTableRow {
            date: String::new(),
            name: partial_name(resource),
            artists: String::new(),
            id: partial_id(resource),
        },
    }
}

pub fn artist_row(resource: &Resource<Artist>) -> ArtistTableRow {
    match resource {
        Resource::Complete(a) => ArtistTableRow {
            name: a.name.clone(),
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","),
            id: a.id.clone(),
        },
        Resource::Partial(_) => ArtistTableRow {
            name: partial_name(resource),
            genres: String::new(),
            id: partial_id(resource),
        },
    }
}

pub fn track_row(resource: &Resource<Track>, number: usize) -> TrackTableRow {
    match resource {
        Resource::Complete(t) => TrackTableRow {
            number: number.to_string(),
            name: t.name.clone(),
            artists: artist_names(&t.artists),
            length: length(t.duration_ms),
        },
        Resource::Partial(_) => TrackTableRow {
            number: number.to_string(),
            name: partial_name(resource),
            artists: String::new(),
            length: String::new(),
        },
    }
}

pub fn simplified_track_row(resource: &Resource<SimplifiedTrack>, number: usize) -> TrackTableRow {
    match resource {
        Resource::Complete(t) => TrackTableRow {
            number: t.track_number.unwrap_or(number as u32).to_string(),
            name: t.name.clone(),
            artists: artist_names(&t.artists),
            length: length(t.duration_ms),
        },
        Resource::Partial(_) => TrackTableRow {
            number: number.to_string(),
            name: partial_name(resource),
            artists: String::new(),
            length: String::new(),
        },
    }
}

pub fn playlist_row(resource: &Resource<SimplifiedPlaylist>) -> PlaylistTableRow {
    match resource {
        Resource::Complete(p) => PlaylistTableRow {
            name: p.name.clone(),
            owner: p.owner.name().unwrap_or_default().to_string(),
            tracks: p.tracks.total.to_string(),
            id: p.id.clone(),
        },
        Resource::Partial(_) => PlaylistTableRow {
            name: partial_name(resource),
            owner: String::new(),
            tracks: String::new(),
            id: partial_id(resource),
        },
    }
}

/// Prints a page of dynamically decoded entities as the matching table.
pub fn print_entities(entities: &[Entity]) {
    let mut albums = Vec::new();
    let mut artists = Vec::new();
    let mut tracks = Vec::new();
    let mut playlists = Vec::new();

    for (i, entity) in entities.iter().enumerate() {
        match entity {
            Entity::SimplifiedAlbum(r) => albums.push(album_resource_row(r, album_row)),
            Entity::Album(r) => albums.push(album_resource_row(r, |a| AlbumTableRow {
                date: a.release_date.clone(),
                name: a.name.clone(),
                artists: artist_names(&a.artists),
                id: a.id.clone(),
            })),
            Entity::Artist(r) => artists.push(artist_row(r)),
            Entity::Track(r) => tracks.push(track_row(r, i + 1)),
            Entity::SimplifiedTrack(r) => tracks.push(simplified_track_row(r, i + 1)),
            Entity::SimplifiedPlaylist(r) => playlists.push(playlist_row(r)),
            Entity::SavedTrack(r) => match r.complete() {
                Some(saved) => tracks.push(track_row(&saved.track, i + 1)),
                None => tracks.push(TrackTableRow {
                    number: (i + 1).to_string(),
                    name: partial_name(r),
                    artists: String::new(),
                    length: String::new(),
                }),
            },
            Entity::PlaylistTrack(r) => match r.complete() {
                Some(item) => tracks.push(track_row(&item.track, i + 1)),
                None => tracks.push(TrackTableRow {
                    number: (i + 1).to_string(),
                    name: partial_name(r),
                    artists: String::new(),
                    length: String::new(),
                }),
            },
            Entity::Playlist(r) => playlists.push(PlaylistTableRow {
                name: r.name().unwrap_or(UNAVAILABLE).to_string(),
                owner: r
                    .complete()
                    .and_then(|p| p.owner.name())
                    .unwrap_or_default()
                    .to_string(),
                tracks: r
                    .complete()
                    .and_then(|p| p.tracks.total)
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
                id: r.id().unwrap_or_default().to_string(),
            }),
            Entity::User(r) => artists.push(ArtistTableRow {
                name: r.name().unwrap_or(UNAVAILABLE).to_string(),
                genres: String::new(),
                id: r.id().unwrap_or_default().to_string(),
            }),
        }
    }

    if !albums.is_empty() {
        print_table(albums);
    }
    if !artists.is_empty() {
        print_table(artists);
    }
    if !tracks.is_empty() {
        print_table(tracks);
    }
    if !playlists.is_empty() {
        print_table(playlists);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_are_minutes_and_seconds() {
        assert_eq!(length(0), "0:00");
        assert_eq!(length(215_000), "3:35");
        assert_eq!(length(61_999), "1:01");
    }

    #[test]
    fn partial_artists_render_their_known_fields() {
        let partial: Resource<Artist> =
            Resource::from_value(serde_json::json!({ "id": "x1", "name": "Known" }));
        let row = artist_row(&partial);
        assert_eq!(row.name, "Known");
        assert_eq!(row.id, "x1");
        assert!(row.genres.is_empty());
    }
}
