use crate::{
    decode::Resource,
    error, info,
    types::{AlbumTableRow, PlaylistTableRow},
    warning,
};

use super::{
    client,
    render::{self, print_table, spinner},
};

pub async fn album(id: String) {
    let client = client().await;
    let album = match client.album(&id).await {
        Ok(album) => album,
        Err(e) => error!("Failed to fetch album {}. Err: {}", id, e),
    };

    let Resource::Complete(album) = album else {
        warning!("Album {} is only partially available.", id);
        return;
    };

    info!(
        "{} by {} ({}, {} tracks)",
        album.name,
        album
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        album.release_date,
        album.total_tracks
    );
    if let Some(label) = &album.label {
        info!("Label: {}", label);
    }

    let rows = album
        .tracks
        .items
        .iter()
        .enumerate()
        .map(|(i, t)| render::simplified_track_row(t, i + 1))
        .collect();
    print_table(rows);

    if album.tracks.has_more() {
        info!(
            "Showing {} of {} tracks.",
            album.tracks.len(),
            album.tracks.total.unwrap_or_default()
        );
    }
}

pub async fn albums(ids: Vec<String>) {
    let client = client().await;
    let pb = spinner(format!("Fetching {} albums...", ids.len()));
    let albums = match client.albums(&ids).await {
        Ok(albums) => albums,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch albums. Err: {}", e);
        }
    };
    pb.finish_and_clear();

    let partial = albums.iter().filter(|a| a.is_partial()).count();
    let rows: Vec<AlbumTableRow> = albums
        .iter()
        .map(|r| {
            render::album_resource_row(r, |a| AlbumTableRow {
                date: a.release_date.clone(),
                name: a.name.clone(),
                artists: a
                    .artists
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                id: a.id.clone(),
            })
        })
        .collect();
    print_table(rows);

    if partial > 0 {
        warning!("{} of {} albums are incomplete.", partial, albums.len());
    }
}

pub async fn artist(id: String) {
    let client = client().await;
    match client.artist(&id).await {
        Ok(artist) => {
            if let Some(a) = artist.complete() {
                info!("{} followers, popularity {}", a.followers.total, a.popularity);
            }
            print_table(vec![render::artist_row(&artist)]);
        }
        Err(e) => error!("Failed to fetch artist {}. Err: {}", id, e),
    }
}

pub async fn track(id: String) {
    let client = client().await;
    match client.track(&id).await {
        Ok(track) => {
            print_table(vec![render::track_row(&track, 1)]);
            if let Some(album) = track.complete().and_then(|t| t.album.complete()) {
                info!("From {}", album.name);
            }
        }
        Err(e) => error!("Failed to fetch track {}. Err: {}", id, e),
    }
}

pub async fn tracks(ids: Vec<String>) {
    let client = client().await;
    let pb = spinner(format!("Fetching {} tracks...", ids.len()));
    let tracks = match client.tracks(&ids).await {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch tracks. Err: {}", e);
        }
    };
    pb.finish_and_clear();

    let rows = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| render::track_row(t, i + 1))
        .collect();
    print_table(rows);
}

pub async fn playlist(id: String) {
    let client = client().await;
    let playlist = match client.playlist(&id).await {
        Ok(playlist) => playlist,
        Err(e) => error!("Failed to fetch playlist {}. Err: {}", id, e),
    };

    let Resource::Complete(playlist) = playlist else {
        warning!("Playlist {} is only partially available.", id);
        return;
    };

    print_table(vec![PlaylistTableRow {
        name: playlist.name.clone(),
        owner: playlist.owner.name().unwrap_or_default().to_string(),
        tracks: playlist
            .tracks
            .total
            .map(|t| t.to_string())
            .unwrap_or_default(),
        id: playlist.id.clone(),
    }]);

    let rows = playlist
        .tracks
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| match item.complete() {
            Some(item) => render::track_row(&item.track, i + 1),
            None => render::track_row(&Resource::Partial(item.partial().cloned().unwrap_or_default()), i + 1),
        })
        .collect();
    print_table(rows);
}
