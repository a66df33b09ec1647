use crate::{error, info, spotify::search::SearchType, warning};

use super::{
    client,
    render::{self, print_table},
};

pub async fn search(query: String, search_type: SearchType, offset: u32) {
    let client = client().await;
    let page = match client.search(&query, search_type, offset, None).await {
        Ok(page) => page,
        Err(e) => error!("Search failed. Err: {}", e),
    };

    if page.is_empty() {
        warning!("No {} found for '{}'.", search_type, query);
        return;
    }

    render::print_entities(&page.items);
    if let Some(total) = page.total {
        info!("{} results in total.", total);
    }
}

pub async fn new_releases(offset: u32) {
    let client = client().await;
    match client.new_releases(offset, None).await {
        Ok(page) => {
            let rows = page
                .items
                .iter()
                .map(|r| render::album_resource_row(r, render::album_row))
                .collect();
            print_table(rows);
        }
        Err(e) => error!("Failed to fetch new releases. Err: {}", e),
    }
}

pub async fn featured(offset: u32) {
    let client = client().await;
    match client.featured_playlists(offset, None).await {
        Ok(featured) => {
            if let Some(message) = &featured.message {
                info!("{}", message);
            }
            let rows = featured
                .playlists
                .items
                .iter()
                .map(render::playlist_row)
                .collect();
            print_table(rows);
        }
        Err(e) => error!("Failed to fetch featured playlists. Err: {}", e),
    }
}
