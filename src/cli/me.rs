use crate::{
    decode::Resource,
    error, info,
    spotify::personalize::{PersonalizeType, TimeRange},
    warning,
};

use super::{client, render};

pub async fn me() {
    let client = client().await;
    match client.me().await {
        Ok(Resource::Complete(user)) => {
            info!("{} ({})", user.display_name.as_deref().unwrap_or(&user.id), user.id);
            if let Some(country) = &user.country {
                info!("Country: {}", country);
            }
            if let Some(product) = &user.product {
                info!("Product: {}", product);
            }
            if let Some(followers) = &user.followers {
                info!("Followers: {}", followers.total);
            }
        }
        Ok(Resource::Partial(p)) => warning!(
            "Profile is only partially available: {}",
            p.id.unwrap_or_default()
        ),
        Err(e) => error!("Failed to fetch profile. Err: {}", e),
    }
}

pub async fn top(kind: PersonalizeType, time_range: Option<TimeRange>, offset: u32) {
    let client = client().await;
    let page = match client.users_top(kind, offset, time_range).await {
        Ok(page) => page,
        Err(e) => error!("Failed to fetch top items. Err: {}", e),
    };

    if page.is_empty() {
        warning!("Nothing here yet.");
        return;
    }

    render::print_entities(&page.items);
    if let Some(next) = page.next_offset() {
        info!("More available. Continue with --offset {}", next);
    }
}
