use crate::{config, error, info, management::TokenStore, success, warning};

pub async fn token_set(token: String, token_type: Option<String>) {
    let token_type = token_type.unwrap_or_else(config::spotify_token_type);
    let store = TokenStore::new(token.trim(), token_type);
    if let Err(e) = store.persist().await {
        error!("Failed to save token. Err: {}", e);
    }
    success!("Token saved to {}", store.path().display());
}

pub async fn token_show() {
    if config::spotify_access_token().is_some() {
        info!("SPOTIFY_ACCESS_TOKEN is set and takes precedence over the saved token.");
    }

    match TokenStore::load().await {
        Ok(store) => {
            let token = store.current_token();
            info!("Token type: {}", token.token_type);
            info!("Token: {}", mask(&token.access_token));
            info!("Saved at: {}", token.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        Err(_) => warning!("No saved token. Run spotmeta token set <TOKEN>"),
    }
}

pub async fn token_clear() {
    match TokenStore::clear().await {
        Ok(()) => success!("Saved token removed"),
        Err(e) => error!("Failed to remove token. Err: {}", e),
    }
}

/// Shows only the first and last few characters.
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_masked() {
        assert_eq!(mask("short"), "*****");
        assert_eq!(mask("BQCabcdefghijkl1234"), "BQCa...1234");
    }
}
