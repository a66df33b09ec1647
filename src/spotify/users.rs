use crate::{
    client::{SpotifyClient, segment},
    decode::Resource,
    error::Result,
    request::RequestDescriptor,
    types::User,
};

impl SpotifyClient {
    pub fn create_request_for_me(&self) -> Result<RequestDescriptor> {
        self.create_get("me", None)
    }

    /// The profile of the user owning the access token.
    pub async fn me(&self) -> Result<Resource<User>> {
        let request = self.create_request_for_me()?;
        self.fetch_entity(request).await
    }

    pub fn create_request_for_user(&self, user_id: &str) -> Result<RequestDescriptor> {
        self.create_get(&format!("users/{}", segment(user_id)), None)
    }

    /// A user's public profile.
    pub async fn user(&self, user_id: &str) -> Result<Resource<User>> {
        let request = self.create_request_for_user(user_id)?;
        self.fetch_entity(request).await
    }
}
