use std::fmt;

use serde_json::json;

use crate::{
    client::SpotifyClient,
    decode::{self, Decoded, Entity, ObjectKind, Resource, Shape},
    error::{Error, Result},
    paging::Page,
    request::RequestDescriptor,
    types::{Artist, Track},
};

/// What `GET /me/top/{type}` ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalizeType {
    Artists,
    Tracks,
}

impl PersonalizeType {
    fn path(self) -> &'static str {
        match self {
            PersonalizeType::Artists => "artists",
            PersonalizeType::Tracks => "tracks",
        }
    }

    fn kind(self) -> ObjectKind {
        match self {
            PersonalizeType::Artists => ObjectKind::Artist,
            PersonalizeType::Tracks => ObjectKind::Track,
        }
    }
}

/// Window the affinities are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    /// Roughly the last four weeks.
    Short,
    #[default]
    Medium,
    /// Several years of history.
    Long,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        };
        write!(f, "{}", s)
    }
}

impl SpotifyClient {
    pub fn create_request_for_users_top(
        &self,
        kind: PersonalizeType,
        offset: u32,
        time_range: Option<TimeRange>,
    ) -> Result<RequestDescriptor> {
        let values = json!({
            "offset": offset,
            "time_range": time_range.map(|r| r.to_string()),
        });
        self.create_get(&format!("me/top/{}", kind.path()), Some(&values))
    }

    /// The current user's top artists or tracks, decoded according to `kind`.
    pub async fn users_top(
        &self,
        kind: PersonalizeType,
        offset: u32,
        time_range: Option<TimeRange>,
    ) -> Result<Page<Entity>> {
        let request = self.create_request_for_users_top(kind, offset, time_range)?;
        let value = self.perform(request).await?;
        match decode::decode_value(value, Shape::Page(kind.kind(), None))? {
            Decoded::Page(page) => Ok(page),
            _ => Err(Error::decoding("expected a listing page")),
        }
    }

    /// Typed shortcut for [`Self::users_top`] with artists.
    pub async fn top_artists(
        &self,
        offset: u32,
        time_range: Option<TimeRange>,
    ) -> Result<Page<Resource<Artist>>> {
        let request = self.create_request_for_users_top(PersonalizeType::Artists, offset, time_range)?;
        self.fetch_page(request, None).await
    }

    /// Typed shortcut for [`Self::users_top`] with tracks.
    pub async fn top_tracks(
        &self,
        offset: u32,
        time_range: Option<TimeRange>,
    ) -> Result<Page<Resource<Track>>> {
        let request = self.create_request_for_users_top(PersonalizeType::Tracks, offset, time_range)?;
        self.fetch_page(request, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ranges_use_wire_names() {
        assert_eq!(TimeRange::Short.to_string(), "short_term");
        assert_eq!(TimeRange::Medium.to_string(), "medium_term");
        assert_eq!(TimeRange::Long.to_string(), "long_term");
    }
}
