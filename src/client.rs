//! The authenticated Web API client.
//!
//! [`SpotifyClient`] ties the pipeline together: it builds a request for an
//! endpoint, runs it through its [`Executor`], maps the response and decodes
//! it. Endpoint-specific operations live in [`crate::spotify`] as further
//! `impl SpotifyClient` blocks; each comes as a `create_request_for_*`
//! builder plus an async operation that performs the request.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::{
    config,
    decode::{self, Resource},
    error::{Error, Result, map_response},
    executor::{Executor, HttpTransport},
    paging::Page,
    request::{AccessToken, RequestDescriptor},
};

#[derive(Clone)]
pub struct SpotifyClient {
    executor: Executor,
    base_url: Url,
    token: AccessToken,
    market: Option<String>,
}

impl SpotifyClient {
    /// A client talking to the public Web API over HTTP.
    pub fn new(token: impl Into<AccessToken>) -> Result<Self> {
        Self::with_executor(Executor::http(), config::DEFAULT_API_URL, token)
    }

    /// A client using a caller-supplied executor and base URL.
    ///
    /// A trailing slash on `base_url` is ignored. Tests pass an [`Executor`]
    /// over a [`crate::MockTransport`] here to run without a network.
    ///
    /// # Arguments
    ///
    /// * `executor` - Runs every request the client builds
    /// * `base_url` - API root such as `https://api.spotify.com/v1`
    /// * `token` - Bearer token sent with each request
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `base_url` is not a valid URL.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use spotmeta::{Executor, MockTransport, SpotifyClient};
    ///
    /// let mock = Arc::new(MockTransport::offline());
    /// let client = SpotifyClient::with_executor(
    ///     Executor::new(mock.clone()),
    ///     "https://api.example.com/v1/",
    ///     "token",
    /// )?;
    /// assert_eq!(client.base_url().as_str(), "https://api.example.com/v1");
    /// ```
    pub fn with_executor(
        executor: Executor,
        base_url: &str,
        token: impl Into<AccessToken>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Error::invalid_argument(format!("invalid base url '{}': {}", base_url, e)))?;

        Ok(Self {
            executor,
            base_url,
            token: token.into(),
            market: None,
        })
    }

    /// A client whose base URL, market and timeout come from the environment
    /// (see [`crate::config`]).
    pub fn from_env(token: impl Into<AccessToken>) -> Result<Self> {
        let transport = HttpTransport::with_timeout(config::http_timeout())?;
        let executor = Executor::new(std::sync::Arc::new(transport));

        let mut client = Self::with_executor(executor, &config::spotify_apiurl(), token)?;
        client.market = config::spotify_market();
        Ok(client)
    }

    /// Restricts catalog lookups to a market (ISO 3166-1 alpha-2).
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn market(&self) -> Option<&str> {
        self.market.as_deref()
    }

    /// Resolves an API path such as `albums/123` against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&url).map_err(|e| Error::invalid_argument(format!("invalid endpoint '{}': {}", path, e)))
    }

    /// Builds a request for `path` with the given value encoding.
    pub fn create_request(
        &self,
        path: &str,
        method: Method,
        values: Option<&Value>,
        encode_as_json: bool,
        send_as_query_string: Option<bool>,
    ) -> Result<RequestDescriptor> {
        RequestDescriptor::build(
            self.endpoint(path)?,
            &self.token,
            method,
            values,
            encode_as_json,
            send_as_query_string,
        )
    }

    /// A GET request with `values` in the query string.
    pub fn create_get(&self, path: &str, values: Option<&Value>) -> Result<RequestDescriptor> {
        self.create_request(path, Method::GET, values, false, None)
    }

    /// A request carrying `body` as JSON.
    pub fn create_json(&self, path: &str, method: Method, body: &Value) -> Result<RequestDescriptor> {
        self.create_request(path, method, Some(body), true, None)
    }

    /// A mutating request whose values travel in the query string.
    pub fn create_query(&self, path: &str, method: Method, values: &Value) -> Result<RequestDescriptor> {
        self.create_request(path, method, Some(values), false, Some(true))
    }

    /// Executes a built request and maps the outcome to a JSON value.
    ///
    /// An empty success body becomes `Value::Null`. Non-2xx statuses become
    /// `Http` errors carrying the status and the server's error message when
    /// the body has one.
    pub async fn perform(&self, request: RequestDescriptor) -> Result<Value> {
        let response = self.executor.execute(request).await?;
        map_response(&response)
    }

    /// Performs `request` and decodes a single object, degrading to a
    /// partial entry when fields are missing.
    pub async fn fetch_entity<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<Resource<T>> {
        decode::entity_from_value(self.perform(request).await?)
    }

    /// Performs `request` and decodes a listing page.
    ///
    /// # Arguments
    ///
    /// * `request` - A request built by one of the `create_request_for_*` methods
    /// * `root_key` - Member wrapping the listing (`"albums"` for new releases),
    ///   or `None` when the body is the listing itself. A missing member
    ///   decodes as an empty page.
    ///
    /// # Example
    ///
    /// ```
    /// let request = client.create_request_for_new_releases(0, Some(20))?;
    /// let page: Page<Resource<SimplifiedAlbum>> =
    ///     client.fetch_page(request, Some("albums")).await?;
    /// if let Some(offset) = page.next_offset() {
    ///     println!("next page starts at {}", offset);
    /// }
    /// ```
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
        root_key: Option<&str>,
    ) -> Result<Page<Resource<T>>> {
        decode::page_from_value(self.perform(request).await?, root_key)
    }

    /// Performs `request` and decodes a bare array, usually found under
    /// `root_key` as in `{"tracks": [...]}`. Null entries become empty
    /// partials so positions line up with the requested ids.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
        root_key: Option<&str>,
    ) -> Result<Vec<Resource<T>>> {
        decode::list_from_value(self.perform(request).await?, root_key)
    }

    /// Strict decoding into `T`, for responses with no partial form such as
    /// playlist snapshots or `contains` flags.
    pub async fn fetch_value<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        decode::value_as(self.perform(request).await?)
    }

    /// Follows a page's `next` link. `root_key` names the member holding the
    /// listing, as for the request that produced `page`.
    pub async fn next_page<U, T: DeserializeOwned>(
        &self,
        page: &Page<U>,
        root_key: Option<&str>,
    ) -> Result<Option<Page<Resource<T>>>> {
        self.follow_link(page.next.as_deref(), root_key).await
    }

    pub async fn previous_page<U, T: DeserializeOwned>(
        &self,
        page: &Page<U>,
        root_key: Option<&str>,
    ) -> Result<Option<Page<Resource<T>>>> {
        self.follow_link(page.previous.as_deref(), root_key).await
    }

    async fn follow_link<T: DeserializeOwned>(
        &self,
        link: Option<&str>,
        root_key: Option<&str>,
    ) -> Result<Option<Page<Resource<T>>>> {
        let Some(link) = link else {
            return Ok(None);
        };
        let url = Url::parse(link)
            .map_err(|e| Error::decoding(format!("invalid page link '{}': {}", link, e)))?;
        let request = RequestDescriptor::create_request_for_url(url, &self.token)?;
        self.fetch_page(request, root_key).await.map(Some)
    }

    /// Adds the configured market to a value mapping unless the caller
    /// already set one.
    pub(crate) fn with_market_value(&self, mut values: Map<String, Value>) -> Value {
        if let Some(market) = &self.market {
            let slot = values.entry("market").or_insert(Value::Null);
            if slot.is_null() {
                *slot = Value::String(market.clone());
            }
        }
        Value::Object(values)
    }
}

/// Percent-encodes one path segment, such as an id supplied by a caller.
pub(crate) fn segment(s: &str) -> String {
    crate::encode::url_encode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SpotifyClient {
        SpotifyClient::with_executor(Executor::http(), "https://api.example.com/v1/", "t").unwrap()
    }

    #[test]
    fn endpoints_resolve_against_the_base_url() {
        let c = client();
        assert_eq!(
            c.endpoint("/albums/1").unwrap().as_str(),
            "https://api.example.com/v1/albums/1"
        );
        assert_eq!(
            c.endpoint("me").unwrap().as_str(),
            "https://api.example.com/v1/me"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = SpotifyClient::with_executor(Executor::http(), "not a url", "t").err().unwrap();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument);
    }

    #[test]
    fn market_is_added_once() {
        let c = client().with_market("SE");
        let mut values = Map::new();
        values.insert("limit".into(), Value::from(10));
        let v = c.with_market_value(values);
        assert_eq!(v["market"], "SE");

        let mut values = Map::new();
        values.insert("market".into(), Value::from("DE"));
        assert_eq!(c.with_market_value(values)["market"], "DE");
    }

    #[test]
    fn segments_are_escaped() {
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
