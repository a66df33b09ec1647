//! Authenticated request construction.
//!
//! A [`RequestDescriptor`] is the immutable description of one HTTP exchange:
//! target URL, method, headers (always including the `Authorization` header)
//! and an optional body. Descriptors are built once and handed by value to the
//! [`Executor`](crate::executor::Executor), which consumes them.

use log::debug;
use reqwest::{
    Method,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use url::Url;

use crate::{
    encode,
    error::{Error, Result},
};

const DEFAULT_TOKEN_TYPE: &str = "Bearer";
const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An opaque access token plus the scheme it is presented with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    token_type: String,
}

impl AccessToken {
    /// A bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_type(token, DEFAULT_TOKEN_TYPE)
    }

    pub fn with_type(token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: token_type.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    fn header_value(&self) -> Result<HeaderValue> {
        if self.token.trim().is_empty() {
            return Err(Error::auth("missing access token"));
        }

        let token_type = match self.token_type.trim() {
            "" => DEFAULT_TOKEN_TYPE,
            t => t,
        };

        let mut value = HeaderValue::from_str(&format!("{} {}", token_type, self.token.trim()))
            .map_err(|_| Error::auth("access token contains characters not allowed in a header"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// How request values end up on the wire. Exactly one applies per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueEncoding {
    QueryString,
    JsonBody,
    FormBody,
}

impl ValueEncoding {
    /// Picks the encoding for a request.
    ///
    /// JSON wins when requested. Otherwise values go into the query string
    /// when explicitly asked for, or by default for read verbs; anything else
    /// is sent as a form body.
    pub fn resolve(method: &Method, encode_as_json: bool, send_as_query_string: Option<bool>) -> Self {
        if encode_as_json {
            return ValueEncoding::JsonBody;
        }

        let is_read = *method == Method::GET || *method == Method::HEAD;
        match send_as_query_string {
            Some(true) => ValueEncoding::QueryString,
            Some(false) => ValueEncoding::FormBody,
            None if is_read => ValueEncoding::QueryString,
            None => ValueEncoding::FormBody,
        }
    }
}

/// An immutable, authenticated HTTP request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    url: Url,
    method: Method,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    is_json_body: bool,
}

impl RequestDescriptor {
    /// Builds a request for `url`.
    ///
    /// `values`, when present, are encoded according to
    /// [`ValueEncoding::resolve`]. An empty token fails with an auth error
    /// and values that cannot be rendered fail with an encoding error.
    pub fn build(
        mut url: Url,
        token: &AccessToken,
        method: Method,
        values: Option<&Value>,
        encode_as_json: bool,
        send_as_query_string: Option<bool>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, token.header_value()?);
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let mut body = None;
        let mut is_json_body = false;

        if let Some(values) = values {
            match ValueEncoding::resolve(&method, encode_as_json, send_as_query_string) {
                ValueEncoding::JsonBody => {
                    body = Some(encode::encode_json(values)?);
                    is_json_body = true;
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                }
                ValueEncoding::QueryString => {
                    let query = encode::encode_query(values)?;
                    append_query(&mut url, &query);
                }
                ValueEncoding::FormBody => {
                    let form = encode::encode_query(values)?;
                    body = Some(form.into_bytes());
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
                }
            }
        }

        debug!("built request {} {}", method, url);

        Ok(Self {
            url,
            method,
            headers,
            body,
            is_json_body,
        })
    }

    /// Shorthand for an authenticated GET without values.
    pub fn create_request_for_url(url: Url, token: &AccessToken) -> Result<Self> {
        Self::build(url, token, Method::GET, None, false, None)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn is_json_body(&self) -> bool {
        self.is_json_body
    }

    pub(crate) fn into_parts(self) -> (Url, Method, HeaderMap, Option<Vec<u8>>) {
        (self.url, self.method, self.headers, self.body)
    }
}

fn append_query(url: &mut Url, query: &str) {
    if query.is_empty() {
        return;
    }

    let merged = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{}&{}", existing, query),
        _ => query.to_string(),
    };
    url.set_query(Some(&merged));
}
