//! Percent-encoding and value serialization for request parameters.
//!
//! Request values are carried as a JSON object (`serde_json::Value`) so that a
//! single mapping can be rendered either as a query string or as a JSON body.
//! Query strings only accept scalar values and arrays of scalars; arrays are
//! joined with commas, matching the Web API's `ids=a,b,c` convention.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Percent-encodes a string, leaving RFC 3986 unreserved characters untouched.
pub fn url_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Converts any serializable value into the value mapping used by the builder.
pub fn to_values<T: Serialize + ?Sized>(values: &T) -> Result<Value> {
    serde_json::to_value(values).map_err(|e| Error::encoding(e.to_string()))
}

/// Renders a value mapping as `key=value` pairs joined by `&`.
///
/// `null` entries are skipped so optional parameters can be passed through
/// without special casing.
pub fn encode_query(values: &Value) -> Result<String> {
    let map = as_object(values)?;
    let mut pairs = Vec::with_capacity(map.len());

    for (key, value) in map {
        let Some(rendered) = render_query_value(key, value)? else {
            continue;
        };
        pairs.push(format!("{}={}", url_encode(key), url_encode(&rendered)));
    }

    Ok(pairs.join("&"))
}

/// Splits a query string back into decoded key/value pairs.
pub fn decode_query(query: &str) -> Result<Vec<(String, String)>> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((url_decode(key)?, url_decode(value)?))
        })
        .collect()
}

/// Serializes a value mapping as a JSON document.
pub fn encode_json(values: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(values).map_err(|e| Error::encoding(e.to_string()))
}

fn url_decode(s: &str) -> Result<String> {
    let s = s.replace('+', " ");
    urlencoding::decode(&s)
        .map(|d| d.into_owned())
        .map_err(|e| Error::encoding(format!("invalid percent-encoding: {}", e)))
}

fn as_object(values: &Value) -> Result<&Map<String, Value>> {
    values
        .as_object()
        .ok_or_else(|| Error::encoding("request values must be a key/value mapping"))
}

fn render_query_value(key: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => {
            let rendered = items
                .iter()
                .map(|item| {
                    render_scalar(item).ok_or_else(|| {
                        Error::encoding(format!("array value for '{}' is not a scalar", key))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(rendered.join(",")))
        }
        other => render_scalar(other)
            .map(Some)
            .ok_or_else(|| Error::encoding(format!("value for '{}' cannot be sent as a query parameter", key))),
    }
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(url_encode("abc-._~123"), "abc-._~123");
        assert_eq!(url_encode("a b/c&d"), "a%20b%2Fc%26d");
    }

    #[test]
    fn query_skips_nulls_and_joins_arrays() {
        let values = json!({
            "ids": ["a", "b", "c"],
            "market": null,
            "limit": 20,
            "public": false,
        });
        let query = encode_query(&values).unwrap();
        let mut pairs = decode_query(&query).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("ids".to_string(), "a,b,c".to_string()),
                ("limit".to_string(), "20".to_string()),
                ("public".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn query_round_trips_reserved_characters() {
        let values = json!({ "q": "artist:Tove Lo & friends", "type": "track,album" });
        let query = encode_query(&values).unwrap();
        assert!(!query.contains(' '));
        let pairs = decode_query(&query).unwrap();
        assert!(pairs.contains(&("q".to_string(), "artist:Tove Lo & friends".to_string())));
        assert!(pairs.contains(&("type".to_string(), "track,album".to_string())));
    }

    #[test]
    fn nested_objects_are_rejected_from_query() {
        let err = encode_query(&json!({ "filter": { "a": 1 } })).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Encoding);

        let err = encode_query(&json!({ "ids": [["a"]] })).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Encoding);
    }

    #[test]
    fn non_object_values_are_rejected() {
        assert!(encode_query(&json!(["a", "b"])).is_err());
        assert!(encode_query(&json!("a")).is_err());
    }

    #[test]
    fn plus_decodes_as_space() {
        let pairs = decode_query("q=a+b").unwrap();
        assert_eq!(pairs, vec![("q".to_string(), "a b".to_string())]);
    }
}
