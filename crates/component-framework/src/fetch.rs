//! # Outbound JSON Loads
//!
//! Components never talk to the network directly. They hold an
//! `Arc<dyn JsonSource>` and start a load with
//! [`Activation::load`](crate::host::Activation::load). Production code uses
//! [`HttpJsonSource`]; tests use [`MockJsonSource`](crate::mock::MockJsonSource).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::FetchError;

/// A source of JSON documents addressed by URL.
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// Issues a GET and returns the fully received body.
    async fn get(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}

/// Fetches `url` from `source` and decodes it as `T`.
///
/// Decoding happens only after the whole body has arrived, so callers never
/// observe a partial record.
pub async fn fetch_json<T: DeserializeOwned>(
    source: &dyn JsonSource,
    url: &str,
) -> Result<T, FetchError> {
    let body = source.get(url).await?;
    Ok(serde_json::from_value(body)?)
}

/// [`JsonSource`] backed by `reqwest`.
#[derive(Clone)]
pub struct HttpJsonSource {
    client: reqwest::Client,
}

impl HttpJsonSource {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonSource for HttpJsonSource {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        debug!(%status, "Response received");
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(resp.json::<serde_json::Value>().await?)
    }
}

/// Deserializes JSON `null` as the type's default.
///
/// Public APIs often send `null` for unset profile fields; state records want
/// plain values.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    let value = <Option<T> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockJsonSource;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Record {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        age: u32,
    }

    #[tokio::test]
    async fn test_fetch_json_decodes_nulls_and_missing_fields() {
        let mock = MockJsonSource::new();
        mock.expect_get("http://x/1")
            .return_ok(json!({ "name": null, "extra": true }));

        let record: Record = fetch_json(&mock, "http://x/1").await.unwrap();
        assert_eq!(record, Record::default());
        mock.verify();
    }

    #[tokio::test]
    async fn test_fetch_json_reports_decode_errors() {
        let mock = MockJsonSource::new();
        mock.expect_get("http://x/1").return_ok(json!({ "age": "old" }));

        let result: Result<Record, _> = fetch_json(&mock, "http://x/1").await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
