//! The profile endpoint and its record.

use std::sync::Arc;

use component_framework::fetch::{fetch_json, null_as_default, JsonSource};
use component_framework::FetchError;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Public profile of a user, as returned by the profile endpoint.
///
/// Missing fields and JSON `null` decode to the default value, so a sparse
/// profile still renders.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar_url: String,
}

/// Client for the profile endpoint.
#[derive(Clone)]
pub struct ProfileApi {
    source: Arc<dyn JsonSource>,
    url: String,
}

impl ProfileApi {
    pub fn new(source: Arc<dyn JsonSource>, url: impl Into<String>) -> Self {
        Self {
            source,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<UserInfo, FetchError> {
        debug!("Sending request");
        fetch_json(self.source.as_ref(), &self.url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use component_framework::mock::MockJsonSource;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_decodes_profile() {
        let mock = MockJsonSource::new();
        mock.expect_get("https://api.example/users/anakin").return_ok(json!({
            "login": "anakin",
            "name": "Anakin",
            "age": 41,
            "location": "Tatooine",
            "avatar_url": "x.png"
        }));
        let api = ProfileApi::new(Arc::new(mock.clone()), "https://api.example/users/anakin");

        let info = api.fetch().await.unwrap();
        assert_eq!(
            info,
            UserInfo {
                name: "Anakin".into(),
                age: 41,
                location: "Tatooine".into(),
                avatar_url: "x.png".into(),
            }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_fetch_tolerates_null_fields() {
        let mock = MockJsonSource::new();
        mock.expect_get("u").return_ok(json!({ "name": null, "location": null }));
        let api = ProfileApi::new(Arc::new(mock), "u");

        assert_eq!(api.fetch().await.unwrap(), UserInfo::default());
    }
}
