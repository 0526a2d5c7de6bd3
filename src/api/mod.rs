// Data service for the post views: one shared HTTP client and a generic JSON GET.
// Public API:
//   - ApiService::get_data::<T>(url) -> Result<T, ApiError>
//   - ApiService::fetch_posts(url) -> Result<Vec<Post>, ApiError>
//
// Example:
// let posts = ApiService::new().fetch_posts(POSTS_URL).await?;

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::Post;

mod error;
pub use error::ApiError;

/// Endpoint the post list reads from unless settings override it.
pub const POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default();
}

/// Handle passed into views that need remote data.
#[derive(Clone)]
pub struct ApiService {
    client: reqwest::Client,
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiService {
    pub fn new() -> Self {
        Self {
            client: CLIENT.clone(),
        }
    }

    /// GET `url` and decode the body as JSON into `T`.
    /// No retries; any failure is returned to the caller as is.
    pub async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let parsed = Url::parse(url).map_err(|source| ApiError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        log::debug!("get_data: GET {}", parsed);

        let resp = self
            .client
            .get(parsed)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            log::warn!("get_data: http status {} for {}", status.as_u16(), url);
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        log::trace!("get_data: {} bytes from {}", bytes.len(), url);
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    pub async fn fetch_posts(&self, url: &str) -> Result<Vec<Post>, ApiError> {
        let posts: Vec<Post> = self.get_data(url).await?;
        log::info!("Fetched {} posts from {}", posts.len(), url);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{ApiError, ApiService};

    #[tokio::test]
    async fn fetch_posts_decodes_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"userId": 1, "id": 1, "title": "first", "body": "one"},
                {"userId": 1, "id": 2, "title": "second", "body": "two"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let posts = ApiService::new()
            .fetch_posts(&format!("{}/posts", server.uri()))
            .await
            .unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].title, "second");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = ApiService::new()
            .fetch_posts(&format!("{}/posts", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
            .mount(&server)
            .await;

        let err = ApiService::new()
            .fetch_posts(&format!("{}/posts", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn invalid_url_fails_before_sending() {
        let err = ApiService::new().fetch_posts("not a url").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }
}
