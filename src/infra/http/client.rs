use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::endpoints::Endpoints;
use crate::application::error::ApiError;
use crate::application::repos::{AuthProfile, BlogApi, LoginRequest, RegisterRequest};
use crate::domain::posts::{Post, PostDraft};
use crate::infra::error::InfraError;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn first_error(&self) -> Option<String> {
        self.errors.first().and_then(|entry| entry.message.clone())
    }
}

#[derive(Clone, Debug)]
pub struct HttpBlogApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBlogApi {
    pub fn new(endpoints: Endpoints) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;
        Ok(Self { client, endpoints })
    }

    pub fn user_agent() -> &'static str {
        concat!("blogdesk/", env!("CARGO_PKG_VERSION"))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        debug!(%method, %url, authenticated = token.is_some(), "calling blog api");
        let mut req = self.client.request(method, url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        req.send().await.map_err(ApiError::network)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let resp = self.send(method, url, token, body).await?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(Self::status_error(status, &bytes));
        }
        let envelope: Envelope<T> = serde_json::from_slice(&bytes).map_err(ApiError::decode)?;
        Ok(envelope.data)
    }

    fn status_error(status: StatusCode, bytes: &[u8]) -> ApiError {
        let body = serde_json::from_slice::<ErrorBody>(bytes).unwrap_or_default();
        ApiError::Status {
            status: status.as_u16(),
            first_error: body.first_error(),
            message: body.message,
        }
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(ApiError::decode)
}

#[async_trait]
impl BlogApi for HttpBlogApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthProfile, ApiError> {
        let body = to_body(request)?;
        self.request(Method::POST, self.endpoints.login(), None, Some(body))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthProfile, ApiError> {
        let body = to_body(request)?;
        self.request(Method::POST, self.endpoints.register(), None, Some(body))
            .await
    }

    async fn list_posts(
        &self,
        username: &str,
        tag: Option<&str>,
        token: Option<&str>,
    ) -> Result<Vec<Post>, ApiError> {
        let url = match tag {
            Some(tag) => self.endpoints.posts_by_tag(username, tag),
            None => self.endpoints.posts(username),
        };
        self.request(Method::GET, url, token, None).await
    }

    async fn get_post(
        &self,
        username: &str,
        post_id: &str,
        token: Option<&str>,
    ) -> Result<Post, ApiError> {
        let url = self.endpoints.post(username, post_id);
        self.request(Method::GET, url, token, None).await
    }

    async fn create_post(
        &self,
        username: &str,
        draft: &PostDraft,
        token: &str,
    ) -> Result<Post, ApiError> {
        let body = to_body(draft)?;
        let url = self.endpoints.posts(username);
        self.request(Method::POST, url, Some(token), Some(body))
            .await
    }

    async fn update_post(
        &self,
        username: &str,
        post_id: &str,
        draft: &PostDraft,
        token: &str,
    ) -> Result<Post, ApiError> {
        let body = to_body(draft)?;
        let url = self.endpoints.post(username, post_id);
        self.request(Method::PUT, url, Some(token), Some(body))
            .await
    }

    async fn delete_post(
        &self,
        username: &str,
        post_id: &str,
        token: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoints.post(username, post_id);
        let resp = self.send(Method::DELETE, url, Some(token), None).await?;
        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let bytes = resp.bytes().await.map_err(ApiError::network)?;
        Err(Self::status_error(status, &bytes))
    }
}
