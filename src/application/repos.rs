//! The remote blog API as seen by the controllers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::error::ApiError;
use crate::domain::posts::{Post, PostDraft};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `data` payload of the auth endpoints. Register responses carry no token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthProfile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "accessToken")]
    pub access_token: Option<String>,
}

/// Every call is independent: no retries, no caching. `token` is sent as a bearer header
/// when present.
#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthProfile, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthProfile, ApiError>;

    async fn list_posts(
        &self,
        username: &str,
        tag: Option<&str>,
        token: Option<&str>,
    ) -> Result<Vec<Post>, ApiError>;

    async fn get_post(
        &self,
        username: &str,
        post_id: &str,
        token: Option<&str>,
    ) -> Result<Post, ApiError>;

    async fn create_post(
        &self,
        username: &str,
        draft: &PostDraft,
        token: &str,
    ) -> Result<Post, ApiError>;

    async fn update_post(
        &self,
        username: &str,
        post_id: &str,
        draft: &PostDraft,
        token: &str,
    ) -> Result<Post, ApiError>;

    /// Succeeds only on HTTP 204.
    async fn delete_post(&self, username: &str, post_id: &str, token: &str)
    -> Result<(), ApiError>;
}
