#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use blogdesk::application::error::ApiError;
use blogdesk::application::repos::{AuthProfile, BlogApi, LoginRequest, RegisterRequest};
use blogdesk::application::session::Session;
use blogdesk::domain::posts::{Author, Media, Post, PostDraft};
use blogdesk::infra::storage::MemorySessionStore;
use time::{Duration, macros::datetime};

pub const PUBLIC_USER: &str = "rikkejuliane";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login {
        email: String,
    },
    Register {
        name: String,
    },
    List {
        username: String,
        tag: Option<String>,
        token: Option<String>,
    },
    Get {
        username: String,
        id: String,
        token: Option<String>,
    },
    Create {
        username: String,
        draft: PostDraft,
        token: String,
    },
    Update {
        username: String,
        id: String,
        draft: PostDraft,
        token: String,
    },
    Delete {
        username: String,
        id: String,
        token: String,
    },
}

/// Failure a fake endpoint answers with.
#[derive(Debug, Clone)]
pub enum Failure {
    /// Status with an optional top-level `message`.
    Status(u16, Option<&'static str>),
    /// Status whose body only carries `errors[0].message`.
    Errors(u16, &'static str),
    Network,
}

impl Failure {
    fn to_error(&self) -> ApiError {
        match self {
            Failure::Status(status, message) => ApiError::Status {
                status: *status,
                message: message.map(str::to_string),
                first_error: None,
            },
            Failure::Errors(status, message) => ApiError::Status {
                status: *status,
                message: None,
                first_error: Some((*message).to_string()),
            },
            Failure::Network => ApiError::network("connection refused"),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    posts: Vec<Post>,
    calls: Vec<Call>,
    list_failure: Option<Failure>,
    get_failure: Option<Failure>,
    write_failure: Option<Failure>,
    delete_failure: Option<Failure>,
    auth_failure: Option<Failure>,
    login_token: Option<String>,
}

/// In-memory `BlogApi` that records every call. Tag queries are answered by exact tag match.
#[derive(Debug, Default)]
pub struct FakeBlogApi {
    state: Mutex<State>,
}

impl FakeBlogApi {
    pub fn with_posts(posts: Vec<Post>) -> Arc<Self> {
        let api = Self::default();
        api.state().posts = posts;
        api.state().login_token = Some("token-123".into());
        Arc::new(api)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake api state")
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn fail_list(&self, failure: Failure) {
        self.state().list_failure = Some(failure);
    }

    pub fn fail_get(&self, failure: Failure) {
        self.state().get_failure = Some(failure);
    }

    pub fn fail_writes(&self, failure: Failure) {
        self.state().write_failure = Some(failure);
    }

    pub fn fail_delete(&self, failure: Failure) {
        self.state().delete_failure = Some(failure);
    }

    pub fn fail_auth(&self, failure: Failure) {
        self.state().auth_failure = Some(failure);
    }

    pub fn omit_login_token(&self) {
        self.state().login_token = None;
    }

    fn record(&self, call: Call) {
        self.state().calls.push(call);
    }
}

#[async_trait]
impl BlogApi for FakeBlogApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthProfile, ApiError> {
        self.record(Call::Login {
            email: request.email.clone(),
        });
        let state = self.state();
        if let Some(failure) = &state.auth_failure {
            return Err(failure.to_error());
        }
        Ok(AuthProfile {
            name: "rikke".into(),
            email: Some(request.email.clone()),
            access_token: state.login_token.clone(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthProfile, ApiError> {
        self.record(Call::Register {
            name: request.name.clone(),
        });
        if let Some(failure) = &self.state().auth_failure {
            return Err(failure.to_error());
        }
        Ok(AuthProfile {
            name: request.name.clone(),
            email: Some(request.email.clone()),
            access_token: None,
        })
    }

    async fn list_posts(
        &self,
        username: &str,
        tag: Option<&str>,
        token: Option<&str>,
    ) -> Result<Vec<Post>, ApiError> {
        self.record(Call::List {
            username: username.into(),
            tag: tag.map(str::to_string),
            token: token.map(str::to_string),
        });
        let state = self.state();
        if let Some(failure) = &state.list_failure {
            return Err(failure.to_error());
        }
        Ok(state
            .posts
            .iter()
            .filter(|post| tag.is_none_or(|tag| post.tags.iter().any(|t| t == tag)))
            .cloned()
            .collect())
    }

    async fn get_post(
        &self,
        username: &str,
        post_id: &str,
        token: Option<&str>,
    ) -> Result<Post, ApiError> {
        self.record(Call::Get {
            username: username.into(),
            id: post_id.into(),
            token: token.map(str::to_string),
        });
        let state = self.state();
        if let Some(failure) = &state.get_failure {
            return Err(failure.to_error());
        }
        state
            .posts
            .iter()
            .find(|post| post.id == post_id)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                message: None,
                first_error: Some("No post with such ID".into()),
            })
    }

    async fn create_post(
        &self,
        username: &str,
        draft: &PostDraft,
        token: &str,
    ) -> Result<Post, ApiError> {
        self.record(Call::Create {
            username: username.into(),
            draft: draft.clone(),
            token: token.into(),
        });
        let mut state = self.state();
        if let Some(failure) = &state.write_failure {
            return Err(failure.to_error());
        }
        let created = Post {
            id: format!("new-{}", state.posts.len() + 1),
            title: draft.title.clone(),
            body: draft.body.clone(),
            media: draft.media.clone(),
            tags: draft.tags.clone(),
            created: datetime!(2024-10-01 12:00 UTC),
            updated: None,
            author: Some(Author {
                name: username.into(),
                email: None,
            }),
        };
        state.posts.push(created.clone());
        Ok(created)
    }

    async fn update_post(
        &self,
        username: &str,
        post_id: &str,
        draft: &PostDraft,
        token: &str,
    ) -> Result<Post, ApiError> {
        self.record(Call::Update {
            username: username.into(),
            id: post_id.into(),
            draft: draft.clone(),
            token: token.into(),
        });
        let mut state = self.state();
        if let Some(failure) = &state.write_failure {
            return Err(failure.to_error());
        }
        let post = state
            .posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or(ApiError::Status {
                status: 404,
                message: None,
                first_error: None,
            })?;
        post.title = draft.title.clone();
        post.body = draft.body.clone();
        post.media = draft.media.clone();
        post.tags = draft.tags.clone();
        Ok(post.clone())
    }

    async fn delete_post(
        &self,
        username: &str,
        post_id: &str,
        token: &str,
    ) -> Result<(), ApiError> {
        self.record(Call::Delete {
            username: username.into(),
            id: post_id.into(),
            token: token.into(),
        });
        let mut state = self.state();
        if let Some(failure) = &state.delete_failure {
            return Err(failure.to_error());
        }
        state.posts.retain(|post| post.id != post_id);
        Ok(())
    }
}

pub fn post(id: &str, title: &str, tags: &[&str]) -> Post {
    Post {
        id: id.into(),
        title: title.into(),
        body: Some(format!("<p>{title}</p>")),
        media: None,
        tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
        created: datetime!(2024-09-01 09:00 UTC),
        updated: None,
        author: Some(Author {
            name: PUBLIC_USER.into(),
            email: None,
        }),
    }
}

/// `count` posts created one day apart, oldest first.
pub fn numbered_posts(count: usize) -> Vec<Post> {
    (0..count)
        .map(|index| {
            let mut post = post(&format!("p{index}"), &format!("Post {index}"), &[]);
            post.created += Duration::days(i64::try_from(index).expect("small index"));
            post
        })
        .collect()
}

pub fn with_media(mut post: Post, url: &str) -> Post {
    post.media = Some(Media::from_url(url));
    post
}

pub fn anonymous_session() -> Session {
    Session::new(Arc::new(MemorySessionStore::default()), PUBLIC_USER)
}

pub fn signed_in_session() -> Session {
    let session = anonymous_session();
    session.sign_in("token-123", "rikke").expect("sign in");
    session
}

pub fn api(fake: &Arc<FakeBlogApi>) -> Arc<dyn BlogApi> {
    Arc::clone(fake) as Arc<dyn BlogApi>
}
