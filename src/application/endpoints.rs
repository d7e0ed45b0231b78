//! URL builders for the blog API. Usernames, post ids and tags are percent-encoded as path
//! segments or query values.

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://v2.api.noroff.dev";
pub const TAG_QUERY_PARAM: &str = "_tag";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid API base URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("API base URL `{0}` cannot carry a path")]
    NotABase(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: &str) -> Result<Self, EndpointError> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(EndpointError::NotABase(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn register(&self) -> Url {
        self.path(&["auth", "register"])
    }

    pub fn login(&self) -> Url {
        self.path(&["auth", "login"])
    }

    /// List and create share one collection URL.
    pub fn posts(&self, username: &str) -> Url {
        self.path(&["blog", "posts", username])
    }

    /// Read, update and delete share one item URL.
    pub fn post(&self, username: &str, post_id: &str) -> Url {
        self.path(&["blog", "posts", username, post_id])
    }

    pub fn posts_by_tag(&self, username: &str, tag: &str) -> Url {
        let mut url = self.posts(username);
        url.query_pairs_mut().append_pair(TAG_QUERY_PARAM, tag);
        url
    }

    fn path(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
