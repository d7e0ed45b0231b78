//! Single post page: fetch by id, render with fallbacks, copy the page link.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::application::repos::BlogApi;
use crate::application::session::Session;
use crate::domain::posts::Post;
use crate::presentation::routes::{DetailQuery, absolute_href, post_detail_href};
use crate::presentation::views::{BannerView, PostDetailView, build_tag_badges};
use crate::presentation::widgets::{DEFAULT_LOADER, PageUi};

pub const COPY_LABEL: &str = "Copy Link";
pub const COPIED_LABEL: &str = "Copied!";
pub const COPIED_LABEL_TTL: Duration = Duration::from_secs(2);

const UNTITLED: &str = "Untitled";
const BANNER_ALT: &str = "Post banner image";
const NO_CONTENT: &str = "No content available";
const UNKNOWN_AUTHOR: &str = "Unknown author";

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

pub struct PostDetailController {
    api: Arc<dyn BlogApi>,
    session: Session,
    clipboard: Arc<dyn Clipboard>,
    site: Url,
    query: DetailQuery,
    post: Option<Post>,
    copied_at: Option<Instant>,
    ui: PageUi,
}

impl PostDetailController {
    /// `site` is the public address the copied link points at.
    pub fn new(
        api: Arc<dyn BlogApi>,
        session: Session,
        clipboard: Arc<dyn Clipboard>,
        site: Url,
    ) -> Self {
        Self {
            api,
            session,
            clipboard,
            site,
            query: DetailQuery::default(),
            post: None,
            copied_at: None,
            ui: PageUi::default(),
        }
    }

    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    pub fn ui(&self) -> &PageUi {
        &self.ui
    }

    /// Load the post named by `query`. Without a post id nothing is fetched.
    pub async fn open(&mut self, query: DetailQuery) -> Option<PostDetailView> {
        self.query = query;
        self.post = None;
        self.copied_at = None;

        let Some(post_id) = self.query.post_id.clone() else {
            self.ui
                .fail_message("application::detail::open", "No post ID found in the URL.");
            return None;
        };

        let identity = self.session.identity();
        self.ui.loaders.show(DEFAULT_LOADER);
        let result = self
            .api
            .get_post(&identity.username, &post_id, identity.bearer())
            .await;
        self.ui.loaders.hide(DEFAULT_LOADER);

        match result {
            Ok(post) => {
                info!(post_id = %post.id, "post loaded");
                self.post = Some(post);
                self.view()
            }
            Err(err) => {
                self.ui.fail(
                    "application::detail::open",
                    &err,
                    "Failed to load the blog post.",
                );
                None
            }
        }
    }

    pub fn view(&self) -> Option<PostDetailView> {
        self.view_at(Instant::now())
    }

    pub fn view_at(&self, now: Instant) -> Option<PostDetailView> {
        let post = self.post.as_ref()?;
        let title = non_blank(&post.title).unwrap_or(UNTITLED).to_string();
        let banner = post.image_url().map(|src| BannerView {
            src: src.to_string(),
            alt: post
                .media
                .as_ref()
                .and_then(|media| media.alt.as_deref())
                .and_then(non_blank)
                .unwrap_or(BANNER_ALT)
                .to_string(),
        });
        let author = post
            .author
            .as_ref()
            .and_then(|author| non_blank(&author.name))
            .unwrap_or(UNKNOWN_AUTHOR)
            .to_string();

        Some(PostDetailView {
            post_id: post.id.clone(),
            title,
            banner,
            body_html: post
                .body
                .as_deref()
                .and_then(non_blank)
                .unwrap_or(NO_CONTENT)
                .to_string(),
            author,
            published: post.published_label(),
            iso_date: post.created.date().to_string(),
            badges: build_tag_badges(&post.tags),
            page_url: self.page_url(),
            copy_label: self.copy_label_at(now),
            back_href: self.query.back_href(),
        })
    }

    /// Absolute address of this page under the site base.
    pub fn page_url(&self) -> String {
        let post_id = self.query.post_id.as_deref().unwrap_or_default();
        absolute_href(&self.site, &post_detail_href(post_id, self.query.from_edit))
    }

    /// Copy the page link. The tooltip reads "Copied!" until `COPIED_LABEL_TTL` passes.
    pub fn copy_link(&mut self) -> bool {
        let url = self.page_url();
        match self.clipboard.copy(&url) {
            Ok(()) => {
                self.copied_at = Some(Instant::now());
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to copy link");
                false
            }
        }
    }

    pub fn copy_label_at(&self, now: Instant) -> &'static str {
        match self.copied_at {
            Some(at) if now.saturating_duration_since(at) < COPIED_LABEL_TTL => COPIED_LABEL,
            _ => COPY_LABEL,
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}
