//! The signed-in user's manage page: own posts with edit, view and delete actions.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::error::ApiError;
use crate::application::repos::BlogApi;
use crate::application::session::{Credentials, Session};
use crate::domain::posts::{Post, PostDraft, join_tags};
use crate::presentation::routes::HOME_PAGE;
use crate::presentation::views::{DeleteConfirmView, EditFormView, ManageCardView, ManageView};
use crate::presentation::widgets::{
    DEFAULT_LOADER, DELETE_NOTICE_TTL, PAGE_SPINNER, PageUi, SUCCESS_NOTICE_TTL,
};

const MISSING_SESSION: &str = "Missing username or token";
const NO_POSTS_MESSAGE: &str = "No blog posts available.";

pub struct ManageController {
    api: Arc<dyn BlogApi>,
    session: Session,
    posts: Vec<Post>,
    editor: Option<EditFormView>,
    confirm: Option<DeleteConfirmView>,
    ui: PageUi,
}

impl ManageController {
    pub fn new(api: Arc<dyn BlogApi>, session: Session) -> Self {
        Self {
            api,
            session,
            posts: Vec::new(),
            editor: None,
            confirm: None,
            ui: PageUi::default(),
        }
    }

    pub fn ui(&self) -> &PageUi {
        &self.ui
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn editor(&self) -> Option<&EditFormView> {
        self.editor.as_ref()
    }

    pub fn view(&self) -> ManageView {
        ManageView {
            username: self.session.username(),
            cards: self.posts.iter().map(ManageCardView::from_post).collect(),
            editor: self.editor.clone(),
            confirm: self.confirm.clone(),
            empty_message: self.posts.is_empty().then_some(NO_POSTS_MESSAGE),
        }
    }

    pub async fn load(&mut self) -> ManageView {
        let Some(credentials) = self.require_credentials("application::manage::load") else {
            return self.view();
        };

        self.ui.loaders.show(PAGE_SPINNER);
        let result = self
            .api
            .list_posts(&credentials.username, None, Some(&credentials.token))
            .await;
        self.ui.loaders.hide(PAGE_SPINNER);

        match result {
            Ok(posts) => {
                info!(count = posts.len(), username = %credentials.username, "manage posts loaded");
                self.posts = posts;
            }
            Err(err) => {
                self.ui
                    .fail("application::manage::load", &err, "Failed to load blog posts.");
                self.posts.clear();
            }
        }
        self.view()
    }

    /// Fetch the post and fill the edit form with its current values.
    pub async fn open_editor(&mut self, post_id: &str) -> Option<&EditFormView> {
        let credentials = self.require_credentials("application::manage::open_editor")?;

        self.ui.loaders.show(DEFAULT_LOADER);
        let result = self
            .api
            .get_post(&credentials.username, post_id, Some(&credentials.token))
            .await;
        self.ui.loaders.hide(DEFAULT_LOADER);

        match result {
            Ok(post) => {
                self.editor = Some(EditFormView {
                    post_id: post.id.clone(),
                    title: post.title.clone(),
                    image_url: post.image_url().unwrap_or_default().to_string(),
                    tags: join_tags(&post.tags),
                    body: post.body.clone().unwrap_or_default(),
                });
                self.editor.as_ref()
            }
            Err(err) => {
                self.ui.fail(
                    "application::manage::open_editor",
                    &err,
                    "Failed to load the post for editing.",
                );
                None
            }
        }
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// PUT the edited form back under its post id. Success asks for a page reload.
    pub async fn save_changes(&mut self, form: EditFormView) -> bool {
        self.editor = Some(form.clone());
        let Some(credentials) = self.require_credentials("application::manage::save_changes")
        else {
            return false;
        };

        let draft = PostDraft::from_form(&form.title, &form.body, &form.image_url, &form.tags);
        self.ui.loaders.show(DEFAULT_LOADER);
        let result = self
            .api
            .update_post(
                &credentials.username,
                &form.post_id,
                &draft,
                &credentials.token,
            )
            .await;
        self.ui.loaders.hide(DEFAULT_LOADER);

        match result {
            Ok(post) => {
                info!(post_id = %post.id, "post updated");
                self.editor = None;
                self.ui
                    .notice
                    .show_success("Post updated successfully!", SUCCESS_NOTICE_TTL);
                self.ui.request_reload();
                true
            }
            Err(err) => {
                let message = format!("Failed to update post: {}", failure_detail(&err));
                self.ui.fail("application::manage::save_changes", &err, message);
                false
            }
        }
    }

    pub fn request_delete(&mut self, post_id: &str) -> &DeleteConfirmView {
        self.confirm.insert(DeleteConfirmView {
            post_id: post_id.to_string(),
        })
    }

    /// "No" on the confirmation box: nothing is sent and the card stays.
    pub fn cancel_delete(&mut self) {
        self.confirm = None;
    }

    /// "Yes" on the confirmation box. Only a 204 removes the card.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(confirm) = self.confirm.take() else {
            warn!("delete confirmed without a pending request");
            return false;
        };
        let Some(credentials) = self.require_credentials("application::manage::confirm_delete")
        else {
            return false;
        };

        self.ui.loaders.show(DEFAULT_LOADER);
        let result = self
            .api
            .delete_post(&credentials.username, &confirm.post_id, &credentials.token)
            .await;
        self.ui.loaders.hide(DEFAULT_LOADER);

        match result {
            Ok(()) => {
                info!(post_id = %confirm.post_id, "post deleted");
                self.posts.retain(|post| post.id != confirm.post_id);
                self.ui
                    .notice
                    .show_success("Post deleted successfully!", DELETE_NOTICE_TTL);
                true
            }
            Err(err) => {
                self.ui.fail(
                    "application::manage::confirm_delete",
                    &err,
                    "Failed to delete the post. Server error.",
                );
                false
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.session.sign_out() {
            warn!(error = %err, "failed to clear session");
        }
        self.posts.clear();
        self.ui.navigate(HOME_PAGE);
    }

    fn require_credentials(&mut self, source: &'static str) -> Option<Credentials> {
        let credentials = self.session.credentials();
        if credentials.is_none() {
            self.ui
                .fail(source, &ApiError::MissingSession(MISSING_SESSION), MISSING_SESSION);
        }
        credentials
    }
}

/// The API's own message when it sent one.
pub(crate) fn failure_detail(err: &ApiError) -> &str {
    err.api_message().unwrap_or("Unknown error")
}
