//! Post editor page: validate the form and publish a new post.

use std::sync::Arc;

use tracing::info;

use crate::application::error::ApiError;
use crate::application::manage::failure_detail;
use crate::application::repos::BlogApi;
use crate::application::session::Session;
use crate::domain::posts::{Post, PostDraft};
use crate::presentation::routes::MANAGE_PAGE;
use crate::presentation::widgets::{DEFAULT_LOADER, PageUi, SUCCESS_NOTICE_TTL};

const NOT_AUTHORIZED: &str = "You are not authorized. Please log in.";
const NETWORK_FAILURE: &str = "An error occurred while publishing the post.";

/// Raw editor form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishForm {
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub tags: String,
}

pub struct EditorController {
    api: Arc<dyn BlogApi>,
    session: Session,
    ui: PageUi,
}

impl EditorController {
    pub fn new(api: Arc<dyn BlogApi>, session: Session) -> Self {
        Self {
            api,
            session,
            ui: PageUi::default(),
        }
    }

    pub fn ui(&self) -> &PageUi {
        &self.ui
    }

    pub async fn publish(&mut self, form: &PublishForm) -> Option<Post> {
        let draft = PostDraft::from_form(&form.title, &form.body, &form.image_url, &form.tags);
        if let Err(err) = draft.ensure_publishable() {
            let message = err.message().to_string();
            self.ui
                .fail("application::editor::publish", &ApiError::from(err), message);
            return None;
        }
        let Some(credentials) = self.session.credentials() else {
            self.ui.fail(
                "application::editor::publish",
                &ApiError::MissingSession(NOT_AUTHORIZED),
                NOT_AUTHORIZED,
            );
            return None;
        };

        self.ui.loaders.show(DEFAULT_LOADER);
        let result = self
            .api
            .create_post(&credentials.username, &draft, &credentials.token)
            .await;
        self.ui.loaders.hide(DEFAULT_LOADER);

        match result {
            Ok(post) => {
                info!(post_id = %post.id, "post published");
                self.ui
                    .notice
                    .show_success("Post published successfully!", SUCCESS_NOTICE_TTL);
                self.ui.navigate(MANAGE_PAGE);
                Some(post)
            }
            Err(err) if err.is_network() => {
                self.ui
                    .fail("application::editor::publish", &err, NETWORK_FAILURE);
                None
            }
            Err(err) => {
                let message = format!("Failed to publish post: {}", failure_detail(&err));
                self.ui.fail("application::editor::publish", &err, message);
                None
            }
        }
    }
}
