//! Login and register forms. Outcomes are reported as inline form feedback, not notices.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::error::ApiError;
use crate::application::repos::{BlogApi, LoginRequest, RegisterRequest};
use crate::application::session::Session;
use crate::presentation::routes::MANAGE_PAGE;
use crate::presentation::views::FormFeedbackView;
use crate::presentation::widgets::PageUi;

pub const LOGIN_SPINNER: &str = "button-spinner";
pub const REGISTER_SPINNER: &str = "register-button-spinner";

const LOGIN_FAILED: &str = "Login failed. Please check your email and password.";
const CONNECTION_FAILED: &str =
    "An error occurred while connecting to the server. Please try again later.";
const REGISTERED: &str = "You have successfully registered!";
const PROFILE_EXISTS_API: &str = "Profile already exists";
const PROFILE_EXISTS: &str = "This user already exists.";
const REGISTER_FAILED: &str = "An unknown error occurred during registration.";

pub struct AuthController {
    api: Arc<dyn BlogApi>,
    session: Session,
    submitting: bool,
    feedback: Option<FormFeedbackView>,
    ui: PageUi,
}

impl AuthController {
    pub fn new(api: Arc<dyn BlogApi>, session: Session) -> Self {
        Self {
            api,
            session,
            submitting: false,
            feedback: None,
            ui: PageUi::default(),
        }
    }

    /// True while a submit is pending; the submit button is disabled meanwhile.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn feedback(&self) -> Option<&FormFeedbackView> {
        self.feedback.as_ref()
    }

    pub fn ui(&self) -> &PageUi {
        &self.ui
    }

    /// On success the token and name are stored and the page moves to the manage view.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.begin(LOGIN_SPINNER);
        let result = self.api.login(&request).await;
        self.finish(LOGIN_SPINNER);

        let profile = match result {
            Ok(profile) => profile,
            Err(err) => {
                let message = if err.is_network() {
                    CONNECTION_FAILED
                } else {
                    err.api_message().unwrap_or(LOGIN_FAILED)
                };
                return self.reject("application::auth::login", &err, message);
            }
        };
        let Some(token) = profile.access_token.as_deref().filter(|t| !t.is_empty()) else {
            warn!(name = %profile.name, "login response carried no access token");
            self.feedback = Some(FormFeedbackView::error(LOGIN_FAILED));
            return false;
        };

        if let Err(err) = self.session.sign_in(token, &profile.name) {
            error!(error = %err, "failed to persist session");
            self.feedback = Some(FormFeedbackView::error(err.to_string()));
            return false;
        }
        info!(name = %profile.name, "signed in");
        self.feedback = None;
        self.ui.navigate(MANAGE_PAGE);
        true
    }

    /// On success only the username is remembered; the user still has to log in.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> bool {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.begin(REGISTER_SPINNER);
        let result = self.api.register(&request).await;
        self.finish(REGISTER_SPINNER);

        match result {
            Ok(_) => {
                if let Err(err) = self.session.remember_username(name) {
                    warn!(error = %err, "failed to remember username");
                }
                info!(name, "registered");
                self.feedback = Some(FormFeedbackView::success(REGISTERED));
                true
            }
            Err(err) => {
                let message = register_failure(&err);
                self.reject("application::auth::register", &err, message)
            }
        }
    }

    fn begin(&mut self, spinner: &str) {
        self.submitting = true;
        self.feedback = None;
        self.ui.loaders.show(spinner);
    }

    fn finish(&mut self, spinner: &str) {
        self.submitting = false;
        self.ui.loaders.hide(spinner);
    }

    fn reject(&mut self, source: &'static str, err: &ApiError, message: &str) -> bool {
        error!(source, error = %err, "form submission failed");
        self.feedback = Some(FormFeedbackView::error(message));
        false
    }
}

fn register_failure(err: &ApiError) -> &str {
    if err.is_network() {
        return CONNECTION_FAILED;
    }
    match err.first_error_message() {
        Some(PROFILE_EXISTS_API) if err.status() == Some(400) => PROFILE_EXISTS,
        Some(message) => message,
        None => REGISTER_FAILED,
    }
}
