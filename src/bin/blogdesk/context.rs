#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use blogdesk::application::repos::BlogApi;
use blogdesk::application::session::Session;
use blogdesk::config::{LoadError, Settings};
use blogdesk::infra::error::InfraError;
use blogdesk::infra::http::HttpBlogApi;
use blogdesk::infra::storage::FileSessionStore;
use blogdesk::presentation::views::TemplateRenderError;
use blogdesk::presentation::widgets::PageUi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Render(#[from] TemplateRenderError),
    #[error("failed to write output: {0}")]
    Output(String),
    #[error("{0}")]
    Failed(String),
}

pub struct Ctx {
    pub settings: Settings,
    pub api: Arc<dyn BlogApi>,
    pub session: Session,
}

impl Ctx {
    pub fn new(settings: Settings) -> Result<Self, CliError> {
        let api = HttpBlogApi::new(settings.api.endpoints.clone())?;
        let store = FileSessionStore::new(settings.session.path.clone());
        let session = Session::new(Arc::new(store), settings.api.public_username.clone());
        Ok(Self {
            settings,
            api: Arc::new(api),
            session,
        })
    }
}

/// Turn an error notice left on the page into a failed command.
pub fn check_notice(ui: &PageUi) -> Result<(), CliError> {
    match ui.notice.current() {
        Some(notice) if notice.is_error() => Err(CliError::Failed(notice.text.clone())),
        _ => Ok(()),
    }
}

/// Success notice text, if the page left one.
pub fn success_text(ui: &PageUi) -> Option<&str> {
    ui.notice
        .current()
        .filter(|notice| !notice.is_error())
        .map(|notice| notice.text.as_str())
}
