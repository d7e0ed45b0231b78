//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroUsize, path::PathBuf, str::FromStr};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::carousel::DEFAULT_CAROUSEL_SIZE;
use crate::application::endpoints::{DEFAULT_API_BASE, Endpoints};
use crate::application::listing::DEFAULT_PAGE_SIZE;
use crate::application::session::DEFAULT_PUBLIC_USERNAME;
use crate::presentation::routes::{DEFAULT_SITE_BASE, site_base};

mod cli;

pub use cli::ConfigOverrides;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "blogdesk";
const ENV_PREFIX: &str = "BLOGDESK";
const SESSION_FILE_NAME: &str = "session.json";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub site: SiteSettings,
    pub session: SessionSettings,
    pub listing: ListingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub endpoints: Endpoints,
    pub public_username: String,
}

/// Public address of the blog pages; copied post links resolve against it.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ListingSettings {
    pub page_size: NonZeroUsize,
    pub carousel_size: NonZeroUsize,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(overrides: &ConfigOverrides) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = overrides.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    site: RawSiteSettings,
    session: RawSessionSettings,
    listing: RawListingSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = overrides.api_base_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(url) = overrides.site_url.as_ref() {
            self.site.base_url = Some(url.clone());
        }
        if let Some(name) = overrides.public_username.as_ref() {
            self.api.public_username = Some(name.clone());
        }
        if let Some(path) = overrides.session_path.as_ref() {
            self.session.path = Some(path.clone());
        }
        if let Some(size) = overrides.page_size {
            self.listing.page_size = Some(size);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            site,
            session,
            listing,
            logging,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            site: build_site_settings(site)?,
            session: build_session_settings(session)?,
            listing: build_listing_settings(listing)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let base_url = non_blank(api.base_url).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    let endpoints = Endpoints::new(&base_url)
        .map_err(|err| LoadError::invalid("api.base_url", err.to_string()))?;
    let public_username = non_blank(api.public_username)
        .unwrap_or_else(|| DEFAULT_PUBLIC_USERNAME.to_string());

    Ok(ApiSettings {
        endpoints,
        public_username,
    })
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let raw = non_blank(site.base_url).unwrap_or_else(|| DEFAULT_SITE_BASE.to_string());
    let base_url =
        site_base(&raw).map_err(|err| LoadError::invalid("site.base_url", err.to_string()))?;
    Ok(SiteSettings { base_url })
}

fn build_session_settings(session: RawSessionSettings) -> Result<SessionSettings, LoadError> {
    let path = match session.path {
        Some(path) if path.as_os_str().is_empty() => {
            return Err(LoadError::invalid("session.path", "path must not be empty"));
        }
        Some(path) => path,
        None => default_session_path().ok_or_else(|| {
            LoadError::invalid(
                "session.path",
                "could not determine a data directory; set the path explicitly",
            )
        })?,
    };
    Ok(SessionSettings { path })
}

fn build_listing_settings(listing: RawListingSettings) -> Result<ListingSettings, LoadError> {
    let page_size = non_zero_usize(
        listing.page_size.unwrap_or(DEFAULT_PAGE_SIZE as u64),
        "listing.page_size",
    )?;
    let carousel_size = non_zero_usize(
        listing
            .carousel_size
            .unwrap_or(DEFAULT_CAROUSEL_SIZE as u64),
        "listing.carousel_size",
    )?;

    Ok(ListingSettings {
        page_size,
        carousel_size,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

/// `session.json` under the platform data directory.
pub fn default_session_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "blogdesk", "blogdesk")
        .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    public_username: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSessionSettings {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawListingSettings {
    page_size: Option<u64>,
    carousel_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn non_zero_usize(value: u64, key: &'static str) -> Result<NonZeroUsize, LoadError> {
    let value: usize = value
        .try_into()
        .map_err(|_| LoadError::invalid(key, "value exceeds supported range for usize"))?;
    NonZeroUsize::new(value).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}
