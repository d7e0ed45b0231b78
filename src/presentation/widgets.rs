//! Page chrome shared by every screen: spinners addressed by element id, the transient
//! notification box, and pending navigation.

use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::time::{Duration, Instant};

use crate::application::error::ErrorReport;

pub const DEFAULT_LOADER: &str = "loading";
pub const PAGE_SPINNER: &str = "page-spinner";
pub const ERROR_NOTICE_TTL: Duration = Duration::from_millis(5000);
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_millis(5000);
pub const DELETE_NOTICE_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Default, Clone)]
pub struct Loaders {
    visible: BTreeSet<String>,
}

impl Loaders {
    pub fn show(&mut self, id: &str) {
        self.visible.insert(id.to_string());
    }

    pub fn hide(&mut self, id: &str) {
        self.visible.remove(id);
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    pub fn any_visible(&self) -> bool {
        !self.visible.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub ttl: Duration,
    shown_at: Instant,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }
}

/// Holds at most one notice; showing a new one replaces the old.
#[derive(Debug, Default, Clone)]
pub struct NotificationBox {
    current: Option<Notice>,
}

impl NotificationBox {
    pub fn show(&mut self, kind: NoticeKind, text: impl Into<String>, ttl: Duration) {
        self.current = Some(Notice {
            kind,
            text: text.into(),
            ttl,
            shown_at: Instant::now(),
        });
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Error, text, ERROR_NOTICE_TTL);
    }

    pub fn show_success(&mut self, text: impl Into<String>, ttl: Duration) {
        self.show(NoticeKind::Success, text, ttl);
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Visible notice at `now`; an expired notice is cleared.
    pub fn current_at(&mut self, now: Instant) -> Option<&Notice> {
        if self
            .current
            .as_ref()
            .is_some_and(|notice| notice.is_expired_at(now))
        {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct PageUi {
    pub loaders: Loaders,
    pub notice: NotificationBox,
    location: Option<String>,
    reload: bool,
}

impl PageUi {
    /// Log `error` with its source chain and show `message` to the user.
    pub fn fail(&mut self, source: &'static str, error: &dyn StdError, message: impl Into<String>) {
        ErrorReport::from_error(source, error).log();
        self.notice.show_error(message);
    }

    /// Log and show a failure that has no underlying error value.
    pub fn fail_message(&mut self, source: &'static str, message: impl Into<String>) {
        let message = message.into();
        ErrorReport::from_message(source, message.clone()).log();
        self.notice.show_error(message);
    }

    pub fn navigate(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn request_reload(&mut self) {
        self.reload = true;
    }

    pub fn reload_requested(&self) -> bool {
        self.reload
    }
}
