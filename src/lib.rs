//! blogdesk: a headless client for the Noroff blog API.
//!
//! Controllers in [`application`] own the page state for each screen (listing, carousel,
//! post detail, manage, editor, auth). They talk to the remote API through the
//! [`application::repos::BlogApi`] seam and hand view models to the askama templates in
//! [`presentation`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
