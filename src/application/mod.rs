//! Page controllers and the API seam they share.

pub mod auth;
pub mod carousel;
pub mod detail;
pub mod editor;
pub mod endpoints;
pub mod error;
pub mod listing;
pub mod manage;
pub mod repos;
pub mod sequence;
pub mod session;
