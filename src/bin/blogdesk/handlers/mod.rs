#![deny(clippy::all, clippy::pedantic)]

pub mod auth;
pub mod carousel;
pub mod posts;
