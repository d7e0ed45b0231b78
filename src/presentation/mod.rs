//! Presentation layer: view models, askama templates and page chrome.

pub mod routes;
pub mod views;
pub mod widgets;
