//! HTTP adapter for the blog API.

mod client;

pub use client::HttpBlogApi;
