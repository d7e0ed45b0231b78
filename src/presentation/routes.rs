//! Client-side page routes and the query string consumed by the post-detail page.

use url::{ParseError, Url, form_urlencoded};

pub const HOME_PAGE: &str = "/index.html";
pub const MANAGE_PAGE: &str = "/post/edit.html";
pub const DETAIL_PAGE: &str = "/post/index.html";
pub const PLACEHOLDER_IMAGE: &str = "/assets/placeholder.jpg";
pub const DEFAULT_SITE_BASE: &str = "http://localhost:8080/";

const POST_ID_PARAM: &str = "postId";
const FROM_EDIT_PARAM: &str = "fromEdit";

pub fn post_detail_href(post_id: &str, from_edit: bool) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair(POST_ID_PARAM, post_id);
    if from_edit {
        query.append_pair(FROM_EDIT_PARAM, "true");
    }
    format!("{DETAIL_PAGE}?{}", query.finish())
}

/// Parse the public site address. The path always ends in `/` so routes resolve below it.
pub fn site_base(raw: &str) -> Result<Url, ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(ParseError::RelativeUrlWithCannotBeABaseBase);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolve a site route (`/post/index.html?..`) against the site base, keeping any base path.
pub fn absolute_href(site: &Url, href: &str) -> String {
    site.join(href.trim_start_matches('/'))
        .map_or_else(|_| href.to_string(), String::from)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailQuery {
    pub post_id: Option<String>,
    pub from_edit: bool,
}

impl DetailQuery {
    pub fn new(post_id: impl Into<String>, from_edit: bool) -> Self {
        Self {
            post_id: Some(post_id.into()),
            from_edit,
        }
    }

    /// Parse `?postId=..&fromEdit=true`; a leading `?` is optional.
    pub fn parse(query: &str) -> Self {
        let raw = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match &*key {
                POST_ID_PARAM if !value.is_empty() => parsed.post_id = Some(value.into_owned()),
                FROM_EDIT_PARAM => parsed.from_edit = value == "true",
                _ => {}
            }
        }
        parsed
    }

    pub fn back_href(&self) -> &'static str {
        if self.from_edit { MANAGE_PAGE } else { HOME_PAGE }
    }
}
