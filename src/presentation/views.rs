use askama::{Error as AskamaError, Template};
use serde::Serialize;
use thiserror::Error;

use crate::domain::posts::Post;
use crate::presentation::routes::{PLACEHOLDER_IMAGE, post_detail_href};
use crate::presentation::widgets::Notice;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }

    pub fn origin(&self) -> &'static str {
        self.source
    }
}

pub fn render_template<T: Template>(template: &T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagBadge {
    pub value: String,
    pub label: String,
}

pub fn build_tag_badges<'a, T>(tags: T) -> Vec<TagBadge>
where
    T: IntoIterator<Item = &'a String>,
{
    tags.into_iter()
        .map(|tag| TagBadge {
            value: tag.clone(),
            label: format!("#{tag}"),
        })
        .collect()
}

/// Grid card; the whole card links to the post-detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCardView {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub published: String,
    pub iso_date: String,
    pub href: String,
    pub badges: Vec<TagBadge>,
}

impl PostCardView {
    pub fn from_post(post: &Post, from_edit: bool) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            image_url: post.image_url().unwrap_or(PLACEHOLDER_IMAGE).to_string(),
            published: post.published_label(),
            iso_date: post.created.date().to_string(),
            href: post_detail_href(&post.id, from_edit),
            badges: build_tag_badges(&post.tags),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagOptionView {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageButtonView {
    pub number: usize,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostGridView {
    pub cards: Vec<PostCardView>,
    pub search_term: String,
    pub tag_options: Vec<TagOptionView>,
    pub all_tags_selected: bool,
    pub pages: Vec<PageButtonView>,
    pub matched: usize,
    pub empty_message: Option<&'static str>,
}

impl PostGridView {
    pub fn card_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.id.as_str()).collect()
    }
}

#[derive(Template)]
#[template(path = "post_grid.html")]
pub struct PostGridTemplate<'a> {
    pub view: &'a PostGridView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManageCardView {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub published: String,
    pub view_href: String,
}

impl ManageCardView {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            image_url: post.image_url().unwrap_or(PLACEHOLDER_IMAGE).to_string(),
            published: post.published_label(),
            view_href: post_detail_href(&post.id, true),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditFormView {
    pub post_id: String,
    pub title: String,
    pub image_url: String,
    pub tags: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteConfirmView {
    pub post_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManageView {
    pub username: Option<String>,
    pub cards: Vec<ManageCardView>,
    pub editor: Option<EditFormView>,
    pub confirm: Option<DeleteConfirmView>,
    pub empty_message: Option<&'static str>,
}

impl ManageView {
    pub fn card_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.id.as_str()).collect()
    }
}

#[derive(Template)]
#[template(path = "manage.html")]
pub struct ManageTemplate<'a> {
    pub view: &'a ManageView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSlideView {
    pub post_id: String,
    pub title: String,
    pub image_url: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CarouselGroupView {
    pub slides: Vec<CarouselSlideView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselDotView {
    pub index: usize,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CarouselView {
    pub groups: Vec<CarouselGroupView>,
    pub dots: Vec<CarouselDotView>,
    pub offset_percent: i64,
}

impl CarouselView {
    pub fn transform(&self) -> String {
        format!("translateX({}%)", self.offset_percent)
    }
}

#[derive(Template)]
#[template(path = "carousel.html")]
pub struct CarouselTemplate<'a> {
    pub view: &'a CarouselView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerView {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetailView {
    pub post_id: String,
    pub title: String,
    pub banner: Option<BannerView>,
    /// Trusted editor HTML; rendered unescaped.
    pub body_html: String,
    pub author: String,
    pub published: String,
    pub iso_date: String,
    pub badges: Vec<TagBadge>,
    pub page_url: String,
    pub copy_label: &'static str,
    pub back_href: &'static str,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailTemplate<'a> {
    pub view: &'a PostDetailView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeView {
    pub kind: &'static str,
    pub text: String,
}

impl NoticeView {
    pub fn from_notice(notice: &Notice) -> Self {
        Self {
            kind: notice.kind.as_str(),
            text: notice.text.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "notification.html")]
pub struct NotificationTemplate<'a> {
    pub notice: &'a NoticeView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTone {
    Success,
    Error,
}

impl FeedbackTone {
    pub fn color(self) -> &'static str {
        match self {
            FeedbackTone::Success => "green",
            FeedbackTone::Error => "red",
        }
    }
}

/// Inline text under the login and register forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormFeedbackView {
    pub tone: FeedbackTone,
    pub text: String,
}

impl FormFeedbackView {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: FeedbackTone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: FeedbackTone::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.tone == FeedbackTone::Error
    }
}

#[derive(Template)]
#[template(path = "form_feedback.html")]
pub struct FormFeedbackTemplate<'a> {
    pub feedback: &'a FormFeedbackView,
}
