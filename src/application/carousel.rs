//! Latest-posts carousel: a fixed strip of groups with previous/next buttons and dots.

use std::sync::Arc;

use tracing::info;

use crate::application::repos::BlogApi;
use crate::application::session::Session;
use crate::domain::posts::{Post, latest};
use crate::presentation::routes::{PLACEHOLDER_IMAGE, post_detail_href};
use crate::presentation::views::{
    CarouselDotView, CarouselGroupView, CarouselSlideView, CarouselView,
};
use crate::presentation::widgets::{DEFAULT_LOADER, PageUi};

pub const DEFAULT_CAROUSEL_SIZE: usize = 6;
pub const SLIDES_PER_GROUP: usize = 2;
pub const GROUP_COUNT: usize = 3;

pub struct CarouselController {
    api: Arc<dyn BlogApi>,
    session: Session,
    limit: usize,
    posts: Vec<Post>,
    index: usize,
    ui: PageUi,
}

impl CarouselController {
    pub fn new(api: Arc<dyn BlogApi>, session: Session, limit: usize) -> Self {
        Self {
            api,
            session,
            limit,
            posts: Vec::new(),
            index: 0,
            ui: PageUi::default(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn ui(&self) -> &PageUi {
        &self.ui
    }

    pub async fn load(&mut self) -> CarouselView {
        let identity = self.session.identity();
        self.ui.loaders.show(DEFAULT_LOADER);
        let result = self
            .api
            .list_posts(&identity.username, None, identity.bearer())
            .await;
        self.ui.loaders.hide(DEFAULT_LOADER);

        match result {
            Ok(posts) => {
                self.posts = latest(posts, self.limit);
                info!(count = self.posts.len(), "carousel posts loaded");
            }
            Err(err) => {
                self.ui.fail(
                    "application::carousel::load",
                    &err,
                    "Failed to load latest posts.",
                );
                self.posts.clear();
            }
        }
        self.index = 0;
        self.view()
    }

    pub fn next(&mut self) -> CarouselView {
        self.index = (self.index + 1) % GROUP_COUNT;
        self.view()
    }

    pub fn previous(&mut self) -> CarouselView {
        self.index = (self.index + GROUP_COUNT - 1) % GROUP_COUNT;
        self.view()
    }

    pub fn go_to(&mut self, index: usize) -> CarouselView {
        self.index = index % GROUP_COUNT;
        self.view()
    }

    /// The strip always has `GROUP_COUNT` groups; groups past the fetched posts stay empty.
    pub fn view(&self) -> CarouselView {
        let groups = (0..GROUP_COUNT)
            .map(|group| CarouselGroupView {
                slides: self
                    .posts
                    .iter()
                    .skip(group * SLIDES_PER_GROUP)
                    .take(SLIDES_PER_GROUP)
                    .map(slide)
                    .collect(),
            })
            .collect();
        let dots = (0..GROUP_COUNT)
            .map(|index| CarouselDotView {
                index,
                active: index == self.index,
            })
            .collect();
        CarouselView {
            groups,
            dots,
            offset_percent: offset_percent(self.index),
        }
    }
}

pub fn offset_percent(index: usize) -> i64 {
    i64::try_from(index % GROUP_COUNT).map_or(0, |index| -index * 100)
}

fn slide(post: &Post) -> CarouselSlideView {
    CarouselSlideView {
        post_id: post.id.clone(),
        title: post.title.clone(),
        image_url: post.image_url().unwrap_or(PLACEHOLDER_IMAGE).to_string(),
        href: post_detail_href(&post.id, false),
    }
}
