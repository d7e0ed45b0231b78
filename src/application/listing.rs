//! Post list controller: loads every post for an identity, derives the tag vocabulary, and
//! re-renders a filtered, paginated grid on every search, tag or page change.
//!
//! Text search always runs in memory. Picking a tag re-queries the API with `_tag`; the tag
//! result becomes the base sequence and the search term is applied on top of it.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::error::ApiError;
use crate::application::repos::BlogApi;
use crate::application::sequence::{RequestSequencer, Ticket};
use crate::application::session::{Identity, Session};
use crate::domain::posts::{Post, filter_posts, page_count, paginate, unique_tags};
use crate::presentation::views::{PageButtonView, PostCardView, PostGridView, TagOptionView};
use crate::presentation::widgets::{DEFAULT_LOADER, PageUi};

pub const DEFAULT_PAGE_SIZE: usize = 12;
const NO_POSTS_MESSAGE: &str = "No blog posts available.";
const NO_MATCHES_MESSAGE: &str = "No posts match your search.";
const LOAD_FAILED_MESSAGE: &str = "Failed to load blog posts.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub selected_tag: Option<String>,
    pub current_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_tag: None,
            current_page: 1,
        }
    }
}

/// What a pending fetch is for; decides how its result is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    All,
    Tag(String),
}

/// A fetch that has been issued a ticket but not run yet. Running it does not borrow the
/// controller, so several can be in flight at once.
pub struct PendingQuery {
    ticket: Ticket,
    kind: QueryKind,
    identity: Identity,
    api: Arc<dyn BlogApi>,
}

impl PendingQuery {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub async fn run(self) -> QueryOutcome {
        let tag = match &self.kind {
            QueryKind::All => None,
            QueryKind::Tag(tag) => Some(tag.as_str()),
        };
        let result = self
            .api
            .list_posts(&self.identity.username, tag, self.identity.bearer())
            .await;
        QueryOutcome {
            ticket: self.ticket,
            kind: self.kind,
            result,
        }
    }
}

pub struct QueryOutcome {
    ticket: Ticket,
    kind: QueryKind,
    result: Result<Vec<Post>, ApiError>,
}

pub struct PostListController {
    api: Arc<dyn BlogApi>,
    session: Session,
    page_size: NonZeroUsize,
    full_loads: RequestSequencer,
    tag_queries: RequestSequencer,
    all_posts: Vec<Post>,
    base: Vec<Post>,
    filtered: Vec<Post>,
    filter: FilterState,
    grid: PostGridView,
    ui: PageUi,
}

impl PostListController {
    pub fn new(api: Arc<dyn BlogApi>, session: Session, page_size: NonZeroUsize) -> Self {
        Self {
            api,
            session,
            page_size,
            full_loads: RequestSequencer::default(),
            tag_queries: RequestSequencer::default(),
            all_posts: Vec::new(),
            base: Vec::new(),
            filtered: Vec::new(),
            filter: FilterState::default(),
            grid: PostGridView::default(),
            ui: PageUi::default(),
        }
    }

    pub fn grid(&self) -> &PostGridView {
        &self.grid
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn posts(&self) -> &[Post] {
        &self.all_posts
    }

    /// The sequence pagination currently runs over.
    pub fn active_posts(&self) -> &[Post] {
        &self.filtered
    }

    pub fn ui(&self) -> &PageUi {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut PageUi {
        &mut self.ui
    }

    pub fn tags(&self) -> Vec<String> {
        unique_tags(&self.all_posts)
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len(), self.page_size.get())
    }

    /// Fetch every post for the session identity. Failures surface a notification and
    /// yield an empty sequence.
    pub async fn load_posts(&mut self) -> Vec<Post> {
        let pending = self.begin(QueryKind::All);
        self.ui.loaders.show(DEFAULT_LOADER);
        let outcome = pending.run().await;
        self.ui.loaders.hide(DEFAULT_LOADER);
        match outcome.result {
            Ok(posts) => posts,
            Err(err) => {
                self.ui
                    .fail("application::listing::load_posts", &err, LOAD_FAILED_MESSAGE);
                Vec::new()
            }
        }
    }

    /// Fetch the full set and render it under the current filters.
    pub async fn load(&mut self) -> &PostGridView {
        let pending = self.begin(QueryKind::All);
        self.run_and_apply(pending).await;
        &self.grid
    }

    pub fn set_search(&mut self, term: &str) -> &PostGridView {
        self.filter.search_term = term.to_string();
        self.filter.current_page = 1;
        self.refilter();
        &self.grid
    }

    pub fn set_page(&mut self, page: usize) -> &PostGridView {
        self.filter.current_page = page;
        self.render();
        &self.grid
    }

    /// Select a tag (or `None` for all tags). A tag re-queries the API; clearing it restores
    /// the full in-memory set.
    pub async fn select_tag(&mut self, tag: Option<&str>) -> &PostGridView {
        let tag = tag.map(str::trim).filter(|tag| !tag.is_empty());
        self.filter.selected_tag = tag.map(str::to_string);
        self.filter.current_page = 1;
        match tag {
            Some(tag) => {
                let pending = self.begin(QueryKind::Tag(tag.to_string()));
                self.run_and_apply(pending).await;
            }
            None => {
                // Invalidate any tag query still in flight; a pending full load stays valid.
                self.tag_queries.issue();
                self.base = self.all_posts.clone();
                self.refilter();
            }
        }
        &self.grid
    }

    /// Issue a ticket for a fetch without running it. Full loads and tag queries are
    /// sequenced independently.
    pub fn begin(&mut self, kind: QueryKind) -> PendingQuery {
        let ticket = self.sequencer_for(&kind).issue();
        debug!(ticket = ticket.id(), ?kind, "post query issued");
        PendingQuery {
            ticket,
            kind,
            identity: self.session.identity(),
            api: Arc::clone(&self.api),
        }
    }

    /// Apply a finished fetch. Returns `false` when a newer fetch of the same kind has been
    /// issued since, in which case the outcome is dropped.
    ///
    /// A full load keeps the search term and, while a tag is selected, leaves the tag result
    /// as the base sequence.
    pub fn apply(&mut self, outcome: QueryOutcome) -> bool {
        if !self.sequencer_for(&outcome.kind).is_current(outcome.ticket) {
            debug!(ticket = outcome.ticket.id(), kind = ?outcome.kind, "stale post query dropped");
            return false;
        }
        let tag_selected = self.filter.selected_tag.is_some();
        match (outcome.kind, outcome.result) {
            (QueryKind::All, Ok(posts)) => {
                info!(count = posts.len(), "posts loaded");
                self.all_posts = posts;
                if !tag_selected {
                    self.base = self.all_posts.clone();
                }
            }
            (QueryKind::Tag(tag), Ok(posts)) => {
                info!(count = posts.len(), %tag, "tagged posts loaded");
                self.base = posts;
            }
            (kind, Err(err)) => {
                self.ui
                    .fail("application::listing::apply", &err, LOAD_FAILED_MESSAGE);
                if matches!(kind, QueryKind::Tag(_)) || !tag_selected {
                    self.base.clear();
                }
            }
        }
        self.refilter();
        true
    }

    async fn run_and_apply(&mut self, pending: PendingQuery) -> bool {
        self.ui.loaders.show(DEFAULT_LOADER);
        let outcome = pending.run().await;
        self.ui.loaders.hide(DEFAULT_LOADER);
        self.apply(outcome)
    }

    fn sequencer_for(&self, kind: &QueryKind) -> &RequestSequencer {
        match kind {
            QueryKind::All => &self.full_loads,
            QueryKind::Tag(_) => &self.tag_queries,
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_posts(&self.base, &self.filter.search_term);
        self.render();
    }

    /// Rebuild the grid from scratch for the current filter state.
    fn render(&mut self) {
        let page_size = self.page_size.get();
        let visible = paginate(&self.filtered, self.filter.current_page, page_size);
        let cards = visible
            .iter()
            .map(|post| PostCardView::from_post(post, false))
            .collect();

        let selected = self.filter.selected_tag.as_deref();
        let tag_options = unique_tags(&self.all_posts)
            .into_iter()
            .map(|value| TagOptionView {
                selected: selected == Some(value.as_str()),
                value,
            })
            .collect();

        let pages = (1..=page_count(self.filtered.len(), page_size))
            .map(|number| PageButtonView {
                number,
                active: number == self.filter.current_page,
            })
            .collect();

        let empty_message = if self.base.is_empty() {
            Some(NO_POSTS_MESSAGE)
        } else if self.filtered.is_empty() {
            Some(NO_MATCHES_MESSAGE)
        } else {
            None
        };

        self.grid = PostGridView {
            cards,
            search_term: self.filter.search_term.clone(),
            tag_options,
            all_tags_selected: selected.is_none(),
            pages,
            matched: self.filtered.len(),
            empty_message,
        };
    }
}
