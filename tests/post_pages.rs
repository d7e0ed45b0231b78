mod support;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use blogdesk::application::detail::{
    COPIED_LABEL, COPY_LABEL, Clipboard, ClipboardError, PostDetailController,
};
use blogdesk::application::editor::{EditorController, PublishForm};
use blogdesk::domain::posts::{Author, Media};
use blogdesk::presentation::routes::{DetailQuery, MANAGE_PAGE, site_base};
use blogdesk::presentation::views::{PostDetailTemplate, render_template};
use support::{
    Call, FakeBlogApi, Failure, anonymous_session, api, post, signed_in_session, with_media,
};

#[derive(Default)]
struct RecordingClipboard {
    copied: Mutex<Vec<String>>,
    broken: bool,
}

impl Clipboard for RecordingClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError("no clipboard".into()));
        }
        self.copied.lock().expect("clipboard").push(text.to_string());
        Ok(())
    }
}

fn detail(fake: &Arc<FakeBlogApi>, clipboard: Arc<RecordingClipboard>) -> PostDetailController {
    let site = site_base("https://blog.example/journal").expect("site base");
    PostDetailController::new(api(fake), anonymous_session(), clipboard, site)
}

#[tokio::test]
async fn detail_renders_post_fields() {
    let mut full = with_media(post("abc", "Hello", &["rust"]), "https://img.example/a.jpg");
    if let Some(media) = full.media.as_mut() {
        media.alt = Some("A harbour".into());
    }
    let fake = FakeBlogApi::with_posts(vec![full]);
    let mut page = detail(&fake, Arc::default());

    let view = page
        .open(DetailQuery::new("abc", false))
        .await
        .expect("detail view");

    assert_eq!(view.title, "Hello");
    let banner = view.banner.expect("banner");
    assert_eq!(banner.src, "https://img.example/a.jpg");
    assert_eq!(banner.alt, "A harbour");
    assert_eq!(view.body_html, "<p>Hello</p>");
    assert_eq!(view.author, "rikkejuliane");
    assert_eq!(view.published, "September 1, 2024");
    assert_eq!(view.back_href, "/index.html");
    assert_eq!(view.copy_label, COPY_LABEL);
}

#[tokio::test]
async fn detail_falls_back_for_missing_fields() {
    let mut bare = post("bare", "  ", &[]);
    bare.body = None;
    bare.author = Some(Author {
        name: String::new(),
        email: None,
    });
    bare.media = Some(Media {
        url: "https://img.example/b.jpg".into(),
        alt: None,
    });
    let fake = FakeBlogApi::with_posts(vec![bare]);
    let mut page = detail(&fake, Arc::default());

    let view = page
        .open(DetailQuery::new("bare", true))
        .await
        .expect("detail view");

    assert_eq!(view.title, "Untitled");
    assert_eq!(view.body_html, "No content available");
    assert_eq!(view.author, "Unknown author");
    assert_eq!(view.banner.map(|b| b.alt).as_deref(), Some("Post banner image"));
    assert_eq!(view.back_href, MANAGE_PAGE);
}

#[tokio::test]
async fn banner_is_hidden_without_media() {
    let fake = FakeBlogApi::with_posts(vec![post("plain", "Plain", &[])]);
    let mut page = detail(&fake, Arc::default());
    let view = page
        .open(DetailQuery::parse("?postId=plain"))
        .await
        .expect("detail view");

    assert!(view.banner.is_none());
    let html = render_template(&PostDetailTemplate { view: &view }).expect("render");
    assert!(!html.contains("post-banner"));
}

#[tokio::test]
async fn missing_post_id_fetches_nothing() {
    let fake = FakeBlogApi::with_posts(vec![post("abc", "Hello", &[])]);
    let mut page = detail(&fake, Arc::default());

    assert!(page.open(DetailQuery::parse("")).await.is_none());
    assert!(fake.calls().is_empty());
    assert!(page.ui().notice.current().is_some_and(|n| n.is_error()));
}

#[tokio::test]
async fn fetch_failure_surfaces_a_notice() {
    let fake = FakeBlogApi::with_posts(vec![post("abc", "Hello", &[])]);
    fake.fail_get(Failure::Network);
    let mut page = detail(&fake, Arc::default());

    assert!(page.open(DetailQuery::new("abc", false)).await.is_none());
    assert_eq!(
        page.ui().notice.current().map(|n| n.text.as_str()),
        Some("Failed to load the blog post.")
    );
}

#[tokio::test]
async fn copy_link_switches_tooltip_for_two_seconds() {
    let fake = FakeBlogApi::with_posts(vec![post("abc", "Hello", &[])]);
    let clipboard = Arc::new(RecordingClipboard::default());
    let mut page = detail(&fake, Arc::clone(&clipboard));
    page.open(DetailQuery::new("abc", false)).await;

    assert!(page.copy_link());
    let now = Instant::now();
    assert_eq!(page.copy_label_at(now), COPIED_LABEL);
    assert_eq!(
        page.view_at(now).map(|view| view.copy_label),
        Some(COPIED_LABEL)
    );
    assert_eq!(page.copy_label_at(now + Duration::from_secs(2)), COPY_LABEL);
    assert_eq!(
        clipboard.copied.lock().expect("clipboard").as_slice(),
        ["https://blog.example/journal/post/index.html?postId=abc"]
    );
}

#[tokio::test]
async fn copied_link_keeps_the_manage_origin() {
    let fake = FakeBlogApi::with_posts(vec![post("abc", "Hello", &[])]);
    let clipboard = Arc::new(RecordingClipboard::default());
    let mut page = detail(&fake, Arc::clone(&clipboard));
    let view = page
        .open(DetailQuery::new("abc", true))
        .await
        .expect("detail view");

    assert!(page.copy_link());
    let expected = "https://blog.example/journal/post/index.html?postId=abc&fromEdit=true";
    assert_eq!(view.page_url, expected);
    assert_eq!(
        clipboard.copied.lock().expect("clipboard").as_slice(),
        [expected]
    );
}

#[tokio::test]
async fn failed_copy_keeps_the_default_tooltip() {
    let fake = FakeBlogApi::with_posts(vec![post("abc", "Hello", &[])]);
    let clipboard = Arc::new(RecordingClipboard {
        broken: true,
        ..RecordingClipboard::default()
    });
    let mut page = detail(&fake, clipboard);
    page.open(DetailQuery::new("abc", false)).await;

    assert!(!page.copy_link());
    assert_eq!(page.copy_label_at(Instant::now()), COPY_LABEL);
}

fn form(title: &str, body: &str) -> PublishForm {
    PublishForm {
        title: title.into(),
        body: body.into(),
        image_url: "  ".into(),
        tags: "rust, , web".into(),
    }
}

#[tokio::test]
async fn publish_requires_title_and_body() {
    let fake = FakeBlogApi::with_posts(Vec::new());
    let mut editor = EditorController::new(api(&fake), signed_in_session());

    assert!(editor.publish(&form("Title", "")).await.is_none());
    assert_eq!(
        editor.ui().notice.current().map(|n| n.text.as_str()),
        Some("Title and body are required.")
    );
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn publish_without_token_is_refused() {
    let fake = FakeBlogApi::with_posts(Vec::new());
    let mut editor = EditorController::new(api(&fake), anonymous_session());

    assert!(editor.publish(&form("Title", "<p>x</p>")).await.is_none());
    assert_eq!(
        editor.ui().notice.current().map(|n| n.text.as_str()),
        Some("You are not authorized. Please log in.")
    );
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn publish_sends_draft_and_moves_to_manage_page() {
    let fake = FakeBlogApi::with_posts(Vec::new());
    let mut editor = EditorController::new(api(&fake), signed_in_session());

    let created = editor
        .publish(&form("Title", "<p>x</p>"))
        .await
        .expect("published");
    assert_eq!(created.tags, vec!["rust", "web"]);
    assert!(created.media.is_none());
    assert_eq!(editor.ui().location(), Some(MANAGE_PAGE));
    assert!(matches!(
        fake.calls().as_slice(),
        [Call::Create { username, token, .. }] if username == "rikke" && token == "token-123"
    ));
}

#[tokio::test]
async fn publish_failures_are_reported() {
    let fake = FakeBlogApi::with_posts(Vec::new());
    fake.fail_writes(Failure::Status(400, Some("Body is too long")));
    let mut editor = EditorController::new(api(&fake), signed_in_session());

    assert!(editor.publish(&form("Title", "<p>x</p>")).await.is_none());
    assert_eq!(
        editor.ui().notice.current().map(|n| n.text.as_str()),
        Some("Failed to publish post: Body is too long")
    );

    fake.fail_writes(Failure::Network);
    assert!(editor.publish(&form("Title", "<p>x</p>")).await.is_none());
    assert_eq!(
        editor.ui().notice.current().map(|n| n.text.as_str()),
        Some("An error occurred while publishing the post.")
    );
    assert_eq!(editor.ui().location(), None);
}
