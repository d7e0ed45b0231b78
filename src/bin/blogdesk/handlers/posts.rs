#![deny(clippy::all, clippy::pedantic)]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use blogdesk::application::detail::PostDetailController;
use blogdesk::application::editor::{EditorController, PublishForm};
use blogdesk::application::listing::PostListController;
use blogdesk::application::manage::ManageController;
use blogdesk::infra::clipboard::SystemClipboard;
use blogdesk::presentation::routes::DetailQuery;
use blogdesk::presentation::views::{PostDetailTemplate, PostGridTemplate};

use crate::args::PostsCmd;
use crate::context::{CliError, Ctx, check_notice, success_text};
use crate::io::{confirm, read_opt_value};
use crate::print::{print_html, print_json, print_line};

pub async fn handle(ctx: &Ctx, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List {
            search,
            tag,
            page,
            html,
        } => list(ctx, search.as_deref(), tag.as_deref(), page, html).await,
        PostsCmd::Tags => tags(ctx).await,
        PostsCmd::Show {
            id,
            from_edit,
            html,
            copy_link,
        } => show(ctx, id, from_edit, html, copy_link).await,
        PostsCmd::Create {
            title,
            body,
            body_file,
            image_url,
            tags,
        } => {
            let form = PublishForm {
                title,
                body: read_opt_value(body, body_file)?.unwrap_or_default(),
                image_url: image_url.unwrap_or_default(),
                tags: tags.unwrap_or_default(),
            };
            create(ctx, &form).await
        }
        PostsCmd::Edit {
            id,
            title,
            body,
            body_file,
            image_url,
            tags,
        } => {
            let input = EditInput {
                title,
                body,
                body_file,
                image_url,
                tags,
            };
            edit(ctx, &id, input).await
        }
        PostsCmd::Delete { id, yes } => delete(ctx, &id, yes).await,
    }
}

struct EditInput {
    title: Option<String>,
    body: Option<String>,
    body_file: Option<PathBuf>,
    image_url: Option<String>,
    tags: Option<String>,
}

async fn list(
    ctx: &Ctx,
    search: Option<&str>,
    tag: Option<&str>,
    page: usize,
    html: bool,
) -> Result<(), CliError> {
    let mut list = PostListController::new(
        Arc::clone(&ctx.api),
        ctx.session.clone(),
        ctx.settings.listing.page_size,
    );
    list.load().await;
    check_notice(list.ui())?;

    if tag.is_some() {
        list.select_tag(tag).await;
        check_notice(list.ui())?;
    }
    if let Some(search) = search {
        list.set_search(search);
    }
    list.set_page(page);

    if html {
        print_html(&PostGridTemplate { view: list.grid() })
    } else {
        print_json(list.grid())
    }
}

async fn tags(ctx: &Ctx) -> Result<(), CliError> {
    let mut list = PostListController::new(
        Arc::clone(&ctx.api),
        ctx.session.clone(),
        ctx.settings.listing.page_size,
    );
    list.load().await;
    check_notice(list.ui())?;
    print_json(&list.tags())
}

async fn show(
    ctx: &Ctx,
    id: String,
    from_edit: bool,
    html: bool,
    copy_link: bool,
) -> Result<(), CliError> {
    let mut detail = PostDetailController::new(
        Arc::clone(&ctx.api),
        ctx.session.clone(),
        Arc::new(SystemClipboard),
        ctx.settings.site.base_url.clone(),
    );
    let opened = detail.open(DetailQuery::new(id, from_edit)).await;
    check_notice(detail.ui())?;
    if opened.is_none() {
        return Err(CliError::Failed("Failed to load the blog post.".into()));
    }
    if copy_link && !detail.copy_link() {
        return Err(CliError::Failed("Failed to copy the link.".into()));
    }

    let view = detail
        .view()
        .ok_or_else(|| CliError::Failed("Failed to load the blog post.".into()))?;
    if html {
        print_html(&PostDetailTemplate { view: &view })
    } else {
        print_json(&view)
    }
}

async fn create(ctx: &Ctx, form: &PublishForm) -> Result<(), CliError> {
    let mut editor = EditorController::new(Arc::clone(&ctx.api), ctx.session.clone());
    let published = editor.publish(form).await;
    check_notice(editor.ui())?;
    match published {
        Some(post) => print_json(&post),
        None => Err(CliError::Failed("Failed to publish post.".into())),
    }
}

async fn edit(ctx: &Ctx, id: &str, input: EditInput) -> Result<(), CliError> {
    let mut manage = ManageController::new(Arc::clone(&ctx.api), ctx.session.clone());
    let current = manage.open_editor(id).await.cloned();
    check_notice(manage.ui())?;
    let Some(mut form) = current else {
        return Err(CliError::Failed("Failed to load the post for editing.".into()));
    };

    if let Some(title) = input.title {
        form.title = title;
    }
    if let Some(body) = read_opt_value(input.body, input.body_file)? {
        form.body = body;
    }
    if let Some(image_url) = input.image_url {
        form.image_url = image_url;
    }
    if let Some(tags) = input.tags {
        form.tags = tags;
    }

    manage.save_changes(form).await;
    check_notice(manage.ui())?;
    if let Some(text) = success_text(manage.ui()) {
        print_line(text);
    }
    Ok(())
}

async fn delete(ctx: &Ctx, id: &str, yes: bool) -> Result<(), CliError> {
    let mut manage = ManageController::new(Arc::clone(&ctx.api), ctx.session.clone());
    manage.request_delete(id);

    let confirmed = yes
        || confirm(
            "Are you sure you want to delete this post?",
            &mut io::stdin().lock(),
        )?;
    if !confirmed {
        manage.cancel_delete();
        print_line("Deletion cancelled.");
        return Ok(());
    }

    manage.confirm_delete().await;
    check_notice(manage.ui())?;
    if let Some(text) = success_text(manage.ui()) {
        print_line(text);
    }
    Ok(())
}
