#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use blogdesk::application::auth::AuthController;
use serde::Serialize;
use tracing::warn;

use crate::args::{LoginArgs, RegisterArgs};
use crate::context::{CliError, Ctx};
use crate::io::read_password;
use crate::print::{print_json, print_line};

#[derive(Debug, Serialize)]
struct WhoAmI<'a> {
    authenticated: bool,
    username: Option<String>,
    identity: String,
    session_file: &'a str,
}

pub async fn login(ctx: &Ctx, args: LoginArgs) -> Result<(), CliError> {
    let password = read_password(args.password)?;
    let mut auth = AuthController::new(Arc::clone(&ctx.api), ctx.session.clone());
    if auth.login(&args.email, &password).await {
        let name = ctx.session.username().unwrap_or_default();
        print_line(&format!("Signed in as {name}."));
        Ok(())
    } else {
        Err(feedback_error(&auth))
    }
}

pub async fn register(ctx: &Ctx, args: RegisterArgs) -> Result<(), CliError> {
    let password = read_password(args.password)?;
    let mut auth = AuthController::new(Arc::clone(&ctx.api), ctx.session.clone());
    if auth.register(&args.name, &args.email, &password).await {
        if let Some(feedback) = auth.feedback() {
            print_line(&feedback.text);
        }
        Ok(())
    } else {
        Err(feedback_error(&auth))
    }
}

pub fn logout(ctx: &Ctx) -> Result<(), CliError> {
    if let Err(err) = ctx.session.sign_out() {
        warn!(error = %err, "failed to clear session");
        return Err(CliError::Failed(err.to_string()));
    }
    print_line("Signed out.");
    Ok(())
}

pub fn whoami(ctx: &Ctx) -> Result<(), CliError> {
    let session_file = ctx.settings.session.path.to_string_lossy();
    print_json(&WhoAmI {
        authenticated: ctx.session.is_authenticated(),
        username: ctx.session.username(),
        identity: ctx.session.identity().username,
        session_file: &session_file,
    })
}

fn feedback_error(auth: &AuthController) -> CliError {
    let text = auth
        .feedback()
        .map_or_else(|| "request failed".to_string(), |feedback| feedback.text.clone());
    CliError::Failed(text)
}
