//! blogdesk: command-line front end for the blog client.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod context;
mod handlers;
mod io;
mod print;

use clap::Parser;

use args::{Cli, Commands};
use blogdesk::{config, infra::telemetry};
use context::{CliError, Ctx};
use handlers::{auth, carousel, posts};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = config::load(&cli.config)?;
    telemetry::init(&settings.logging)?;
    let ctx = Ctx::new(settings)?;

    match cli.command {
        Commands::Login(args) => auth::login(&ctx, args).await?,
        Commands::Register(args) => auth::register(&ctx, args).await?,
        Commands::Logout => auth::logout(&ctx)?,
        Commands::Whoami => auth::whoami(&ctx)?,
        Commands::Posts(cmd) => posts::handle(&ctx, cmd.action).await?,
        Commands::Carousel(args) => carousel::handle(&ctx, args).await?,
    }

    Ok(())
}
