//! Command-line surface for `blogdesk`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use blogdesk::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand, ValueHint};

#[derive(Parser, Debug)]
#[command(name = "blogdesk", version, about = "Noroff blog API client", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the access token
    Login(LoginArgs),
    /// Create a new account
    Register(RegisterArgs),
    /// Forget the stored access token and username
    Logout,
    /// Show the identity used for listings
    Whoami,
    /// Browse and manage posts
    Posts(PostsArgs),
    /// Show the latest-posts carousel
    Carousel(CarouselArgs),
}

/// Password input. The value is read from a file or the environment only, so it never lands
/// in shell history.
#[derive(Args, Debug, Default, Clone)]
pub struct PasswordArgs {
    /// Path to a file holding the password
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub password_file: Option<PathBuf>,

    #[arg(long = "password-env", hide = true, env = "BLOGDESK_PASSWORD")]
    pub password_env: Option<String>,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List posts with optional search, tag and page
    List {
        /// Case-insensitive match against titles and tags
        #[arg(long)]
        search: Option<String>,
        /// Ask the API for posts carrying this tag
        #[arg(long)]
        tag: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Print the rendered grid instead of JSON
        #[arg(long)]
        html: bool,
    },
    /// List every tag used by the identity's posts
    Tags,
    /// Show a single post
    Show {
        id: String,
        /// Link back to the manage page
        #[arg(long)]
        from_edit: bool,
        #[arg(long)]
        html: bool,
        /// Copy the post link to the system clipboard
        #[arg(long)]
        copy_link: bool,
    },
    /// Publish a new post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        #[arg(long, value_hint = ValueHint::FilePath)]
        body_file: Option<PathBuf>,
        #[arg(long)]
        image_url: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Edit an existing post; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        #[arg(long, value_hint = ValueHint::FilePath)]
        body_file: Option<PathBuf>,
        #[arg(long)]
        image_url: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a post after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct CarouselArgs {
    /// Zero-based slide group to show; wraps around
    #[arg(long, default_value_t = 0)]
    pub slide: usize,

    #[arg(long)]
    pub html: bool,
}
