/**
 * Feed CLI Entry Point
 *
 * Terminal front end for the social feed. Every command goes through the
 * same auth gate as page navigation would, and the session survives between
 * invocations in the cache directory.
 */
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use socialfeed::client::{
    views, ClientError, Config, FeedApp, FeedState, FileStorage, GateDecision, ImagePayload,
    MemoryStorage, PostCard, PostDraft, SessionStorage,
};
use socialfeed::shared::feed::RegisterRequest;
use socialfeed::shared::routes;

#[derive(Debug, Parser)]
#[command(name = "feed", about = "Social feed terminal client")]
struct Opt {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and keep the session
    Login {
        username: String,
        #[arg(long, env = "FEED_PASSWORD")]
        password: String,
    },
    /// Create an account
    Register {
        username: String,
        #[arg(long, env = "FEED_PASSWORD")]
        password: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        dob: String,
    },
    Logout,
    /// Show every post, newest first
    Feed,
    /// Show a profile and its posts
    Profile {
        /// Defaults to the signed-in user
        #[arg(long)]
        user: Option<String>,
    },
    /// Publish a post
    Post {
        #[arg(default_value = "")]
        content: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete { post_id: String },
    Like { post_id: String },
    Unlike { post_id: String },
    /// Filter the feed by text or author
    Search { query: String },
}

impl Command {
    fn route(&self) -> &'static str {
        match self {
            Self::Login { .. } => routes::LOGIN,
            Self::Register { .. } => routes::REGISTER,
            Self::Logout | Self::Feed | Self::Delete { .. } | Self::Like { .. } | Self::Unlike { .. } => {
                routes::HOME
            }
            Self::Profile { .. } => "/profile",
            Self::Post { .. } => "/create",
            Self::Search { .. } => "/search",
        }
    }
}

fn setup_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn storage(config: &Config) -> Arc<dyn SessionStorage> {
    match config.session_dir() {
        Some(dir) => Arc::new(FileStorage::new(dir)),
        None => {
            tracing::warn!("no cache directory, session will not persist");
            Arc::new(MemoryStorage::new())
        }
    }
}

#[tokio::main]
async fn main() {
    setup_tracing();
    let opt = Opt::parse();

    let outcome = match Config::from_env() {
        Ok(config) => run(config, opt.command).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = outcome {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(config: Config, command: Command) -> Result<(), ClientError> {
    let mut app = FeedApp::new(config.clone(), storage(&config))?;
    app.start();

    let result = match app.navigate(command.route()).await {
        GateDecision::Render { .. } => execute(&mut app, command).await,
        GateDecision::Redirect { to, .. } if to == routes::normalize(config.login_route()) => {
            Err(ClientError::MissingSession)
        }
        GateDecision::Redirect { .. } => {
            println!("Already logged in.");
            Ok(())
        }
    };

    if let Err(e) = &result {
        app.handle_error(e);
    }
    app.shutdown().await;
    result
}

async fn execute(app: &mut FeedApp, command: Command) -> Result<(), ClientError> {
    let now = chrono::Utc::now();
    match command {
        Command::Login { username, password } => {
            let record = app.login(&username, &password).await?;
            println!("Logged in until {}", record.expiry.format("%Y-%m-%d %H:%M UTC"));
        }
        Command::Register {
            username,
            password,
            email,
            first_name,
            last_name,
            dob,
        } => {
            let request = RegisterRequest {
                username,
                password,
                email,
                first_name,
                last_name,
                dob,
            };
            app.auth().register(&request).await?;
            println!("Account created. You can log in now.");
        }
        Command::Logout => {
            app.logout().await?;
            println!("Logged out.");
        }
        Command::Feed => {
            let user_id = app.current_user_id()?;
            let mut feed = FeedState::new();
            feed.load_all(app.posts()).await?;
            feed.mount_all(app.posts(), &user_id).await;
            println!("{}\n\n{}", views::navigation(routes::HOME), views::feed(&feed, now));
        }
        Command::Profile { user } => {
            let user_id = match user {
                Some(id) => id,
                None => app.current_user_id()?,
            };
            let profile = app.users().get_profile(&user_id).await?;
            let mut feed = FeedState::new();
            feed.load_for_user(app.posts(), &user_id).await?;
            println!("{}\n\n{}", views::navigation("/profile"), views::profile(&profile, &feed, now));
        }
        Command::Post { content, image } => {
            let user_id = app.current_user_id()?;
            let mut draft = PostDraft::text(content);
            if let Some(path) = image {
                draft = draft.with_image(ImagePayload::from_path(&path)?);
            }
            let mut feed = FeedState::new();
            let card = feed.create(app.posts(), draft, &user_id).await?;
            println!("{}", views::post_card(card, now));
        }
        Command::Delete { post_id } => {
            app.posts().delete(&post_id).await?;
            println!("Deleted post {}.", post_id);
        }
        Command::Like { post_id } => set_like(app, &post_id, true).await?,
        Command::Unlike { post_id } => set_like(app, &post_id, false).await?,
        Command::Search { query } => {
            let mut feed = FeedState::new();
            feed.load_all(app.posts()).await?;
            println!(
                "{}\n\n{}",
                views::navigation("/search"),
                views::search_results(&query, &feed.search(&query), now)
            );
        }
    }
    Ok(())
}

async fn set_like(app: &FeedApp, post_id: &str, liked: bool) -> Result<(), ClientError> {
    let user_id = app.current_user_id()?;
    let mut card = PostCard::new(app.posts().get(post_id).await?);
    card.mount(app.posts(), &user_id).await?;
    if card.likes.liked() != liked {
        card.toggle_like(app.posts(), &user_id).await?;
    }
    println!("{}", views::post_card(&card, chrono::Utc::now()));
    Ok(())
}
