mod render;

use crate::render::{Output, TerminalNotifier};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use common_lib::domain::common::UpdateProfile;
use common_lib::validation::RegisterForm;
use common_lib::{Attachment, Gender};
use social_net_rust_client::common::load_attachment;
use social_net_rust_client::session::FileSessionStore;
use social_net_rust_client::{
    AuthApi, ClientConfig, ClientError, CommentApi, NewPost, PostApi, ProfileApi, SocialClient,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "social-net")]
#[command(about = "Command line client for the linked-posts social network")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Overrides SOCIAL_NET_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Overrides SOCIAL_NET_SESSION_FILE.
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SOCIAL_NET_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        re_password: String,
        #[arg(long)]
        gender: String,
        /// yyyy-mm-dd
        #[arg(long)]
        date_of_birth: NaiveDate,
    },
    Logout,
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    Posts {
        #[command(subcommand)]
        command: PostsCommand,
    },
    Comments {
        #[command(subcommand)]
        command: CommentsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,
        #[arg(long)]
        gender: Option<Gender>,
    },
    UploadPhoto {
        path: PathBuf,
    },
    DeletePhoto,
}

#[derive(Subcommand, Debug)]
enum PostsCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    Latest {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Post with its comments.
    Show {
        post_id: String,
    },
    Create {
        body: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Edit {
        post_id: String,
        body: String,
    },
    Delete {
        post_id: String,
    },
    User {
        user_id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    Mine {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum CommentsCommand {
    List { post_id: String },
    Add { post_id: String, content: String },
    Edit { comment_id: String, content: String },
    Delete { comment_id: String },
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// `-v` only applies when `RUST_LOG` is unset.
fn verbosity_override(rust_log: Option<&str>, verbose: u8) -> Option<log::LevelFilter> {
    match rust_log {
        Some(filter) if !filter.trim().is_empty() => None,
        _ => Some(log_level(verbose)),
    }
}

fn config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(api_url) = &cli.api_url {
        config = config.with_base_url(api_url);
    }
    if let Some(session_file) = &cli.session_file {
        config = config.with_session_file(session_file);
    }
    config
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let rust_log = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = verbosity_override(rust_log.as_deref(), cli.verbose) {
        logger.filter_level(level);
    }
    logger.init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // client errors were already shown by the notifier
            if error.downcast_ref::<ClientError>().is_none() {
                eprintln!("error: {error:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config(&cli);
    log::debug!(
        "config - api url: {}, session file: {}",
        config.base_url,
        config.session_file.display()
    );
    let session = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let client = SocialClient::with_parts(config, session, Arc::new(TerminalNotifier))
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let output = Output {
        json: cli.json,
        client: &client,
    };

    match cli.command {
        Commands::Login { email, password } => {
            if let Some(user) = client.login(&email, &password).await? {
                output.user(&user)?;
            }
        }
        Commands::Register {
            name,
            email,
            password,
            re_password,
            gender,
            date_of_birth,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                re_password,
                gender,
                date_of_birth: Some(date_of_birth),
            };
            client.register(&form).await?;
        }
        Commands::Logout => client
            .logout()
            .map_err(|e| anyhow::anyhow!("logout failed: {e}"))?,
        Commands::ChangePassword { current, new } => {
            client.change_password(&current, &new).await?;
        }
        Commands::Profile { command } => profile(&client, &output, command).await?,
        Commands::Posts { command } => {
            posts(&client, &output, command, client.config().page_size).await?
        }
        Commands::Comments { command } => comments(&client, &output, command).await?,
    }
    Ok(())
}

async fn read_attachment(path: &Path) -> anyhow::Result<Attachment> {
    load_attachment(path)
        .await
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))
}

async fn profile(
    client: &SocialClient,
    output: &Output<'_>,
    command: ProfileCommand,
) -> anyhow::Result<()> {
    match command {
        ProfileCommand::Show => output.user(&client.get_profile().await?)?,
        ProfileCommand::Update {
            name,
            date_of_birth,
            gender,
        } => {
            let update = UpdateProfile {
                name,
                date_of_birth,
                gender,
            };
            output.user(&client.update_profile(&update).await?)?;
        }
        ProfileCommand::UploadPhoto { path } => {
            let photo = read_attachment(&path).await?;
            let url = client.upload_photo(photo).await?;
            output.photo(url.as_deref())?;
        }
        ProfileCommand::DeletePhoto => client.delete_photo().await?,
    }
    Ok(())
}

async fn posts(
    client: &SocialClient,
    output: &Output<'_>,
    command: PostsCommand,
    page_size: u32,
) -> anyhow::Result<()> {
    match command {
        PostsCommand::List { page, limit } => {
            output.page(&client.list_posts(page, limit.unwrap_or(page_size)).await?)?
        }
        PostsCommand::Latest { limit } => {
            output.posts(&client.latest_posts(limit.unwrap_or(page_size)).await?)?
        }
        PostsCommand::Show { post_id } => {
            let (post, _) = client.open_post(&post_id).await?;
            output.post(&post)?;
        }
        PostsCommand::Create { body, image } => {
            let mut post = NewPost::text(body);
            if let Some(path) = image {
                let image = read_attachment(&path).await?;
                post = post.with_image(image);
            }
            if let Some(created) = client.create_post(post).await? {
                output.post(&created)?;
            }
        }
        PostsCommand::Edit { post_id, body } => {
            if let Some(updated) = client.update_post(&post_id, &body).await? {
                output.post(&updated)?;
            }
        }
        PostsCommand::Delete { post_id } => client.delete_post(&post_id).await?,
        PostsCommand::User {
            user_id,
            page,
            limit,
        } => output.page(
            &client
                .user_posts(&user_id, page, limit.unwrap_or(page_size))
                .await?,
        )?,
        PostsCommand::Mine { page, limit } => {
            output.page(&client.my_posts(page, limit.unwrap_or(page_size)).await?)?
        }
    }
    Ok(())
}

async fn comments(
    client: &SocialClient,
    output: &Output<'_>,
    command: CommentsCommand,
) -> anyhow::Result<()> {
    match command {
        CommentsCommand::List { post_id } => {
            output.comments(&client.list_comments(&post_id).await?)?
        }
        CommentsCommand::Add { post_id, content } => {
            output.comments(&client.create_comment(&post_id, &content).await?)?
        }
        CommentsCommand::Edit {
            comment_id,
            content,
        } => {
            if let Some(comment) = client.update_comment(&comment_id, &content).await? {
                output.comment(&comment)?;
            }
        }
        CommentsCommand::Delete { comment_id } => client.delete_comment(&comment_id).await?,
    }
    Ok(())
}
