use anyhow::{Context, Result};
use bbs_client::{Credentials, PostRequest, UpstreamClient, UpstreamError, UpstreamResponse};
use clap::{Parser, Subcommand};
use colored::Colorize;

const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the BBS server
    #[arg(short, long, env = "BBS_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all posts, newest first
    Posts,

    /// Create a post
    Post {
        #[arg(short, long, default_value = "")]
        username: String,

        #[arg(short, long, default_value = "")]
        password: String,

        #[arg(short, long)]
        body: String,

        /// Address sent as X-Original-Client-IP
        #[arg(long, default_value = "unknown")]
        client_ip: String,

        /// Poster id, for servers backed directly by the store
        #[arg(long)]
        user_id: Option<i64>,
    },

    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    eprintln!("🔌 Connecting to: {}", cli.server);

    let client = UpstreamClient::new(cli.server.clone()).context("Failed to create BBS client")?;

    let result = match &cli.command {
        Commands::Posts => client.list_posts().await,

        Commands::Post {
            username,
            password,
            body,
            client_ip,
            user_id,
        } => {
            let req = PostRequest {
                username: username.clone(),
                password: password.clone(),
                body: body.clone(),
            };
            client.create_post_as(&req, client_ip, *user_id).await
        }

        Commands::Login { username, password } => {
            client
                .login(&Credentials {
                    username: username.clone(),
                    password: password.clone(),
                })
                .await
        }

        Commands::Register { username, password } => {
            client
                .register(&Credentials {
                    username: username.clone(),
                    password: password.clone(),
                })
                .await
        }
    };

    match result {
        Ok(response) => print_success(&response),
        Err(UpstreamError::Http { status, body, .. }) => {
            eprintln!("{} HTTP {}", "❌".red(), status.to_string().red().bold());
            eprintln!("{}", String::from_utf8_lossy(&body));
            std::process::exit(1);
        }
        Err(e) if e.is_unreachable() => {
            Err(e).with_context(|| format!("Server {} is unreachable", cli.server))
        }
        Err(e) => Err(e.into()),
    }
}

fn print_success(response: &UpstreamResponse) -> Result<()> {
    eprintln!("{} HTTP {}", "✅".green(), response.status.to_string().green().bold());

    let value = response.json()?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
