use anyhow::Context;
use archive_cli::accounts::{create_admin, issue_token};
use archive_cli::{open_database, run_server, Config};
use archive_security::{TokenService, UserCreateInput, UserStorage};
use clap::{Parser, Subcommand};
use colored::*;
use inquire::{Password, PasswordDisplayMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "thesis-archive")]
#[command(about = "Thesis archive server and operator tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Override the PORT environment variable
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create an administrator account
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Print a bearer token for an existing account
    IssueToken {
        #[arg(long)]
        username: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    handle_command(cli.command).await
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Invalid configuration")?;

    match command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            println!("{}", "Starting thesis archive server...".green().bold());
            println!("{} http://{}", "Listening on".cyan(), config.socket_addr());
            println!("{} {}", "CORS origin:".cyan(), config.cors_origin);
            run_server(config).await
        }
        Commands::CreateAdmin {
            username,
            first_name,
            last_name,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => Password::new("Password:")
                    .with_display_mode(PasswordDisplayMode::Hidden)
                    .prompt()?,
            };

            let users = UserStorage::new(open_database(&config).await?);
            let input = UserCreateInput {
                username: Some(username),
                first_name: Some(first_name),
                last_name: Some(last_name),
                password: Some(password),
            };
            let admin = create_admin(&users, input).await?;

            println!(
                "{} Created administrator {} ({})",
                "✓".green().bold(),
                admin.username.bold(),
                admin.id
            );
            Ok(())
        }
        Commands::IssueToken { username, password } => {
            let password = match password {
                Some(password) => password,
                None => Password::new("Password:")
                    .with_display_mode(PasswordDisplayMode::Hidden)
                    .without_confirmation()
                    .prompt()?,
            };

            let users = UserStorage::new(open_database(&config).await?);
            let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_hours);
            let (user, token) = issue_token(&users, &tokens, &username, &password).await?;

            eprintln!(
                "{} Token for {} ({}), valid for {}h",
                "✓".green().bold(),
                user.username.bold(),
                user.role,
                config.token_ttl_hours
            );
            println!("{}", token);
            Ok(())
        }
    }
}
