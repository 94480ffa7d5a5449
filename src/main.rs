//! Realty listing service.
//!
//! ```bash
//! # Serve the HTTP API (default)
//! realty serve
//!
//! # Create tables
//! realty init-db
//!
//! # Create a realtor and mint a token for them
//! realty create-user -n "Rita Realtor" -e rita@example.com -p 555-0100 -r realtor
//! realty issue-token --user-id 1 --ttl-hours 2
//! ```

use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use realty::config::{Config, token_ttl_hours};
use realty::db::{self, AppState, queries};
use realty::handlers;
use realty::jwt::TokenKeys;
use realty::models::{CreateUser, UserType};
use realty::policy;

#[derive(Parser)]
#[command(name = "realty")]
#[command(author, version, about = "Real-estate listing API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve,
    /// Create database tables
    InitDb,
    /// Create a user
    CreateUser {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: String,

        /// `buyer`, `realtor` or `admin`
        #[arg(short, long, default_value = "buyer")]
        role: String,
    },
    /// Print a bearer token for an existing user
    IssueToken {
        #[arg(long)]
        user_id: i64,

        /// Override TOKEN_TTL_HOURS for this token
        #[arg(long)]
        ttl_hours: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "realty=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config).await,
        Commands::InitDb => {
            let pool = db::create_pool(&config.database_path)?;
            db::init_db(&*pool.get()?)?;
            tracing::info!("Initialized database at {}", config.database_path);
            Ok(())
        }
        Commands::CreateUser {
            name,
            email,
            phone,
            role,
        } => {
            let user_type = UserType::from_str(&role)
                .map_err(|_| anyhow::anyhow!("Invalid role: {role}. Valid roles: buyer, realtor, admin"))?;
            let input = CreateUser {
                name,
                email,
                phone,
                user_type,
            };
            input.validate()?;

            let pool = db::create_pool(&config.database_path)?;
            let conn = pool.get()?;
            db::init_db(&conn)?;
            if queries::get_user_by_email(&conn, &input.email)?.is_some() {
                anyhow::bail!("A user with email {} already exists", input.email);
            }
            let user = queries::create_user(&conn, &input)?;
            tracing::info!(user_id = user.id, "Created {} {}", user.user_type.as_ref(), user.email);
            Ok(())
        }
        Commands::IssueToken { user_id, ttl_hours } => {
            let mut token_config = config.token_config()?;
            if ttl_hours.is_some() {
                token_config.ttl_hours = token_ttl_hours(ttl_hours);
            }
            let tokens = TokenKeys::new(&token_config);
            let pool = db::create_pool(&config.database_path)?;
            let user = queries::get_user_by_id(&*pool.get()?, user_id)?
                .ok_or_else(|| anyhow::anyhow!("User {user_id} not found"))?;
            let token = tokens.issue(user.id, &user.name)?;
            println!("{token}");
            Ok(())
        }
    }
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let tokens = TokenKeys::new(&config.token_config()?);

    let pool = db::create_pool(&config.database_path)?;
    db::init_db(&*pool.get()?)?;
    tracing::info!("Database ready at {}", config.database_path);

    let state = AppState::new(pool, tokens, policy::route_table());
    let app = handlers::app(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
