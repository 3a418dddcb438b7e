//! Shopdesk CLI - store administration from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Store the token issued by the backend's login
//! shopdesk session set-token --token "$TOKEN"
//!
//! # Search coupons and create one
//! shopdesk coupons list -q spring
//! shopdesk coupons create --code SPRING10 --type percentage --value 10
//!
//! # Ship an order
//! shopdesk orders status 1001 shipped
//! shopdesk orders tracking 1001 --number 1Z999 --carrier UPS
//!
//! # Rearrange the home page carousel
//! shopdesk images down img_42
//! ```
//!
//! # Environment Variables
//!
//! See `shopdesk_admin::config` for the full list; `SHOPDESK_API_BASE_URL`
//! is required for everything except `session`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Context;
use commands::coupons::CouponAction;
use commands::customers::CustomerAction;
use commands::images::ImageAction;
use commands::orders::OrderAction;
use commands::products::ProductAction;
use commands::reviews::ReviewAction;
use commands::session::SessionAction;
use commands::settings::SettingsAction;
use commands::sub_categories::SubCategoryAction;
use commands::users::UserAction;

#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(author, version, about = "Shopdesk store admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored login
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Discount coupons
    Coupons {
        #[command(subcommand)]
        action: CouponAction,
    },
    /// Customers, bans and notes
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Orders, status and shipment tracking
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Review moderation
    Reviews {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Home page carousel
    Images {
        #[command(subcommand)]
        action: ImageAction,
    },
    /// Admin accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Product catalogue
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Product sub-categories
    SubCategories {
        #[command(subcommand)]
        action: SubCategoryAction,
    },
    /// Store settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Upload an image or video file
    Upload {
        path: PathBuf,
        /// Also add the uploaded image to the home page carousel
        #[arg(long)]
        carousel: bool,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopdesk=info".into());

    // Logs go to stderr so tables on stdout stay clean
    let json = std::env::var("SHOPDESK_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Session { action } = cli.command {
        commands::session::run(action)?;
        return Ok(());
    }

    let mut ctx = Context::from_env()?;
    match cli.command {
        Commands::Session { .. } => {}
        Commands::Coupons { action } => commands::coupons::run(&mut ctx, action).await?,
        Commands::Customers { action } => commands::customers::run(&mut ctx, action).await?,
        Commands::Orders { action } => commands::orders::run(&mut ctx, action).await?,
        Commands::Reviews { action } => commands::reviews::run(&mut ctx, action).await?,
        Commands::Images { action } => commands::images::run(&mut ctx, action).await?,
        Commands::Users { action } => commands::users::run(&mut ctx, action).await?,
        Commands::Products { action } => commands::products::run(&mut ctx, action).await?,
        Commands::SubCategories { action } => {
            commands::sub_categories::run(&mut ctx, action).await?;
        }
        Commands::Settings { action } => commands::settings::run(&mut ctx, action).await?,
        Commands::Upload { path, carousel } => {
            commands::upload::run(&mut ctx, path, carousel).await?;
        }
    }

    if ctx.console.error_count() > 0 {
        return Err(format!("{} error(s) reported", ctx.console.error_count()).into());
    }
    Ok(())
}
