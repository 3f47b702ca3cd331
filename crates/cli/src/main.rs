//! Shopfront CLI - drive the storefront state container from a terminal.
//!
//! Every invocation opens the file-backed store, restoring the session and
//! its cart and wishlist exactly like a page reload, runs one command and
//! exits.
//!
//! # Usage
//!
//! ```bash
//! shopfront login demo@example.com demo123
//! shopfront cart add 3
//! shopfront cart set 3 2
//! shopfront cart show
//! shopfront products --query sapphire
//! shopfront chat "how long does shipping take?"
//! shopfront recommend --limit 4
//! shopfront logout
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shopfront_core::ProductId;

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront CLI")]
struct Cli {
    /// Directory of persisted session and shop records
    /// (default: `STOREFRONT_DATA_DIR` or ./data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in
    Login { email: String, password: String },
    /// Register a new account and log in
    Register {
        email: String,
        password: String,
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Log out (the cart and wishlist stay saved)
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Filter the local catalog
    Products {
        /// Free-text query
        #[arg(short, long, default_value = "")]
        query: String,
        /// Exact category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Ask the chat assistant
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Fetch recommendations from the collaborator
    Recommend {
        #[arg(short, long, default_value_t = 8)]
        limit: u32,
    },
    /// Search through the collaborator
    Search {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
        #[arg(long)]
        keywords: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and the total
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a line
    Remove { product_id: ProductId },
    /// Set a line's quantity (0 or less removes it)
    Set {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List saved products
    Show,
    /// Save a product
    Add { product_id: ProductId },
    /// Unsave a product
    Remove { product_id: ProductId },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut ctx = Context::open(cli.data_dir)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&mut ctx, &email, &password)?,
        Commands::Register {
            email,
            password,
            name,
        } => commands::auth::register(&mut ctx, &email, &password, name)?,
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::shop::show_cart(&ctx),
            CartAction::Add { product_id } => commands::shop::add_to_cart(&mut ctx, product_id)?,
            CartAction::Remove { product_id } => {
                commands::shop::remove_from_cart(&mut ctx, product_id);
            }
            CartAction::Set {
                product_id,
                quantity,
            } => commands::shop::set_quantity(&mut ctx, product_id, quantity),
            CartAction::Clear => commands::shop::clear_cart(&mut ctx),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::shop::show_wishlist(&ctx),
            WishlistAction::Add { product_id } => {
                commands::shop::add_to_wishlist(&mut ctx, product_id)?;
            }
            WishlistAction::Remove { product_id } => {
                commands::shop::remove_from_wishlist(&mut ctx, product_id);
            }
        },
        Commands::Products { query, category } => {
            commands::catalog::products(&ctx, &query, category.as_deref());
        }
        Commands::Chat { message } => commands::assistant::chat(&message.join(" ")),
        Commands::Recommend { limit } => commands::assistant::recommend(&ctx, limit).await?,
        Commands::Search {
            category,
            brand,
            min_price,
            max_price,
            keywords,
        } => {
            let query = shopfront_storefront::collaborator::SearchQuery {
                category,
                brand,
                min_price,
                max_price,
                keywords,
            };
            commands::assistant::search(&ctx, &query).await?;
        }
    }
    Ok(())
}
