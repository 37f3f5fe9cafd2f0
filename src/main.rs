//! CLI entry point for blog-reader

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_reader::BlogReader;

#[derive(Parser)]
#[command(name = "blog-reader")]
#[command(version)]
#[command(about = "Read a markdown blog from a remote store", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the reader server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List posts, newest first
    List,

    /// Show a post
    Show {
        /// Slug of the post
        slug: String,

        /// Print the markdown instead of rendered HTML
        #[arg(long)]
        raw: bool,
    },

    /// Show or change the theme (light, dark, toggle)
    Theme {
        #[arg(value_parser = ["light", "dark", "toggle"])]
        choice: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_reader=debug,info"
    } else {
        "blog_reader=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Server { port, ip, open } => {
            let reader = Arc::new(BlogReader::new(&base_dir)?);
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_reader::server::start(reader, &ip, port, open).await?;
        }

        Commands::List => {
            let reader = BlogReader::new(&base_dir)?;
            blog_reader::commands::list::run(&reader).await?;
        }

        Commands::Show { slug, raw } => {
            let reader = BlogReader::new(&base_dir)?;
            blog_reader::commands::show::run(&reader, &slug, raw).await?;
        }

        Commands::Theme { choice } => {
            let reader = BlogReader::new(&base_dir)?;
            blog_reader::commands::theme::run(&reader, choice.as_deref())?;
        }

        Commands::Version => {
            println!("blog-reader version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
